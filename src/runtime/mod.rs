//! Executable model of the generated `HdRprConfig` class.
//!
//! Mirrors the emitted setter, dirty-tracking and `Sync` semantics so the contract can be
//! exercised without a C++ toolchain.

/// Versioned preferences file.
pub mod prefs;
/// Settings stores the config syncs from.
pub mod provider;
/// Config values and dirty tracking.
pub mod state;

pub use prefs::Preferences;
pub use provider::{INTERACTIVE_KEY, MapProvider, SettingsProvider};
pub use state::ConfigState;
