//! Table -> deterministic config layout.

pub(crate) mod fingerprint;
/// Category bits, setting identifiers and C++ kinds.
pub mod layout;

pub use layout::{ConfigLayout, LayoutCategory, LayoutSetting, SettingKind, compile_layout};
