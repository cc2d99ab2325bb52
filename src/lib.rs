//! Settings generator for the hdRpr Hydra render delegate.
//!
//! A single declarative settings table drives every artifact:
//!
//! - [`emit::cpp`] renders `config.h` / `config.cpp`: typed accessors, per-category dirty
//!   flags, range-checked setters, a versioned `Sync` and a persisted preferences block.
//! - [`emit::houdini`] renders `HdRprPlugin_<Name>.ds` parameter descriptions.
//! - [`runtime`] models the generated config class so its contract is testable in Rust.
//!
//! The usual entry point is [`generate`], which wires the built-in [`tables`] through
//! [`compile::compile_layout`] and the emitters.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod compile;
pub mod emit;
pub mod generate;
pub mod runtime;
pub mod schema;
pub mod tables;

pub use crate::foundation::core::{DirtyMask, Platform};
pub use crate::foundation::error::{CodegenError, CodegenResult};
pub use crate::foundation::naming::{cpp_identifier, houdini_param_name};

pub use crate::compile::{ConfigLayout, compile_layout};
pub use crate::generate::{
    GenerateOpts, generate_all, generate_from_table, generate_geometry_settings,
    generate_light_settings, generate_render_settings,
};
pub use crate::runtime::{ConfigState, MapProvider, Preferences, SettingsProvider};
pub use crate::schema::model::{SettingsTable, Value};
