//! Built-in settings tables shipped with the delegate.

mod common;
mod geometry;
mod light;
mod render;

pub use common::{VISIBILITY_FLAG_NAMES, visibility_flag_settings};
pub use geometry::geometry_settings_table;
pub use light::light_settings_table;
pub use render::{RENDER_QUALITY, render_settings_table, render_settings_table_with};
