use crate::foundation::error::CodegenResult;
use crate::schema::dsl::{CategoryBuilder, TableBuilder};
use crate::schema::model::{SettingsTable, Value};
use crate::tables::common::visibility_flag_settings;

// Lights are invisible to camera, shadow and light rays unless asked otherwise.
const HIDDEN_BY_DEFAULT: [&str; 3] = [
    "primvars:rpr:visibilityPrimary",
    "primvars:rpr:visibilityShadow",
    "primvars:rpr:visibilityLight",
];

/// Visibility primvars exposed on Houdini lights. Emitted as `.ds` only.
#[tracing::instrument]
pub fn light_settings_table() -> CodegenResult<SettingsTable> {
    let mut flags = visibility_flag_settings()?;
    for s in &mut flags {
        if HIDDEN_BY_DEFAULT.contains(&s.name.as_str()) {
            s.default_value = Value::Bool(false);
        }
    }

    TableBuilder::new()
        .category(CategoryBuilder::new("Light").settings(flags).build()?)
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/tables/light.rs"]
mod tests;
