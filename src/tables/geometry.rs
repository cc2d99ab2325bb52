use crate::foundation::error::CodegenResult;
use crate::schema::dsl::{CategoryBuilder, FolderBuilder, SettingBuilder, TableBuilder};
use crate::schema::model::SettingsTable;
use crate::tables::common::visibility_flag_settings;

/// Per-mesh primvars exposed on Houdini geometry. Emitted as `.ds` only.
#[tracing::instrument]
pub fn geometry_settings_table() -> CodegenResult<SettingsTable> {
    let mesh = CategoryBuilder::new("Mesh")
        .setting(
            SettingBuilder::new("primvars:rpr:id", 0)
                .ui_name("ID")
                .range(0, 1 << 16)
                .build()?,
        )
        .setting(
            SettingBuilder::new("primvars:rpr:subdivisionLevel", 0)
                .ui_name("Subdivision Level")
                .range(0, 7)
                .build()?,
        )
        .setting(
            SettingBuilder::new("primvars:rpr:ignoreContour", false)
                .ui_name("Ignore Contour")
                .help("Whether to extract contour for a mesh or not")
                .build()?,
        )
        .folder(
            FolderBuilder::new("Visibility Settings")
                .settings(visibility_flag_settings()?)
                .build()?,
        )
        .build()?;

    TableBuilder::new().category(mesh).build()
}
