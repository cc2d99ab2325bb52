//! Generation driver: built-in or custom table -> files under the install directory.

use std::path::PathBuf;

use crate::compile::compile_layout;
use crate::emit::GeneratedFile;
use crate::emit::cpp::emit_config;
use crate::emit::houdini::emit_ds;
use crate::foundation::core::Platform;
use crate::foundation::error::CodegenResult;
use crate::schema::model::SettingsTable;
use crate::tables::{geometry_settings_table, light_settings_table, render_settings_table_with};

/// Options shared by every generation entry point.
#[derive(Clone, Debug)]
pub struct GenerateOpts {
    /// Directory receiving the generated files.
    pub install_path: PathBuf,
    /// Emit Houdini `.ds` files.
    pub generate_ds_files: bool,
    /// Target platform; decides which setters compile to no-ops.
    pub platform: Platform,
    /// Render-quality keys dropped from the render-quality menu.
    pub hidden_render_qualities: Vec<String>,
}

impl Default for GenerateOpts {
    fn default() -> Self {
        Self {
            install_path: PathBuf::from("."),
            generate_ds_files: false,
            platform: Platform::current(),
            hidden_render_qualities: Vec::new(),
        }
    }
}

/// `config.h`, `config.cpp` and, when enabled, `HdRprPlugin_Global.ds`.
#[tracing::instrument(skip(opts), fields(install = %opts.install_path.display()))]
pub fn generate_render_settings(opts: &GenerateOpts) -> CodegenResult<Vec<PathBuf>> {
    let table = render_settings_table_with(&opts.hidden_render_qualities)?;
    generate_from_table(&table, "Global", true, opts)
}

/// `HdRprPlugin_Geometry.ds` when `.ds` emission is enabled.
#[tracing::instrument(skip(opts), fields(install = %opts.install_path.display()))]
pub fn generate_geometry_settings(opts: &GenerateOpts) -> CodegenResult<Vec<PathBuf>> {
    generate_from_table(&geometry_settings_table()?, "Geometry", false, opts)
}

/// `HdRprPlugin_Light.ds` when `.ds` emission is enabled.
#[tracing::instrument(skip(opts), fields(install = %opts.install_path.display()))]
pub fn generate_light_settings(opts: &GenerateOpts) -> CodegenResult<Vec<PathBuf>> {
    generate_from_table(&light_settings_table()?, "Light", false, opts)
}

/// Light, geometry, then render settings.
///
/// All three tables are rendered before the first write, so a failing table leaves the install
/// directory untouched.
#[tracing::instrument(skip(opts), fields(install = %opts.install_path.display()))]
pub fn generate_all(opts: &GenerateOpts) -> CodegenResult<Vec<PathBuf>> {
    let render = render_settings_table_with(&opts.hidden_render_qualities)?;
    let mut files = render_files(&light_settings_table()?, "Light", false, opts)?;
    files.extend(render_files(&geometry_settings_table()?, "Geometry", false, opts)?);
    files.extend(render_files(&render, "Global", true, opts)?);
    let written = write_files(&files, opts)?;
    tracing::info!(files = written.len(), "generation complete");
    Ok(written)
}

/// Generate from an arbitrary table.
///
/// Everything is rendered before the first write, so a table that fails to compile or emit
/// leaves the install directory untouched.
#[tracing::instrument(skip(table, opts), fields(install = %opts.install_path.display()))]
pub fn generate_from_table(
    table: &SettingsTable,
    ds_name: &str,
    emit_cpp: bool,
    opts: &GenerateOpts,
) -> CodegenResult<Vec<PathBuf>> {
    let files = render_files(table, ds_name, emit_cpp, opts)?;
    write_files(&files, opts)
}

fn render_files(
    table: &SettingsTable,
    ds_name: &str,
    emit_cpp: bool,
    opts: &GenerateOpts,
) -> CodegenResult<Vec<GeneratedFile>> {
    let mut files = Vec::new();
    if emit_cpp {
        let layout = compile_layout(table, opts.platform)?;
        files.extend(emit_config(&layout)?);
    } else {
        table.validate()?;
    }
    if opts.generate_ds_files
        && let Some(ds) = emit_ds(table, ds_name)?
    {
        files.push(ds);
    }
    Ok(files)
}

fn write_files(files: &[GeneratedFile], opts: &GenerateOpts) -> CodegenResult<Vec<PathBuf>> {
    files
        .iter()
        .map(|f| f.write_to(&opts.install_path))
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/generate.rs"]
mod tests;
