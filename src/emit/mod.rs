//! Artifact emitters: C++ config pair and Houdini `.ds` files.

/// C++ config pair.
pub mod cpp;
/// Houdini `.ds` files.
pub mod houdini;

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::CodegenResult;

/// One generated artifact, named relative to the install directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the install directory.
    pub name: String,
    /// Full file contents.
    pub contents: String,
}

impl GeneratedFile {
    /// Pair a file name with its contents.
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Write the file under `dir`, replacing any previous version. Returns the written path.
    pub fn write_to(&self, dir: &Path) -> CodegenResult<PathBuf> {
        let path = dir.join(&self.name);
        ensure_parent_dir(&path)?;
        std::fs::write(&path, &self.contents)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = self.contents.len(), "wrote generated file");
        Ok(path)
    }
}

/// Create the parent directory of `path` when missing.
pub fn ensure_parent_dir(path: &Path) -> CodegenResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/emit/output.rs"]
mod tests;
