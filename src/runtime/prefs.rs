use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;

use crate::compile::layout::ConfigLayout;
use crate::emit::ensure_parent_dir;
use crate::foundation::error::{CodegenError, CodegenResult};
use crate::schema::model::Value;

/// Default preferences file name, next to the delegate's app-data directory.
pub const PREFERENCES_FILE: &str = "hdRprPreferences.json";

/// Persisted config block, tagged with the layout's schema version.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Preferences {
    /// Must equal [`ConfigLayout::prefs_version`] to be used.
    pub schema_version: u32,
    /// Last interactive mode.
    pub enable_interactive: bool,
    /// Stored values by setting name. Enumerations hold their member index.
    pub values: BTreeMap<String, Value>,
}

impl Preferences {
    /// Read preferences for `layout`.
    ///
    /// Returns `None` for a missing or unreadable file, a schema mismatch, or any value that
    /// the current layout would reject. The caller then starts from defaults.
    pub fn load(path: impl AsRef<Path>, layout: &ConfigLayout) -> Option<Self> {
        let path = path.as_ref();
        let f = File::open(path).ok()?;
        let prefs: Preferences = match serde_json::from_reader(BufReader::new(f)) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable preferences");
                return None;
            }
        };
        if !prefs.is_valid_for(layout) {
            tracing::info!(
                path = %path.display(),
                stored = prefs.schema_version,
                expected = layout.prefs_version,
                "discarding stale preferences"
            );
            return None;
        }
        Some(prefs)
    }

    /// Write as pretty JSON, replacing any previous file.
    pub fn save(&self, path: impl AsRef<Path>) -> CodegenResult<()> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;
        let f = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self)
            .map_err(|e| CodegenError::serde(format!("serialize preferences: {e}")))?;
        w.write_all(b"\n")
            .and_then(|()| w.flush())
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        Ok(())
    }

    /// Return `true` when the version matches and every stored value is acceptable.
    pub fn is_valid_for(&self, layout: &ConfigLayout) -> bool {
        self.schema_version == layout.prefs_version
            && layout
                .settings
                .iter()
                .all(|s| self.values.get(&s.name).is_some_and(|v| s.accepts(v)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/prefs.rs"]
mod tests;
