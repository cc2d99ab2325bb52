use std::collections::BTreeMap;

use crate::schema::model::Value;

/// Settings-store key carrying Houdini's interactive mode (`normal` when not interactive).
pub const INTERACTIVE_KEY: &str = "houdini:interactive";

/// External key-value store the config syncs from (the render delegate's settings map).
pub trait SettingsProvider {
    /// Counter bumped whenever any stored value changes.
    fn settings_version(&self) -> i64;

    /// Current value for `key`, if set.
    fn get(&self, key: &str) -> Option<Value>;
}

/// In-memory [`SettingsProvider`]; every write bumps the version.
#[derive(Clone, Debug, Default)]
pub struct MapProvider {
    version: i64,
    values: BTreeMap<String, Value>,
}

impl MapProvider {
    /// Empty store at version 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
        self.version += 1;
    }

    /// Builder-style [`MapProvider::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Drop `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let old = self.values.remove(key);
        if old.is_some() {
            self.version += 1;
        }
        old
    }
}

impl SettingsProvider for MapProvider {
    fn settings_version(&self) -> i64 {
        self.version
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}
