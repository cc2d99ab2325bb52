use std::path::PathBuf;

use crate::compile::layout::{ConfigLayout, LayoutSetting, SettingKind};
use crate::foundation::core::DirtyMask;
use crate::runtime::prefs::Preferences;
use crate::runtime::provider::{INTERACTIVE_KEY, SettingsProvider};
use crate::schema::model::Value;

/// In-memory counterpart of one `HdRprConfig` instance.
///
/// Setters silently reject invalid values and keep the last good one. A changed value raises
/// exactly the owning category's dirty bit.
#[derive(Debug)]
pub struct ConfigState<'a> {
    layout: &'a ConfigLayout,
    values: Vec<Value>,
    enable_interactive: bool,
    dirty: DirtyMask,
    last_settings_version: Option<i64>,
    prefs_path: Option<PathBuf>,
}

impl<'a> ConfigState<'a> {
    /// All settings at their defaults, every dirty bit raised.
    pub fn new(layout: &'a ConfigLayout) -> Self {
        Self {
            layout,
            values: layout.settings.iter().map(|s| s.default.clone()).collect(),
            enable_interactive: false,
            dirty: DirtyMask::ALL,
            last_settings_version: None,
            prefs_path: None,
        }
    }

    /// Start from stored preferences when they match `layout`, from defaults otherwise.
    pub fn with_preferences(layout: &'a ConfigLayout, prefs: Option<&Preferences>) -> Self {
        let mut state = Self::new(layout);
        let Some(prefs) = prefs.filter(|p| p.is_valid_for(layout)) else {
            return state;
        };
        state.enable_interactive = prefs.enable_interactive;
        for (slot, s) in state.values.iter_mut().zip(&layout.settings) {
            if let Some(v) = prefs.values.get(&s.name) {
                *slot = v.clone();
            }
        }
        state
    }

    /// Save preferences to `path` after every accepted change.
    pub fn persist_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.prefs_path = Some(path.into());
        self
    }

    /// Layout this state follows.
    pub fn layout(&self) -> &'a ConfigLayout {
        self.layout
    }

    /// Snapshot of the persisted block.
    pub fn to_preferences(&self) -> Preferences {
        Preferences {
            schema_version: self.layout.prefs_version,
            enable_interactive: self.enable_interactive,
            values: self
                .layout
                .settings
                .iter()
                .zip(&self.values)
                .map(|(s, v)| (s.name.clone(), v.clone()))
                .collect(),
        }
    }

    /// Stored value of `name`. Enumerations yield their member index as `Int`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.layout.index_of(name).map(|i| &self.values[i])
    }

    /// Stored key of an enumerated setting.
    pub fn get_enum_key(&self, name: &str) -> Option<&str> {
        let i = self.layout.index_of(name)?;
        match self.values[i] {
            Value::Int(index) => self.layout.settings[i].enum_key(index),
            _ => None,
        }
    }

    /// Apply a setter. Returns `true` only when the stored value changed.
    ///
    /// Rejected: unknown names, platform-disabled settings, wrong kinds, out-of-range values
    /// and unknown enum keys. Floats accept integers; enumerations accept an index or a key.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let Some(i) = self.layout.index_of(name) else {
            tracing::debug!(name, "ignoring unknown setting");
            return false;
        };
        self.set_index(i, value.into())
    }

    fn set_index(&mut self, i: usize, value: Value) -> bool {
        let layout = self.layout;
        let s = &layout.settings[i];
        if s.platform_disabled {
            return false;
        }
        let Some(value) = normalize(s, value) else {
            return false;
        };
        if !s.accepts(&value) || self.values[i] == value {
            return false;
        }
        self.values[i] = value;
        self.dirty |= layout.dirty_mask(s);
        self.save();
        true
    }

    /// Toggle interactive mode, raising the reserved dirty bit on change.
    pub fn set_interactive_mode(&mut self, enable: bool) -> bool {
        if self.enable_interactive == enable {
            return false;
        }
        self.enable_interactive = enable;
        self.dirty |= DirtyMask::bit(crate::compile::layout::INTERACTIVE_MODE_BIT);
        self.save();
        true
    }

    /// Current interactive mode.
    pub fn interactive_mode(&self) -> bool {
        self.enable_interactive
    }

    /// Return `true` when any bit of `mask` is raised.
    pub fn is_dirty(&self, mask: DirtyMask) -> bool {
        self.dirty.intersects(mask)
    }

    /// Lower the bits of `mask`.
    pub fn clean_dirty(&mut self, mask: DirtyMask) {
        self.dirty = DirtyMask(self.dirty.0 & !mask.0);
    }

    /// Lower every bit.
    pub fn reset_dirty(&mut self) {
        self.dirty = DirtyMask::CLEAN;
    }

    /// Raw dirty bits.
    pub fn dirty_bits(&self) -> DirtyMask {
        self.dirty
    }

    /// Re-read every setting from `provider` unless its version was already synced.
    ///
    /// Returns `false` when skipped. Values missing or of an unusable type fall back to the
    /// default, as the generated `Sync` does.
    #[tracing::instrument(skip_all, fields(version = provider.settings_version()))]
    pub fn sync(&mut self, provider: &dyn SettingsProvider) -> bool {
        let version = provider.settings_version();
        if self.last_settings_version == Some(version) {
            return false;
        }
        self.last_settings_version = Some(version);

        let interactive = matches!(
            provider.get(INTERACTIVE_KEY),
            Some(Value::Token(mode)) if mode != "normal"
        );
        self.set_interactive_mode(interactive);

        let layout = self.layout;
        for (i, s) in layout.settings.iter().enumerate() {
            let value = read_setting(s, provider.get(&s.name));
            self.set_index(i, value);
        }
        true
    }

    fn save(&self) {
        let Some(path) = &self.prefs_path else {
            return;
        };
        if let Err(e) = self.to_preferences().save(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save preferences");
        }
    }
}

/// Setter argument conversion.
fn normalize(s: &LayoutSetting, v: Value) -> Option<Value> {
    match (&s.kind, v) {
        (SettingKind::Float, Value::Int(i)) => Some(Value::Float(i as f64)),
        (SettingKind::Enum { keys, .. }, Value::Token(t)) => {
            let key = crate::foundation::naming::enum_key(&t);
            keys.iter()
                .position(|k| *k == key)
                .map(|i| Value::Int(i as i64))
        }
        (_, v) => Some(v),
    }
}

/// Provider value conversion used by `sync`.
fn read_setting(s: &LayoutSetting, raw: Option<Value>) -> Value {
    match (&s.kind, raw) {
        (SettingKind::Bool, Some(Value::Bool(b))) => Value::Bool(b),
        (SettingKind::Bool, Some(Value::Int(i))) => Value::Bool(i != 0),
        (SettingKind::Int, Some(Value::Int(i))) => Value::Int(i),
        (SettingKind::Float, Some(Value::Float(f))) => Value::Float(f),
        (SettingKind::Float, Some(Value::Int(i))) => Value::Float(i as f64),
        (SettingKind::Token, Some(Value::Token(t))) => Value::Token(t),
        (SettingKind::Enum { .. }, Some(Value::Int(i))) => Value::Int(i),
        // Unknown keys map to an index the setter rejects.
        (SettingKind::Enum { .. }, Some(Value::Token(t))) => {
            normalize(s, Value::Token(t)).unwrap_or(Value::Int(-1))
        }
        _ => s.default.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/state.rs"]
mod tests;
