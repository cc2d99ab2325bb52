use crate::compile::fingerprint::prefs_version;
use crate::foundation::core::{DirtyMask, Platform};
use crate::foundation::error::{CodegenError, CodegenResult};
use crate::foundation::naming::{capitalize_first, cpp_identifier};
use crate::schema::model::{Setting, SettingsTable, Value};
use crate::schema::resolve_default_token;

/// Dirty bit reserved for interactive-mode changes.
pub const INTERACTIVE_MODE_BIT: u32 = 0;

/// Storage kind of a setting in the generated config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingKind {
    /// `bool`.
    Bool,
    /// `int`.
    Int,
    /// `float`.
    Float,
    /// `TfToken`.
    Token,
    /// Closed enumeration stored as `<Title>Type`.
    Enum {
        /// Generated C++ enum type name.
        type_name: String,
        /// Machine keys in declaration order; the index is the stored value.
        keys: Vec<String>,
    },
}

impl SettingKind {
    /// C++ type of the stored field and getter.
    pub fn cpp_storage_type(&self) -> &str {
        match self {
            SettingKind::Bool => "bool",
            SettingKind::Int => "int",
            SettingKind::Float => "float",
            SettingKind::Token => "TfToken",
            SettingKind::Enum { type_name, .. } => type_name,
        }
    }

    /// C++ type of the setter argument. Enumerations are set by index.
    pub fn cpp_param_type(&self) -> &str {
        match self {
            SettingKind::Enum { .. } => "int",
            other => other.cpp_storage_type(),
        }
    }

    /// Short name used in dumps and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            SettingKind::Bool => "bool",
            SettingKind::Int => "int",
            SettingKind::Float => "float",
            SettingKind::Token => "token",
            SettingKind::Enum { .. } => "enum",
        }
    }
}

/// A category's dirty flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutCategory {
    /// Category name.
    pub name: String,
    /// `Dirty<Name>`.
    pub dirty_flag: String,
    /// Bit index, starting right after the reserved bits.
    pub bit: u32,
}

impl LayoutCategory {
    /// Mask with only this category's bit set.
    pub fn mask(&self) -> DirtyMask {
        DirtyMask::bit(self.bit)
    }
}

/// One setting as the generated config stores it.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSetting {
    /// Settings-store key (`quality:rayDepth`).
    pub name: String,
    /// Field identifier (`qualityRayDepth`).
    pub ident: String,
    /// Accessor suffix (`QualityRayDepth`).
    pub title: String,
    /// Storage kind.
    pub kind: SettingKind,
    /// Default value. Enumerations hold the default member index as `Int`.
    pub default: Value,
    /// Inclusive lower bound; `Int(0)` for enumerations.
    pub min: Option<Value>,
    /// Inclusive upper bound; `Int(len - 1)` for enumerations.
    pub max: Option<Value>,
    /// Index into [`ConfigLayout::categories`].
    pub category: usize,
    /// Setter compiled as a no-op on the target platform.
    pub platform_disabled: bool,
    /// UI label; `None` keeps the setting out of the descriptor list.
    pub ui_name: Option<String>,
}

impl LayoutSetting {
    /// Enumerated key at `index`, if this is an enumeration.
    pub fn enum_key(&self, index: i64) -> Option<&str> {
        match &self.kind {
            SettingKind::Enum { keys, .. } => usize::try_from(index)
                .ok()
                .and_then(|i| keys.get(i))
                .map(String::as_str),
            _ => None,
        }
    }

    /// Return `true` when `v` has this setting's kind and lies within its bounds.
    ///
    /// Integers must also fit the generated `int` storage.
    pub fn accepts(&self, v: &Value) -> bool {
        let kind_ok = match (&self.kind, v) {
            (SettingKind::Int | SettingKind::Enum { .. }, Value::Int(i)) => {
                i32::try_from(*i).is_ok()
            }
            (SettingKind::Bool, Value::Bool(_))
            | (SettingKind::Float, Value::Float(_))
            | (SettingKind::Token, Value::Token(_)) => true,
            _ => false,
        };
        if !kind_ok {
            return false;
        }
        let Some(x) = v.as_f64() else {
            return true;
        };
        let lo = self.min.as_ref().and_then(Value::as_f64);
        let hi = self.max.as_ref().and_then(Value::as_f64);
        lo.is_none_or(|lo| x >= lo) && hi.is_none_or(|hi| x <= hi)
    }
}

/// Deterministic layout of the generated config class for one target platform.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigLayout {
    /// Platform the layout was compiled for.
    pub platform: Platform,
    /// Categories in table order.
    pub categories: Vec<LayoutCategory>,
    /// Settings in table order.
    pub settings: Vec<LayoutSetting>,
    /// Preferences schema version, see `k_prefDataVersion`.
    pub prefs_version: u32,
}

impl ConfigLayout {
    /// Look up a setting by its store key.
    pub fn setting(&self, name: &str) -> Option<&LayoutSetting> {
        self.settings.iter().find(|s| s.name == name)
    }

    /// Index of a setting by its store key.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.settings.iter().position(|s| s.name == name)
    }

    /// Dirty mask of the category owning `setting`.
    pub fn dirty_mask(&self, setting: &LayoutSetting) -> DirtyMask {
        self.categories[setting.category].mask()
    }

    /// Category by name.
    pub fn category(&self, name: &str) -> Option<&LayoutCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Deterministic text dump used by determinism checks.
    pub fn dump(&self) -> String {
        let mut s = String::new();
        s.push_str("ConfigLayout\n");
        s.push_str(&format!("platform: {}\n", self.platform));
        s.push_str(&format!("prefs_version: {:#010x}\n", self.prefs_version));
        for c in &self.categories {
            s.push_str(&format!("  {} = 1 << {}\n", c.dirty_flag, c.bit));
        }
        for st in &self.settings {
            s.push_str(&format!(
                "  {} {}: {} default={:?} range=[{:?}, {:?}] cat={}{}\n",
                st.kind.name(),
                st.ident,
                st.name,
                st.default,
                st.min,
                st.max,
                st.category,
                if st.platform_disabled { " disabled" } else { "" },
            ));
        }
        s
    }
}

/// Validate `table` and lay it out for `platform`.
///
/// Category bits are assigned by table position starting at bit 1; reordering categories
/// changes the generated ABI.
#[tracing::instrument(skip(table), fields(categories = table.categories.len()))]
pub fn compile_layout(table: &SettingsTable, platform: Platform) -> CodegenResult<ConfigLayout> {
    table.validate()?;

    let categories = table
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| LayoutCategory {
            name: c.name.clone(),
            dirty_flag: format!("Dirty{}", c.name),
            bit: INTERACTIVE_MODE_BIT + 1 + i as u32,
        })
        .collect::<Vec<_>>();

    let mut settings = Vec::new();
    for (ci, category) in table.categories.iter().enumerate() {
        let category_disabled = category.disabled_platforms.contains(&platform);
        for s in category.settings() {
            let mut ls = layout_setting(s, ci)?;
            ls.platform_disabled = category_disabled || s.disabled_platforms.contains(&platform);
            settings.push(ls);
        }
    }

    let prefs_version = prefs_version(&settings);
    tracing::debug!(settings = settings.len(), prefs_version, "compiled config layout");
    Ok(ConfigLayout {
        platform,
        categories,
        settings,
        prefs_version,
    })
}

fn layout_setting(s: &Setting, category: usize) -> CodegenResult<LayoutSetting> {
    let ident = cpp_identifier(&s.name);
    let title = capitalize_first(&ident);

    let (kind, default, min, max) = if s.is_enumerated() {
        let member = resolve_default_token(s)?;
        let keys = s.members().iter().map(|m| m.key()).collect::<Vec<_>>();
        let index = keys
            .iter()
            .position(|k| *k == member.key())
            .ok_or_else(|| CodegenError::validation(format!("'{}' lost its default", s.name)))?;
        let last = keys.len() as i64 - 1;
        (
            SettingKind::Enum {
                type_name: format!("{title}Type"),
                keys,
            },
            Value::Int(index as i64),
            Some(Value::Int(0)),
            Some(Value::Int(last)),
        )
    } else {
        match &s.default_value {
            Value::Bool(_) => (SettingKind::Bool, s.default_value.clone(), None, None),
            Value::Int(_) => (
                SettingKind::Int,
                s.default_value.clone(),
                s.min_value.clone(),
                s.max_value.clone(),
            ),
            Value::Float(_) => (
                SettingKind::Float,
                s.default_value.clone(),
                s.min_value.as_ref().and_then(Value::as_f64).map(Value::Float),
                s.max_value.as_ref().and_then(Value::as_f64).map(Value::Float),
            ),
            Value::Token(_) => (SettingKind::Token, s.default_value.clone(), None, None),
        }
    };

    Ok(LayoutSetting {
        name: s.name.clone(),
        ident,
        title,
        kind,
        default,
        min,
        max,
        category,
        platform_disabled: false,
        ui_name: s.ui_name.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/layout.rs"]
mod tests;
