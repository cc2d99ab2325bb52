use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Platform;
use crate::foundation::error::{CodegenError, CodegenResult};
use crate::foundation::naming::enum_key;

/// A setting value: the authored default, a range bound, or a value read back from the render
/// delegate's settings store.
///
/// The variant of a setting's default decides the setting's type, so `256` is an integer
/// setting and `256.0` a float setting.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Interned string token (also used for enumerated keys).
    Token(String),
}

impl Value {
    /// Short type name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Token(_) => "token",
        }
    }

    /// Numeric view of `Int` and `Float` values.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(v) => Some(v as f64),
            Value::Float(v) => Some(v),
            Value::Bool(_) | Value::Token(_) => None,
        }
    }

    /// Return `true` for `Int` and `Float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Token payload, if any.
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Token(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Token(v)
    }
}

/// Condition controlling whether an enumerated value is offered in the host menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueGate {
    /// Offered only on the listed platforms.
    Platforms(Vec<Platform>),
    /// Offered when the host evaluates this Python expression to true.
    Python(String),
}

impl ValueGate {
    /// Python expression equivalent of the gate, evaluated by the host when building the menu.
    pub fn python_condition(&self) -> String {
        match self {
            ValueGate::Platforms(platforms) => {
                let names = platforms
                    .iter()
                    .map(|p| format!("\"{}\"", p.as_str()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("platform.system() in [{names}]")
            }
            ValueGate::Python(expr) => expr.clone(),
        }
    }

    /// Static answer for `platform`. Python gates cannot be decided here and report `true`.
    pub fn allows(&self, platform: Platform) -> bool {
        match self {
            ValueGate::Platforms(platforms) => platforms.contains(&platform),
            ValueGate::Python(_) => true,
        }
    }
}

/// One member of an enumerated setting.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "EnumMemberDef")]
pub struct EnumMember {
    raw_key: String,
    ui_name: Option<String>,
    gate: Option<ValueGate>,
}

impl EnumMember {
    /// Member whose label equals its key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            raw_key: key.into(),
            ui_name: None,
            gate: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.ui_name = Some(label.into());
        self
    }

    /// Attach an availability gate.
    pub fn gated(mut self, gate: ValueGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Machine key (authored key with spaces removed).
    pub fn key(&self) -> String {
        enum_key(&self.raw_key)
    }

    /// Key as authored.
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    /// Display label, falling back to the authored key.
    pub fn label(&self) -> &str {
        self.ui_name.as_deref().unwrap_or(&self.raw_key)
    }

    /// Availability gate, if any.
    pub fn gate(&self) -> Option<&ValueGate> {
        self.gate.as_ref()
    }

    /// Return `true` when `token` names this member, either as authored or as machine key.
    pub fn matches(&self, token: &str) -> bool {
        self.raw_key == token || self.key() == enum_key(token)
    }
}

impl From<&str> for EnumMember {
    fn from(key: &str) -> Self {
        EnumMember::new(key)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum EnumMemberDef {
    Key(String),
    Full {
        key: String,
        #[serde(default)]
        ui_name: Option<String>,
        #[serde(default)]
        platforms: Option<Vec<Platform>>,
        #[serde(default)]
        enable_py_condition: Option<String>,
    },
}

impl TryFrom<EnumMemberDef> for EnumMember {
    type Error = String;

    fn try_from(def: EnumMemberDef) -> Result<Self, Self::Error> {
        match def {
            EnumMemberDef::Key(key) => Ok(EnumMember::new(key)),
            EnumMemberDef::Full {
                key,
                ui_name,
                platforms,
                enable_py_condition,
            } => {
                let gate = match (platforms, enable_py_condition) {
                    (Some(_), Some(_)) => {
                        return Err(format!(
                            "value '{key}' sets both 'platforms' and 'enable_py_condition'"
                        ));
                    }
                    (Some(p), None) => Some(ValueGate::Platforms(p)),
                    (None, Some(expr)) => Some(ValueGate::Python(expr)),
                    (None, None) => None,
                };
                Ok(EnumMember {
                    raw_key: key,
                    ui_name,
                    gate,
                })
            }
        }
    }
}

/// Visibility condition for the Houdini UI.
///
/// Conditions are Houdini `hidewhen` expressions (`renderQuality == Low`); a parameter is hidden
/// when any of them holds. `Computed` conditions are derived from the whole table once, at
/// generation time.
#[derive(Clone, serde::Deserialize)]
#[serde(from = "HidewhenDef")]
pub enum Hidewhen {
    /// Fixed list of conditions.
    Static(Vec<String>),
    /// Conditions derived from the table being generated.
    Computed(fn(&SettingsTable) -> Vec<String>),
}

impl Hidewhen {
    /// Single static condition.
    pub fn one(condition: impl Into<String>) -> Self {
        Hidewhen::Static(vec![condition.into()])
    }

    /// Resolve to a concrete list of conditions; empty strings are dropped.
    pub fn resolve(&self, table: &SettingsTable) -> Vec<String> {
        let conditions = match self {
            Hidewhen::Static(c) => c.clone(),
            Hidewhen::Computed(f) => f(table),
        };
        conditions
            .into_iter()
            .filter(|c| !c.trim().is_empty())
            .collect()
    }
}

impl fmt::Debug for Hidewhen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hidewhen::Static(c) => f.debug_tuple("Static").field(c).finish(),
            Hidewhen::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum HidewhenDef {
    One(String),
    Many(Vec<String>),
}

impl From<HidewhenDef> for Hidewhen {
    fn from(def: HidewhenDef) -> Self {
        match def {
            HidewhenDef::One(c) => Hidewhen::Static(vec![c]),
            HidewhenDef::Many(c) => Hidewhen::Static(c),
        }
    }
}

/// Houdini-specific presentation metadata.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct HoudiniMeta {
    /// Visibility condition.
    #[serde(default)]
    pub hidewhen: Option<Hidewhen>,
    /// Extra `parmtag` entries, emitted verbatim.
    #[serde(default)]
    pub custom_tags: Vec<String>,
    /// Override of the inferred parameter type (e.g. `file`).
    #[serde(default, rename = "type")]
    pub param_type: Option<String>,
}

/// One configurable render parameter.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Setting {
    /// Stable hierarchical name (`quality:rayDepth`); also the settings-store key.
    pub name: String,
    /// Human label. Settings without one are not exposed in the UI.
    #[serde(default)]
    pub ui_name: Option<String>,
    /// Default value; its variant decides the setting type.
    #[serde(rename = "defaultValue")]
    pub default_value: Value,
    /// Inclusive lower bound.
    #[serde(default, rename = "minValue")]
    pub min_value: Option<Value>,
    /// Inclusive upper bound.
    #[serde(default, rename = "maxValue")]
    pub max_value: Option<Value>,
    /// Ordered enumerated values; present only for enumerated settings.
    #[serde(default)]
    pub values: Option<Vec<EnumMember>>,
    /// Tooltip text.
    #[serde(default)]
    pub help: Option<String>,
    /// Platforms on which the setter is compiled as a no-op.
    #[serde(default, rename = "disabled_platform")]
    pub disabled_platforms: Vec<Platform>,
    /// Houdini presentation metadata.
    #[serde(default)]
    pub houdini: Option<HoudiniMeta>,
}

impl Setting {
    /// Return `true` when the setting carries a `values` list.
    pub fn is_enumerated(&self) -> bool {
        self.values.is_some()
    }

    /// Enumerated members (empty for plain settings).
    pub fn members(&self) -> &[EnumMember] {
        self.values.as_deref().unwrap_or(&[])
    }

    /// Return `true` when the setting is exposed in the host UI.
    pub fn is_ui_visible(&self) -> bool {
        self.ui_name.is_some()
    }

    /// Setting-level hidewhen, if any.
    pub fn hidewhen(&self) -> Option<&Hidewhen> {
        self.houdini.as_ref().and_then(|h| h.hidewhen.as_ref())
    }

    /// Member matching the default token, if any.
    pub fn default_member(&self) -> Option<&EnumMember> {
        let token = self.default_value.as_token()?;
        self.members().iter().find(|m| m.matches(token))
    }
}

/// Named, collapsible group of settings inside a category.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Folder {
    /// Folder label.
    #[serde(rename = "folder")]
    pub name: String,
    /// Houdini presentation metadata for the group itself.
    #[serde(default)]
    pub houdini: Option<HoudiniMeta>,
    /// Settings inside the folder.
    pub settings: Vec<Setting>,
}

impl Folder {
    /// Folder-level hidewhen, if any.
    pub fn hidewhen(&self) -> Option<&Hidewhen> {
        self.houdini.as_ref().and_then(|h| h.hidewhen.as_ref())
    }
}

/// Entry of a category: a setting or a folder of settings.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum CategoryItem {
    /// Collapsible group.
    Folder(Folder),
    /// Plain setting.
    Setting(Setting),
}

/// Ordered group of settings sharing one dirty flag.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Category {
    /// Category name; becomes `Dirty<Name>` in the generated change tracker.
    pub name: String,
    /// Houdini presentation metadata applied to every child.
    #[serde(default)]
    pub houdini: Option<HoudiniMeta>,
    /// Platforms on which every setter of this category is a no-op.
    #[serde(default, rename = "disabled_platform")]
    pub disabled_platforms: Vec<Platform>,
    /// Settings and folders in authoring order.
    #[serde(rename = "settings")]
    pub items: Vec<CategoryItem>,
}

impl Category {
    /// Category-level hidewhen, if any.
    pub fn hidewhen(&self) -> Option<&Hidewhen> {
        self.houdini.as_ref().and_then(|h| h.hidewhen.as_ref())
    }

    /// Settings in authoring order, folders flattened.
    pub fn settings(&self) -> impl Iterator<Item = &Setting> + '_ {
        self.items.iter().flat_map(|item| match item {
            CategoryItem::Setting(s) => std::slice::from_ref(s).iter(),
            CategoryItem::Folder(f) => f.settings.iter(),
        })
    }
}

/// Ordered list of categories; the single source of truth for every generated artifact.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct SettingsTable {
    /// Categories in table order. Reordering changes the generated dirty-bit layout.
    pub categories: Vec<Category>,
}

impl SettingsTable {
    /// Wrap an ordered category list.
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Parse a table from a JSON reader (an array of categories).
    pub fn from_reader<R: std::io::Read>(r: R) -> CodegenResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CodegenError::serde(format!("parse settings table JSON: {e}")))
    }

    /// Parse a table from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CodegenError::serde(format!("open settings table '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Every setting with the index of its category, in table order.
    pub fn settings(&self) -> impl Iterator<Item = (usize, &Setting)> + '_ {
        self.categories
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.settings().map(move |s| (i, s)))
    }

    /// Look up a setting by name.
    pub fn find_setting(&self, name: &str) -> Option<&Setting> {
        self.settings().map(|(_, s)| s).find(|s| s.name == name)
    }

    /// Validate every table invariant, reporting all violations at once.
    pub fn validate(&self) -> CodegenResult<()> {
        crate::schema::validate::validate_table(self).map_err(|e| {
            CodegenError::validation(format!("settings table validation failed: {e}"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/model.rs"]
mod tests;
