use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::foundation::naming::{capitalize_first, cpp_identifier, is_cpp_identifier, is_cpp_keyword};
use crate::schema::model::{CategoryItem, Setting, SettingsTable, Value};

/// Dirty bit 0 is reserved for interactive mode, leaving 31 bits for categories.
pub const MAX_CATEGORIES: usize = 31;

/// `PrefData` fields the generated class declares itself.
const RESERVED_FIELDS: [&str; 2] = ["version", "enableInteractive"];

/// Accessors the generated class declares itself.
const RESERVED_SYMBOLS: [&str; 4] = [
    "GetInstance",
    "GetInteractiveMode",
    "GetRenderSettingDescriptors",
    "SetInteractiveMode",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

pub(crate) fn validate_table(table: &SettingsTable) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    if table.categories.len() > MAX_CATEGORIES {
        errors.push(SchemaError::at(
            &[],
            format!(
                "table has {} categories but at most {MAX_CATEGORIES} fit the dirty-flag word",
                table.categories.len()
            ),
        ));
    }

    let mut category_names = HashSet::<&str>::new();
    // Setting names and their derived C++ identifiers must both be unique.
    let mut names = HashSet::<&str>::new();
    let mut idents = HashMap::<String, &str>::new();
    // Every generated accessor, constant, enum type and enumerator maps to its owner.
    let mut symbols: HashMap<String, &str> = RESERVED_SYMBOLS
        .iter()
        .map(|s| (s.to_string(), "HdRprConfig"))
        .collect();

    for (ci, category) in table.categories.iter().enumerate() {
        let cat_path = vec![SchemaPathElem::Index(ci)];

        if !is_cpp_identifier(&category.name) {
            errors.push(SchemaError::at(
                &with(&cat_path, SchemaPathElem::Field("name")),
                format!(
                    "category name '{}' must be a valid identifier",
                    category.name
                ),
            ));
        } else if !category_names.insert(&category.name) {
            errors.push(SchemaError::at(
                &with(&cat_path, SchemaPathElem::Field("name")),
                format!("duplicate category name '{}'", category.name),
            ));
        }

        for (ii, item) in category.items.iter().enumerate() {
            let mut item_path = cat_path.clone();
            item_path.push(SchemaPathElem::Field("settings"));
            item_path.push(SchemaPathElem::Index(ii));

            match item {
                CategoryItem::Setting(s) => {
                    validate_setting(s, &item_path, &mut names, &mut idents, &mut symbols, &mut errors);
                }
                CategoryItem::Folder(folder) => {
                    if folder.name.trim().is_empty() {
                        errors.push(SchemaError::at(
                            &with(&item_path, SchemaPathElem::Field("folder")),
                            "folder name must be non-empty",
                        ));
                    }
                    for (si, s) in folder.settings.iter().enumerate() {
                        let mut p = item_path.clone();
                        p.push(SchemaPathElem::Field("settings"));
                        p.push(SchemaPathElem::Index(si));
                        validate_setting(s, &p, &mut names, &mut idents, &mut symbols, &mut errors);
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn with(path: &[SchemaPathElem], elem: SchemaPathElem) -> Vec<SchemaPathElem> {
    let mut p = path.to_vec();
    p.push(elem);
    p
}

fn validate_setting<'a>(
    s: &'a Setting,
    path: &[SchemaPathElem],
    names: &mut HashSet<&'a str>,
    idents: &mut HashMap<String, &'a str>,
    symbols: &mut HashMap<String, &'a str>,
    errors: &mut Vec<SchemaError>,
) {
    let name_path = with(path, SchemaPathElem::Field("name"));
    if s.name.trim().is_empty() {
        errors.push(SchemaError::at(&name_path, "setting name must be non-empty"));
        return;
    }
    if !names.insert(&s.name) {
        errors.push(SchemaError::at(
            &name_path,
            format!("duplicate setting name '{}'", s.name),
        ));
    } else {
        let ident = cpp_identifier(&s.name);
        if let Some(prev) = idents.get(&ident) {
            errors.push(SchemaError::at(
                &name_path,
                format!(
                    "setting '{}' maps to identifier '{ident}' already used by '{prev}'",
                    s.name
                ),
            ));
        } else if is_cpp_keyword(&ident) || RESERVED_FIELDS.contains(&ident.as_str()) {
            errors.push(SchemaError::at(
                &name_path,
                format!("setting '{}' maps to reserved identifier '{ident}'", s.name),
            ));
        } else {
            let generated = generated_symbols(s, &ident);
            let clash = generated.iter().find(|sym| symbols.contains_key(*sym)).cloned();
            if let Some(symbol) = clash {
                errors.push(SchemaError::at(
                    &name_path,
                    format!(
                        "setting '{}' generates '{symbol}' already generated by '{}'",
                        s.name, symbols[&symbol]
                    ),
                ));
            } else {
                symbols.extend(generated.into_iter().map(|sym| (sym, s.name.as_str())));
            }
            idents.insert(ident, &s.name);
        }
    }

    if let Some(ui) = &s.ui_name
        && ui.trim().is_empty()
    {
        errors.push(SchemaError::at(
            &with(path, SchemaPathElem::Field("ui_name")),
            "ui_name must be non-empty when present",
        ));
    }

    if let Some(values) = &s.values {
        validate_enumerated(s, values.len(), path, errors);
        return;
    }

    match &s.default_value {
        Value::Int(_) | Value::Float(_) => validate_numeric_range(s, path, errors),
        Value::Bool(_) | Value::Token(_) => {
            if s.min_value.is_some() || s.max_value.is_some() {
                errors.push(SchemaError::at(
                    path,
                    format!(
                        "range bounds are only allowed on numeric settings, '{}' is {}",
                        s.name,
                        s.default_value.kind_name()
                    ),
                ));
            }
        }
    }
}

/// Class-scope and namespace-scope C++ names emitted for one setting.
fn generated_symbols(s: &Setting, ident: &str) -> Vec<String> {
    let title = capitalize_first(ident);
    let mut out = vec![
        format!("Set{title}"),
        format!("Get{title}"),
        format!("k{title}Default"),
        format!("k{title}Min"),
        format!("k{title}Max"),
    ];
    if s.is_enumerated() {
        out.push(format!("{title}Type"));
        for m in s.members() {
            let enumerator = format!("k{title}{}", cpp_identifier(&m.key()));
            if !out.contains(&enumerator) {
                out.push(enumerator);
            }
        }
    }
    out
}

fn validate_enumerated(
    s: &Setting,
    count: usize,
    path: &[SchemaPathElem],
    errors: &mut Vec<SchemaError>,
) {
    let values_path = with(path, SchemaPathElem::Field("values"));
    if count == 0 {
        errors.push(SchemaError::at(&values_path, "values must be non-empty"));
        return;
    }

    let mut keys = HashSet::<String>::new();
    let mut enumerators = HashMap::<String, String>::new();
    for (i, member) in s.members().iter().enumerate() {
        let key = member.key();
        let p = with(&values_path, SchemaPathElem::Index(i));
        if key.is_empty() {
            errors.push(SchemaError::at(&p, "value key must be non-empty"));
        } else if !keys.insert(key.clone()) {
            errors.push(SchemaError::at(&p, format!("duplicate value key '{key}'")));
        } else {
            let enumerator = cpp_identifier(&key);
            if let Some(prev) = enumerators.get(&enumerator) {
                errors.push(SchemaError::at(
                    &p,
                    format!(
                        "value key '{key}' maps to enumerator '{enumerator}' already used by '{prev}'"
                    ),
                ));
            } else if ["Default", "Min", "Max"].contains(&enumerator.as_str()) {
                errors.push(SchemaError::at(
                    &p,
                    format!("value key '{key}' clashes with the setting's k<Name>{enumerator} constant"),
                ));
            } else {
                enumerators.insert(enumerator, key);
            }
        }
    }

    if s.min_value.is_some() || s.max_value.is_some() {
        errors.push(SchemaError::at(
            path,
            "enumerated settings derive their range from values; remove minValue/maxValue",
        ));
    }

    let default_path = with(path, SchemaPathElem::Field("defaultValue"));
    match s.default_value.as_token() {
        None => errors.push(SchemaError::at(
            &default_path,
            format!(
                "default of an enumerated setting must be a value key, got {}",
                s.default_value.kind_name()
            ),
        )),
        Some(token) => {
            if s.default_member().is_none() {
                errors.push(SchemaError::at(
                    &default_path,
                    format!("default '{token}' is not one of the setting's values"),
                ));
            }
        }
    }
}

fn validate_numeric_range(s: &Setting, path: &[SchemaPathElem], errors: &mut Vec<SchemaError>) {
    let is_int = matches!(s.default_value, Value::Int(_));
    let mut bound = |field: &'static str, v: &Option<Value>| -> Option<f64> {
        let v = v.as_ref()?;
        let ok = if is_int {
            matches!(v, Value::Int(_))
        } else {
            v.is_numeric()
        };
        if let Value::Int(i) = v
            && is_int
            && i32::try_from(*i).is_err()
        {
            errors.push(SchemaError::at(
                &with(path, SchemaPathElem::Field(field)),
                format!("{field} {i} of '{}' does not fit a 32-bit int", s.name),
            ));
            return None;
        }
        if !ok {
            errors.push(SchemaError::at(
                &with(path, SchemaPathElem::Field(field)),
                format!(
                    "{field} of {} setting '{}' cannot be {}",
                    s.default_value.kind_name(),
                    s.name,
                    v.kind_name()
                ),
            ));
            return None;
        }
        v.as_f64()
    };
    let min = bound("minValue", &s.min_value);
    let max = bound("maxValue", &s.max_value);

    if let (Some(lo), Some(hi)) = (min, max)
        && lo > hi
    {
        errors.push(SchemaError::at(
            path,
            format!("minValue {lo} exceeds maxValue {hi}"),
        ));
        return;
    }

    if let Value::Int(i) = s.default_value
        && i32::try_from(i).is_err()
    {
        errors.push(SchemaError::at(
            &with(path, SchemaPathElem::Field("defaultValue")),
            format!("default {i} of '{}' does not fit a 32-bit int", s.name),
        ));
        return;
    }
    let Some(default) = s.default_value.as_f64() else {
        return;
    };
    if !default.is_finite() {
        errors.push(SchemaError::at(
            &with(path, SchemaPathElem::Field("defaultValue")),
            "default must be finite",
        ));
        return;
    }
    let below = min.is_some_and(|lo| default < lo);
    let above = max.is_some_and(|hi| default > hi);
    if below || above {
        errors.push(SchemaError::at(
            &with(path, SchemaPathElem::Field("defaultValue")),
            format!(
                "default {default} is outside [{}, {}]",
                fmt_bound(min, "-inf"),
                fmt_bound(max, "inf")
            ),
        ));
    }
}

fn fmt_bound(b: Option<f64>, open: &str) -> String {
    b.map_or_else(|| open.to_string(), |v| v.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
