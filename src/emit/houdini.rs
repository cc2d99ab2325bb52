//! Houdini parameter-description (`.ds`) files.
//!
//! Each UI-visible setting becomes two parameters: a `<name>_control` string parameter driving
//! the layered-override menu, then the setting itself, disabled while the control is `block`
//! or `none`. The disable linkage resolves by name, so the control is always emitted first.

use crate::emit::GeneratedFile;
use crate::foundation::error::CodegenResult;
use crate::foundation::naming::{escape_quoted, houdini_param_name};
use crate::schema::model::{Category, CategoryItem, Folder, Setting, SettingsTable, Value};

/// File name of the `.ds` file for `ds_name` (`Global`, `Geometry`, `Light`, ...).
pub fn ds_file_name(ds_name: &str) -> String {
    format!("HdRprPlugin_{ds_name}.ds")
}

/// `hidewhen "{ c1 } { c2 } "`, or `None` when no condition applies.
pub fn hidewhen_clause(conditions: &[String]) -> Option<String> {
    if conditions.is_empty() {
        return None;
    }
    let mut s = String::from("hidewhen \"");
    for c in conditions {
        s.push_str(&format!("{{ {c} }} "));
    }
    s.push('"');
    Some(s)
}

/// Emit the `.ds` file for `table`, or `None` if it has no UI-visible setting.
#[tracing::instrument(skip(table))]
pub fn emit_ds(table: &SettingsTable, ds_name: &str) -> CodegenResult<Option<GeneratedFile>> {
    let mut params = DsWriter::new(1);
    for category in &table.categories {
        emit_category(&mut params, table, category);
    }
    if params.is_empty() {
        tracing::debug!(ds_name, "no UI-visible settings, skipping .ds file");
        return Ok(None);
    }

    let mut out = String::new();
    out.push_str("#include \"$HFS/houdini/soho/parameters/CommonMacros.ds\"\n\n");
    out.push_str("{\n");
    out.push_str("    name    \"RPR\"\n");
    out.push_str("    label   \"RPR\"\n");
    out.push_str("    parmtag { spare_opfilter    \"!!SHOP/PROPERTIES!!\" }\n");
    out.push_str("    parmtag { spare_classtags   \"render\" }\n\n");
    out.push_str(&params.finish());
    out.push_str("}\n");

    Ok(Some(GeneratedFile::new(ds_file_name(ds_name), out)))
}

fn emit_category(w: &mut DsWriter, table: &SettingsTable, category: &Category) {
    let category_conditions = category
        .hidewhen()
        .map(|h| h.resolve(table))
        .unwrap_or_default();

    for item in &category.items {
        match item {
            CategoryItem::Setting(s) => {
                emit_setting(w, table, s, &category.name, &category_conditions);
            }
            CategoryItem::Folder(folder) => {
                emit_folder(w, table, folder, &category.name, &category_conditions);
            }
        }
    }
}

fn emit_folder(
    w: &mut DsWriter,
    table: &SettingsTable,
    folder: &Folder,
    spare_category: &str,
    category_conditions: &[String],
) {
    if !folder.settings.iter().any(Setting::is_ui_visible) {
        return;
    }
    let mut conditions = folder
        .hidewhen()
        .map(|h| h.resolve(table))
        .unwrap_or_default();
    conditions.extend_from_slice(category_conditions);

    w.open("groupcollapsible");
    w.line(&format!("name    \"{}\"", folder.name.replace(' ', "")));
    w.line(&format!("label   \"{}\"", escape_quoted(&folder.name)));
    if let Some(hw) = hidewhen_clause(&conditions) {
        w.line(&hw);
    }
    w.blank();
    for s in &folder.settings {
        emit_setting(w, table, s, spare_category, category_conditions);
    }
    w.close();
}

/// USD value type name reported to Houdini for a setting.
fn usd_value_type(s: &Setting) -> &'static str {
    if s.is_enumerated() {
        return "token";
    }
    match s.default_value {
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::Token(_) => "string",
    }
}

fn ds_number(v: &Value, as_float: bool) -> String {
    match (v, as_float) {
        (Value::Int(i), false) => i.to_string(),
        (other, _) => match other.as_f64() {
            Some(f) => format!("{f:?}"),
            None => String::new(),
        },
    }
}

fn emit_setting(
    w: &mut DsWriter,
    table: &SettingsTable,
    s: &Setting,
    spare_category: &str,
    category_conditions: &[String],
) {
    let Some(label) = &s.ui_name else {
        return;
    };
    let label = escape_quoted(label);
    let houdini = s.houdini.clone().unwrap_or_default();

    let mut conditions = s.hidewhen().map(|h| h.resolve(table)).unwrap_or_default();
    conditions.extend_from_slice(category_conditions);
    let hidewhen = hidewhen_clause(&conditions);

    let value_type = usd_value_type(s);
    // Enumerations are edited as strings; `token` only tags the USD attribute.
    let controlled_type = if s.is_enumerated() { "string" } else { value_type };
    let control = houdini_param_name(&format!("{}_control", s.name));

    w.open("parm");
    w.line(&format!("name    \"{control}\""));
    w.line(&format!("label   \"{label}\""));
    w.line("type    string");
    w.line("default { \"none\" }");
    if let Some(hw) = &hidewhen {
        w.line(hw);
    }
    w.open("menujoin");
    w.line("[ \"import loputils\" ]");
    w.line(&format!(
        "[ \"return loputils.createEditPropertiesControlMenu(kwargs, '{controlled_type}[]')\" ]"
    ));
    w.line("language python");
    w.close();
    w.close();

    let is_float = matches!(s.default_value, Value::Float(_));
    let (param_type, default) = if s.is_enumerated() {
        let key = s.default_member().map(|m| m.key()).unwrap_or_default();
        ("string", format!("\"{key}\""))
    } else {
        match &s.default_value {
            Value::Bool(b) => ("toggle", if *b { "1" } else { "0" }.to_string()),
            Value::Int(_) => ("int", ds_number(&s.default_value, false)),
            Value::Float(_) => ("float", ds_number(&s.default_value, true)),
            Value::Token(t) => ("string", format!("\"{}\"", escape_quoted(t))),
        }
    };
    let param_type = houdini.param_type.as_deref().unwrap_or(param_type);

    w.open("parm");
    w.line(&format!("name \"{}\"", houdini_param_name(&s.name)));
    w.line(&format!("label \"{label}\""));
    w.line(&format!("type {param_type}"));
    w.line("size 1");
    w.line(&format!("default {{ {default} }}"));
    w.line(&format!("parmtag {{ \"spare_category\" \"{spare_category}\" }}"));
    w.line("parmtag { \"uiscope\" \"viewport\" }");
    w.line(&format!("parmtag {{ \"usdvaluetype\" \"{value_type}\" }}"));
    for tag in &houdini.custom_tags {
        w.line(&format!("parmtag {{ {tag} }}"));
    }
    if s.is_enumerated() {
        emit_menu(w, s);
    }
    if let Some(hw) = &hidewhen {
        w.line(hw);
    }
    w.line(&format!(
        "disablewhen \"{{ {control} == block }} {{ {control} == none }} \""
    ));
    if !s.is_enumerated()
        && let (Some(min), Some(max)) = (&s.min_value, &s.max_value)
    {
        w.line(&format!(
            "range {{ {}! {} }}",
            ds_number(min, is_float),
            ds_number(max, is_float)
        ));
    }
    if let Some(help) = &s.help {
        w.line(&format!("help \"{}\"", escape_quoted(help)));
    }
    w.close();
}

fn emit_menu(w: &mut DsWriter, s: &Setting) {
    w.open("menu");
    if s.members().iter().all(|m| m.gate().is_none()) {
        for m in s.members() {
            w.line(&format!("\"{}\" \"{}\"", m.key(), escape_quoted(m.label())));
        }
    } else {
        w.line("[ \"import platform\" ]");
        w.line("[ \"menu_values = []\" ]");
        for m in s.members() {
            let extend = format!(
                "menu_values.extend([\\\"{}\\\", \\\"{}\\\"])",
                m.key(),
                escape_quoted(m.label()).replace('"', "\\\"")
            );
            let expr = match m.gate() {
                Some(gate) => format!(
                    "if {}: {extend}",
                    gate.python_condition().replace('"', "\\\"")
                ),
                None => extend,
            };
            w.line(&format!("[ \"{expr}\" ]"));
        }
        w.line("[ \"return menu_values\" ]");
        w.line("language python");
    }
    w.close();
}

/// Indenting line writer for `.ds` blocks.
struct DsWriter {
    out: String,
    indent: usize,
    written: bool,
}

impl DsWriter {
    fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            indent,
            written: false,
        }
    }

    fn is_empty(&self) -> bool {
        !self.written
    }

    fn line(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(s);
        self.out.push('\n');
        self.written = true;
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self, keyword: &str) {
        self.line(&format!("{keyword} {{"));
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.line("}");
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/houdini.rs"]
mod tests;
