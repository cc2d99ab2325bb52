//! `config.h` / `config.cpp` for the `HdRprConfig` class.
//!
//! Every setting gets a typed getter, a validating setter that raises its category's dirty bit,
//! a line in `Sync` and a field in the persisted `PrefData` block.

use std::fmt::Write as _;

use crate::compile::layout::{ConfigLayout, LayoutSetting, SettingKind};
use crate::emit::GeneratedFile;
use crate::foundation::error::{CodegenError, CodegenResult};
use crate::foundation::naming::{cpp_identifier, escape_quoted, is_cpp_identifier};
use crate::schema::model::Value;

/// Header file name.
pub const HEADER_FILE: &str = "config.h";
/// Source file name.
pub const SOURCE_FILE: &str = "config.cpp";

/// Emit both files for `layout`.
#[tracing::instrument(skip(layout), fields(settings = layout.settings.len()))]
pub fn emit_config(layout: &ConfigLayout) -> CodegenResult<[GeneratedFile; 2]> {
    Ok([
        GeneratedFile::new(HEADER_FILE, emit_header(layout)?),
        GeneratedFile::new(SOURCE_FILE, emit_source(layout)?),
    ])
}

/// C++ literal for a float constant: shortest round-trip digits plus `f`.
pub fn cpp_float(v: f64) -> String {
    format!("{v:?}f")
}

fn enum_constant(s: &LayoutSetting, key: &str) -> String {
    format!("k{}{}", s.title, cpp_identifier(key))
}

fn literal(s: &LayoutSetting, v: &Value) -> CodegenResult<String> {
    Ok(match (&s.kind, v) {
        (SettingKind::Bool, Value::Bool(b)) => b.to_string(),
        (SettingKind::Int, Value::Int(i)) => i.to_string(),
        (SettingKind::Float, Value::Float(f)) => cpp_float(*f),
        (SettingKind::Token, Value::Token(t)) => format!("TfToken(\"{}\")", escape_quoted(t)),
        (SettingKind::Enum { type_name, .. }, Value::Int(i)) => format!("{type_name}({i})"),
        (kind, v) => {
            return Err(CodegenError::emit(format!(
                "'{}': {} value for {} setting",
                s.name,
                v.kind_name(),
                kind.name()
            )));
        }
    })
}

fn default_literal(s: &LayoutSetting) -> CodegenResult<String> {
    if let Value::Int(i) = s.default
        && let Some(key) = s.enum_key(i)
    {
        return Ok(enum_constant(s, key));
    }
    literal(s, &s.default)
}

fn emit_header(layout: &ConfigLayout) -> CodegenResult<String> {
    let mut out = String::new();
    let w = &mut out;
    let fmt_err = |e: std::fmt::Error| CodegenError::emit(format!("format header: {e}"));

    writeln!(w, "#ifndef GENERATED_HDRPR_CONFIG_H").map_err(fmt_err)?;
    writeln!(w, "#define GENERATED_HDRPR_CONFIG_H\n").map_err(fmt_err)?;
    writeln!(w, "#include \"pxr/imaging/hd/tokens.h\"").map_err(fmt_err)?;
    writeln!(w, "#include \"pxr/imaging/hd/renderDelegate.h\"\n").map_err(fmt_err)?;
    writeln!(w, "#include <cstdint>").map_err(fmt_err)?;
    writeln!(w, "#include <mutex>\n").map_err(fmt_err)?;
    writeln!(w, "PXR_NAMESPACE_OPEN_SCOPE\n").map_err(fmt_err)?;

    writeln!(w, "#define HDRPR_RENDER_SETTINGS_TOKENS \\").map_err(fmt_err)?;
    for s in &layout.settings {
        if is_cpp_identifier(&s.name) {
            writeln!(w, "    ({}) \\", s.name).map_err(fmt_err)?;
        } else {
            writeln!(w, "    (({}, \"{}\")) \\", s.ident, escape_quoted(&s.name)).map_err(fmt_err)?;
        }
    }
    writeln!(
        w,
        "\nTF_DECLARE_PUBLIC_TOKENS(HdRprRenderSettingsTokens, HDRPR_RENDER_SETTINGS_TOKENS);\n"
    )
    .map_err(fmt_err)?;

    for s in &layout.settings {
        if let SettingKind::Enum { type_name, keys } = &s.kind {
            writeln!(w, "enum {type_name} {{").map_err(fmt_err)?;
            for key in keys {
                writeln!(w, "    {},", enum_constant(s, key)).map_err(fmt_err)?;
            }
            writeln!(w, "}};\n").map_err(fmt_err)?;
        }
    }

    writeln!(w, "class HdRprConfig {{").map_err(fmt_err)?;
    writeln!(w, "public:").map_err(fmt_err)?;
    writeln!(w, "    enum ChangeTracker {{").map_err(fmt_err)?;
    writeln!(w, "        Clean = 0,").map_err(fmt_err)?;
    writeln!(w, "        DirtyAll = ~0u,").map_err(fmt_err)?;
    writeln!(w, "        DirtyInteractiveMode = 1 << 0,").map_err(fmt_err)?;
    for c in &layout.categories {
        writeln!(w, "        {} = 1 << {},", c.dirty_flag, c.bit).map_err(fmt_err)?;
    }
    writeln!(w, "    }};\n").map_err(fmt_err)?;

    writeln!(
        w,
        "    static HdRenderSettingDescriptorList GetRenderSettingDescriptors();"
    )
    .map_err(fmt_err)?;
    writeln!(
        w,
        "    static std::unique_lock<std::mutex> GetInstance(HdRprConfig** instance);\n"
    )
    .map_err(fmt_err)?;
    writeln!(w, "    void Sync(HdRenderDelegate* renderDelegate);\n").map_err(fmt_err)?;
    writeln!(w, "    void SetInteractiveMode(bool enable);").map_err(fmt_err)?;
    writeln!(w, "    bool GetInteractiveMode() const;\n").map_err(fmt_err)?;

    for s in &layout.settings {
        writeln!(
            w,
            "    void Set{}({} {});",
            s.title,
            s.kind.cpp_param_type(),
            s.ident
        )
        .map_err(fmt_err)?;
        writeln!(
            w,
            "    {} Get{}() const {{ return m_prefData.{}; }}\n",
            s.kind.cpp_storage_type(),
            s.title,
            s.ident
        )
        .map_err(fmt_err)?;
    }

    writeln!(w, "    bool IsDirty(ChangeTracker dirtyFlag) const;").map_err(fmt_err)?;
    writeln!(w, "    void CleanDirtyFlag(ChangeTracker dirtyFlag);").map_err(fmt_err)?;
    writeln!(w, "    void ResetDirty();\n").map_err(fmt_err)?;

    writeln!(w, "private:").map_err(fmt_err)?;
    writeln!(w, "    HdRprConfig() = default;\n").map_err(fmt_err)?;
    writeln!(w, "    struct PrefData {{").map_err(fmt_err)?;
    writeln!(w, "        uint32_t version;").map_err(fmt_err)?;
    writeln!(w, "        bool enableInteractive;\n").map_err(fmt_err)?;
    for s in &layout.settings {
        writeln!(w, "        {} {};", s.kind.cpp_storage_type(), s.ident).map_err(fmt_err)?;
    }
    writeln!(w).map_err(fmt_err)?;
    for line in [
        "        PrefData();",
        "        ~PrefData();\n",
        "        void SetDefault();\n",
        "        bool Load();",
        "        void Save();\n",
        "        bool IsValid();",
        "    };",
        "    PrefData m_prefData;\n",
        "    uint32_t m_dirtyFlags = DirtyAll;",
        "    int m_lastRenderSettingsVersion = -1;\n",
    ] {
        writeln!(w, "{line}").map_err(fmt_err)?;
    }
    writeln!(
        w,
        "    constexpr static uint32_t k_prefDataVersion = {:#010x}u;",
        layout.prefs_version
    )
    .map_err(fmt_err)?;
    writeln!(
        w,
        "    constexpr static const char* k_rprPreferenceFilename = \"hdRprPreferences.dat\";"
    )
    .map_err(fmt_err)?;
    writeln!(w, "}};\n").map_err(fmt_err)?;
    writeln!(w, "PXR_NAMESPACE_CLOSE_SCOPE\n").map_err(fmt_err)?;
    writeln!(w, "#endif // GENERATED_HDRPR_CONFIG_H").map_err(fmt_err)?;

    Ok(out)
}

fn emit_source(layout: &ConfigLayout) -> CodegenResult<String> {
    let mut out = String::new();
    let w = &mut out;
    let fmt_err = |e: std::fmt::Error| CodegenError::emit(format!("format source: {e}"));

    w.push_str(SOURCE_PRELUDE);

    writeln!(w, "namespace {{\n").map_err(fmt_err)?;
    for s in &layout.settings {
        let ty = s.kind.cpp_storage_type();
        writeln!(w, "const {ty} k{}Default = {};", s.title, default_literal(s)?)
            .map_err(fmt_err)?;
        if let Some(min) = &s.min {
            writeln!(w, "const {ty} k{}Min = {};", s.title, literal(s, min)?).map_err(fmt_err)?;
        }
        if let Some(max) = &s.max {
            writeln!(w, "const {ty} k{}Max = {};", s.title, literal(s, max)?).map_err(fmt_err)?;
        }
        writeln!(w).map_err(fmt_err)?;
    }
    writeln!(w, "}} // namespace anonymous\n").map_err(fmt_err)?;

    writeln!(
        w,
        "HdRenderSettingDescriptorList HdRprConfig::GetRenderSettingDescriptors() {{"
    )
    .map_err(fmt_err)?;
    writeln!(w, "    HdRenderSettingDescriptorList settingDescs;").map_err(fmt_err)?;
    for s in &layout.settings {
        let Some(label) = &s.ui_name else {
            continue;
        };
        // Enumerations are described by key so hosts can show and send tokens.
        let default = match s.default {
            Value::Int(i) if matches!(s.kind, SettingKind::Enum { .. }) => {
                format!("TfToken(\"{}\")", s.enum_key(i).unwrap_or_default())
            }
            _ => format!("k{}Default", s.title),
        };
        writeln!(
            w,
            "    settingDescs.push_back({{\"{}\", HdRprRenderSettingsTokens->{}, VtValue({default})}});",
            escape_quoted(label),
            s.ident
        )
        .map_err(fmt_err)?;
    }
    writeln!(w, "    return settingDescs;\n}}\n").map_err(fmt_err)?;

    w.push_str(SOURCE_INSTANCE);

    w.push_str(SOURCE_SYNC_HEAD);
    for s in &layout.settings {
        let token = format!("HdRprRenderSettingsTokens->{}", s.ident);
        let read = match &s.kind {
            SettingKind::Bool => format!("getBoolSetting({token}, k{}Default)", s.title),
            SettingKind::Float => format!("getFloatSetting({token}, k{}Default)", s.title),
            SettingKind::Enum { keys, .. } => {
                let keys = keys
                    .iter()
                    .map(|k| format!("\"{}\"", escape_quoted(k)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("getEnumSetting({token}, {{{keys}}}, int(k{}Default))", s.title)
            }
            SettingKind::Int | SettingKind::Token => format!(
                "renderDelegate->GetRenderSetting({token}, {}(k{}Default))",
                s.kind.cpp_storage_type(),
                s.title
            ),
        };
        writeln!(w, "        Set{}({read});", s.title).map_err(fmt_err)?;
    }
    writeln!(w, "    }}\n}}\n").map_err(fmt_err)?;

    w.push_str(SOURCE_INTERACTIVE);

    for s in &layout.settings {
        emit_setter(w, layout, s).map_err(fmt_err)?;
    }

    w.push_str(SOURCE_DIRTY_AND_PREFS);

    writeln!(w, "void HdRprConfig::PrefData::SetDefault() {{").map_err(fmt_err)?;
    writeln!(w, "    version = k_prefDataVersion;").map_err(fmt_err)?;
    writeln!(w, "    enableInteractive = false;\n").map_err(fmt_err)?;
    for s in &layout.settings {
        writeln!(w, "    {} = k{}Default;", s.ident, s.title).map_err(fmt_err)?;
    }
    writeln!(w, "}}\n").map_err(fmt_err)?;

    writeln!(w, "bool HdRprConfig::PrefData::IsValid() {{").map_err(fmt_err)?;
    write!(w, "    return version == k_prefDataVersion").map_err(fmt_err)?;
    for s in &layout.settings {
        if s.min.is_some() {
            write!(w, "\n        && {} >= k{}Min", s.ident, s.title).map_err(fmt_err)?;
        }
        if s.max.is_some() {
            write!(w, "\n        && {} <= k{}Max", s.ident, s.title).map_err(fmt_err)?;
        }
    }
    writeln!(w, ";\n}}\n").map_err(fmt_err)?;
    writeln!(w, "PXR_NAMESPACE_CLOSE_SCOPE").map_err(fmt_err)?;

    Ok(out)
}

fn emit_setter(w: &mut String, layout: &ConfigLayout, s: &LayoutSetting) -> std::fmt::Result {
    let (title, ident) = (&s.title, &s.ident);
    let param = s.kind.cpp_param_type();
    if s.platform_disabled {
        return writeln!(
            w,
            "void HdRprConfig::Set{title}({param} {ident}) {{ /* Platform no-op */ }}\n"
        );
    }
    writeln!(w, "void HdRprConfig::Set{title}({param} {ident}) {{")?;
    if s.min.is_some() {
        writeln!(w, "    if ({ident} < k{title}Min) {{ return; }}")?;
    }
    if s.max.is_some() {
        writeln!(w, "    if ({ident} > k{title}Max) {{ return; }}")?;
    }
    if s.min.is_some() || s.max.is_some() {
        writeln!(w)?;
    }
    writeln!(w, "    if (m_prefData.{ident} != {ident}) {{")?;
    writeln!(
        w,
        "        m_prefData.{ident} = {}({ident});",
        s.kind.cpp_storage_type()
    )?;
    writeln!(w, "        m_prefData.Save();")?;
    writeln!(
        w,
        "        m_dirtyFlags |= {};",
        layout.categories[s.category].dirty_flag
    )?;
    writeln!(w, "    }}\n}}\n")
}

const SOURCE_PRELUDE: &str = r#"#include "config.h"
#include "rprApi.h"
#include "pxr/base/arch/fileSystem.h"
#include "pxr/usd/usdRender/tokens.h"

#include <initializer_list>
#include <string>

PXR_NAMESPACE_OPEN_SCOPE

TF_DEFINE_PUBLIC_TOKENS(HdRprRenderSettingsTokens, HDRPR_RENDER_SETTINGS_TOKENS);
TF_DEFINE_PRIVATE_TOKENS(_tokens,
    ((houdiniInteractive, "houdini:interactive"))
);

"#;

const SOURCE_INSTANCE: &str = r#"std::unique_lock<std::mutex> HdRprConfig::GetInstance(HdRprConfig** instancePtr) {
    static std::mutex instanceMutex;
    static HdRprConfig instance;
    *instancePtr = &instance;
    return std::unique_lock<std::mutex>(instanceMutex);
}

"#;

const SOURCE_SYNC_HEAD: &str = r#"void HdRprConfig::Sync(HdRenderDelegate* renderDelegate) {
    int currentSettingsVersion = renderDelegate->GetRenderSettingsVersion();
    if (m_lastRenderSettingsVersion != currentSettingsVersion) {
        m_lastRenderSettingsVersion = currentSettingsVersion;

        auto getBoolSetting = [&renderDelegate](TfToken const& token, bool defaultValue) {
            auto value = renderDelegate->GetRenderSetting(token);
            if (value.IsHolding<int64_t>()) {
                return static_cast<bool>(value.UncheckedGet<int64_t>());
            } else if (value.IsHolding<bool>()) {
                return value.UncheckedGet<bool>();
            }
            return defaultValue;
        };

        auto getFloatSetting = [&renderDelegate](TfToken const& token, float defaultValue) {
            auto value = renderDelegate->GetRenderSetting(token);
            if (value.IsHolding<float>()) {
                return value.UncheckedGet<float>();
            } else if (value.IsHolding<double>()) {
                return static_cast<float>(value.UncheckedGet<double>());
            } else if (value.IsHolding<int64_t>()) {
                return static_cast<float>(value.UncheckedGet<int64_t>());
            } else if (value.IsHolding<int>()) {
                return static_cast<float>(value.UncheckedGet<int>());
            }
            return defaultValue;
        };

        // Returns -1 for unknown keys so the setter rejects them.
        auto getEnumSetting = [&renderDelegate](TfToken const& token, std::initializer_list<const char*> keys, int defaultValue) {
            auto value = renderDelegate->GetRenderSetting(token);
            if (value.IsHolding<int64_t>()) {
                return static_cast<int>(value.UncheckedGet<int64_t>());
            } else if (value.IsHolding<int>()) {
                return value.UncheckedGet<int>();
            } else if (value.IsHolding<TfToken>() || value.IsHolding<std::string>()) {
                std::string key = value.IsHolding<TfToken>() ? value.UncheckedGet<TfToken>().GetString() : value.UncheckedGet<std::string>();
                int index = 0;
                for (const char* candidate : keys) {
                    if (key == candidate) {
                        return index;
                    }
                    ++index;
                }
                return -1;
            }
            return defaultValue;
        };

        auto interactiveMode = renderDelegate->GetRenderSetting<std::string>(_tokens->houdiniInteractive, "normal");
        SetInteractiveMode(interactiveMode != "normal");

"#;

const SOURCE_INTERACTIVE: &str = r#"void HdRprConfig::SetInteractiveMode(bool enable) {
    if (m_prefData.enableInteractive != enable) {
        m_prefData.enableInteractive = enable;
        m_prefData.Save();
        m_dirtyFlags |= DirtyInteractiveMode;
    }
}

bool HdRprConfig::GetInteractiveMode() const {
    return m_prefData.enableInteractive;
}

"#;

const SOURCE_DIRTY_AND_PREFS: &str = r#"bool HdRprConfig::IsDirty(ChangeTracker dirtyFlag) const {
    return m_dirtyFlags & dirtyFlag;
}

void HdRprConfig::CleanDirtyFlag(ChangeTracker dirtyFlag) {
    m_dirtyFlags &= ~dirtyFlag;
}

void HdRprConfig::ResetDirty() {
    m_dirtyFlags = Clean;
}

bool HdRprConfig::PrefData::Load() {
#ifdef ENABLE_PREFERENCES_FILE
    std::string appDataDir = HdRprApi::GetAppDataPath();
    std::string rprPreferencePath = (appDataDir.empty()) ? k_rprPreferenceFilename : (appDataDir + ARCH_PATH_SEP) + k_rprPreferenceFilename;

    if (FILE* f = fopen(rprPreferencePath.c_str(), "rb")) {
        if (!fread(this, sizeof(PrefData), 1, f)) {
            TF_CODING_ERROR("Fail to read rpr preferences dat file");
        }
        fclose(f);
        return IsValid();
    }
#endif // ENABLE_PREFERENCES_FILE

    return false;
}

void HdRprConfig::PrefData::Save() {
#ifdef ENABLE_PREFERENCES_FILE
    std::string appDataDir = HdRprApi::GetAppDataPath();
    std::string rprPreferencePath = (appDataDir.empty()) ? k_rprPreferenceFilename : (appDataDir + ARCH_PATH_SEP) + k_rprPreferenceFilename;

    if (FILE* f = fopen(rprPreferencePath.c_str(), "wb")) {
        if (!fwrite(this, sizeof(PrefData), 1, f)) {
            TF_CODING_ERROR("Fail to write rpr preferences dat file");
        }
        fclose(f);
    }
#endif // ENABLE_PREFERENCES_FILE
}

HdRprConfig::PrefData::PrefData() {
    if (!Load()) {
        SetDefault();
    }
}

HdRprConfig::PrefData::~PrefData() {
    Save();
}

"#;

#[cfg(test)]
#[path = "../../tests/unit/emit/cpp.rs"]
mod tests;
