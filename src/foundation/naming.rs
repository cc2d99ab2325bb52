//! Identifier derivation shared by the emitters.

/// Upper-case the first character, leave the rest untouched (`maxSamples` -> `MaxSamples`).
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// C++ identifier for a hierarchical setting name.
///
/// Colon-separated segments are camel-joined: `quality:rayDepth` -> `qualityRayDepth`,
/// `primvars:rpr:id` -> `primvarsRprId`. Any other character outside `[A-Za-z0-9_]` becomes `_`.
pub fn cpp_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split(':').filter(|s| !s.is_empty()).enumerate() {
        let segment: String = segment
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if i == 0 {
            out.push_str(&segment);
        } else {
            out.push_str(&capitalize_first(&segment));
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Return `true` when `name` can be used verbatim as a C/C++ identifier.
pub fn is_cpp_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Return `true` for reserved C++ keywords and alternative operator spellings.
pub fn is_cpp_keyword(ident: &str) -> bool {
    CPP_KEYWORDS.contains(&ident)
}

/// Houdini parameter name for a setting.
///
/// Names made only of alphanumerics and underscores pass through. Otherwise every other byte is
/// encoded as `x<HEX>_` (Houdini's variable-name encoding), so `primvars:rpr:id` becomes
/// `primvarsx3A_rprx3A_id`.
pub fn houdini_param_name(name: &str) -> String {
    if name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 8);
    for b in name.bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("x{b:02X}_"));
        }
    }
    out
}

/// Machine key of an enumerated value: the authored key with spaces removed.
pub fn enum_key(key: &str) -> String {
    key.chars().filter(|c| *c != ' ').collect()
}

/// Escape a string for a double-quoted C++ or `.ds` literal.
pub fn escape_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/naming.rs"]
mod tests;
