use super::*;

#[test]
fn capitalize_first_handles_empty_and_ascii() {
    assert_eq!(capitalize_first(""), "");
    assert_eq!(capitalize_first("maxSamples"), "MaxSamples");
    assert_eq!(capitalize_first("X"), "X");
}

#[test]
fn cpp_identifier_camel_joins_segments() {
    assert_eq!(cpp_identifier("maxSamples"), "maxSamples");
    assert_eq!(cpp_identifier("quality:rayDepth"), "qualityRayDepth");
    assert_eq!(
        cpp_identifier("primvars:rpr:visibilityPrimary"),
        "primvarsRprVisibilityPrimary"
    );
    assert_eq!(cpp_identifier("a-b"), "a_b");
    assert_eq!(cpp_identifier("3d:mode"), "_3dMode");
}

#[test]
fn is_cpp_identifier_rejects_colons_and_digits() {
    assert!(is_cpp_identifier("maxSamples"));
    assert!(is_cpp_identifier("_x1"));
    assert!(!is_cpp_identifier("quality:rayDepth"));
    assert!(!is_cpp_identifier("1abc"));
    assert!(!is_cpp_identifier(""));
}

#[test]
fn houdini_param_name_encodes_invalid_bytes() {
    assert_eq!(houdini_param_name("maxSamples"), "maxSamples");
    assert_eq!(houdini_param_name("max_samples_control"), "max_samples_control");
    assert_eq!(houdini_param_name("primvars:rpr:id"), "primvarsx3A_rprx3A_id");
    assert_eq!(houdini_param_name("a b"), "ax20_b");
}

#[test]
fn enum_key_strips_spaces() {
    assert_eq!(enum_key("Hybrid Pro"), "HybridPro");
    assert_eq!(enum_key("GPU"), "GPU");
}

#[test]
fn escape_quoted_escapes_quotes_and_newlines() {
    assert_eq!(escape_quoted(r#"say "hi""#), r#"say \"hi\""#);
    assert_eq!(escape_quoted("a\nb"), "a\\nb");
    assert_eq!(escape_quoted("c:\\x"), "c:\\\\x");
}

#[test]
fn cpp_keywords_are_recognized() {
    assert!(is_cpp_keyword("class"));
    assert!(is_cpp_keyword("default"));
    assert!(!is_cpp_keyword("maxSamples"));
    assert!(!is_cpp_keyword("Class"));
}
