use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CodegenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CodegenError::emit("x").to_string().contains("emit error:"));
    assert!(
        CodegenError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CodegenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
