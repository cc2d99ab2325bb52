/// Convenience result type used across the generator.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum CodegenError {
    /// Invalid settings-table data (duplicate names, bad ranges, unknown defaults).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rendering or writing generated artifacts.
    #[error("emit error: {0}")]
    Emit(String),

    /// Errors when serializing or deserializing tables and preferences.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CodegenError {
    /// Build a [`CodegenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CodegenError::Emit`] value.
    pub fn emit(msg: impl Into<String>) -> Self {
        Self::Emit(msg.into())
    }

    /// Build a [`CodegenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
