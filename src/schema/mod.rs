//! Settings-table data model, authoring DSL and validation.

/// Consuming builders for authoring tables in Rust.
pub mod dsl;
/// Serde data model matching the JSON table format.
pub mod model;
pub(crate) mod validate;

pub use validate::MAX_CATEGORIES;

use crate::foundation::error::{CodegenError, CodegenResult};
use model::{EnumMember, Setting};

/// Member of an enumerated setting named by its default token.
///
/// Fails for plain settings and for defaults that match no member.
pub fn resolve_default_token(setting: &Setting) -> CodegenResult<&EnumMember> {
    if !setting.is_enumerated() {
        return Err(CodegenError::validation(format!(
            "setting '{}' is not enumerated",
            setting.name
        )));
    }
    setting.default_member().ok_or_else(|| {
        CodegenError::validation(format!(
            "default {:?} of '{}' is not one of its values",
            setting.default_value, setting.name
        ))
    })
}
