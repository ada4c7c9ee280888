use thiserror::Error;

/// Errors raised while converting between property values and their literal text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("cannot parse `{literal}` as {kind}")]
    Parse { kind: &'static str, literal: String },

    #[error("`{member}` is not a member of enum {enum_name}")]
    UnknownEnumMember {
        enum_name: &'static str,
        member: String,
    },

    #[error("expected a {expected} value, got {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ValueError>;
