use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("unknown node type `{0}`")]
    UnknownType(String),

    #[error("`{0}` is a composite type and cannot head a node")]
    NotANode(String),

    #[error("no node named `{0}`")]
    UnknownNode(String),

    #[error("a node named `{0}` already exists")]
    NameTaken(String),
}

/// Why a property path failed to resolve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty property path")]
    Empty,

    #[error("`{type_name}` has no property `{segment}`")]
    UnknownProperty { type_name: String, segment: String },

    #[error("`{segment}` is null")]
    NullIntermediate { segment: String },

    #[error("`{segment}` is not a nested property")]
    NotNested { segment: String },
}
