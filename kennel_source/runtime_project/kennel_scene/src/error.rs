use std::path::PathBuf;

use kennel_nodes::{NodeError, PathError};
use kennel_variant::ValueError;
use thiserror::Error;

/// Structural problems in document text. Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: malformed section header")]
    MalformedHeader { line: usize },

    #[error("line {line}: empty section name")]
    EmptySectionName { line: usize },

    #[error("line {line}: key/value pair before the first section")]
    KeyOutsideSection { line: usize },

    #[error("line {line}: expected `key = value`")]
    MissingEquals { line: usize },

    #[error("line {line}: empty key")]
    EmptyKey { line: usize },

    #[error("line {line}: duplicate section [{name}]")]
    DuplicateSection { line: usize, name: String },

    #[error("line {line}: duplicate key `{key}` in section [{section}]")]
    DuplicateKey {
        line: usize,
        section: String,
        key: String,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::MalformedHeader { line }
            | Self::EmptySectionName { line }
            | Self::KeyOutsideSection { line }
            | Self::MissingEquals { line }
            | Self::EmptyKey { line }
            | Self::DuplicateSection { line, .. }
            | Self::DuplicateKey { line, .. } => *line,
        }
    }
}

/// Why a key was left out while building a node.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("property is not persisted")]
    NotPersisted,

    #[error("a composite cannot take a literal")]
    Composite,

    #[error("path did not resolve")]
    Unresolved,
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("scene file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("property `{path}`: {source}")]
    Value {
        path: String,
        #[source]
        source: ValueError,
    },

    #[error("a section named [{0}] already exists")]
    SectionExists(String),

    #[error(transparent)]
    Node(#[from] NodeError),
}

pub type Result<T> = std::result::Result<T, SceneError>;
