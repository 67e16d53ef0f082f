//! Layout validation errors.

use thiserror::Error;

/// Errors produced while building or loading a `Layout`.  All of them are
/// validation errors: a layout that fails to build never reaches a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("duplicate {kind} id {id:?}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("edge {edge:?} references missing node {node:?}")]
    DanglingReference { edge: String, node: String },

    #[error("edge {edge:?} has invalid length {length}")]
    InvalidLength { edge: String, length: f64 },

    #[error("malformed layout document: {0}")]
    Malformed(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
