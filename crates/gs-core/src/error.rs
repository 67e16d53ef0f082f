//! Base error type shared by the `gs-*` crates.
//!
//! Sub-crates define their own error enums for their failure modes and wrap
//! `CoreError` where an enum name or id fails to parse.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("unknown {kind} name {value:?}")]
    UnknownName { kind: &'static str, value: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
