//! Parameter validation errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("parameter {key:?}: {reason}")]
    Invalid { key: String, reason: String },

    #[error("inconsistent parameters: {0}")]
    Inconsistent(String),

    #[error("malformed parameter document: {0}")]
    Malformed(String),
}

impl ParamsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ParamsError::Invalid { key: key.to_owned(), reason: reason.into() }
    }
}

pub type ParamsResult<T> = Result<T, ParamsError>;
