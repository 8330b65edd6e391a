use std::fmt::Display;
use thiserror::Error;

use crate::path::Path;

#[derive(Debug, Error)]
pub enum Error {
    /// A single value was requested for a type with no synthesis rule.
    ///
    /// `type_name` is the declared type at `path`. A newtype wrapper shares
    /// its node with the wrapped type; for an unsupported enum inside one,
    /// the enum's own name is reported instead.
    #[error("unsupported type `{type_name}` at {path}")]
    UnsupportedType { type_name: String, path: Path },

    #[error("cannot make string: {message}")]
    CannotMakeString { message: String },

    #[error("invalid options: {message}")]
    InvalidOptions { message: String },

    /// A struct routine saw one of its fields under a second (aliased) name.
    #[error("duplicate field `{field}`")]
    DuplicateField { field: &'static str },

    /// The driving routine rejected a placeholder value.
    #[error("{0}")]
    Custom(String),

    #[error("failed to encode generated JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("at JSON path {path} → {message}")]
    RoundTrip { path: String, message: String },
}

impl Error {
    pub(crate) fn unsupported(type_name: &str, path: &Path) -> Self {
        Error::UnsupportedType { type_name: type_name.to_string(), path: path.clone() }
    }

    pub(crate) fn invalid_options(message: impl Into<String>) -> Self {
        Error::InvalidOptions { message: message.into() }
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn duplicate_field(field: &'static str) -> Self {
        Error::DuplicateField { field }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
