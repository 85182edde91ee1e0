//! Errors raised by the persistence layer.
//!
//! Row comparison never produces one of these. Dirty row data simply
//! compares as unequal, only the table and database bookkeeping fails loudly.

use std::error::Error as StdError;
use std::fmt::{self, Display};

use super::schema::{DataType, Field};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A table with this name is already registered.
    DuplicateName { name: String },
    /// No table with this name is registered.
    NotFound { name: String },
    /// Two tables cannot take part in a difference.
    SchemaMismatch(SchemaMismatch),
    /// A persisted document could not be turned back into a [`super::Database`].
    Deserialization {
        message: String,
        source: Option<serde_json::Error>,
    },
    /// A database could not be written out as a document.
    Serialization(serde_json::Error),
    Io(std::io::Error),
    /// User supplied text that does not fit the expected type.
    InvalidValue { value: String, expected: String },
}

/// Where two schemas stop lining up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaMismatch {
    FieldCount { left: usize, right: usize },
    Field { index: usize, left: Field, right: Field },
}

impl Error {
    pub(crate) fn deserialization(message: impl Into<String>) -> Error {
        Error::Deserialization {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_value(value: &str, expected: DataType) -> Error {
        Error::InvalidValue {
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}

impl Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaMismatch::FieldCount { left, right } => write!(
                f,
                "tables have a different number of fields ({} vs {})",
                left, right
            ),
            SchemaMismatch::Field { index, left, right } => write!(
                f,
                "fields at index {} differ by name or type ({} vs {})",
                index, left, right
            ),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateName { name } => write!(f, "table '{}' already exists", name),
            Error::NotFound { name } => write!(f, "table '{}' was not found", name),
            Error::SchemaMismatch(mismatch) => write!(f, "schema mismatch: {}", mismatch),
            Error::Deserialization { message, .. } => {
                write!(f, "could not read database: {}", message)
            }
            Error::Serialization(error) => write!(f, "could not write database: {}", error),
            Error::Io(error) => write!(f, "i/o error: {}", error),
            Error::InvalidValue { value, expected } => {
                write!(f, "invalid value '{}': expected {}", value, expected)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Deserialization {
                source: Some(source),
                ..
            } => Some(source),
            Error::Serialization(error) => Some(error),
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}

// Only the reading side goes through `?`, writing maps to
// `Error::Serialization` explicitly.
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Deserialization {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

impl From<SchemaMismatch> for Error {
    fn from(mismatch: SchemaMismatch) -> Self {
        Error::SchemaMismatch(mismatch)
    }
}
