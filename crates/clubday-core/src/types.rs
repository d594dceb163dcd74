//! Core type definitions with validation.

use std::borrow::Borrow;
use std::fmt;

use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The value contained a character outside the allowed set.
    #[error("{field} contains invalid character {ch:?}")]
    InvalidCharacter { field: &'static str, ch: char },

    /// The value was not a positive integer.
    #[error("{field} must be a positive integer, got {value:?}")]
    NotPositive { field: &'static str, value: String },

    /// The table number was outside `1..=tables`.
    #[error("table {table} is out of range 1..={tables}")]
    TableOutOfRange { table: usize, tables: usize },
}

/// A validated client name.
///
/// Names are one or more ASCII letters, digits, underscores or hyphens.
/// Ordering is byte-wise, which is the order clients are sent home at closing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientName(String);

impl ClientName {
    /// Creates a new name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "client name",
            });
        }
        if let Some(ch) = name.chars().find(|&c| !is_name_char(c)) {
            return Err(ValidationError::InvalidCharacter {
                field: "client name",
                ch,
            });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl TryFrom<String> for ClientName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientName> for String {
    fn from(name: ClientName) -> Self {
        name.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ClientName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Parses a strictly positive integer the way the input format expects.
///
/// An optional leading `+` is accepted; whitespace is not.
pub fn parse_positive(field: &'static str, value: &str) -> Result<u32, ValidationError> {
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ValidationError::NotPositive {
            field,
            value: value.to_string(),
        }),
    }
}
