//! Unified error types for the domain layer

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A store row did not match the record shape expected for its table
    #[error("Decode error for {entity_type}: {message}")]
    Decode {
        entity_type: &'static str,
        message: String,
    },

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if slug.trim().is_empty() {
    ///     return Err(DomainError::validation("NPC slug cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a decode error naming the record type that failed
    pub fn decode(entity_type: &'static str, msg: impl ToString) -> Self {
        Self::Decode {
            entity_type,
            message: msg.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
