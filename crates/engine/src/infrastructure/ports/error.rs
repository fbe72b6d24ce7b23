//! Error types for port operations.

use wayfarer_domain::DomainError;

/// World-store operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The store answered, but rejected the request.
    ///
    /// Carries the store's own error code, message, details and hint so a
    /// filter or constraint violation can be read without re-running it.
    #[error("Query on {table} failed ({status}): {message}")]
    Query {
        table: String,
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
        hint: Option<String>,
    },

    /// The request never produced a store answer (connect, TLS, timeout).
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A row did not decode into its record type.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Request refused before reaching the store.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    /// Store error code (e.g. `PGRST116` for a single-row mismatch).
    pub fn store_code(&self) -> Option<&str> {
        match self {
            Self::Query { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

impl From<DomainError> for RepoError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(_) => Self::ConstraintViolation(err.to_string()),
            DomainError::Decode { .. } | DomainError::Parse(_) => {
                Self::Serialization(err.to_string())
            }
        }
    }
}

/// Errors from running the external world-simulation step.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SimulationError {
    #[error("World simulation is not configured (set WORLD_SIMULATION_URL)")]
    NotConfigured,
    #[error("World simulation request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid world simulation response: {0}")]
    InvalidResponse(String),
    #[error("World simulation aborted: {0}")]
    Aborted(String),
}
