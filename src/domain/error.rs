use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A domain error tagged with the use-case operation that produced it.
///
/// Displays as `"<operation>: <cause>"`. The wrapped [`DomainError`] keeps its
/// kind so the transport layer can still tell a missing record from a store
/// failure.
#[derive(Debug, Error)]
#[error("{operation}: {source}")]
pub struct OperationError {
    pub operation: &'static str,
    #[source]
    pub source: DomainError,
}

impl OperationError {
    pub fn new(operation: &'static str, source: DomainError) -> Self {
        Self { operation, source }
    }

    /// The underlying domain error
    pub fn cause(&self) -> &DomainError {
        &self.source
    }
}

/// Tags the error side of a domain result with an operation name
pub trait OperationResultExt<T> {
    fn operation(self, operation: &'static str) -> Result<T, OperationError>;
}

impl<T> OperationResultExt<T> for Result<T, DomainError> {
    fn operation(self, operation: &'static str) -> Result<T, OperationError> {
        self.map_err(|source| OperationError::new(operation, source))
    }
}
