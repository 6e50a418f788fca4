//! Error types for the CMS core library.

use crate::types::ContactId;

/// Errors that can occur while serving contact operations.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The referenced contact does not exist in the store.
    #[error("Contact not found with ID: {id}")]
    ContactNotFound {
        /// Identifier that was looked up
        id: ContactId,
    },

    /// Input validation error
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error (config files, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type alias for CMS operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a not-found error for a contact identifier.
    pub fn not_found(id: ContactId) -> Self {
        Error::ContactNotFound { id }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns whether this error reports a missing contact.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ContactNotFound { .. })
    }

    /// Returns whether this error was caused by the caller's input.
    ///
    /// Client errors map to 4xx responses; everything else is a server failure.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::ContactNotFound { .. } => true,
            Error::Validation { .. } => true,
            Error::Database(_) => false,
            Error::Config { .. } => false,
            Error::Io(_) => false,
        }
    }
}
