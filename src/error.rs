//! Error types for the shift roster service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the store, the configuration loader or the resource
//! operations can report.

use sea_orm::DbErr;
use thiserror::Error;

use crate::models::FieldErrors;

/// The main error type for the shift roster service.
///
/// All resource operations return this error type, so the HTTP layer can
/// translate failures into responses in one place.
///
/// # Example
///
/// ```
/// use shift_roster::error::RosterError;
///
/// let error = RosterError::NotFound {
///     resource: "employee",
///     id: "7".to_string(),
/// };
/// assert_eq!(error.to_string(), "employee not found: 7");
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// No record of the resource exists under the identifier.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// The resource kind (e.g. "employee").
        resource: &'static str,
        /// The identifier as it appeared in the request.
        id: String,
    },

    /// A request body failed field validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// A stored row holds a value the model cannot represent.
    #[error("Invalid stored {resource} {id}: {message}")]
    InvalidStoredValue {
        /// The resource kind.
        resource: &'static str,
        /// The identifier of the offending row.
        id: i32,
        /// A description of the bad value.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The database rejected or failed an operation.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// An I/O failure outside the database, such as binding the listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    /// Builds a not-found error for a resource and identifier.
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// A type alias for Results that return RosterError.
pub type RosterResult<T> = Result<T, RosterError>;
