//! Error types for the railbook library.
//!
//! This module provides the error hierarchy for every operation in the
//! library, using `thiserror` for ergonomic error handling. The four
//! reservation outcomes callers act on (`InvalidRequest`, `NotFound`,
//! `InsufficientSeats`, `BookingFailed`) are distinct variants; everything
//! else is infrastructure.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::train::TrainId;

/// Result type alias for operations that may fail with a railbook error.
///
/// # Examples
///
/// ```
/// use railbook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the railbook library.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied a malformed request.
    #[error("invalid request for '{field}': {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// A description of what is wrong with it.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The train does not have enough available seats.
    #[error("insufficient seats on train {train_id}: requested {requested}, available {available}")]
    InsufficientSeats {
        /// The train the request targeted.
        train_id: TrainId,
        /// Seats requested.
        requested: u32,
        /// Seats available when the lock was held.
        available: u32,
    },

    /// The reservation unit of work was aborted by the store.
    ///
    /// Nothing from the attempt survives. Callers may retry.
    #[error("booking failed: {reason}")]
    BookingFailed {
        /// Coarse classification of the failure.
        reason: BookingFailureReason,
        /// The underlying store error, kept for logs only.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or environment value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

/// Why a reservation unit of work was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFailureReason {
    /// The store lock could not be acquired within the configured wait.
    LockTimeout,
    /// The store refused the write under one of its constraints (seat
    /// bounds, foreign keys, triggers).
    ConstraintViolation,
    /// Any other storage fault.
    Storage,
}

impl fmt::Display for BookingFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LockTimeout => write!(f, "timed out waiting for the inventory lock"),
            Self::ConstraintViolation => write!(f, "write rejected by a store constraint"),
            Self::Storage => write!(f, "storage failure"),
        }
    }
}

impl BookingFailureReason {
    /// Classifies a store error.
    #[must_use]
    pub fn classify(err: &rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
                Self::LockTimeout
            }
            Some(rusqlite::ErrorCode::ConstraintViolation) => Self::ConstraintViolation,
            _ => Self::Storage,
        }
    }
}

/// Caller-facing category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-fixable input error. Retrying unchanged will not help.
    InvalidRequest,
    /// The referenced resource does not exist.
    NotFound,
    /// Business-rule rejection: not enough seats.
    InsufficientSeats,
    /// System or contention fault; safe to retry.
    BookingFailed,
    /// Infrastructure error outside the reservation path.
    Internal,
}

impl ErrorKind {
    /// Returns a stable lowercase label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::InsufficientSeats => "insufficient_seats",
            Self::BookingFailed => "booking_failed",
            Self::Internal => "internal",
        }
    }

    /// Whether a caller may retry the same request.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::BookingFailed)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for input validation failures in domain constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::InvalidRequest {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Wraps a store error raised inside a reservation unit of work.
    #[must_use]
    pub fn booking_failed(err: rusqlite::Error) -> Self {
        Self::BookingFailed {
            reason: BookingFailureReason::classify(&err),
            source: Box::new(err),
        }
    }

    /// Returns the caller-facing category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use railbook::{Error, ErrorKind};
    ///
    /// let err = Error::NotFound { resource: "train 7".into() };
    /// assert_eq!(err.kind(), ErrorKind::NotFound);
    /// assert!(!err.kind().is_retryable());
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InsufficientSeats { .. } => ErrorKind::InsufficientSeats,
            Self::BookingFailed { .. } => ErrorKind::BookingFailed,
            _ => ErrorKind::Internal,
        }
    }

    /// Check if error indicates a missing resource.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a lock-wait expiry on the inventory store.
    #[must_use]
    pub fn is_lock_timeout(&self) -> bool {
        match self {
            Self::BookingFailed { reason, .. } => *reason == BookingFailureReason::LockTimeout,
            Self::Database(err) => {
                BookingFailureReason::classify(err) == BookingFailureReason::LockTimeout
            }
            _ => false,
        }
    }
}
