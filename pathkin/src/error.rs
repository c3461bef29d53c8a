//! Error types for the pathkin library.
//!
//! This module provides the error hierarchy for all path operations,
//! using `thiserror` for ergonomic error handling. Note that a path
//! resolving to no filesystem object at all ("absent") is *not* an error
//! anywhere in this crate; it is modelled as `Ok(None)`.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a pathkin error.
///
/// # Examples
///
/// ```
/// use pathkin::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathkin library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation has no meaning for the given operand kinds.
    ///
    /// Raised when concatenating two absolute or two relative nodes;
    /// neither combination denotes a location.
    #[error("invalid operation: {details}")]
    InvalidOperation {
        /// Details about the rejected operation.
        details: String,
    },

    /// A relative form cannot be derived for the given operands.
    ///
    /// Raised when a relative-path computation is anchored on a relative
    /// start: no shared origin can be assumed, so refusing is better than
    /// a silently wrong answer.
    #[error("not applicable: {details}")]
    NotApplicable {
        /// Details about why no relative form exists.
        details: String,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkin::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathkin::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}
