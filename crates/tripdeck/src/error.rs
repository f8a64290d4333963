//! Error types for tripdeck.
//!
//! This module defines all error types used throughout the tripdeck crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::trip::PhaseId;

/// The main error type for tripdeck operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Invalid References ===
    /// An operation referenced a phase id that is not part of the trip plan.
    #[error("unknown phase id {id}")]
    UnknownPhase {
        /// The phase id that was not found.
        id: PhaseId,
    },

    /// A packing toggle referenced an item the plan's packing list does not contain.
    #[error("packing list has no item '{item}' under '{category}'")]
    PackingItemNotListed {
        /// The category that was addressed.
        category: String,
        /// The item that was addressed.
        item: String,
    },

    /// A detach referenced an attachment index that does not exist.
    #[error("phase {phase} has no attachment at index {index}")]
    AttachmentOutOfRange {
        /// The phase whose album was addressed.
        phase: PhaseId,
        /// The out-of-range index.
        index: usize,
    },

    // === Resource Exhaustion ===
    /// The session-wide attachment cap was reached.
    #[error("attachment limit of {limit} reached for this session")]
    AttachmentLimit {
        /// The configured cap.
        limit: usize,
    },

    /// A single attachment exceeded the per-file byte cap.
    #[error("attachment is {bytes} bytes, over the {limit} byte limit")]
    AttachmentTooLarge {
        /// Size of the rejected attachment.
        bytes: u64,
        /// The configured per-attachment cap.
        limit: u64,
    },

    // === Trip Plan Errors ===
    /// Failed to load a trip plan file.
    #[error("failed to load trip plan from {path}: {source}")]
    TripLoad {
        /// Path to the plan file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<figment::Error>,
    },

    /// Trip plan validation failed.
    #[error("invalid trip plan: {message}")]
    TripValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Spool Errors ===
    /// Failed to create or write a spool file for an attachment.
    #[error("spool error: {message}")]
    Spool {
        /// Description of what went wrong.
        message: String,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tripdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown-phase error.
    #[must_use]
    pub fn unknown_phase(id: PhaseId) -> Self {
        Self::UnknownPhase { id }
    }

    /// Create a packing-item-not-listed error.
    #[must_use]
    pub fn packing_item_not_listed(category: impl Into<String>, item: impl Into<String>) -> Self {
        Self::PackingItemNotListed {
            category: category.into(),
            item: item.into(),
        }
    }

    /// Create a trip validation error.
    #[must_use]
    pub fn trip_validation(message: impl Into<String>) -> Self {
        Self::TripValidation {
            message: message.into(),
        }
    }

    /// Create a spool error.
    #[must_use]
    pub fn spool(message: impl Into<String>) -> Self {
        Self::Spool {
            message: message.into(),
        }
    }

    /// Check if this error is an invalid reference into static trip data.
    #[must_use]
    pub fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            Self::UnknownPhase { .. }
                | Self::PackingItemNotListed { .. }
                | Self::AttachmentOutOfRange { .. }
        )
    }

    /// Check if this error is a resource exhaustion condition.
    #[must_use]
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(
            self,
            Self::AttachmentLimit { .. } | Self::AttachmentTooLarge { .. }
        )
    }
}
