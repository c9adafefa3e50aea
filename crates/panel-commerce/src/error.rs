//! Commerce error types.

use crate::ids::LineId;
use thiserror::Error;

/// Errors that can occur in ordering, pricing and cart operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Input that cannot be turned into a submittable order.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No price per unit could be resolved for a configuration.
    #[error("No price available for {title} ({color}, {gauge})")]
    PriceUnavailable {
        title: String,
        color: String,
        gauge: String,
    },

    /// Line not present in the ordering session.
    #[error("Line not found: {0}")]
    LineNotFound(LineId),

    /// Persisted state could not be read or written.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Price table could not be fetched or decoded.
    #[error("Price source error: {0}")]
    PriceSource(String),
}

impl CommerceError {
    /// Convenience constructor for validation failures.
    pub fn validation(msg: impl Into<String>) -> Self {
        CommerceError::ValidationError(msg.into())
    }
}

impl From<panel_cache::CacheError> for CommerceError {
    fn from(e: panel_cache::CacheError) -> Self {
        CommerceError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
