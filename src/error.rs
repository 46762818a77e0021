//! Unified application error types
//!
//! Provides a single error type for the entire crate, suitable for
//! returning across the transport boundary.

use serde::Serialize;
use thiserror::Error;

use crate::models::ParseTagError;
use crate::store::StoreError;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Round state store error
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Round tag label parse error
    #[error("round tag error: {0}")]
    Tag(#[from] ParseTagError),

    /// Snapshot serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Serializable error response for the transport boundary
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn parts(&self) -> (String, String) {
        match self {
            Self::Store(e) => (e.code().to_string(), e.to_string()),
            Self::Tag(e) => ("INVALID_TAG".to_string(), e.to_string()),
            Self::Serialization(e) => ("SERIALIZATION_ERROR".to_string(), e.to_string()),
            Self::Internal(msg) => ("INTERNAL_ERROR".to_string(), msg.clone()),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        let (code, message) = err.parts();
        Self { code, message }
    }
}

// Serialize AppError as its ErrorResponse form so it crosses the boundary
// without a separate conversion step.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let (code, message) = self.parts();
        ErrorResponse { code, message }.serialize(serializer)
    }
}
