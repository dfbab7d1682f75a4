//! Standardized API response bodies.
//!
//! Errors are `{"error": string}`; mutations that carry no row back are
//! `{"message": string}`. Rows themselves are returned bare.

use serde::{Deserialize, Serialize};

/// Wire error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new("authentication required")
    }

    pub fn forbidden() -> Self {
        Self::new("you do not have permission to modify this resource")
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn internal_error() -> Self {
        Self::new("internal server error")
    }
}

/// Wire success body for mutations that return no row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
