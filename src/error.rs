//! Error types for rest-pager
//!
//! This module defines the error hierarchy for the crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! End-of-sequence is deliberately NOT an error: iteration APIs signal it
//! as `Ok(None)`. The variants here cover transport failures, protocol
//! failures, and malformed page responses only.

use thiserror::Error;

/// The main error type for rest-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    // ============================================================================
    // Page Response Errors
    // ============================================================================
    /// The transport succeeded at the protocol level but the response body
    /// was empty or absent. Distinct from end-of-sequence, which is `Ok(None)`.
    #[error("Http Error - no response entity returned")]
    EmptyResponse,

    #[error("Page response contains neither '{key}' nor 'data'")]
    MissingCollection { key: String },

    #[error("Failed to decode resource: {message}")]
    Decode { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a missing-collection error
    pub fn missing_collection(key: impl Into<String>) -> Self {
        Self::MissingCollection { key: key.into() }
    }

    /// Check if this error is retryable at the transport level
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for rest-pager
pub type Result<T> = std::result::Result<T, Error>;
