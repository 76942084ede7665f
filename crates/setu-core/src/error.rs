// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Setu retail assistant.

use thiserror::Error;

/// The primary error type used across all Setu adapters and flows.
#[derive(Debug, Error)]
pub enum SetuError {
    /// Configuration errors (invalid base URL, bad values, unreadable files).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a response (backend unreachable, connection reset,
    /// body could not be read).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status.
    ///
    /// `detail` holds the `detail` member of the JSON error body when present.
    #[error("backend returned {status}: {message}")]
    Backend {
        status: u16,
        message: String,
        detail: Option<serde_json::Value>,
    },

    /// The backend answered successfully but the body did not have the expected shape.
    #[error("decode error: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persistence errors (database open, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SetuError {
    /// Returns true when the backend reported a failed payment, i.e. a
    /// non-success response whose `detail` object carries `"status": "failed"`.
    pub fn is_payment_failed(&self) -> bool {
        match self {
            SetuError::Backend {
                detail: Some(detail),
                ..
            } => detail.get("status").and_then(|s| s.as_str()) == Some("failed"),
            _ => false,
        }
    }

    /// HTTP status of a backend error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SetuError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Shorthand for building a storage error from any error value.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SetuError::Storage {
            source: Box::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payment_failed_detected_from_detail_object() {
        let err = SetuError::Backend {
            status: 400,
            message: "Payment Failed. Please try again.".into(),
            detail: Some(json!({"status": "failed", "message": "Payment Failed. Please try again.", "order_id": null})),
        };
        assert!(err.is_payment_failed());
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn string_detail_is_not_payment_failure() {
        let err = SetuError::Backend {
            status: 404,
            message: "Product not found".into(),
            detail: Some(json!("Product not found")),
        };
        assert!(!err.is_payment_failed());
    }

    #[test]
    fn transport_error_is_not_payment_failure() {
        let err = SetuError::Transport {
            message: "connection refused".into(),
            source: None,
        };
        assert!(!err.is_payment_failed());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_includes_status_and_message() {
        let err = SetuError::Backend {
            status: 503,
            message: "unavailable".into(),
            detail: None,
        };
        assert_eq!(err.to_string(), "backend returned 503: unavailable");
    }
}
