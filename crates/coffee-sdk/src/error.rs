// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for coffee-sdk.

use coffee_protocol::client::ClientError;
use thiserror::Error;

/// Result type using SdkError.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors that can occur when using the SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Could not reach the service.
    #[error("connection error: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// Server returned an error code the SDK has no dedicated variant for.
    #[error("server error [{code}]: {message}")]
    Server { code: String, message: String },

    /// The referenced order does not exist (`not_found`).
    #[error("not found: {0}")]
    NotFound(String),

    /// The server rejected the input (`invalid_argument`), or the SDK did
    /// before sending it.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Response did not match the request.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Framing or decoding failure.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl SdkError {
    /// Build from an in-band server error.
    pub fn from_server(code: String, message: String) -> Self {
        match code.as_str() {
            "not_found" => SdkError::NotFound(message),
            "invalid_argument" => SdkError::InvalidInput(message),
            _ => SdkError::Server { code, message },
        }
    }

    /// Wire code this error corresponds to, for callers that re-expose it.
    pub fn code(&self) -> &str {
        match self {
            SdkError::NotFound(_) => "not_found",
            SdkError::InvalidInput(_) => "invalid_argument",
            SdkError::Server { code, .. } => code,
            _ => "internal",
        }
    }
}

impl From<ClientError> for SdkError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Timeout(ms) => SdkError::Timeout(ms),
            ClientError::Frame(e) => SdkError::Protocol(e.to_string()),
            other => SdkError::Connection(other.to_string()),
        }
    }
}
