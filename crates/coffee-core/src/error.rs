// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for coffee-core.
//!
//! One error type flows from the stores through the services to the RPC
//! handlers, where it is turned into an in-band `RpcError`.

use std::fmt;

use coffee_protocol::brew_proto::RpcError;

use crate::order_ref::OrderRef;

/// Result type using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by the order lifecycle and its stores.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CoreError {
    /// Caller supplied something unusable (empty name, bad identifier, bad status).
    InvalidArgument {
        /// The offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// No order with this id exists.
    OrderNotFound {
        /// Numeric order id.
        order_id: i64,
    },

    /// Storage failed for any other reason.
    DatabaseError {
        /// The operation that failed.
        operation: String,
        /// Error details.
        details: String,
    },
}

impl CoreError {
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convert this error to an RpcError for protocol responses.
    pub fn to_rpc_error(&self) -> RpcError {
        RpcError {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }

    /// Wire code understood by every client.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::OrderNotFound { .. } => "not_found",
            Self::DatabaseError { .. } => "internal",
        }
    }

    /// Attach the failing operation to a storage error. Other kinds pass through.
    pub fn with_operation(self, operation: &str) -> Self {
        match self {
            Self::DatabaseError { details, .. } => Self::DatabaseError {
                operation: operation.to_string(),
                details,
            },
            other => other,
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { field, message } => {
                write!(f, "Invalid argument '{}': {}", field, message)
            }
            Self::OrderNotFound { order_id } => {
                write!(f, "Order '{}' not found", OrderRef::new(*order_id))
            }
            Self::DatabaseError { operation, details } => {
                write!(f, "Database error during '{}': {}", operation, details)
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::DatabaseError {
            operation: "query".to_string(),
            details: err.to_string(),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for CoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        CoreError::DatabaseError {
            operation: "migrate".to_string(),
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let cases = vec![
            (CoreError::invalid_argument("order_id", "bad"), "invalid_argument"),
            (CoreError::OrderNotFound { order_id: 3 }, "not_found"),
            (
                CoreError::DatabaseError {
                    operation: "insert".to_string(),
                    details: "connection refused".to_string(),
                },
                "internal",
            ),
        ];

        for (error, expected_code) in cases {
            let rpc_error = error.to_rpc_error();
            assert_eq!(rpc_error.code, expected_code, "wrong code for {:?}", error);
            assert_eq!(rpc_error.message, error.to_string());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            CoreError::OrderNotFound { order_id: 7 }.to_string(),
            "Order 'order-7' not found"
        );
        assert_eq!(
            CoreError::invalid_argument("menu_item_name", "must not be empty").to_string(),
            "Invalid argument 'menu_item_name': must not be empty"
        );
        assert_eq!(
            CoreError::DatabaseError {
                operation: "create_order".to_string(),
                details: "disk full".to_string(),
            }
            .to_string(),
            "Database error during 'create_order': disk full"
        );
    }

    #[test]
    fn test_with_operation_relabels_only_storage_errors() {
        let err = CoreError::from(sqlx::Error::RowNotFound).with_operation("get_order");
        match err {
            CoreError::DatabaseError { operation, .. } => assert_eq!(operation, "get_order"),
            other => panic!("unexpected: {:?}", other),
        }

        let not_found = CoreError::OrderNotFound { order_id: 1 }.with_operation("get_order");
        assert_eq!(not_found, CoreError::OrderNotFound { order_id: 1 });
    }
}
