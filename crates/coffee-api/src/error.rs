// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! HTTP error type. Bodies are plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use coffee_sdk::SdkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected before reaching the services.
    #[error("{0}")]
    BadRequest(String),

    /// A downstream call failed. `context` names the operation.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: SdkError,
    },
}

impl ApiError {
    /// Adapter for `map_err` that labels a downstream failure.
    pub fn upstream(context: &'static str) -> impl FnOnce(SdkError) -> ApiError {
        move |source| ApiError::Upstream { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { source, .. } => match source {
                SdkError::NotFound(_) => StatusCode::NOT_FOUND,
                SdkError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Downstream call failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
