// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use por_kernel::CodecError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    /// The id parameter is missing, not decimal, or out of `u64` range.
    #[error("invalid user id {0:?}")]
    InvalidId(String),
    #[error("user {0} not found")]
    UserNotFound(u64),
    /// The store answered with a record the codec cannot parse.
    /// A store/codec mismatch, never the caller's fault.
    #[error("malformed record for user {id}: {source}")]
    Codec {
        id: u64,
        #[source]
        source: CodecError,
    },
}

impl QueryError {
    /// Label used for the `outcome` dimension of query metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            QueryError::InvalidId(_) => "invalid_id",
            QueryError::UserNotFound(_) => "not_found",
            QueryError::Codec { .. } => "malformed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            QueryError::InvalidId(_) => StatusCode::BAD_REQUEST,
            QueryError::UserNotFound(_) => StatusCode::NOT_FOUND,
            QueryError::Codec { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            QueryError::InvalidId(_) => "Invalid ID",
            QueryError::UserNotFound(_) => "Not Found",
            QueryError::Codec { .. } => "Internal Error",
        };

        let body = Json(json!({
            "error_message": message
        }));

        (status, body).into_response()
    }
}
