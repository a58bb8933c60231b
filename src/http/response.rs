//! Response envelopes and error mapping.
//!
//! # Responsibilities
//! - Wrap every payload in `{success, data|error, ...}`
//! - Map request and store failures to status codes
//!
//! # Design Decisions
//! - 500 responses carry a fixed message per endpoint; the cause is only logged
//! - Not-found is a 404 envelope, never an empty success

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::dictionary::{Language, StoreError};

/// `{success: true, count, data}`
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{success: true, data}`
#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ItemResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    pub success: bool,
    pub count: usize,
    pub search_term: String,
    pub language: Language,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct AlphabetResponse<T> {
    pub success: bool,
    pub alphabet: String,
    pub count: usize,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Errors a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid request parameters.
    #[error("{0}")]
    Validation(String),

    /// The lookup found nothing.
    #[error("{0}")]
    NotFound(String),

    /// The store could not serve the request.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Adapter for `map_err`: wrap a store error under a public message.
    pub fn internal(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Internal { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { message, source } => {
                tracing::error!(error = %source, "{}", message);
            }
            other => tracing::debug!(status = %other.status(), error = %other, "Request rejected"),
        }

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);

        let err = ApiError::internal("Search failed")(StoreError::Unavailable {
            file_name: "ক.json".into(),
            reason: "broken".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The public message never includes the file
        assert_eq!(err.to_string(), "Search failed");
    }

    #[test]
    fn test_envelope_shapes() {
        let list = serde_json::to_value(ListResponse::new(vec!["অ", "আ"])).unwrap();
        assert_eq!(list, serde_json::json!({"success": true, "count": 2, "data": ["অ", "আ"]}));

        let search = serde_json::to_value(SearchResponse::<u8> {
            success: true,
            count: 0,
            search_term: "জাকা".into(),
            language: Language::Bpy,
            data: vec![],
        })
        .unwrap();
        assert_eq!(search["searchTerm"], "জাকা");
        assert_eq!(search["language"], "bpy");
    }
}
