// src/server/response.rs

//! JSON envelopes shared by every API route.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;
use crate::models::Certificate;

/// Message for a missing, non-string or blank search term.
pub const SEARCH_TERM_REQUIRED: &str = "searchTerm is required and must be a string";

/// Successful response: `{ success: true, data }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }

    pub fn ok(data: T) -> Json<Self> {
        Json(Self::new(data))
    }
}

/// Search results, echoing the term under the key the route uses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub results: Vec<Certificate>,

    pub count: usize,
}

impl SearchData {
    /// Results for a body-supplied `searchTerm`.
    pub fn for_term(term: impl Into<String>, results: Vec<Certificate>) -> Self {
        Self {
            search_term: Some(term.into()),
            name: None,
            count: results.len(),
            results,
        }
    }

    /// Results for a name taken from the path or query string.
    pub fn for_name(name: impl Into<String>, results: Vec<Certificate>) -> Self {
        Self {
            search_term: None,
            name: Some(name.into()),
            count: results.len(),
            results,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Error response: `{ success: false, error, message? }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    message: Option<String>,
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            message: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "API endpoint not found".to_string(),
            message: None,
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            error: "Method not allowed".to_string(),
            message: None,
        }
    }

    /// Map an application error, labelling failures with `summary`.
    ///
    /// Error details are only echoed when `development` is set.
    pub fn from_app(err: AppError, summary: &str, development: bool) -> Self {
        if let AppError::Validation(message) = err {
            return Self::bad_request(message);
        }

        tracing::error!("{}: {}", summary, err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: summary.to_string(),
            message: Some(if development {
                err.to_string()
            } else {
                "Something went wrong".to_string()
            }),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.error,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
