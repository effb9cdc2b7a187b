// src/server/handlers.rs

//! Route handlers for the certificate API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::server::AppState;
use crate::server::response::{
    ApiError, ApiResponse, HealthResponse, SEARCH_TERM_REQUIRED, SearchData,
};

/// Query string of `GET /api/certificates`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Certificate Tracker API is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /api/certificates[?name=]`: raw board dump, or a name search.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    if let Some(name) = params.name.filter(|n| !n.trim().is_empty()) {
        let results = state
            .service
            .search(name.trim())
            .await
            .map_err(|e| state.error(e, "Failed to fetch certificates for person"))?;
        return Ok(ApiResponse::ok(SearchData::for_name(name, results)).into_response());
    }

    let snapshot = state
        .service
        .snapshot()
        .await
        .map_err(|e| state.error(e, "Failed to fetch certificates"))?;
    Ok(ApiResponse::ok(snapshot).into_response())
}

/// `POST /api/certificates/search` with `{ "searchTerm": "..." }`.
pub async fn search(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let term = search_term(body)?;
    let results = state
        .service
        .search(&term)
        .await
        .map_err(|e| state.error(e, "Failed to search certificates"))?;
    Ok(ApiResponse::ok(SearchData::for_term(term, results)).into_response())
}

/// `GET /api/certificates/{name}`
pub async fn by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::bad_request(SEARCH_TERM_REQUIRED));
    }
    let results = state
        .service
        .search(name.trim())
        .await
        .map_err(|e| state.error(e, "Failed to fetch certificates for person"))?;
    Ok(ApiResponse::ok(SearchData::for_name(name, results)).into_response())
}

/// Any unmatched `/api` path.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// Known `/api` path, unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Trimmed, non-blank `searchTerm` from a request body.
fn search_term(body: Result<Json<Value>, JsonRejection>) -> Result<String, ApiError> {
    let Ok(Json(body)) = body else {
        return Err(ApiError::bad_request(SEARCH_TERM_REQUIRED));
    };
    match body.get("searchTerm").and_then(Value::as_str).map(str::trim) {
        Some(term) if !term.is_empty() => Ok(term.to_string()),
        _ => Err(ApiError::bad_request(SEARCH_TERM_REQUIRED)),
    }
}
