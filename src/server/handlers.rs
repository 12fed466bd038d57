//! HTTP handlers for the marker API
//!
//! Each handler parses the collection key, delegates to the service, and
//! maps the outcome onto status codes: validation and configuration
//! problems are client errors, store failures are server errors, and
//! not-found lookups are ordinary 404 payloads rather than errors.

use super::AppState;
use crate::app::models::{BulkUpdateOutcome, BulkUpdateRequest, CollectionKey, PatchEntry, PatchOutcome, Record};
use crate::constants::XLSX_CONTENT_TYPE;
use crate::Error;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::Configuration { .. } | Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Io { .. }
            | Error::Decode { .. }
            | Error::Structure { .. }
            | Error::Export { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// GET `/api/markers/{key}` — list every record
pub async fn list_markers(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Vec<Value>>, Error> {
    let key: CollectionKey = key.parse()?;
    Ok(Json(state.service.list(key).await?))
}

/// POST `/api/markers/{key}/bulk_array_update` — bulk list-field update
pub async fn bulk_array_update(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(request): Json<BulkUpdateRequest>,
) -> Result<Json<BulkUpdateOutcome>, Error> {
    let key: CollectionKey = key.parse()?;
    Ok(Json(state.service.bulk_update(key, &request).await?))
}

/// PATCH `/api/markers/{key}` — multi-record partial update
pub async fn patch_markers(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(entries): Json<Vec<PatchEntry>>,
) -> Result<Json<PatchOutcome>, Error> {
    let key: CollectionKey = key.parse()?;
    Ok(Json(state.service.patch(key, &entries).await?))
}

/// POST `/api/markers/{key}` — create a record
pub async fn create_marker(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(record): Json<Record>,
) -> Result<(StatusCode, Json<Value>), Error> {
    let key: CollectionKey = key.parse()?;
    let stored = state.service.create(key, record).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT `/api/markers/{key}/{id}` — full replace of the first match
pub async fn replace_marker(
    State(state): State<Arc<AppState>>,
    Path((key, id)): Path<(String, String)>,
    Json(replacement): Json<Record>,
) -> Result<Response, Error> {
    let key: CollectionKey = key.parse()?;
    match state.service.replace(key, &id, replacement).await? {
        Some(stored) => Ok(Json(stored).into_response()),
        None => Ok(not_found("Not found")),
    }
}

/// DELETE `/api/markers/{key}/{id}` — delete every match
pub async fn delete_marker(
    State(state): State<Arc<AppState>>,
    Path((key, id)): Path<(String, String)>,
) -> Result<Response, Error> {
    let key: CollectionKey = key.parse()?;
    if state.service.delete(key, &id).await? {
        Ok(Json(json!({ "message": "Deleted" })).into_response())
    } else {
        Ok(not_found("Not Found"))
    }
}

/// GET `/api/export/{key}` — xlsx attachment of the tabular projection
pub async fn export_markers(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, Error> {
    let key: CollectionKey = key.parse()?;
    let bytes = state.service.export(key).await?;

    let disposition = format!("attachment; filename=\"{}_stations.xlsx\"", key.as_str());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}
