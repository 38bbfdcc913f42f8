//! Request handlers for the cookbook HTTP API

use crate::domain::model::EntryDefinition;
use crate::server::ServerState;
use crate::utils::error::{CookbookError, ErrorCategory};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub msg: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub name: Option<String>,
}

/// Maps a cookbook failure onto a plain-text response.
fn error_response(err: CookbookError) -> Response {
    let status = match err.category() {
        ErrorCategory::Admission | ErrorCategory::Lookup | ErrorCategory::Resolution => {
            StatusCode::BAD_REQUEST
        }
        ErrorCategory::Configuration | ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!("Request failed ({}): {}", status, err);
    (status, err.user_friendly_message()).into_response()
}

/// 請求本文無法解析時也回 400，而不是 axum 預設的 415/422
fn payload_error(rejection: JsonRejection) -> Response {
    error_response(CookbookError::InvalidPayload {
        reason: rejection.body_text(),
    })
}

/// Normalize a handwritten recipe name
///
/// POST /parse
pub async fn parse(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return payload_error(rejection),
    };

    match state.cookbook.parse_name(&request.input) {
        Ok(msg) => (StatusCode::OK, Json(ParseResponse { msg })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Add an ingredient or recipe
///
/// POST /entry
pub async fn create_entry(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<EntryDefinition>, JsonRejection>,
) -> Response {
    let definition = match payload {
        Ok(Json(definition)) => definition,
        Err(rejection) => return payload_error(rejection),
    };

    info!(
        "Entry request: {} {:?}",
        definition.r#type.as_deref().unwrap_or("<none>"),
        definition.name
    );

    match state.cookbook.add_entry(&definition) {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({}))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Flatten a recipe into ingredients and total cook time
///
/// GET /summary?name=...
pub async fn summary(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let Some(name) = query.name else {
        return error_response(CookbookError::MissingField {
            field: "name".to_string(),
        });
    };

    match state.cookbook.summary(&name) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response(e),
    }
}
