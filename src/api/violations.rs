//! Violation logging and listing endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::db::{self, Violation};
use crate::AppState;

/// POST /log-violation request body
#[derive(Debug, Deserialize)]
pub struct LogViolationRequest {
    /// Violation category label; absent or empty is rejected
    #[serde(rename = "type", default)]
    pub violation_type: Option<String>,
}

/// POST /log-violation success response
#[derive(Debug, Serialize)]
pub struct LogViolationResponse {
    pub message: String,
    pub violation: Violation,
}

/// POST /log-violation
///
/// Records a proctoring violation event with a server-assigned timestamp.
pub async fn log_violation(
    State(state): State<AppState>,
    Json(request): Json<LogViolationRequest>,
) -> Result<Json<LogViolationResponse>, ViolationError> {
    let violation_type = match request.violation_type.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ViolationError::MissingType),
    };

    let violation = db::insert_violation(&state.db, violation_type)
        .await
        .map_err(|e| {
            error!("Error logging violation: {}", e);
            ViolationError::Storage
        })?;

    Ok(Json(LogViolationResponse {
        message: "Violation logged".to_string(),
        violation,
    }))
}

/// GET /violations
///
/// Returns all stored violations, most recent first.
pub async fn get_violations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Violation>>, ViolationError> {
    let violations = db::list_violations(&state.db).await.map_err(|e| {
        error!("Error fetching violations: {}", e);
        ViolationError::Storage
    })?;

    Ok(Json(violations))
}

/// Violation endpoint errors
#[derive(Debug)]
pub enum ViolationError {
    MissingType,
    Storage,
}

impl IntoResponse for ViolationError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ViolationError::MissingType => {
                (StatusCode::BAD_REQUEST, "Violation type is required")
            }
            ViolationError::Storage => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
