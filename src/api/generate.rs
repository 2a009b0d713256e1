//! Free-text completion proxy endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::AppState;

/// Token budget for proxied completions
const MAX_TOKENS: u32 = 700;

/// POST /generate-ai-response request body
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// POST /generate-ai-response success response
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub result: String,
}

/// POST /generate-ai-response
///
/// Forwards the raw prompt to the completion provider and returns the
/// generated text. Validation happens before any outbound call.
pub async fn generate_ai_response(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, GenerateError> {
    let prompt = match request.prompt.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(GenerateError::MissingPrompt),
    };

    let result = state
        .completion
        .complete(prompt, MAX_TOKENS)
        .await
        .map_err(|e| {
            error!("Error generating AI response: {}", e);
            GenerateError::Upstream
        })?;

    Ok(Json(GenerateResponse { result }))
}

/// Generate endpoint errors
#[derive(Debug)]
pub enum GenerateError {
    MissingPrompt,
    Upstream,
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GenerateError::MissingPrompt => (StatusCode::BAD_REQUEST, "Prompt is required"),
            GenerateError::Upstream => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error generating AI response")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
