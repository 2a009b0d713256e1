//! Test submission and evaluation endpoint
//!
//! Composes an evaluation prompt from the submitted question/answer pairs,
//! delegates scoring to the completion provider, extracts the numeric score,
//! persists the result, and reports pass/fail against the fixed threshold.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::db::{self, NewTestResult};
use crate::services::score::{extract_score, passed};
use crate::AppState;

/// Token budget for evaluation completions
const MAX_TOKENS: u32 = 700;

const EVALUATION_HEADER: &str = "Evaluate the following answers based on the given test questions.\n\
Provide a score out of 10, and return the result in this format strictly:\n\
\n\
Score: X/10\n\
\n\
Feedback: (Detailed feedback on each answer)\n\
\n";

/// POST /submit-test request body
#[derive(Debug, Deserialize)]
pub struct SubmitTestRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<String>>,
    #[serde(default)]
    pub answers: Option<Vec<String>>,
}

/// POST /submit-test success response
#[derive(Debug, Serialize)]
pub struct SubmitTestResponse {
    pub score: i64,
    pub evaluation: String,
    pub passed: bool,
}

/// Build the evaluation prompt: fixed instruction header followed by the
/// question/answer pairs numbered 1-based, one blank line between pairs.
fn build_evaluation_prompt(questions: &[String], answers: &[String]) -> String {
    let mut prompt = String::from(EVALUATION_HEADER);

    for (i, question) in questions.iter().enumerate() {
        // Pairing is by index; a missing answer renders as empty text
        let answer = answers.get(i).map(String::as_str).unwrap_or("");
        prompt.push_str(&format!(
            "**Q{n}**: {question}\n**A{n}**: {answer}\n\n",
            n = i + 1
        ));
    }

    prompt
}

/// POST /submit-test
///
/// Fail-closed: any collaborator error after validation yields a single
/// generic 500 with no partial result reported. A persistence failure after
/// a successful upstream call is not compensated.
pub async fn submit_test(
    State(state): State<AppState>,
    Json(request): Json<SubmitTestRequest>,
) -> Result<Json<SubmitTestResponse>, SubmitError> {
    let email = match request.email.as_deref() {
        Some(e) if !e.is_empty() => e,
        _ => return Err(SubmitError::MissingFields),
    };
    let skill = match request.skill.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(SubmitError::MissingFields),
    };
    let (questions, answers) = match (&request.questions, &request.answers) {
        (Some(q), Some(a)) => (q, a),
        _ => return Err(SubmitError::MissingFields),
    };

    let prompt = build_evaluation_prompt(questions, answers);

    let evaluation = state
        .completion
        .complete(&prompt, MAX_TOKENS)
        .await
        .map_err(|e| {
            error!("Error submitting test: {}", e);
            SubmitError::Internal
        })?;

    let score = extract_score(&evaluation);

    db::insert_test_result(
        &state.db,
        &NewTestResult {
            email: email.to_string(),
            skill: skill.to_string(),
            score,
            date: Utc::now(),
            questions: questions.clone(),
            answers: answers.clone(),
            feedback: evaluation.clone(),
        },
    )
    .await
    .map_err(|e| {
        error!("Error submitting test: {}", e);
        SubmitError::Internal
    })?;

    Ok(Json(SubmitTestResponse {
        score,
        evaluation,
        passed: passed(score),
    }))
}

/// Submit endpoint errors
#[derive(Debug)]
pub enum SubmitError {
    MissingFields,
    Internal,
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SubmitError::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
            SubmitError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error submitting test")
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_numbers_pairs_one_based() {
        let questions = vec!["What is ownership?".to_string(), "What is Send?".to_string()];
        let answers = vec!["Memory discipline".to_string(), "A marker trait".to_string()];

        let prompt = build_evaluation_prompt(&questions, &answers);

        assert!(prompt.starts_with("Evaluate the following answers"));
        assert!(prompt.contains("Score: X/10"));
        assert!(prompt.contains("Feedback:"));
        assert!(prompt.contains("**Q1**: What is ownership?\n**A1**: Memory discipline\n\n"));
        assert!(prompt.contains("**Q2**: What is Send?\n**A2**: A marker trait\n\n"));
    }

    #[test]
    fn test_prompt_missing_answer_renders_empty() {
        let questions = vec!["Q1".to_string(), "Q2".to_string()];
        let answers = vec!["A1".to_string()];

        let prompt = build_evaluation_prompt(&questions, &answers);

        assert!(prompt.contains("**Q2**: Q2\n**A2**: \n\n"));
    }

    #[test]
    fn test_prompt_no_pairs_is_just_header() {
        let prompt = build_evaluation_prompt(&[], &[]);
        assert_eq!(prompt, EVALUATION_HEADER);
    }
}
