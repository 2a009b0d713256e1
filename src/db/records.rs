//! Record models and insert/list operations
//!
//! Minimal shape validation happens here so both record kinds get the same
//! rigor: non-empty identifying fields, server-assigned timestamps and ids.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

/// A stored proctoring violation event
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Violation {
    /// Persistence-assigned identity
    pub id: i64,
    /// Caller-supplied category label
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub violation_type: String,
    /// Server-assigned insertion time
    pub timestamp: DateTime<Utc>,
}

/// A test result ready for insertion (identity assigned by the database)
#[derive(Debug, Clone)]
pub struct NewTestResult {
    pub email: String,
    pub skill: String,
    pub score: i64,
    pub date: DateTime<Utc>,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub feedback: String,
}

/// Insert a violation with a server-assigned timestamp.
///
/// Returns the stored record including its assigned id. Only the empty
/// string is rejected, matching the handler's presence check; whitespace-only
/// labels are valid input.
pub async fn insert_violation(pool: &SqlitePool, violation_type: &str) -> Result<Violation> {
    if violation_type.is_empty() {
        return Err(Error::InvalidInput("violation type is empty".to_string()));
    }

    let timestamp = Utc::now();
    let result = sqlx::query("INSERT INTO violations (type, timestamp) VALUES (?, ?)")
        .bind(violation_type)
        .bind(timestamp)
        .execute(pool)
        .await?;

    Ok(Violation {
        id: result.last_insert_rowid(),
        violation_type: violation_type.to_string(),
        timestamp,
    })
}

/// List all violations, most recent first.
///
/// The id tiebreak keeps same-millisecond inserts in stable reverse
/// insertion order.
pub async fn list_violations(pool: &SqlitePool) -> Result<Vec<Violation>> {
    let violations = sqlx::query_as::<_, Violation>(
        "SELECT id, type, timestamp FROM violations ORDER BY timestamp DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(violations)
}

/// Insert a test result record, returning its assigned id.
///
/// Question/answer sequences are stored as JSON text columns; lengths are not
/// required to match (pairing is by index, missing answers read as absent).
pub async fn insert_test_result(pool: &SqlitePool, result: &NewTestResult) -> Result<i64> {
    if result.email.is_empty() {
        return Err(Error::InvalidInput("email is empty".to_string()));
    }
    if result.skill.is_empty() {
        return Err(Error::InvalidInput("skill is empty".to_string()));
    }

    let questions = serde_json::to_string(&result.questions)?;
    let answers = serde_json::to_string(&result.answers)?;

    let inserted = sqlx::query(
        "INSERT INTO test_results (email, skill, score, date, questions, answers, feedback)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&result.email)
    .bind(&result.skill)
    .bind(result.score)
    .bind(result.date)
    .bind(questions)
    .bind(answers)
    .bind(&result.feedback)
    .execute(pool)
    .await?;

    Ok(inserted.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory pool limited to one connection so every query sees the same
    /// database (each :memory: connection is otherwise independent).
    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Should open in-memory database");
        crate::db::init_schema(&pool)
            .await
            .expect("Should create schema");
        pool
    }

    #[tokio::test]
    async fn test_insert_violation_assigns_identity() {
        let pool = memory_pool().await;

        let stored = insert_violation(&pool, "tab-switch")
            .await
            .expect("Should insert violation");

        assert!(stored.id > 0);
        assert_eq!(stored.violation_type, "tab-switch");
    }

    #[tokio::test]
    async fn test_insert_violation_rejects_empty_type() {
        let pool = memory_pool().await;

        let result = insert_violation(&pool, "").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let violations = list_violations(&pool).await.unwrap();
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn test_insert_violation_accepts_whitespace_type() {
        let pool = memory_pool().await;

        let stored = insert_violation(&pool, "   ")
            .await
            .expect("Whitespace-only label is valid input");
        assert_eq!(stored.violation_type, "   ");
    }

    #[tokio::test]
    async fn test_list_violations_most_recent_first() {
        let pool = memory_pool().await;

        insert_violation(&pool, "first").await.unwrap();
        insert_violation(&pool, "second").await.unwrap();
        insert_violation(&pool, "third").await.unwrap();

        let violations = list_violations(&pool).await.unwrap();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0].violation_type, "third");
        assert_eq!(violations[2].violation_type, "first");

        for pair in violations.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn test_list_violations_empty_is_ok() {
        let pool = memory_pool().await;

        let violations = list_violations(&pool).await.unwrap();
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn test_insert_test_result() {
        let pool = memory_pool().await;

        let id = insert_test_result(
            &pool,
            &NewTestResult {
                email: "alice@example.com".to_string(),
                skill: "rust".to_string(),
                score: 8,
                date: Utc::now(),
                questions: vec!["Q1".to_string()],
                answers: vec!["A1".to_string()],
                feedback: "Score: 8/10\nFeedback: nice".to_string(),
            },
        )
        .await
        .expect("Should insert test result");

        assert!(id > 0);

        let (score, questions): (i64, String) =
            sqlx::query_as("SELECT score, questions FROM test_results WHERE id = ?")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(score, 8);
        assert_eq!(questions, r#"["Q1"]"#);
    }

    #[tokio::test]
    async fn test_insert_test_result_rejects_empty_email() {
        let pool = memory_pool().await;

        let result = insert_test_result(
            &pool,
            &NewTestResult {
                email: "".to_string(),
                skill: "rust".to_string(),
                score: 0,
                date: Utc::now(),
                questions: vec![],
                answers: vec![],
                feedback: String::new(),
            },
        )
        .await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
