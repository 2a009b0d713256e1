//! Score extraction from evaluation text

use regex::Regex;
use std::sync::OnceLock;

/// Minimum score counted as a pass (out of 10)
pub const PASSING_SCORE: i64 = 5;

static SCORE_RE: OnceLock<Regex> = OnceLock::new();

fn score_re() -> &'static Regex {
    SCORE_RE.get_or_init(|| Regex::new(r"Score:\s*(\d+)/10").unwrap())
}

/// Extract an integer score from "Score: X/10" in free text.
///
/// Returns 0 when no score pattern is present. The value is returned as
/// written: "Score: 15/10" yields 15, not a clamped 10 (kept compatible with
/// the upstream contract rather than silently corrected).
pub fn extract_score(text: &str) -> i64 {
    score_re()
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .unwrap_or(0)
}

/// Passing threshold check: score >= 5 out of 10
pub fn passed(score: i64) -> bool {
    score >= PASSING_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_score_with_feedback() {
        assert_eq!(extract_score("Score: 7/10\nFeedback: good"), 7);
    }

    #[test]
    fn test_extract_score_absent() {
        assert_eq!(extract_score("no score here"), 0);
    }

    #[test]
    fn test_extract_score_no_whitespace() {
        assert_eq!(extract_score("Score:10/10"), 10);
    }

    #[test]
    fn test_extract_score_unclamped() {
        // Out-of-range upstream output passes through unchanged
        assert_eq!(extract_score("Score: 15/10"), 15);
    }

    #[test]
    fn test_extract_score_first_match_wins() {
        assert_eq!(extract_score("Score: 3/10 ... Score: 9/10"), 3);
    }

    #[test]
    fn test_passing_boundary() {
        assert!(passed(5));
        assert!(!passed(4));
        assert!(passed(10));
        assert!(!passed(0));
    }
}
