//! Strict JSON contract for `rank_job_fit` replies.

use serde::{Deserialize, Serialize};

use crate::errors::PromptError;
use crate::templates::OutputContract;

pub const MIN_FIT_SCORE: f64 = 0.0;
pub const MAX_FIT_SCORE: f64 = 10.0;

/// The structured verdict a fit-scoring reply must consist of, and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitVerdict {
    pub fit_score: f64,
    pub reason: String,
}

/// Parses a model reply as a `FitVerdict`.
///
/// Surrounding whitespace is tolerated. Anything else outside the single JSON
/// object (prose, code fences, trailing text) is a contract violation, as are
/// missing, extra, or duplicate keys and scores outside `[0, 10]`.
pub fn validate_fit_verdict(text: &str) -> Result<FitVerdict, PromptError> {
    let trimmed = text.trim();

    if !trimmed.starts_with('{') {
        return Err(violation(
            "expected a single JSON object with no text before it".to_string(),
        ));
    }

    let verdict: FitVerdict =
        serde_json::from_str(trimmed).map_err(|e| violation(e.to_string()))?;

    if !verdict.fit_score.is_finite()
        || !(MIN_FIT_SCORE..=MAX_FIT_SCORE).contains(&verdict.fit_score)
    {
        return Err(violation(format!(
            "fit_score {} is outside [{MIN_FIT_SCORE}, {MAX_FIT_SCORE}]",
            verdict.fit_score
        )));
    }

    Ok(verdict)
}

fn violation(reason: String) -> PromptError {
    PromptError::ContractViolation {
        contract: OutputContract::StrictJson.as_str(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(err: PromptError) -> String {
        match err {
            PromptError::ContractViolation { reason, .. } => reason,
            other => panic!("expected ContractViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_object_satisfies_contract() {
        let verdict = validate_fit_verdict(r#"{"fit_score": 7.5, "reason": "Good match"}"#).unwrap();
        assert_eq!(verdict.fit_score, 7.5);
        assert_eq!(verdict.reason, "Good match");
    }

    #[test]
    fn test_trailing_content_is_violation() {
        let err = validate_fit_verdict(r#"{"fit_score": 7.5, "reason": "Good match"} Thanks!"#)
            .unwrap_err();
        assert!(reason_of(err).contains("trailing"));
    }

    #[test]
    fn test_leading_prose_is_violation() {
        let err = validate_fit_verdict(r#"Here you go: {"fit_score": 7.5, "reason": "ok"}"#)
            .unwrap_err();
        assert!(matches!(err, PromptError::ContractViolation { .. }));
    }

    #[test]
    fn test_code_fenced_reply_is_violation() {
        let text = "```json\n{\"fit_score\": 7.5, \"reason\": \"ok\"}\n```";
        assert!(validate_fit_verdict(text).is_err());
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let text = "\n  {\"fit_score\": 3, \"reason\": \"Junior profile\"}\n";
        let verdict = validate_fit_verdict(text).unwrap();
        assert_eq!(verdict.fit_score, 3.0);
    }

    #[test]
    fn test_extra_key_is_violation() {
        let text = r#"{"fit_score": 7.5, "reason": "ok", "confidence": 0.9}"#;
        assert!(reason_of(validate_fit_verdict(text).unwrap_err()).contains("confidence"));
    }

    #[test]
    fn test_missing_key_is_violation() {
        let err = validate_fit_verdict(r#"{"fit_score": 7.5}"#).unwrap_err();
        assert!(reason_of(err).contains("reason"));
    }

    #[test]
    fn test_duplicate_key_is_violation() {
        let text = r#"{"fit_score": 7.5, "fit_score": 8.0, "reason": "ok"}"#;
        assert!(validate_fit_verdict(text).is_err());
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert!(validate_fit_verdict(r#"{"fit_score": 0, "reason": "none"}"#).is_ok());
        assert!(validate_fit_verdict(r#"{"fit_score": 10.0, "reason": "all"}"#).is_ok());
    }

    #[test]
    fn test_out_of_range_score_is_violation() {
        let err = validate_fit_verdict(r#"{"fit_score": 10.5, "reason": "wow"}"#).unwrap_err();
        assert!(reason_of(err).contains("outside"));
        assert!(validate_fit_verdict(r#"{"fit_score": -1, "reason": "no"}"#).is_err());
    }

    #[test]
    fn test_string_score_is_violation() {
        assert!(validate_fit_verdict(r#"{"fit_score": "7.5", "reason": "ok"}"#).is_err());
    }
}
