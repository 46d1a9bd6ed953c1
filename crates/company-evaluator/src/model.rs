use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EvaluateError;

/// A validated evaluation request: the user's URL text, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    pub raw_url: String,
}

impl EvaluationRequest {
    pub fn new(raw_url: &str) -> Result<Self, EvaluateError> {
        let trimmed = raw_url.trim();
        if trimmed.is_empty() {
            return Err(EvaluateError::InvalidInput);
        }
        Ok(Self {
            raw_url: trimmed.to_string(),
        })
    }

    /// Parse a `{"url": "..."}` request body. A body that is not a JSON object, or whose
    /// `url` is missing, not a string, or blank, is rejected as invalid input.
    pub fn from_body(body: &[u8]) -> Result<Self, EvaluateError> {
        let parsed: Value =
            serde_json::from_slice(body).map_err(|_| EvaluateError::InvalidInput)?;
        match parsed.get("url") {
            Some(Value::String(url)) => Self::new(url),
            _ => Err(EvaluateError::InvalidInput),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    WorthJoining,
    ProceedWithCaution,
    RedFlags,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [
        Verdict::WorthJoining,
        Verdict::ProceedWithCaution,
        Verdict::RedFlags,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::WorthJoining => "worth_joining",
            Verdict::ProceedWithCaution => "proceed_with_caution",
            Verdict::RedFlags => "red_flags",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::WorthJoining => "Worth Joining",
            Verdict::ProceedWithCaution => "Proceed with Caution",
            Verdict::RedFlags => "Red Flags Detected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Typed view of a model verdict.
///
/// The HTTP endpoint returns the model's JSON verbatim; this view is only built for
/// rendering, so every field tolerates absence and `verdict` keeps unknown strings.
/// Built by [`EvaluationResult::from_value`] rather than a serde derive, which would
/// reject a whole reply over one mistyped field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationResult {
    pub company_name: String,
    pub verdict: String,
    pub verdict_label: String,
    pub summary: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub founder_insights: String,
    pub space_outlook: String,
    pub advice: String,
}

impl EvaluationResult {
    /// Lenient conversion: fields with unexpected types fall back to their defaults.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let list = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        };
        Self {
            company_name: text("companyName"),
            verdict: text("verdict"),
            verdict_label: text("verdictLabel"),
            summary: text("summary"),
            strengths: list("strengths"),
            concerns: list("concerns"),
            founder_insights: text("founderInsights"),
            space_outlook: text("spaceOutlook"),
            advice: text("advice"),
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        Verdict::parse(&self.verdict)
    }

    /// The model's label, or the canonical label for a recognised verdict.
    pub fn display_label(&self) -> String {
        if !self.verdict_label.trim().is_empty() {
            return self.verdict_label.clone();
        }
        match self.verdict() {
            Some(v) => v.label().to_string(),
            None => self.verdict.clone(),
        }
    }
}

/// Client-side view of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationState {
    Pending,
    Success(EvaluationResult),
    Failure(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_requires_string_url() {
        assert_eq!(
            EvaluationRequest::from_body(br#"{"url":"  stripe.com "}"#).expect("valid"),
            EvaluationRequest {
                raw_url: "stripe.com".to_string()
            }
        );
        for body in [
            &br#"{}"#[..],
            br#"{"url":""}"#,
            br#"{"url":"   "}"#,
            br#"{"url":42}"#,
            br#"{"url":null}"#,
            br#"["stripe.com"]"#,
            br#"not json"#,
        ] {
            assert!(
                matches!(EvaluationRequest::from_body(body), Err(EvaluateError::InvalidInput)),
                "body {:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn verdict_round_trips_through_wire_names() {
        for v in Verdict::ALL {
            assert_eq!(Verdict::parse(v.as_str()), Some(v));
            assert_eq!(serde_json::to_value(v).expect("serialize"), json!(v.as_str()));
        }
        assert_eq!(Verdict::parse("amazing"), None);
    }

    #[test]
    fn from_value_tolerates_missing_and_mistyped_fields() {
        let value = json!({
            "companyName": "Stripe",
            "verdict": "worth_joining",
            "strengths": ["payments infra", 7, "strong team"],
            "concerns": "not a list"
        });
        let result = EvaluationResult::from_value(&value);
        assert_eq!(result.company_name, "Stripe");
        assert_eq!(result.verdict(), Some(Verdict::WorthJoining));
        assert_eq!(result.strengths, vec!["payments infra", "strong team"]);
        assert!(result.concerns.is_empty());
        assert_eq!(result.summary, "");
        assert_eq!(result.display_label(), "Worth Joining");
    }

    #[test]
    fn display_label_prefers_model_label_and_keeps_unknown_verdicts() {
        let labelled = EvaluationResult {
            verdict: "red_flags".to_string(),
            verdict_label: "Red Flags Detected".to_string(),
            ..Default::default()
        };
        assert_eq!(labelled.display_label(), "Red Flags Detected");

        let unknown = EvaluationResult {
            verdict: "maybe".to_string(),
            ..Default::default()
        };
        assert_eq!(unknown.verdict(), None);
        assert_eq!(unknown.display_label(), "maybe");
    }
}
