//! Reviewer answers and their normalized attainment.

use crate::error::TrackerError;
use serde::{Deserialize, Serialize};

/// The closed set of answer values a reviewer may give.
///
/// Deserialization goes through [`AnswerValue::from_str`], so an out-of-set
/// value such as `"Maybe"` is rejected at entry as an invalid answer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AnswerValue {
    Yes,
    No,
    Partial,
}

impl AnswerValue {
    /// Normalized attainment: Yes → 100, Partial → 50, No → 0
    #[must_use]
    pub const fn attainment(self) -> f64 {
        match self {
            Self::Yes => 100.0,
            Self::Partial => 50.0,
            Self::No => 0.0,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Partial => "Partial",
        }
    }

    /// Whether the answer leaves room for improvement
    #[must_use]
    pub const fn is_gap(self) -> bool {
        !matches!(self, Self::Yes)
    }
}

impl std::str::FromStr for AnswerValue {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "partial" => Ok(Self::Partial),
            _ => Err(TrackerError::invalid_answer(s)),
        }
    }
}

impl TryFrom<String> for AnswerValue {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reviewer answer to one catalog question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    #[serde(rename = "answer")]
    pub value: AnswerValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: AnswerValue) -> Self {
        Self {
            question_id: question_id.into(),
            value,
            evidence_url: None,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_evidence(mut self, url: impl Into<String>) -> Self {
        self.evidence_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether a non-blank evidence URL was supplied
    #[must_use]
    pub fn has_evidence(&self) -> bool {
        self.evidence_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Normalized attainment of the answer value
    #[must_use]
    pub const fn attainment(&self) -> f64 {
        self.value.attainment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attainment_values() {
        assert_eq!(AnswerValue::Yes.attainment(), 100.0);
        assert_eq!(AnswerValue::Partial.attainment(), 50.0);
        assert_eq!(AnswerValue::No.attainment(), 0.0);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" yes ".parse::<AnswerValue>().unwrap(), AnswerValue::Yes);
        assert_eq!("PARTIAL".parse::<AnswerValue>().unwrap(), AnswerValue::Partial);
        assert_eq!("No".parse::<AnswerValue>().unwrap(), AnswerValue::No);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let err = "Maybe".parse::<AnswerValue>().unwrap_err();
        assert!(err.is_invalid_answer());

        let json = r#"{"question_id":"Q1","answer":"Not Sure"}"#;
        assert!(serde_json::from_str::<Answer>(json).is_err());
    }

    #[test]
    fn test_blank_evidence_is_not_evidence() {
        let answer = Answer::new("Q1", AnswerValue::Yes).with_evidence("   ");
        assert!(!answer.has_evidence());
        let answer = Answer::new("Q1", AnswerValue::Yes).with_evidence("https://wiki/test-plan");
        assert!(answer.has_evidence());
        assert!(!Answer::new("Q1", AnswerValue::Yes).has_evidence());
    }

    #[test]
    fn test_answer_wire_layout() {
        let answer = Answer::new("L2_TP_001", AnswerValue::Partial).with_comment("in progress");
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value["answer"], "Partial");
        assert_eq!(value["comment"], "in progress");
        assert!(value.get("evidence_url").is_none());
    }
}
