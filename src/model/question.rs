//! Catalog questions and their framework mapping.

use super::TmmiLevel;
use crate::error::{CatalogErrorKind, TrackerError};
use serde::{Deserialize, Serialize};

/// Declared importance of a question, used unchanged as gap priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parse an importance label, ignoring case and surrounding whitespace
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a question sits in the TMMi framework.
///
/// Only `Practice` questions feed the practice/goal/process-area roll-up.
/// Generic goals are evaluated independently, so both `Practice` and
/// `GenericOnly` questions can feed generic-goal compliance. `Unmapped`
/// questions are visible only in gap listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameworkMapping {
    Practice {
        specific_goal: String,
        specific_practice: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        practice_id: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        generic_goals: Vec<String>,
    },
    GenericOnly {
        generic_goals: Vec<String>,
    },
    Unmapped,
}

impl FrameworkMapping {
    /// Specific goal id, when practice-mapped
    #[must_use]
    pub fn specific_goal(&self) -> Option<&str> {
        match self {
            Self::Practice { specific_goal, .. } => Some(specific_goal),
            _ => None,
        }
    }

    /// Specific practice id, when practice-mapped
    #[must_use]
    pub fn specific_practice(&self) -> Option<&str> {
        match self {
            Self::Practice {
                specific_practice, ..
            } => Some(specific_practice),
            _ => None,
        }
    }

    /// Optional external practice identifier
    #[must_use]
    pub fn practice_id(&self) -> Option<&str> {
        match self {
            Self::Practice { practice_id, .. } => practice_id.as_deref(),
            _ => None,
        }
    }

    /// Generic goal ids the question contributes to
    #[must_use]
    pub fn generic_goals(&self) -> &[String] {
        match self {
            Self::Practice { generic_goals, .. } | Self::GenericOnly { generic_goals } => {
                generic_goals
            }
            Self::Unmapped => &[],
        }
    }

    #[must_use]
    pub const fn is_practice(&self) -> bool {
        matches!(self, Self::Practice { .. })
    }

    #[must_use]
    pub const fn is_unmapped(&self) -> bool {
        matches!(self, Self::Unmapped)
    }
}

/// An immutable catalog question.
///
/// Serialized in the flat record layout of the question catalog file
/// (`specific_goal`, `specific_practice`, `generic_goal`, `practice_id` as
/// optional strings); the mapping is resolved into [`FrameworkMapping`] on
/// load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    pub id: String,
    pub level: TmmiLevel,
    pub process_area: String,
    pub question: String,
    pub importance: Importance,
    pub recommended_activity: String,
    pub reference_url: String,
    pub mapping: FrameworkMapping,
}

impl Question {
    /// Create an unmapped question
    pub fn new(
        id: impl Into<String>,
        level: TmmiLevel,
        process_area: impl Into<String>,
        question: impl Into<String>,
        importance: Importance,
    ) -> Self {
        Self {
            id: id.into(),
            level,
            process_area: process_area.into(),
            question: question.into(),
            importance,
            recommended_activity: String::new(),
            reference_url: String::new(),
            mapping: FrameworkMapping::Unmapped,
        }
    }

    /// Map the question onto a specific goal and practice
    #[must_use]
    pub fn with_practice(
        mut self,
        specific_goal: impl Into<String>,
        specific_practice: impl Into<String>,
    ) -> Self {
        let generic_goals = self.mapping.generic_goals().to_vec();
        self.mapping = FrameworkMapping::Practice {
            specific_goal: specific_goal.into(),
            specific_practice: specific_practice.into(),
            practice_id: None,
            generic_goals,
        };
        self
    }

    /// Attach generic goal ids, keeping any practice mapping
    #[must_use]
    pub fn with_generic_goals<I, S>(mut self, goals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let goals: Vec<String> = goals.into_iter().map(Into::into).collect();
        self.mapping = match self.mapping {
            FrameworkMapping::Practice {
                specific_goal,
                specific_practice,
                practice_id,
                ..
            } => FrameworkMapping::Practice {
                specific_goal,
                specific_practice,
                practice_id,
                generic_goals: goals,
            },
            FrameworkMapping::GenericOnly { .. } | FrameworkMapping::Unmapped => {
                if goals.is_empty() {
                    FrameworkMapping::Unmapped
                } else {
                    FrameworkMapping::GenericOnly {
                        generic_goals: goals,
                    }
                }
            }
        };
        self
    }

    #[must_use]
    pub fn with_recommended_activity(mut self, activity: impl Into<String>) -> Self {
        self.recommended_activity = activity.into();
        self
    }

    #[must_use]
    pub fn with_reference_url(mut self, url: impl Into<String>) -> Self {
        self.reference_url = url.into();
        self
    }
}

/// Flat on-disk layout of a catalog question
#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuestionRecord {
    id: String,
    level: u8,
    process_area: String,
    question: String,
    importance: String,
    #[serde(default)]
    recommended_activity: String,
    #[serde(default)]
    reference_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    specific_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    specific_practice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    generic_goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    practice_id: Option<String>,
}

/// Treat blank strings as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated generic goal list (`"GG2.1, GG2.2"`)
fn split_generic_goals(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl TryFrom<QuestionRecord> for Question {
    type Error = TrackerError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let level = TmmiLevel::new(record.level)
            .filter(|l| l.is_assessed())
            .ok_or_else(|| {
                TrackerError::catalog(
                    "validating question level",
                    CatalogErrorKind::InvalidLevel {
                        question_id: record.id.clone(),
                        level: record.level,
                    },
                )
            })?;

        let importance = Importance::parse(&record.importance).ok_or_else(|| {
            TrackerError::catalog(
                "validating question importance",
                CatalogErrorKind::InvalidImportance {
                    question_id: record.id.clone(),
                    value: record.importance.clone(),
                },
            )
        })?;

        let generic_goals = split_generic_goals(record.generic_goal.as_deref());
        let mapping = match (
            non_blank(record.specific_goal),
            non_blank(record.specific_practice),
        ) {
            (Some(specific_goal), Some(specific_practice)) => FrameworkMapping::Practice {
                specific_goal,
                specific_practice,
                practice_id: non_blank(record.practice_id),
                generic_goals,
            },
            (None, None) if generic_goals.is_empty() => FrameworkMapping::Unmapped,
            (None, None) => FrameworkMapping::GenericOnly { generic_goals },
            _ => {
                return Err(TrackerError::catalog(
                    "resolving framework mapping",
                    CatalogErrorKind::IncompleteMapping {
                        question_id: record.id,
                    },
                ))
            }
        };

        Ok(Self {
            id: record.id,
            level,
            process_area: record.process_area,
            question: record.question,
            importance,
            recommended_activity: record.recommended_activity,
            reference_url: record.reference_url,
            mapping,
        })
    }
}

impl From<Question> for QuestionRecord {
    fn from(q: Question) -> Self {
        let generic_goal = if q.mapping.generic_goals().is_empty() {
            None
        } else {
            Some(q.mapping.generic_goals().join(", "))
        };
        let (specific_goal, specific_practice, practice_id) = match q.mapping {
            FrameworkMapping::Practice {
                specific_goal,
                specific_practice,
                practice_id,
                ..
            } => (Some(specific_goal), Some(specific_practice), practice_id),
            FrameworkMapping::GenericOnly { .. } | FrameworkMapping::Unmapped => {
                (None, None, None)
            }
        };

        Self {
            id: q.id,
            level: q.level.value(),
            process_area: q.process_area,
            question: q.question,
            importance: q.importance.as_str().to_string(),
            recommended_activity: q.recommended_activity,
            reference_url: q.reference_url,
            specific_goal,
            specific_practice,
            generic_goal,
            practice_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_with_practice_mapping() {
        let json = r#"{
            "id": "SP1_001",
            "level": 2,
            "process_area": "Test Planning",
            "question": "Is a test plan established?",
            "importance": "High",
            "recommended_activity": "Activity 1",
            "reference_url": "http://example.com",
            "specific_practice": "SP2.1.1",
            "specific_goal": "SG2.1",
            "generic_goal": "GG2.1, GG2.2"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.mapping.specific_goal(), Some("SG2.1"));
        assert_eq!(q.mapping.specific_practice(), Some("SP2.1.1"));
        assert_eq!(q.mapping.generic_goals(), ["GG2.1", "GG2.2"]);
        assert_eq!(q.importance, Importance::High);
    }

    #[test]
    fn test_record_without_mapping_is_unmapped() {
        let json = r#"{"id":"L2_TP_001","level":2,"process_area":"Test Planning",
            "question":"q","importance":"medium","specific_goal":"  "}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(q.mapping.is_unmapped());
        assert_eq!(q.importance, Importance::Medium);
    }

    #[test]
    fn test_generic_only_mapping() {
        let json = r#"{"id":"GG_1","level":3,"process_area":"Test Organization",
            "question":"q","importance":"Low","generic_goal":"GG3.1"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(
            q.mapping,
            FrameworkMapping::GenericOnly {
                generic_goals: vec!["GG3.1".to_string()]
            }
        );
    }

    #[test]
    fn test_incomplete_mapping_rejected() {
        let json = r#"{"id":"X","level":2,"process_area":"Test Planning",
            "question":"q","importance":"High","specific_practice":"SP2.1.1"}"#;
        let err = serde_json::from_str::<Question>(json).unwrap_err();
        assert!(err.to_string().contains("question"), "unexpected: {err}");
    }

    #[test]
    fn test_level_one_and_bad_importance_rejected() {
        let level_one = r#"{"id":"X","level":1,"process_area":"A","question":"q","importance":"High"}"#;
        assert!(serde_json::from_str::<Question>(level_one).is_err());

        let bad_importance =
            r#"{"id":"X","level":2,"process_area":"A","question":"q","importance":"Urgent"}"#;
        assert!(serde_json::from_str::<Question>(bad_importance).is_err());
    }

    #[test]
    fn test_serializes_back_to_flat_record() {
        let q = Question::new("Q1", TmmiLevel::MANAGED, "Test Planning", "q", Importance::Low)
            .with_practice("SG1", "SP1.1")
            .with_generic_goals(["GG2.1", "GG2.2"]);
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["specific_goal"], "SG1");
        assert_eq!(value["generic_goal"], "GG2.1, GG2.2");
        assert_eq!(value["importance"], "Low");

        let back: Question = serde_json::from_value(value).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn test_importance_orders_high_first() {
        assert!(Importance::High < Importance::Medium);
        assert!(Importance::Medium < Importance::Low);
    }
}
