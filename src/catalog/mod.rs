//! The TMMi question catalog.
//!
//! The catalog is loaded once per scoring run and handed to the engine as
//! read-only input. Building it validates question ids and precomputes the
//! lookups the engine needs:
//!
//! - questions by id
//! - process areas defined at each level (areas with at least one
//!   practice-mapped question, in catalog order)
//! - generic goals declared at each level
//!
//! # Example
//!
//! ```ignore
//! use tmmi_tracker::catalog::load_catalog;
//!
//! let catalog = load_catalog(Path::new("data/tmmi_questions.json"))?;
//! for area in catalog.process_areas(TmmiLevel::MANAGED) {
//!     println!("{}", area.process_area);
//! }
//! ```

mod loader;

pub use loader::{load_catalog, parse_catalog_str, CatalogFormat};

use crate::error::{AssessmentErrorKind, CatalogErrorKind, Result, TrackerError};
use crate::model::{Answer, FrameworkMapping, Question, TmmiLevel};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A process area at a given level
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessAreaKey {
    pub level: TmmiLevel,
    pub process_area: String,
}

impl ProcessAreaKey {
    pub fn new(level: TmmiLevel, process_area: impl Into<String>) -> Self {
        Self {
            level,
            process_area: process_area.into(),
        }
    }
}

impl std::fmt::Display for ProcessAreaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (level {})", self.process_area, self.level)
    }
}

/// A generic goal at a given level
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GenericGoalKey {
    pub level: TmmiLevel,
    pub goal_id: String,
}

/// Counts describing a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total_questions: usize,
    pub practice_mapped: usize,
    pub generic_only: usize,
    pub unmapped: usize,
    /// Question count per level, lowest level first
    pub questions_per_level: Vec<(TmmiLevel, usize)>,
    pub process_areas: usize,
    pub generic_goals: usize,
}

/// Validated, indexed list of catalog questions
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
    process_areas: IndexSet<ProcessAreaKey>,
    generic_goals: IndexSet<GenericGoalKey>,
}

impl QuestionCatalog {
    /// Build a catalog, rejecting duplicate question ids
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(questions.len());
        let mut process_areas = IndexSet::new();
        let mut generic_goals = IndexSet::new();

        for (idx, question) in questions.iter().enumerate() {
            if by_id.insert(question.id.clone(), idx).is_some() {
                return Err(TrackerError::catalog(
                    "building question catalog",
                    CatalogErrorKind::DuplicateQuestion(question.id.clone()),
                ));
            }
            if question.mapping.is_practice() {
                process_areas.insert(ProcessAreaKey::new(
                    question.level,
                    question.process_area.clone(),
                ));
            }
            for goal_id in question.mapping.generic_goals() {
                generic_goals.insert(GenericGoalKey {
                    level: question.level,
                    goal_id: goal_id.clone(),
                });
            }
        }

        Ok(Self {
            questions,
            by_id,
            process_areas,
            generic_goals,
        })
    }

    /// Look up a question by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&idx| &self.questions[idx])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All questions in catalog order
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct levels carrying questions, lowest first
    #[must_use]
    pub fn levels(&self) -> Vec<TmmiLevel> {
        let mut levels: Vec<TmmiLevel> = self
            .questions
            .iter()
            .map(|q| q.level)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        levels.sort_unstable();
        levels
    }

    /// Process areas defined for a level, in catalog order
    pub fn process_areas(&self, level: TmmiLevel) -> impl Iterator<Item = &ProcessAreaKey> {
        self.process_areas.iter().filter(move |k| k.level == level)
    }

    /// Every defined process area, in catalog order
    pub fn all_process_areas(&self) -> impl Iterator<Item = &ProcessAreaKey> {
        self.process_areas.iter()
    }

    /// Generic goals declared anywhere in the catalog, in catalog order
    pub fn generic_goals(&self) -> impl Iterator<Item = &GenericGoalKey> {
        self.generic_goals.iter()
    }

    /// Every problem with a set of answers: unknown question ids and
    /// questions answered more than once
    #[must_use]
    pub fn check_answers(&self, answers: &[Answer]) -> Vec<TrackerError> {
        let mut seen = HashSet::new();
        let mut problems = Vec::new();
        for answer in answers {
            if !self.contains(&answer.question_id) {
                problems.push(TrackerError::assessment(
                    "checking answers against catalog",
                    AssessmentErrorKind::UnknownQuestion(answer.question_id.clone()),
                ));
            } else if !seen.insert(answer.question_id.as_str()) {
                problems.push(TrackerError::assessment(
                    "checking answers against catalog",
                    AssessmentErrorKind::DuplicateAnswer(answer.question_id.clone()),
                ));
            }
        }
        problems
    }

    /// Fail on the first answer that breaks the one-answer-per-known-question rule
    pub fn validate_answers(&self, answers: &[Answer]) -> Result<()> {
        match self.check_answers(answers).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Count questions by mapping kind and level
    pub fn summary(&self) -> CatalogSummary {
        let mut summary = CatalogSummary {
            total_questions: self.questions.len(),
            process_areas: self.process_areas.len(),
            generic_goals: self.generic_goals.len(),
            ..CatalogSummary::default()
        };
        let mut per_level: IndexMap<TmmiLevel, usize> = IndexMap::new();
        for q in &self.questions {
            match q.mapping {
                FrameworkMapping::Practice { .. } => summary.practice_mapped += 1,
                FrameworkMapping::GenericOnly { .. } => summary.generic_only += 1,
                FrameworkMapping::Unmapped => summary.unmapped += 1,
            }
            *per_level.entry(q.level).or_default() += 1;
        }
        per_level.sort_keys();
        summary.questions_per_level = per_level.into_iter().collect();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerValue, Importance};

    fn sample() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            Question::new("TP1", TmmiLevel::MANAGED, "Test Planning", "q", Importance::High)
                .with_practice("SG1", "SP1.1")
                .with_generic_goals(["GG2.1"]),
            Question::new("TP2", TmmiLevel::MANAGED, "Test Planning", "q", Importance::Low),
            Question::new("TE1", TmmiLevel::MANAGED, "Test Environment", "q", Importance::Low),
            Question::new("TO1", TmmiLevel::DEFINED, "Test Organization", "q", Importance::Medium)
                .with_practice("SG1", "SP1.1"),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let q = Question::new("X", TmmiLevel::MANAGED, "A", "q", Importance::High);
        let err = QuestionCatalog::new(vec![q.clone(), q]).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Catalog {
                source: CatalogErrorKind::DuplicateQuestion(_),
                ..
            }
        ));
    }

    #[test]
    fn test_defined_process_areas_require_practice_mapping() {
        let catalog = sample();
        let level2: Vec<_> = catalog
            .process_areas(TmmiLevel::MANAGED)
            .map(|k| k.process_area.as_str())
            .collect();
        // Test Environment only has an unmapped question
        assert_eq!(level2, ["Test Planning"]);
        assert_eq!(catalog.process_areas(TmmiLevel::DEFINED).count(), 1);
        assert_eq!(catalog.process_areas(TmmiLevel::MEASURED).count(), 0);
    }

    #[test]
    fn test_levels_and_generic_goals() {
        let catalog = sample();
        assert_eq!(catalog.levels(), vec![TmmiLevel::MANAGED, TmmiLevel::DEFINED]);
        let goals: Vec<_> = catalog.generic_goals().collect();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].goal_id, "GG2.1");
    }

    #[test]
    fn test_check_answers_reports_unknown_and_duplicates() {
        let catalog = sample();
        let answers = vec![
            Answer::new("TP1", AnswerValue::Yes),
            Answer::new("TP1", AnswerValue::No),
            Answer::new("NOPE", AnswerValue::Yes),
        ];
        let problems = catalog.check_answers(&answers);
        assert_eq!(problems.len(), 2);
        assert!(catalog.validate_answers(&answers).is_err());
        assert!(catalog.validate_answers(&answers[..1]).is_ok());
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert_eq!(summary.total_questions, 4);
        assert_eq!(summary.practice_mapped, 2);
        assert_eq!(summary.unmapped, 2);
        assert_eq!(
            summary.questions_per_level,
            vec![(TmmiLevel::MANAGED, 3), (TmmiLevel::DEFINED, 1)]
        );
    }
}
