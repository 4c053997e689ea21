//! Generic-goal compliance.

use super::{mean, percentage, ResolvedAnswer, ScoringThresholds};
use crate::catalog::QuestionCatalog;
use crate::model::TmmiLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Three-state verdict; `NotAssessed` is never folded into `NotMet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenericGoalVerdict {
    Met,
    NotMet,
    NotAssessed,
}

impl GenericGoalVerdict {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Met => "Met",
            Self::NotMet => "Not Met",
            Self::NotAssessed => "Not Assessed",
        }
    }
}

impl std::fmt::Display for GenericGoalVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compliance for one generic goal at one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericGoalScore {
    pub goal_id: String,
    pub level: TmmiLevel,
    /// Mean attainment of answered mapped questions; `None` when none answered
    pub attainment: Option<f64>,
    pub verdict: GenericGoalVerdict,
    pub evidence_coverage: Option<f64>,
    pub answered: usize,
    /// Catalog questions mapped to the goal at this level
    pub questions: usize,
}

/// Compliance across every generic-goal question of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericGoalLevelSummary {
    pub level: TmmiLevel,
    /// e.g. `GG2 - Managed`
    pub name: String,
    pub attainment: Option<f64>,
    pub verdict: GenericGoalVerdict,
    pub answered: usize,
}

fn verdict(attainment: Option<f64>, thresholds: &ScoringThresholds) -> GenericGoalVerdict {
    match attainment {
        None => GenericGoalVerdict::NotAssessed,
        Some(value) if value >= thresholds.generic_goal_met => GenericGoalVerdict::Met,
        Some(_) => GenericGoalVerdict::NotMet,
    }
}

/// Score each (goal, level) pair the catalog declares, in catalog order
pub(crate) fn evaluate_generic_goals(
    catalog: &QuestionCatalog,
    answers: &[ResolvedAnswer<'_>],
    thresholds: &ScoringThresholds,
) -> Vec<GenericGoalScore> {
    catalog
        .generic_goals()
        .map(|key| {
            let maps_here = |level: TmmiLevel, goals: &[String]| {
                level == key.level && goals.iter().any(|g| *g == key.goal_id)
            };
            let questions = catalog
                .iter()
                .filter(|q| maps_here(q.level, q.mapping.generic_goals()))
                .count();
            let mapped: Vec<&ResolvedAnswer<'_>> = answers
                .iter()
                .filter(|r| maps_here(r.question.level, r.question.mapping.generic_goals()))
                .collect();

            let attainment = mean(mapped.iter().map(|r| r.answer.attainment()));
            let evidence_coverage = attainment.map(|_| {
                percentage(
                    mapped.iter().filter(|r| r.answer.has_evidence()).count(),
                    mapped.len(),
                )
            });
            GenericGoalScore {
                goal_id: key.goal_id.clone(),
                level: key.level,
                attainment,
                verdict: verdict(attainment, thresholds),
                evidence_coverage,
                answered: mapped.len(),
                questions,
            }
        })
        .collect()
}

/// Per-level roll-up over every answered question carrying a generic goal.
/// Only levels with generic goals in the catalog are reported.
pub(crate) fn summarize_generic_levels(
    catalog: &QuestionCatalog,
    answers: &[ResolvedAnswer<'_>],
    thresholds: &ScoringThresholds,
) -> Vec<GenericGoalLevelSummary> {
    let declared: HashSet<TmmiLevel> = catalog.generic_goals().map(|k| k.level).collect();

    TmmiLevel::ASSESSED
        .iter()
        .filter(|level| declared.contains(level))
        .map(|&level| {
            let values: Vec<f64> = answers
                .iter()
                .filter(|r| {
                    r.question.level == level && !r.question.mapping.generic_goals().is_empty()
                })
                .map(|r| r.answer.attainment())
                .collect();
            let attainment = mean(values.iter().copied());
            GenericGoalLevelSummary {
                level,
                name: level.generic_goal_name().to_string(),
                attainment,
                verdict: verdict(attainment, thresholds),
                answered: values.len(),
            }
        })
        .collect()
}
