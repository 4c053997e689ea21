//! The progression scoring engine and its report.

use super::generic_goal::{evaluate_generic_goals, summarize_generic_levels};
use super::gaps::{find_gaps, find_risks};
use super::goal::aggregate_goals;
use super::maturity::determine_level;
use super::practice::aggregate_practices;
use super::process_area::aggregate_process_areas;
use super::readiness::calculate_readiness;
use super::{
    percentage, round1, Gap, GenericGoalLevelSummary, GenericGoalScore, GoalScore,
    LevelDetermination, PracticeScore, ProcessAreaScore, ReadinessResult, ResolvedAnswer,
    RiskIndicator, ScoringThresholds,
};
use crate::catalog::QuestionCatalog;
use crate::model::{Answer, AnswerValue, Assessment, TmmiLevel};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Progression scoring engine version
pub const SCORING_ENGINE_VERSION: &str = "1.0";

/// Answer counts and completion figures for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerTally {
    /// Questions in the catalog
    pub total_questions: usize,
    pub answered: usize,
    pub yes: usize,
    pub partial: usize,
    pub no: usize,
    /// Answered share of the catalog
    pub completion: f64,
    /// Earned credit over the whole catalog, unanswered questions earning nothing
    pub overall_compliance: f64,
    /// Earned credit over answered questions only
    pub answered_compliance: f64,
}

impl AnswerTally {
    pub(crate) fn from_answers(total_questions: usize, answers: &[ResolvedAnswer<'_>]) -> Self {
        let count = |v: AnswerValue| answers.iter().filter(|r| r.answer.value == v).count();
        let yes = count(AnswerValue::Yes);
        let partial = count(AnswerValue::Partial);
        let no = count(AnswerValue::No);
        let answered = answers.len();
        let earned: f64 = answers.iter().map(|r| r.answer.attainment()).sum();
        let credit = |over: usize| {
            if over == 0 {
                0.0
            } else {
                round1(earned / over as f64)
            }
        };

        Self {
            total_questions,
            answered,
            yes,
            partial,
            no,
            completion: percentage(answered, total_questions),
            overall_compliance: credit(total_questions),
            answered_compliance: credit(answered),
        }
    }
}

/// Question-level counts for one maturity level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTally {
    pub level: TmmiLevel,
    #[serde(flatten)]
    pub tally: AnswerTally,
}

/// Question-level counts for one process area, over every question it holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaTally {
    pub level: TmmiLevel,
    pub process_area: String,
    #[serde(flatten)]
    pub tally: AnswerTally,
}

/// Tally each level that has catalog questions, lowest first
fn tally_levels(catalog: &QuestionCatalog, resolved: &[ResolvedAnswer<'_>]) -> Vec<LevelTally> {
    TmmiLevel::ASSESSED
        .iter()
        .filter_map(|&level| {
            let total = catalog.iter().filter(|q| q.level == level).count();
            if total == 0 {
                return None;
            }
            let answers: Vec<ResolvedAnswer<'_>> = resolved
                .iter()
                .filter(|r| r.question.level == level)
                .copied()
                .collect();
            Some(LevelTally {
                level,
                tally: AnswerTally::from_answers(total, &answers),
            })
        })
        .collect()
}

/// Tally each (level, process area) in catalog order
fn tally_areas(catalog: &QuestionCatalog, resolved: &[ResolvedAnswer<'_>]) -> Vec<AreaTally> {
    let mut totals: IndexMap<(TmmiLevel, &str), usize> = IndexMap::new();
    for question in catalog.iter() {
        *totals
            .entry((question.level, question.process_area.as_str()))
            .or_insert(0) += 1;
    }

    totals
        .into_iter()
        .map(|((level, area), total)| {
            let answers: Vec<ResolvedAnswer<'_>> = resolved
                .iter()
                .filter(|r| r.question.level == level && r.question.process_area == area)
                .copied()
                .collect();
            AreaTally {
                level,
                process_area: area.to_string(),
                tally: AnswerTally::from_answers(total, &answers),
            }
        })
        .collect()
}

/// One recorded answer, carried so exports need nothing but the report and
/// the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question_id: String,
    pub answer: AnswerValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl From<&Answer> for QuestionResponse {
    fn from(answer: &Answer) -> Self {
        Self {
            question_id: answer.question_id.clone(),
            answer: answer.value,
            evidence_url: answer.evidence_url.clone(),
            comment: answer.comment.clone(),
        }
    }
}

/// Everything derived from one assessment.
///
/// A value object: it holds no reference to the assessment it came from and
/// is rebuilt from scratch whenever an answer changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ProgressionReport {
    pub engine_version: String,
    pub thresholds: ScoringThresholds,
    pub achieved_level: TmmiLevel,
    pub level: LevelDetermination,
    pub readiness: ReadinessResult,
    pub practices: Vec<PracticeScore>,
    pub goals: Vec<GoalScore>,
    pub process_areas: Vec<ProcessAreaScore>,
    pub generic_goals: Vec<GenericGoalScore>,
    pub generic_goal_levels: Vec<GenericGoalLevelSummary>,
    pub gaps: Vec<Gap>,
    pub risks: Vec<RiskIndicator>,
    /// Evidenced answers over all answers; 0 with no answers
    pub evidence_coverage: f64,
    pub tally: AnswerTally,
    pub level_tallies: Vec<LevelTally>,
    pub area_tallies: Vec<AreaTally>,
    /// Recorded answers in catalog order
    pub responses: Vec<QuestionResponse>,
    /// Answers skipped for referencing unknown questions or repeating one
    pub ignored_answers: usize,
}

impl ProgressionReport {
    #[must_use]
    pub const fn target_level(&self) -> Option<TmmiLevel> {
        self.readiness.target_level()
    }

    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.readiness.is_eligible()
    }

    #[must_use]
    pub fn blocking_areas(&self) -> &[String] {
        self.readiness.blocking()
    }

    /// The recorded answer for a question
    #[must_use]
    pub fn response_for(&self, question_id: &str) -> Option<&QuestionResponse> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }

    /// Scored process areas at one level
    pub fn process_areas_at(&self, level: TmmiLevel) -> impl Iterator<Item = &ProcessAreaScore> {
        self.process_areas.iter().filter(move |a| a.level == level)
    }

    /// Question-level counts for one level
    #[must_use]
    pub fn level_tally(&self, level: TmmiLevel) -> Option<&AnswerTally> {
        self.level_tallies
            .iter()
            .find(|t| t.level == level)
            .map(|t| &t.tally)
    }

    /// Gaps sorted for display: level, then priority, then process area
    #[must_use]
    pub fn sorted_gaps(&self) -> Vec<&Gap> {
        let mut gaps: Vec<&Gap> = self.gaps.iter().collect();
        gaps.sort_by(|a, b| {
            a.level
                .cmp(&b.level)
                .then(a.priority.cmp(&b.priority))
                .then_with(|| a.process_area.cmp(&b.process_area))
                .then_with(|| a.question_id.cmp(&b.question_id))
        });
        gaps
    }
}

/// Turns a catalog and an answer set into a [`ProgressionReport`].
///
/// Holds only immutable thresholds, so one engine may score any number of
/// assessments, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ProgressionEngine {
    thresholds: ScoringThresholds,
}

impl ProgressionEngine {
    #[must_use]
    pub const fn new(thresholds: ScoringThresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &ScoringThresholds {
        &self.thresholds
    }

    /// Score an answer set against a catalog.
    ///
    /// Unknown question ids and repeated answers are skipped with a warning
    /// and counted in `ignored_answers`; the first answer to a question wins.
    pub fn score(&self, catalog: &QuestionCatalog, answers: &[Answer]) -> ProgressionReport {
        let (resolved, ignored_answers) = resolve_answers(catalog, answers);
        let t = &self.thresholds;

        let practices = aggregate_practices(&resolved, t);
        let goals = aggregate_goals(&practices, t);
        let process_areas = aggregate_process_areas(&goals, &practices, t);
        tracing::debug!(
            practices = practices.len(),
            goals = goals.len(),
            process_areas = process_areas.len(),
            "aggregated answers"
        );

        let level = determine_level(catalog, &process_areas, t);
        let readiness = calculate_readiness(level.achieved, catalog, &process_areas, t);
        let generic_goals = evaluate_generic_goals(catalog, &resolved, t);
        let generic_goal_levels = summarize_generic_levels(catalog, &resolved, t);
        let gaps = find_gaps(&resolved, &practices, t);
        let risks = find_risks(&resolved, &practices, &process_areas, t);
        tracing::debug!(
            gaps = gaps.len(),
            risks = risks.len(),
            "analyzed gaps and evidence"
        );

        let evidence_coverage = percentage(
            resolved.iter().filter(|r| r.answer.has_evidence()).count(),
            resolved.len(),
        );

        ProgressionReport {
            engine_version: SCORING_ENGINE_VERSION.to_string(),
            thresholds: *t,
            achieved_level: level.achieved,
            level,
            readiness,
            practices,
            goals,
            process_areas,
            generic_goals,
            generic_goal_levels,
            gaps,
            risks,
            evidence_coverage,
            tally: AnswerTally::from_answers(catalog.len(), &resolved),
            level_tallies: tally_levels(catalog, &resolved),
            area_tallies: tally_areas(catalog, &resolved),
            responses: resolved.iter().map(|r| r.answer.into()).collect(),
            ignored_answers,
        }
    }

    /// Score a stored assessment
    pub fn score_assessment(
        &self,
        catalog: &QuestionCatalog,
        assessment: &Assessment,
    ) -> ProgressionReport {
        tracing::debug!(assessment = %assessment.id, "scoring assessment");
        self.score(catalog, &assessment.answers)
    }

    /// Score independent assessments in parallel, preserving input order
    pub fn score_many(
        &self,
        catalog: &QuestionCatalog,
        assessments: &[Assessment],
    ) -> Vec<ProgressionReport> {
        assessments
            .par_iter()
            .map(|assessment| self.score_assessment(catalog, assessment))
            .collect()
    }
}

/// Pair answers with their questions in catalog order
fn resolve_answers<'a>(
    catalog: &'a QuestionCatalog,
    answers: &'a [Answer],
) -> (Vec<ResolvedAnswer<'a>>, usize) {
    let mut by_id: HashMap<&str, &Answer> = HashMap::with_capacity(answers.len());
    let mut ignored = 0;
    for answer in answers {
        if !catalog.contains(&answer.question_id) {
            tracing::warn!(question = %answer.question_id, "ignoring answer to unknown question");
            ignored += 1;
        } else if by_id.contains_key(answer.question_id.as_str()) {
            tracing::warn!(question = %answer.question_id, "ignoring repeated answer");
            ignored += 1;
        } else {
            by_id.insert(answer.question_id.as_str(), answer);
        }
    }

    let resolved = catalog
        .iter()
        .filter_map(|question| {
            by_id
                .get(question.id.as_str())
                .map(|&answer| ResolvedAnswer { question, answer })
        })
        .collect();
    (resolved, ignored)
}
