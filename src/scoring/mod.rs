//! Progression scoring.
//!
//! Turns one assessment's answers into maturity verdicts. The pipeline runs
//! leaves first:
//!
//! 1. answers are normalized to attainment (Yes 100, Partial 50, No 0)
//! 2. practices average their answered questions
//! 3. goals average their practices, process areas average their goals
//! 4. percentages are classified into N/P/L/F bands
//! 5. the achieved level is the highest level reached contiguously from 2
//! 6. readiness for the next level is gated per process area
//! 7. generic goals are evaluated independently of specific goals
//! 8. every non-Yes answer becomes a gap; weakly evidenced F/L ratings
//!    become risk indicators
//!
//! Empty groupings are omitted rather than scored as zero, so "not yet
//! assessed" stays distinguishable from "scored 0" in every output.
//!
//! All stages are pure functions over a [`QuestionCatalog`] and an answer
//! slice; nothing is cached.
//!
//! [`QuestionCatalog`]: crate::catalog::QuestionCatalog

mod band;
mod engine;
mod gaps;
mod generic_goal;
mod goal;
mod maturity;
mod practice;
mod process_area;
mod readiness;
mod thresholds;

pub use band::AchievementBand;
pub use engine::{
    AnswerTally, AreaTally, LevelTally, ProgressionEngine, ProgressionReport, QuestionResponse,
    SCORING_ENGINE_VERSION,
};
pub use gaps::{Gap, GapGrouping, RiskIndicator, RiskSubject};
pub use generic_goal::{GenericGoalLevelSummary, GenericGoalScore, GenericGoalVerdict};
pub use goal::GoalScore;
pub use maturity::{LevelDetermination, LevelStatus};
pub use practice::{PracticeKey, PracticeScore};
pub use process_area::ProcessAreaScore;
pub use readiness::{ReadinessArea, ReadinessResult};
pub use thresholds::{EvidenceCoveragePolicy, ScoringThresholds, ThresholdPreset};

use crate::model::{Answer, Question};

/// An answer paired with the catalog question it answers
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedAnswer<'a> {
    pub question: &'a Question,
    pub answer: &'a Answer,
}

/// Arithmetic mean, `None` for an empty input
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole` as a percentage with one decimal; 0 when `whole` is 0
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round1(part as f64 / whole as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([100.0, 25.0].into_iter()), Some(62.5));
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(0, 0), 0.0);
    }
}
