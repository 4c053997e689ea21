//! Process-area aggregation.

use super::{
    mean, percentage, round1, AchievementBand, EvidenceCoveragePolicy, GoalScore, PracticeScore,
    ScoringThresholds,
};
use crate::model::TmmiLevel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attainment of one process area at one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessAreaScore {
    pub level: TmmiLevel,
    pub process_area: String,
    /// Mean of member goal attainments, each goal weighted equally
    pub attainment: f64,
    pub band: AchievementBand,
    /// Evidence coverage under the configured policy, one decimal
    pub evidence_coverage: f64,
    /// Member goal ids in catalog order
    pub goals: Vec<String>,
    /// Answered practice-mapped questions in the area
    pub answered: usize,
}

impl ProcessAreaScore {
    /// Whether this score belongs to the given area and level
    #[must_use]
    pub fn is(&self, level: TmmiLevel, process_area: &str) -> bool {
        self.level == level && self.process_area == process_area
    }
}

/// Roll goal scores up into process areas.
///
/// Areas without scored goals are omitted, never reported as zero.
pub(crate) fn aggregate_process_areas(
    goals: &[GoalScore],
    practices: &[PracticeScore],
    thresholds: &ScoringThresholds,
) -> Vec<ProcessAreaScore> {
    let mut groups: IndexMap<(TmmiLevel, &str), Vec<&GoalScore>> = IndexMap::new();
    for goal in goals {
        groups
            .entry((goal.level, goal.process_area.as_str()))
            .or_default()
            .push(goal);
    }

    groups
        .into_iter()
        .filter_map(|((level, process_area), members)| {
            let attainment = mean(members.iter().map(|g| g.attainment))?;
            let area_practices: Vec<&PracticeScore> = practices
                .iter()
                .filter(|p| p.key.level == level && p.key.process_area == process_area)
                .collect();
            let answered: usize = area_practices.iter().map(|p| p.answered).sum();
            let evidence_coverage = match thresholds.area_evidence_policy {
                EvidenceCoveragePolicy::PracticeMean => round1(
                    mean(area_practices.iter().map(|p| p.evidence_coverage)).unwrap_or(0.0),
                ),
                EvidenceCoveragePolicy::AnswerWeighted => percentage(
                    area_practices.iter().map(|p| p.evidenced).sum(),
                    answered,
                ),
            };
            Some(ProcessAreaScore {
                level,
                process_area: process_area.to_string(),
                attainment,
                band: AchievementBand::classify(attainment, thresholds),
                evidence_coverage,
                goals: members.iter().map(|g| g.specific_goal.clone()).collect(),
                answered,
            })
        })
        .collect()
}
