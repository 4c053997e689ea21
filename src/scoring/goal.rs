//! Specific-goal aggregation.

use super::{mean, AchievementBand, PracticeScore, ScoringThresholds};
use crate::model::TmmiLevel;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attainment of one specific goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalScore {
    pub level: TmmiLevel,
    pub process_area: String,
    pub specific_goal: String,
    /// Mean of member practice attainments, each practice weighted equally
    pub attainment: f64,
    pub band: AchievementBand,
    /// Member practice ids in catalog order
    pub practices: Vec<String>,
}

/// Roll practice scores up into goals. Only scored practices contribute, so
/// a goal without any is never emitted.
pub(crate) fn aggregate_goals(
    practices: &[PracticeScore],
    thresholds: &ScoringThresholds,
) -> Vec<GoalScore> {
    let mut groups: IndexMap<(TmmiLevel, &str, &str), Vec<&PracticeScore>> = IndexMap::new();
    for practice in practices {
        let key = (
            practice.key.level,
            practice.key.process_area.as_str(),
            practice.key.specific_goal.as_str(),
        );
        groups.entry(key).or_default().push(practice);
    }

    groups
        .into_iter()
        .filter_map(|((level, process_area, specific_goal), members)| {
            let attainment = mean(members.iter().map(|p| p.attainment))?;
            Some(GoalScore {
                level,
                process_area: process_area.to_string(),
                specific_goal: specific_goal.to_string(),
                attainment,
                band: AchievementBand::classify(attainment, thresholds),
                practices: members
                    .iter()
                    .map(|p| p.key.specific_practice.clone())
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::PracticeKey;

    fn practice(sg: &str, sp: &str, attainment: f64, answered: usize) -> PracticeScore {
        PracticeScore {
            key: PracticeKey {
                level: TmmiLevel::MANAGED,
                process_area: "Test Planning".to_string(),
                specific_goal: sg.to_string(),
                specific_practice: sp.to_string(),
            },
            practice_id: None,
            attainment,
            band: AchievementBand::classify(attainment, &ScoringThresholds::default()),
            evidence_coverage: 0.0,
            answered,
            evidenced: 0,
            question_ids: Vec::new(),
        }
    }

    #[test]
    fn test_practices_weighted_equally() {
        // A practice with many answers does not outweigh one with a single answer
        let practices = [
            practice("SG1", "SP1.1", 100.0, 10),
            practice("SG1", "SP1.2", 0.0, 1),
        ];
        let goals = aggregate_goals(&practices, &ScoringThresholds::default());
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].attainment, 50.0);
        assert_eq!(goals[0].practices, ["SP1.1", "SP1.2"]);
    }

    #[test]
    fn test_goals_grouped_by_id() {
        let practices = [
            practice("SG1", "SP1.1", 100.0, 1),
            practice("SG2", "SP2.1", 50.0, 1),
            practice("SG2", "SP2.2", 0.0, 1),
        ];
        let goals = aggregate_goals(&practices, &ScoringThresholds::default());
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[1].specific_goal, "SG2");
        assert_eq!(goals[1].attainment, 25.0);
        assert_eq!(goals[1].band, AchievementBand::P);
    }
}
