//! Specific-practice aggregation.

use super::{mean, percentage, AchievementBand, ResolvedAnswer, ScoringThresholds};
use crate::model::{FrameworkMapping, TmmiLevel};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identity of a specific practice within its process area and level
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PracticeKey {
    pub level: TmmiLevel,
    pub process_area: String,
    pub specific_goal: String,
    pub specific_practice: String,
}

/// Attainment of one specific practice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeScore {
    #[serde(flatten)]
    pub key: PracticeKey,
    /// External practice identifier, when the catalog declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practice_id: Option<String>,
    /// Mean attainment of answered questions (0-100)
    pub attainment: f64,
    pub band: AchievementBand,
    /// Share of answers with evidence, one decimal
    pub evidence_coverage: f64,
    pub answered: usize,
    pub evidenced: usize,
    /// Answered questions feeding this practice, in catalog order
    pub question_ids: Vec<String>,
}

/// Score every practice with at least one answered question.
///
/// Practices with no answers are omitted. Order follows the first question
/// of each practice in the catalog.
pub(crate) fn aggregate_practices(
    answers: &[ResolvedAnswer<'_>],
    thresholds: &ScoringThresholds,
) -> Vec<PracticeScore> {
    let mut groups: IndexMap<PracticeKey, (Option<&str>, Vec<&ResolvedAnswer<'_>>)> =
        IndexMap::new();

    for resolved in answers {
        let question = resolved.question;
        if let FrameworkMapping::Practice {
            specific_goal,
            specific_practice,
            practice_id,
            ..
        } = &question.mapping
        {
            let key = PracticeKey {
                level: question.level,
                process_area: question.process_area.clone(),
                specific_goal: specific_goal.clone(),
                specific_practice: specific_practice.clone(),
            };
            let entry = groups.entry(key).or_insert((None, Vec::new()));
            if entry.0.is_none() {
                entry.0 = practice_id.as_deref();
            }
            entry.1.push(resolved);
        }
    }

    groups
        .into_iter()
        .filter_map(|(key, (practice_id, members))| {
            let attainment = mean(members.iter().map(|r| r.answer.attainment()))?;
            let evidenced = members.iter().filter(|r| r.answer.has_evidence()).count();
            Some(PracticeScore {
                key,
                practice_id: practice_id.map(ToString::to_string),
                attainment,
                band: AchievementBand::classify(attainment, thresholds),
                evidence_coverage: percentage(evidenced, members.len()),
                answered: members.len(),
                evidenced,
                question_ids: members
                    .iter()
                    .map(|r| r.question.id.clone())
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, AnswerValue, Importance, Question};

    fn question(id: &str, area: &str, sg: &str, sp: &str) -> Question {
        Question::new(id, TmmiLevel::MANAGED, area, "q", Importance::Medium).with_practice(sg, sp)
    }

    #[test]
    fn test_mean_and_evidence_per_practice() {
        let questions = [
            question("A", "Test Planning", "SG1", "SP1.1"),
            question("B", "Test Planning", "SG1", "SP1.1"),
            question("C", "Test Planning", "SG1", "SP1.1"),
        ];
        let answers = [
            Answer::new("A", AnswerValue::Yes).with_evidence("https://e/1"),
            Answer::new("B", AnswerValue::Partial),
            Answer::new("C", AnswerValue::No),
        ];
        let resolved: Vec<_> = questions
            .iter()
            .zip(&answers)
            .map(|(question, answer)| ResolvedAnswer { question, answer })
            .collect();

        let practices = aggregate_practices(&resolved, &ScoringThresholds::default());
        assert_eq!(practices.len(), 1);
        let p = &practices[0];
        assert_eq!(p.attainment, 50.0);
        assert_eq!(p.band, AchievementBand::L);
        assert_eq!(p.evidence_coverage, 33.3);
        assert_eq!(p.question_ids, ["A", "B", "C"]);
    }

    #[test]
    fn test_same_short_ids_in_different_areas_stay_apart() {
        let questions = [
            question("A", "Test Planning", "SG1", "SP1.1"),
            question("B", "Test Design", "SG1", "SP1.1"),
        ];
        let answers = [
            Answer::new("A", AnswerValue::Yes),
            Answer::new("B", AnswerValue::No),
        ];
        let resolved: Vec<_> = questions
            .iter()
            .zip(&answers)
            .map(|(question, answer)| ResolvedAnswer { question, answer })
            .collect();

        let practices = aggregate_practices(&resolved, &ScoringThresholds::default());
        assert_eq!(practices.len(), 2);
        assert_eq!(practices[0].attainment, 100.0);
        assert_eq!(practices[1].attainment, 0.0);
    }

    #[test]
    fn test_unmapped_questions_are_excluded() {
        let q = Question::new("U", TmmiLevel::MANAGED, "Test Planning", "q", Importance::Low);
        let a = Answer::new("U", AnswerValue::Yes);
        let resolved = [ResolvedAnswer {
            question: &q,
            answer: &a,
        }];
        assert!(aggregate_practices(&resolved, &ScoringThresholds::default()).is_empty());
    }
}
