//! Gap extraction and evidence risk indicators.

use super::{AchievementBand, PracticeScore, ProcessAreaScore, ResolvedAnswer, ScoringThresholds};
use crate::model::{AnswerValue, FrameworkMapping, Importance, Question, TmmiLevel};
use serde::{Deserialize, Serialize};

/// How a gap is grouped for display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapGrouping {
    Practice {
        specific_goal: String,
        specific_practice: String,
    },
    /// Fallback for questions without a practice mapping
    Question { question_id: String },
}

/// A non-Yes answer with its remediation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub question_id: String,
    pub level: TmmiLevel,
    pub process_area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_practice: Option<String>,
    pub grouping: GapGrouping,
    pub answer: AnswerValue,
    /// The question's declared importance
    pub priority: Importance,
    /// Attainment of the practice when mapped, else of the answer
    pub attainment: f64,
    pub band: AchievementBand,
    pub recommended_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    pub question: String,
    pub recommended_activity: String,
    pub reference_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// What a risk indicator points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskSubject {
    Question {
        question_id: String,
    },
    Practice {
        level: TmmiLevel,
        process_area: String,
        specific_goal: String,
        specific_practice: String,
    },
    ProcessArea {
        level: TmmiLevel,
        process_area: String,
    },
}

impl std::fmt::Display for RiskSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Question { question_id } => write!(f, "question {question_id}"),
            Self::Practice {
                process_area,
                specific_goal,
                specific_practice,
                ..
            } => write!(f, "{process_area} {specific_goal}/{specific_practice}"),
            Self::ProcessArea {
                level,
                process_area,
            } => write!(f, "{process_area} (level {level})"),
        }
    }
}

/// A high rating with too little evidence behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskIndicator {
    pub subject: RiskSubject,
    pub band: AchievementBand,
    pub attainment: f64,
    pub evidence_coverage: f64,
}

fn recommended_action(
    question: &Question,
    value: AnswerValue,
    attainment: f64,
    thresholds: &ScoringThresholds,
) -> String {
    let activity = if question.recommended_activity.trim().is_empty() {
        question.question.as_str()
    } else {
        question.recommended_activity.as_str()
    };
    match (value, question.importance) {
        (AnswerValue::No, Importance::High) => format!(
            "Implement {activity} - Critical for level {}",
            question.level
        ),
        (AnswerValue::No, _) => format!("Establish {activity}"),
        (AnswerValue::Partial, _) if attainment < thresholds.largely_achieved => {
            format!("Strengthen implementation of {activity}")
        }
        _ => format!("Complete implementation of {activity}"),
    }
}

fn practice_for<'p>(
    practices: &'p [PracticeScore],
    question: &Question,
) -> Option<&'p PracticeScore> {
    practices
        .iter()
        .find(|p| p.question_ids.iter().any(|id| *id == question.id))
}

/// One gap per answered No/Partial question
pub(crate) fn find_gaps(
    answers: &[ResolvedAnswer<'_>],
    practices: &[PracticeScore],
    thresholds: &ScoringThresholds,
) -> Vec<Gap> {
    answers
        .iter()
        .filter(|r| r.answer.value.is_gap())
        .map(|r| {
            let question = r.question;
            let (attainment, band) = match practice_for(practices, question) {
                Some(practice) => (practice.attainment, practice.band),
                None => {
                    let own = r.answer.attainment();
                    (own, AchievementBand::classify(own, thresholds))
                }
            };
            let grouping = match &question.mapping {
                FrameworkMapping::Practice {
                    specific_goal,
                    specific_practice,
                    ..
                } => GapGrouping::Practice {
                    specific_goal: specific_goal.clone(),
                    specific_practice: specific_practice.clone(),
                },
                _ => GapGrouping::Question {
                    question_id: question.id.clone(),
                },
            };
            Gap {
                question_id: question.id.clone(),
                level: question.level,
                process_area: question.process_area.clone(),
                specific_goal: question.mapping.specific_goal().map(ToString::to_string),
                specific_practice: question
                    .mapping
                    .specific_practice()
                    .map(ToString::to_string),
                grouping,
                answer: r.answer.value,
                priority: question.importance,
                attainment,
                band,
                recommended_action: recommended_action(
                    question,
                    r.answer.value,
                    attainment,
                    thresholds,
                ),
                evidence_url: r.answer.evidence_url.clone(),
                question: question.question.clone(),
                recommended_activity: question.recommended_activity.clone(),
                reference_url: question.reference_url.clone(),
                comment: r.answer.comment.clone(),
            }
        })
        .collect()
}

/// Flag questions, practices, and process areas rated F or L whose evidence
/// coverage sits below the risk floor
pub(crate) fn find_risks(
    answers: &[ResolvedAnswer<'_>],
    practices: &[PracticeScore],
    areas: &[ProcessAreaScore],
    thresholds: &ScoringThresholds,
) -> Vec<RiskIndicator> {
    let floor = thresholds.evidence_risk_floor;
    let mut risks = Vec::new();

    for r in answers {
        let attainment = r.answer.attainment();
        let band = AchievementBand::classify(attainment, thresholds);
        let evidence_coverage = if r.answer.has_evidence() { 100.0 } else { 0.0 };
        if band.is_high() && evidence_coverage < floor {
            risks.push(RiskIndicator {
                subject: RiskSubject::Question {
                    question_id: r.question.id.clone(),
                },
                band,
                attainment,
                evidence_coverage,
            });
        }
    }

    for p in practices {
        if p.band.is_high() && p.evidence_coverage < floor {
            risks.push(RiskIndicator {
                subject: RiskSubject::Practice {
                    level: p.key.level,
                    process_area: p.key.process_area.clone(),
                    specific_goal: p.key.specific_goal.clone(),
                    specific_practice: p.key.specific_practice.clone(),
                },
                band: p.band,
                attainment: p.attainment,
                evidence_coverage: p.evidence_coverage,
            });
        }
    }

    for a in areas {
        if a.band.is_high() && a.evidence_coverage < floor {
            risks.push(RiskIndicator {
                subject: RiskSubject::ProcessArea {
                    level: a.level,
                    process_area: a.process_area.clone(),
                },
                band: a.band,
                attainment: a.attainment,
                evidence_coverage: a.evidence_coverage,
            });
        }
    }

    risks
}
