//! Achieved-level determination.

use super::{ProcessAreaScore, ScoringThresholds};
use crate::catalog::QuestionCatalog;
use crate::model::TmmiLevel;
use serde::{Deserialize, Serialize};

/// How one level fares against the compliance threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStatus {
    pub level: TmmiLevel,
    /// Process areas the catalog defines for this level
    pub defined_areas: Vec<String>,
    /// Defined areas without any scored answers
    pub not_assessed: Vec<String>,
    /// Scored areas below the compliance threshold
    pub below_threshold: Vec<String>,
    /// Every defined area assessed and compliant
    pub satisfied: bool,
}

/// The achieved maturity level and the per-level evidence behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDetermination {
    pub achieved: TmmiLevel,
    /// Display label, e.g. `Level 2 (Managed)`
    pub explanation: String,
    /// Why the next level is not achieved, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limited_by: Option<String>,
    pub levels: Vec<LevelStatus>,
}

pub(crate) fn level_status(
    level: TmmiLevel,
    catalog: &QuestionCatalog,
    areas: &[ProcessAreaScore],
    thresholds: &ScoringThresholds,
) -> LevelStatus {
    let mut status = LevelStatus {
        level,
        defined_areas: Vec::new(),
        not_assessed: Vec::new(),
        below_threshold: Vec::new(),
        satisfied: false,
    };
    for key in catalog.process_areas(level) {
        let name = key.process_area.clone();
        match areas.iter().find(|a| a.is(level, &key.process_area)) {
            None => status.not_assessed.push(name.clone()),
            Some(score) if score.attainment < thresholds.level_compliance => {
                status.below_threshold.push(name.clone());
            }
            Some(_) => {}
        }
        status.defined_areas.push(name);
    }
    status.satisfied = !status.defined_areas.is_empty()
        && status.not_assessed.is_empty()
        && status.below_threshold.is_empty();
    status
}

/// Highest level reached contiguously from level 2; level 1 otherwise.
///
/// A level qualifies only when every process area the catalog defines for
/// it has been assessed and meets the compliance threshold. A level with no
/// defined areas never qualifies.
pub(crate) fn determine_level(
    catalog: &QuestionCatalog,
    areas: &[ProcessAreaScore],
    thresholds: &ScoringThresholds,
) -> LevelDetermination {
    let levels: Vec<LevelStatus> = TmmiLevel::ASSESSED
        .iter()
        .map(|&level| level_status(level, catalog, areas, thresholds))
        .collect();

    let mut achieved = TmmiLevel::INITIAL;
    let mut limited_by = None;
    for status in &levels {
        if status.satisfied {
            achieved = status.level;
        } else {
            limited_by = Some(describe_shortfall(status, thresholds));
            break;
        }
    }

    tracing::debug!(achieved = %achieved, "determined achieved level");

    LevelDetermination {
        achieved,
        explanation: achieved.label(),
        limited_by,
        levels,
    }
}

fn describe_shortfall(status: &LevelStatus, thresholds: &ScoringThresholds) -> String {
    let label = status.level.label();
    if status.defined_areas.is_empty() {
        return format!("{label} has no process areas in the question catalog");
    }
    let mut reasons = Vec::new();
    if !status.below_threshold.is_empty() {
        reasons.push(format!(
            "below {:.0}%: {}",
            thresholds.level_compliance,
            status.below_threshold.join(", ")
        ));
    }
    if !status.not_assessed.is_empty() {
        reasons.push(format!("not yet assessed: {}", status.not_assessed.join(", ")));
    }
    format!("{label} not achieved ({})", reasons.join("; "))
}
