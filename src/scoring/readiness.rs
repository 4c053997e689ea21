//! Next-level readiness and eligibility gating.

use super::{mean, ProcessAreaScore, ScoringThresholds};
use crate::catalog::QuestionCatalog;
use crate::model::TmmiLevel;
use serde::{Deserialize, Serialize};

/// One target-level process area as seen by the readiness calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessArea {
    pub process_area: String,
    /// Scored attainment, or 0 when the area has no answers
    pub attainment: f64,
    pub assessed: bool,
    pub blocking: bool,
}

/// Readiness for the level above the achieved one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReadinessResult {
    /// No next level to prepare for
    NotApplicable {
        current_level: TmmiLevel,
        reason: String,
    },
    Target {
        current_level: TmmiLevel,
        target_level: TmmiLevel,
        /// Mean over every target-level area, unassessed areas counting 0
        readiness: f64,
        /// Mean over assessed target-level areas only
        #[serde(skip_serializing_if = "Option::is_none")]
        assessed_readiness: Option<f64>,
        /// Every target-level area meets the readiness gate
        eligible: bool,
        /// Areas below the readiness gate, in catalog order
        blocking: Vec<String>,
        areas: Vec<ReadinessArea>,
    },
}

impl ReadinessResult {
    #[must_use]
    pub const fn current_level(&self) -> TmmiLevel {
        match self {
            Self::NotApplicable { current_level, .. } | Self::Target { current_level, .. } => {
                *current_level
            }
        }
    }

    #[must_use]
    pub const fn target_level(&self) -> Option<TmmiLevel> {
        match self {
            Self::NotApplicable { .. } => None,
            Self::Target { target_level, .. } => Some(*target_level),
        }
    }

    /// Readiness percentage, `None` when not applicable
    #[must_use]
    pub const fn readiness(&self) -> Option<f64> {
        match self {
            Self::NotApplicable { .. } => None,
            Self::Target { readiness, .. } => Some(*readiness),
        }
    }

    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Target { eligible: true, .. })
    }

    #[must_use]
    pub fn blocking(&self) -> &[String] {
        match self {
            Self::NotApplicable { .. } => &[],
            Self::Target { blocking, .. } => blocking,
        }
    }
}

/// Compute readiness for `current + 1`.
///
/// Target-level areas without answers count as 0 so missing data never
/// inflates readiness, and they always block eligibility.
pub(crate) fn calculate_readiness(
    current_level: TmmiLevel,
    catalog: &QuestionCatalog,
    areas: &[ProcessAreaScore],
    thresholds: &ScoringThresholds,
) -> ReadinessResult {
    let Some(target_level) = current_level.next() else {
        return ReadinessResult::NotApplicable {
            current_level,
            reason: format!("{} is the highest level", current_level.label()),
        };
    };

    let target_areas: Vec<ReadinessArea> = catalog
        .process_areas(target_level)
        .map(|key| {
            let scored = areas.iter().find(|a| a.is(target_level, &key.process_area));
            let attainment = scored.map_or(0.0, |a| a.attainment);
            ReadinessArea {
                process_area: key.process_area.clone(),
                attainment,
                assessed: scored.is_some(),
                blocking: attainment < thresholds.readiness_gate,
            }
        })
        .collect();

    let Some(readiness) = mean(target_areas.iter().map(|a| a.attainment)) else {
        return ReadinessResult::NotApplicable {
            current_level,
            reason: format!(
                "no process areas defined for {} in the question catalog",
                target_level.label()
            ),
        };
    };

    let assessed_readiness = mean(
        target_areas
            .iter()
            .filter(|a| a.assessed)
            .map(|a| a.attainment),
    );
    let blocking: Vec<String> = target_areas
        .iter()
        .filter(|a| a.blocking)
        .map(|a| a.process_area.clone())
        .collect();

    tracing::debug!(
        target = %target_level,
        readiness,
        blocking = blocking.len(),
        "computed next-level readiness"
    );

    ReadinessResult::Target {
        current_level,
        target_level,
        readiness,
        assessed_readiness,
        eligible: blocking.is_empty(),
        blocking,
        areas: target_areas,
    }
}
