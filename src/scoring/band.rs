//! Achievement bands.

use super::ScoringThresholds;
use serde::{Deserialize, Serialize};

/// TMMi achievement rating of a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementBand {
    /// Not achieved
    N,
    /// Partially achieved
    P,
    /// Largely achieved
    L,
    /// Fully achieved
    F,
}

impl AchievementBand {
    /// Classify an attainment percentage. Lower bounds are inclusive.
    #[must_use]
    pub fn classify(attainment: f64, thresholds: &ScoringThresholds) -> Self {
        if attainment >= thresholds.fully_achieved {
            Self::F
        } else if attainment >= thresholds.largely_achieved {
            Self::L
        } else if attainment >= thresholds.partially_achieved {
            Self::P
        } else {
            Self::N
        }
    }

    #[must_use]
    pub const fn letter(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::P => "P",
            Self::L => "L",
            Self::F => "F",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::N => "Not Achieved",
            Self::P => "Partially Achieved",
            Self::L => "Largely Achieved",
            Self::F => "Fully Achieved",
        }
    }

    /// F or L: a rating that claims substantial achievement
    #[must_use]
    pub const fn is_high(&self) -> bool {
        matches!(self, Self::F | Self::L)
    }
}

impl std::fmt::Display for AchievementBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        let t = ScoringThresholds::default();
        let cases = [
            (84.9, AchievementBand::L),
            (85.0, AchievementBand::F),
            (49.9, AchievementBand::P),
            (50.0, AchievementBand::L),
            (14.9, AchievementBand::N),
            (15.0, AchievementBand::P),
            (0.0, AchievementBand::N),
            (100.0, AchievementBand::F),
        ];
        for (value, expected) in cases {
            assert_eq!(AchievementBand::classify(value, &t), expected, "{value}");
        }
    }

    #[test]
    fn test_high_bands() {
        assert!(AchievementBand::F.is_high());
        assert!(AchievementBand::L.is_high());
        assert!(!AchievementBand::P.is_high());
        assert_eq!(AchievementBand::L.description(), "Largely Achieved");
    }
}
