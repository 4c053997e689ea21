//! TMMi maturity levels.

use serde::{Deserialize, Serialize};

/// A TMMi maturity level (1-5).
///
/// Level 1 is the informal baseline: it is never assessed by catalog
/// questions, only reported as an achieved level when level 2 is not met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TmmiLevel(u8);

impl TmmiLevel {
    pub const INITIAL: Self = Self(1);
    pub const MANAGED: Self = Self(2);
    pub const DEFINED: Self = Self(3);
    pub const MEASURED: Self = Self(4);
    pub const OPTIMIZED: Self = Self(5);

    /// Levels that carry process areas, lowest first
    pub const ASSESSED: [Self; 4] = [
        Self::MANAGED,
        Self::DEFINED,
        Self::MEASURED,
        Self::OPTIMIZED,
    ];

    /// Create a level, returning `None` outside 1-5
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        match value {
            1..=5 => Some(Self(value)),
            _ => None,
        }
    }

    /// Numeric value of the level
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether questions may be attached to this level
    #[must_use]
    pub const fn is_assessed(self) -> bool {
        self.0 >= 2
    }

    /// The next level, or `None` at level 5
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        if self.0 >= 5 {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }

    /// Framework name of the level
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            1 => "Initial",
            2 => "Managed",
            3 => "Defined",
            4 => "Measured",
            _ => "Optimized",
        }
    }

    /// Display label such as `Level 2 (Managed)`
    #[must_use]
    pub fn label(self) -> String {
        format!("Level {} ({})", self.0, self.name())
    }

    /// Name of the generic goal that applies at this level
    #[must_use]
    pub const fn generic_goal_name(self) -> &'static str {
        match self.0 {
            1 | 2 => "GG2 - Managed",
            3 => "GG3 - Defined",
            4 => "GG4 - Quantitatively Managed",
            _ => "GG5 - Optimizing",
        }
    }
}

impl std::fmt::Display for TmmiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when converting an out-of-range number into a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutOfRange(pub u8);

impl std::fmt::Display for LevelOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TMMi level {} is outside 1-5", self.0)
    }
}

impl std::error::Error for LevelOutOfRange {}

impl TryFrom<u8> for TmmiLevel {
    type Error = LevelOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(LevelOutOfRange(value))
    }
}

impl From<TmmiLevel> for u8 {
    fn from(level: TmmiLevel) -> Self {
        level.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_range() {
        assert!(TmmiLevel::new(0).is_none());
        assert!(TmmiLevel::new(6).is_none());
        assert_eq!(TmmiLevel::new(3), Some(TmmiLevel::DEFINED));
        assert!(!TmmiLevel::INITIAL.is_assessed());
        assert!(TmmiLevel::MANAGED.is_assessed());
    }

    #[test]
    fn test_next_is_capped() {
        assert_eq!(TmmiLevel::INITIAL.next(), Some(TmmiLevel::MANAGED));
        assert_eq!(TmmiLevel::MEASURED.next(), Some(TmmiLevel::OPTIMIZED));
        assert_eq!(TmmiLevel::OPTIMIZED.next(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TmmiLevel::MANAGED.label(), "Level 2 (Managed)");
        assert_eq!(TmmiLevel::INITIAL.name(), "Initial");
        assert_eq!(TmmiLevel::OPTIMIZED.label(), "Level 5 (Optimized)");
        assert_eq!(TmmiLevel::DEFINED.generic_goal_name(), "GG3 - Defined");
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let level: TmmiLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level, TmmiLevel::MEASURED);
        assert!(serde_json::from_str::<TmmiLevel>("9").is_err());
        assert_eq!(serde_json::to_string(&TmmiLevel::MANAGED).unwrap(), "2");
    }
}
