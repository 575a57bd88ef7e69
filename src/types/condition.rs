use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Typed form of an achievement's unlock predicate.
///
/// The catalog stores conditions as text (`"level >= 2"`); they are parsed
/// once when the catalog is loaded so the engine only compares integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AchievementCondition {
    LevelAtLeast(i64),
}

impl AchievementCondition {
    /// Returns true if a player at `level` satisfies this condition.
    #[must_use]
    pub const fn is_met(self, level: i64) -> bool {
        match self {
            AchievementCondition::LevelAtLeast(threshold) => level >= threshold,
        }
    }
}

impl FromStr for AchievementCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCondition(s.to_string());

        let (lhs, rhs) = s.split_once(">=").ok_or_else(invalid)?;
        if lhs.trim() != "level" {
            return Err(invalid());
        }

        let threshold: i64 = rhs.trim().parse().map_err(|_| invalid())?;
        if threshold < 1 {
            return Err(invalid());
        }

        Ok(AchievementCondition::LevelAtLeast(threshold))
    }
}

impl fmt::Display for AchievementCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AchievementCondition::LevelAtLeast(n) => write!(f, "level >= {n}"),
        }
    }
}
