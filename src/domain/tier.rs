//! Forecaster qualification tiers and the threshold ladder behind them.
//!
//! Qualification policy is data-driven: an ordered [`TierRequirement`]
//! ladder, monotonically more demanding on all three axes from lowest to
//! highest tier, queried top-down by the classifier. Keeping the policy as
//! data rather than a branch cascade lets callers supply their own ladder
//! and test it independently.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete forecaster-quality classification.
///
/// Ordered lowest to highest; `Apprentice` is the base tier every
/// forecaster holds by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Apprentice,
    Journeyman,
    Expert,
    Master,
    Grandmaster,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Apprentice => "Apprentice",
            Self::Journeyman => "Journeyman",
            Self::Expert => "Expert",
            Self::Master => "Master",
            Self::Grandmaster => "Grandmaster",
        };
        write!(f, "{name}")
    }
}

/// One rung of the qualification ladder.
///
/// A forecaster qualifies for the rung when their Brier score is at most
/// `max_brier_score`, their resolved-forecast count at least
/// `min_forecast_count`, and their skill score at least `min_skill_score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRequirement {
    pub tier: Tier,
    /// Inclusive upper bound on the Brier score.
    pub max_brier_score: f64,
    /// Inclusive lower bound on resolved forecasts.
    pub min_forecast_count: usize,
    /// Inclusive lower bound on the skill score.
    pub min_skill_score: f64,
}

impl TierRequirement {
    /// True when all three thresholds hold simultaneously.
    #[must_use]
    pub fn is_met(&self, brier_score: f64, forecast_count: usize, skill_score: f64) -> bool {
        brier_score <= self.max_brier_score
            && forecast_count >= self.min_forecast_count
            && skill_score >= self.min_skill_score
    }
}

/// Canonical qualification ladder, ordered lowest to highest tier.
pub const DEFAULT_LADDER: [TierRequirement; 5] = [
    TierRequirement {
        tier: Tier::Apprentice,
        max_brier_score: 1.0,
        min_forecast_count: 0,
        min_skill_score: -0.75,
    },
    TierRequirement {
        tier: Tier::Journeyman,
        max_brier_score: 0.25,
        min_forecast_count: 10,
        min_skill_score: 0.0,
    },
    TierRequirement {
        tier: Tier::Expert,
        max_brier_score: 0.20,
        min_forecast_count: 25,
        min_skill_score: 0.05,
    },
    TierRequirement {
        tier: Tier::Master,
        max_brier_score: 0.15,
        min_forecast_count: 50,
        min_skill_score: 0.10,
    },
    TierRequirement {
        tier: Tier::Grandmaster,
        max_brier_score: 0.10,
        min_forecast_count: 100,
        min_skill_score: 0.15,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_tightens_on_every_axis() {
        for pair in DEFAULT_LADDER.windows(2) {
            assert!(pair[1].max_brier_score < pair[0].max_brier_score);
            assert!(pair[1].min_forecast_count > pair[0].min_forecast_count);
            assert!(pair[1].min_skill_score > pair[0].min_skill_score);
        }
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::Apprentice < Tier::Journeyman);
        assert!(Tier::Master < Tier::Grandmaster);
    }

    #[test]
    fn requirement_needs_all_three_thresholds() {
        let rung = DEFAULT_LADDER[1];

        assert!(rung.is_met(0.20, 15, 0.05));
        // Brier too high
        assert!(!rung.is_met(0.30, 15, 0.05));
        // Too few forecasts
        assert!(!rung.is_met(0.20, 5, 0.05));
        // Skill below floor
        assert!(!rung.is_met(0.20, 15, -0.01));
    }

    #[test]
    fn tier_display_names() {
        assert_eq!(Tier::Grandmaster.to_string(), "Grandmaster");
        assert_eq!(Tier::Apprentice.to_string(), "Apprentice");
    }
}
