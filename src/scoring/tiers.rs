//! Tier classification against the qualification ladder.

use serde::Serialize;
use tracing::debug;

use crate::domain::{Tier, TierRequirement, DEFAULT_LADDER};

/// Progress toward the next rung of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierProgress {
    /// The tier immediately above the current one; `None` at the top.
    pub next_tier: Option<Tier>,
    /// Forecast-volume progress in [0, 1].
    pub forecast_progress: f64,
    /// Brier-score progress in [0, 1].
    pub score_progress: f64,
    /// Skill-score progress in [0, 1].
    pub skill_progress: f64,
}

/// Maps a forecaster's (score, volume, skill) triple to a tier.
///
/// The ladder is scanned from the highest tier down; the first rung whose
/// three thresholds all hold wins. Classification is total - a forecaster
/// who qualifies for nothing holds the base tier.
#[derive(Debug, Clone)]
pub struct TierClassifier {
    ladder: Vec<TierRequirement>,
}

impl Default for TierClassifier {
    fn default() -> Self {
        Self {
            ladder: DEFAULT_LADDER.to_vec(),
        }
    }
}

impl TierClassifier {
    /// Create a classifier over a custom ladder, ordered lowest to highest.
    #[must_use]
    pub fn with_ladder(ladder: Vec<TierRequirement>) -> Self {
        debug_assert!(!ladder.is_empty());
        Self { ladder }
    }

    /// The ladder this classifier scans.
    #[must_use]
    pub fn ladder(&self) -> &[TierRequirement] {
        &self.ladder
    }

    /// Return the highest tier whose thresholds are all satisfied.
    #[must_use]
    pub fn classify(&self, brier_score: f64, forecast_count: usize, skill_score: f64) -> Tier {
        for rung in self.ladder.iter().rev() {
            if rung.is_met(brier_score, forecast_count, skill_score) {
                return rung.tier;
            }
        }
        // The base rung is deliberately permissive, but classification
        // stays total even with a custom ladder that is not.
        let base = self.ladder[0].tier;
        debug!(tier = %base, "no rung satisfied, holding base tier");
        base
    }

    /// Measure progress from `current` toward the rung above it.
    ///
    /// At the top tier every progress value is 1.0 and `next_tier` is
    /// `None`. Each axis is clamped to [0, 1].
    #[must_use]
    pub fn progress(
        &self,
        current: Tier,
        brier_score: f64,
        forecast_count: usize,
        skill_score: f64,
    ) -> TierProgress {
        let index = self
            .ladder
            .iter()
            .position(|r| r.tier == current)
            .unwrap_or(0);

        let Some(next) = self.ladder.get(index + 1) else {
            return TierProgress {
                next_tier: None,
                forecast_progress: 1.0,
                score_progress: 1.0,
                skill_progress: 1.0,
            };
        };
        let rung = &self.ladder[index];

        let forecast_progress = if next.min_forecast_count == 0 {
            1.0
        } else {
            (forecast_count as f64 / next.min_forecast_count as f64).min(1.0)
        };

        let score_progress = clamp01(
            (rung.max_brier_score - brier_score) / (rung.max_brier_score - next.max_brier_score),
        );

        let skill_progress = clamp01(
            (skill_score - rung.min_skill_score) / (next.min_skill_score - rung.min_skill_score),
        );

        TierProgress {
            next_tier: Some(next.tier),
            forecast_progress,
            score_progress,
            skill_progress,
        }
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
