//! Brier scoring for forecast histories.
//!
//! The Brier score is the mean squared error between a stated probability
//! and the realized binary outcome: 0.0 is perfect, 1.0 is maximally
//! wrong, and a coin-flip forecaster settles at 0.25. This module grades
//! whole forecast histories: plain and weighted means, recency-weighted
//! means, per-category breakdowns, and a period-by-period time series.
//!
//! Degenerate inputs (empty collections, nothing resolved, nothing
//! timestamped where a timestamp is required) are valid and yield zeroed
//! results, never errors.
//!
//! # Examples
//!
//! ```
//! use oddsmith::domain::Forecast;
//! use oddsmith::scoring::{single_brier, BrierScorer};
//!
//! assert_eq!(single_brier(0.5, true), 0.25);
//!
//! let scorer = BrierScorer::default();
//! let report = scorer.score(&[
//!     Forecast::resolved(0.9, true),
//!     Forecast::resolved(0.2, false),
//! ]);
//!
//! assert_eq!(report.count, 2);
//! assert!(report.skill_score > 0.0);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::domain::Forecast;

/// Brier score of a naive forecaster who always says 50/50.
pub const BASELINE_BRIER: f64 = 0.25;

/// Squared error of one probability against one realized outcome.
///
/// Lies in [0, 1] for any probability in [0, 1]; 0.0 iff the probability
/// exactly matches the outcome, 1.0 at the opposite extreme.
#[must_use]
pub fn single_brier(probability: f64, outcome: bool) -> f64 {
    let outcome01 = if outcome { 1.0 } else { 0.0 };
    (probability - outcome01).powi(2)
}

/// Aggregate accuracy of a forecast history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AccuracyReport {
    /// Number of resolved forecasts that were scored.
    pub count: usize,
    /// Mean Brier score over resolved forecasts.
    pub score: f64,
    /// Weight-adjusted mean; equals `score` when no forecast is weighted.
    pub weighted_score: f64,
    /// `BASELINE_BRIER - score`: positive beats a 50/50 forecaster.
    pub skill_score: f64,
}

/// Recency-weighted accuracy over timestamped forecasts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TimeWeightedScore {
    /// Number of resolved, timestamped forecasts that participated.
    pub count: usize,
    /// Recency-weighted mean Brier score.
    pub score: f64,
}

/// One period of a scoring time series, ordered ascending by time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodScore {
    /// Start of the fixed-width period.
    pub period_start: DateTime<Utc>,
    /// Resolved forecasts falling inside the period.
    pub count: usize,
    /// Mean Brier score of this period alone.
    pub score: f64,
    /// Running mean over this period and all earlier ones.
    pub cumulative_score: f64,
}

/// Grades forecast histories with the Brier proper scoring rule.
#[derive(Debug, Clone, Default)]
pub struct BrierScorer {
    config: ScoringConfig,
}

impl BrierScorer {
    /// Create a scorer with explicit tuning.
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a forecast history.
    ///
    /// Unresolved forecasts are skipped. The weighted score uses each
    /// forecast's weight (default 1.0) only when at least one forecast in
    /// the input carries a weight; otherwise it equals the plain score.
    #[must_use]
    pub fn score(&self, forecasts: &[Forecast]) -> AccuracyReport {
        let resolved: Vec<(f64, f64)> = forecasts
            .iter()
            .filter_map(|f| {
                f.outcome
                    .map(|o| (single_brier(f.probability, o), f.weight.unwrap_or(1.0)))
            })
            .collect();

        if resolved.is_empty() {
            debug!("no resolved forecasts to score");
            return AccuracyReport::default();
        }

        let count = resolved.len();
        let score = resolved.iter().map(|(b, _)| b).sum::<f64>() / count as f64;

        let any_weighted = forecasts.iter().any(|f| f.weight.is_some());
        let weighted_score = if any_weighted {
            let total_weight: f64 = resolved.iter().map(|(_, w)| w).sum();
            if total_weight > 0.0 {
                resolved.iter().map(|(b, w)| b * w).sum::<f64>() / total_weight
            } else {
                score
            }
        } else {
            score
        };

        AccuracyReport {
            count,
            score,
            weighted_score,
            skill_score: BASELINE_BRIER - score,
        }
    }

    /// Recency-weighted score as of now.
    ///
    /// See [`BrierScorer::time_weighted_at`] for the deterministic variant.
    #[must_use]
    pub fn time_weighted(&self, forecasts: &[Forecast]) -> TimeWeightedScore {
        self.time_weighted_at(forecasts, Utc::now())
    }

    /// Recency-weighted score relative to an explicit reference time.
    ///
    /// A forecast aged `d` days carries weight `2^(-d / half_life_days)`.
    /// Only forecasts that are both resolved and timestamped participate;
    /// if none qualify the result is zeroed with count 0.
    #[must_use]
    pub fn time_weighted_at(
        &self,
        forecasts: &[Forecast],
        as_of: DateTime<Utc>,
    ) -> TimeWeightedScore {
        let half_life = self.config.half_life_days;
        let mut count = 0usize;
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for f in forecasts {
            let (Some(outcome), Some(ts)) = (f.outcome, f.timestamp) else {
                continue;
            };
            let age_days = (as_of - ts).num_seconds() as f64 / 86_400.0;
            let weight = 2f64.powf(-age_days / half_life);
            weighted_sum += single_brier(f.probability, outcome) * weight;
            total_weight += weight;
            count += 1;
        }

        if count == 0 || total_weight <= 0.0 {
            debug!("no resolved, timestamped forecasts for recency weighting");
            return TimeWeightedScore::default();
        }

        TimeWeightedScore {
            count,
            score: weighted_sum / total_weight,
        }
    }

    /// Score a history grouped by market category.
    ///
    /// Forecasts without a category fall into the `"uncategorized"` group.
    /// Empty input yields an empty map.
    #[must_use]
    pub fn by_category(&self, forecasts: &[Forecast]) -> HashMap<String, AccuracyReport> {
        let mut groups: HashMap<String, Vec<Forecast>> = HashMap::new();
        for f in forecasts {
            let key = f
                .category
                .clone()
                .unwrap_or_else(|| "uncategorized".to_string());
            groups.entry(key).or_default().push(f.clone());
        }

        groups
            .into_iter()
            .map(|(category, group)| (category, self.score(&group)))
            .collect()
    }

    /// Bucket resolved, timestamped forecasts into consecutive fixed-width
    /// periods and score each one.
    ///
    /// Periods are anchored at the earliest eligible timestamp and ordered
    /// ascending; empty periods are omitted. Each entry carries the
    /// period's own mean and the running mean over all forecasts up to and
    /// including the period. Ineligible input yields an empty sequence.
    #[must_use]
    pub fn time_series(&self, forecasts: &[Forecast]) -> Vec<PeriodScore> {
        let mut eligible: Vec<(DateTime<Utc>, f64)> = forecasts
            .iter()
            .filter_map(|f| match (f.timestamp, f.outcome) {
                (Some(ts), Some(o)) => Some((ts, single_brier(f.probability, o))),
                _ => None,
            })
            .collect();

        if eligible.is_empty() {
            return Vec::new();
        }

        eligible.sort_by_key(|(ts, _)| *ts);

        let period_ms = Duration::days(self.config.period_days).num_milliseconds();
        let start = eligible[0].0;

        let mut series = Vec::new();
        let mut running_sum = 0.0;
        let mut running_count = 0usize;

        let mut idx = 0;
        while idx < eligible.len() {
            let period_index = (eligible[idx].0 - start).num_milliseconds() / period_ms;
            let mut period_sum = 0.0;
            let mut period_count = 0usize;

            while idx < eligible.len()
                && (eligible[idx].0 - start).num_milliseconds() / period_ms == period_index
            {
                period_sum += eligible[idx].1;
                period_count += 1;
                idx += 1;
            }

            running_sum += period_sum;
            running_count += period_count;

            series.push(PeriodScore {
                period_start: start + Duration::milliseconds(period_index * period_ms),
                count: period_count,
                score: period_sum / period_count as f64,
                cumulative_score: running_sum / running_count as f64,
            });
        }

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EPS: f64 = 1e-12;

    #[test]
    fn single_brier_extremes() {
        assert_eq!(single_brier(1.0, true), 0.0);
        assert_eq!(single_brier(0.0, false), 0.0);
        assert_eq!(single_brier(0.0, true), 1.0);
        assert_eq!(single_brier(1.0, false), 1.0);
    }

    #[test]
    fn single_brier_at_coin_flip_is_quarter() {
        assert!((single_brier(0.5, true) - 0.25).abs() < EPS);
        assert!((single_brier(0.5, false) - 0.25).abs() < EPS);
    }

    #[test]
    fn empty_history_scores_zero() {
        let report = BrierScorer::default().score(&[]);
        assert_eq!(report, AccuracyReport::default());
    }

    #[test]
    fn unresolved_forecasts_are_excluded() {
        let report = BrierScorer::default().score(&[
            Forecast::new(0.9),
            Forecast::resolved(0.8, true),
            Forecast::new(0.1),
        ]);

        assert_eq!(report.count, 1);
        assert!((report.score - 0.04).abs() < EPS);
    }

    #[test]
    fn skill_score_is_baseline_minus_score() {
        let report = BrierScorer::default().score(&[
            Forecast::resolved(0.9, true),
            Forecast::resolved(0.1, false),
        ]);

        assert!((report.score - 0.01).abs() < EPS);
        assert!((report.skill_score - 0.24).abs() < EPS);
    }

    #[test]
    fn confidently_wrong_history_has_negative_skill() {
        let report = BrierScorer::default().score(&[
            Forecast::resolved(0.9, false),
            Forecast::resolved(0.1, true),
        ]);

        assert!(report.skill_score < 0.0);
    }

    #[test]
    fn weighted_score_equals_score_without_weights() {
        let report = BrierScorer::default().score(&[
            Forecast::resolved(0.7, true),
            Forecast::resolved(0.4, false),
        ]);

        assert!((report.weighted_score - report.score).abs() < EPS);
    }

    #[test]
    fn weighted_score_leans_toward_heavier_forecasts() {
        // A heavily-weighted bad call should dominate the weighted mean.
        let report = BrierScorer::default().score(&[
            Forecast::resolved(0.9, true).with_weight(1.0), // brier 0.01
            Forecast::resolved(0.9, false).with_weight(9.0), // brier 0.81
        ]);

        assert!((report.score - 0.41).abs() < EPS);
        assert!((report.weighted_score - (0.01 + 9.0 * 0.81) / 10.0).abs() < EPS);
    }

    #[test]
    fn time_weighted_without_timestamps_is_zeroed() {
        let result = BrierScorer::default().time_weighted(&[
            Forecast::resolved(0.8, true),
            Forecast::resolved(0.3, false),
        ]);

        assert_eq!(result, TimeWeightedScore::default());
    }

    #[test]
    fn time_weighted_favors_recent_forecasts() {
        let as_of = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let recent = as_of - Duration::days(1);
        let stale = as_of - Duration::days(900);

        // Recent perfect call, ancient terrible call.
        let result = BrierScorer::default().time_weighted_at(
            &[
                Forecast::resolved(1.0, true).with_timestamp(recent),
                Forecast::resolved(0.0, true).with_timestamp(stale),
            ],
            as_of,
        );

        assert_eq!(result.count, 2);
        // Unweighted mean would be 0.5; recency weighting pulls it near 0.
        assert!(result.score < 0.01, "score: {}", result.score);
    }

    #[test]
    fn by_category_defaults_to_uncategorized() {
        let scorer = BrierScorer::default();
        let grouped = scorer.by_category(&[
            Forecast::resolved(0.8, true).with_category("politics"),
            Forecast::resolved(0.2, false),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["politics"].count, 1);
        assert_eq!(grouped["uncategorized"].count, 1);
    }

    #[test]
    fn by_category_on_empty_input_is_empty() {
        assert!(BrierScorer::default().by_category(&[]).is_empty());
    }

    #[test]
    fn time_series_tracks_cumulative_mean() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let scorer = BrierScorer::default();

        let series = scorer.time_series(&[
            // Period 0: brier 0.0
            Forecast::resolved(1.0, true).with_timestamp(start),
            // Period 2: brier 1.0 (period 1 stays empty and is omitted)
            Forecast::resolved(0.0, true).with_timestamp(start + Duration::days(70)),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].period_start, start);
        assert_eq!(series[0].count, 1);
        assert!((series[0].score - 0.0).abs() < EPS);
        assert!((series[0].cumulative_score - 0.0).abs() < EPS);

        assert_eq!(series[1].period_start, start + Duration::days(60));
        assert!((series[1].score - 1.0).abs() < EPS);
        assert!((series[1].cumulative_score - 0.5).abs() < EPS);
    }

    #[test]
    fn time_series_ignores_unresolved_and_untimestamped() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let series = BrierScorer::default().time_series(&[
            Forecast::new(0.5).with_timestamp(start),
            Forecast::resolved(0.5, true),
        ]);

        assert!(series.is_empty());
    }
}
