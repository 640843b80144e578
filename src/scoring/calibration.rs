//! Calibration analysis: curves, Murphy decomposition, and ECE.
//!
//! Forecasts are binned by predicted probability into equal-width buckets
//! over [0, 1]. Comparing each bucket's average forecast against its
//! observed outcome rate yields the calibration curve, the Expected
//! Calibration Error, and the Murphy decomposition of the Brier score:
//!
//! ```text
//! brier ≈ calibration - resolution + uncertainty
//! ```
//!
//! The identity is computed from binned buckets rather than per-forecast
//! terms, so it holds only up to a small discretization error that shrinks
//! with more buckets.

use serde::Serialize;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::domain::Forecast;
use crate::scoring::brier::BrierScorer;

/// One non-empty probability bin of the calibration curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationBucket {
    /// Inclusive lower edge of the bin.
    pub bin_start: f64,
    /// Exclusive upper edge (inclusive for the final bin).
    pub bin_end: f64,
    /// Midpoint of the bin.
    pub bin_center: f64,
    /// Resolved forecasts that fell in the bin.
    pub forecast_count: usize,
    /// Fraction of those forecasts that resolved YES.
    pub outcome_rate: f64,
    /// Mean predicted probability inside the bin.
    pub avg_forecast: f64,
}

/// Murphy decomposition of a forecast history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalibrationBreakdown {
    /// Count-weighted mean of squared (avg forecast - outcome rate) gaps.
    pub calibration: f64,
    /// Count-weighted mean of squared (outcome rate - base rate) gaps.
    pub resolution: f64,
    /// `base_rate * (1 - base_rate)`.
    pub uncertainty: f64,
    /// Expected Calibration Error.
    pub ece: f64,
    /// Fraction of resolved forecasts with a positive outcome.
    pub base_rate: f64,
    /// Non-empty bins only; counts sum to the resolved-forecast total.
    pub buckets: Vec<CalibrationBucket>,
}

/// Whether a forecaster's stated probabilities run too extreme, too
/// central, or track reality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalibrationDiagnosis {
    WellCalibrated,
    /// Predicted probabilities too extreme.
    OverConfident,
    /// Predicted probabilities too central.
    UnderConfident,
    /// Not enough resolved forecasts to diagnose.
    InsufficientData,
}

/// Full calibration analysis of a forecast history.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationReport {
    /// Exact mean Brier score over resolved forecasts.
    pub brier_score: f64,
    pub calibration: f64,
    pub resolution: f64,
    pub uncertainty: f64,
    pub ece: f64,
    pub buckets: Vec<CalibrationBucket>,
    pub diagnosis: CalibrationDiagnosis,
}

/// Bins forecast histories and derives calibration statistics.
#[derive(Debug, Clone, Default)]
pub struct CalibrationAnalyzer {
    config: ScoringConfig,
}

/// Minimum resolved forecasts before a diagnosis is attempted.
const MIN_DIAGNOSIS_SAMPLES: usize = 20;

/// Minimum forecasts in a bucket for it to inform the diagnosis.
const MIN_BUCKET_SAMPLES: usize = 3;

/// Deviation below which a bucket counts as well calibrated.
const DEVIATION_TOLERANCE: f64 = 0.05;

impl CalibrationAnalyzer {
    /// Create an analyzer with explicit tuning.
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Bin resolved forecasts and compute the Murphy decomposition.
    ///
    /// Empty or all-unresolved input yields an all-zero breakdown with no
    /// buckets.
    #[must_use]
    pub fn decompose(&self, forecasts: &[Forecast]) -> CalibrationBreakdown {
        let resolved: Vec<(f64, f64)> = forecasts
            .iter()
            .filter_map(|f| f.outcome01().map(|o| (f.probability, o)))
            .collect();

        if resolved.is_empty() {
            debug!("no resolved forecasts for calibration");
            return CalibrationBreakdown::default();
        }

        let n = resolved.len();
        let num_buckets = self.config.num_buckets;
        let bin_width = 1.0 / num_buckets as f64;

        let mut counts = vec![0usize; num_buckets];
        let mut forecast_sums = vec![0.0; num_buckets];
        let mut outcome_sums = vec![0.0; num_buckets];

        for &(p, outcome) in &resolved {
            let bin = ((p / bin_width) as usize).min(num_buckets - 1);
            counts[bin] += 1;
            forecast_sums[bin] += p;
            outcome_sums[bin] += outcome;
        }

        let base_rate = resolved.iter().map(|(_, o)| o).sum::<f64>() / n as f64;

        let mut buckets = Vec::new();
        let mut calibration = 0.0;
        let mut resolution = 0.0;
        let mut ece = 0.0;

        for bin in 0..num_buckets {
            if counts[bin] == 0 {
                continue;
            }
            let count = counts[bin];
            let avg_forecast = forecast_sums[bin] / count as f64;
            let outcome_rate = outcome_sums[bin] / count as f64;
            let bin_start = bin as f64 * bin_width;
            let bin_end = bin_start + bin_width;

            calibration += count as f64 * (avg_forecast - outcome_rate).powi(2);
            resolution += count as f64 * (outcome_rate - base_rate).powi(2);
            ece += count as f64 * (avg_forecast - outcome_rate).abs();

            buckets.push(CalibrationBucket {
                bin_start,
                bin_end,
                bin_center: bin_start + bin_width / 2.0,
                forecast_count: count,
                outcome_rate,
                avg_forecast,
            });
        }

        CalibrationBreakdown {
            calibration: calibration / n as f64,
            resolution: resolution / n as f64,
            uncertainty: base_rate * (1.0 - base_rate),
            ece: ece / n as f64,
            base_rate,
            buckets,
        }
    }

    /// Full analysis: exact Brier score, decomposition, and diagnosis.
    #[must_use]
    pub fn analyze(&self, forecasts: &[Forecast]) -> CalibrationReport {
        let report = BrierScorer::new(self.config.clone()).score(forecasts);
        let breakdown = self.decompose(forecasts);
        let diagnosis = diagnose(report.count, &breakdown.buckets);

        CalibrationReport {
            brier_score: report.score,
            calibration: breakdown.calibration,
            resolution: breakdown.resolution,
            uncertainty: breakdown.uncertainty,
            ece: breakdown.ece,
            buckets: breakdown.buckets,
            diagnosis,
        }
    }
}

/// Classify over/under-confidence from bucket deviations.
///
/// Only buckets with enough samples inform the verdict, and only when the
/// history as a whole is large enough to mean anything.
fn diagnose(total: usize, buckets: &[CalibrationBucket]) -> CalibrationDiagnosis {
    let populated: Vec<&CalibrationBucket> = buckets
        .iter()
        .filter(|b| b.forecast_count >= MIN_BUCKET_SAMPLES)
        .collect();

    if populated.len() < 3 || total < MIN_DIAGNOSIS_SAMPLES {
        return CalibrationDiagnosis::InsufficientData;
    }

    let mut overconfident = 0;
    let mut underconfident = 0;

    for bucket in populated {
        let deviation = (bucket.avg_forecast - bucket.outcome_rate).abs();
        if deviation < DEVIATION_TOLERANCE {
            continue;
        }

        if bucket.bin_center < 0.3 {
            // Confident NO calls that resolved YES too often are overconfident.
            if bucket.outcome_rate > bucket.avg_forecast {
                overconfident += 1;
            } else {
                underconfident += 1;
            }
        } else if bucket.bin_center > 0.7 {
            if bucket.outcome_rate < bucket.avg_forecast {
                overconfident += 1;
            } else {
                underconfident += 1;
            }
        }
    }

    if overconfident > underconfident + 1 {
        CalibrationDiagnosis::OverConfident
    } else if underconfident > overconfident + 1 {
        CalibrationDiagnosis::UnderConfident
    } else {
        CalibrationDiagnosis::WellCalibrated
    }
}
