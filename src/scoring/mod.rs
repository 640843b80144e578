//! Historical-accuracy grading: Brier scores, calibration, tiers.

mod brier;
mod calibration;
mod tiers;

pub use brier::{
    single_brier, AccuracyReport, BrierScorer, PeriodScore, TimeWeightedScore, BASELINE_BRIER,
};
pub use calibration::{
    CalibrationAnalyzer, CalibrationBreakdown, CalibrationBucket, CalibrationDiagnosis,
    CalibrationReport,
};
pub use tiers::{TierClassifier, TierProgress};
