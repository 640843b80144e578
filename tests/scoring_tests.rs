//! Integration tests for the scoring half of the engine.

use chrono::{Duration, TimeZone, Utc};
use oddsmith::domain::{Forecast, Tier};
use oddsmith::scoring::{
    single_brier, BrierScorer, CalibrationAnalyzer, TierClassifier, BASELINE_BRIER,
};

const EPS: f64 = 1e-12;

fn sharp_history() -> Vec<Forecast> {
    let mut history = Vec::new();
    for i in 0..60 {
        history.push(Forecast::resolved(0.9, i % 10 != 0).with_category("politics"));
        history.push(Forecast::resolved(0.1, i % 10 == 0).with_category("sports"));
    }
    history
}

#[test]
fn single_brier_stays_in_unit_interval() {
    for i in 0..=100 {
        let p = i as f64 / 100.0;
        for outcome in [true, false] {
            let b = single_brier(p, outcome);
            assert!((0.0..=1.0).contains(&b), "brier {b} for p {p}");
        }
    }
}

#[test]
fn coin_flip_forecast_scores_the_baseline() {
    assert!((single_brier(0.5, true) - BASELINE_BRIER).abs() < EPS);
    assert!((single_brier(0.5, false) - BASELINE_BRIER).abs() < EPS);
}

#[test]
fn sharp_forecaster_earns_positive_skill() {
    let report = BrierScorer::default().score(&sharp_history());

    assert_eq!(report.count, 120);
    assert!(report.score < BASELINE_BRIER);
    assert!(report.skill_score > 0.0);
    assert!((report.skill_score - (BASELINE_BRIER - report.score)).abs() < EPS);
}

#[test]
fn contrarian_forecaster_earns_negative_skill() {
    let history: Vec<Forecast> = (0..20)
        .map(|i| Forecast::resolved(0.95, i % 10 == 0))
        .collect();

    let report = BrierScorer::default().score(&history);
    assert!(report.skill_score < 0.0);
}

#[test]
fn degenerate_histories_score_zero_without_error() {
    let scorer = BrierScorer::default();

    let empty = scorer.score(&[]);
    assert_eq!(empty.count, 0);
    assert_eq!(empty.score, 0.0);

    let unresolved = scorer.score(&[Forecast::new(0.4), Forecast::new(0.8)]);
    assert_eq!(unresolved.count, 0);
    assert_eq!(unresolved.score, 0.0);

    assert!(scorer.time_series(&[Forecast::resolved(0.5, true)]).is_empty());
}

#[test]
fn calibration_report_ties_the_decomposition_to_the_brier_score() {
    let report = CalibrationAnalyzer::default().analyze(&sharp_history());

    let reconstructed = report.calibration - report.resolution + report.uncertainty;
    assert!(
        (reconstructed - report.brier_score).abs() < 0.02,
        "brier {} vs reconstructed {reconstructed}",
        report.brier_score
    );

    let binned: usize = report.buckets.iter().map(|b| b.forecast_count).sum();
    assert_eq!(binned, 120);
}

#[test]
fn time_series_cumulative_score_is_a_running_mean() {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let history = vec![
        Forecast::resolved(0.6, true).with_timestamp(start),
        Forecast::resolved(0.6, true).with_timestamp(start + Duration::days(5)),
        Forecast::resolved(0.6, false).with_timestamp(start + Duration::days(40)),
    ];

    let series = BrierScorer::default().time_series(&history);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].count, 2);
    assert_eq!(series[1].count, 1);

    // Period means: 0.16 then 0.36; cumulative mean over all three: (2*0.16 + 0.36) / 3.
    assert!((series[0].cumulative_score - 0.16).abs() < EPS);
    assert!((series[1].cumulative_score - (2.0 * 0.16 + 0.36) / 3.0).abs() < EPS);
    assert!(series[0].period_start < series[1].period_start);
}

#[test]
fn scored_tiers_flow_into_classification() {
    let report = BrierScorer::default().score(&sharp_history());
    let tier = TierClassifier::default().classify(report.score, report.count, report.skill_score);

    // 120 accurate forecasts with strong skill reach the top of the ladder.
    assert_eq!(tier, Tier::Grandmaster);
}

#[test]
fn classify_never_decreases_as_inputs_improve() {
    let classifier = TierClassifier::default();

    let mut best = classifier.classify(0.5, 0, -0.25);
    for step in 1..=40 {
        let brier = 0.5 - 0.01 * step as f64;
        let count = step * 5;
        let skill = -0.25 + 0.01 * step as f64;

        let tier = classifier.classify(brier, count, skill);
        assert!(tier >= best);
        best = tier;
    }
}

#[test]
fn result_records_serialize_for_downstream_consumers() {
    let report = BrierScorer::default().score(&sharp_history());
    let json = serde_json::to_value(report).unwrap();
    assert!(json["score"].is_number());
    assert_eq!(json["count"], 120);

    let analysis = CalibrationAnalyzer::default().analyze(&sharp_history());
    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json["buckets"].is_array());
    assert!(json["ece"].is_number());
}
