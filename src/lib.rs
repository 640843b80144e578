//! Oddsmith - scoring and capital allocation for prediction-market
//! forecasters.
//!
//! This crate grades the historical accuracy of a forecaster's
//! probability estimates and converts their current edge into
//! risk-bounded position sizes. Everything is a pure, synchronous
//! function over in-memory records: no persistence, no network I/O, no
//! shared state. Callers supply forecast histories and market prices and
//! receive plain result records back.
//!
//! # Architecture
//!
//! The two halves share no state and can be used independently:
//!
//! - **Scoring** - [`scoring::BrierScorer`] grades forecast histories
//!   with the Brier proper scoring rule (plain, weighted, recency
//!   weighted, per category, and as a time series);
//!   [`scoring::CalibrationAnalyzer`] bins forecasts into a calibration
//!   curve and computes the Murphy decomposition and ECE;
//!   [`scoring::TierClassifier`] maps the results onto a qualification
//!   ladder.
//! - **Allocation** - [`allocation::KellyAllocator`] sizes one market
//!   with fractional Kelly under a position cap;
//!   [`allocation::PortfolioAllocator`] sizes many markets at once under
//!   a portfolio-wide allocation cap.
//!
//! # Modules
//!
//! - [`config`] - Tuning defaults, TOML loading, validation
//! - [`domain`] - Plain records: forecasts, market ids, tier ladder
//! - [`error`] - Error types for the crate
//! - [`scoring`] - Brier scoring, calibration analysis, tier classification
//! - [`allocation`] - Kelly and portfolio position sizing
//!
//! # Example
//!
//! ```
//! use oddsmith::domain::Forecast;
//! use oddsmith::scoring::{BrierScorer, TierClassifier};
//!
//! let history = vec![
//!     Forecast::resolved(0.9, true),
//!     Forecast::resolved(0.2, false),
//!     Forecast::resolved(0.7, true),
//! ];
//!
//! let report = BrierScorer::default().score(&history);
//! let tier = TierClassifier::default().classify(
//!     report.score,
//!     report.count,
//!     report.skill_score,
//! );
//!
//! println!("{tier}: brier {:.3}", report.score);
//! ```

pub mod allocation;
pub mod config;
pub mod domain;
pub mod error;
pub mod scoring;
