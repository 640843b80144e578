//! Forecast records - the raw input to every scoring computation.
//!
//! A [`Forecast`] pairs a stated probability with the eventual binary
//! outcome of the market it was made against. Markets that have not yet
//! resolved carry `outcome: None`; such records may appear in input
//! collections but are excluded from every scoring computation.
//!
//! # Examples
//!
//! Building a resolved, weighted forecast:
//!
//! ```
//! use oddsmith::domain::Forecast;
//!
//! let forecast = Forecast::resolved(0.7, true)
//!     .with_weight(2.0)
//!     .with_category("politics");
//!
//! assert!(forecast.is_resolved());
//! assert_eq!(forecast.outcome01(), Some(1.0));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single probability estimate against a binary market outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Stated probability of the YES outcome, in [0, 1].
    pub probability: f64,
    /// Realized outcome; `None` while the market is unresolved.
    pub outcome: Option<bool>,
    /// Importance weight (> 0); unweighted forecasts count as 1.0.
    pub weight: Option<f64>,
    /// When the forecast was made.
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-form market category for grouped scoring.
    pub category: Option<String>,
}

impl Forecast {
    /// Create an unresolved forecast with only a probability.
    #[must_use]
    pub const fn new(probability: f64) -> Self {
        Self {
            probability,
            outcome: None,
            weight: None,
            timestamp: None,
            category: None,
        }
    }

    /// Create a forecast whose market has already resolved.
    #[must_use]
    pub const fn resolved(probability: f64, outcome: bool) -> Self {
        Self {
            probability,
            outcome: Some(outcome),
            weight: None,
            timestamp: None,
            category: None,
        }
    }

    /// Attach an importance weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Attach the time the forecast was made.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach a market category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True if the underlying market has resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }

    /// The realized outcome as 0.0 or 1.0, or `None` if unresolved.
    #[must_use]
    pub fn outcome01(&self) -> Option<f64> {
        self.outcome.map(|o| if o { 1.0 } else { 0.0 })
    }
}
