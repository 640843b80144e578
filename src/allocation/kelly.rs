//! Kelly criterion sizing for a single binary market.
//!
//! For a contract priced at P in (0, 1) paying $1 on the chosen side, the
//! full Kelly fraction reduces to:
//!
//! ```text
//! f* = (p - P) / (1 - P)
//! ```
//!
//! where `p` is the forecaster's probability for that side. The allocator
//! picks the side with the larger positive edge, applies a fractional
//! Kelly multiplier, and clamps to a hard position cap.
//!
//! Inputs outside the accepted domain raise [`AllocationError`]; a market
//! with no positive edge on either side is a valid zeroed result, not an
//! error.
//!
//! # Examples
//!
//! ```
//! use oddsmith::allocation::{KellyAllocator, Side};
//!
//! let allocator = KellyAllocator::default();
//! let result = allocator.calculate(0.7, 0.5).unwrap();
//!
//! assert_eq!(result.side, Side::Yes);
//! assert!(result.has_positive_edge);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::config::KellyConfig;
use crate::error::AllocationError;

/// Which side of a binary market to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Yes,
    No,
    /// No positive edge on either side.
    None,
}

/// Side selection without sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeAssessment {
    pub side: Side,
    /// The chosen side's edge; 0.0 when no side has one.
    pub edge: f64,
}

/// A sized single-market recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KellyResult {
    pub side: Side,
    /// The chosen side's probability edge over its price.
    pub edge: f64,
    /// Full Kelly fraction before multiplier and cap.
    pub raw_kelly: f64,
    /// Final bankroll fraction, in [0, max_position_size].
    pub recommended_fraction: f64,
    /// True when the cap bound the recommendation.
    pub was_capped: bool,
    pub has_positive_edge: bool,
    /// Expected value per dollar of contract, equal to the edge.
    pub expected_value: f64,
    /// Edge relative to the effective price, in percent.
    pub edge_percentage: f64,
}

impl KellyResult {
    /// The zeroed no-edge result.
    #[must_use]
    const fn none() -> Self {
        Self {
            side: Side::None,
            edge: 0.0,
            raw_kelly: 0.0,
            recommended_fraction: 0.0,
            was_capped: false,
            has_positive_edge: false,
            expected_value: 0.0,
            edge_percentage: 0.0,
        }
    }
}

/// Sizes one market with fractional Kelly under a position cap.
#[derive(Debug, Clone, Default)]
pub struct KellyAllocator {
    config: KellyConfig,
}

impl KellyAllocator {
    /// Create an allocator with explicit tuning.
    #[must_use]
    pub const fn new(config: KellyConfig) -> Self {
        Self { config }
    }

    /// The tuning this allocator applies.
    #[must_use]
    pub const fn config(&self) -> &KellyConfig {
        &self.config
    }

    /// Size a position from an estimated probability and a market price.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] when the probability leaves [0, 1], the
    /// price leaves (0, 1), or the configured multiplier leaves (0, 1].
    pub fn calculate(
        &self,
        estimated_probability: f64,
        market_price: f64,
    ) -> Result<KellyResult, AllocationError> {
        validate_probability(estimated_probability)?;
        validate_price(market_price)?;
        validate_multiplier(self.config.fraction_multiplier)?;

        let assessment = select_side(estimated_probability, market_price);
        let (eff_p, eff_price) = match assessment.side {
            Side::Yes => (estimated_probability, market_price),
            Side::No => (1.0 - estimated_probability, 1.0 - market_price),
            Side::None => {
                debug!(
                    probability = estimated_probability,
                    price = market_price,
                    "no positive edge on either side"
                );
                return Ok(KellyResult::none());
            }
        };

        let raw_kelly = (eff_p - eff_price) / (1.0 - eff_price);
        let adjusted = raw_kelly * self.config.fraction_multiplier;
        let was_capped = adjusted > self.config.max_position_size;
        let recommended_fraction = adjusted.clamp(0.0, self.config.max_position_size);

        debug!(
            side = ?assessment.side,
            edge = assessment.edge,
            raw_kelly,
            recommended_fraction,
            was_capped,
            "sized position"
        );

        Ok(KellyResult {
            side: assessment.side,
            edge: assessment.edge,
            raw_kelly,
            recommended_fraction,
            was_capped,
            has_positive_edge: true,
            expected_value: assessment.edge,
            edge_percentage: assessment.edge / eff_price * 100.0,
        })
    }

    /// Side selection alone, for callers that need edge without sizing.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] when the probability leaves [0, 1] or
    /// the price leaves (0, 1).
    pub fn calculate_edge(
        &self,
        estimated_probability: f64,
        market_price: f64,
    ) -> Result<EdgeAssessment, AllocationError> {
        validate_probability(estimated_probability)?;
        validate_price(market_price)?;
        Ok(select_side(estimated_probability, market_price))
    }
}

/// Pick the side with the larger positive edge.
fn select_side(probability: f64, price: f64) -> EdgeAssessment {
    let yes_edge = probability - price;
    let no_price = 1.0 - price;
    let no_edge = (1.0 - probability) - no_price;

    if yes_edge > no_edge && yes_edge > 0.0 {
        EdgeAssessment {
            side: Side::Yes,
            edge: yes_edge,
        }
    } else if no_edge > 0.0 {
        EdgeAssessment {
            side: Side::No,
            edge: no_edge,
        }
    } else {
        EdgeAssessment {
            side: Side::None,
            edge: 0.0,
        }
    }
}

pub(crate) fn validate_probability(value: f64) -> Result<(), AllocationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AllocationError::ProbabilityOutOfRange { value })
    }
}

pub(crate) fn validate_price(value: f64) -> Result<(), AllocationError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(AllocationError::PriceOutOfRange { value })
    }
}

pub(crate) fn validate_multiplier(value: f64) -> Result<(), AllocationError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(AllocationError::MultiplierOutOfRange { value })
    }
}
