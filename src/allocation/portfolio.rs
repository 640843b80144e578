//! Simultaneous sizing across a portfolio of markets.
//!
//! Each market is first sized at uncapped full Kelly; the portfolio
//! multiplier and total-allocation cap are then applied as a uniform
//! scale-down, and finally each position is clamped to the per-position
//! cap. Because the per-position clamp runs after the portfolio-level
//! scale-down, the final sum can come in under the total cap when
//! individual clamps bind.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::allocation::kelly::{validate_multiplier, KellyAllocator, Side};
use crate::config::{KellyConfig, PortfolioConfig};
use crate::domain::MarketId;
use crate::error::AllocationError;

/// A forecaster's view of one market: their probability and its price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketEstimate {
    pub market_id: MarketId,
    /// Estimated probability of the YES outcome, in [0, 1].
    pub probability: f64,
    /// Market price of the YES contract, in (0, 1).
    pub price: f64,
}

impl MarketEstimate {
    /// Create a market estimate.
    #[must_use]
    pub fn new(market_id: impl Into<MarketId>, probability: f64, price: f64) -> Self {
        Self {
            market_id: market_id.into(),
            probability,
            price,
        }
    }
}

/// One sized position within a portfolio allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioPosition {
    pub market_id: MarketId,
    pub side: Side,
    /// The chosen side's edge; 0.0 for excluded positions.
    pub edge: f64,
    /// Uncapped full-Kelly fraction for this market alone.
    pub raw_fraction: f64,
    /// Final bankroll fraction after scale-down and per-position cap.
    pub adjusted_fraction: f64,
    /// Dollars to allocate at the given bankroll.
    pub dollar_amount: Decimal,
}

/// The result of sizing a whole portfolio at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioAllocation {
    /// One entry per input market, in input order; excluded markets carry
    /// zero fractions.
    pub positions: Vec<PortfolioPosition>,
    /// Sum of adjusted fractions, never above the total-allocation cap.
    pub total_allocation: f64,
    /// True when the portfolio-level scale-down was applied.
    pub was_scaled: bool,
}

impl PortfolioAllocation {
    const fn empty() -> Self {
        Self {
            positions: Vec::new(),
            total_allocation: 0.0,
            was_scaled: false,
        }
    }
}

/// Sizes many markets simultaneously under portfolio-wide caps.
#[derive(Debug, Clone, Default)]
pub struct PortfolioAllocator {
    config: PortfolioConfig,
}

impl PortfolioAllocator {
    /// Create an allocator with explicit tuning.
    #[must_use]
    pub const fn new(config: PortfolioConfig) -> Self {
        Self { config }
    }

    /// The tuning this allocator applies.
    #[must_use]
    pub const fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// Size every market in the portfolio against one bankroll.
    ///
    /// An empty portfolio is valid and yields a zeroed allocation.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError`] when any market's probability or price
    /// leaves its accepted domain, or the configured multiplier leaves
    /// (0, 1].
    pub fn optimize(
        &self,
        bankroll: Decimal,
        markets: &[MarketEstimate],
    ) -> Result<PortfolioAllocation, AllocationError> {
        validate_multiplier(self.config.fraction_multiplier)?;

        if markets.is_empty() {
            debug!("empty portfolio, nothing to allocate");
            return Ok(PortfolioAllocation::empty());
        }

        // Stage 1: uncapped full Kelly per market.
        let full_kelly = KellyAllocator::new(KellyConfig {
            fraction_multiplier: 1.0,
            max_position_size: 1.0,
        });
        let sized: Vec<_> = markets
            .iter()
            .map(|m| full_kelly.calculate(m.probability, m.price))
            .collect::<Result<_, _>>()?;

        // Stage 2: portfolio-level scale-down of the summed target.
        let total_raw: f64 = sized
            .iter()
            .filter(|r| r.side != Side::None && r.raw_kelly > 0.0)
            .map(|r| r.raw_kelly)
            .sum();
        let target = total_raw * self.config.fraction_multiplier;
        let was_scaled = target > self.config.max_total_allocation;
        let scale_factor = if was_scaled {
            self.config.max_total_allocation / target
        } else {
            1.0
        };

        // Stage 3: per-position clamp and dollar conversion.
        let mut positions = Vec::with_capacity(markets.len());
        let mut total_allocation = 0.0;
        for (market, result) in markets.iter().zip(&sized) {
            let included = result.side != Side::None && result.raw_kelly > 0.0;
            let adjusted_fraction = if included {
                (result.raw_kelly * self.config.fraction_multiplier * scale_factor)
                    .min(self.config.max_position_size)
            } else {
                0.0
            };
            total_allocation += adjusted_fraction;

            positions.push(PortfolioPosition {
                market_id: market.market_id.clone(),
                side: result.side,
                edge: result.edge,
                raw_fraction: result.raw_kelly,
                adjusted_fraction,
                dollar_amount: Decimal::from_f64(adjusted_fraction).unwrap_or_default()
                    * bankroll,
            });
        }

        debug!(
            markets = markets.len(),
            total_allocation, was_scaled, "portfolio sized"
        );

        Ok(PortfolioAllocation {
            positions,
            total_allocation,
            was_scaled,
        })
    }
}
