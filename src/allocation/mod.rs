//! Kelly-criterion capital allocation, single-market and portfolio-wide.

mod kelly;
mod portfolio;

pub use kelly::{EdgeAssessment, KellyAllocator, KellyResult, Side};
pub use portfolio::{MarketEstimate, PortfolioAllocation, PortfolioAllocator, PortfolioPosition};
