//! Engine-agnostic domain records.

mod forecast;
mod id;
mod tier;

// Core domain types
pub use forecast::Forecast;
pub use id::MarketId;
pub use tier::{Tier, TierRequirement, DEFAULT_LADDER};
