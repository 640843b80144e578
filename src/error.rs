//! Error types for the crate.
//!
//! Only two things can fail here: loading a configuration file, and
//! handing the Kelly allocator an input outside its accepted domain.
//! Everything else in the engine is total - empty or degenerate inputs
//! yield zeroed results rather than errors.

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Validation errors raised by the Kelly and portfolio allocators.
///
/// Each message names the violated field and the expected range. These
/// are raised, never silently clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// Estimated probability must lie in the closed unit interval.
    #[error("estimated probability must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { value: f64 },

    /// Market price must lie strictly inside the unit interval.
    #[error("market price must be within the open interval (0, 1), got {value}")]
    PriceOutOfRange { value: f64 },

    /// Kelly fraction multiplier must lie in (0, 1].
    #[error("fraction multiplier must be within (0, 1], got {value}")]
    MultiplierOutOfRange { value: f64 },
}
