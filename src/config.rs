//! Engine configuration.
//!
//! Every tunable in the engine - bucket counts, half-lives, Kelly
//! multipliers, position caps - is an explicit value passed into the
//! component that uses it. There is no hidden global state; this module
//! only provides the default values, TOML loading for callers that keep
//! their tuning in a file, and a validation pass over the loaded values.

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub kelly: KellyConfig,
    #[serde(default)]
    pub portfolio: PortfolioConfig,
}

/// Tunables for the scoring half of the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Number of equal-width probability bins for calibration analysis.
    #[serde(default = "default_num_buckets")]
    pub num_buckets: usize,

    /// Half-life in days for recency-weighted scoring.
    #[serde(default = "default_half_life_days")]
    pub half_life_days: f64,

    /// Width in days of each time-series scoring period.
    #[serde(default = "default_period_days")]
    pub period_days: i64,
}

fn default_num_buckets() -> usize {
    10
}

fn default_half_life_days() -> f64 {
    90.0
}

fn default_period_days() -> i64 {
    30
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            num_buckets: default_num_buckets(),
            half_life_days: default_half_life_days(),
            period_days: default_period_days(),
        }
    }
}

/// Tunables for single-market Kelly sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct KellyConfig {
    /// Fractional Kelly multiplier in (0, 1]. 1.0 is full Kelly.
    #[serde(default = "default_kelly_multiplier")]
    pub fraction_multiplier: f64,

    /// Hard cap on the recommended bankroll fraction, in (0, 1].
    #[serde(default = "default_kelly_cap")]
    pub max_position_size: f64,
}

fn default_kelly_multiplier() -> f64 {
    1.0
}

fn default_kelly_cap() -> f64 {
    0.25
}

impl Default for KellyConfig {
    fn default() -> Self {
        Self {
            fraction_multiplier: default_kelly_multiplier(),
            max_position_size: default_kelly_cap(),
        }
    }
}

/// Tunables for simultaneous multi-market sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioConfig {
    /// Fractional Kelly multiplier applied across the portfolio.
    #[serde(default = "default_portfolio_multiplier")]
    pub fraction_multiplier: f64,

    /// Per-position bankroll fraction cap.
    #[serde(default = "default_portfolio_position_cap")]
    pub max_position_size: f64,

    /// Cap on the summed bankroll fraction across all positions.
    #[serde(default = "default_max_total_allocation")]
    pub max_total_allocation: f64,
}

fn default_portfolio_multiplier() -> f64 {
    0.5
}

fn default_portfolio_position_cap() -> f64 {
    0.15
}

fn default_max_total_allocation() -> f64 {
    0.8
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            fraction_multiplier: default_portfolio_multiplier(),
            max_position_size: default_portfolio_position_cap(),
            max_total_allocation: default_max_total_allocation(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file and validate it.
    ///
    /// Missing sections and fields fall back to their documented defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its documented domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.num_buckets == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.num_buckets",
                reason: "must be at least 1".into(),
            });
        }
        if self.scoring.half_life_days <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.half_life_days",
                reason: format!("must be positive, got {}", self.scoring.half_life_days),
            });
        }
        if self.scoring.period_days <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "scoring.period_days",
                reason: format!("must be positive, got {}", self.scoring.period_days),
            });
        }
        check_unit_interval("kelly.fraction_multiplier", self.kelly.fraction_multiplier)?;
        check_unit_interval("kelly.max_position_size", self.kelly.max_position_size)?;
        check_unit_interval(
            "portfolio.fraction_multiplier",
            self.portfolio.fraction_multiplier,
        )?;
        check_unit_interval(
            "portfolio.max_position_size",
            self.portfolio.max_position_size,
        )?;
        check_unit_interval(
            "portfolio.max_total_allocation",
            self.portfolio.max_total_allocation,
        )?;
        Ok(())
    }
}

/// Require a value in the half-open unit interval (0, 1].
fn check_unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be within (0, 1], got {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.scoring.num_buckets, 10);
        assert!((config.scoring.half_life_days - 90.0).abs() < f64::EPSILON);
        assert_eq!(config.scoring.period_days, 30);
        assert!((config.kelly.fraction_multiplier - 1.0).abs() < f64::EPSILON);
        assert!((config.kelly.max_position_size - 0.25).abs() < f64::EPSILON);
        assert!((config.portfolio.fraction_multiplier - 0.5).abs() < f64::EPSILON);
        assert!((config.portfolio.max_position_size - 0.15).abs() < f64::EPSILON);
        assert!((config.portfolio.max_total_allocation - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [portfolio]
            fraction_multiplier = 0.25
            "#,
        )
        .unwrap();

        assert!((config.portfolio.fraction_multiplier - 0.25).abs() < f64::EPSILON);
        assert!((config.portfolio.max_total_allocation - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.scoring.num_buckets, 10);
    }

    #[test]
    fn validate_rejects_out_of_domain_multiplier() {
        let mut config = EngineConfig::default();
        config.kelly.fraction_multiplier = 1.5;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "kelly.fraction_multiplier",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_zero_buckets() {
        let mut config = EngineConfig::default();
        config.scoring.num_buckets = 0;

        assert!(config.validate().is_err());
    }
}
