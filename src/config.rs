//! Reward shaping configuration.
//!
//! `discount` multiplies the next-state potential inside the shaping term,
//! `F = discount * Φ(s') - Φ(s)`. It defaults to 1 so the sum of shaped
//! rewards over an episode telescopes exactly. RL loops that discount
//! returns with some γ < 1 can pass the same γ here to keep the shaping
//! term policy-invariant under their own discounting.
//!
//! `record_trace` keeps a per-step [`EpisodeTrace`](crate::core::EpisodeTrace)
//! of transitions and interpretations. It is off by default since every
//! recorded step owns a copy of its interpretation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Discount must be finite and in (0, 1], got {0}")]
    InvalidDiscount(f64),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the simulator turns automaton transitions into rewards.
///
/// # Example
///
/// ```rust
/// use temporal_reward::config::ShapingConfig;
///
/// let config = ShapingConfig::from_json(r#"{ "discount": 0.99 }"#).unwrap();
/// assert_eq!(config.discount, 0.99);
/// assert!(config.reward_shaping);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingConfig {
    /// Multiplier applied to the next-state potential
    pub discount: f64,
    /// When false, only the terminal reward is paid (sparse reward)
    pub reward_shaping: bool,
    /// Record every step in the simulator's episode trace
    pub record_trace: bool,
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            discount: 1.0,
            reward_shaping: true,
            record_trace: false,
        }
    }
}

impl ShapingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_reward_shaping(mut self, enabled: bool) -> Self {
        self.reward_shaping = enabled;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.record_trace = enabled;
        self
    }

    /// Configuration that pays only the terminal reward.
    pub fn sparse() -> Self {
        Self::default().with_reward_shaping(false)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discount.is_finite() && self.discount > 0.0 && self.discount <= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidDiscount(self.discount))
        }
    }

    /// Parse and validate a JSON configuration; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_undiscounted_shaping() {
        let config = ShapingConfig::default();
        assert_eq!(config.discount, 1.0);
        assert!(config.reward_shaping);
        assert!(!config.record_trace);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = ShapingConfig::from_json("{}").unwrap();
        assert_eq!(config, ShapingConfig::default());
    }

    #[test]
    fn discount_out_of_range_is_rejected() {
        for discount in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let config = ShapingConfig::new().with_discount(discount);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidDiscount(_))
            ));
        }
    }

    #[test]
    fn json_with_invalid_discount_is_rejected() {
        let result = ShapingConfig::from_json(r#"{ "discount": 2.0 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidDiscount(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = ShapingConfig::from_json("{ discount: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn trace_recording_is_opt_in() {
        let config = ShapingConfig::from_json(r#"{ "record_trace": true }"#).unwrap();
        assert!(config.record_trace);
        assert!(config.reward_shaping);
        assert!(!ShapingConfig::new().with_trace(true).with_trace(false).record_trace);
    }

    #[test]
    fn sparse_disables_shaping() {
        let config = ShapingConfig::sparse();
        assert!(!config.reward_shaping);
        assert_eq!(config.discount, 1.0);
    }
}
