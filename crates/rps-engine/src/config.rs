//! Engine configuration

use serde::{Deserialize, Serialize};
use crate::error::EngineError;
use crate::symbol::Tier;

/// One whole token in the internal unit (18 decimals)
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Internal units credited per unit of deposited external value
pub const DEFAULT_VALUE_TO_UNIT_RATIO: u128 = 100;

/// 0.0001 of an 18-decimal external unit
pub const DEFAULT_MINIMUM_DEPOSIT: u128 = 100_000_000_000_000;

pub const DEFAULT_LOW_BID: u128 = UNIT;
pub const DEFAULT_MEDIUM_BID: u128 = 5 * UNIT;
pub const DEFAULT_HIGH_BID: u128 = 10 * UNIT;

/// Stake for each tier, in internal units
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidValues {
    pub low: u128,
    pub medium: u128,
    pub high: u128,
}

impl BidValues {
    pub fn get(&self, tier: Tier) -> u128 {
        match tier {
            Tier::Low => self.low,
            Tier::Medium => self.medium,
            Tier::High => self.high,
        }
    }

    pub fn set(&mut self, tier: Tier, value: u128) {
        match tier {
            Tier::Low => self.low = value,
            Tier::Medium => self.medium = value,
            Tier::High => self.high = value,
        }
    }
}

impl Default for BidValues {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_BID,
            medium: DEFAULT_MEDIUM_BID,
            high: DEFAULT_HIGH_BID,
        }
    }
}

/// Construction-time settings for [`crate::Engine`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `units = value * ratio`; withdrawals return `units / ratio`, truncated
    pub value_to_unit_ratio: u128,
    /// Smallest accepted deposit, in external value
    pub minimum_deposit: u128,
    pub bids: BidValues,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            value_to_unit_ratio: DEFAULT_VALUE_TO_UNIT_RATIO,
            minimum_deposit: DEFAULT_MINIMUM_DEPOSIT,
            bids: BidValues::default(),
        }
    }
}

impl EngineConfig {
    /// Parse from JSON. Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.value_to_unit_ratio == 0 {
            return Err(EngineError::InvalidRatio);
        }
        for tier in Tier::ALL {
            if self.bids.get(tier) == 0 {
                return Err(EngineError::InvalidBidValue);
            }
        }
        Ok(())
    }

    /// External value to internal units
    pub fn to_units(&self, value: u128) -> Result<u128, EngineError> {
        value
            .checked_mul(self.value_to_unit_ratio)
            .ok_or(EngineError::Overflow)
    }

    /// Internal units to external value, truncating toward zero
    pub fn to_value(&self, units: u128) -> u128 {
        units / self.value_to_unit_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.value_to_unit_ratio, 100);
        assert_eq!(config.minimum_deposit, UNIT / 10_000);
        assert!(config.bids.low < config.bids.medium);
        assert!(config.bids.medium < config.bids.high);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"value_to_unit_ratio": 1000}"#).unwrap();
        assert_eq!(config.value_to_unit_ratio, 1000);
        assert_eq!(config.minimum_deposit, DEFAULT_MINIMUM_DEPOSIT);
        assert_eq!(config.bids, BidValues::default());
    }

    #[test]
    fn test_from_json_bids() {
        let json = r#"{"bids": {"low": 1, "medium": 2, "high": 3}}"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.bids.get(Tier::Low), 1);
        assert_eq!(config.bids.get(Tier::Medium), 2);
        assert_eq!(config.bids.get(Tier::High), 3);
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        let mut config = EngineConfig::default();
        config.value_to_unit_ratio = 0;
        assert_eq!(config.validate(), Err(EngineError::InvalidRatio));

        let mut config = EngineConfig::default();
        config.bids.set(Tier::Medium, 0);
        assert_eq!(config.validate(), Err(EngineError::InvalidBidValue));
    }

    #[test]
    fn test_conversion_truncates() {
        let config = EngineConfig::default();
        assert_eq!(config.to_units(UNIT).unwrap(), 100 * UNIT);
        assert_eq!(config.to_value(100 * UNIT), UNIT);
        assert_eq!(config.to_value(199), 1);
        assert_eq!(config.to_value(99), 0);
        assert_eq!(config.to_units(u128::MAX), Err(EngineError::Overflow));
    }
}
