//! Rule boundaries for the fraud evaluator
//!
//! Only the trigger boundaries are configurable. Rule weights are fixed in
//! [`crate::fraud_rules`] so that scores stay comparable across deployments.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Threshold loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read thresholds file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse thresholds: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}

/// Fraud rule thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudThresholds {
    /// Amounts strictly above this are high value
    pub high_value_amount: f64,
    /// Trailing window for the activity count, inclusive
    pub activity_window_minutes: i64,
    /// Activity count strictly above this blocks the transaction
    pub max_recent_transactions: usize,
    /// Window for the location change check, exclusive
    pub location_change_window_minutes: i64,
}

impl Default for FraudThresholds {
    fn default() -> Self {
        Self {
            high_value_amount: 10_000.0,
            activity_window_minutes: 60,
            max_recent_transactions: 10,
            location_change_window_minutes: 30,
        }
    }
}

impl FraudThresholds {
    /// Parse thresholds from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let thresholds: Self = serde_json::from_str(json)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Load thresholds from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let thresholds = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            high_value_amount = thresholds.high_value_amount,
            activity_window_minutes = thresholds.activity_window_minutes,
            max_recent_transactions = thresholds.max_recent_transactions,
            location_change_window_minutes = thresholds.location_change_window_minutes,
            "Loaded fraud thresholds"
        );
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.high_value_amount.is_finite() || self.high_value_amount < 0.0 {
            return Err(ConfigError::InvalidThreshold(format!(
                "high_value_amount must be a non-negative number, got {}",
                self.high_value_amount
            )));
        }

        if self.activity_window_minutes <= 0 {
            return Err(ConfigError::InvalidThreshold(format!(
                "activity_window_minutes must be positive, got {}",
                self.activity_window_minutes
            )));
        }

        if self.location_change_window_minutes <= 0 {
            return Err(ConfigError::InvalidThreshold(format!(
                "location_change_window_minutes must be positive, got {}",
                self.location_change_window_minutes
            )));
        }

        for (name, minutes) in [
            ("activity_window_minutes", self.activity_window_minutes),
            (
                "location_change_window_minutes",
                self.location_change_window_minutes,
            ),
        ] {
            if Duration::try_minutes(minutes).is_none() {
                return Err(ConfigError::InvalidThreshold(format!(
                    "{} is out of range, got {}",
                    name, minutes
                )));
            }
        }

        Ok(())
    }
}
