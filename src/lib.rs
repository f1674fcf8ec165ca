//! # Fraud Rule Engine
//!
//! Rule-based fraud assessment for a single financial transaction.
//!
//! ## Features
//!
//! - **High-value detection**: flags amounts above a fixed ceiling
//! - **Velocity checks**: counts account activity inside a trailing window
//! - **Rapid location change**: catches the same account transacting from
//!   different places within minutes
//! - **Location blacklist**: hard block with a saturated risk score
//!
//! Every assessment is a pure function of the transaction, the account's
//! history and the blacklist. Nothing is cached between calls and the clock
//! is never read, so the same inputs always produce the same result.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use fraud_rule_engine::{evaluate, Transaction};
//! use std::collections::HashSet;
//!
//! let at = Utc.with_ymd_and_hms(2025, 10, 16, 14, 0, 0).unwrap();
//! let current = Transaction::new(15_000.0, at, "Brasil");
//! let result = evaluate(&current, &[], &HashSet::new());
//!
//! assert!(result.is_fraudulent);
//! assert!(result.verification_required);
//! assert_eq!(result.risk_score, 50);
//! ```

pub mod config;
pub mod fraud_rules;
pub mod request;

pub use config::{ConfigError, FraudThresholds};
pub use fraud_rules::{evaluate, FraudDetectionSystem, FraudRule, RuleCategory};
pub use request::FraudCheckRequest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised at the edges of the engine (payload and config loading).
///
/// Evaluation itself is infallible.
#[derive(Error, Debug)]
pub enum FraudError {
    #[error("Invalid fraud check request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A single purchase event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Amount in currency units
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    /// Opaque location identifier, compared for equality only
    pub location: String,
}

impl Transaction {
    pub fn new(amount: f64, timestamp: DateTime<Utc>, location: impl Into<String>) -> Self {
        Self {
            amount,
            timestamp,
            location: location.into(),
        }
    }
}

/// Risk band derived from the risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,      // 0-25
    Medium,   // 26-50
    High,     // 51-75
    Critical, // 76-100
}

impl From<u8> for RiskLevel {
    fn from(score: u8) -> Self {
        match score {
            0..=25 => RiskLevel::Low,
            26..=50 => RiskLevel::Medium,
            51..=75 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }
}

/// Outcome of a fraud check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudCheckResult {
    /// A content rule fired (high value or rapid location change)
    pub is_fraudulent: bool,
    /// A volume rule or the blacklist fired
    pub is_blocked: bool,
    /// Hold for manual review
    pub verification_required: bool,
    pub risk_score: u8,
}

impl FraudCheckResult {
    /// Neither flagged as fraudulent nor blocked
    pub fn is_approved(&self) -> bool {
        !self.is_fraudulent && !self.is_blocked
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from(self.risk_score)
    }

    /// Export as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(is_fraudulent: bool, is_blocked: bool, risk_score: u8) -> FraudCheckResult {
        FraudCheckResult {
            is_fraudulent,
            is_blocked,
            verification_required: is_fraudulent,
            risk_score,
        }
    }

    #[test]
    fn test_transaction_new() {
        let at = Utc.with_ymd_and_hms(2025, 10, 16, 14, 0, 0).unwrap();
        let txn = Transaction::new(100.0, at, "Brasil");

        assert_eq!(txn.amount, 100.0);
        assert_eq!(txn.timestamp, at);
        assert_eq!(txn.location, "Brasil");
    }

    #[test]
    fn test_is_approved() {
        assert!(result(false, false, 0).is_approved());
        assert!(!result(true, false, 50).is_approved());
        assert!(!result(false, true, 30).is_approved());
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(result(false, false, 0).risk_level(), RiskLevel::Low);
        assert_eq!(result(false, false, 20).risk_level(), RiskLevel::Low);
        assert_eq!(result(false, true, 30).risk_level(), RiskLevel::Medium);
        assert_eq!(result(true, false, 50).risk_level(), RiskLevel::Medium);
        assert_eq!(result(true, false, 70).risk_level(), RiskLevel::High);
        assert_eq!(result(false, true, 100).risk_level(), RiskLevel::Critical);
    }

    #[test]
    fn test_json_export() {
        let json = result(true, true, 100).to_json().unwrap();

        assert!(json.contains("\"is_fraudulent\": true"));
        assert!(json.contains("\"verification_required\": true"));
        assert!(json.contains("\"risk_score\": 100"));
    }

    #[test]
    fn test_transaction_deserialize() {
        let txn: Transaction = serde_json::from_str(
            r#"{"amount": 250.5, "timestamp": "2025-10-16T14:00:00Z", "location": "EUA"}"#,
        )
        .unwrap();

        assert_eq!(txn.amount, 250.5);
        assert_eq!(txn.location, "EUA");
        assert_eq!(
            txn.timestamp,
            Utc.with_ymd_and_hms(2025, 10, 16, 14, 0, 0).unwrap()
        );
    }
}
