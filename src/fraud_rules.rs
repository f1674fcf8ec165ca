//! Fraud rule evaluation
//!
//! Four independent rules are checked against the current transaction
//! (boundaries shown are the [`FraudThresholds`] defaults):
//!
//! | Rule                  | Trigger                                           | Weight |
//! |-----------------------|---------------------------------------------------|--------|
//! | High value            | amount > 10 000                                   | 50     |
//! | Excessive activity    | more than 10 history entries within 60 minutes    | 30     |
//! | Rapid location change | other location within less than 30 minutes        | 20     |
//! | Blacklisted location  | location is on the blacklist                      | 100    |
//!
//! Weights of the first three add up. A blacklist hit replaces the sum with
//! 100 no matter what else fired.

use crate::{FraudCheckRequest, FraudCheckResult, FraudError, FraudThresholds, Transaction};
use chrono::Duration;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

const HIGH_VALUE_WEIGHT: u8 = 50;
const EXCESSIVE_ACTIVITY_WEIGHT: u8 = 30;
const RAPID_LOCATION_CHANGE_WEIGHT: u8 = 20;
/// Score forced by a blacklist hit
const BLACKLIST_RISK_SCORE: u8 = 100;

/// Which result flags a rule drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Sets `is_fraudulent` and `verification_required`
    Content,
    /// Sets `is_blocked`
    Volume,
    /// Sets `is_blocked` and overrides the score
    Blacklist,
}

/// A fraud rule that fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FraudRule {
    HighValue,
    ExcessiveActivity,
    RapidLocationChange,
    BlacklistedLocation,
}

impl FraudRule {
    /// Risk contribution. For the blacklist this is the overriding score.
    pub fn weight(&self) -> u8 {
        match self {
            FraudRule::HighValue => HIGH_VALUE_WEIGHT,
            FraudRule::ExcessiveActivity => EXCESSIVE_ACTIVITY_WEIGHT,
            FraudRule::RapidLocationChange => RAPID_LOCATION_CHANGE_WEIGHT,
            FraudRule::BlacklistedLocation => BLACKLIST_RISK_SCORE,
        }
    }

    pub fn category(&self) -> RuleCategory {
        match self {
            FraudRule::HighValue | FraudRule::RapidLocationChange => RuleCategory::Content,
            FraudRule::ExcessiveActivity => RuleCategory::Volume,
            FraudRule::BlacklistedLocation => RuleCategory::Blacklist,
        }
    }
}

impl std::fmt::Display for FraudRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FraudRule::HighValue => write!(f, "high_value"),
            FraudRule::ExcessiveActivity => write!(f, "excessive_activity"),
            FraudRule::RapidLocationChange => write!(f, "rapid_location_change"),
            FraudRule::BlacklistedLocation => write!(f, "blacklisted_location"),
        }
    }
}

/// Evaluate a transaction with the default thresholds
pub fn evaluate(
    current: &Transaction,
    history: &[Transaction],
    blacklist: &HashSet<String>,
) -> FraudCheckResult {
    FraudDetectionSystem::new().check_for_fraud(current, history, blacklist)
}

/// Rule-based fraud evaluator
///
/// Holds only its thresholds, so one instance can be shared freely across
/// threads and calls.
#[derive(Debug, Clone, Default)]
pub struct FraudDetectionSystem {
    thresholds: FraudThresholds,
}

impl FraudDetectionSystem {
    /// Create an evaluator with the default thresholds
    pub fn new() -> Self {
        Self {
            thresholds: FraudThresholds::default(),
        }
    }

    /// Create with custom thresholds
    pub fn with_thresholds(thresholds: FraudThresholds) -> Self {
        Self { thresholds }
    }

    /// Create with thresholds loaded from a JSON file
    pub fn from_thresholds_file(path: impl AsRef<Path>) -> Result<Self, FraudError> {
        Ok(Self::with_thresholds(FraudThresholds::from_file(path)?))
    }

    pub fn thresholds(&self) -> &FraudThresholds {
        &self.thresholds
    }

    /// Assess `current` against the account history and the location blacklist.
    ///
    /// History order does not matter. Empty history or blacklist simply means
    /// the corresponding rules cannot fire.
    pub fn check_for_fraud(
        &self,
        current: &Transaction,
        history: &[Transaction],
        blacklist: &HashSet<String>,
    ) -> FraudCheckResult {
        let triggered = self.triggered_rules(current, history, blacklist);
        let result = combine(&triggered);

        debug!(
            location = %current.location,
            amount = current.amount,
            history_len = history.len(),
            is_fraudulent = result.is_fraudulent,
            is_blocked = result.is_blocked,
            risk_score = result.risk_score,
            "Fraud check completed"
        );

        result
    }

    /// Rules that fire for this transaction, in rule order
    pub fn triggered_rules(
        &self,
        current: &Transaction,
        history: &[Transaction],
        blacklist: &HashSet<String>,
    ) -> Vec<FraudRule> {
        [
            self.check_high_value(current),
            self.check_excessive_activity(current, history),
            self.check_rapid_location_change(current, history),
            self.check_blacklist(current, blacklist),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Evaluate independent requests in order
    pub fn check_batch(&self, requests: &[FraudCheckRequest]) -> Vec<FraudCheckResult> {
        requests
            .iter()
            .map(|req| self.check_for_fraud(&req.current, &req.history, &req.blacklist))
            .collect()
    }

    /// Number of history entries within the activity window of `current`
    pub fn recent_transaction_count(&self, current: &Transaction, history: &[Transaction]) -> usize {
        let window = window_of(self.thresholds.activity_window_minutes);
        history
            .iter()
            .filter(|t| elapsed(current, t) <= window)
            .count()
    }

    fn check_high_value(&self, current: &Transaction) -> Option<FraudRule> {
        if current.amount > self.thresholds.high_value_amount {
            debug!(
                amount = current.amount,
                limit = self.thresholds.high_value_amount,
                "High value transaction"
            );
            return Some(FraudRule::HighValue);
        }
        None
    }

    fn check_excessive_activity(
        &self,
        current: &Transaction,
        history: &[Transaction],
    ) -> Option<FraudRule> {
        let recent = self.recent_transaction_count(current, history);
        if recent > self.thresholds.max_recent_transactions {
            debug!(
                recent,
                limit = self.thresholds.max_recent_transactions,
                window_minutes = self.thresholds.activity_window_minutes,
                "Excessive recent activity"
            );
            return Some(FraudRule::ExcessiveActivity);
        }
        None
    }

    fn check_rapid_location_change(
        &self,
        current: &Transaction,
        history: &[Transaction],
    ) -> Option<FraudRule> {
        let window = window_of(self.thresholds.location_change_window_minutes);
        let other = history
            .iter()
            .find(|t| elapsed(current, t) < window && t.location != current.location)?;

        debug!(
            from = %other.location,
            to = %current.location,
            seconds_apart = elapsed(current, other).num_seconds(),
            "Rapid location change"
        );
        Some(FraudRule::RapidLocationChange)
    }

    fn check_blacklist(
        &self,
        current: &Transaction,
        blacklist: &HashSet<String>,
    ) -> Option<FraudRule> {
        if blacklist.contains(&current.location) {
            warn!(location = %current.location, "Transaction from blacklisted location");
            return Some(FraudRule::BlacklistedLocation);
        }
        None
    }
}

/// Window length in minutes. Spans too long for `Duration` cover everything.
fn window_of(minutes: i64) -> Duration {
    Duration::try_minutes(minutes).unwrap_or(Duration::MAX)
}

/// Time between two transactions regardless of which came first
fn elapsed(current: &Transaction, other: &Transaction) -> Duration {
    (current.timestamp - other.timestamp).abs()
}

fn combine(triggered: &[FraudRule]) -> FraudCheckResult {
    let has = |category: RuleCategory| triggered.iter().any(|r| r.category() == category);
    let content_anomaly = has(RuleCategory::Content);
    let volume_anomaly = has(RuleCategory::Volume);
    let blacklisted = has(RuleCategory::Blacklist);

    let risk_score = if blacklisted {
        BLACKLIST_RISK_SCORE
    } else {
        triggered
            .iter()
            .fold(0u8, |score, rule| score.saturating_add(rule.weight()))
    };

    FraudCheckResult {
        is_fraudulent: content_anomaly,
        is_blocked: volume_anomaly || blacklisted,
        // Same trigger as is_fraudulent for now, kept as its own field.
        verification_required: content_anomaly,
        risk_score,
    }
}
