//! Self-contained fraud check payload
//!
//! Bundles the three evaluator inputs so API handlers and queue consumers can
//! deserialize a request and hand it straight to
//! [`FraudDetectionSystem`](crate::FraudDetectionSystem).

use crate::{FraudError, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCheckRequest {
    pub current: Transaction,
    /// Prior transactions of the same account, any order
    #[serde(default)]
    pub history: Vec<Transaction>,
    #[serde(default)]
    pub blacklist: HashSet<String>,
}

impl FraudCheckRequest {
    /// Request with empty history and blacklist
    pub fn new(current: Transaction) -> Self {
        Self {
            current,
            history: Vec::new(),
            blacklist: HashSet::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<Transaction>) -> Self {
        self.history = history;
        self
    }

    pub fn with_blacklist(mut self, blacklist: HashSet<String>) -> Self {
        self.blacklist = blacklist;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, FraudError> {
        Ok(serde_json::from_str(json)?)
    }
}
