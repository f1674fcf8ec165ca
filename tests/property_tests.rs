//! Property-based tests for the fraud rule combination policy

use chrono::{DateTime, Duration, TimeZone, Utc};
use fraud_rule_engine::{evaluate, FraudDetectionSystem, FraudRule, Transaction};
use proptest::prelude::*;
use std::collections::HashSet;

const LOCATIONS: [&str; 4] = ["Brasil", "EUA", "Chile", "Peru"];

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 16, 14, 0, 0).unwrap()
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (0u32..2_000_000, 0i64..(3 * 60 * 60), 0usize..LOCATIONS.len()).prop_map(
        |(cents, seconds_before, loc)| {
            Transaction::new(
                f64::from(cents) / 100.0,
                base_time() - Duration::seconds(seconds_before),
                LOCATIONS[loc],
            )
        },
    )
}

fn arb_current() -> impl Strategy<Value = Transaction> {
    (0u32..2_000_000, 0usize..LOCATIONS.len()).prop_map(|(cents, loc)| {
        Transaction::new(f64::from(cents) / 100.0, base_time(), LOCATIONS[loc])
    })
}

fn arb_blacklist() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set(
        prop::sample::select(LOCATIONS.to_vec()).prop_map(str::to_string),
        0..3,
    )
}

proptest! {
    /// Property: identical inputs give identical results
    #[test]
    fn evaluation_is_deterministic(
        current in arb_current(),
        history in prop::collection::vec(arb_transaction(), 0..30),
        blacklist in arb_blacklist(),
    ) {
        prop_assert_eq!(
            evaluate(&current, &history, &blacklist),
            evaluate(&current, &history, &blacklist)
        );
    }

    /// Property: history order has no effect on the result
    #[test]
    fn history_order_is_irrelevant(
        current in arb_current(),
        history in prop::collection::vec(arb_transaction(), 0..30),
        blacklist in arb_blacklist(),
    ) {
        let mut reversed = history.clone();
        reversed.reverse();

        prop_assert_eq!(
            evaluate(&current, &history, &blacklist),
            evaluate(&current, &reversed, &blacklist)
        );
    }

    /// Property: a blacklisted location always scores exactly 100 and blocks
    #[test]
    fn blacklist_forces_full_score(
        current in arb_current(),
        history in prop::collection::vec(arb_transaction(), 0..30),
    ) {
        let blacklist: HashSet<String> = [current.location.clone()].into();
        let result = evaluate(&current, &history, &blacklist);

        prop_assert_eq!(result.risk_score, 100);
        prop_assert!(result.is_blocked);
    }

    /// Property: without a blacklist hit the score is the sum of fired weights
    #[test]
    fn score_is_sum_of_triggered_weights(
        current in arb_current(),
        history in prop::collection::vec(arb_transaction(), 0..30),
    ) {
        let detector = FraudDetectionSystem::new();
        let blacklist = HashSet::new();
        let rules = detector.triggered_rules(&current, &history, &blacklist);
        let result = detector.check_for_fraud(&current, &history, &blacklist);

        let sum: u8 = rules.iter().map(FraudRule::weight).sum();
        prop_assert_eq!(result.risk_score, sum);
        prop_assert!([0u8, 20, 30, 50, 70, 80, 100].contains(&result.risk_score));
    }

    /// Property: verification mirrors the fraud flag
    #[test]
    fn verification_mirrors_fraud_flag(
        current in arb_current(),
        history in prop::collection::vec(arb_transaction(), 0..30),
        blacklist in arb_blacklist(),
    ) {
        let result = evaluate(&current, &history, &blacklist);
        prop_assert_eq!(result.verification_required, result.is_fraudulent);
    }
}
