//! Fraud check walkthrough
//!
//! Runs the common rule scenarios and prints each assessment.
//! Set `RUST_LOG=fraud_rule_engine=debug` to see which rules fire.

use chrono::{Duration, TimeZone, Utc};
use fraud_rule_engine::{FraudCheckRequest, FraudDetectionSystem, Transaction};
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Fraud Rule Engine ===\n");

    let detector = FraudDetectionSystem::new();
    let now = Utc
        .with_ymd_and_hms(2025, 10, 16, 14, 0, 0)
        .single()
        .ok_or("invalid demo timestamp")?;

    let burst: Vec<Transaction> = (0..11)
        .map(|i| Transaction::new(50.0, now - Duration::minutes(60 - i * 5), "Brasil"))
        .collect();
    let blacklist: HashSet<String> = ["Brasil".to_string()].into();

    let scenarios = vec![
        (
            "Normal purchase",
            FraudCheckRequest::new(Transaction::new(100.0, now, "Brasil")),
        ),
        (
            "High value purchase",
            FraudCheckRequest::new(Transaction::new(15_000.0, now, "Brasil")),
        ),
        (
            "Burst of recent activity",
            FraudCheckRequest::new(Transaction::new(100.0, now, "Brasil")).with_history(burst),
        ),
        (
            "Rapid location change",
            FraudCheckRequest::new(Transaction::new(100.0, now, "Brasil")).with_history(vec![
                Transaction::new(50.0, now - Duration::minutes(20), "EUA"),
            ]),
        ),
        (
            "Blacklisted location",
            FraudCheckRequest::new(Transaction::new(100.0, now, "Brasil"))
                .with_blacklist(blacklist),
        ),
    ];

    for (i, (name, request)) in scenarios.iter().enumerate() {
        let result =
            detector.check_for_fraud(&request.current, &request.history, &request.blacklist);
        let rules =
            detector.triggered_rules(&request.current, &request.history, &request.blacklist);

        println!("{}. {}", i + 1, name);
        println!("   Rules fired: {:?}", rules);
        println!("   Risk level: {:?}", result.risk_level());
        println!("   Approved: {}", result.is_approved());
        println!("{}", result.to_json()?);
        println!();
    }

    // Requests arriving as JSON go through the same path.
    let payload = r#"{
        "current": {"amount": 12000.0, "timestamp": "2025-10-16T14:00:00Z", "location": "Chile"},
        "history": [{"amount": 80.0, "timestamp": "2025-10-16T13:50:00Z", "location": "Peru"}]
    }"#;
    let request = FraudCheckRequest::from_json(payload)?;
    let results = detector.check_batch(&[request]);
    println!("JSON request: {}", results[0].to_json()?);

    Ok(())
}
