//! Fraud scoring demo
//!
//! Seeds a dashboard with synthetic transactions, scores a hand-entered one and
//! walks it through the appeal flow.
//!
//! Usage: `cargo run --example score_transactions [config.json]`

use chrono::Local;
use fraud_risk_engine::{
    AppState, AppealDraft, AppealReason, DemoConfig, FraudEngine, SequentialIds,
    SyntheticGenerator, Tab, TransactionForm, VerificationMethod,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::from_json_file(path)?,
        None => DemoConfig::default(),
    };

    println!("=== Fraud Risk Engine ===\n");

    let engine = FraudEngine::new();
    let now = Local::now().fixed_offset();

    // 1. Seed history with synthetic data
    println!("1. Synthetic History");
    let mut generator =
        SyntheticGenerator::seeded(config.generator.clone(), SequentialIds::new("SYN"));
    let seeded: Vec<_> = engine
        .analyze_batch(generator.generate_batch(now))
        .into_iter()
        .collect::<Result<_, _>>()?;

    for result in &seeded {
        let analysis = result.analysis();
        println!(
            "   {:<12} ${:>9.2}  {:<24} {:<26} {:>3}  {}",
            result.transaction().id,
            result.transaction().amount,
            result.transaction().location,
            result.transaction().merchant,
            analysis.risk_score,
            analysis.status
        );
    }
    println!();

    let mut state = match config.history_limit {
        Some(limit) => AppState::with_history_limit(limit),
        None => AppState::new(),
    }
    .seeded(seeded);

    // 2. Score a hand-entered transaction
    println!("2. Live Transaction");
    let form = TransactionForm {
        amount: "12000".to_string(),
        location: "Nigeria".to_string(),
        merchant: "ATM Withdrawal".to_string(),
        card_number: "****-****-****-4821".to_string(),
        customer_id: "CUST-1001".to_string(),
        timestamp: Some("2024-11-06T02:30:00+01:00".to_string()),
    };
    let mut ids = SequentialIds::new("TXN");
    let result = engine.analyze(form.submit(&mut ids, now)?)?;
    println!("{}", result.analysis().to_json()?);
    println!("   Audit digest: {}", result.digest()?);
    println!();

    state = state.submit(result).select_tab(Tab::Customer);

    // 3. Customer appeal
    println!("3. Customer Appeal");
    if let Some(notice) = state.current().and_then(|r| r.customer_notice()) {
        println!("   {}", notice);
    }
    let transaction_id = state
        .current()
        .map(|r| r.transaction().id.clone())
        .unwrap_or_default();
    let appeal = AppealDraft {
        reason: Some(AppealReason::BusinessTravel),
        explanation: "Withdrawing cash on a work trip".to_string(),
        verification_method: Some(VerificationMethod::Sms),
    }
    .finish(transaction_id)?;
    state = state.open_appeal()?.submit_appeal(&appeal)?;
    println!("   Appeal submitted for {}", appeal.transaction_id);
    println!();

    // 4. Dashboard
    println!("=== Dashboard ===");
    let stats = state.stats();
    println!("   Total:      {}", stats.total);
    println!("   Safe:       {}", stats.safe);
    println!("   Suspicious: {}", stats.suspicious);
    println!("   Blocked:    {}", stats.blocked);
    println!("   Avg score:  {:.1}", stats.avg_risk_score);

    Ok(())
}
