use chrono::DateTime;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fraud_risk_engine::{
    FraudEngine, GeneratorConfig, SequentialIds, SyntheticGenerator, Transaction,
};

fn create_transaction() -> Transaction {
    Transaction {
        id: "TXN-BENCH".to_string(),
        amount: 12_000.0,
        location: "Nigeria".to_string(),
        merchant: "ATM Withdrawal".to_string(),
        timestamp: DateTime::parse_from_rfc3339("2024-11-06T02:00:00+00:00").unwrap(),
        card_number: "****-****-****-1234".to_string(),
        customer_id: "CUST-1".to_string(),
    }
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = FraudEngine::new();
    let transaction = create_transaction();

    c.bench_function("evaluate_single", |b| {
        b.iter(|| engine.evaluate(black_box(&transaction)))
    });
}

fn bench_batch(c: &mut Criterion) {
    let engine = FraudEngine::new();
    let config = GeneratorConfig {
        batch_size: 1_000,
        seed: Some(7),
        ..Default::default()
    };
    let now = DateTime::parse_from_rfc3339("2024-11-06T12:00:00+00:00").unwrap();
    let batch = SyntheticGenerator::seeded(config, SequentialIds::default()).generate_batch(now);

    c.bench_function("analyze_batch_1000", |b| {
        b.iter(|| engine.analyze_batch(black_box(batch.clone())))
    });
}

criterion_group!(benches, bench_evaluate, bench_batch);
criterion_main!(benches);
