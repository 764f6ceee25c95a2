//! Synthetic transactions for seeding demo data
//!
//! The generator carries no scoring logic. Everything it produces passes
//! [`Transaction::validate`].

use crate::config::GeneratorConfig;
use crate::ids::IdSource;
use crate::Transaction;
use chrono::{DateTime, Duration, FixedOffset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Candidate merchants
pub const MERCHANTS: &[&str] = &[
    "Amazon.com",
    "Walmart",
    "Starbucks",
    "Shell Gas Station",
    "ATM Withdrawal",
    "McDonald's",
    "Target",
    "Best Buy",
    "Online Gaming Site",
    "Cryptocurrency Exchange",
    "Local Grocery Store",
    "Hotel Booking",
    "Airline Tickets",
];

/// Candidate locations
pub const LOCATIONS: &[&str] = &[
    "New York, NY",
    "Los Angeles, CA",
    "Chicago, IL",
    "Houston, TX",
    "Nigeria",
    "Romania",
    "London, UK",
    "Unknown Location",
    "Miami, FL",
    "Seattle, WA",
    "Denver, CO",
];

/// Pseudo-random transaction generator
pub struct SyntheticGenerator<R: Rng, I: IdSource> {
    config: GeneratorConfig,
    rng: R,
    ids: I,
}

impl<I: IdSource> SyntheticGenerator<StdRng, I> {
    /// Use the configured seed, or OS entropy when none is set
    pub fn seeded(config: GeneratorConfig, ids: I) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng, ids)
    }
}

impl<R: Rng, I: IdSource> SyntheticGenerator<R, I> {
    pub fn new(config: GeneratorConfig, rng: R, ids: I) -> Self {
        Self { config, rng, ids }
    }

    /// Generate `batch_size` transactions timestamped before `now`
    pub fn generate_batch(&mut self, now: DateTime<FixedOffset>) -> Vec<Transaction> {
        let batch: Vec<Transaction> = (0..self.config.batch_size)
            .map(|_| self.generate_one(now))
            .collect();
        info!(count = batch.len(), "Generated synthetic transactions");
        batch
    }

    /// Generate a single transaction
    pub fn generate_one(&mut self, now: DateTime<FixedOffset>) -> Transaction {
        let probability = self.config.high_amount_probability;
        let high_risk = probability > 0.0 && self.rng.gen_bool(probability.min(1.0));
        let amount = if high_risk {
            self.draw_amount(self.config.high_amount_min, self.config.high_amount_max)
        } else {
            self.draw_amount(self.config.normal_amount_min, self.config.normal_amount_max)
        };

        let location = LOCATIONS[self.rng.gen_range(0..LOCATIONS.len())];
        let merchant = MERCHANTS[self.rng.gen_range(0..MERCHANTS.len())];

        let lookback_ms = self.config.lookback_hours.saturating_mul(60 * 60 * 1000);
        let offset_ms = if lookback_ms > 0 {
            self.rng.gen_range(0..lookback_ms)
        } else {
            0
        };

        Transaction {
            id: self.ids.next_id(),
            amount,
            location: location.to_string(),
            merchant: merchant.to_string(),
            // Offsets reaching before chrono's earliest date fall back to `now`
            timestamp: now
                .checked_sub_signed(Duration::milliseconds(offset_ms))
                .unwrap_or(now),
            card_number: format!("****-****-****-{}", self.rng.gen_range(1000..=9999)),
            customer_id: format!("CUST-{}", self.rng.gen_range(0..10_000)),
        }
    }

    fn draw_amount(&mut self, min: u32, max: u32) -> f64 {
        if max <= min {
            return f64::from(min);
        }
        f64::from(self.rng.gen_range(min..max))
    }
}
