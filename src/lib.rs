//! # Fraud Risk Engine
//!
//! Deterministic, rule-based risk assessment for single financial transactions.
//!
//! ## Features
//!
//! - **Rule Registry**: an explicit, ordered table of risk rules
//! - **Classification**: fixed thresholds map the raw score to `safe`, `suspicious` or `blocked`
//! - **Confidence**: bounded estimate in `[60, 95]`, monotonic in the score
//! - **Justifications**: the reason of every triggered rule, in rule order
//! - **Input Validation**: malformed transactions are rejected before scoring
//!
//! The engine is pure and stateless. Intake, the synthetic generator, the appeal flow
//! and the application state machine are collaborators that only exchange the data
//! types defined here.

pub mod appeal;
pub mod app_state;
pub mod config;
#[cfg(feature = "generator")]
pub mod generator;
pub mod ids;
pub mod intake;
pub mod rules;
pub mod scoring;

pub use appeal::{AppealData, AppealDraft, AppealError, AppealReason, VerificationMethod};
pub use app_state::{AppState, DashboardStats, Tab};
pub use config::{ConfigError, DemoConfig, GeneratorConfig};
#[cfg(feature = "generator")]
pub use generator::SyntheticGenerator;
pub use ids::{IdSource, SequentialIds, UuidIds};
pub use intake::TransactionForm;
pub use rules::{Condition, RiskRule, RuleId, RuleSet};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputValidationError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Required field is empty: {0}")]
    EmptyField(String),
}

/// Risk classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FraudStatus {
    Safe,
    Suspicious,
    Blocked,
}

impl std::fmt::Display for FraudStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FraudStatus::Safe => write!(f, "safe"),
            FraudStatus::Suspicious => write!(f, "suspicious"),
            FraudStatus::Blocked => write!(f, "blocked"),
        }
    }
}

/// Transaction structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub location: String,
    pub merchant: String,
    /// Recorded with the local offset; rules read the local wall-clock hour
    pub timestamp: DateTime<FixedOffset>,
    /// Display-masked, never scored
    pub card_number: String,
    pub customer_id: String,
}

impl Transaction {
    /// Check the transaction can be scored
    pub fn validate(&self) -> Result<(), InputValidationError> {
        if !self.amount.is_finite() {
            return Err(InputValidationError::InvalidAmount(format!(
                "Amount {} is not a finite number",
                self.amount
            )));
        }

        if self.amount < 0.0 {
            return Err(InputValidationError::InvalidAmount(format!(
                "Amount {} is negative",
                self.amount
            )));
        }

        for (field, value) in [
            ("id", &self.id),
            ("location", &self.location),
            ("merchant", &self.merchant),
        ] {
            if value.trim().is_empty() {
                return Err(InputValidationError::EmptyField(field.to_string()));
            }
        }

        Ok(())
    }
}

/// Risk assessment of a single transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAnalysis {
    pub risk_score: u32,
    pub status: FraudStatus,
    /// Never empty
    pub reasons: Vec<String>,
    pub confidence: f64,
}

impl FraudAnalysis {
    /// Export as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A transaction paired with its analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudResult {
    transaction: Transaction,
    analysis: FraudAnalysis,
}

impl FraudResult {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn analysis(&self) -> &FraudAnalysis {
        &self.analysis
    }

    pub fn status(&self) -> FraudStatus {
        self.analysis.status
    }

    /// Only flagged or blocked transactions can be appealed
    pub fn is_appealable(&self) -> bool {
        self.analysis.status != FraudStatus::Safe
    }

    /// Customer-facing alert text for non-safe results
    pub fn customer_notice(&self) -> Option<String> {
        let action = match self.analysis.status {
            FraudStatus::Safe => return None,
            FraudStatus::Suspicious => "flagged",
            FraudStatus::Blocked => "blocked",
        };
        Some(format!(
            "Your transaction for ${:.2} at {} has been {} for security review.",
            self.transaction.amount, self.transaction.merchant, action
        ))
    }

    /// Hex SHA-256 of the canonical JSON form, for audit trails
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        let hash = Sha256::digest(&bytes);
        Ok(hash.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Export as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Rule-based fraud scoring engine
#[derive(Debug, Clone, Default)]
pub struct FraudEngine {
    rules: RuleSet,
}

impl FraudEngine {
    /// Create an engine over the standard rule set
    pub fn new() -> Self {
        Self {
            rules: RuleSet::standard(),
        }
    }

    /// Create an engine over a custom rule set
    pub fn with_rules(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Score a transaction
    pub fn evaluate(
        &self,
        transaction: &Transaction,
    ) -> Result<FraudAnalysis, InputValidationError> {
        if let Err(e) = transaction.validate() {
            warn!(transaction_id = %transaction.id, error = %e, "Rejected transaction");
            return Err(e);
        }

        let triggered = self.rules.triggered(transaction);
        let risk_score = scoring::aggregate(&triggered);
        let status = scoring::classify(risk_score);
        let confidence = scoring::confidence(risk_score);
        let reasons = scoring::collect_reasons(&triggered);

        debug!(
            transaction_id = %transaction.id,
            risk_score,
            status = %status,
            triggered = triggered.len(),
            "Scored transaction"
        );

        Ok(FraudAnalysis {
            risk_score,
            status,
            reasons,
            confidence,
        })
    }

    /// Score a transaction and pair it with its analysis
    pub fn analyze(&self, transaction: Transaction) -> Result<FraudResult, InputValidationError> {
        let analysis = self.evaluate(&transaction)?;
        Ok(FraudResult {
            transaction,
            analysis,
        })
    }

    /// Analyze multiple transactions in batch
    pub fn analyze_batch(
        &self,
        transactions: Vec<Transaction>,
    ) -> Vec<Result<FraudResult, InputValidationError>> {
        transactions.into_iter().map(|tx| self.analyze(tx)).collect()
    }
}

/// Score a transaction with the standard rule set
pub fn evaluate(transaction: &Transaction) -> Result<FraudAnalysis, InputValidationError> {
    FraudEngine::new().evaluate(transaction)
}
