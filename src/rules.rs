//! Risk rule registry
//!
//! Rules are plain data: a condition, a score delta and a reason. The order of a
//! [`RuleSet`] is the order reasons are reported in.

use crate::Transaction;
use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Locations treated as high risk (matched case-insensitively)
pub const HIGH_RISK_LOCATIONS: &[&str] = &["Nigeria", "Romania", "Unknown Location"];

/// Merchant categories treated as high risk (matched case-insensitively)
pub const HIGH_RISK_MERCHANTS: &[&str] = &["ATM", "Gas Station", "Online Gaming", "Cryptocurrency"];

/// Identifies a rule in the standard registry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    HighAmount,
    HighRiskLocation,
    LargeTransaction,
    UnusualHours,
    HighRiskMerchant,
    SmallAtmWithdrawal,
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleId::HighAmount => write!(f, "high_amount"),
            RuleId::HighRiskLocation => write!(f, "high_risk_location"),
            RuleId::LargeTransaction => write!(f, "large_transaction"),
            RuleId::UnusualHours => write!(f, "unusual_hours"),
            RuleId::HighRiskMerchant => write!(f, "high_risk_merchant"),
            RuleId::SmallAtmWithdrawal => write!(f, "small_atm_withdrawal"),
        }
    }
}

/// Predicate over a transaction
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `amount > threshold`
    AmountAbove(f64),
    /// `amount < threshold`
    AmountBelow(f64),
    /// Location contains any needle, ignoring case
    LocationContainsAny(&'static [&'static str]),
    /// Merchant contains any needle, ignoring case
    MerchantContainsAny(&'static [&'static str]),
    /// Merchant contains the needle exactly (case-sensitive)
    MerchantContains(&'static str),
    /// Local hour-of-day is `< earliest` or `> latest`
    HourOutside { earliest: u32, latest: u32 },
    /// Every inner condition holds
    All(Vec<Condition>),
}

impl Condition {
    /// Evaluate the condition against a transaction
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Condition::AmountAbove(threshold) => transaction.amount > *threshold,
            Condition::AmountBelow(threshold) => transaction.amount < *threshold,
            Condition::LocationContainsAny(needles) => {
                contains_any_ignore_case(&transaction.location, needles)
            }
            Condition::MerchantContainsAny(needles) => {
                contains_any_ignore_case(&transaction.merchant, needles)
            }
            Condition::MerchantContains(needle) => transaction.merchant.contains(needle),
            Condition::HourOutside { earliest, latest } => {
                let hour = transaction.timestamp.hour();
                hour < *earliest || hour > *latest
            }
            Condition::All(conditions) => conditions.iter().all(|c| c.matches(transaction)),
        }
    }
}

fn contains_any_ignore_case(haystack: &str, needles: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// A single risk contribution
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRule {
    pub id: RuleId,
    pub condition: Condition,
    pub delta: u32,
    pub reason: &'static str,
}

impl RiskRule {
    /// Check whether this rule fires for the transaction
    pub fn applies_to(&self, transaction: &Transaction) -> bool {
        self.condition.matches(transaction)
    }
}

/// Ordered rule registry
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<RiskRule>,
}

impl RuleSet {
    /// Build a registry from rules in evaluation order
    pub fn new(rules: Vec<RiskRule>) -> Self {
        Self { rules }
    }

    /// The standard six-rule registry
    pub fn standard() -> Self {
        Self::new(vec![
            RiskRule {
                id: RuleId::HighAmount,
                condition: Condition::AmountAbove(5000.0),
                delta: 30,
                reason: "High transaction amount",
            },
            RiskRule {
                id: RuleId::HighRiskLocation,
                condition: Condition::LocationContainsAny(HIGH_RISK_LOCATIONS),
                delta: 40,
                reason: "Transaction from high-risk location",
            },
            RiskRule {
                id: RuleId::LargeTransaction,
                condition: Condition::AmountAbove(10000.0),
                delta: 25,
                reason: "Unusually large transaction",
            },
            // The upper bound can never hold for hours 0-23; kept as observed.
            RiskRule {
                id: RuleId::UnusualHours,
                condition: Condition::HourOutside {
                    earliest: 6,
                    latest: 23,
                },
                delta: 15,
                reason: "Transaction during unusual hours",
            },
            RiskRule {
                id: RuleId::HighRiskMerchant,
                condition: Condition::MerchantContainsAny(HIGH_RISK_MERCHANTS),
                delta: 20,
                reason: "High-risk merchant category",
            },
            RiskRule {
                id: RuleId::SmallAtmWithdrawal,
                condition: Condition::All(vec![
                    Condition::AmountBelow(50.0),
                    Condition::MerchantContains("ATM"),
                ]),
                delta: 15,
                reason: "Small ATM withdrawal pattern",
            },
        ])
    }

    /// Rules that fire for the transaction, in registry order.
    /// Every rule is checked; there is no short-circuiting.
    pub fn triggered(&self, transaction: &Transaction) -> Vec<&RiskRule> {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(transaction))
            .collect()
    }

    /// Look up a rule by id
    pub fn get(&self, id: RuleId) -> Option<&RiskRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiskRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
