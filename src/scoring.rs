//! Score aggregation, classification and confidence

use crate::rules::RiskRule;
use crate::FraudStatus;

/// Score at or above which a transaction is blocked
pub const BLOCKED_THRESHOLD: u32 = 70;

/// Score at or above which a transaction is suspicious
pub const SUSPICIOUS_THRESHOLD: u32 = 30;

/// Confidence at a score of zero
pub const CONFIDENCE_FLOOR: f64 = 60.0;

/// Confidence never exceeds this
pub const CONFIDENCE_CAP: f64 = 95.0;

/// Reason reported when no rule fires
pub const DEFAULT_REASON: &str = "Normal transaction pattern";

/// Sum triggered deltas. Not clamped.
pub fn aggregate(triggered: &[&RiskRule]) -> u32 {
    triggered
        .iter()
        .fold(0u32, |score, rule| score.saturating_add(rule.delta))
}

/// Map a raw score to a status
pub fn classify(risk_score: u32) -> FraudStatus {
    if risk_score >= BLOCKED_THRESHOLD {
        FraudStatus::Blocked
    } else if risk_score >= SUSPICIOUS_THRESHOLD {
        FraudStatus::Suspicious
    } else {
        FraudStatus::Safe
    }
}

/// `min(95, 60 + 0.5 * score)`
pub fn confidence(risk_score: u32) -> f64 {
    (CONFIDENCE_FLOOR + f64::from(risk_score) * 0.5).min(CONFIDENCE_CAP)
}

/// Reasons of triggered rules in order, or the default reason
pub fn collect_reasons(triggered: &[&RiskRule]) -> Vec<String> {
    if triggered.is_empty() {
        return vec![DEFAULT_REASON.to_string()];
    }
    triggered.iter().map(|rule| rule.reason.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleId, RuleSet};

    #[test]
    fn test_threshold_exactness() {
        assert_eq!(classify(0), FraudStatus::Safe);
        assert_eq!(classify(29), FraudStatus::Safe);
        assert_eq!(classify(30), FraudStatus::Suspicious);
        assert_eq!(classify(69), FraudStatus::Suspicious);
        assert_eq!(classify(70), FraudStatus::Blocked);
        assert_eq!(classify(130), FraudStatus::Blocked);
    }

    #[test]
    fn test_confidence_formula() {
        assert_eq!(confidence(0), 60.0);
        assert_eq!(confidence(15), 67.5);
        assert_eq!(confidence(30), 75.0);
        assert_eq!(confidence(70), 95.0);
        assert_eq!(confidence(130), 95.0);
    }

    #[test]
    fn test_confidence_is_monotonic() {
        let mut previous = confidence(0);
        for score in 1..=200 {
            let current = confidence(score);
            assert!(current >= previous);
            assert!((CONFIDENCE_FLOOR..=CONFIDENCE_CAP).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn test_aggregate_sums_deltas() {
        let rules = RuleSet::standard();
        let triggered = vec![
            rules.get(RuleId::HighAmount).unwrap(),
            rules.get(RuleId::LargeTransaction).unwrap(),
        ];

        assert_eq!(aggregate(&triggered), 55);
        assert_eq!(aggregate(&[]), 0);
    }

    #[test]
    fn test_default_reason() {
        assert_eq!(collect_reasons(&[]), vec!["Normal transaction pattern".to_string()]);
    }

    #[test]
    fn test_reasons_follow_rule_order() {
        let rules = RuleSet::standard();
        let triggered = vec![
            rules.get(RuleId::HighRiskLocation).unwrap(),
            rules.get(RuleId::HighRiskMerchant).unwrap(),
        ];

        assert_eq!(
            collect_reasons(&triggered),
            vec![
                "Transaction from high-risk location".to_string(),
                "High-risk merchant category".to_string(),
            ]
        );
    }
}
