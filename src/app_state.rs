//! Application state around the engine
//!
//! The state is an immutable value. Every transition consumes the old state and
//! returns the next one, so callers never observe a half-updated view.

use crate::appeal::{ensure_appealable, AppealData, AppealError};
use crate::{FraudResult, FraudStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Active view
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Demo,
    Dashboard,
    Customer,
}

/// Aggregate counts over a result history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub safe: usize,
    pub suspicious: usize,
    pub blocked: usize,
    /// 0.0 when there are no results
    pub avg_risk_score: f64,
}

impl DashboardStats {
    pub fn from_results(results: &[FraudResult]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Default::default()
        };
        let mut score_sum = 0u64;

        for result in results {
            match result.status() {
                FraudStatus::Safe => stats.safe += 1,
                FraudStatus::Suspicious => stats.suspicious += 1,
                FraudStatus::Blocked => stats.blocked += 1,
            }
            score_sum += u64::from(result.analysis().risk_score);
        }

        if stats.total > 0 {
            stats.avg_risk_score = score_sum as f64 / stats.total as f64;
        }
        stats
    }

    /// Transactions stopped outright
    pub fn fraud_prevented(&self) -> usize {
        self.blocked
    }
}

/// Presentation state: current result, newest-first history, appeal visibility and tab
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    current: Option<FraudResult>,
    history: Vec<FraudResult>,
    show_appeal: bool,
    active_tab: Tab,
    history_limit: Option<usize>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state that keeps at most `limit` results
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history_limit: Some(limit),
            ..Default::default()
        }
    }

    /// Replace the history with pre-computed results, newest first
    pub fn seeded(self, results: Vec<FraudResult>) -> Self {
        let mut next = Self {
            history: results,
            ..self
        };
        next.enforce_limit();
        next
    }

    pub fn current(&self) -> Option<&FraudResult> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &[FraudResult] {
        &self.history
    }

    pub fn show_appeal(&self) -> bool {
        self.show_appeal
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_results(&self.history)
    }

    /// Record a freshly analysed transaction
    pub fn submit(self, result: FraudResult) -> Self {
        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.push(result.clone());
        history.extend(self.history);

        let mut next = Self {
            current: Some(result),
            history,
            show_appeal: false,
            ..self
        };
        next.enforce_limit();
        next
    }

    /// Show the appeal form for the current result
    pub fn open_appeal(self) -> Result<Self, AppealError> {
        let current = self.current.as_ref().ok_or(AppealError::NoActiveResult)?;
        ensure_appealable(&current.transaction().id, current.status())?;

        Ok(Self {
            show_appeal: true,
            ..self
        })
    }

    /// Accept an appeal for the current result and hide the form
    pub fn submit_appeal(self, appeal: &AppealData) -> Result<Self, AppealError> {
        let current = self.current.as_ref().ok_or(AppealError::NoActiveResult)?;
        let expected = &current.transaction().id;
        if *expected != appeal.transaction_id {
            return Err(AppealError::TransactionMismatch {
                expected: expected.clone(),
                found: appeal.transaction_id.clone(),
            });
        }
        ensure_appealable(expected, current.status())?;

        info!(
            transaction_id = %appeal.transaction_id,
            reason = %appeal.reason,
            verification_method = %appeal.verification_method,
            "Appeal submitted"
        );

        Ok(Self {
            show_appeal: false,
            ..self
        })
    }

    pub fn cancel_appeal(self) -> Self {
        Self {
            show_appeal: false,
            ..self
        }
    }

    pub fn select_tab(self, tab: Tab) -> Self {
        Self {
            active_tab: tab,
            ..self
        }
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.history_limit {
            self.history.truncate(limit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appeal::{AppealReason, VerificationMethod};
    use crate::{FraudEngine, Transaction};
    use chrono::DateTime;

    fn create_result(id: &str, amount: f64, location: &str, merchant: &str) -> FraudResult {
        let transaction = Transaction {
            id: id.to_string(),
            amount,
            location: location.to_string(),
            merchant: merchant.to_string(),
            timestamp: DateTime::parse_from_rfc3339("2024-11-06T14:00:00+00:00").unwrap(),
            card_number: "****-****-****-5555".to_string(),
            customer_id: "CUST-42".to_string(),
        };
        FraudEngine::new().analyze(transaction).unwrap()
    }

    fn create_appeal(id: &str) -> AppealData {
        AppealData {
            transaction_id: id.to_string(),
            reason: AppealReason::AuthorizedPurchase,
            explanation: String::new(),
            verification_method: VerificationMethod::Sms,
        }
    }

    #[test]
    fn test_submit_prepends_history() {
        let first = create_result("TXN-1", 100.0, "Chicago, IL", "Starbucks");
        let second = create_result("TXN-2", 6000.0, "Chicago, IL", "Target");

        let state = AppState::new().submit(first.clone()).submit(second.clone());

        assert_eq!(state.current(), Some(&second));
        assert_eq!(state.history(), &[second, first]);
    }

    #[test]
    fn test_history_limit() {
        let state = AppState::with_history_limit(2)
            .submit(create_result("TXN-1", 100.0, "Chicago, IL", "Starbucks"))
            .submit(create_result("TXN-2", 100.0, "Chicago, IL", "Starbucks"))
            .submit(create_result("TXN-3", 100.0, "Chicago, IL", "Starbucks"));

        let ids: Vec<&str> = state
            .history()
            .iter()
            .map(|r| r.transaction().id.as_str())
            .collect();
        assert_eq!(ids, vec!["TXN-3", "TXN-2"]);
    }

    #[test]
    fn test_appeal_flow() {
        let flagged = create_result("TXN-9", 6000.0, "Chicago, IL", "Target");
        let state = AppState::new().submit(flagged).open_appeal().unwrap();
        assert!(state.show_appeal());

        let state = state.submit_appeal(&create_appeal("TXN-9")).unwrap();
        assert!(!state.show_appeal());
    }

    #[test]
    fn test_cannot_appeal_safe_result() {
        let safe = create_result("TXN-1", 100.0, "Chicago, IL", "Starbucks");
        let result = AppState::new().submit(safe).open_appeal();

        assert_eq!(result, Err(AppealError::NotAppealable("TXN-1".to_string())));
    }

    #[test]
    fn test_cannot_appeal_without_result() {
        assert_eq!(AppState::new().open_appeal(), Err(AppealError::NoActiveResult));
        assert_eq!(
            AppState::new().submit_appeal(&create_appeal("TXN-1")),
            Err(AppealError::NoActiveResult)
        );
    }

    #[test]
    fn test_appeal_must_match_current() {
        let blocked = create_result("TXN-5", 12000.0, "Nigeria", "Cryptocurrency Exchange");
        let state = AppState::new().submit(blocked).open_appeal().unwrap();

        assert!(matches!(
            state.submit_appeal(&create_appeal("TXN-4")),
            Err(AppealError::TransactionMismatch { .. })
        ));
    }

    #[test]
    fn test_new_submission_closes_appeal() {
        let flagged = create_result("TXN-1", 6000.0, "Chicago, IL", "Target");
        let state = AppState::new()
            .submit(flagged)
            .open_appeal()
            .unwrap()
            .submit(create_result("TXN-2", 100.0, "Chicago, IL", "Starbucks"));

        assert!(!state.show_appeal());
    }

    #[test]
    fn test_cancel_and_tabs() {
        let flagged = create_result("TXN-1", 6000.0, "Chicago, IL", "Target");
        let state = AppState::new()
            .submit(flagged)
            .select_tab(Tab::Customer)
            .open_appeal()
            .unwrap()
            .cancel_appeal();

        assert!(!state.show_appeal());
        assert_eq!(state.active_tab(), Tab::Customer);
    }

    #[test]
    fn test_dashboard_stats() {
        let state = AppState::new().seeded(vec![
            create_result("TXN-1", 100.0, "Chicago, IL", "Starbucks"),
            create_result("TXN-2", 6000.0, "Chicago, IL", "Target"),
            create_result("TXN-3", 12000.0, "Nigeria", "ATM Withdrawal"),
        ]);
        let stats = state.stats();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.safe, 1);
        assert_eq!(stats.suspicious, 1);
        assert_eq!(stats.blocked, 1);
        assert_eq!(stats.fraud_prevented(), 1);
        // (0 + 30 + 115) / 3
        assert!((stats.avg_risk_score - 145.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = AppState::new().stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_risk_score, 0.0);
    }
}
