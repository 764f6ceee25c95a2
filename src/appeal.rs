//! Customer appeals against flagged or blocked transactions

use crate::FraudStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Appeal errors
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppealError {
    #[error("No analysed transaction to appeal")]
    NoActiveResult,

    #[error("Transaction {0} was marked safe and cannot be appealed")]
    NotAppealable(String),

    #[error("Appeal references {found}, but the active transaction is {expected}")]
    TransactionMismatch { expected: String, found: String },

    #[error("Appeal reason is required")]
    MissingReason,

    #[error("Verification method is required")]
    MissingVerificationMethod,
}

/// Why the customer believes the transaction is legitimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AppealReason {
    AuthorizedPurchase,
    FamilyMember,
    BusinessTravel,
    RecurringPayment,
    Other,
}

impl std::fmt::Display for AppealReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppealReason::AuthorizedPurchase => write!(f, "authorized-purchase"),
            AppealReason::FamilyMember => write!(f, "family-member"),
            AppealReason::BusinessTravel => write!(f, "business-travel"),
            AppealReason::RecurringPayment => write!(f, "recurring-payment"),
            AppealReason::Other => write!(f, "other"),
        }
    }
}

/// How the customer will prove their identity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationMethod {
    Sms,
    Email,
    PhoneCall,
    BranchVisit,
}

impl std::fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationMethod::Sms => write!(f, "sms"),
            VerificationMethod::Email => write!(f, "email"),
            VerificationMethod::PhoneCall => write!(f, "phone-call"),
            VerificationMethod::BranchVisit => write!(f, "branch-visit"),
        }
    }
}

/// A submitted appeal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealData {
    pub transaction_id: String,
    pub reason: AppealReason,
    /// Free text, may be empty
    pub explanation: String,
    pub verification_method: VerificationMethod,
}

/// Partially filled appeal form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppealDraft {
    pub reason: Option<AppealReason>,
    pub explanation: String,
    pub verification_method: Option<VerificationMethod>,
}

impl AppealDraft {
    /// Complete the draft for the given transaction
    pub fn finish(self, transaction_id: impl Into<String>) -> Result<AppealData, AppealError> {
        let reason = self.reason.ok_or(AppealError::MissingReason)?;
        let verification_method = self
            .verification_method
            .ok_or(AppealError::MissingVerificationMethod)?;

        Ok(AppealData {
            transaction_id: transaction_id.into(),
            reason,
            explanation: self.explanation,
            verification_method,
        })
    }
}

/// Check an analysis status admits an appeal
pub(crate) fn ensure_appealable(
    transaction_id: &str,
    status: FraudStatus,
) -> Result<(), AppealError> {
    match status {
        FraudStatus::Safe => Err(AppealError::NotAppealable(transaction_id.to_string())),
        FraudStatus::Suspicious | FraudStatus::Blocked => Ok(()),
    }
}
