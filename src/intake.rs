//! Transaction intake from raw form input

use crate::ids::IdSource;
use crate::{InputValidationError, Transaction};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Raw, unparsed transaction input as typed by a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    pub amount: String,
    pub location: String,
    pub merchant: String,
    pub card_number: String,
    pub customer_id: String,
    /// RFC 3339; the submission time is used when absent
    pub timestamp: Option<String>,
}

impl TransactionForm {
    /// Parse and validate the form into a transaction.
    /// An id is drawn from `ids` only once the input is known to be valid.
    pub fn submit<I: IdSource>(
        self,
        ids: &mut I,
        now: DateTime<FixedOffset>,
    ) -> Result<Transaction, InputValidationError> {
        let amount = parse_amount(&self.amount)?;
        let timestamp = match self.timestamp.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => now,
        };

        let mut transaction = Transaction {
            id: PENDING_ID.to_string(),
            amount,
            location: self.location,
            merchant: self.merchant,
            timestamp,
            card_number: self.card_number,
            customer_id: self.customer_id,
        };
        transaction.validate()?;

        transaction.id = ids.next_id();
        transaction.validate()?;
        Ok(transaction)
    }
}

const PENDING_ID: &str = "PENDING";

fn parse_amount(raw: &str) -> Result<f64, InputValidationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| InputValidationError::InvalidAmount(format!("'{}' is not a number", raw)))
}

/// Parse an RFC 3339 timestamp, keeping its offset
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, InputValidationError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| InputValidationError::InvalidTimestamp(format!("'{}': {}", raw, e)))
}
