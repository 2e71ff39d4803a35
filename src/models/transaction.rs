use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::category::OTHER_CATEGORY;

/// A single income or expense entry as stored in `data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    /// Negative for expenses, zero or positive for income.
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_stored_amount"
    )]
    pub amount: f64,
    /// `YYYY-MM-DD`. Kept as received so that legacy values survive a rewrite.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn of(amount: f64) -> Self {
        if amount < 0.0 {
            Self::Expense
        } else {
            Self::Income
        }
    }
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::of(self.amount)
    }

    /// Category used for filtering and display; missing or blank is `"Other"`.
    pub fn category_or_default(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => OTHER_CATEGORY,
        }
    }
}

/// Create/update payload. Every field is optional at the decoding stage so
/// that a missing field becomes a 400 rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTransaction {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_optional_amount"
    )]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub category: Option<String>,
}

impl NewTransaction {
    /// Build the stored record for `id`.
    ///
    /// Description, amount and date are required; a zero amount counts as
    /// missing, matching what clients have always been told.
    pub fn into_transaction(self, id: String) -> AppResult<Transaction> {
        let missing = || AppError::Validation("Missing required fields".into());

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .ok_or_else(missing)?;
        let amount = self.amount.filter(|a| *a != 0.0).ok_or_else(missing)?;
        let date = self
            .date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .ok_or_else(missing)?;

        Ok(Transaction {
            id,
            description,
            amount,
            date,
            category: self.category.map(|c| c.trim().to_string()),
        })
    }
}
