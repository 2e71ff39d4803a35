//! Transaction list filtering, ordering and totals.
//!
//! Everything here is a pure function of a collection snapshot and an
//! explicit [`FilterCriteria`] value; nothing is cached or retained between
//! calls.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::date_utils::DateRange;
use crate::models::{Transaction, TransactionKind};
use crate::sort_utils::SortKey;

/// Sentinel that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

/// Which side of the ledger to keep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// Unknown values fall back to `All`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "income" => Self::Income,
            "expense" => Self::Expense,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            Self::All => true,
            Self::Income => kind == TransactionKind::Income,
            Self::Expense => kind == TransactionKind::Expense,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the description. Empty matches all.
    pub search: String,
    /// Exact effective category; `None` or `"All"` disables the filter.
    pub category: Option<String>,
    pub kind: TypeFilter,
    pub date_range: DateRange,
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Whether `transaction` passes every active predicate.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_search(transaction)
            && self.matches_category(transaction)
            && self.kind.matches(transaction.kind())
            && self.date_range.contains(&transaction.date)
    }

    fn matches_search(&self, transaction: &Transaction) -> bool {
        self.search.is_empty()
            || transaction
                .description
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }

    fn matches_category(&self, transaction: &Transaction) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => transaction.category_or_default() == category,
        }
    }
}

/// Income, expense and net over a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of amounts `>= 0`.
    pub total_income: f64,
    /// Sum of amounts `< 0`; never positive.
    pub total_expense: f64,
    pub net_balance: f64,
}

impl Totals {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (total_income, total_expense) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), t| match t.kind() {
                    TransactionKind::Income => (income + t.amount, expense),
                    TransactionKind::Expense => (income, expense + t.amount),
                });

        Self {
            total_income,
            total_expense,
            net_balance: total_income + total_expense,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilteredTransactions {
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
}

/// Keep the transactions matching `criteria`, order them by its sort key and
/// total the result.
///
/// The sort is stable: transactions with equal keys keep their input order.
pub fn filter_and_sort(transactions: &[Transaction], criteria: &FilterCriteria) -> FilteredTransactions {
    let mut matching: Vec<Transaction> = transactions
        .iter()
        .filter(|t| criteria.matches(t))
        .cloned()
        .collect();

    matching.sort_by(|a, b| criteria.sort.compare(a, b));

    let totals = Totals::from_transactions(&matching);
    FilteredTransactions {
        transactions: matching,
        totals,
    }
}

/// Choices for a category dropdown: `"All"` followed by every distinct
/// effective category in the collection, sorted.
pub fn category_options(transactions: &[Transaction]) -> Vec<String> {
    let distinct: BTreeSet<&str> = transactions.iter().map(|t| t.category_or_default()).collect();

    std::iter::once(ALL_CATEGORIES)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}
