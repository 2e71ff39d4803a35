//! Period reports: income and expense summed per day, week, month or year.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::date_utils::{sort_date, week_number};
use crate::models::{Transaction, TransactionKind};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(format!("Unknown granularity: {s}")),
        }
    }
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// Grouping key for one report row. Rows are identified and ordered by the
/// rendered label, see [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKey {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Year(i32),
}

impl PeriodKey {
    /// Unparseable dates take 1970-01-01, so they share a bucket with any
    /// real entries of that day, week, month or year.
    pub fn for_date(date: &str, granularity: Granularity) -> Self {
        let date = sort_date(date);
        match granularity {
            Granularity::Daily => Self::Day(date),
            Granularity::Weekly => Self::Week {
                year: date.year(),
                week: week_number(date),
            },
            Granularity::Monthly => Self::Month {
                year: date.year(),
                month: date.month(),
            },
            Granularity::Yearly => Self::Year(date.year()),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Week { year, week } => write!(f, "{year}-W{week}"),
            Self::Month { year, month } => write!(f, "{year}-{month:02}"),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub period: String,
    pub income: f64,
    /// Magnitude of spending; never negative.
    pub expense: f64,
}

/// Sum income and expense per period.
///
/// Rows come in descending order of the period label compared as text. For
/// daily, monthly and yearly labels that is newest first; unpadded week
/// labels put `2024-W9` ahead of `2024-W10`. Only periods containing at
/// least one transaction produce a row.
pub fn aggregate(transactions: &[Transaction], granularity: Granularity) -> Vec<PeriodTotals> {
    let mut groups: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for t in transactions {
        let entry = groups
            .entry(PeriodKey::for_date(&t.date, granularity).to_string())
            .or_insert((0.0, 0.0));
        match t.kind() {
            TransactionKind::Income => entry.0 += t.amount,
            TransactionKind::Expense => entry.1 += t.amount.abs(),
        }
    }

    groups
        .into_iter()
        .rev()
        .map(|(period, (income, expense))| PeriodTotals {
            period,
            income,
            expense,
        })
        .collect()
}

/// Largest income or expense across `rows`, used to size report bars.
/// Falls back to 1 so callers can always divide by it.
pub fn bar_scale(rows: &[PeriodTotals]) -> f64 {
    let max = rows
        .iter()
        .map(|row| row.income.max(row.expense))
        .fold(0.0, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}
