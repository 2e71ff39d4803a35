use std::cmp::Ordering;

use crate::date_utils::sort_date;
use crate::models::Transaction;

/// Sort direction for a list view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// What a transaction list can be ordered by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    #[default]
    Date,
    /// Magnitude of the amount, ignoring sign.
    Amount,
}

/// A column plus direction, e.g. `dateDesc` or `amountHighAbs`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortKey {
    pub const DATE_DESC: Self = Self::new(SortColumn::Date, SortDirection::Desc);
    pub const DATE_ASC: Self = Self::new(SortColumn::Date, SortDirection::Asc);
    pub const AMOUNT_HIGH_ABS: Self = Self::new(SortColumn::Amount, SortDirection::Desc);
    pub const AMOUNT_LOW_ABS: Self = Self::new(SortColumn::Amount, SortDirection::Asc);

    pub const fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Parse a sort key name. The short `amountHigh`/`amountLow` spellings
    /// used by older clients are accepted as well.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dateDesc" => Some(Self::DATE_DESC),
            "dateAsc" => Some(Self::DATE_ASC),
            "amountHighAbs" | "amountHigh" => Some(Self::AMOUNT_HIGH_ABS),
            "amountLowAbs" | "amountLow" => Some(Self::AMOUNT_LOW_ABS),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match (self.column, self.direction) {
            (SortColumn::Date, SortDirection::Desc) => "dateDesc",
            (SortColumn::Date, SortDirection::Asc) => "dateAsc",
            (SortColumn::Amount, SortDirection::Desc) => "amountHighAbs",
            (SortColumn::Amount, SortDirection::Asc) => "amountLowAbs",
        }
    }

    /// Comparator for a stable sort. Equal keys compare `Equal` so that input
    /// order decides ties.
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = match self.column {
            SortColumn::Date => sort_date(&a.date).cmp(&sort_date(&b.date)),
            SortColumn::Amount => a.amount.abs().total_cmp(&b.amount.abs()),
        };
        self.direction.apply(ordering)
    }
}

/// Trait for query params that carry a sort key.
pub trait Sortable {
    fn sort_by(&self) -> Option<&String>;

    /// Unknown or missing keys fall back to newest-first.
    fn resolve_sort(&self) -> SortKey {
        self.sort_by()
            .and_then(|s| SortKey::from_str(s))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, amount: f64, date: &str) -> Transaction {
        Transaction {
            id: id.into(),
            description: id.into(),
            amount,
            date: date.into(),
            category: None,
        }
    }

    #[test]
    fn test_default_is_date_desc() {
        assert_eq!(SortKey::default(), SortKey::DATE_DESC);
        assert_eq!(SortKey::default().as_str(), "dateDesc");
    }

    #[test]
    fn test_names_round_trip() {
        for key in [
            SortKey::DATE_DESC,
            SortKey::DATE_ASC,
            SortKey::AMOUNT_HIGH_ABS,
            SortKey::AMOUNT_LOW_ABS,
        ] {
            assert_eq!(SortKey::from_str(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::from_str("amountHigh"), Some(SortKey::AMOUNT_HIGH_ABS));
        assert_eq!(SortKey::from_str("amountLow"), Some(SortKey::AMOUNT_LOW_ABS));
        assert_eq!(SortKey::from_str("payee"), None);
    }

    #[test]
    fn test_amount_compares_magnitude() {
        let big_expense = tx("a", -300.0, "2024-01-01");
        let small_income = tx("b", 20.0, "2024-01-01");
        assert_eq!(
            SortKey::AMOUNT_HIGH_ABS.compare(&big_expense, &small_income),
            Ordering::Less
        );
        assert_eq!(
            SortKey::AMOUNT_LOW_ABS.compare(&big_expense, &small_income),
            Ordering::Greater
        );
    }

    #[test]
    fn test_malformed_date_is_oldest() {
        let bad = tx("a", 1.0, "n/a");
        let good = tx("b", 1.0, "1999-12-31");
        assert_eq!(SortKey::DATE_ASC.compare(&bad, &good), Ordering::Less);
        assert_eq!(SortKey::DATE_DESC.compare(&bad, &good), Ordering::Greater);
    }

    #[test]
    fn test_malformed_date_sorts_at_epoch_start() {
        let bad = tx("a", 1.0, "n/a");
        let before_epoch = tx("b", 1.0, "1969-07-20");
        let epoch_day = tx("c", 1.0, "1970-01-01");
        assert_eq!(SortKey::DATE_ASC.compare(&before_epoch, &bad), Ordering::Less);
        assert_eq!(SortKey::DATE_ASC.compare(&bad, &epoch_day), Ordering::Equal);
    }

    #[test]
    fn test_equal_keys_are_equal() {
        let a = tx("a", -5.0, "2024-01-01");
        let b = tx("b", 5.0, "2024-01-01");
        assert_eq!(SortKey::DATE_DESC.compare(&a, &b), Ordering::Equal);
        assert_eq!(SortKey::AMOUNT_HIGH_ABS.compare(&a, &b), Ordering::Equal);
    }
}
