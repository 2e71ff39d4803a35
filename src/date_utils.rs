use std::str::FromStr;

use chrono::{Datelike, Duration, Local, Months, NaiveDate};

use crate::error::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a stored transaction date.
///
/// Accepts `YYYY-MM-DD` and ISO timestamps whose first ten characters are a
/// date (`2024-03-01T09:30:00Z`). Anything else is `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(date);
    }
    match s.get(..11) {
        Some(prefix) if prefix.ends_with('T') => {
            NaiveDate::parse_from_str(&prefix[..10], DATE_FORMAT).ok()
        }
        _ => None,
    }
}

/// 1970-01-01, the position malformed dates take when ordering by date.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Date used for ordering: the parsed date, or epoch-start when unparseable.
pub fn sort_date(s: &str) -> NaiveDate {
    parse_date(s).unwrap_or_else(epoch)
}

/// Sunday-based week of year: `ceil((days_since_jan1 + jan1_weekday + 1) / 7)`
/// where `jan1_weekday` counts from Sunday = 0.
///
/// Late-December dates can land in week 53 or 54 depending on the weekday of
/// January 1st and whether the year is a leap year.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1_offset = date
        .with_ordinal(1)
        .map(|jan1| jan1.weekday().num_days_from_sunday())
        .unwrap_or(0);
    (date.ordinal0() + jan1_offset + 1).div_ceil(7)
}

/// Trait for query params that carry an optional date window, either as
/// explicit bounds or as a named preset.
#[allow(clippy::wrong_self_convention)]
pub trait DateFilterable {
    fn from_date(&self) -> Option<&String>;
    fn to_date(&self) -> Option<&String>;
    fn preset(&self) -> Option<&String>;

    /// A known preset wins over explicit bounds. Blank bounds are unset;
    /// bounds that are not `YYYY-MM-DD` are a validation error.
    fn resolve_date_range(&self, today: NaiveDate) -> AppResult<DateRange> {
        if let Some(preset) = self.preset().and_then(|p| p.parse::<DatePreset>().ok()) {
            return Ok(DateRange::from_preset(preset, today));
        }

        let from = parse_bound(self.from_date())?;
        let to = parse_bound(self.to_date())?;
        Ok(DateRange::between(from, to))
    }

    /// Same as [`resolve_date_range`](Self::resolve_date_range) against the
    /// local calendar date.
    fn resolve_date_range_today(&self) -> AppResult<DateRange> {
        self.resolve_date_range(Local::now().date_naive())
    }
}

fn parse_bound(value: Option<&String>) -> AppResult<Option<NaiveDate>> {
    match value.map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Some)
            .map_err(|_| AppError::Validation(format!("Invalid date: {s}"))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    ThisYear,
    LastWeek,
    LastMonth,
    LastQuarter,
    LastYear,
    All,
}

impl FromStr for DatePreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "this_week" => Ok(Self::ThisWeek),
            "this_month" => Ok(Self::ThisMonth),
            "this_quarter" => Ok(Self::ThisQuarter),
            "this_year" => Ok(Self::ThisYear),
            "last_week" => Ok(Self::LastWeek),
            "last_month" => Ok(Self::LastMonth),
            "last_quarter" => Ok(Self::LastQuarter),
            "last_year" => Ok(Self::LastYear),
            "all" => Ok(Self::All),
            _ => Err(()),
        }
    }
}

impl DatePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
            Self::ThisQuarter => "this_quarter",
            Self::ThisYear => "this_year",
            Self::LastWeek => "last_week",
            Self::LastMonth => "last_month",
            Self::LastQuarter => "last_quarter",
            Self::LastYear => "last_year",
            Self::All => "all",
        }
    }
}

/// Inclusive date window. Either side may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub preset: Option<DatePreset>,
}

impl DateRange {
    pub fn between(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from,
            to,
            preset: None,
        }
    }

    pub fn from_preset(preset: DatePreset, today: NaiveDate) -> Self {
        let (from, to) = match preset {
            DatePreset::ThisWeek => (week_start(today), week_end(today)),
            DatePreset::LastWeek => {
                let last_week = today - Duration::days(7);
                (week_start(last_week), week_end(last_week))
            }
            DatePreset::ThisMonth => (month_start(today), month_end(today)),
            DatePreset::LastMonth => {
                let last_month = month_start(today) - Duration::days(1);
                (month_start(last_month), month_end(last_month))
            }
            DatePreset::ThisQuarter => (quarter_start(today), quarter_end(today)),
            DatePreset::LastQuarter => {
                let last_quarter = quarter_start(today) - Duration::days(1);
                (quarter_start(last_quarter), quarter_end(last_quarter))
            }
            DatePreset::ThisYear => (year_start(today), year_end(today)),
            DatePreset::LastYear => {
                let last_year = year_start(today) - Duration::days(1);
                (year_start(last_year), year_end(last_year))
            }
            DatePreset::All => {
                return Self {
                    from: None,
                    to: None,
                    preset: Some(preset),
                }
            }
        };
        Self {
            from: Some(from),
            to: Some(to),
            preset: Some(preset),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Whether a stored date string falls inside the window. With no bounds
    /// set everything matches; with any bound set, unparseable dates never do.
    pub fn contains(&self, date: &str) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let Some(date) = parse_date(date) else {
            return false;
        };
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Duration::days(days_from_monday as i64)
}

fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

fn quarter_start(date: NaiveDate) -> NaiveDate {
    let start_month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), start_month, 1).unwrap_or(date)
}

fn quarter_end(date: NaiveDate) -> NaiveDate {
    quarter_start(date)
        .checked_add_months(Months::new(3))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

fn year_start(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

fn year_end(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date)
}
