use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_utils::DateFilterable;
use crate::error::AppResult;
use crate::models::Transaction;
use crate::services::filter::{self, FilterCriteria, Totals, TypeFilter};
use crate::sort_utils::Sortable;
use crate::state::AppState;

/// Filter state sent by list views. Blank values mean "not set".
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilterParams {
    #[serde(
        default,
        alias = "searchText",
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub search: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub kind: Option<String>,
    #[serde(
        default,
        alias = "dateStart",
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub from_date: Option<String>,
    #[serde(
        default,
        alias = "dateEnd",
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub to_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub preset: Option<String>,
    #[serde(
        default,
        alias = "sortKey",
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub sort: Option<String>,
}

impl DateFilterable for TransactionFilterParams {
    fn from_date(&self) -> Option<&String> {
        self.from_date.as_ref()
    }

    fn to_date(&self) -> Option<&String> {
        self.to_date.as_ref()
    }

    fn preset(&self) -> Option<&String> {
        self.preset.as_ref()
    }
}

impl Sortable for TransactionFilterParams {
    fn sort_by(&self) -> Option<&String> {
        self.sort.as_ref()
    }
}

impl TransactionFilterParams {
    pub fn criteria(&self) -> AppResult<FilterCriteria> {
        Ok(FilterCriteria {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone(),
            kind: self
                .kind
                .as_deref()
                .map(TypeFilter::from_str)
                .unwrap_or_default(),
            date_range: self.resolve_date_range_today()?,
            sort: self.resolve_sort(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionsView {
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    pub count: usize,
    /// `"All"` plus every category present in the collection.
    pub categories: Vec<String>,
    /// Echo of the applied state, so clients can render their controls.
    pub sort: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub preset: Option<&'static str>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<TransactionFilterParams>,
) -> AppResult<Json<TransactionsView>> {
    let criteria = params.criteria()?;
    let snapshot = state.cached_transactions()?;

    let result = filter::filter_and_sort(&snapshot, &criteria);
    debug!(
        total = snapshot.len(),
        matched = result.transactions.len(),
        sort = criteria.sort.as_str(),
        "Filtered transactions"
    );

    let range = &criteria.date_range;
    Ok(Json(TransactionsView {
        count: result.transactions.len(),
        categories: filter::category_options(&snapshot),
        transactions: result.transactions,
        totals: result.totals,
        sort: criteria.sort.as_str(),
        kind: criteria.kind.as_str(),
        from_date: range.from.map(|d| d.format("%Y-%m-%d").to_string()),
        to_date: range.to.map(|d| d.format("%Y-%m-%d").to_string()),
        preset: range.preset.map(|p| p.as_str()),
    }))
}
