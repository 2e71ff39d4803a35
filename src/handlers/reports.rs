use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::reports::{self, Granularity, PeriodTotals};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    #[serde(
        default,
        alias = "view",
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub granularity: Option<String>,
}

impl ReportParams {
    /// Daily when unset; unknown names are rejected.
    pub fn granularity(&self) -> AppResult<Granularity> {
        match self.granularity.as_deref() {
            None => Ok(Granularity::default()),
            Some(name) => name.parse().map_err(AppError::Validation),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub granularity: Granularity,
    pub rows: Vec<PeriodTotals>,
    /// Denominator for bar widths; never zero.
    pub scale: f64,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<ReportView>> {
    let granularity = params.granularity()?;
    let snapshot = state.cached_transactions()?;

    let rows = reports::aggregate(&snapshot, granularity);
    debug!(
        granularity = granularity.as_str(),
        rows = rows.len(),
        "Aggregated report"
    );

    Ok(Json(ReportView {
        granularity,
        scale: reports::bar_scale(&rows),
        rows,
    }))
}
