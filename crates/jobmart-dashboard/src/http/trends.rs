//! Chart series endpoint — GET /api/trends
//!
//! Three series over the narrowed subset: top-10 employers (ranked bar),
//! employment-type distribution (pie), and vacancies per application
//! deadline (line, chronological). Rows without a deadline are excluded
//! from the line series only.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use jobmart_view::{aggregate, narrow};

use crate::app::AppState;
use crate::http::{warehouse_error, ApiError, FilterQuery, RankedGroup, NO_DATA_NOTICE};

const TOP_EMPLOYERS: usize = 10;

#[derive(Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub vacancies: u64,
}

#[derive(Serialize)]
pub struct TrendsResponse {
    pub top_employers: Vec<RankedGroup>,
    pub employment_types: Vec<RankedGroup>,
    pub deadline_series: Vec<TrendPoint>,
    pub notice: Option<&'static str>,
}

pub async fn trends_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<TrendsResponse>, (StatusCode, Json<ApiError>)> {
    let table = state.table().map_err(warehouse_error)?;
    let filter = query.to_filter_state();
    let view = narrow(&table, &filter, &state.config.dashboard.region_default);

    let top_employers = aggregate::top_n(&aggregate::by_employer(&view.rows), TOP_EMPLOYERS)
        .into_iter()
        .map(Into::into)
        .collect();
    let employment_types = aggregate::by_employment_type(&view.rows)
        .into_iter()
        .map(Into::into)
        .collect();
    let deadline_series = aggregate::trend_by_deadline(&view.rows)
        .into_iter()
        .map(|(date, vacancies)| TrendPoint { date, vacancies })
        .collect();

    Ok(Json(TrendsResponse {
        top_employers,
        employment_types,
        deadline_series,
        notice: view.rows.is_empty().then_some(NO_DATA_NOTICE),
    }))
}
