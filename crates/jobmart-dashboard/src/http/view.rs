//! Drilldown view endpoint — GET /api/view
//!
//! Query: the common filter params (marts, region, field, occupation,
//! employer). Response: the effective selection, the option lists for the
//! cascading dropdowns, KPI figures, and the two top-1 rankings. A ranking
//! over an empty subset is `null` — "no ranking available", not an error.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use jobmart_core::types::MartId;
use jobmart_view::drilldown::AppliedSelection;
use jobmart_view::{aggregate, narrow, LevelOptions};

use crate::app::AppState;
use crate::http::{warehouse_error, ApiError, FilterQuery, RankedGroup, NO_DATA_NOTICE};

#[derive(Serialize)]
pub struct MartOption {
    pub slug: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Serialize)]
pub struct Kpis {
    pub ad_count: usize,
    pub total_vacancies: u64,
    pub unique_employers: usize,
    pub unique_occupations: usize,
}

#[derive(Serialize)]
pub struct ViewResponse {
    pub marts: Vec<MartOption>,
    pub options: LevelOptions,
    pub applied: AppliedSelection,
    pub kpis: Kpis,
    pub top_occupation: Option<RankedGroup>,
    pub top_employer: Option<RankedGroup>,
    pub notice: Option<&'static str>,
}

pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ViewResponse>, (StatusCode, Json<ApiError>)> {
    let table = state.table().map_err(warehouse_error)?;
    let filter = query.to_filter_state();
    let view = narrow(&table, &filter, &state.config.dashboard.region_default);

    let marts = MartId::ALL
        .iter()
        .map(|m| MartOption {
            slug: m.slug(),
            label: m.label(),
            selected: filter.marts.contains(m),
        })
        .collect();

    let kpis = Kpis {
        ad_count: view.rows.len(),
        total_vacancies: aggregate::total_vacancies(&view.rows),
        unique_employers: aggregate::unique_employers(&view.rows),
        unique_occupations: aggregate::unique_occupations(&view.rows),
    };
    let notice = view.rows.is_empty().then_some(NO_DATA_NOTICE);

    Ok(Json(ViewResponse {
        marts,
        top_occupation: aggregate::top_occupation(&view.rows).map(Into::into),
        top_employer: aggregate::top_employer(&view.rows).map(Into::into),
        options: view.options,
        applied: view.applied,
        kpis,
        notice,
    }))
}
