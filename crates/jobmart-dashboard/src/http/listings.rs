//! Ad listing and detail endpoints — GET /api/listings, GET /api/ad/{id}
//!
//! Listings return the narrowed rows in table form; the detail endpoint
//! looks one record up by its job-description id across the whole table,
//! independent of the current filter.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use jobmart_core::types::JobAdRecord;
use jobmart_view::narrow;

use crate::app::AppState;
use crate::http::{warehouse_error, ApiError, FilterQuery, NO_DATA_NOTICE};

#[derive(Serialize)]
pub struct ListingRow {
    pub id: Option<String>,
    pub headline: Option<String>,
    pub employment_type: Option<String>,
    pub duration: Option<String>,
    pub application_deadline: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct ListingsResponse {
    pub count: usize,
    pub rows: Vec<ListingRow>,
    pub notice: Option<&'static str>,
}

pub async fn listings_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<ListingsResponse>, (StatusCode, Json<ApiError>)> {
    let table = state.table().map_err(warehouse_error)?;
    let filter = query.to_filter_state();
    let view = narrow(&table, &filter, &state.config.dashboard.region_default);

    let rows: Vec<ListingRow> = view
        .rows
        .iter()
        .map(|r| ListingRow {
            id: r.job_description_id.clone(),
            headline: r.headline.clone(),
            employment_type: r.employment_type.clone(),
            duration: r.duration.clone(),
            application_deadline: r.application_deadline,
        })
        .collect();

    Ok(Json(ListingsResponse {
        count: rows.len(),
        notice: rows.is_empty().then_some(NO_DATA_NOTICE),
        rows,
    }))
}

#[derive(Serialize)]
pub struct AdDetail {
    pub id: String,
    pub headline: Option<String>,
    pub employer_name: Option<String>,
    pub workplace_region: Option<String>,
    pub occupation_field: Option<String>,
    pub occupation: Option<String>,
    pub employment_type: Option<String>,
    pub duration: Option<String>,
    pub salary_type: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub job_description: Option<String>,
    pub job_description_html: Option<String>,
    pub source_mart: String,
}

/// GET /api/ad/{id} — full detail for one ad.
pub async fn ad_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AdDetail>, (StatusCode, Json<ApiError>)> {
    let table = state.table().map_err(warehouse_error)?;

    let record: Option<&JobAdRecord> = table
        .rows()
        .iter()
        .find(|r| r.job_description_id.as_deref() == Some(id.as_str()));

    match record {
        Some(r) => Ok(Json(AdDetail {
            id,
            headline: r.headline.clone(),
            employer_name: r.employer_name.clone(),
            workplace_region: r.workplace_region.clone(),
            occupation_field: r.occupation_field.clone(),
            occupation: r.occupation.clone(),
            employment_type: r.employment_type.clone(),
            duration: r.duration.clone(),
            salary_type: r.salary_type.clone(),
            application_deadline: r.application_deadline,
            job_description: r.job_description.clone(),
            job_description_html: r.job_description_html.clone(),
            source_mart: r.source_mart.slug().to_string(),
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError { error: format!("ad not found: {id}") }),
        )),
    }
}
