pub mod health;
pub mod listings;
pub mod refresh;
pub mod trends;
pub mod ui;
pub mod view;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use jobmart_core::types::MartId;
use jobmart_view::FilterState;
use jobmart_warehouse::WarehouseError;

/// Informational empty-state message — an empty filtered subset is a normal
/// terminal state, never an error.
pub const NO_DATA_NOTICE: &str = "No data for this combination of filters.";

/// Common query string for every filtered endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Comma-separated mart slugs. Absent = all marts; present but empty =
    /// no marts (explicit empty selection).
    pub marts: Option<String>,
    pub region: Option<String>,
    pub field: Option<String>,
    pub occupation: Option<String>,
    pub employer: Option<String>,
}

impl FilterQuery {
    pub fn to_filter_state(&self) -> FilterState {
        let marts = match &self.marts {
            None => MartId::ALL.into_iter().collect(),
            Some(raw) => raw
                .split(',')
                .filter_map(|s| s.trim().parse::<MartId>().ok())
                .collect(),
        };
        FilterState {
            marts,
            region: clean(&self.region),
            occupation_field: clean(&self.field),
            occupation: clean(&self.occupation),
            employer: clean(&self.employer),
        }
    }
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

/// Map a warehouse failure to its HTTP shape: a missing file or mart table
/// means the warehouse has not been built yet (503), anything else is a
/// plain server error. Not retried — the user sees the notice and can hit
/// refresh after the pipeline has run.
pub fn warehouse_error(e: WarehouseError) -> (StatusCode, Json<ApiError>) {
    warn!(error = %e, "warehouse load failed");
    let status = match &e {
        WarehouseError::NotFound { .. } | WarehouseError::TableMissing { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        WarehouseError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError { error: e.to_string() }))
}

/// One (key, summed vacancies) group as the charts consume it.
#[derive(Serialize)]
pub struct RankedGroup {
    pub name: String,
    pub vacancies: u64,
}

impl From<(String, u64)> for RankedGroup {
    fn from((name, vacancies): (String, u64)) -> Self {
        Self { name, vacancies }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_marts_param_means_all() {
        let q = FilterQuery::default();
        assert_eq!(q.to_filter_state().marts.len(), MartId::ALL.len());
    }

    #[test]
    fn empty_marts_param_means_none() {
        let q = FilterQuery { marts: Some(String::new()), ..FilterQuery::default() };
        assert!(q.to_filter_state().marts.is_empty());
    }

    #[test]
    fn unknown_slugs_are_dropped() {
        let q = FilterQuery {
            marts: Some("pedagogik,mart_it, bygg_och_anlaggning".to_string()),
            ..FilterQuery::default()
        };
        let marts = q.to_filter_state().marts;
        assert_eq!(marts.len(), 2);
        assert!(marts.contains(&MartId::Pedagogik));
        assert!(marts.contains(&MartId::ByggOchAnlaggning));
    }

    #[test]
    fn blank_level_values_are_unset() {
        let q = FilterQuery {
            region: Some("  ".to_string()),
            field: Some("Bygg".to_string()),
            ..FilterQuery::default()
        };
        let filter = q.to_filter_state();
        assert_eq!(filter.region, None);
        assert_eq!(filter.occupation_field.as_deref(), Some("Bygg"));
    }
}
