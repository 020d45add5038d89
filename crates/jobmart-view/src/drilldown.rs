use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use jobmart_core::config::RegionDefault;
use jobmart_core::types::{JobAdRecord, MartId, UnifiedTable};

/// The user's current drilldown selection.
///
/// Levels are applied in the fixed order mart → region → occupation field →
/// occupation → employer. A value for a level only takes effect when it is
/// among the options computed from the rows passing all higher levels;
/// anything else is treated as no selection for that level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Marts to include. Defaults to all; an explicitly empty set yields an
    /// empty view, not an error.
    pub marts: BTreeSet<MartId>,
    pub region: Option<String>,
    pub occupation_field: Option<String>,
    pub occupation: Option<String>,
    pub employer: Option<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            marts: MartId::ALL.into_iter().collect(),
            region: None,
            occupation_field: None,
            occupation: None,
            employer: None,
        }
    }
}

/// Distinct value lists per level, each restricted to rows passing the
/// levels above it and sorted lexicographically. A level below the first
/// unset one is empty by definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LevelOptions {
    pub regions: Vec<String>,
    pub occupation_fields: Vec<String>,
    pub occupations: Vec<String>,
    pub employers: Vec<String>,
}

/// The selection that actually took effect, level by level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppliedSelection {
    pub region: Option<String>,
    pub occupation_field: Option<String>,
    pub occupation: Option<String>,
    pub employer: Option<String>,
}

/// Result of narrowing the unified table through a `FilterState`.
#[derive(Debug, Clone, Serialize)]
pub struct DrilldownView {
    /// Rows passing every applied level. Always a subset of the input table.
    pub rows: Vec<JobAdRecord>,
    pub options: LevelOptions,
    pub applied: AppliedSelection,
}

impl DrilldownView {
    /// True when every level down to employer has an effective selection,
    /// i.e. the rows describe a single employer's ads.
    pub fn is_fully_selected(&self) -> bool {
        self.applied.region.is_some()
            && self.applied.occupation_field.is_some()
            && self.applied.occupation.is_some()
            && self.applied.employer.is_some()
    }
}

/// Narrow `table` through `filter`, one level at a time.
///
/// Each level's options come from the rows passing all previously applied
/// levels. A supplied value not in that list leaves the level unset, which
/// stops the cascade: deeper options stay empty and deeper values are
/// ignored. The region level alone may be auto-selected via
/// `region_default` when the filter carries no region.
pub fn narrow(
    table: &UnifiedTable,
    filter: &FilterState,
    region_default: &RegionDefault,
) -> DrilldownView {
    let mut subset: Vec<&JobAdRecord> = table
        .rows()
        .iter()
        .filter(|r| filter.marts.contains(&r.source_mart))
        .collect();

    let mut options = LevelOptions::default();
    let mut applied = AppliedSelection::default();

    options.regions = distinct_sorted(&subset, |r| r.workplace_region.as_deref());
    let region = resolve_region(filter.region.as_deref(), &options.regions, region_default);
    let mut open = region.is_some();
    if let Some(value) = region {
        subset.retain(|r| r.workplace_region.as_deref() == Some(value.as_str()));
        applied.region = Some(value);
    }

    if open {
        options.occupation_fields = distinct_sorted(&subset, |r| r.occupation_field.as_deref());
        match pick(filter.occupation_field.as_deref(), &options.occupation_fields) {
            Some(value) => {
                subset.retain(|r| r.occupation_field.as_deref() == Some(value.as_str()));
                applied.occupation_field = Some(value);
            }
            None => open = false,
        }
    }

    if open {
        options.occupations = distinct_sorted(&subset, |r| r.occupation.as_deref());
        match pick(filter.occupation.as_deref(), &options.occupations) {
            Some(value) => {
                subset.retain(|r| r.occupation.as_deref() == Some(value.as_str()));
                applied.occupation = Some(value);
            }
            None => open = false,
        }
    }

    if open {
        options.employers = distinct_sorted(&subset, |r| r.employer_name.as_deref());
        if let Some(value) = pick(filter.employer.as_deref(), &options.employers) {
            subset.retain(|r| r.employer_name.as_deref() == Some(value.as_str()));
            applied.employer = Some(value);
        }
    }

    DrilldownView {
        rows: subset.into_iter().cloned().collect(),
        options,
        applied,
    }
}

/// Distinct non-absent values in lexicographic order.
fn distinct_sorted<'a>(
    rows: &[&'a JobAdRecord],
    field: impl Fn(&'a JobAdRecord) -> Option<&'a str>,
) -> Vec<String> {
    let set: BTreeSet<&str> = rows.iter().filter_map(|r| field(r)).collect();
    set.into_iter().map(String::from).collect()
}

/// A wanted value takes effect only when it is among the available options.
fn pick(wanted: Option<&str>, available: &[String]) -> Option<String> {
    wanted
        .filter(|w| available.iter().any(|a| a == w))
        .map(String::from)
}

fn resolve_region(
    wanted: Option<&str>,
    available: &[String],
    default: &RegionDefault,
) -> Option<String> {
    if wanted.is_some() {
        // An explicit (possibly invalid) choice suppresses the default.
        return pick(wanted, available);
    }
    match default {
        RegionDefault::Preferred { region } if available.iter().any(|a| a == region) => {
            Some(region.clone())
        }
        RegionDefault::Preferred { .. } | RegionDefault::FirstAvailable => {
            available.first().cloned()
        }
        RegionDefault::Unset => None,
    }
}
