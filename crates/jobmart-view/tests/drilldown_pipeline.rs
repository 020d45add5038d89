//! End-to-end properties of combine → narrow → aggregate over a realistic
//! two-mart table.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use jobmart_core::config::RegionDefault;
use jobmart_core::types::{JobAdRecord, MartId};
use jobmart_view::aggregate::{by_employer, top_one, total_vacancies, trend_by_deadline};
use jobmart_view::{combine, narrow, FilterState};

fn ad(region: &str, field: &str, occupation: &str, employer: &str, vacancies: u32) -> JobAdRecord {
    JobAdRecord {
        vacancies,
        workplace_region: Some(region.to_string()),
        occupation_field: Some(field.to_string()),
        occupation: Some(occupation.to_string()),
        employer_name: Some(employer.to_string()),
        // source_mart is restamped by combine
        ..JobAdRecord::empty(MartId::Pedagogik)
    }
}

/// Mart A (bygg): 3 rows in region X. Mart B (pedagogik): 2 rows in region Y.
fn two_mart_input() -> BTreeMap<MartId, Vec<JobAdRecord>> {
    let mut per_mart = BTreeMap::new();
    per_mart.insert(
        MartId::ByggOchAnlaggning,
        vec![
            ad("X", "Bygg", "Snickare", "ByggAB", 2),
            ad("X", "Bygg", "Murare", "MurAB", 1),
            ad("X", "Bygg", "Snickare", "ByggAB", 3),
        ],
    );
    per_mart.insert(
        MartId::Pedagogik,
        vec![
            ad("Y", "Pedagogik", "Lärare", "Kommunen", 4),
            ad("Y", "Pedagogik", "Rektor", "Kommunen", 1),
        ],
    );
    per_mart
}

#[test]
fn combine_preserves_every_row() {
    let input = two_mart_input();
    let expected: usize = input.values().map(Vec::len).sum();
    let table = combine(input);
    assert_eq!(table.len(), expected);
}

#[test]
fn region_filter_selects_exactly_one_marts_rows() {
    let table = combine(two_mart_input());
    // Default mart filter = both marts; region X only exists in mart A.
    let view = narrow(
        &table,
        &FilterState {
            region: Some("X".to_string()),
            ..FilterState::default()
        },
        &RegionDefault::Unset,
    );
    assert_eq!(view.rows.len(), 3);
    assert!(view
        .rows
        .iter()
        .all(|r| r.source_mart == MartId::ByggOchAnlaggning));
}

#[test]
fn subset_shrinks_monotonically_as_levels_are_set() {
    let table = combine(two_mart_input());
    let base = narrow(&table, &FilterState::default(), &RegionDefault::Unset);

    let with_region = narrow(
        &table,
        &FilterState {
            region: Some("X".to_string()),
            ..FilterState::default()
        },
        &RegionDefault::Unset,
    );
    let with_occupation = narrow(
        &table,
        &FilterState {
            region: Some("X".to_string()),
            occupation_field: Some("Bygg".to_string()),
            occupation: Some("Snickare".to_string()),
            ..FilterState::default()
        },
        &RegionDefault::Unset,
    );

    assert!(base.rows.len() <= table.len());
    assert!(with_region.rows.len() <= base.rows.len());
    assert!(with_occupation.rows.len() <= with_region.rows.len());
    assert_eq!(with_occupation.rows.len(), 2);
}

#[test]
fn empty_mart_set_is_an_empty_result_not_an_error() {
    let table = combine(two_mart_input());
    let view = narrow(
        &table,
        &FilterState {
            marts: BTreeSet::new(),
            region: Some("X".to_string()),
            ..FilterState::default()
        },
        &RegionDefault::default(),
    );
    assert!(view.rows.is_empty());
    assert_eq!(top_one(&by_employer(&view.rows)), None);
}

#[test]
fn aggregate_total_matches_subset_total_after_narrowing() {
    let table = combine(two_mart_input());
    let view = narrow(
        &table,
        &FilterState {
            region: Some("X".to_string()),
            occupation_field: Some("Bygg".to_string()),
            ..FilterState::default()
        },
        &RegionDefault::Unset,
    );

    let groups = by_employer(&view.rows);
    let grouped: u64 = groups.iter().map(|(_, v)| v).sum();
    assert_eq!(grouped, total_vacancies(&view.rows));
    assert_eq!(top_one(&groups), Some(("ByggAB".to_string(), 5)));
}

#[test]
fn trend_and_categorical_aggregates_disagree_only_on_absent_deadlines() {
    let mut input = two_mart_input();
    // Give one mart-A row a deadline; leave the rest absent.
    input.get_mut(&MartId::ByggOchAnlaggning).unwrap()[0].application_deadline =
        chrono::NaiveDate::from_ymd_opt(2026, 10, 1);

    let table = combine(input);
    let view = narrow(
        &table,
        &FilterState {
            region: Some("X".to_string()),
            ..FilterState::default()
        },
        &RegionDefault::Unset,
    );

    let series = trend_by_deadline(&view.rows);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].1, 2);

    // All three rows, deadline or not, contribute to the employer totals.
    let employer_total: u64 = by_employer(&view.rows).iter().map(|(_, v)| v).sum();
    assert_eq!(employer_total, 6);
}
