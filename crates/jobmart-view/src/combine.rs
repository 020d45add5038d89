use std::collections::BTreeMap;

use tracing::debug;

use jobmart_core::types::{JobAdRecord, MartId, UnifiedTable};

/// Concatenate per-mart row sets into one unified table.
///
/// Output order is mart-id order (the `BTreeMap` key order) and original row
/// order within each mart, so repeated loads of the same warehouse produce
/// byte-identical tables. Every row is stamped with its originating mart —
/// even if the reader already did so, the map key wins.
pub fn combine(per_mart: BTreeMap<MartId, Vec<JobAdRecord>>) -> UnifiedTable {
    let total: usize = per_mart.values().map(Vec::len).sum();
    let mut rows = Vec::with_capacity(total);
    for (mart, mart_rows) in per_mart {
        for mut row in mart_rows {
            row.source_mart = mart;
            rows.push(row);
        }
    }
    debug!(rows = rows.len(), "marts combined");
    UnifiedTable::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(mart: MartId, employer: &str) -> JobAdRecord {
        JobAdRecord {
            employer_name: Some(employer.to_string()),
            ..JobAdRecord::empty(mart)
        }
    }

    #[test]
    fn output_length_is_sum_of_inputs() {
        let mut per_mart = BTreeMap::new();
        per_mart.insert(
            MartId::Pedagogik,
            vec![row(MartId::Pedagogik, "a"), row(MartId::Pedagogik, "b")],
        );
        per_mart.insert(
            MartId::ByggOchAnlaggning,
            vec![row(MartId::ByggOchAnlaggning, "c")],
        );

        let table = combine(per_mart);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn rows_come_out_in_mart_order_then_insertion_order() {
        let mut per_mart = BTreeMap::new();
        // Insert in reverse mart order — BTreeMap iteration still sorts.
        per_mart.insert(
            MartId::Pedagogik,
            vec![row(MartId::Pedagogik, "p1"), row(MartId::Pedagogik, "p2")],
        );
        per_mart.insert(
            MartId::ByggOchAnlaggning,
            vec![row(MartId::ByggOchAnlaggning, "b1")],
        );

        let table = combine(per_mart);
        let employers: Vec<_> = table
            .rows()
            .iter()
            .map(|r| r.employer_name.as_deref().unwrap())
            .collect();
        assert_eq!(employers, vec!["b1", "p1", "p2"]);
    }

    #[test]
    fn source_mart_stamp_follows_map_key() {
        let mut per_mart = BTreeMap::new();
        // Row claims the wrong mart; the combiner restamps it.
        per_mart.insert(
            MartId::KulturMediaDesign,
            vec![row(MartId::Pedagogik, "x")],
        );

        let table = combine(per_mart);
        assert_eq!(table.rows()[0].source_mart, MartId::KulturMediaDesign);
    }

    #[test]
    fn empty_input_is_empty_table() {
        assert!(combine(BTreeMap::new()).is_empty());
    }
}
