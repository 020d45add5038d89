use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use jobmart_core::types::JobAdRecord;

/// Sum of vacancies per group, in first-seen key order.
///
/// Rows whose key is absent are skipped; rows with a zero measure still
/// create their group, so a group of all-zero rows reports 0 rather than
/// disappearing.
pub fn sum_by<'a>(
    rows: &'a [JobAdRecord],
    key: impl Fn(&'a JobAdRecord) -> Option<&'a str>,
) -> Vec<(String, u64)> {
    let mut groups: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for row in rows {
        let Some(k) = key(row) else { continue };
        match index.get(k) {
            Some(&i) => groups[i].1 += u64::from(row.vacancies),
            None => {
                index.insert(k, groups.len());
                groups.push((k.to_string(), u64::from(row.vacancies)));
            }
        }
    }
    groups
}

pub fn by_employer(rows: &[JobAdRecord]) -> Vec<(String, u64)> {
    sum_by(rows, |r| r.employer_name.as_deref())
}

pub fn by_employment_type(rows: &[JobAdRecord]) -> Vec<(String, u64)> {
    sum_by(rows, |r| r.employment_type.as_deref())
}

pub fn by_occupation(rows: &[JobAdRecord]) -> Vec<(String, u64)> {
    sum_by(rows, |r| r.occupation.as_deref())
}

/// The `n` groups with the largest sums. Ties keep first-seen order
/// (stable sort), so a group inserted earlier outranks an equal later one.
pub fn top_n(groups: &[(String, u64)], n: usize) -> Vec<(String, u64)> {
    let mut ranked = groups.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// The single largest group, or `None` when there is nothing to rank.
/// Never panics on empty or degenerate input.
pub fn top_one(groups: &[(String, u64)]) -> Option<(String, u64)> {
    let mut best: Option<&(String, u64)> = None;
    for group in groups {
        // Strict > keeps the first-seen group on ties.
        if best.map_or(true, |b| group.1 > b.1) {
            best = Some(group);
        }
    }
    best.cloned()
}

/// Vacancies summed per application-deadline date, chronologically
/// ascending. Rows without a deadline are excluded here but still count in
/// the categorical aggregates over the same subset.
pub fn trend_by_deadline(rows: &[JobAdRecord]) -> Vec<(NaiveDate, u64)> {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for row in rows {
        if let Some(date) = row.application_deadline {
            *by_date.entry(date).or_insert(0) += u64::from(row.vacancies);
        }
    }
    by_date.into_iter().collect()
}

pub fn total_vacancies(rows: &[JobAdRecord]) -> u64 {
    rows.iter().map(|r| u64::from(r.vacancies)).sum()
}

pub fn unique_employers(rows: &[JobAdRecord]) -> usize {
    rows.iter()
        .filter_map(|r| r.employer_name.as_deref())
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn unique_occupations(rows: &[JobAdRecord]) -> usize {
    rows.iter()
        .filter_map(|r| r.occupation.as_deref())
        .collect::<BTreeSet<_>>()
        .len()
}

/// "Most advertised occupation" KPI.
pub fn top_occupation(rows: &[JobAdRecord]) -> Option<(String, u64)> {
    top_one(&by_occupation(rows))
}

/// "Top employer" KPI.
pub fn top_employer(rows: &[JobAdRecord]) -> Option<(String, u64)> {
    top_one(&by_employer(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobmart_core::types::MartId;

    fn row(employer: &str, employment: Option<&str>, deadline: Option<&str>, vacancies: u32) -> JobAdRecord {
        JobAdRecord {
            vacancies,
            employer_name: Some(employer.to_string()),
            employment_type: employment.map(String::from),
            application_deadline: deadline
                .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            ..JobAdRecord::empty(MartId::ByggOchAnlaggning)
        }
    }

    #[test]
    fn group_sums_add_up_to_subset_total() {
        let rows = vec![
            row("E1", Some("Vanlig"), None, 3),
            row("E2", Some("Vanlig"), None, 2),
            row("E1", Some("Sommarjobb"), None, 5),
        ];
        let groups = by_employer(&rows);
        let grouped_total: u64 = groups.iter().map(|(_, v)| v).sum();
        assert_eq!(grouped_total, total_vacancies(&rows));
        assert_eq!(groups, vec![("E1".to_string(), 8), ("E2".to_string(), 2)]);
    }

    #[test]
    fn zero_measure_group_reports_zero_not_absent() {
        let rows = vec![row("E1", None, None, 0), row("E1", None, None, 0)];
        assert_eq!(by_employer(&rows), vec![("E1".to_string(), 0)]);
    }

    #[test]
    fn top_one_breaks_ties_by_first_seen() {
        let groups = vec![
            ("E1".to_string(), 5),
            ("E2".to_string(), 5),
            ("E3".to_string(), 2),
        ];
        assert_eq!(top_one(&groups), Some(("E1".to_string(), 5)));
    }

    #[test]
    fn top_one_handles_degenerate_inputs() {
        assert_eq!(top_one(&[]), None);
        let single = vec![("only".to_string(), 1)];
        assert_eq!(top_one(&single), Some(("only".to_string(), 1)));
    }

    #[test]
    fn top_n_is_stable_on_ties() {
        let groups = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 3),
            ("c".to_string(), 3),
            ("d".to_string(), 2),
        ];
        let ranked = top_n(&groups, 3);
        let keys: Vec<_> = ranked.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "c", "d"]);
    }

    #[test]
    fn trend_excludes_absent_deadlines_but_totals_keep_them() {
        let rows = vec![
            row("E1", None, Some("2026-09-01"), 2),
            row("E2", None, None, 7),
            row("E3", None, Some("2026-08-01"), 1),
        ];
        let series = trend_by_deadline(&rows);
        assert_eq!(series.len(), 2);
        // Chronological, not insertion, order.
        assert_eq!(series[0].0, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());

        // The no-deadline row still counts in the categorical aggregate.
        let employer_total: u64 = by_employer(&rows).iter().map(|(_, v)| v).sum();
        assert_eq!(employer_total, 10);
    }

    #[test]
    fn kpi_counts_ignore_absent_values() {
        let mut rows = vec![row("E1", None, None, 1), row("E1", None, None, 1)];
        rows.push(JobAdRecord::empty(MartId::Pedagogik));
        assert_eq!(unique_employers(&rows), 1);
        assert_eq!(unique_occupations(&rows), 0);
    }
}
