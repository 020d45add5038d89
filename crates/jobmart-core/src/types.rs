use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of one mart table in the warehouse.
///
/// The set is fixed — it mirrors the occupation-domain marts built by the
/// transformation pipeline. Ordering (via `Ord`) defines the deterministic
/// concatenation order used by the combiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MartId {
    ByggOchAnlaggning,
    KulturMediaDesign,
    Pedagogik,
}

impl MartId {
    pub const ALL: [MartId; 3] = [
        MartId::ByggOchAnlaggning,
        MartId::KulturMediaDesign,
        MartId::Pedagogik,
    ];

    /// Warehouse table name for this mart.
    pub fn table_name(&self) -> &'static str {
        match self {
            MartId::ByggOchAnlaggning => "mart_bygg_och_anlaggning",
            MartId::KulturMediaDesign => "mart_kultur_media_design",
            MartId::Pedagogik => "mart_pedagogik",
        }
    }

    /// Stable identifier used in URLs and serialized filter state.
    pub fn slug(&self) -> &'static str {
        match self {
            MartId::ByggOchAnlaggning => "bygg_och_anlaggning",
            MartId::KulturMediaDesign => "kultur_media_design",
            MartId::Pedagogik => "pedagogik",
        }
    }

    /// Human-readable label shown in the dashboard mart selector.
    pub fn label(&self) -> &'static str {
        match self {
            MartId::ByggOchAnlaggning => "Bygg och anläggning",
            MartId::KulturMediaDesign => "Kultur, media och design",
            MartId::Pedagogik => "Pedagogik",
        }
    }
}

impl std::fmt::Display for MartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for MartId {
    type Err = String;

    /// Accepts the slug or the table name, case-insensitively.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        for mart in MartId::ALL {
            if lower == mart.slug() || lower == mart.table_name() {
                return Ok(mart);
            }
        }
        Err(format!("unknown mart: {s}"))
    }
}

/// One row of a mart table.
///
/// All text columns are `Option` — a mart missing a column surfaces as `None`
/// on every row rather than a read failure. `vacancies` is already coerced
/// (missing or non-numeric → 0) by the warehouse reader, and
/// `application_deadline` is either a parsed calendar date or `None`.
/// Records are never mutated after construction; every downstream "change"
/// is a filter into a new derived subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAdRecord {
    pub vacancies: u32,
    pub occupation: Option<String>,
    pub occupation_field: Option<String>,
    pub application_deadline: Option<NaiveDate>,
    pub headline: Option<String>,
    pub job_description: Option<String>,
    pub job_description_html: Option<String>,
    pub employer_name: Option<String>,
    pub employment_type: Option<String>,
    pub salary_type: Option<String>,
    pub duration: Option<String>,
    pub workplace_region: Option<String>,
    pub job_description_id: Option<String>,
    pub source_mart: MartId,
}

impl JobAdRecord {
    /// Blank record for a given mart — used by tests and by the reader
    /// as the starting point before column assignment.
    pub fn empty(source_mart: MartId) -> Self {
        Self {
            vacancies: 0,
            occupation: None,
            occupation_field: None,
            application_deadline: None,
            headline: None,
            job_description: None,
            job_description_html: None,
            employer_name: None,
            employment_type: None,
            salary_type: None,
            duration: None,
            workplace_region: None,
            job_description_id: None,
            source_mart,
        }
    }
}

/// All mart rows concatenated into one table, each row stamped with its
/// source mart. Rebuilt fresh on every warehouse load — never updated
/// incrementally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnifiedTable {
    rows: Vec<JobAdRecord>,
}

impl UnifiedTable {
    pub fn new(rows: Vec<JobAdRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[JobAdRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<JobAdRecord>> for UnifiedTable {
    fn from(rows: Vec<JobAdRecord>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mart_parses_slug_and_table_name() {
        assert_eq!(
            "bygg_och_anlaggning".parse::<MartId>().unwrap(),
            MartId::ByggOchAnlaggning
        );
        assert_eq!(
            "MART_PEDAGOGIK".parse::<MartId>().unwrap(),
            MartId::Pedagogik
        );
        assert!("mart_it".parse::<MartId>().is_err());
    }

    #[test]
    fn mart_order_is_stable() {
        let mut marts = vec![MartId::Pedagogik, MartId::ByggOchAnlaggning, MartId::KulturMediaDesign];
        marts.sort();
        assert_eq!(marts, MartId::ALL.to_vec());
    }
}
