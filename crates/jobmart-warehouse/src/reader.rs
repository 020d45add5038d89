use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, instrument};

use jobmart_core::config::WarehouseConfig;
use jobmart_core::types::{JobAdRecord, MartId};

use crate::error::{Result, WarehouseError};

/// Canonical column names of a mart table, in record-field order.
/// Lookup against the actual table schema is case-insensitive, and any
/// column a mart does not carry is read as NULL.
const COLUMNS: [&str; 13] = [
    "vacancies",
    "occupation",
    "occupation_field",
    "application_deadline",
    "headline",
    "job_description",
    "job_description_html",
    "employer_name",
    "employment_type",
    "salary_type",
    "duration",
    "workplace_region",
    "job_description_id",
];

/// Read-only access to the mart tables in the warehouse file.
///
/// Opens a fresh read-only connection per call and drops it when the query
/// completes — no pooling, caching, or retry. Concurrent dashboard sessions
/// rely on SQLite's multi-reader guarantee; a file held by a writer surfaces
/// as a `Database` error for that load.
#[derive(Debug)]
pub struct WarehouseReader {
    db_path: PathBuf,
    marts: Vec<MartId>,
}

impl WarehouseReader {
    /// Open a reader for the configured warehouse.
    ///
    /// Fails with `NotFound` when the backing file does not exist — a
    /// startup-fatal condition for the dashboard.
    pub fn open(config: &WarehouseConfig) -> Result<Self> {
        let db_path = PathBuf::from(&config.db_path);
        if !db_path.exists() {
            return Err(WarehouseError::NotFound {
                path: config.db_path.clone(),
            });
        }
        Ok(Self {
            db_path,
            marts: config.marts.clone(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn marts(&self) -> &[MartId] {
        &self.marts
    }

    fn connect_ro(&self) -> Result<Connection> {
        if !self.db_path.exists() {
            // The file can disappear between startup and a cache refresh
            // (remounted share) — keep the error kind consistent.
            return Err(WarehouseError::NotFound {
                path: self.db_path.display().to_string(),
            });
        }
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    /// Read every row of one mart table.
    ///
    /// Returns `TableMissing` when the table is absent from the database —
    /// never a silent empty result.
    #[instrument(skip(self), fields(mart = %mart))]
    pub fn read_mart(&self, mart: MartId) -> Result<Vec<JobAdRecord>> {
        let conn = self.connect_ro()?;
        let rows = read_mart_rows(&conn, mart)?;
        debug!(rows = rows.len(), "mart read");
        Ok(rows)
    }

    /// Read all configured marts, keyed by mart id.
    ///
    /// The first failing mart aborts the whole load — no partial success.
    #[instrument(skip(self))]
    pub fn read_all(&self) -> Result<BTreeMap<MartId, Vec<JobAdRecord>>> {
        let conn = self.connect_ro()?;
        let mut out = BTreeMap::new();
        for &mart in &self.marts {
            out.insert(mart, read_mart_rows(&conn, mart)?);
        }
        Ok(out)
    }
}

fn read_mart_rows(conn: &Connection, mart: MartId) -> Result<Vec<JobAdRecord>> {
    let table = mart.table_name();
    let actual = table_columns(conn, table)?;
    if actual.is_empty() {
        return Err(WarehouseError::TableMissing {
            table: table.to_string(),
        });
    }

    // Map lowercase(actual name) -> actual name so marts written with
    // upper-case column names resolve to the canonical set.
    let lookup: HashMap<String, &str> = actual
        .iter()
        .map(|name| (name.to_ascii_lowercase(), name.as_str()))
        .collect();

    let select_list: Vec<String> = COLUMNS
        .iter()
        .map(|canonical| match lookup.get(*canonical) {
            Some(actual) => format!("\"{actual}\" AS {canonical}"),
            None => format!("NULL AS {canonical}"),
        })
        .collect();
    let sql = format!("SELECT {} FROM {table}", select_list.join(", "));

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut rec = JobAdRecord::empty(mart);
        for (i, column) in COLUMNS.iter().enumerate() {
            let value = row.get_ref(i)?;
            match *column {
                "vacancies" => rec.vacancies = coerce_vacancies(value),
                "application_deadline" => rec.application_deadline = coerce_deadline(value),
                "occupation" => rec.occupation = coerce_text(value),
                "occupation_field" => rec.occupation_field = coerce_text(value),
                "headline" => rec.headline = coerce_text(value),
                "job_description" => rec.job_description = coerce_text(value),
                "job_description_html" => rec.job_description_html = coerce_text(value),
                "employer_name" => rec.employer_name = coerce_text(value),
                "employment_type" => rec.employment_type = coerce_text(value),
                "salary_type" => rec.salary_type = coerce_text(value),
                "duration" => rec.duration = coerce_text(value),
                "workplace_region" => rec.workplace_region = coerce_text(value),
                "job_description_id" => rec.job_description_id = coerce_text(value),
                other => unreachable!("unknown canonical column {other}"),
            }
        }
        out.push(rec);
    }
    Ok(out)
}

/// Column names of `table`, or an empty vec when the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let names = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// Vacancy count coercion: missing or non-numeric → 0, negatives clamp to 0,
/// fractional values floor toward zero (2.9 reads as 2).
fn coerce_vacancies(value: ValueRef<'_>) -> u32 {
    match value {
        ValueRef::Integer(n) => n.max(0).try_into().unwrap_or(u32::MAX),
        ValueRef::Real(f) if f.is_finite() && f > 0.0 => f as u32,
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|f| f.is_finite() && *f > 0.0)
            .map(|f| f as u32)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Deadline coercion: ISO date, or the date part of an ISO datetime;
/// anything unparseable is absent.
fn coerce_deadline(value: ValueRef<'_>) -> Option<NaiveDate> {
    let text = coerce_text(value)?;
    // Datetime-formatted values keep their date prefix. Free-text values
    // may not have a char boundary at byte 10 — fall back to the whole
    // string, which then fails the parse.
    let date_part = text.get(..10).unwrap_or(&text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Text coercion: NULL and empty/blank strings are absent; numeric values
/// in a text column keep their decimal rendering.
fn coerce_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Text(bytes) => {
            let s = String::from_utf8_lossy(bytes);
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        ValueRef::Integer(n) => Some(n.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Blob(_) => None,
    }
}
