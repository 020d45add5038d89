use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Defines when a scheduled job should fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    /// Fire exactly once at the given UTC instant.
    Once { at: DateTime<Utc> },

    /// Fire repeatedly with a fixed interval in seconds.
    Interval { every_secs: u64 },

    /// Fire every day at the given hour and minute (UTC).
    Daily { hour: u8, minute: u8 },

    /// Fire on a specific weekday (0 = Monday … 6 = Sunday) at the given time (UTC).
    Weekly { day: u8, hour: u8, minute: u8 },

    /// Fire according to a cron expression. Kept so orchestrator exports
    /// round-trip; next-run computation does not evaluate it.
    Cron { expression: String },
}

/// One named unit of work known to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDef {
    /// Stable key, e.g. "extract_job_ads".
    pub key: String,
    pub description: String,
    /// Warehouse tables this asset materialises.
    pub produces: Vec<String>,
}

/// A runnable selection of assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDef {
    pub name: String,
    pub selection: Vec<String>,
}

/// Calendar trigger for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDef {
    pub name: String,
    pub job: String,
    pub schedule: Schedule,
}

/// Completion trigger: when `watched_asset` finishes materialising,
/// request a run of `triggers_job`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDef {
    pub name: String,
    pub watched_asset: String,
    pub triggers_job: String,
}

/// A run request emitted by a sensor, handed to the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub id: String,
    pub job: String,
    pub requested_at: DateTime<Utc>,
}

impl RunRequest {
    pub fn new(job: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job: job.to_string(),
            requested_at: Utc::now(),
        }
    }
}
