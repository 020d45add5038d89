use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::info;

use jobmart_core::types::MartId;

use crate::error::{PipelineError, Result};
use crate::schedule::compute_next_run;
use crate::types::{AssetDef, JobDef, RunRequest, Schedule, ScheduleDef, SensorDef};

/// Asset key of the extraction step: source API → staging dataset in the
/// warehouse file.
pub const EXTRACT_ASSET: &str = "extract_job_ads";
/// Asset key of the transformation step: SQL models → mart tables.
pub const BUILD_MARTS_ASSET: &str = "build_marts";

pub const EXTRACT_JOB: &str = "job_extract";
pub const MARTS_JOB: &str = "job_marts";

/// The validated set of assets, jobs, schedules, and sensors exposed to the
/// orchestrator.
#[derive(Debug, Clone)]
pub struct Definitions {
    assets: Vec<AssetDef>,
    jobs: Vec<JobDef>,
    schedules: Vec<ScheduleDef>,
    sensors: Vec<SensorDef>,
}

impl Definitions {
    /// Assemble and validate a definition set.
    pub fn new(
        assets: Vec<AssetDef>,
        jobs: Vec<JobDef>,
        schedules: Vec<ScheduleDef>,
        sensors: Vec<SensorDef>,
    ) -> Result<Self> {
        let defs = Self { assets, jobs, schedules, sensors };
        defs.validate()?;
        Ok(defs)
    }

    /// The wired HR pipeline: weekly extraction into staging, and a sensor
    /// that requests the mart build once extraction completes.
    pub fn hr_pipeline() -> Result<Self> {
        let assets = vec![
            AssetDef {
                key: EXTRACT_ASSET.to_string(),
                description: "Pull job ads from the job-search API into the staging dataset"
                    .to_string(),
                produces: vec!["staging.job_ads".to_string()],
            },
            AssetDef {
                key: BUILD_MARTS_ASSET.to_string(),
                description: "Run the SQL models that build the occupation mart tables"
                    .to_string(),
                produces: MartId::ALL
                    .iter()
                    .map(|m| m.table_name().to_string())
                    .collect(),
            },
        ];
        let jobs = vec![
            JobDef {
                name: EXTRACT_JOB.to_string(),
                selection: vec![EXTRACT_ASSET.to_string()],
            },
            JobDef {
                name: MARTS_JOB.to_string(),
                selection: vec![BUILD_MARTS_ASSET.to_string()],
            },
        ];
        // Monday 09:00 UTC, the weekly refresh window.
        let schedules = vec![ScheduleDef {
            name: "weekly_extract".to_string(),
            job: EXTRACT_JOB.to_string(),
            schedule: Schedule::Weekly { day: 0, hour: 9, minute: 0 },
        }];
        let sensors = vec![SensorDef {
            name: "marts_after_extract".to_string(),
            watched_asset: EXTRACT_ASSET.to_string(),
            triggers_job: MARTS_JOB.to_string(),
        }];

        Self::new(assets, jobs, schedules, sensors)
    }

    pub fn assets(&self) -> &[AssetDef] {
        &self.assets
    }

    pub fn jobs(&self) -> &[JobDef] {
        &self.jobs
    }

    pub fn schedules(&self) -> &[ScheduleDef] {
        &self.schedules
    }

    pub fn sensors(&self) -> &[SensorDef] {
        &self.sensors
    }

    /// Completion signal: emit one run request per sensor watching `asset_key`.
    pub fn on_asset_materialized(&self, asset_key: &str) -> Vec<RunRequest> {
        self.sensors
            .iter()
            .filter(|s| s.watched_asset == asset_key)
            .map(|s| {
                let request = RunRequest::new(&s.triggers_job);
                info!(sensor = %s.name, job = %request.job, run_id = %request.id,
                      "sensor fired");
                request
            })
            .collect()
    }

    /// The earliest upcoming scheduled firing across all schedules.
    pub fn next_scheduled_run(&self, from: DateTime<Utc>) -> Option<(&ScheduleDef, DateTime<Utc>)> {
        self.schedules
            .iter()
            .filter_map(|def| compute_next_run(&def.schedule, from).map(|at| (def, at)))
            .min_by_key(|(_, at)| *at)
    }

    fn validate(&self) -> Result<()> {
        let mut asset_keys = BTreeSet::new();
        for asset in &self.assets {
            if !asset_keys.insert(asset.key.as_str()) {
                return Err(PipelineError::DuplicateAsset { key: asset.key.clone() });
            }
        }

        let mut job_names = BTreeSet::new();
        for job in &self.jobs {
            if !job_names.insert(job.name.as_str()) {
                return Err(PipelineError::DuplicateJob { name: job.name.clone() });
            }
            for key in &job.selection {
                if !asset_keys.contains(key.as_str()) {
                    return Err(PipelineError::UnknownAsset {
                        key: key.clone(),
                        referenced_by: format!("job {}", job.name),
                    });
                }
            }
        }

        for def in &self.schedules {
            if !job_names.contains(def.job.as_str()) {
                return Err(PipelineError::UnknownJob {
                    name: def.job.clone(),
                    referenced_by: format!("schedule {}", def.name),
                });
            }
            validate_schedule(&def.schedule, &def.name)?;
        }

        for sensor in &self.sensors {
            if !asset_keys.contains(sensor.watched_asset.as_str()) {
                return Err(PipelineError::UnknownAsset {
                    key: sensor.watched_asset.clone(),
                    referenced_by: format!("sensor {}", sensor.name),
                });
            }
            if !job_names.contains(sensor.triggers_job.as_str()) {
                return Err(PipelineError::UnknownJob {
                    name: sensor.triggers_job.clone(),
                    referenced_by: format!("sensor {}", sensor.name),
                });
            }
        }

        Ok(())
    }
}

fn validate_schedule(schedule: &Schedule, name: &str) -> Result<()> {
    let bad = |what: &str| {
        Err(PipelineError::InvalidSchedule(format!("{name}: {what}")))
    };
    match schedule {
        Schedule::Interval { every_secs } if *every_secs == 0 => bad("zero interval"),
        Schedule::Daily { hour, minute } | Schedule::Weekly { hour, minute, .. }
            if *hour > 23 || *minute > 59 =>
        {
            bad("time of day out of range")
        }
        Schedule::Weekly { day, .. } if *day > 6 => bad("weekday out of range"),
        Schedule::Cron { expression } if expression.trim().is_empty() => {
            bad("empty cron expression")
        }
        _ => Ok(()),
    }
}
