//! Declarative description of the warehouse-building pipeline.
//!
//! The extraction and transformation steps run inside an external
//! orchestrator; this crate only declares the two units of work, the weekly
//! trigger for the first, and the completion sensor that requests a run of
//! the second. Scheduling, retries, and run history stay with the
//! orchestrator.

pub mod definitions;
pub mod error;
pub mod schedule;
pub mod types;

pub use definitions::Definitions;
pub use error::PipelineError;
pub use schedule::compute_next_run;
pub use types::{AssetDef, JobDef, RunRequest, Schedule, ScheduleDef, SensorDef};
