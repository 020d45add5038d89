use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("duplicate asset key: {key}")]
    DuplicateAsset { key: String },

    #[error("duplicate job name: {name}")]
    DuplicateJob { name: String },

    #[error("{referenced_by} references unknown asset: {key}")]
    UnknownAsset { key: String, referenced_by: String },

    #[error("{referenced_by} references unknown job: {name}")]
    UnknownJob { name: String, referenced_by: String },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
