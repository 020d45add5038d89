pub mod config;
pub mod error;
pub mod types;

pub use config::JobmartConfig;
pub use error::JobmartError;
pub use types::{JobAdRecord, MartId, UnifiedTable};
