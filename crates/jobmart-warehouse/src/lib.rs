pub mod cache;
pub mod error;
pub mod reader;

pub use cache::TableCache;
pub use error::WarehouseError;
pub use reader::WarehouseReader;
