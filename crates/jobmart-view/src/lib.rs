//! Pure, UI-framework-free view logic over the unified job-ad table:
//! mart combination, cascading drilldown filtering, and grouped aggregation.
//! Everything here is synchronous and deterministic — no I/O, no clocks.

pub mod aggregate;
pub mod combine;
pub mod drilldown;

pub use combine::combine;
pub use drilldown::{narrow, DrilldownView, FilterState, LevelOptions};
