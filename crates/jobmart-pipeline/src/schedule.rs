use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::warn;

use crate::types::Schedule;

/// Compute the next UTC firing time for `schedule` strictly after `from`.
///
/// Returns `None` for an exhausted `Once` schedule, an out-of-range
/// time-of-day, or a `Cron` schedule (not evaluated here — the orchestrator
/// owns cron semantics).
pub fn compute_next_run(schedule: &Schedule, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match schedule {
        Schedule::Once { at } => (*at > from).then_some(*at),

        Schedule::Interval { every_secs } => Some(from + Duration::seconds(*every_secs as i64)),

        Schedule::Daily { hour, minute } => {
            // Today's slot, or tomorrow's when it already passed.
            (0..=1)
                .filter_map(|offset| {
                    at_time(from.date_naive() + Duration::days(offset), *hour, *minute)
                })
                .find(|candidate| *candidate > from)
        }

        Schedule::Weekly { day, hour, minute } => {
            // Scan the next eight days; exactly one or two carry the target
            // weekday, and the first strictly-future slot wins.
            (0..=7)
                .map(|offset| from.date_naive() + Duration::days(offset))
                .filter(|date| i64::from(date.weekday().num_days_from_monday()) == i64::from(*day))
                .filter_map(|date| at_time(date, *hour, *minute))
                .find(|candidate| *candidate > from)
        }

        Schedule::Cron { .. } => {
            warn!("cron schedules are evaluated by the orchestrator; next_run not computed");
            None
        }
    }
}

fn at_time(date: NaiveDate, hour: u8, minute: u8) -> Option<DateTime<Utc>> {
    date.and_hms_opt(u32::from(hour), u32::from(minute), 0)
        .map(|naive| naive.and_utc())
}
