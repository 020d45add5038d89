use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use jobmart_core::types::UnifiedTable;

#[derive(Default)]
struct CacheSlot {
    table: Option<Arc<UnifiedTable>>,
    last_refresh: Option<DateTime<Utc>>,
}

/// Time-bounded cache for the loaded warehouse table.
///
/// An explicit object with a last-refresh timestamp and TTL — initialised at
/// session start, invalidated on TTL expiry or manual refresh. The lock is
/// held across a reload so concurrent requests don't trigger duplicate
/// warehouse reads.
pub struct TableCache {
    ttl: Duration,
    inner: Mutex<CacheSlot>,
}

impl TableCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            inner: Mutex::new(CacheSlot::default()),
        }
    }

    /// Return the cached table, reloading through `load` when empty or stale.
    ///
    /// Load errors propagate untouched and leave any previously cached table
    /// in place, so a transient refresh failure does not wipe the session.
    pub fn get_or_load<E>(
        &self,
        load: impl FnOnce() -> std::result::Result<UnifiedTable, E>,
    ) -> std::result::Result<Arc<UnifiedTable>, E> {
        let mut slot = self.inner.lock().unwrap();
        let now = Utc::now();

        if let (Some(table), Some(refreshed)) = (&slot.table, slot.last_refresh) {
            if now - refreshed < self.ttl {
                debug!("table cache hit");
                return Ok(Arc::clone(table));
            }
        }

        let table = Arc::new(load()?);
        info!(rows = table.len(), "warehouse table loaded");
        slot.table = Some(Arc::clone(&table));
        slot.last_refresh = Some(now);
        Ok(table)
    }

    /// Drop the cached table — the next access reloads unconditionally.
    pub fn invalidate(&self) {
        let mut slot = self.inner.lock().unwrap();
        slot.table = None;
        slot.last_refresh = None;
        info!("table cache invalidated");
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.inner.lock().unwrap().last_refresh
    }

    /// True when the next access would reload.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        let slot = self.inner.lock().unwrap();
        match (&slot.table, slot.last_refresh) {
            (Some(_), Some(refreshed)) => now - refreshed >= self.ttl,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobmart_core::types::{JobAdRecord, MartId};

    fn table(rows: usize) -> UnifiedTable {
        UnifiedTable::new(vec![JobAdRecord::empty(MartId::Pedagogik); rows])
    }

    #[test]
    fn second_access_within_ttl_hits_cache() {
        let cache = TableCache::new(3600);
        let mut loads = 0;
        for _ in 0..3 {
            let t = cache
                .get_or_load(|| -> Result<_, std::convert::Infallible> {
                    loads += 1;
                    Ok(table(2))
                })
                .unwrap();
            assert_eq!(t.len(), 2);
        }
        assert_eq!(loads, 1);
    }

    #[test]
    fn zero_ttl_reloads_every_access() {
        let cache = TableCache::new(0);
        let mut loads = 0;
        for _ in 0..2 {
            cache
                .get_or_load(|| -> Result<_, std::convert::Infallible> {
                    loads += 1;
                    Ok(table(1))
                })
                .unwrap();
        }
        assert_eq!(loads, 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let cache = TableCache::new(3600);
        cache
            .get_or_load(|| -> Result<_, std::convert::Infallible> { Ok(table(1)) })
            .unwrap();
        assert!(!cache.is_stale(Utc::now()));

        cache.invalidate();
        assert!(cache.is_stale(Utc::now()));
        assert!(cache.last_refresh().is_none());

        let mut reloaded = false;
        cache
            .get_or_load(|| -> Result<_, std::convert::Infallible> {
                reloaded = true;
                Ok(table(5))
            })
            .unwrap();
        assert!(reloaded);
    }

    #[test]
    fn failed_reload_keeps_previous_table() {
        let cache = TableCache::new(0);
        cache
            .get_or_load(|| -> Result<_, std::convert::Infallible> { Ok(table(4)) })
            .unwrap();

        let err = cache.get_or_load(|| -> Result<UnifiedTable, &str> { Err("locked") });
        assert_eq!(err.unwrap_err(), "locked");

        // The stale table is still there for a later successful reload path.
        let t = cache
            .get_or_load(|| -> Result<_, std::convert::Infallible> { Ok(table(6)) })
            .unwrap();
        assert_eq!(t.len(), 6);
    }
}
