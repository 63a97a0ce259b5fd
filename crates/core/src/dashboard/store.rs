//! Department row caching using Moka.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use super::error::DataStoreError;
use super::source::RowSource;
use super::types::{Department, KpiRow};

/// Default cache capacity (departments).
const DEFAULT_CACHE_CAPACITY: u64 = 16;

/// Default time-to-live for cached rows (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Cached, read-only access to department rows.
///
/// Concurrent misses for the same department share a single backend fetch.
#[derive(Clone)]
pub struct DashboardDataStore {
    source: Arc<dyn RowSource>,
    cache: Cache<Department, Arc<Vec<KpiRow>>>,
}

impl DashboardDataStore {
    /// Creates a store with default cache settings.
    #[must_use]
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        Self::with_config(source, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a store with custom cache settings.
    #[must_use]
    pub fn with_config(source: Arc<dyn RowSource>, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { source, cache }
    }

    /// Rows of `department`, fetched on first use.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the rows are not cached and the fetch
    /// fails. Failures are not cached.
    pub async fn rows(&self, department: Department) -> Result<Arc<Vec<KpiRow>>, DataStoreError> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with(department, async move {
                source.fetch(department).await.map(Arc::new)
            })
            .await
            .map_err(|err| (*err).clone())
    }

    /// Re-fetches `department` and replaces its cached rows.
    ///
    /// On failure the previously cached rows stay in place.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    pub async fn refresh(&self, department: Department) -> Result<Arc<Vec<KpiRow>>, DataStoreError> {
        let rows = Arc::new(self.source.fetch(department).await?);
        self.cache.insert(department, Arc::clone(&rows)).await;
        Ok(rows)
    }

    /// Refreshes every department, returning the row count of each.
    ///
    /// # Errors
    ///
    /// Stops at the first department whose fetch fails.
    pub async fn refresh_all(&self) -> Result<Vec<(Department, usize)>, DataStoreError> {
        let mut counts = Vec::with_capacity(Department::ALL.len());
        for department in Department::ALL {
            let rows = self.refresh(department).await?;
            counts.push((department, rows.len()));
        }
        Ok(counts)
    }

    /// Drops every cached department.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Whether `department` currently has cached rows.
    #[must_use]
    pub fn is_cached(&self, department: Department) -> bool {
        self.cache.contains_key(&department)
    }

    /// Backend name.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}

impl std::fmt::Debug for DashboardDataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardDataStore")
            .field("source", &self.source.name())
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
