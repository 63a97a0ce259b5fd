//! Storage backend seam.

use async_trait::async_trait;

use super::error::DataStoreError;
use super::types::{Department, KpiRow};

/// Backend that yields every KPI row of a department.
///
/// Implementations live outside the core crate (HTTP, files); the core only
/// sees rows.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Loads all rows of `department`.
    async fn fetch(&self, department: Department) -> Result<Vec<KpiRow>, DataStoreError>;

    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str;
}
