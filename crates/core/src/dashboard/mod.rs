//! Department KPI rows and the cached row-store boundary.
//!
//! The storage backend is a [`RowSource`]; [`DashboardDataStore`] caches
//! each department's rows so that selection changes never hit the backend.

pub mod error;
pub mod source;
pub mod store;
pub mod summary;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::DataStoreError;
pub use source::RowSource;
pub use store::DashboardDataStore;
pub use summary::{BaselineSummary, DashboardSummary, KpiSummary};
pub use types::{Department, KpiRow};
