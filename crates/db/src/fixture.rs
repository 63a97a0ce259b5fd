//! JSON fixture backend.
//!
//! Each department is read from `{dir}/{table}.json`, a JSON array of rows.
//! A missing file means the department has no data yet.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pulse_core::dashboard::{DataStoreError, Department, KpiRow, RowSource};
use tracing::{debug, warn};

use crate::row::decode_rows;

/// Row source reading JSON files from a directory.
#[derive(Debug, Clone)]
pub struct JsonFileRowSource {
    dir: PathBuf,
}

impl JsonFileRowSource {
    /// Creates a source rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of a department's fixture file.
    #[must_use]
    pub fn path_for(&self, department: Department) -> PathBuf {
        self.dir.join(format!("{}.json", department.table()))
    }
}

#[async_trait]
impl RowSource for JsonFileRowSource {
    async fn fetch(&self, department: Department) -> Result<Vec<KpiRow>, DataStoreError> {
        let path = self.path_for(department);
        let table = department.table();

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(table, path = %path.display(), "No fixture file, serving empty table");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DataStoreError::Unavailable {
                    table: table.to_string(),
                    message: format!("{}: {e}", path.display()),
                });
            }
        };

        let rows = decode_rows(&bytes, department).map_err(|e| DataStoreError::Decode {
            table: table.to_string(),
            message: e.to_string(),
        })?;

        debug!(table, rows = rows.len(), "Loaded fixture rows");
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[tokio::test]
    async fn test_reads_rows_and_stamps_department() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("sales_dashboard.json"),
            r#"[
                {"kpi_category": "Revenue", "kpi_name": "Bookings", "month": "Jan",
                 "quarter": "Q4", "financial_year": "FY2026", "target": 100, "actual": "92.5"},
                {"kpi_category": "Revenue", "kpi_name": "Bookings", "month": "Feb",
                 "fiscal_year": "FY2026", "region": "MENA"}
            ]"#,
        )
        .unwrap();

        let source = JsonFileRowSource::new(dir.path());
        let rows = source.fetch(Department::Sales).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.department == Department::Sales));
        assert_eq!(rows[0].target, Some(dec!(100)));
        assert_eq!(rows[0].actual, Some(dec!(92.5)));
        assert_eq!(rows[1].financial_year, "FY2026");
        assert_eq!(rows[1].region.as_deref(), Some("MENA"));
        assert_eq!(rows[1].actual, None);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileRowSource::new(dir.path());
        assert!(source.fetch(Department::Rnd).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bd_dashboard.json"), "{not json").unwrap();

        let source = JsonFileRowSource::new(dir.path());
        let err = source.fetch(Department::Bd).await.unwrap_err();
        assert!(matches!(err, DataStoreError::Decode { .. }));
    }
}
