//! Stored row shape shared by the backends.

use pulse_core::dashboard::{Department, KpiRow};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A row as stored in a department table. The department is implied by the
/// table and stamped on after decoding.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredRow {
    kpi_category: String,
    kpi_name: String,
    #[serde(default)]
    region: Option<String>,
    month: String,
    #[serde(default)]
    quarter: Option<String>,
    #[serde(alias = "fiscal_year")]
    financial_year: String,
    #[serde(default)]
    target: Option<Decimal>,
    #[serde(default)]
    actual: Option<Decimal>,
}

impl StoredRow {
    pub(crate) fn into_kpi_row(self, department: Department) -> KpiRow {
        KpiRow {
            department,
            kpi_category: self.kpi_category,
            kpi_name: self.kpi_name,
            region: self.region,
            month: self.month,
            quarter: self.quarter,
            financial_year: self.financial_year,
            target: self.target,
            actual: self.actual,
        }
    }
}

/// Decodes a JSON array of stored rows.
pub(crate) fn decode_rows(
    bytes: &[u8],
    department: Department,
) -> Result<Vec<KpiRow>, serde_json::Error> {
    let rows: Vec<StoredRow> = serde_json::from_slice(bytes)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_kpi_row(department))
        .collect())
}
