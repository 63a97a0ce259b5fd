//! Department and KPI row types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::filter::{MonthLabeled, QuarterLabeled};
use crate::metrics::KpiValued;

use super::error::DataStoreError;

/// Department owning a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    /// Product
    Product,
    /// Sales
    Sales,
    /// Marketing
    Marketing,
    /// Research and development
    Rnd,
    /// Finance
    Finance,
    /// Business development
    Bd,
}

impl Department {
    /// All departments.
    pub const ALL: [Self; 6] = [
        Self::Product,
        Self::Sales,
        Self::Marketing,
        Self::Rnd,
        Self::Finance,
        Self::Bd,
    ];

    /// Slug used in URLs and fixture file names.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Sales => "sales",
            Self::Marketing => "marketing",
            Self::Rnd => "rnd",
            Self::Finance => "finance",
            Self::Bd => "bd",
        }
    }

    /// Backing table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Product => "product_dashboard",
            Self::Sales => "sales_dashboard",
            Self::Marketing => "marketing_dashboard",
            Self::Rnd => "rnd_dashboard",
            Self::Finance => "finance_dashboard",
            Self::Bd => "bd_dashboard",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Department {
    type Err = DataStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.slug().eq_ignore_ascii_case(needle) || d.table() == needle)
            .ok_or_else(|| DataStoreError::UnknownDepartment(s.to_string()))
    }
}

/// One KPI value for one month.
///
/// Labels are kept as stored; matching against a selection is
/// case-insensitive and tolerates short month names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRow {
    /// Owning department.
    pub department: Department,
    /// KPI grouping, e.g. `"Revenue"`.
    pub kpi_category: String,
    /// KPI name.
    pub kpi_name: String,
    /// Region, for regional dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Month label, e.g. `"Jan"` or `"January"`.
    pub month: String,
    /// Quarter label, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
    /// Financial year label, e.g. `"FY2026"`.
    pub financial_year: String,
    /// Target value.
    #[serde(default)]
    pub target: Option<Decimal>,
    /// Actual value.
    #[serde(default)]
    pub actual: Option<Decimal>,
}

impl MonthLabeled for KpiRow {
    fn month_label(&self) -> &str {
        &self.month
    }

    fn financial_year_label(&self) -> Option<&str> {
        Some(&self.financial_year)
    }
}

impl QuarterLabeled for KpiRow {
    fn quarter_label(&self) -> Option<&str> {
        self.quarter.as_deref()
    }
}

impl KpiValued for KpiRow {
    fn target(&self) -> Option<Decimal> {
        self.target
    }

    fn actual(&self) -> Option<Decimal> {
        self.actual
    }
}
