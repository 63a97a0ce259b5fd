//! Tests for department rows and the cached store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal_macros::dec;

use super::error::DataStoreError;
use super::source::RowSource;
use super::store::DashboardDataStore;
use super::summary::DashboardSummary;
use super::types::{Department, KpiRow};
use crate::calendar::{CalendarModel, FinancialYear, LivePeriod, Month, Quarter};
use crate::metrics::Trend;
use crate::selection::SelectionStateMachine;

#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl CountingSource {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RowSource for CountingSource {
    async fn fetch(&self, department: Department) -> Result<Vec<KpiRow>, DataStoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DataStoreError::Unavailable {
                table: department.table().to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok((0..=call).map(|_| sample_row(department)).collect())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn sample_row(department: Department) -> KpiRow {
    KpiRow {
        department,
        kpi_category: "Revenue".to_string(),
        kpi_name: "New bookings".to_string(),
        region: None,
        month: "Jan".to_string(),
        quarter: Some("Q4".to_string()),
        financial_year: "FY2026".to_string(),
        target: Some(dec!(100)),
        actual: Some(dec!(92.5)),
    }
}

#[test]
fn test_department_tables() {
    assert_eq!(Department::Product.table(), "product_dashboard");
    assert_eq!(Department::Rnd.table(), "rnd_dashboard");
    assert_eq!(Department::Bd.table(), "bd_dashboard");
    assert_eq!(Department::ALL.len(), 6);
}

#[test]
fn test_department_parse() {
    assert_eq!("sales".parse::<Department>().unwrap(), Department::Sales);
    assert_eq!("RND".parse::<Department>().unwrap(), Department::Rnd);
    assert_eq!(
        "finance_dashboard".parse::<Department>().unwrap(),
        Department::Finance
    );
    assert_eq!(
        "hr".parse::<Department>(),
        Err(DataStoreError::UnknownDepartment("hr".to_string()))
    );
}

#[test]
fn test_kpi_row_accepts_string_and_number_values() {
    let row: KpiRow = serde_json::from_str(
        r#"{
            "department": "marketing",
            "kpi_category": "Leads",
            "kpi_name": "MQLs",
            "month": "February",
            "financial_year": "FY2026",
            "target": "250",
            "actual": 240.5
        }"#,
    )
    .unwrap();

    assert_eq!(row.department, Department::Marketing);
    assert_eq!(row.target, Some(dec!(250)));
    assert_eq!(row.actual, Some(dec!(240.5)));
    assert_eq!(row.quarter, None);
    assert_eq!(row.region, None);
}

#[tokio::test]
async fn test_rows_are_cached() {
    let source = Arc::new(CountingSource::default());
    let store = DashboardDataStore::new(source.clone());

    let first = store.rows(Department::Sales).await.unwrap();
    let second = store.rows(Department::Sales).await.unwrap();

    assert_eq!(source.calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(store.is_cached(Department::Sales));
    assert!(!store.is_cached(Department::Product));
}

#[tokio::test]
async fn test_refresh_replaces_rows() {
    let source = Arc::new(CountingSource::default());
    let store = DashboardDataStore::new(source.clone());

    assert_eq!(store.rows(Department::Sales).await.unwrap().len(), 1);
    assert_eq!(store.refresh(Department::Sales).await.unwrap().len(), 2);
    assert_eq!(store.rows(Department::Sales).await.unwrap().len(), 2);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_failed_refresh_keeps_cached_rows() {
    let source = Arc::new(CountingSource::default());
    let store = DashboardDataStore::new(source.clone());
    store.rows(Department::Bd).await.unwrap();

    source.failing.store(true, Ordering::SeqCst);
    let err = store.refresh(Department::Bd).await.unwrap_err();
    assert!(matches!(err, DataStoreError::Unavailable { ref table, .. } if table == "bd_dashboard"));

    assert_eq!(store.rows(Department::Bd).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let source = Arc::new(CountingSource::default());
    source.failing.store(true, Ordering::SeqCst);
    let store = DashboardDataStore::new(source.clone());

    assert!(store.rows(Department::Finance).await.is_err());
    source.failing.store(false, Ordering::SeqCst);
    assert!(store.rows(Department::Finance).await.is_ok());
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_refresh_all_and_invalidate() {
    let source = Arc::new(CountingSource::default());
    let store = DashboardDataStore::new(source.clone());

    let counts = store.refresh_all().await.unwrap();
    assert_eq!(counts.len(), Department::ALL.len());
    assert_eq!(source.calls(), Department::ALL.len());

    store.invalidate_all();
    store.rows(Department::Product).await.unwrap();
    assert_eq!(source.calls(), Department::ALL.len() + 1);
}

fn kpi(name: &str, month: &str, year: &str, target: i64, actual: i64) -> KpiRow {
    KpiRow {
        department: Department::Sales,
        kpi_category: "Revenue".to_string(),
        kpi_name: name.to_string(),
        region: None,
        month: month.to_string(),
        quarter: None,
        financial_year: year.to_string(),
        target: Some(target.into()),
        actual: Some(actual.into()),
    }
}

fn live_machine() -> SelectionStateMachine {
    let calendar = Arc::new(CalendarModel::standard());
    let live = LivePeriod::new(
        Month::February,
        Quarter::Q4,
        FinancialYear::fy(2026),
        &calendar,
    )
    .unwrap();
    SelectionStateMachine::new(calendar, live).unwrap()
}

#[test]
fn test_summary_compares_against_previous_month() {
    let rows = vec![
        kpi("Bookings", "Jan", "FY2026", 100, 100),
        kpi("Bookings", "Feb", "FY2026", 100, 115),
        kpi("Bookings", "Feb", "FY2025", 100, 50),
        kpi("Leads", "February", "FY2026", 20, 10),
    ];
    let machine = live_machine();
    let summary = DashboardSummary::build(
        &rows,
        &machine.projection().unwrap(),
        &machine.comparison_period().unwrap(),
    );

    assert_eq!(summary.rows.len(), 2);
    assert_eq!(summary.totals.actual, dec!(125));
    assert_eq!(summary.totals.target, dec!(120));

    let baseline = summary.baseline.unwrap();
    assert_eq!(baseline.period.period.months, vec![Month::January]);
    assert_eq!(baseline.totals.actual, dec!(100));
    assert_eq!(baseline.change.as_deref(), Some("↑ 25.0%"));

    assert_eq!(summary.kpis.len(), 2);
    let bookings = &summary.kpis[0];
    assert_eq!(bookings.kpi_name, "Bookings");
    assert_eq!(bookings.totals.actual, dec!(115));
    let bookings_baseline = bookings.baseline.as_ref().unwrap();
    assert_eq!(bookings_baseline.comparison.growth, dec!(15));
    assert_eq!(bookings_baseline.comparison.trend, Trend::Up);

    let leads = &summary.kpis[1];
    assert_eq!(leads.kpi_name, "Leads");
    let leads_baseline = leads.baseline.as_ref().unwrap();
    assert_eq!(leads_baseline.totals.rows, 0);
    assert_eq!(leads_baseline.change, None);
}

#[test]
fn test_summary_without_baseline_for_custom_selection() {
    let rows = vec![
        kpi("Bookings", "January", "FY2026", 100, 90),
        kpi("Bookings", "March", "FY2026", 100, 110),
    ];
    let mut machine = live_machine();
    machine.toggle_month(Month::January).unwrap();
    machine.toggle_month(Month::March).unwrap();
    machine.toggle_month(Month::February).unwrap();

    let summary = DashboardSummary::build(
        &rows,
        &machine.projection().unwrap(),
        &machine.comparison_period().unwrap(),
    );

    assert_eq!(summary.rows.len(), 2);
    assert_eq!(summary.totals.actual, dec!(200));
    assert!(summary.baseline.is_none());
    assert!(summary.kpis.iter().all(|k| k.baseline.is_none()));
}
