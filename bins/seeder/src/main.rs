//! Fixture seeder for Pulse development and testing.
//!
//! Writes one `<table>.json` file per department into the configured fixture
//! directory, with a row per KPI for every month the calendar exposes.
//!
//! Usage: cargo run --bin seeder

use std::fs;
use std::path::Path;

use anyhow::Context;
use pulse_api::setup::calendar_from_config;
use pulse_core::calendar::{CalendarModel, FinancialYear};
use pulse_core::dashboard::{Department, KpiRow};
use pulse_shared::AppConfig;
use rust_decimal::Decimal;

/// KPI catalogue per department: `(category, name, monthly target)`.
fn catalogue(department: Department) -> &'static [(&'static str, &'static str, i64)] {
    match department {
        Department::Product => &[
            ("Stack performance", "Stack efficiency (kWh/kg H2)", 52),
            ("Manufacturing performance", "Commercial systems built", 4),
            ("Manufacturing performance", "Manufacturing yield", 95),
        ],
        Department::Sales => &[
            ("Revenue & orders", "Order intake", 1_200_000),
            ("Revenue & orders", "Average deal size", 300_000),
            ("Pipeline", "Qualified opportunities", 18),
        ],
        Department::Marketing => &[
            ("Qualified demand generation", "Qualified inbound inquiries", 40),
            ("Qualified demand generation", "Inbound accepted by Sales", 25),
            ("Brand", "Industry event leads", 60),
        ],
        Department::Rnd => &[
            ("Technology development", "Critical milestone completion", 90),
            ("Technology development", "Infrastructure capacity utilization", 75),
        ],
        Department::Finance => &[
            ("Cash position & runway", "Cash balance", 25_000_000),
            ("Cash position & runway", "Underlying operating burn", 1_500_000),
        ],
        Department::Bd => &[
            ("Market access", "Qualified enterprise conversations", 12),
            ("Market access", "Anchor accounts identified", 3),
            ("Partnerships", "Signed MoUs", 2),
        ],
    }
}

/// Deterministic achievement between 70% and 125% so every status band and
/// trend shows up in the fixtures.
fn actual_for(target: i64, seed: usize) -> Decimal {
    let percent = 70 + i64::try_from((seed * 37) % 56).unwrap_or(0);
    Decimal::from(target) * Decimal::from(percent) / Decimal::ONE_HUNDRED
}

fn rows_for(department: Department, calendar: &CalendarModel) -> Vec<KpiRow> {
    let mut rows = Vec::new();
    let mut seed = department as usize;
    for year_calendar in calendar.years() {
        let year: &FinancialYear = &year_calendar.year;
        for definition in &year_calendar.quarters {
            for month in definition.months {
                for (category, name, target) in catalogue(department) {
                    seed += 1;
                    rows.push(KpiRow {
                        department,
                        kpi_category: (*category).to_string(),
                        kpi_name: (*name).to_string(),
                        region: (department == Department::Bd).then(|| "MENA".to_string()),
                        month: month.short_name().to_string(),
                        quarter: Some(definition.quarter.to_string()),
                        financial_year: year.to_string(),
                        target: Some(Decimal::from(*target)),
                        actual: Some(actual_for(*target, seed)),
                    });
                }
            }
        }
    }
    rows
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let calendar = calendar_from_config(config.calendar.as_deref())?;
    let dir = Path::new(&config.row_store.fixture_dir);

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    for department in Department::ALL {
        let rows = rows_for(department, &calendar);
        let path = dir.join(format!("{}.json", department.table()));
        let json = serde_json::to_string_pretty(&rows)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  {} rows -> {}", rows.len(), path.display());
    }

    println!("Seeding complete!");
    Ok(())
}
