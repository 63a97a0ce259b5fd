//! Core period-selection logic for Pulse.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Calendar tables, selection rules, comparison baselines and KPI arithmetic
//! live here; storage backends plug in through [`dashboard::RowSource`].
//!
//! # Modules
//!
//! - `calendar` - Financial years, quarters, months and the live period
//! - `period` - Selection classification and comparison baselines
//! - `selection` - The month/quarter selection state machine
//! - `filter` - Read-only projection used to filter dashboard rows
//! - `metrics` - KPI achievement, growth and trend
//! - `dashboard` - Department rows and the cached row store

pub mod calendar;
pub mod dashboard;
pub mod filter;
pub mod metrics;
pub mod period;
pub mod selection;
