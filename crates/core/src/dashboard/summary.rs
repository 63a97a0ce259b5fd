//! Per-selection dashboard aggregates.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::FilterProjection;
use crate::metrics::{KpiComparison, PeriodTotals, format_change};
use crate::period::{ComparisonDescriptor, ComparisonPeriod};

use super::types::KpiRow;

/// Totals of the baseline period and how the selection compares.
#[derive(Debug, Clone, Serialize)]
pub struct BaselineSummary {
    /// Baseline period.
    pub period: ComparisonDescriptor,
    /// Baseline totals.
    pub totals: PeriodTotals,
    /// Selection compared with the baseline.
    pub comparison: KpiComparison,
    /// Change caption, absent for a zero baseline.
    pub change: Option<String>,
}

/// Aggregate for one KPI (and region, when rows are regional).
#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    /// KPI grouping.
    pub kpi_category: String,
    /// KPI name.
    pub kpi_name: String,
    /// Region, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Totals over the selection.
    pub totals: PeriodTotals,
    /// Baseline, when the selection has one.
    pub baseline: Option<BaselineSummary>,
}

/// Everything a dashboard needs for the current selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    /// Rows inside the selection.
    pub rows: Vec<KpiRow>,
    /// Totals over those rows.
    pub totals: PeriodTotals,
    /// Baseline over all rows, when the selection has one.
    pub baseline: Option<BaselineSummary>,
    /// Per-KPI breakdown, ordered by category, name and region.
    pub kpis: Vec<KpiSummary>,
}

type KpiKey<'r> = (&'r str, &'r str, Option<&'r str>);

impl DashboardSummary {
    /// Aggregates `rows` for the selection behind `projection`, comparing
    /// against the baseline in `period` if there is one.
    #[must_use]
    pub fn build(rows: &[KpiRow], projection: &FilterProjection, period: &ComparisonPeriod) -> Self {
        let selected = projection.filter_rows(rows);
        let totals = PeriodTotals::from_rows(selected.iter().copied());
        let baseline = period
            .comparison
            .as_ref()
            .map(|descriptor| baseline_summary(rows.iter(), descriptor, &totals));

        let mut groups: BTreeMap<KpiKey<'_>, Vec<&KpiRow>> = BTreeMap::new();
        for row in rows {
            groups
                .entry((row.kpi_category.as_str(), row.kpi_name.as_str(), row.region.as_deref()))
                .or_default()
                .push(row);
        }

        let kpis = groups
            .into_iter()
            .filter_map(|((category, name, region), group)| {
                let in_selection: Vec<&KpiRow> = group
                    .iter()
                    .copied()
                    .filter(|row| projection.row_matches(*row))
                    .collect();
                if in_selection.is_empty() {
                    return None;
                }
                let totals = PeriodTotals::from_rows(in_selection);
                let baseline = period
                    .comparison
                    .as_ref()
                    .map(|descriptor| baseline_summary(group.iter().copied(), descriptor, &totals));
                Some(KpiSummary {
                    kpi_category: category.to_string(),
                    kpi_name: name.to_string(),
                    region: region.map(str::to_string),
                    totals,
                    baseline,
                })
            })
            .collect();

        Self {
            rows: selected.into_iter().cloned().collect(),
            totals,
            baseline,
            kpis,
        }
    }
}

fn baseline_summary<'r>(
    rows: impl Iterator<Item = &'r KpiRow>,
    descriptor: &ComparisonDescriptor,
    current: &PeriodTotals,
) -> BaselineSummary {
    let totals = PeriodTotals::from_rows(
        rows.filter(|row| FilterProjection::period_matches(&descriptor.period, *row)),
    );
    BaselineSummary {
        period: descriptor.clone(),
        comparison: current.compare_with(&totals),
        change: format_change(current.actual, totals.actual),
        totals,
    }
}
