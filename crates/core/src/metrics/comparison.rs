//! Actual-versus-target and period-versus-baseline comparison.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Growth above this percentage is an upward trend.
const TREND_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Direction of change against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Growth above 5%.
    Up,
    /// Growth below -5%.
    Down,
    /// Anything in between.
    Neutral,
}

impl Trend {
    /// Classifies a growth percentage.
    #[must_use]
    pub fn from_growth(growth: Decimal) -> Self {
        if growth > TREND_THRESHOLD {
            Self::Up
        } else if growth < -TREND_THRESHOLD {
            Self::Down
        } else {
            Self::Neutral
        }
    }
}

/// Health of a KPI against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementStatus {
    /// Achievement between 80% and 120% inclusive.
    OnTrack,
    /// Achievement from 60% up to 80%.
    AtRisk,
    /// Below 60% or above 120%.
    OffTrack,
}

impl AchievementStatus {
    /// Classifies an achievement percentage.
    #[must_use]
    pub fn from_achievement(achievement: Decimal) -> Self {
        if (Decimal::from(80)..=Decimal::from(120)).contains(&achievement) {
            Self::OnTrack
        } else if (Decimal::from(60)..Decimal::from(80)).contains(&achievement) {
            Self::AtRisk
        } else {
            Self::OffTrack
        }
    }
}

/// One KPI in the current period compared with its baseline period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiComparison {
    /// Current actual.
    pub actual: Decimal,
    /// Current target.
    pub target: Decimal,
    /// Current achievement percentage (0 when there is no target).
    pub achievement: Decimal,
    /// Baseline actual.
    pub baseline_actual: Decimal,
    /// Baseline target.
    pub baseline_target: Decimal,
    /// Baseline achievement percentage.
    pub baseline_achievement: Decimal,
    /// Growth of the actual over the baseline actual, in percent.
    pub growth: Decimal,
    /// Actual minus baseline actual.
    pub difference: Decimal,
    /// Direction of the growth.
    pub trend: Trend,
    /// Status of the current achievement.
    pub status: AchievementStatus,
}

impl KpiComparison {
    /// Compares current actual/target with a baseline actual/target.
    ///
    /// Non-positive targets and baselines yield zero percentages rather than
    /// a division error, as do percentages that overflow `Decimal`. The
    /// difference saturates at the `Decimal` bounds.
    #[must_use]
    pub fn compare(
        actual: Decimal,
        target: Decimal,
        baseline_actual: Decimal,
        baseline_target: Decimal,
    ) -> Self {
        let achievement = percentage_of(actual, target);
        let baseline_achievement = percentage_of(baseline_actual, baseline_target);
        let growth = if baseline_actual > Decimal::ZERO {
            actual
                .checked_sub(baseline_actual)
                .and_then(|delta| ratio_percent(delta, baseline_actual))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Self {
            actual,
            target,
            achievement,
            baseline_actual,
            baseline_target,
            baseline_achievement,
            growth,
            difference: actual.saturating_sub(baseline_actual),
            trend: Trend::from_growth(growth),
            status: AchievementStatus::from_achievement(achievement),
        }
    }
}

/// Percentage change from `previous` to `current`, e.g. `"↑ 15.0%"`.
///
/// Returns `None` when there is no baseline to compare against or the change
/// does not fit in a `Decimal`.
#[must_use]
pub fn format_change(current: Decimal, previous: Decimal) -> Option<String> {
    if previous.is_zero() {
        return None;
    }
    let change = ratio_percent(current.checked_sub(previous)?, previous)?;
    let symbol = if change.is_sign_negative() && !change.is_zero() {
        '↓'
    } else {
        '↑'
    };
    Some(format!("{symbol} {:.1}%", one_decimal(change.abs())))
}

/// Signed growth percentage, e.g. `"+12.5%"` or `"-3.0%"`.
#[must_use]
pub fn format_growth(growth: Decimal) -> String {
    let sign = if growth > Decimal::ZERO { "+" } else { "" };
    format!("{sign}{:.1}%", one_decimal(growth))
}

fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        ratio_percent(part, whole).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// `part / whole * 100`, or `None` on overflow or a zero `whole`.
fn ratio_percent(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}

fn one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
