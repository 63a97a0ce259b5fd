//! Tests for the selection state machine.

use std::sync::Arc;

use proptest::prelude::*;

use super::error::SelectionError;
use super::state::SelectionStateMachine;
use crate::calendar::{CalendarError, CalendarModel, FinancialYear, LivePeriod, Month, Quarter};
use crate::period::{ComparisonMode, SelectionType};

use Month::{April, February, January, June, March, May};

fn fy(n: u32) -> FinancialYear {
    FinancialYear::fy(n)
}

fn machine() -> SelectionStateMachine {
    let calendar = Arc::new(CalendarModel::standard());
    let live = LivePeriod::new(February, Quarter::Q4, fy(2026), &calendar).unwrap();
    SelectionStateMachine::new(calendar, live).unwrap()
}

#[test]
fn test_default_state_is_live_month() {
    let machine = machine();
    assert_eq!(machine.selected_months(), &[February]);
    assert!(machine.selected_quarters().is_empty());
    assert_eq!(machine.selected_year(), &fy(2026));
    assert!(machine.selection().is_custom_mode());

    let context = machine.context().unwrap();
    assert_eq!(context.selection_type, SelectionType::SingleMonth);
    assert_eq!(context.comparison_mode, ComparisonMode::MonthOverMonth);
    assert!(context.is_current);
}

#[test]
fn test_rejects_live_period_outside_calendar() {
    let calendar = Arc::new(CalendarModel::standard());
    let live = LivePeriod {
        month: May,
        quarter: Quarter::Q1,
        year: fy(2025),
    };
    assert!(matches!(
        SelectionStateMachine::new(calendar, live),
        Err(SelectionError::Calendar(CalendarError::MonthNotInYear { .. }))
    ));
}

#[test]
fn test_toggle_quarter_derives_months() {
    let mut machine = machine();
    machine.toggle_quarter(Quarter::Q1).unwrap();

    assert_eq!(machine.selected_quarters(), &[Quarter::Q1]);
    assert_eq!(machine.selected_months(), &[April, May, June]);
    assert!(!machine.selection().is_custom_mode());
}

#[test]
fn test_toggle_month_leaves_quarter_mode() {
    let mut machine = machine();
    machine.toggle_quarter(Quarter::Q1).unwrap();
    machine.toggle_month(April).unwrap();

    assert!(machine.selected_quarters().is_empty());
    assert_eq!(machine.selected_months(), &[May, June]);
    assert!(machine.selection().is_custom_mode());
}

#[test]
fn test_quarters_keep_canonical_order() {
    let mut machine = machine();
    machine.toggle_quarter(Quarter::Q2).unwrap();
    machine.toggle_quarter(Quarter::Q4).unwrap();

    assert_eq!(machine.selected_quarters(), &[Quarter::Q4, Quarter::Q2]);
    assert_eq!(
        machine.selected_months(),
        &[
            January,
            February,
            March,
            Month::July,
            Month::August,
            Month::September
        ]
    );
}

#[test]
fn test_toggling_last_quarter_off_heals_to_live_month() {
    let mut machine = machine();
    machine.toggle_quarter(Quarter::Q1).unwrap();
    machine.toggle_quarter(Quarter::Q1).unwrap();

    assert_eq!(machine.selected_months(), &[February]);
    assert!(machine.selected_quarters().is_empty());
}

#[test]
fn test_toggling_last_month_off_heals_to_live_month() {
    let mut machine = machine();
    machine.toggle_month(February).unwrap();
    assert_eq!(machine.selected_months(), &[February]);
}

#[test]
fn test_unknown_month_leaves_state_untouched() {
    let mut machine = machine();
    machine.set_year(fy(2025)).unwrap();
    let before = machine.selection().clone();

    let err = machine.toggle_month(May).unwrap_err();
    assert!(matches!(err, SelectionError::UnknownMonth { month: May, .. }));
    assert_eq!(machine.selection(), &before);
}

#[test]
fn test_unknown_quarter_leaves_state_untouched() {
    let mut machine = machine();
    machine.set_year(fy(2025)).unwrap();
    let before = machine.selection().clone();

    let err = machine.toggle_quarter(Quarter::Q2).unwrap_err();
    assert!(matches!(
        err,
        SelectionError::UnknownQuarter {
            quarter: Quarter::Q2,
            ..
        }
    ));
    assert_eq!(machine.selection(), &before);
}

#[test]
fn test_set_year_selects_first_quarter() {
    let mut machine = machine();
    machine.set_year(fy(2025)).unwrap();

    assert_eq!(machine.selected_year(), &fy(2025));
    assert_eq!(machine.selected_quarters(), &[Quarter::Q4]);
    assert_eq!(machine.selected_months(), &[January, February, March]);
}

#[test]
fn test_set_unknown_year_fails() {
    let mut machine = machine();
    let before = machine.selection().clone();
    assert!(matches!(
        machine.set_year(fy(2030)),
        Err(SelectionError::Calendar(CalendarError::UnknownYear(_)))
    ));
    assert_eq!(machine.selection(), &before);
}

#[test]
fn test_select_all_months() {
    let mut machine = machine();
    machine.toggle_quarter(Quarter::Q1).unwrap();
    machine.select_all_months();

    assert_eq!(machine.selected_months(), Month::ALL.as_slice());
    assert!(machine.selected_quarters().is_empty());
    assert_eq!(machine.projection().unwrap().display_label(), "Full Year (FY2026)");
}

#[test]
fn test_select_all_months_is_year_relative() {
    let mut machine = machine();
    machine.set_year(fy(2025)).unwrap();
    machine.select_all_months();

    assert_eq!(machine.selected_months(), &[January, February, March]);
    assert!(machine.selected_quarters().is_empty());
}

#[test]
fn test_select_all_quarters() {
    let mut machine = machine();
    machine.select_all_quarters();

    assert_eq!(
        machine.selected_quarters(),
        &[Quarter::Q4, Quarter::Q1, Quarter::Q2, Quarter::Q3]
    );
    assert_eq!(machine.selected_months(), Month::ALL.as_slice());
}

#[test]
fn test_clear_selection_keeps_year() {
    let mut machine = machine();
    machine.select_all_quarters();
    machine.clear_selection();

    assert_eq!(machine.selected_months(), &[February]);
    assert!(machine.selected_quarters().is_empty());
    assert_eq!(machine.selected_year(), &fy(2026));
}

#[test]
fn test_clear_heals_to_first_quarter_when_live_month_missing() {
    let calendar = Arc::new(
        CalendarModel::new(vec![
            crate::calendar::YearCalendar {
                year: fy(2026),
                quarters: vec![crate::calendar::QuarterDefinition::new(
                    Quarter::Q4,
                    [January, February, March],
                )],
            },
            crate::calendar::YearCalendar {
                year: fy(2027),
                quarters: vec![crate::calendar::QuarterDefinition::new(
                    Quarter::Q1,
                    [April, May, June],
                )],
            },
        ])
        .unwrap(),
    );
    let live = LivePeriod::new(February, Quarter::Q4, fy(2026), &calendar).unwrap();
    let mut machine = SelectionStateMachine::new(calendar, live).unwrap();

    machine.set_year(fy(2027)).unwrap();
    machine.toggle_quarter(Quarter::Q1).unwrap();

    assert_eq!(machine.selected_quarters(), &[Quarter::Q1]);
    assert_eq!(machine.selected_months(), &[April, May, June]);
}

#[test]
fn test_comparison_follows_selection() {
    let mut machine = machine();
    machine.toggle_quarter(Quarter::Q1).unwrap();

    let period = machine.comparison_period().unwrap();
    let comparison = period.comparison.unwrap();
    assert_eq!(comparison.period.months, vec![January, February, March]);
    assert_eq!(comparison.period.label, "Q4");

    let yoy = machine.year_over_year().unwrap().comparison.unwrap();
    assert_eq!(yoy.period.year, fy(2025));
    assert_eq!(yoy.period.label, "Q1 FY2025");
}

#[derive(Debug, Clone)]
enum Op {
    ToggleMonth(usize),
    ToggleQuarter(usize),
    SelectAllMonths,
    SelectAllQuarters,
    Clear,
    SetYear(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..12).prop_map(Op::ToggleMonth),
        3 => (0usize..4).prop_map(Op::ToggleQuarter),
        1 => Just(Op::SelectAllMonths),
        1 => Just(Op::SelectAllQuarters),
        1 => Just(Op::Clear),
        1 => (2024u32..=2027).prop_map(Op::SetYear),
    ]
}

fn apply(machine: &mut SelectionStateMachine, op: &Op) {
    // Rejected operations must not change state, so their errors are ignored.
    let _ = match op {
        Op::ToggleMonth(i) => machine.toggle_month(Month::ALL[*i]),
        Op::ToggleQuarter(i) => machine.toggle_quarter(Quarter::ALL[*i]),
        Op::SelectAllMonths => {
            machine.select_all_months();
            Ok(())
        }
        Op::SelectAllQuarters => {
            machine.select_all_quarters();
            Ok(())
        }
        Op::Clear => {
            machine.clear_selection();
            Ok(())
        }
        Op::SetYear(n) => machine.set_year(fy(*n)),
    };
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// **Selection invariants hold after any operation sequence**
    ///
    /// *For any* sequence of operations, the selection is non-empty, quarter
    /// mode derives months from quarters, and every month belongs to the
    /// active year.
    #[test]
    fn prop_invariants_hold(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut machine = machine();
        for op in &ops {
            let before = machine.selection().clone();
            apply(&mut machine, op);

            let selection = machine.selection();
            let calendar = machine.calendar();
            prop_assert!(!selection.months.is_empty());
            prop_assert!(selection.months.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(selection
                .months
                .iter()
                .all(|m| calendar.is_month_in_year(&selection.year, *m)));

            if !selection.quarters.is_empty() {
                let mut derived: Vec<Month> = selection
                    .quarters
                    .iter()
                    .flat_map(|q| calendar.months_of_quarter(&selection.year, *q).iter().copied())
                    .collect();
                derived.sort_unstable();
                prop_assert_eq!(&derived, &selection.months);
            }

            if let Op::SetYear(n) = op {
                if !calendar.has_year(&fy(*n)) {
                    prop_assert_eq!(selection, &before);
                }
            }

            prop_assert!(machine.context().is_ok());
        }
    }
}
