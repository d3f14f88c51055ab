//! Property-based tests for the planner and forecaster.

use proptest::prelude::*;

use crate::calendar::YearMonth;
use crate::decimal::{Money, Rate};
use crate::forecast::{forecast, ForecastRequest};
use crate::planner::{allocate_surplus, plan_one_month};
use crate::types::{DebtItem, Strategy as PayoffStrategy};

/// amounts from 0.00 to 50,000.00
fn amount() -> impl Strategy<Value = Money> {
    (0i64..5_000_000i64).prop_map(|cents| Money::from_minor(cents, 2))
}

/// aprs from 0% to 40% in basis points
fn apr() -> impl Strategy<Value = Rate> {
    (0u32..4_000u32).prop_map(Rate::from_bps)
}

fn payoff_strategy() -> impl Strategy<Value = PayoffStrategy> {
    prop_oneof![
        Just(PayoffStrategy::Snowball),
        Just(PayoffStrategy::Avalanche),
        Just(PayoffStrategy::Hybrid),
    ]
}

fn debts() -> impl Strategy<Value = Vec<DebtItem>> {
    prop::collection::vec((amount(), apr(), amount()), 0..8).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (balance, apr, min_payment))| {
                DebtItem::with_id(format!("d{i}"), format!("debt {i}"), balance, apr, min_payment.min(balance))
            })
            .collect()
    })
}

fn month() -> YearMonth {
    YearMonth::new(2024, 1).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_total_interest_is_sum_of_rows(
        strategy in payoff_strategy(),
        income in amount(),
        expense in amount(),
        debts in debts(),
    ) {
        let plan = plan_one_month(month(), strategy, &[income], &[expense], &debts);
        let sum: Money = plan.rows.iter().map(|r| r.interest_accrued).sum();
        prop_assert_eq!(sum, plan.total_interest);
    }

    #[test]
    fn prop_balances_never_negative_or_growing(
        strategy in payoff_strategy(),
        income in amount(),
        debts in debts(),
    ) {
        let plan = plan_one_month(month(), strategy, &[income], &[], &debts);
        prop_assert_eq!(plan.rows.len(), debts.len());
        for (row, debt) in plan.rows.iter().zip(&debts) {
            prop_assert_eq!(&row.debt_id, &debt.id);
            prop_assert!(row.new_balance >= Money::ZERO);
            prop_assert!(row.new_balance <= debt.balance);
            let expected = (debt.balance - (row.scheduled_payment - row.interest_accrued).floor_zero()).floor_zero();
            prop_assert_eq!(row.new_balance, expected);
        }
    }

    #[test]
    fn prop_plan_is_pure(
        strategy in payoff_strategy(),
        income in amount(),
        debts in debts(),
    ) {
        let snapshot = debts.clone();
        let first = plan_one_month(month(), strategy, &[income], &[], &debts);
        let second = plan_one_month(month(), strategy, &[income], &[], &debts);
        prop_assert_eq!(first, second);
        prop_assert_eq!(debts, snapshot);
    }

    #[test]
    fn prop_allocation_bounded_by_surplus_and_balance(
        strategy in payoff_strategy(),
        extra in amount(),
        debts in debts(),
    ) {
        let allocation = allocate_surplus(strategy, extra, &debts);
        let total: Money = allocation.iter().sum();
        prop_assert!(total <= extra);
        for (given, debt) in allocation.iter().zip(&debts) {
            prop_assert!(*given >= Money::ZERO);
            prop_assert!(*given <= debt.balance);
        }
    }

    #[test]
    fn prop_avalanche_fills_higher_apr_first(
        low in amount(),
        high in amount(),
        extra in amount(),
        low_apr in 0u32..2_000u32,
        gap in 1u32..2_000u32,
    ) {
        let debts = vec![
            DebtItem::with_id("low", "low", low, Rate::from_bps(low_apr), Money::ZERO),
            DebtItem::with_id("high", "high", high, Rate::from_bps(low_apr + gap), Money::ZERO),
        ];
        let allocation = allocate_surplus(PayoffStrategy::Avalanche, extra, &debts);
        if allocation[0] > Money::ZERO {
            prop_assert_eq!(allocation[1], high);
        }
    }

    #[test]
    fn prop_forecast_respects_horizon(
        strategy in payoff_strategy(),
        income in amount(),
        debts in debts(),
        max_months in 1u32..24,
    ) {
        let request = ForecastRequest {
            start_month: month(),
            strategy,
            incomes: vec![income],
            fixed_expenses: Vec::new(),
            variable_monthly: Money::ZERO,
            debts: debts.clone(),
            max_months,
        };
        let result = forecast(&request);

        prop_assert!(result.months() <= max_months);
        prop_assert!(result.remaining >= Money::ZERO);
        if debts.is_empty() {
            prop_assert!(result.schedule.is_empty());
        } else {
            let expected_end = result.start_month.add_months(result.months() - 1);
            prop_assert_eq!(result.end_month, expected_end);
            prop_assert!(result.is_paid_off() || result.months() == max_months);
        }
    }
}

