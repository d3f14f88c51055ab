//! Single-month planning: split the month's surplus across debts and
//! project each balance one month forward.

use tracing::trace;

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::strategy::priority_order;
use crate::types::{DebtItem, MonthPlan, MonthPlanRow, Strategy};

/// income and expense lines for one month
#[derive(Debug, Clone, Copy)]
pub struct MonthBudget<'a> {
    pub incomes: &'a [Money],
    pub expenses: &'a [Money],
}

impl MonthBudget<'_> {
    pub fn income_total(&self) -> Money {
        self.incomes.iter().sum()
    }

    pub fn expense_total(&self) -> Money {
        self.expenses.iter().sum()
    }

    /// money left after expenses and every debt's minimum payment, floored at zero
    pub fn surplus(&self, debts: &[DebtItem]) -> Money {
        let minimums: Money = debts.iter().map(|d| d.min_payment).sum();
        (self.income_total() - self.expense_total() - minimums).floor_zero()
    }
}

/// distribute `extra` greedily in strategy order
///
/// Returns one allocation per debt, in input order. No debt receives more
/// than its outstanding balance.
pub fn allocate_surplus(strategy: Strategy, extra: Money, debts: &[DebtItem]) -> Vec<Money> {
    let mut allocation = vec![Money::ZERO; debts.len()];
    let mut remaining = extra;

    for idx in priority_order(strategy, debts) {
        if remaining <= Money::ZERO {
            break;
        }
        let give = remaining.min(debts[idx].balance);
        allocation[idx] += give;
        remaining -= give;
    }

    allocation
}

/// plan one month of payments
///
/// Pure: `debts` is only read and every output is a fresh value. Rows come
/// back in input order.
pub fn plan_one_month(
    month: YearMonth,
    strategy: Strategy,
    incomes: &[Money],
    expenses: &[Money],
    debts: &[DebtItem],
) -> MonthPlan {
    let budget = MonthBudget { incomes, expenses };
    let extra = budget.surplus(debts);
    let allocation = allocate_surplus(strategy, extra, debts);

    let rows: Vec<MonthPlanRow> = debts
        .iter()
        .zip(allocation)
        .map(|(debt, extra_alloc)| plan_row(debt, extra_alloc))
        .collect();

    let total_interest = rows.iter().map(|r| r.interest_accrued).sum();

    trace!(%month, %strategy, %extra, %total_interest, debts = debts.len(), "planned month");

    MonthPlan {
        month,
        rows,
        total_interest,
    }
}

fn plan_row(debt: &DebtItem, extra_alloc: Money) -> MonthPlanRow {
    let interest = debt.balance.interest_at(debt.apr.monthly_rate());
    // scheduled is not clamped to what would zero the debt
    let scheduled = debt.min_payment + extra_alloc;
    let principal = (scheduled - interest).floor_zero();
    let new_balance = (debt.balance - principal).floor_zero();

    MonthPlanRow {
        debt_id: debt.id.clone(),
        name: debt.name.clone(),
        scheduled_payment: scheduled,
        interest_accrued: interest,
        new_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    fn month() -> YearMonth {
        "2024-01".parse().unwrap()
    }

    fn money(d: rust_decimal::Decimal) -> Money {
        Money::from_decimal(d)
    }

    fn debt(id: &str, balance: i64, apr: rust_decimal::Decimal, min_payment: i64) -> DebtItem {
        DebtItem::with_id(
            id,
            format!("debt {id}"),
            Money::from_major(balance),
            Rate::from_decimal(apr),
            Money::from_major(min_payment),
        )
    }

    #[test]
    fn test_avalanche_sample_scenario() {
        let debts = vec![debt("a", 1_000, dec!(0.24), 50), debt("b", 500, dec!(0.12), 30)];
        let plan = plan_one_month(
            month(),
            Strategy::Avalanche,
            &[Money::from_major(5_000)],
            &[Money::from_major(3_000)],
            &debts,
        );

        assert_eq!(plan.month, month());
        assert_eq!(plan.rows.len(), 2);

        let a = &plan.rows[0];
        assert_eq!(a.debt_id, "a");
        assert_eq!(a.interest_accrued, Money::from_major(20));
        assert_eq!(a.scheduled_payment, Money::from_major(1_050));
        assert_eq!(a.principal_paid(), Money::from_major(1_030));
        assert_eq!(a.new_balance, Money::ZERO);

        let b = &plan.rows[1];
        assert_eq!(b.debt_id, "b");
        assert_eq!(b.interest_accrued, Money::from_major(5));
        assert_eq!(b.scheduled_payment, Money::from_major(530));
        assert_eq!(b.principal_paid(), Money::from_major(525));
        assert_eq!(b.new_balance, Money::ZERO);

        assert_eq!(plan.total_interest, Money::from_major(25));
    }

    #[test]
    fn test_surplus_allocation_in_sample_scenario() {
        let debts = vec![debt("a", 1_000, dec!(0.24), 50), debt("b", 500, dec!(0.12), 30)];
        let budget = MonthBudget {
            incomes: &[Money::from_major(5_000)],
            expenses: &[Money::from_major(3_000)],
        };

        let extra = budget.surplus(&debts);
        assert_eq!(extra, Money::from_major(1_920));

        let allocation = allocate_surplus(Strategy::Avalanche, extra, &debts);
        assert_eq!(allocation, vec![Money::from_major(1_000), Money::from_major(500)]);
    }

    #[test]
    fn test_empty_debts() {
        let plan = plan_one_month(
            month(),
            Strategy::Hybrid,
            &[Money::from_major(1_000)],
            &[],
            &[],
        );
        assert!(plan.rows.is_empty());
        assert_eq!(plan.total_interest, Money::ZERO);
    }

    #[test]
    fn test_shortfall_pays_only_minimums() {
        let debts = vec![debt("a", 2_000, dec!(0.18), 100), debt("b", 800, dec!(0.30), 40)];
        let plan = plan_one_month(
            month(),
            Strategy::Avalanche,
            &[Money::from_major(1_000)],
            &[Money::from_major(950)],
            &debts,
        );

        assert_eq!(plan.rows[0].scheduled_payment, Money::from_major(100));
        assert_eq!(plan.rows[1].scheduled_payment, Money::from_major(40));
    }

    #[test]
    fn test_zero_apr_applies_full_payment_to_principal() {
        let debts = vec![debt("a", 1_200, dec!(0), 100)];
        let plan = plan_one_month(month(), Strategy::Snowball, &[], &[], &debts);

        assert_eq!(plan.rows[0].interest_accrued, Money::ZERO);
        assert_eq!(plan.rows[0].new_balance, Money::from_major(1_100));
    }

    #[test]
    fn test_payment_below_interest_leaves_balance_unchanged() {
        // 12% on 10,000 is 100 a month, minimum is only 60
        let debts = vec![debt("a", 10_000, dec!(0.12), 60)];
        let plan = plan_one_month(month(), Strategy::Hybrid, &[], &[], &debts);

        assert_eq!(plan.rows[0].interest_accrued, Money::from_major(100));
        assert_eq!(plan.rows[0].new_balance, Money::from_major(10_000));
    }

    #[test]
    fn test_last_payment_is_not_clamped() {
        let debts = vec![debt("a", 30, dec!(0), 100)];
        let plan = plan_one_month(month(), Strategy::Hybrid, &[], &[], &debts);

        assert_eq!(plan.rows[0].scheduled_payment, Money::from_major(100));
        assert_eq!(plan.rows[0].new_balance, Money::ZERO);
    }

    #[test]
    fn test_snowball_fills_smallest_balance_first() {
        let debts = vec![debt("big", 5_000, dec!(0.05), 0), debt("small", 300, dec!(0.01), 0)];
        let plan = plan_one_month(
            month(),
            Strategy::Snowball,
            &[Money::from_major(500)],
            &[],
            &debts,
        );

        assert_eq!(plan.rows[1].scheduled_payment, Money::from_major(300));
        assert_eq!(plan.rows[0].scheduled_payment, Money::from_major(200));
    }

    #[test]
    fn test_hybrid_tie_prefers_smaller_balance() {
        let debts = vec![debt("large", 2_000, dec!(0.2), 0), debt("small", 150, dec!(0.2), 0)];
        let plan = plan_one_month(
            month(),
            Strategy::Hybrid,
            &[Money::from_major(100)],
            &[],
            &debts,
        );

        assert_eq!(plan.rows[1].scheduled_payment, Money::from_major(100));
        assert_eq!(plan.rows[0].scheduled_payment, Money::ZERO);
    }

    #[test]
    fn test_fractional_rates_stay_exact() {
        // 19.9% apr on 1,234.56
        let debts = vec![DebtItem::with_id(
            "a",
            "card",
            money(dec!(1234.56)),
            Rate::from_decimal(dec!(0.199)),
            Money::from_major(50),
        )];
        let plan = plan_one_month(month(), Strategy::Hybrid, &[], &[], &debts);

        let expected = dec!(1234.56) * (dec!(0.199) / dec!(12));
        assert_eq!(plan.rows[0].interest_accrued.as_decimal(), expected);
        assert_eq!(plan.total_interest.round_dp(2), money(dec!(20.47)));
    }

    #[test]
    fn test_inputs_untouched_and_repeatable() {
        let debts = vec![debt("a", 1_000, dec!(0.24), 50), debt("b", 500, dec!(0.12), 30)];
        let snapshot = debts.clone();
        let incomes = [Money::from_major(2_000)];
        let expenses = [Money::from_major(1_500)];

        let first = plan_one_month(month(), Strategy::Hybrid, &incomes, &expenses, &debts);
        let second = plan_one_month(month(), Strategy::Hybrid, &incomes, &expenses, &debts);

        assert_eq!(first, second);
        assert_eq!(debts, snapshot);
    }
}
