use std::cmp::Ordering;

use crate::types::{DebtItem, Strategy};

/// compare two debts by payoff priority; `Less` means `a` is paid first
pub fn compare(strategy: Strategy, a: &DebtItem, b: &DebtItem) -> Ordering {
    match strategy {
        Strategy::Avalanche => b.apr.cmp(&a.apr),
        Strategy::Snowball => a.balance.cmp(&b.balance),
        Strategy::Hybrid => b.apr.cmp(&a.apr).then_with(|| a.balance.cmp(&b.balance)),
    }
}

/// indices of `debts` in the order they receive surplus
///
/// The sort is stable, so debts that still tie keep their input order.
pub fn priority_order(strategy: Strategy, debts: &[DebtItem]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..debts.len()).collect();
    order.sort_by(|&i, &j| compare(strategy, &debts[i], &debts[j]));
    order
}
