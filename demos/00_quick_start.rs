/// quick start - plan a single month
use debt_payoff_rs::{plan_one_month, DebtItem, Money, Rate, Strategy, YearMonth};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let debts = vec![
        DebtItem::with_id("card", "credit card", Money::from_major(1_000), Rate::from_percentage(24), Money::from_major(50)),
        DebtItem::with_id("loan", "car loan", Money::from_major(500), Rate::from_percentage(12), Money::from_major(30)),
    ];

    let plan = plan_one_month(
        "2024-01".parse::<YearMonth>()?,
        Strategy::Avalanche,
        &[Money::from_major(5_000)],
        &[Money::from_major(3_000)],
        &debts,
    );

    for row in &plan.rows {
        println!(
            "{:<12} pay {:>8}  interest {:>6}  balance {:>8}",
            row.name,
            row.scheduled_payment.round_dp(2),
            row.interest_accrued.round_dp(2),
            row.new_balance.round_dp(2),
        );
    }
    println!("total interest: {}", plan.total_interest.round_dp(2));

    Ok(())
}
