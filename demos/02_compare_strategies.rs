/// compare strategies - same budget, three payoff orders
use debt_payoff_rs::{compare_strategies, DebtItem, ForecastRequest, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = ForecastRequest::builder()
        .start_month("2025-01".parse()?)
        .income(Money::from_major(3_000))
        .variable_monthly(Money::from_major(2_300))
        .debt(DebtItem::new("medical bill", Money::from_major(400), Rate::ZERO, Money::from_major(25)))
        .debt(DebtItem::new("credit card", Money::from_major(6_000), Rate::from_decimal(dec!(0.24)), Money::from_major(150)))
        .debt(DebtItem::new("personal loan", Money::from_major(2_500), Rate::from_decimal(dec!(0.11)), Money::from_major(80)))
        .build()?;

    let comparison = compare_strategies(&request);
    for outcome in &comparison.outcomes {
        println!(
            "{:<10} {:>3} months  interest {:>9}  done {}",
            outcome.strategy,
            outcome.months,
            outcome.total_interest.round_dp(2),
            outcome.end_month,
        );
    }

    if let Some(best) = comparison.cheapest() {
        println!("cheapest: {}", best.strategy);
    }

    Ok(())
}
