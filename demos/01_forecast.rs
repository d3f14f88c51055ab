/// forecast - project balances month by month until payoff
use debt_payoff_rs::{
    forecast_with_events, DebtItem, Event, EventStore, FixedExpense, ForecastRequest, Money, Rate,
    Strategy,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = ForecastRequest::builder()
        .start_month("2024-01".parse()?)
        .strategy(Strategy::Hybrid)
        .income(Money::from_major(4_200))
        .fixed_expense(FixedExpense::new(Money::from_major(1_800)))
        .fixed_expense(FixedExpense::new(Money::from_major(350)).until("2024-06".parse()?))
        .variable_monthly(Money::from_major(900))
        .debt(DebtItem::new("credit card", Money::from_major(3_400), Rate::from_decimal(dec!(0.279)), Money::from_major(90)))
        .debt(DebtItem::new("store card", Money::from_major(650), Rate::from_decimal(dec!(0.279)), Money::from_major(25)))
        .debt(DebtItem::new("student loan", Money::from_major(9_800), Rate::from_decimal(dec!(0.045)), Money::from_major(120)))
        .max_months(120)
        .build()?;

    let mut events = EventStore::new();
    let result = forecast_with_events(&request, &mut events);

    for plan in &result.schedule {
        println!(
            "{}  interest {:>8}  balance {:>10}",
            plan.month,
            plan.total_interest.round_dp(2),
            plan.total_balance().round_dp(2),
        );
    }

    for event in events.events() {
        if let Event::DebtPaidOff { name, month, .. } = event {
            println!("{name} paid off in {month}");
        }
    }

    println!(
        "{} -> {} ({} months), total interest {}, remaining {}",
        result.start_month,
        result.end_month,
        result.months(),
        result.total_interest().round_dp(2),
        result.remaining.round_dp(2),
    );

    Ok(())
}
