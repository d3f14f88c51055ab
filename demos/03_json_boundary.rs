/// json boundary - validate and answer request bodies
use debt_payoff_rs::boundary::{handle_forecast, handle_preview};

fn main() {
    let preview = handle_preview(
        r#"{
            "month": "2024-01",
            "incomes": ["5000"],
            "expenses": [3000],
            "debts": [{"id": "a", "name": "card", "balance": 1000, "apr": 0.24, "minPayment": 50}]
        }"#,
    );
    println!("{} {}", preview.status, preview.body);

    let invalid = handle_forecast(r#"{"startMonth": "January", "maxMonths": 999}"#);
    println!("{} {}", invalid.status, invalid.body);
}
