pub mod boundary;
pub mod calendar;
pub mod comparison;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod forecast;
pub mod planner;
pub mod strategy;
pub mod types;

#[cfg(test)]
mod props;

// re-export key types
pub use calendar::YearMonth;
pub use comparison::{compare_strategies, StrategyComparison, StrategyOutcome};
pub use config::PlannerConfig;
pub use decimal::{Money, Rate};
pub use errors::{PlannerError, Result, ValidationIssue};
pub use events::{Event, EventStore};
pub use forecast::{
    active_fixed_total, forecast, forecast_with_events, FixedExpense, Forecast, ForecastBuilder,
    ForecastRequest,
};
pub use planner::{allocate_surplus, plan_one_month, MonthBudget};
pub use types::{DebtId, DebtItem, MonthPlan, MonthPlanRow, Strategy};

// re-export external dependencies that users will need
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
