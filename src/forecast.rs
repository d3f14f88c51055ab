//! Multi-month forecasting: repeat the single-month plan, carrying balances
//! forward, until every debt is paid off or the month cap is reached.

use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::YearMonth;
use crate::config::PlannerConfig;
use crate::decimal::Money;
use crate::errors::{PlannerError, Result, ValidationIssue};
use crate::events::{Event, EventStore};
use crate::planner::plan_one_month;
use crate::types::{DebtItem, MonthPlan, Strategy};

/// recurring monthly expense, optionally limited to a window of months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub amount: Money,
    pub start: Option<YearMonth>,
    pub end: Option<YearMonth>,
}

impl FixedExpense {
    /// expense active in every month
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            start: None,
            end: None,
        }
    }

    /// expense active from `start` through `end`, both inclusive
    pub fn between(amount: Money, start: YearMonth, end: YearMonth) -> Self {
        Self {
            amount,
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn starting(mut self, start: YearMonth) -> Self {
        self.start = Some(start);
        self
    }

    pub fn until(mut self, end: YearMonth) -> Self {
        self.end = Some(end);
        self
    }

    /// a missing start never excludes a month; a missing end is unbounded
    pub fn is_active(&self, month: YearMonth) -> bool {
        let after_start = self.start.map_or(true, |s| month >= s);
        let before_end = self.end.map_or(true, |e| month <= e);
        after_start && before_end
    }
}

/// sum of the fixed expenses active in `month`
pub fn active_fixed_total(expenses: &[FixedExpense], month: YearMonth) -> Money {
    expenses
        .iter()
        .filter(|e| e.is_active(month))
        .map(|e| e.amount)
        .sum()
}

/// inputs of a multi-month forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub start_month: YearMonth,
    pub strategy: Strategy,
    /// monthly income lines, held constant across the forecast
    pub incomes: Vec<Money>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub variable_monthly: Money,
    pub debts: Vec<DebtItem>,
    pub max_months: u32,
}

impl ForecastRequest {
    pub fn builder() -> ForecastBuilder {
        ForecastBuilder::new()
    }

    /// same request with a different strategy
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self {
            strategy,
            ..self.clone()
        }
    }
}

/// forecast result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub start_month: YearMonth,
    /// last month actually produced; `start_month` when nothing was simulated
    pub end_month: YearMonth,
    /// sum of final balances; non-zero means the cap was hit first
    pub remaining: Money,
    pub schedule: Vec<MonthPlan>,
}

impl Forecast {
    fn empty(start_month: YearMonth) -> Self {
        Self {
            start_month,
            end_month: start_month,
            remaining: Money::ZERO,
            schedule: Vec::new(),
        }
    }

    /// number of simulated months
    pub fn months(&self) -> u32 {
        self.schedule.len() as u32
    }

    pub fn is_paid_off(&self) -> bool {
        self.remaining <= Money::ZERO
    }

    pub fn total_interest(&self) -> Money {
        self.schedule.iter().map(|p| p.total_interest).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.schedule.iter().map(|p| p.total_scheduled()).sum()
    }

    /// first month after which the debt's balance is zero
    pub fn payoff_month(&self, debt_id: &str) -> Option<YearMonth> {
        self.schedule
            .iter()
            .find(|plan| {
                plan.row(debt_id)
                    .is_some_and(|row| row.new_balance <= Money::ZERO)
            })
            .map(|plan| plan.month)
    }
}

/// run a forecast
pub fn forecast(request: &ForecastRequest) -> Forecast {
    run(request, None)
}

/// run a forecast, recording milestones into `events`
pub fn forecast_with_events(request: &ForecastRequest, events: &mut EventStore) -> Forecast {
    run(request, Some(events))
}

fn run(request: &ForecastRequest, mut events: Option<&mut EventStore>) -> Forecast {
    if request.debts.is_empty() {
        debug!(start_month = %request.start_month, "no debts, skipping forecast");
        return Forecast::empty(request.start_month);
    }

    let income_total: Money = request.incomes.iter().sum();
    let incomes = [income_total];

    let mut month = request.start_month;
    let mut debts = request.debts.clone();
    let mut schedule = Vec::new();

    for _ in 0..request.max_months {
        let fixed_total = active_fixed_total(&request.fixed_expenses, month);
        let expenses = [fixed_total + request.variable_monthly];

        let plan = plan_one_month(month, request.strategy, &incomes, &expenses, &debts);

        let next_debts: Vec<DebtItem> = debts
            .iter()
            .map(|d| {
                let balance = plan.row(&d.id).map_or(d.balance, |r| r.new_balance);
                d.with_balance(balance)
            })
            .collect();

        if let Some(store) = events.as_deref_mut() {
            store.emit(Event::MonthPlanned {
                month,
                total_interest: plan.total_interest,
                total_scheduled: plan.total_scheduled(),
                remaining_balance: plan.total_balance(),
            });
            for (before, after) in debts.iter().zip(&next_debts) {
                if !before.is_paid_off() && after.is_paid_off() {
                    store.emit(Event::DebtPaidOff {
                        debt_id: after.id.clone(),
                        name: after.name.clone(),
                        month,
                    });
                }
            }
        }

        debug!(%month, fixed = %fixed_total, interest = %plan.total_interest, "forecast month");

        schedule.push(plan);
        debts = next_debts;

        if debts.iter().all(DebtItem::is_paid_off) {
            break;
        }
        month = month.next();
    }

    let end_month = schedule.last().map_or(request.start_month, |p| p.month);
    let remaining: Money = debts.iter().map(|d| d.balance.floor_zero()).sum();

    let result = Forecast {
        start_month: request.start_month,
        end_month,
        remaining,
        schedule,
    };

    if result.is_paid_off() {
        debug!(%end_month, months = result.months(), "forecast paid off");
        if let Some(store) = events {
            store.emit(Event::ForecastCompleted {
                strategy: request.strategy,
                start_month: request.start_month,
                end_month,
                months: result.months(),
                total_interest: result.total_interest(),
            });
        }
    } else {
        warn!(%end_month, %remaining, max_months = request.max_months, "forecast horizon exhausted");
        if let Some(store) = events {
            store.emit(Event::HorizonExhausted {
                strategy: request.strategy,
                end_month,
                max_months: request.max_months,
                remaining,
            });
        }
    }

    result
}

/// builder for forecast requests
pub struct ForecastBuilder {
    config: PlannerConfig,
    start_month: Option<YearMonth>,
    strategy: Option<Strategy>,
    incomes: Vec<Money>,
    fixed_expenses: Vec<FixedExpense>,
    variable_monthly: Money,
    debts: Vec<DebtItem>,
    max_months: Option<u32>,
}

impl ForecastBuilder {
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
            start_month: None,
            strategy: None,
            incomes: Vec::new(),
            fixed_expenses: Vec::new(),
            variable_monthly: Money::ZERO,
            debts: Vec::new(),
            max_months: None,
        }
    }

    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn start_month(mut self, month: YearMonth) -> Self {
        self.start_month = Some(month);
        self
    }

    /// start at the provider's current month
    pub fn starting_now(mut self, time: &SafeTimeProvider) -> Self {
        self.start_month = Some(YearMonth::current(time));
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn income(mut self, amount: Money) -> Self {
        self.incomes.push(amount);
        self
    }

    pub fn incomes(mut self, amounts: impl IntoIterator<Item = Money>) -> Self {
        self.incomes.extend(amounts);
        self
    }

    pub fn fixed_expense(mut self, expense: FixedExpense) -> Self {
        self.fixed_expenses.push(expense);
        self
    }

    pub fn variable_monthly(mut self, amount: Money) -> Self {
        self.variable_monthly = amount;
        self
    }

    pub fn debt(mut self, debt: DebtItem) -> Self {
        self.debts.push(debt);
        self
    }

    pub fn debts(mut self, debts: impl IntoIterator<Item = DebtItem>) -> Self {
        self.debts.extend(debts);
        self
    }

    pub fn max_months(mut self, months: u32) -> Self {
        self.max_months = Some(months);
        self
    }

    pub fn build(self) -> Result<ForecastRequest> {
        let start_month = self.start_month.ok_or_else(|| PlannerError::Validation {
            issues: vec![ValidationIssue::new("startMonth", "start month is required")],
        })?;
        let max_months = self
            .config
            .validate_horizon(self.max_months.unwrap_or(self.config.default_max_months))?;

        Ok(ForecastRequest {
            start_month,
            strategy: self.strategy.unwrap_or(self.config.default_strategy),
            incomes: self.incomes,
            fixed_expenses: self.fixed_expenses,
            variable_monthly: self.variable_monthly,
            debts: self.debts,
            max_months,
        })
    }
}

impl Default for ForecastBuilder {
    fn default() -> Self {
        Self::new()
    }
}
