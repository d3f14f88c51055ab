//! JSON request/response layer for the preview and forecast operations.
//!
//! Requests arrive as camelCase JSON with numbers that may be sent as
//! numeric strings. Every offending field is collected into a
//! [`ValidationIssue`] before any planning happens. Responses carry money
//! as plain JSON numbers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use crate::calendar::YearMonth;
use crate::config::PlannerConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result, ValidationIssue};
use crate::forecast::{forecast, FixedExpense, Forecast, ForecastRequest};
use crate::planner::plan_one_month;
use crate::types::{DebtItem, MonthPlan, Strategy};

/// number sent either as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    fn to_decimal(&self) -> Option<Decimal> {
        let raw = match self {
            NumericInput::Number(n) => n.to_string(),
            NumericInput::Text(s) => s.trim().to_string(),
        };
        if raw.is_empty() {
            return None;
        }
        Decimal::from_str_exact(&raw)
            .or_else(|_| Decimal::from_scientific(&raw))
            .ok()
    }
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        NumericInput::Number(n.into())
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub balance: Option<NumericInput>,
    pub apr: Option<NumericInput>,
    pub min_payment: Option<NumericInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpenseInput {
    pub amount: Option<NumericInput>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// body of a single-month preview
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub month: Option<String>,
    pub strategy: Option<String>,
    #[serde(default)]
    pub incomes: Vec<NumericInput>,
    #[serde(default)]
    pub expenses: Vec<NumericInput>,
    #[serde(default)]
    pub debts: Vec<DebtInput>,
}

/// validated preview inputs
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewInput {
    pub month: YearMonth,
    pub strategy: Strategy,
    pub incomes: Vec<Money>,
    pub expenses: Vec<Money>,
    pub debts: Vec<DebtItem>,
}

impl PreviewRequest {
    pub fn validate(&self, config: &PlannerConfig) -> Result<PreviewInput> {
        let mut v = Validator::new(config);

        let month = v.year_month("month", self.month.as_deref());
        let strategy = v.strategy(self.strategy.as_deref(), config);
        let incomes = v.amounts("incomes", &self.incomes);
        let expenses = v.amounts("expenses", &self.expenses);
        let debts = v.debts(&self.debts);

        v.finish()?;
        Ok(PreviewInput {
            month: month.ok_or_else(missing_after_validation)?,
            strategy,
            incomes,
            expenses,
            debts,
        })
    }
}

/// body of a multi-month forecast
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequestBody {
    pub start_month: Option<String>,
    pub strategy: Option<String>,
    #[serde(default)]
    pub incomes: Vec<NumericInput>,
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpenseInput>,
    pub variable_monthly: Option<NumericInput>,
    #[serde(default)]
    pub debts: Vec<DebtInput>,
    pub max_months: Option<NumericInput>,
}

impl ForecastRequestBody {
    pub fn validate(&self, config: &PlannerConfig) -> Result<ForecastRequest> {
        let mut v = Validator::new(config);

        let start_month = v.year_month("startMonth", self.start_month.as_deref());
        let strategy = v.strategy(self.strategy.as_deref(), config);
        let incomes = v.amounts("incomes", &self.incomes);

        let fixed_expenses: Vec<FixedExpense> = self
            .fixed_expenses
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let path = format!("fixedExpenses[{i}]");
                FixedExpense {
                    amount: v.required_amount(&format!("{path}.amount"), input.amount.as_ref()),
                    start: input
                        .start
                        .as_deref()
                        .and_then(|s| v.year_month(&format!("{path}.start"), Some(s))),
                    end: input
                        .end
                        .as_deref()
                        .and_then(|s| v.year_month(&format!("{path}.end"), Some(s))),
                }
            })
            .collect();

        let variable_monthly = match &self.variable_monthly {
            Some(input) => v.amount("variableMonthly", input),
            None => Money::ZERO,
        };
        let debts = v.debts(&self.debts);
        let max_months = v.horizon(self.max_months.as_ref(), config);

        v.finish()?;
        Ok(ForecastRequest {
            start_month: start_month.ok_or_else(missing_after_validation)?,
            strategy,
            incomes,
            fixed_expenses,
            variable_monthly,
            debts,
            max_months,
        })
    }
}

fn missing_after_validation() -> PlannerError {
    PlannerError::Validation {
        issues: vec![ValidationIssue::new("", "required field missing")],
    }
}

struct Validator {
    issues: Vec<ValidationIssue>,
    max_amount: Decimal,
    max_apr: Decimal,
}

impl Validator {
    fn new(config: &PlannerConfig) -> Self {
        Self {
            issues: Vec::new(),
            max_amount: config.max_amount,
            max_apr: config.max_apr,
        }
    }

    fn issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    fn decimal(&mut self, path: &str, input: &NumericInput) -> Option<Decimal> {
        let Some(value) = input.to_decimal() else {
            self.issue(path, format!("expected a number, got {input:?}"));
            return None;
        };
        // keeps sums and interest products inside Decimal's range
        if value.abs() > self.max_amount {
            self.issue(path, "value out of range");
            return None;
        }
        Some(value)
    }

    fn amount(&mut self, path: &str, input: &NumericInput) -> Money {
        self.decimal(path, input)
            .map(Money::from_decimal)
            .unwrap_or(Money::ZERO)
    }

    fn required_amount(&mut self, path: &str, input: Option<&NumericInput>) -> Money {
        match input {
            Some(input) => self.amount(path, input),
            None => {
                self.issue(path, "required");
                Money::ZERO
            }
        }
    }

    fn non_negative_amount(&mut self, path: &str, input: Option<&NumericInput>) -> Money {
        let value = self.required_amount(path, input);
        if value.is_negative() {
            self.issue(path, "must not be negative");
        }
        value
    }

    fn apr(&mut self, path: &str, input: Option<&NumericInput>) -> Rate {
        let value = self.non_negative_amount(path, input).as_decimal();
        if value > self.max_apr {
            self.issue(path, "value out of range");
            return Rate::ZERO;
        }
        Rate::from_decimal(value)
    }

    fn amounts(&mut self, path: &str, inputs: &[NumericInput]) -> Vec<Money> {
        inputs
            .iter()
            .enumerate()
            .map(|(i, input)| self.amount(&format!("{path}[{i}]"), input))
            .collect()
    }

    fn text(&mut self, path: &str, input: Option<&String>) -> String {
        match input {
            Some(s) => s.clone(),
            None => {
                self.issue(path, "required");
                String::new()
            }
        }
    }

    fn year_month(&mut self, path: &str, input: Option<&str>) -> Option<YearMonth> {
        match input {
            Some(raw) => match raw.parse() {
                Ok(month) => Some(month),
                Err(_) => {
                    self.issue(path, format!("expected YYYY-MM, got {raw:?}"));
                    None
                }
            },
            None => {
                self.issue(path, "required");
                None
            }
        }
    }

    fn strategy(&mut self, input: Option<&str>, config: &PlannerConfig) -> Strategy {
        match input {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                self.issue("strategy", format!("expected snowball, avalanche or hybrid, got {raw:?}"));
                config.default_strategy
            }),
            None => config.default_strategy,
        }
    }

    fn horizon(&mut self, input: Option<&NumericInput>, config: &PlannerConfig) -> u32 {
        let Some(input) = input else {
            return config.default_max_months;
        };
        let Some(value) = self.decimal("maxMonths", input) else {
            return config.default_max_months;
        };
        let months = if value.fract().is_zero() { value.to_u32() } else { None };
        match months.map(|m| config.validate_horizon(m)) {
            Some(Ok(m)) => m,
            _ => {
                self.issue(
                    "maxMonths",
                    format!(
                        "expected a whole number between {} and {}",
                        config.min_max_months, config.max_max_months
                    ),
                );
                config.default_max_months
            }
        }
    }

    fn debts(&mut self, inputs: &[DebtInput]) -> Vec<DebtItem> {
        inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let path = format!("debts[{i}]");
                DebtItem {
                    id: self.text(&format!("{path}.id"), input.id.as_ref()),
                    name: self.text(&format!("{path}.name"), input.name.as_ref()),
                    balance: self.non_negative_amount(&format!("{path}.balance"), input.balance.as_ref()),
                    apr: self.apr(&format!("{path}.apr"), input.apr.as_ref()),
                    min_payment: self
                        .non_negative_amount(&format!("{path}.minPayment"), input.min_payment.as_ref()),
                }
            })
            .collect()
    }

    fn finish(self) -> Result<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(PlannerError::Validation {
                issues: self.issues,
            })
        }
    }
}

fn to_number(money: Money) -> f64 {
    money.as_decimal().to_f64().unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowResponse {
    pub debt_id: String,
    pub name: String,
    pub scheduled_payment: f64,
    pub interest_accrued: f64,
    pub new_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPlanResponse {
    pub month: YearMonth,
    pub total_interest: f64,
    pub rows: Vec<RowResponse>,
}

impl From<&MonthPlan> for MonthPlanResponse {
    fn from(plan: &MonthPlan) -> Self {
        Self {
            month: plan.month,
            total_interest: to_number(plan.total_interest),
            rows: plan
                .rows
                .iter()
                .map(|r| RowResponse {
                    debt_id: r.debt_id.clone(),
                    name: r.name.clone(),
                    scheduled_payment: to_number(r.scheduled_payment),
                    interest_accrued: to_number(r.interest_accrued),
                    new_balance: to_number(r.new_balance),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub start_month: YearMonth,
    pub end_month: YearMonth,
    pub remaining: f64,
    pub schedule: Vec<MonthPlanResponse>,
}

impl From<&Forecast> for ForecastResponse {
    fn from(result: &Forecast) -> Self {
        Self {
            start_month: result.start_month,
            end_month: result.end_month,
            remaining: to_number(result.remaining),
            schedule: result.schedule.iter().map(MonthPlanResponse::from).collect(),
        }
    }
}

/// status code and json body handed back to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryResponse {
    pub status: u16,
    pub body: Value,
}

impl BoundaryResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn from_error(err: PlannerError) -> Self {
        match err {
            PlannerError::Validation { issues } => Self {
                status: 400,
                body: json!({ "error": "validation_error", "issues": issues }),
            },
            other => {
                error!(error = %other, "planning request failed");
                Self {
                    status: 500,
                    body: json!({ "error": "internal_error" }),
                }
            }
        }
    }
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| PlannerError::Validation {
        issues: vec![ValidationIssue::new("", err.to_string())],
    })
}

/// plan a single month from a json body
pub fn preview(body: &str, config: &PlannerConfig) -> Result<MonthPlanResponse> {
    let input = parse_body::<PreviewRequest>(body)?.validate(config)?;
    let plan = plan_one_month(
        input.month,
        input.strategy,
        &input.incomes,
        &input.expenses,
        &input.debts,
    );
    Ok(MonthPlanResponse::from(&plan))
}

/// run a forecast from a json body
pub fn forecast_json(body: &str, config: &PlannerConfig) -> Result<ForecastResponse> {
    let request = parse_body::<ForecastRequestBody>(body)?.validate(config)?;
    Ok(ForecastResponse::from(&forecast(&request)))
}

pub fn handle_preview(body: &str) -> BoundaryResponse {
    respond(preview(body, &PlannerConfig::default()))
}

pub fn handle_forecast(body: &str) -> BoundaryResponse {
    respond(forecast_json(body, &PlannerConfig::default()))
}

fn respond<T: Serialize>(result: Result<T>) -> BoundaryResponse {
    result
        .and_then(|response| Ok(serde_json::to_value(response)?))
        .map(BoundaryResponse::ok)
        .unwrap_or_else(BoundaryResponse::from_error)
}
