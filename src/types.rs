use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::calendar::YearMonth;
use crate::decimal::{Money, Rate};
use crate::errors::PlannerError;

/// identifier of a debt, unique within one planning run
pub type DebtId = String;

/// payoff strategy deciding which debt receives surplus first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// smallest balance first
    Snowball,
    /// highest apr first
    Avalanche,
    /// highest apr first, smaller balance breaks ties
    #[default]
    Hybrid,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Snowball, Strategy::Avalanche, Strategy::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
            Strategy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snowball" => Ok(Strategy::Snowball),
            "avalanche" => Ok(Strategy::Avalanche),
            "hybrid" => Ok(Strategy::Hybrid),
            other => Err(PlannerError::Validation {
                issues: vec![crate::errors::ValidationIssue::new(
                    "strategy",
                    format!("unknown strategy {other:?}"),
                )],
            }),
        }
    }
}

/// one debt entering a planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtItem {
    pub id: DebtId,
    pub name: String,
    pub balance: Money,
    pub apr: Rate,
    pub min_payment: Money,
}

impl DebtItem {
    /// create a debt with a freshly generated id
    pub fn new(name: impl Into<String>, balance: Money, apr: Rate, min_payment: Money) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, balance, apr, min_payment)
    }

    pub fn with_id(
        id: impl Into<DebtId>,
        name: impl Into<String>,
        balance: Money,
        apr: Rate,
        min_payment: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            apr,
            min_payment,
        }
    }

    /// same debt carried forward with a new balance
    pub fn with_balance(&self, balance: Money) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }

    pub fn is_paid_off(&self) -> bool {
        self.balance <= Money::ZERO
    }
}

/// one debt's line in a monthly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPlanRow {
    pub debt_id: DebtId,
    pub name: String,
    pub scheduled_payment: Money,
    pub interest_accrued: Money,
    pub new_balance: Money,
}

impl MonthPlanRow {
    /// part of the scheduled payment that reduced principal
    pub fn principal_paid(&self) -> Money {
        (self.scheduled_payment - self.interest_accrued).floor_zero()
    }
}

/// allocation and resulting balances for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPlan {
    pub month: YearMonth,
    pub rows: Vec<MonthPlanRow>,
    pub total_interest: Money,
}

impl MonthPlan {
    pub fn row(&self, debt_id: &str) -> Option<&MonthPlanRow> {
        self.rows.iter().find(|r| r.debt_id == debt_id)
    }

    /// sum of scheduled payments across all rows
    pub fn total_scheduled(&self) -> Money {
        self.rows.iter().map(|r| r.scheduled_payment).sum()
    }

    /// sum of balances after this month
    pub fn total_balance(&self) -> Money {
        self.rows.iter().map(|r| r.new_balance).sum()
    }
}
