use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::forecast::{forecast, ForecastRequest};
use crate::types::Strategy;

/// outcome of one strategy over the same inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub months: u32,
    pub total_interest: Money,
    pub remaining: Money,
    pub end_month: YearMonth,
}

impl StrategyOutcome {
    pub fn is_paid_off(&self) -> bool {
        self.remaining <= Money::ZERO
    }
}

/// outcomes of every strategy over one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub outcomes: Vec<StrategyOutcome>,
}

impl StrategyComparison {
    /// least total interest; ties go to fewer months, then listing order
    pub fn cheapest(&self) -> Option<&StrategyOutcome> {
        self.outcomes.iter().reduce(|best, candidate| {
            let better = (candidate.total_interest, candidate.months) < (best.total_interest, best.months);
            if better {
                candidate
            } else {
                best
            }
        })
    }

    pub fn outcome(&self, strategy: Strategy) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }
}

/// forecast the request once per strategy, ignoring its own strategy
pub fn compare_strategies(request: &ForecastRequest) -> StrategyComparison {
    let outcomes = Strategy::ALL
        .iter()
        .map(|&strategy| {
            let result = forecast(&request.with_strategy(strategy));
            StrategyOutcome {
                strategy,
                months: result.months(),
                total_interest: result.total_interest(),
                remaining: result.remaining,
                end_month: result.end_month,
            }
        })
        .collect();

    StrategyComparison { outcomes }
}
