use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::types::{DebtId, Strategy};

/// milestones recorded while forecasting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    MonthPlanned {
        month: YearMonth,
        total_interest: Money,
        total_scheduled: Money,
        remaining_balance: Money,
    },
    DebtPaidOff {
        debt_id: DebtId,
        name: String,
        month: YearMonth,
    },
    ForecastCompleted {
        strategy: Strategy,
        start_month: YearMonth,
        end_month: YearMonth,
        months: u32,
        total_interest: Money,
    },
    /// month cap hit with balances still outstanding
    HorizonExhausted {
        strategy: Strategy,
        end_month: YearMonth,
        max_months: u32,
        remaining: Money,
    },
}

/// event store for collecting events during a run
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
