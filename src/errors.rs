use serde::{Deserialize, Serialize};
use thiserror::Error;

/// single offending field reported by request validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("invalid year-month: {value:?} (expected YYYY-MM)")]
    InvalidYearMonth {
        value: String,
    },

    #[error("invalid horizon: {max_months} months (allowed {min}..={max})")]
    InvalidHorizon {
        max_months: u32,
        min: u32,
        max: u32,
    },

    #[error("validation failed with {} issue(s)", .issues.len())]
    Validation {
        issues: Vec<ValidationIssue>,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialization {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
