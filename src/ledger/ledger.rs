use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    category::Category,
    expense::{check_records, Expense, ExpenseId},
};
use crate::{currency::CurrencyCode, errors::LedgerError};

pub const DEMO_GOAL: f64 = 1200.0;

/// Planning context the ledger is used for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PlanningMode {
    #[default]
    Trip,
    Monthly,
}

impl PlanningMode {
    pub fn toggled(self) -> Self {
        match self {
            PlanningMode::Trip => PlanningMode::Monthly,
            PlanningMode::Monthly => PlanningMode::Trip,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningMode::Trip => "Trip",
            PlanningMode::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for PlanningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanningMode {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trip" => Ok(PlanningMode::Trip),
            "monthly" => Ok(PlanningMode::Monthly),
            other => Err(LedgerError::validation(format!(
                "unknown mode `{}` (expected Trip or Monthly)",
                other
            ))),
        }
    }
}

/// Expense records plus the settings of one planning session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerState {
    pub records: Vec<Expense>,
    pub goal: f64,
    pub currency: CurrencyCode,
    pub mode: PlanningMode,
}

impl LedgerState {
    /// The pre-filled trip shown to first-time users.
    pub fn demo() -> Self {
        let day = |d| NaiveDate::from_ymd_opt(2025, 10, d).unwrap_or_default();
        let record = |id, name: &str, amount, category, d| Expense {
            id,
            name: name.to_string(),
            amount,
            category,
            date: day(d),
            recurring: false,
        };
        Self {
            records: vec![
                record(1, "Flight (est)", 420.0, Category::Transport, 11),
                record(2, "Hotel (4 nights)", 360.0, Category::Accommodation, 12),
                record(3, "Food & Snacks", 150.0, Category::Food, 13),
            ],
            goal: DEMO_GOAL,
            currency: CurrencyCode::default(),
            mode: PlanningMode::Trip,
        }
    }

    pub fn record(&self, id: ExpenseId) -> Option<&Expense> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ExpenseId> + '_ {
        self.records.iter().map(|record| record.id)
    }

    /// Returns the state unchanged when every record is valid and ids are
    /// unique.
    pub fn validated(self) -> Result<Self, LedgerError> {
        check_records(&self.records)?;
        if !self.goal.is_finite() || self.goal < 0.0 {
            return Err(LedgerError::validation("goal must be a non-negative number"));
        }
        Ok(self)
    }

    pub fn snapshot(&self, updated_at: DateTime<Utc>) -> LedgerSnapshot {
        LedgerSnapshot {
            records: self.records.clone(),
            goal: self.goal,
            currency: self.currency.clone(),
            mode: self.mode,
            updated_at,
        }
    }
}

/// Persisted and exported shape of a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default, alias = "expenses")]
    pub records: Vec<Expense>,
    #[serde(default)]
    pub goal: f64,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub mode: PlanningMode,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl From<LedgerSnapshot> for LedgerState {
    fn from(snapshot: LedgerSnapshot) -> Self {
        Self {
            records: snapshot.records,
            goal: snapshot.goal,
            currency: CurrencyCode::new(snapshot.currency.0),
            mode: snapshot.mode,
        }
    }
}
