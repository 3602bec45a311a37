use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    expense::{check_records, Expense},
    ledger::{LedgerState, PlanningMode},
};
use crate::{currency::CurrencyCode, errors::LedgerError};

pub type TemplateId = u64;

/// Named, immutable copy of a ledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "expenses")]
    pub records: Vec<Expense>,
    #[serde(default)]
    pub goal: f64,
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default)]
    pub mode: PlanningMode,
}

impl Template {
    pub fn capture(
        id: TemplateId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        ledger: &LedgerState,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
            records: ledger.records.clone(),
            goal: ledger.goal,
            currency: ledger.currency.clone(),
            mode: ledger.mode,
        }
    }

    /// Checks the name and the captured records with the ledger rules.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::validation(format!(
                "template {} has no name",
                self.id
            )));
        }
        check_records(&self.records)
    }

    /// Ledger fields to apply wholesale when the template is loaded.
    pub fn ledger_state(&self) -> LedgerState {
        LedgerState {
            records: self.records.clone(),
            goal: self.goal,
            currency: CurrencyCode::new(self.currency.as_str()),
            mode: self.mode,
        }
    }
}
