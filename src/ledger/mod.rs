//! Ledger domain models and persistence-friendly types.

pub mod category;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod limits;
pub mod template;

pub use category::Category;
pub use expense::{check_records, next_id, Expense, ExpenseDraft, ExpenseId};
pub use ledger::{LedgerSnapshot, LedgerState, PlanningMode, DEMO_GOAL};
pub use limits::CategoryLimits;
pub use template::{Template, TemplateId};
