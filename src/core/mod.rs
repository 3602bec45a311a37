pub mod derivation;
pub mod ledger_store;
pub mod limits_store;
pub mod session;
pub mod template_store;
pub mod utils;

pub use derivation::{LedgerDerivations, SortKey, Summary};
pub use ledger_store::LedgerStore;
pub use limits_store::LimitsStore;
pub use session::{BudgetSession, SessionOptions};
pub use template_store::{TemplateStore, TEMPLATE_CAP};
