use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{Local, Utc};

use crate::{
    core::{
        derivation::{LedgerDerivations, Summary},
        ledger_store::LedgerStore,
        limits_store::LimitsStore,
        template_store::TemplateStore,
    },
    currency::{CurrencyCode, LocaleConfig},
    errors::{LedgerError, Result},
    export::{self, ExportFormat},
    ledger::{LedgerState, PlanningMode, Template, TemplateId},
    storage::BlobStore,
};

pub const DEFAULT_BUFFER_PERCENT: f64 = 15.0;
pub const MAX_BUFFER_PERCENT: f64 = 50.0;

/// Start-up choices for a session, usually derived from the user config.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Seed the demo ledger when no ledger is stored yet.
    pub seed_demo: bool,
    pub buffer_percent: f64,
    /// Currency and mode of a fresh, unseeded ledger.
    pub default_currency: CurrencyCode,
    pub default_mode: PlanningMode,
    pub locale: LocaleConfig,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            seed_demo: true,
            buffer_percent: DEFAULT_BUFFER_PERCENT,
            default_currency: CurrencyCode::default(),
            default_mode: PlanningMode::default(),
            locale: LocaleConfig::default(),
        }
    }
}

/// Ties the ledger, template and limit stores to one storage backend.
pub struct BudgetSession {
    ledger: LedgerStore,
    templates: TemplateStore,
    limits: LimitsStore,
    buffer_percent: f64,
    locale: LocaleConfig,
}

impl BudgetSession {
    pub fn open(storage: Arc<dyn BlobStore>, options: SessionOptions) -> Self {
        let SessionOptions {
            seed_demo,
            buffer_percent,
            default_currency,
            default_mode,
            locale,
        } = options;
        let ledger = LedgerStore::open(storage.clone(), || {
            if seed_demo {
                LedgerState::demo()
            } else {
                LedgerState {
                    currency: default_currency,
                    mode: default_mode,
                    ..LedgerState::default()
                }
            }
        });
        let templates = TemplateStore::open(storage.clone());
        let limits = LimitsStore::open(storage);
        tracing::info!(
            records = ledger.records().len(),
            templates = templates.list().len(),
            "budget session ready"
        );
        Self {
            ledger,
            templates,
            limits,
            buffer_percent: clamp_buffer(buffer_percent),
            locale,
        }
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut LedgerStore {
        &mut self.ledger
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateStore {
        &mut self.templates
    }

    pub fn limits(&self) -> &LimitsStore {
        &self.limits
    }

    pub fn limits_mut(&mut self) -> &mut LimitsStore {
        &mut self.limits
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    pub fn buffer_percent(&self) -> f64 {
        self.buffer_percent
    }

    /// Buffer is session state only and is not persisted.
    pub fn set_buffer_percent(&mut self, percent: f64) -> Result<()> {
        if !percent.is_finite() || !(0.0..=MAX_BUFFER_PERCENT).contains(&percent) {
            return Err(LedgerError::validation(format!(
                "buffer must be between 0 and {MAX_BUFFER_PERCENT}"
            )));
        }
        self.buffer_percent = percent;
        Ok(())
    }

    pub fn summary(&self) -> Summary {
        self.ledger
            .state()
            .summary(self.limits.limits(), self.buffer_percent)
    }

    pub fn save_template(&mut self, name: &str) -> Result<&Template> {
        self.templates.save(name, self.ledger.state())
    }

    /// Replaces the ledger with template `id`. Unknown ids leave it unchanged.
    pub fn load_template(&mut self, id: TemplateId) -> bool {
        match self.templates.load(id) {
            Some(state) => {
                tracing::debug!(id, "template applied to ledger");
                self.ledger.replace(state);
                true
            }
            None => false,
        }
    }

    pub fn render_export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        export::render(format, self.ledger.state(), &self.locale, Utc::now())
    }

    pub fn export_to(&self, dir: &Path, format: ExportFormat) -> Result<PathBuf> {
        export::write_export(
            dir,
            format,
            self.ledger.state(),
            &self.locale,
            Local::now().date_naive(),
            Utc::now(),
        )
    }
}

fn clamp_buffer(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, MAX_BUFFER_PERCENT)
    } else {
        DEFAULT_BUFFER_PERCENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ledger::Category, storage::MemoryStore};

    fn session(options: SessionOptions) -> BudgetSession {
        BudgetSession::open(Arc::new(MemoryStore::new()), options)
    }

    #[test]
    fn fresh_session_seeds_demo_by_default() {
        let session = session(SessionOptions {
            buffer_percent: 20.0,
            ..SessionOptions::default()
        });
        let summary = session.summary();
        assert_eq!(summary.total, 930.0);
        assert_eq!(summary.goal, 1200.0);
        assert_eq!(summary.projected, 1116.0);
        assert_eq!(summary.progress, 78);
    }

    #[test]
    fn unseeded_session_uses_configured_defaults() {
        let session = session(SessionOptions {
            seed_demo: false,
            default_currency: CurrencyCode::new("eur"),
            default_mode: PlanningMode::Monthly,
            ..SessionOptions::default()
        });
        let state = session.ledger().state();
        assert!(state.records.is_empty());
        assert_eq!(state.currency.as_str(), "EUR");
        assert_eq!(state.mode, PlanningMode::Monthly);
    }

    #[test]
    fn buffer_is_range_checked() {
        let mut session = session(SessionOptions::default());
        assert!(session.set_buffer_percent(51.0).is_err());
        assert!(session.set_buffer_percent(-1.0).is_err());
        session.set_buffer_percent(0.0).unwrap();
        assert_eq!(session.summary().projected, 930.0);
    }

    #[test]
    fn loading_template_replaces_ledger() {
        let mut session = session(SessionOptions::default());
        let id = session.save_template("demo").unwrap().id;
        session.ledger_mut().reset();
        assert!(session.ledger().records().is_empty());

        assert!(session.load_template(id));
        assert_eq!(session.ledger().state(), &LedgerState::demo());
        assert!(!session.load_template(id + 1));
    }

    #[test]
    fn summary_reports_limits() {
        let mut session = session(SessionOptions::default());
        session
            .limits_mut()
            .set_limit(Category::Food, Some(100.0))
            .unwrap();
        assert_eq!(session.summary().over_budget, vec![Category::Food]);
    }
}
