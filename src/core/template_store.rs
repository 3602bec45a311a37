use std::{collections::HashSet, sync::Arc};

use chrono::Utc;

use crate::{
    errors::{LedgerError, Result},
    ledger::{next_id, LedgerState, Template, TemplateId},
    storage::{self, BlobStore, TEMPLATES_KEY},
};

/// Maximum number of saved templates; older entries are evicted first.
pub const TEMPLATE_CAP: usize = 10;

/// Named snapshots of a ledger, newest first.
pub struct TemplateStore {
    templates: Vec<Template>,
    storage: Arc<dyn BlobStore>,
}

impl TemplateStore {
    pub fn open(storage: Arc<dyn BlobStore>) -> Self {
        let stored: Vec<Template> =
            storage::load_or_else(storage.as_ref(), TEMPLATES_KEY, Vec::new);
        let mut seen = HashSet::new();
        let mut templates: Vec<Template> = stored
            .into_iter()
            .filter(|template| match template.validate() {
                Ok(()) if seen.insert(template.id) => true,
                Ok(()) => {
                    tracing::warn!(id = template.id, "dropping template with repeated id");
                    false
                }
                Err(err) => {
                    let err = storage::rejected(TEMPLATES_KEY, err);
                    tracing::warn!(id = template.id, error = %err, "dropping unreadable template");
                    false
                }
            })
            .collect();
        templates.truncate(TEMPLATE_CAP);
        Self { templates, storage }
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: TemplateId) -> Option<&Template> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Captures `state` under `name`. The name is trimmed and must not be
    /// empty.
    pub fn save(&mut self, name: &str, state: &LedgerState) -> Result<&Template> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("template name cannot be empty"));
        }
        let id = next_id(self.templates.iter().map(|template| template.id));
        let template = Template::capture(id, name, Utc::now(), state);
        self.templates.insert(0, template);
        self.templates.truncate(TEMPLATE_CAP);
        tracing::debug!(id, name, "template saved");
        self.persist();
        Ok(&self.templates[0])
    }

    /// Returns the ledger captured by template `id`, if present and valid.
    pub fn load(&self, id: TemplateId) -> Option<LedgerState> {
        let state = self.get(id)?.ledger_state();
        match state.validated() {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(id, error = %err, "template not applied");
                None
            }
        }
    }

    pub fn delete(&mut self, id: TemplateId) -> bool {
        let before = self.templates.len();
        self.templates.retain(|template| template.id != id);
        if self.templates.len() == before {
            return false;
        }
        tracing::debug!(id, "template deleted");
        self.persist();
        true
    }

    fn persist(&self) {
        storage::persist(self.storage.as_ref(), TEMPLATES_KEY, &self.templates);
    }
}
