use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Per-category spending ceilings. Zero or missing means "no limit".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryLimits(BTreeMap<Category, f64>);

impl CategoryLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ceiling for `category` when a positive one is set.
    pub fn get(&self, category: Category) -> Option<f64> {
        self.0
            .get(&category)
            .copied()
            .filter(|limit| limit.is_finite() && *limit > 0.0)
    }

    pub fn set(&mut self, category: Category, limit: Option<f64>) {
        match limit.filter(|value| *value > 0.0) {
            Some(value) => {
                self.0.insert(category, value);
            }
            None => {
                self.0.remove(&category);
            }
        }
    }

    /// Positive limits in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.get(category).map(|limit| (category, limit)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
