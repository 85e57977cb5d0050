//! # Model Selection
//!
//! The ordered set of model IDs the user wants analyses from. Order is
//! selection order; it decides the order of the analysis tabs.

use crate::client::Model;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSelection {
    ids: Vec<String>,
}

impl ModelSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` if selected, append it otherwise.
    /// Emptying the selection is allowed; submission is what refuses it.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_string());
        }
    }

    /// Replace the selection with the first model of a freshly fetched list.
    pub fn select_first(&mut self, models: &[Model]) {
        self.ids.clear();
        if let Some(first) = models.first() {
            self.ids.push(first.id.clone());
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
