use serde::{Deserialize, Serialize};

use eco_model::Inspector;

/// Registered inspectors, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InspectorDirectory {
    inspectors: Vec<Inspector>,
}

impl InspectorDirectory {
    pub fn new(inspectors: Vec<Inspector>) -> Self {
        Self { inspectors }
    }

    pub fn find(&self, id: &str) -> Option<&Inspector> {
        self.inspectors.iter().find(|inspector| inspector.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Inspector> {
        self.inspectors.iter()
    }

    pub fn as_slice(&self) -> &[Inspector] {
        &self.inspectors
    }

    pub fn len(&self) -> usize {
        self.inspectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inspectors.is_empty()
    }

    pub(crate) fn push(&mut self, inspector: Inspector) {
        self.inspectors.push(inspector);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Inspector> {
        let index = self.inspectors.iter().position(|inspector| inspector.id == id)?;
        Some(self.inspectors.remove(index))
    }
}
