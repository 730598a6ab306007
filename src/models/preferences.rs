//! Client-side display preferences
//!
//! Hidden categories only affect which rows a report shows. Totals and the
//! calculators never see this set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::ids::CategoryId;
use crate::error::BudgetError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Categories the user chose to hide from category tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiddenCategories(BTreeSet<CategoryId>);

impl HiddenCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from disk; a missing file means nothing is hidden
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BudgetError> {
        read_json(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BudgetError> {
        write_json_atomic(path, self)
    }

    /// Returns true if the category was not hidden before
    pub fn hide(&mut self, id: CategoryId) -> bool {
        self.0.insert(id)
    }

    /// Returns true if the category was hidden before
    pub fn unhide(&mut self, id: CategoryId) -> bool {
        self.0.remove(&id)
    }

    pub fn is_hidden(&self, id: &CategoryId) -> bool {
        self.0.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CategoryId> for HiddenCategories {
    fn from_iter<I: IntoIterator<Item = CategoryId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hide_and_unhide() {
        let mut hidden = HiddenCategories::new();
        let id = CategoryId::new();

        assert!(hidden.hide(id));
        assert!(!hidden.hide(id));
        assert!(hidden.is_hidden(&id));
        assert!(hidden.unhide(id));
        assert!(!hidden.unhide(id));
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hidden_categories.json");

        assert!(HiddenCategories::load(&path).unwrap().is_empty());

        let hidden: HiddenCategories = [CategoryId::new(), CategoryId::new()].into_iter().collect();
        hidden.save(&path).unwrap();

        let loaded = HiddenCategories::load(&path).unwrap();
        assert_eq!(loaded, hidden);
        assert_eq!(loaded.len(), 2);
    }
}
