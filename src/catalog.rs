// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategoryKind, TxType};
use once_cell::sync::Lazy;
use regex::Regex;

pub const UNKNOWN_NAME: &str = "Unknown";

static LEGACY_INCOME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)salary|income").expect("static pattern"));

static UNKNOWN: Lazy<Category> = Lazy::new(|| Category {
    id: String::new(),
    name: UNKNOWN_NAME.to_string(),
    color: "#999999".to_string(),
    icon: "help-circle".to_string(),
    kind: CategoryKind::Expense,
});

/// Classification used for catalog entries saved before categories carried a kind.
pub fn legacy_kind(name: &str) -> CategoryKind {
    if LEGACY_INCOME.is_match(name) {
        CategoryKind::Income
    } else {
        CategoryKind::Expense
    }
}

fn builtin(id: &str, name: &str, color: &str, icon: &str, kind: CategoryKind) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
        icon: icon.to_string(),
        kind,
    }
}

pub fn default_categories() -> Vec<Category> {
    use CategoryKind::{Expense, Income};
    vec![
        builtin("food", "Food & Dining", "#FF6B6B", "utensils", Expense),
        builtin("transport", "Transportation", "#4ECDC4", "car", Expense),
        builtin("shopping", "Shopping", "#45B7D1", "shopping-bag", Expense),
        builtin("entertainment", "Entertainment", "#FFA07A", "film", Expense),
        builtin("bills", "Bills & Utilities", "#98D8C8", "file-text", Expense),
        builtin("health", "Healthcare", "#F7DC6F", "heart", Expense),
        builtin("salary", "Salary", "#52C41A", "briefcase", Income),
    ]
}

/// Ordered category definitions. Order matters: it breaks ties in the breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(default_categories())
    }
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Catalog { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Resolves an id, falling back to the `Unknown` placeholder.
    pub fn resolve(&self, id: &str) -> &Category {
        self.get(id).unwrap_or(&UNKNOWN)
    }

    pub fn name_of(&self, id: &str) -> &str {
        &self.resolve(id).name
    }

    pub fn for_type(&self, t: TxType) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.kind.accepts(t))
    }

    pub fn default_for(&self, t: TxType) -> Option<&Category> {
        self.for_type(t).next()
    }

    /// Looks a category up by id first, then by case-insensitive name.
    pub fn lookup(&self, key: &str) -> Option<&Category> {
        let key = key.trim();
        self.get(key)
            .or_else(|| self.categories.iter().find(|c| c.name.eq_ignore_ascii_case(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_ids_degrade_to_unknown() {
        let catalog = Catalog::default();
        assert_eq!(catalog.name_of("food"), "Food & Dining");
        assert_eq!(catalog.name_of("gone"), UNKNOWN_NAME);
    }

    #[test]
    fn explicit_kind_survives_rename() {
        let mut catalog = Catalog::default();
        catalog.get_mut("salary").unwrap().name = "Paycheck".into();
        assert_eq!(catalog.resolve("salary").kind, CategoryKind::Income);
        assert_eq!(catalog.default_for(TxType::Income).unwrap().id, "salary");
    }

    #[test]
    fn legacy_records_are_classified_by_name() {
        let cats: Vec<Category> = serde_json::from_str(
            r##"[{"id": 1, "name": "Other Income", "color": "#000", "icon": "x"},
                {"id": 2, "name": "Groceries", "color": "#111", "icon": "y"}]"##,
        )
        .unwrap();
        assert_eq!(cats[0].kind, CategoryKind::Income);
        assert_eq!(cats[0].id, "1");
        assert_eq!(cats[1].kind, CategoryKind::Expense);
    }

    #[test]
    fn lookup_accepts_names() {
        let catalog = Catalog::default();
        assert_eq!(catalog.lookup("food & dining").unwrap().id, "food");
        assert_eq!(catalog.lookup(" bills ").unwrap().id, "bills");
        assert!(catalog.lookup("nope").is_none());
    }
}
