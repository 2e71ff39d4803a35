use serde::Deserialize;

/// Category assigned to transactions that carry none.
pub const OTHER_CATEGORY: &str = "Other";

/// Catalogue used until the first category is added.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Salary",
    OTHER_CATEGORY,
];

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub category: String,
}

impl NewCategory {
    /// Trimmed name, or `None` when blank.
    pub fn name(&self) -> Option<&str> {
        let name = self.category.trim();
        (!name.is_empty()).then_some(name)
    }
}
