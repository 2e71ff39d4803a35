use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::category::default_categories;
use crate::store::{DataFile, DataStore};

pub fn list_categories(store: &DataStore) -> AppResult<Vec<String>> {
    let categories: Vec<String> = store.read_or_else(DataFile::Categories, default_categories)?;
    debug!(count = categories.len(), "Listed categories");
    Ok(categories)
}

/// Append a category name and return the full catalogue.
///
/// Names are compared exactly (case-sensitive), as transactions are matched
/// against them.
pub fn add_category(store: &DataStore, name: &str) -> AppResult<Vec<String>> {
    let categories = store.update(
        DataFile::Categories,
        default_categories,
        |categories: &mut Vec<String>| {
            if categories.iter().any(|c| c == name) {
                return Err(AppError::Conflict(format!(
                    "Category already exists: {name}"
                )));
            }
            categories.push(name.to_string());
            Ok(categories.clone())
        },
    )?;

    info!(%name, "Added category");
    Ok(categories)
}
