use tracing::info;

use crate::error::AppResult;
use crate::models::Settings;
use crate::store::{DataFile, DataStore};

pub fn get_settings(store: &DataStore) -> AppResult<Settings> {
    store.read_or_else(DataFile::Settings, Settings::default)
}

pub fn set_currency(store: &DataStore, currency: &str) -> AppResult<Settings> {
    let settings = store.update(
        DataFile::Settings,
        Settings::default,
        |settings: &mut Settings| {
            settings.currency = currency.to_string();
            Ok(settings.clone())
        },
    )?;

    info!(%currency, "Updated currency");
    Ok(settings)
}
