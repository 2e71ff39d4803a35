use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{NewTransaction, Transaction};
use crate::store::{DataFile, DataStore};

/// The whole collection in insertion order.
pub fn list_transactions(store: &DataStore) -> AppResult<Vec<Transaction>> {
    let transactions: Vec<Transaction> = store.read_or_else(DataFile::Transactions, Vec::new)?;
    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

/// Append a new transaction with a freshly assigned id.
pub fn create_transaction(store: &DataStore, new: NewTransaction) -> AppResult<Transaction> {
    let transaction = new.into_transaction(Uuid::new_v4().to_string())?;

    store.update(
        DataFile::Transactions,
        Vec::new,
        |transactions: &mut Vec<Transaction>| {
            transactions.push(transaction.clone());
            Ok(())
        },
    )?;

    info!(id = %transaction.id, amount = transaction.amount, "Created transaction");
    Ok(transaction)
}

/// Replace every field except the id. `None` when no such id exists.
pub fn update_transaction(
    store: &DataStore,
    id: &str,
    new: NewTransaction,
) -> AppResult<Option<Transaction>> {
    let replacement = new.into_transaction(id.to_string())?;

    let updated = store.update(
        DataFile::Transactions,
        Vec::new,
        |transactions: &mut Vec<Transaction>| {
            Ok(transactions.iter_mut().find(|t| t.id == id).map(|slot| {
                *slot = replacement.clone();
                replacement
            }))
        },
    )?;

    if updated.is_some() {
        info!(%id, "Updated transaction");
    }
    Ok(updated)
}

/// Remove by id. Returns whether anything was removed.
pub fn delete_transaction(store: &DataStore, id: &str) -> AppResult<bool> {
    let removed = store.update(
        DataFile::Transactions,
        Vec::new,
        |transactions: &mut Vec<Transaction>| {
            let before = transactions.len();
            transactions.retain(|t| t.id != id);
            Ok(transactions.len() < before)
        },
    )?;

    if removed {
        info!(%id, "Deleted transaction");
    }
    Ok(removed)
}
