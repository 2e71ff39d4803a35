use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppResult;
use crate::models::{Settings, Transaction};
use crate::state::AppState;
use crate::store::queries::{categories, settings as store_settings, transactions};
use crate::store::DataStore;

struct Slot<T> {
    inner: RwLock<Option<(u64, T)>>,
}

impl<T: Clone> Slot<T> {
    fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    fn get(&self, gen: u64) -> Option<T> {
        let guard = self.inner.read().ok()?;
        match guard.as_ref() {
            Some((stored_gen, val)) if *stored_gen == gen => Some(val.clone()),
            _ => None,
        }
    }

    fn set(&self, gen: u64, val: T) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some((gen, val));
        }
    }

    fn get_or_load(&self, gen: u64, load: impl FnOnce() -> AppResult<T>) -> AppResult<T> {
        if let Some(cached) = self.get(gen) {
            return Ok(cached);
        }
        let val = load()?;
        self.set(gen, val.clone());
        Ok(val)
    }
}

/// Data file contents keyed by a write generation. Any successful mutation
/// bumps the generation, which makes every slot stale at once.
pub struct AppCache {
    generation: AtomicU64,
    transactions: Slot<Arc<Vec<Transaction>>>,
    categories: Slot<Vec<String>>,
    settings: Slot<Settings>,
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AppCache {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            transactions: Slot::new(),
            categories: Slot::new(),
            settings: Slot::new(),
        }
    }

    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Shared snapshot of the whole collection.
    pub fn load_transactions(&self, store: &DataStore) -> AppResult<Arc<Vec<Transaction>>> {
        self.transactions.get_or_load(self.generation(), || {
            transactions::list_transactions(store).map(Arc::new)
        })
    }

    pub fn load_categories(&self, store: &DataStore) -> AppResult<Vec<String>> {
        self.categories
            .get_or_load(self.generation(), || categories::list_categories(store))
    }

    pub fn load_settings(&self, store: &DataStore) -> AppResult<Settings> {
        self.settings
            .get_or_load(self.generation(), || store_settings::get_settings(store))
    }
}

pub async fn cache_invalidation_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mutating = matches!(
        *req.method(),
        Method::POST | Method::PUT | Method::DELETE | Method::PATCH
    );
    let resp = next.run(req).await;
    if mutating && resp.status().is_success() {
        state.cache.invalidate();
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DataFile;

    #[test]
    fn test_serves_snapshot_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        let cache = AppCache::new();

        assert!(cache.load_transactions(&store).unwrap().is_empty());

        // Written behind the cache's back.
        std::fs::write(
            store.path(DataFile::Transactions),
            r#"[{"id": "1", "description": "Tea", "amount": -2, "date": "2024-01-01"}]"#,
        )
        .unwrap();
        assert!(cache.load_transactions(&store).unwrap().is_empty());

        cache.invalidate();
        assert_eq!(cache.load_transactions(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_snapshots_are_shared() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        let cache = AppCache::new();

        let a = cache.load_transactions(&store).unwrap();
        let b = cache.load_transactions(&store).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_settings_and_categories_follow_generation() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::open(dir.path()).unwrap();
        let cache = AppCache::new();

        assert_eq!(cache.load_settings(&store).unwrap().currency, "₹");
        let before = cache.load_categories(&store).unwrap();

        store_settings::set_currency(&store, "$").unwrap();
        categories::add_category(&store, "Travel").unwrap();
        assert_eq!(cache.load_settings(&store).unwrap().currency, "₹");
        assert_eq!(cache.load_categories(&store).unwrap(), before);

        cache.invalidate();
        assert_eq!(cache.load_settings(&store).unwrap().currency, "$");
        assert_eq!(cache.load_categories(&store).unwrap().len(), before.len() + 1);
    }
}
