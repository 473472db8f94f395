//! Key-value persistence for the two pieces of session state that survive a
//! page reload: the selected letters and the shuffle seed. Backed by
//! localStorage in the browser and by an in-memory map in tests.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

pub const SELECTED_LETTERS_KEY: &str = "selectedLetters";
pub const RANDOM_SEED_KEY: &str = "randomSeed";

pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Why a persisted value could not be used. Every case is recovered by
/// falling back to the default; nothing here reaches the user.
#[derive(Debug, thiserror::Error)]
pub enum PersistedStateError {
    #[error("no value stored")]
    Missing,
    #[error("malformed selection list: {0}")]
    MalformedSelection(#[from] serde_json::Error),
    #[error("malformed seed: {0}")]
    MalformedSeed(#[from] std::num::ParseIntError),
}

impl PersistedStateError {
    /// A missing value is the normal first-run case, not worth a warning.
    pub fn is_missing(&self) -> bool {
        matches!(self, PersistedStateError::Missing)
    }
}

pub fn load_selection(store: &dyn Store) -> Result<Vec<String>, PersistedStateError> {
    let raw = store
        .get(SELECTED_LETTERS_KEY)
        .ok_or(PersistedStateError::Missing)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_selection(store: &dyn Store, symbols: &[&str]) {
    match serde_json::to_string(symbols) {
        Ok(json) => store.set(SELECTED_LETTERS_KEY, &json),
        Err(err) => log::warn!("Failed to encode selection: {err}"),
    }
}

pub fn load_seed(store: &dyn Store) -> Result<i64, PersistedStateError> {
    let raw = store
        .get(RANDOM_SEED_KEY)
        .ok_or(PersistedStateError::Missing)?;
    Ok(raw.trim().parse()?)
}

pub fn save_seed(store: &dyn Store, seed: i64) {
    store.set(RANDOM_SEED_KEY, &seed.to_string());
}

/// Test double and native fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<FxHashMap<String, String>>,
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn backend() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

#[cfg(target_arch = "wasm32")]
impl Store for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::backend().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::backend() else {
            log::warn!("localStorage unavailable, not persisting {key}");
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::warn!("Failed to persist {key}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::default();
        assert!(store.get(RANDOM_SEED_KEY).is_none());
        save_seed(&store, 123);
        assert_eq!(store.get(RANDOM_SEED_KEY).as_deref(), Some("123"));
        assert_eq!(load_seed(&store).unwrap(), 123);
    }

    #[test]
    fn test_missing_values_report_missing() {
        let store = MemoryStore::default();
        assert!(load_selection(&store).unwrap_err().is_missing());
        assert!(load_seed(&store).unwrap_err().is_missing());
    }

    #[test]
    fn test_malformed_values_are_errors_not_panics() {
        let store = MemoryStore::default();
        store.set(SELECTED_LETTERS_KEY, "not json at all");
        store.set(RANDOM_SEED_KEY, "fifty");
        assert!(matches!(
            load_selection(&store),
            Err(PersistedStateError::MalformedSelection(_))
        ));
        assert!(matches!(
            load_seed(&store),
            Err(PersistedStateError::MalformedSeed(_))
        ));
    }

    #[test]
    fn test_selection_roundtrip() {
        let store = MemoryStore::default();
        save_selection(&store, &["あ", "い"]);
        assert_eq!(load_selection(&store).unwrap(), vec!["あ", "い"]);
    }

    #[test]
    fn test_negative_seed_roundtrip() {
        let store = MemoryStore::default();
        save_seed(&store, -42);
        assert_eq!(load_seed(&store).unwrap(), -42);
    }
}
