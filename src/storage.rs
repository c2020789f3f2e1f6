/// Persistence for the stealth-mode flag
///
/// The flag is stored JSON-encoded (`true`/`false`) in `localStorage`, the
/// same text `JSON.stringify` produces.
use crate::error::{AppError, AppResult};

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// `window.localStorage`
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> AppResult<Self> {
        let window = web_sys::window().ok_or_else(|| AppError::Storage("window is unavailable".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| AppError::Storage(format!("localStorage denied: {:?}", e)))?
            .ok_or_else(|| AppError::Storage("localStorage is unavailable".to_string()))?;
        Ok(LocalStore { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| AppError::Storage(format!("Failed to read {}: {:?}", key, e)))
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {:?}", key, e)))
    }
}

/// Read the stealth flag. Missing or malformed values read as `false`.
pub fn load_stealth_flag(store: &impl KeyValueStore, key: &str) -> bool {
    match store.get(key) {
        Ok(Some(raw)) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring stored {}={:?}: {}", key, raw, e);
            false
        }),
        Ok(None) => false,
        Err(e) => {
            log::warn!("{}", e);
            false
        }
    }
}

pub fn save_stealth_flag(store: &mut impl KeyValueStore, key: &str, enabled: bool) -> AppResult<()> {
    let json = serde_json::to_string(&enabled).map_err(|e| AppError::Storage(e.to_string()))?;
    store.set(key, &json)
}
