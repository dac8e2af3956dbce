//! `window.localStorage` settings backend.
//! Persistent across page reloads, scoped to the page origin.

use async_trait::async_trait;
use gloo_utils::errors::JsError;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use kbchat_core::ports::SettingsStore;
use kbchat_types::{ChatError, Result};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the origin's localStorage. Fails outside a browser window or
    /// when storage is disabled (e.g. some private browsing modes).
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl SettingsStore for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(storage_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set_item(key, value).map_err(storage_error)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(storage_error)
    }

    fn backend_name(&self) -> &str {
        "localstorage"
    }
}

fn storage_error(value: JsValue) -> ChatError {
    let message = JsError::try_from(value)
        .map(|e| e.to_string())
        .unwrap_or_else(|_| "localStorage call failed".to_string());
    ChatError::Storage(message)
}
