//! Pick the best available settings backend.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;
use kbchat_core::ports::SettingsStore;
use super::{LocalStorage, MemoryStorage};

/// Returns a trait object so callers are backend-agnostic.
pub fn open_settings_store() -> Rc<dyn SettingsStore> {
    match LocalStorage::open() {
        Ok(local) => {
            log::info!("Settings backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
