//! Loading and saving `ClientConfig` through a `SettingsStore`.

use kbchat_types::{Result, config::ClientConfig};
use crate::ports::SettingsStore;

pub const CONFIG_STORAGE_KEY: &str = "kbchat:config";

/// Read the stored config, falling back to defaults when nothing is stored
/// or the stored value is unreadable.
pub async fn load_config(store: &dyn SettingsStore) -> ClientConfig {
    let raw = match store.get(CONFIG_STORAGE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return ClientConfig::default(),
        Err(e) => {
            log::warn!("Could not read settings from {}: {}", store.backend_name(), e);
            return ClientConfig::default();
        }
    };

    match serde_json::from_str::<ClientConfig>(&raw) {
        Ok(config) if config.validate().is_ok() => {
            log::info!("Config restored from {}", store.backend_name());
            config
        }
        Ok(_) => {
            log::warn!("Stored config is invalid, using defaults");
            ClientConfig::default()
        }
        Err(e) => {
            log::warn!("Stored config is malformed ({}), using defaults", e);
            ClientConfig::default()
        }
    }
}

/// Validate and persist the config.
pub async fn save_config(store: &dyn SettingsStore, config: &ClientConfig) -> Result<()> {
    config.validate()?;
    let json = serde_json::to_string(config)?;
    store.set(CONFIG_STORAGE_KEY, &json).await?;
    log::info!("Config saved to {}", store.backend_name());
    Ok(())
}

/// Forget the stored config. Returns the defaults the app falls back to.
pub async fn reset_config(store: &dyn SettingsStore) -> Result<ClientConfig> {
    store.delete(CONFIG_STORAGE_KEY).await?;
    log::info!("Config removed from {}", store.backend_name());
    Ok(ClientConfig::default())
}
