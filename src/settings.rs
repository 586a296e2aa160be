//! Player preferences
//!
//! Persisted in LocalStorage. Only the unlocked flag survives a reload.

use serde::{Deserialize, Serialize};

/// Persisted lottery preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotterySettings {
    /// Repeated draws allowed (resolution lock disabled)
    #[serde(default)]
    pub unlocked: bool,
}

impl LotterySettings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lottery_unlocked";

    /// Settings with unlocked mode on
    pub fn unlocked() -> Self {
        Self { unlocked: true }
    }

    /// Decode a stored value. Anything unreadable means locked.
    pub fn from_stored(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored lottery settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let settings = Self::from_stored(&json);
                log::info!("Loaded lottery settings (unlocked: {})", settings.unlocked);
                return settings;
            }
        }

        log::info!("Using default lottery settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Lottery settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
