//! Tunables and preferences
//!
//! Persisted as JSON: LocalStorage in the browser, an optional file named by
//! `BOUNCER_SETTINGS` on native.

use serde::{Deserialize, Serialize};

use crate::consts::*;
pub use crate::sim::ReflectionMode;

/// Bouncer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Side length of the square in canvas units
    pub square_size: f32,
    /// Speed at mount
    pub initial_speed: u32,
    /// Timer interval between ticks
    pub tick_interval_ms: u32,
    /// Hold time before a press counts as a long-press
    pub long_press_ms: u32,
    /// Fixed RNG seed (None = derive from the clock)
    pub seed: Option<u64>,
    /// Overshoot behavior on the tick a reflection happens
    pub reflection: ReflectionMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            square_size: SQUARE_SIZE,
            initial_speed: INITIAL_SPEED,
            tick_interval_ms: TICK_INTERVAL_MS,
            long_press_ms: LONG_PRESS_MS,
            seed: None,
            reflection: ReflectionMode::Unclamped,
        }
    }
}

impl Settings {
    /// Parse settings, filling missing fields with defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Replace values the simulation cannot run with
    fn sanitized(mut self) -> Self {
        if !(self.square_size.is_finite() && self.square_size > 0.0) {
            log::warn!("Ignoring square_size {}", self.square_size);
            self.square_size = SQUARE_SIZE;
        }
        self.initial_speed = self.initial_speed.max(MIN_SPEED);
        self.tick_interval_ms = self.tick_interval_ms.max(1);
        if self.long_press_ms < MIN_LONG_PRESS_MS {
            log::warn!("Raising long_press_ms {} to {}", self.long_press_ms, MIN_LONG_PRESS_MS);
            self.long_press_ms = MIN_LONG_PRESS_MS;
        }
        self
    }

    /// Switch reflection mode by name; unknown names leave it unchanged
    pub fn set_reflection(&mut self, name: &str) -> bool {
        match ReflectionMode::from_str(name) {
            Some(mode) => {
                self.reflection = mode;
                log::info!("Reflection mode: {}", mode.as_str());
                true
            }
            None => {
                log::warn!("Unknown reflection mode {:?}", name);
                false
            }
        }
    }

    /// LocalStorage key / settings file env var
    const STORAGE_KEY: &'static str = "bouncer_settings";
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_PATH: &'static str = "BOUNCER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default settings");
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
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `BOUNCER_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.to_string_lossy());
                    settings
                }
                Err(e) => {
                    log::warn!("Settings file {} unreadable: {}", path.to_string_lossy(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.to_string_lossy(), e);
                Self::default()
            }
        }
    }

    /// Write settings back to the file named by `BOUNCER_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = std::env::var_os(Self::ENV_PATH) else {
            log::debug!("No {} set, settings not saved ({})", Self::ENV_PATH, Self::STORAGE_KEY);
            return;
        };
        match self.to_json() {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not write {}: {}", path.to_string_lossy(), e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}
