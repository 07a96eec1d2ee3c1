//! Game settings and preferences
//!
//! Persisted as JSON: LocalStorage on the web, a file on native
//! (path from `AIR_HOCKEY_SETTINGS`).

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_FRAME_DT, GOAL_WIDTH_FRACTION, RESPAWN_DELAY_MS};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live trail particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Feedback ===
    /// Screen shake on wall hits and goals
    pub screen_shake: bool,
    /// Vibration pulses on wall hits and goals
    pub haptics: bool,
    /// Puck trail particles
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,

    // === Gameplay ===
    /// Opponent heuristic takes the top mallet when nobody touches it
    pub opponent_ai: bool,
    /// Goal opening as a fraction of arena width, in (0, 1]
    pub goal_width_fraction: f32,
    /// Pause between a goal and the puck respawn (milliseconds)
    pub respawn_delay_ms: f64,
    /// Longest frame step fed to the physics (seconds); `None` disables the clamp
    pub max_frame_dt: Option<f32>,
    /// Seed for cosmetic randomness
    pub rng_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            screen_shake: true,
            haptics: true,
            particles: true,

            reduced_motion: false,

            opponent_ai: true,
            goal_width_fraction: GOAL_WIDTH_FRACTION,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            max_frame_dt: Some(DEFAULT_MAX_FRAME_DT),
            rng_seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the shake for performance
        if preset == QualityPreset::Low {
            self.screen_shake = false;
        }
    }

    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Pull out-of-range values back to something playable
    pub fn sanitized(mut self) -> Self {
        if !(self.goal_width_fraction > 0.0 && self.goal_width_fraction <= 1.0) {
            log::warn!(
                "goal_width_fraction {} out of range, using {}",
                self.goal_width_fraction,
                GOAL_WIDTH_FRACTION
            );
            self.goal_width_fraction = GOAL_WIDTH_FRACTION;
        }
        if !(self.respawn_delay_ms >= 0.0) {
            self.respawn_delay_ms = RESPAWN_DELAY_MS;
        }
        if let Some(max) = self.max_frame_dt.filter(|max| !(*max > 0.0)) {
            log::warn!("max_frame_dt {} ignored, using default", max);
            self.max_frame_dt = Some(DEFAULT_MAX_FRAME_DT);
        }
        self
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// LocalStorage key / settings env var
    const STORAGE_KEY: &'static str = "air_hockey_settings";
    #[allow(dead_code)]
    const PATH_ENV: &'static str = "AIR_HOCKEY_SETTINGS";

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
                    Err(e) => log::warn!("Stored settings unreadable ({}), using defaults", e),
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
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `AIR_HOCKEY_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::PATH_ENV) {
            Some(path) => Self::load_from(std::path::Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the file named by `AIR_HOCKEY_SETTINGS` (no-op if unset)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            log::debug!("{} unset ({}), settings not saved", Self::PATH_ENV, Self::STORAGE_KEY);
            return;
        };
        match self.save_to(std::path::Path::new(&path)) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }

    /// Write settings as JSON to `path`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
