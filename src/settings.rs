//! Game settings and preferences
//!
//! Presentation-only knobs, persisted separately from the high score
//! (`settings.json` on native, LocalStorage on the web).

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Preset after this one, wrapping from High back to Low
    pub fn next(self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 30,
            QualityPreset::Medium => 150,
            QualityPreset::High => 400,
        }
    }

    /// Head trail length in cells
    pub fn trail_length(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 4,
            QualityPreset::High => 8,
        }
    }

    /// Segments used for circles (food, particles)
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 24,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle burst when food is eaten
    pub particles: bool,
    /// Fading trail behind the head
    pub trails: bool,
    /// Pulsing glow around the food
    pub food_glow: bool,
    /// Draw the board grid lines
    pub show_grid: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no pulsing, no particles)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            trails: true,
            food_glow: true,
            show_grid: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Apply a quality preset (Low turns off glow and trails, others restore them)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.food_glow = preset != QualityPreset::Low;
        self.trails = preset != QualityPreset::Low;
    }

    /// Step to the next quality preset
    pub fn cycle_quality(&mut self) -> QualityPreset {
        self.apply_preset(self.quality.next());
        self.quality
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective trail length
    pub fn trail_length(&self) -> usize {
        if self.trails {
            self.quality.trail_length()
        } else {
            0
        }
    }

    /// Effective food pulse (respects reduced_motion)
    pub fn effective_food_glow(&self) -> bool {
        self.food_glow && !self.reduced_motion
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snake_2025_settings";
    /// Settings file in the working directory
    #[allow(dead_code)]
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Load settings from LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        use crate::persistence::local_storage;

        match local_storage::get_json::<Settings>(Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        use crate::persistence::local_storage;

        match local_storage::set_json(Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }

    /// Load settings from `settings.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(std::path::Path::new(Self::SETTINGS_FILE))
    }

    /// Save settings to `settings.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        self.save_to(std::path::Path::new(Self::SETTINGS_FILE));
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match crate::persistence::read_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) {
        match crate::persistence::write_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_preset_disables_effects() {
        let mut settings = Settings::default();
        settings.apply_preset(QualityPreset::Low);
        assert!(!settings.food_glow);
        assert_eq!(settings.trail_length(), 0);
        assert_eq!(settings.max_particles(), 30);
    }

    #[test]
    fn test_cycle_quality_wraps_and_restores_effects() {
        let mut settings = Settings::default();
        assert_eq!(settings.cycle_quality(), QualityPreset::High);
        assert_eq!(settings.trail_length(), 8);
        assert_eq!(settings.cycle_quality(), QualityPreset::Low);
        assert!(!settings.effective_food_glow());
        assert_eq!(settings.cycle_quality(), QualityPreset::Medium);
        assert!(settings.effective_food_glow());
        assert_eq!(settings.trail_length(), 4);
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(settings.max_particles(), 0);
        assert!(!settings.effective_food_glow());
    }

    #[test]
    fn test_partial_document() {
        let settings: Settings = serde_json::from_str(r#"{"show_grid": false}"#).unwrap();
        assert!(!settings.show_grid);
        assert!(settings.particles);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("snake-2025-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");

        let mut settings = Settings::default();
        settings.apply_preset(QualityPreset::High);
        settings.save_to(&path);
        assert_eq!(Settings::load_from(&path), settings);

        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        let _ = std::fs::remove_file(path);
    }
}
