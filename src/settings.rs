//! Wheel settings and preferences
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Easing, SpinOptions};

/// Spin feel presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpinPreset {
    Quick,
    #[default]
    Classic,
    Dramatic,
}

impl SpinPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpinPreset::Quick => "Quick",
            SpinPreset::Classic => "Classic",
            SpinPreset::Dramatic => "Dramatic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "quick" | "fast" => Some(SpinPreset::Quick),
            "classic" | "default" => Some(SpinPreset::Classic),
            "dramatic" | "slow" => Some(SpinPreset::Dramatic),
            _ => None,
        }
    }

    /// Total spin time (ms)
    pub fn duration_ms(&self) -> f64 {
        match self {
            SpinPreset::Quick => 4_000.0,
            SpinPreset::Classic => SPIN_DURATION_MS,
            SpinPreset::Dramatic => 15_000.0,
        }
    }

    /// Full turns before settling
    pub fn extra_rotations(&self) -> u32 {
        match self {
            SpinPreset::Quick => 4,
            SpinPreset::Classic => EXTRA_ROTATIONS,
            SpinPreset::Dramatic => 12,
        }
    }

    pub fn easing(&self) -> Easing {
        match self {
            SpinPreset::Quick => Easing::Cubic,
            SpinPreset::Classic => Easing::Sine,
            SpinPreset::Dramatic => Easing::Quintic,
        }
    }
}

/// Wheel settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    /// Last applied preset (informational)
    pub preset: SpinPreset,

    // === Spin ===
    /// Total spin time including acceleration (ms)
    pub spin_duration_ms: f64,
    /// Acceleration phase (ms)
    pub accel_duration_ms: f64,
    /// Minimum extra turns per spin
    pub extra_rotations: u32,
    /// Random additional turns, 0..=spread
    pub rotation_spread: u32,
    pub easing: Easing,
    /// Stop at a random point inside the winning segment instead of dead center
    pub jitter: bool,

    // === Confirmation ===
    /// Countdown ticks before auto-absent
    pub countdown_ticks: u32,

    // === Display ===
    /// Characters of a name shown on the wheel
    pub label_max_chars: usize,
    /// Show the name under the needle while spinning
    pub show_pointer_label: bool,
}

impl Default for WheelSettings {
    fn default() -> Self {
        let preset = SpinPreset::Classic;
        Self {
            preset,

            spin_duration_ms: preset.duration_ms(),
            accel_duration_ms: ACCEL_DURATION_MS,
            extra_rotations: preset.extra_rotations(),
            rotation_spread: 3,
            easing: preset.easing(),
            jitter: true,

            countdown_ticks: COUNTDOWN_TICKS,

            label_max_chars: LABEL_MAX_CHARS,
            show_pointer_label: true,
        }
    }
}

impl WheelSettings {
    /// Apply a preset (updates spin-feel settings only)
    pub fn apply_preset(&mut self, preset: SpinPreset) {
        self.preset = preset;
        self.spin_duration_ms = preset.duration_ms();
        self.extra_rotations = preset.extra_rotations();
        self.easing = preset.easing();
    }

    /// Clamp hand-edited or stale values into workable ranges
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.spin_duration_ms = if self.spin_duration_ms.is_finite() {
            self.spin_duration_ms.clamp(0.0, MAX_SPIN_DURATION_MS)
        } else {
            defaults.spin_duration_ms
        };
        self.accel_duration_ms = if self.accel_duration_ms.is_finite() {
            self.accel_duration_ms.clamp(0.0, self.spin_duration_ms)
        } else {
            defaults.accel_duration_ms
        };
        self.extra_rotations = self.extra_rotations.min(MAX_EXTRA_ROTATIONS);
        self.rotation_spread = self.rotation_spread.min(MAX_ROTATION_SPREAD);
        self.countdown_ticks = self.countdown_ticks.clamp(1, MAX_COUNTDOWN_TICKS);
        self.label_max_chars = self.label_max_chars.max(1);
        self
    }

    /// Spin options for one spin, given the picker's jitter and extra turns
    pub fn spin_options(&self, jitter: f64, extra_rotations: u32) -> SpinOptions {
        SpinOptions {
            duration_ms: self.spin_duration_ms,
            extra_rotations,
            easing: self.easing,
            accel_ms: self.accel_duration_ms,
            jitter: if self.jitter { jitter } else { 0.5 },
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "prize_wheel_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return Self::sanitized(settings);
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = WheelSettings::default();
        assert_eq!(s.countdown_ticks, 10);
        assert_eq!(s.label_max_chars, 20);
        assert_eq!(s.easing, Easing::Sine);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let s: WheelSettings = serde_json::from_str(r#"{"countdown_ticks": 5}"#).unwrap();
        assert_eq!(s.countdown_ticks, 5);
        assert_eq!(s.spin_duration_ms, SPIN_DURATION_MS);
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut s = WheelSettings::default();
        s.apply_preset(SpinPreset::Dramatic);
        let json = serde_json::to_string(&s).unwrap();
        let back: WheelSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_spin_options_respect_jitter_toggle() {
        let mut s = WheelSettings::default();
        assert_eq!(s.spin_options(0.1, 9).jitter, 0.1);
        s.jitter = false;
        let opts = s.spin_options(0.1, 9);
        assert_eq!(opts.jitter, 0.5);
        assert_eq!(opts.extra_rotations, 9);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(SpinPreset::from_str("FAST"), Some(SpinPreset::Quick));
        assert_eq!(SpinPreset::from_str("nope"), None);
        assert_eq!(SpinPreset::Dramatic.as_str(), "Dramatic");
    }

    #[test]
    fn test_apply_preset_keeps_display_settings() {
        let mut s = WheelSettings {
            label_max_chars: 8,
            countdown_ticks: 4,
            ..WheelSettings::default()
        };
        s.apply_preset(SpinPreset::Quick);
        assert_eq!(s.preset, SpinPreset::Quick);
        assert_eq!(s.spin_duration_ms, 4_000.0);
        assert_eq!(s.extra_rotations, 4);
        assert_eq!(s.easing, Easing::Cubic);
        assert_eq!(s.label_max_chars, 8);
        assert_eq!(s.countdown_ticks, 4);
    }

    #[test]
    fn test_sanitized_clamps_stored_values() {
        let stored = r#"{
            "extra_rotations": 4294967295,
            "rotation_spread": 4294967295,
            "countdown_ticks": 0,
            "spin_duration_ms": 1e12,
            "accel_duration_ms": -5.0,
            "label_max_chars": 0
        }"#;
        let s = serde_json::from_str::<WheelSettings>(stored).unwrap().sanitized();
        assert_eq!(s.extra_rotations, MAX_EXTRA_ROTATIONS);
        assert_eq!(s.rotation_spread, MAX_ROTATION_SPREAD);
        assert_eq!(s.countdown_ticks, 1);
        assert_eq!(s.spin_duration_ms, MAX_SPIN_DURATION_MS);
        assert_eq!(s.accel_duration_ms, 0.0);
        assert_eq!(s.label_max_chars, 1);

        let big: WheelSettings = serde_json::from_str(r#"{"countdown_ticks": 100000}"#).unwrap();
        assert_eq!(big.sanitized().countdown_ticks, MAX_COUNTDOWN_TICKS);
    }

    #[test]
    fn test_sanitized_leaves_defaults_alone() {
        assert_eq!(WheelSettings::default().sanitized(), WheelSettings::default());
    }
}
