//! Host preferences
//!
//! Audio levels and window-focus behavior. Held for the lifetime of the page;
//! nothing is written back to storage.

use serde::{Deserialize, Serialize};

/// Player-facing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all sound effects
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Flow ===
    /// Pause the match when the page is hidden
    pub auto_pause: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            auto_pause: true,
        }
    }
}

impl Settings {
    /// Parse settings handed over by the page, falling back to defaults
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring bad settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Gain applied to every sound effect
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }
}
