//! Short-lived presentation effects driven by tick events

use crate::assets::AssetManifest;
use crate::sim::TickResult;

/// How long the bomb flash stays on screen (seconds)
pub const FLASH_DURATION: f32 = 0.1;

/// Full-screen flash that fades out after a bomb hit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlashOverlay {
    remaining: f32,
}

impl FlashOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self) {
        self.remaining = FLASH_DURATION;
    }

    /// Trigger if any event in `result` asks for a flash
    pub fn observe(&mut self, result: &TickResult) {
        if result.events.iter().any(|e| e.flashes()) {
            self.trigger();
        }
    }

    /// Fade by `dt` seconds of wall time
    pub fn update(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Linear fade from 1 to 0 over the flash duration
    pub fn alpha(&self) -> f32 {
        (self.remaining / FLASH_DURATION).clamp(0.0, 1.0)
    }
}

/// Sounds to play for `result`, skipping any that failed to load
pub fn sound_cues(result: &TickResult, assets: &AssetManifest) -> Vec<&'static str> {
    result
        .events
        .iter()
        .filter_map(|e| e.sound_cue())
        .filter(|name| assets.is_ready(name))
        .collect()
}
