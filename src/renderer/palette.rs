//! Fallback colors, used when an image asset failed to load

use crate::sim::EntityKind;

/// RGBA colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.2, 0.4, 1.0, 1.0];
    pub const CPU: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const GOOD_ITEM: [f32; 4] = [0.9, 0.85, 0.3, 1.0]; // Gold/yellow
    pub const BAD_ITEM: [f32; 4] = [0.15, 0.15, 0.15, 1.0];
    pub const GOAL: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const PITCH: [f32; 4] = [0.1, 0.45, 0.15, 1.0];
    pub const SKY: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    /// Bomb flash overlay, alpha scaled by the fade
    pub const FLASH: [f32; 4] = [1.0, 0.0, 0.0, 0.5];
}

pub fn fallback_color(kind: EntityKind) -> [f32; 4] {
    match kind {
        EntityKind::Player => colors::PLAYER,
        EntityKind::Opponent => colors::CPU,
        EntityKind::Ball => colors::BALL,
        EntityKind::GoodItem => colors::GOOD_ITEM,
        EntityKind::BadItem => colors::BAD_ITEM,
    }
}
