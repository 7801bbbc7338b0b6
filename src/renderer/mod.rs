//! Presentation data
//!
//! Turns a session into plain frame snapshots. Drawing itself is left to
//! the host.

pub mod feedback;
pub mod palette;
pub mod snapshot;

pub use feedback::{FLASH_DURATION, FlashOverlay, sound_cues};
pub use palette::{colors, fallback_color};
pub use snapshot::{DrawItem, FrameSnapshot, GoalMarks, Hud, Renderable, Sprite};
