//! Platform layer
//!
//! Handles host differences for:
//! - Time (animation-frame timestamps to `dt`, FPS)
//! - Input events (key names, touch halves)
//! - The browser facade (wasm32 only)

pub mod input;
pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Direction, KeyboardState, map_key, touch_direction};
pub use time::{FPS_WINDOW, FrameClock};
