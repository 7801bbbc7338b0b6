//! Arcade Sim - simulation core for two small canvas arcade games
//!
//! - **Dodge**: catch falling stars, avoid bombs, lose on the last life
//! - **Soccer**: top-down one-on-one against a pursuing CPU, first to N goals
//!
//! Core modules:
//! - `sim`: Entity store, input aggregation, stepping, collisions, match state
//! - `config`: Per-session constants, presets and validation
//! - `assets`: Asset readiness gate consumed before the first tick
//! - `renderer`: Plain-data frame snapshots for an external renderer
//! - `platform`: Frame clock, key mapping and the wasm facade

pub mod assets;
pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use assets::{AssetKind, AssetManifest, AssetProvider};
pub use config::{Difficulty, DodgeConfig, FallTiming, GameConfig, SoccerConfig};
pub use error::{AssetError, ConfigError, SessionError};
pub use sim::{InputState, MatchState, Phase, Session, TickResult, init_session};

/// Default gameplay constants
pub mod consts {
    /// Largest frame delta the host clock hands out (seconds); longer stalls are clamped
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Dodge playfield
    pub const DODGE_FIELD_WIDTH: f32 = 400.0;
    pub const DODGE_FIELD_HEIGHT: f32 = 600.0;

    /// Dodge player (px, px/s)
    pub const DODGE_PLAYER_WIDTH: f32 = 30.0;
    pub const DODGE_PLAYER_HEIGHT: f32 = 35.0;
    pub const DODGE_PLAYER_SPEED: f32 = 240.0; // 4 px per frame at 60 Hz
    /// Gap between the player's feet and the bottom edge
    pub const DODGE_PLAYER_MARGIN: f32 = 10.0;

    /// Falling items (px, px per tick)
    pub const ITEM_WIDTH: f32 = 40.0;
    pub const ITEM_HEIGHT: f32 = 40.0;
    pub const ITEM_SPEED: f32 = 3.0;
    pub const ITEM_COUNT: usize = 10;
    /// Upper bound on configured items
    pub const MAX_ITEMS: usize = 64;

    pub const DODGE_INITIAL_LIFE: i32 = 1;
    pub const GOOD_ITEM_REWARD: u32 = 10;

    /// Soccer field
    pub const SOCCER_FIELD_WIDTH: f32 = 800.0;
    pub const SOCCER_FIELD_HEIGHT: f32 = 500.0;

    pub const SOCCER_PLAYER_RADIUS: f32 = 15.0;
    pub const SOCCER_PLAYER_SPEED: f32 = 200.0;
    pub const SOCCER_OPPONENT_RADIUS: f32 = 15.0;

    pub const BALL_RADIUS: f32 = 10.0;
    /// Speed the ball leaves a kick with (px/s)
    pub const KICK_SPEED: f32 = 300.0;
    /// Per-tick velocity multiplier (closer to 1 = less friction)
    pub const BALL_FRICTION: f32 = 0.98;
    /// Velocity components below this snap to zero
    pub const BALL_STOP_THRESHOLD: f32 = 0.1;
    /// Fraction of speed kept after a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.8;

    /// Goal mouth height as a fraction of field height
    pub const GOAL_WIDTH_RATIO: f32 = 0.3;
    /// Depth of the goal band at each side line
    pub const GOAL_DEPTH: f32 = 10.0;
    pub const WINNING_SCORE: u32 = 3;
}

/// Make a host-supplied frame delta safe to integrate with.
///
/// Negative, NaN and infinite deltas become zero rather than failing the tick.
/// Long frames pass through unchanged; capping stalls is the host clock's job.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        if dt != 0.0 {
            log::warn!("Discarding invalid frame delta {dt}");
        }
        return 0.0;
    }
    dt
}
