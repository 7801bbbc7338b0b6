//! Per-session game configuration
//!
//! Loaded once before the loop starts and never mutated during play.
//! Partial JSON is accepted; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// CPU difficulty preset for the soccer game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Opponent pursuit speed for this preset (px/s)
    pub fn opponent_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 100.0,
            Difficulty::Medium => 150.0,
            Difficulty::Hard => 200.0,
        }
    }
}

/// How falling items advance each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallTiming {
    /// `item_speed` pixels every tick, independent of frame time
    #[default]
    PerTick,
    /// `item_speed` pixels per second, scaled by the frame delta
    PerSecond,
}

/// Dodge game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DodgeConfig {
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal speed (px/s)
    pub player_speed: f32,
    /// Gap between the player and the bottom edge
    pub player_margin: f32,

    // === Items ===
    pub item_width: f32,
    pub item_height: f32,
    pub item_speed: f32,
    /// Items alternate good/bad by index (odd indices are bombs)
    pub item_count: usize,
    pub fall_timing: FallTiming,

    // === Match ===
    pub initial_life: i32,
    /// Score awarded per good item
    pub item_reward: u32,
}

impl Default for DodgeConfig {
    fn default() -> Self {
        Self {
            field_width: DODGE_FIELD_WIDTH,
            field_height: DODGE_FIELD_HEIGHT,

            player_width: DODGE_PLAYER_WIDTH,
            player_height: DODGE_PLAYER_HEIGHT,
            player_speed: DODGE_PLAYER_SPEED,
            player_margin: DODGE_PLAYER_MARGIN,

            item_width: ITEM_WIDTH,
            item_height: ITEM_HEIGHT,
            item_speed: ITEM_SPEED,
            item_count: ITEM_COUNT,
            fall_timing: FallTiming::PerTick,

            initial_life: DODGE_INITIAL_LIFE,
            item_reward: GOOD_ITEM_REWARD,
        }
    }
}

impl DodgeConfig {
    /// First release tuning: square actors, fewer items, three lives
    pub fn classic() -> Self {
        Self {
            player_width: 32.0,
            player_height: 32.0,
            player_speed: 300.0,
            item_width: 32.0,
            item_height: 32.0,
            item_count: 5,
            initial_life: 3,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;

        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("player_speed", self.player_speed)?;
        non_negative("player_margin", self.player_margin)?;
        fits("player_width", self.player_width, self.field_width)?;
        fits(
            "player_height",
            self.player_height + self.player_margin,
            self.field_height,
        )?;

        positive("item_width", self.item_width)?;
        positive("item_height", self.item_height)?;
        non_negative("item_speed", self.item_speed)?;
        fits("item_width", self.item_width, self.field_width)?;
        if self.item_count > MAX_ITEMS {
            return Err(ConfigError::TooManyItems(self.item_count));
        }

        if self.initial_life < 1 {
            return Err(ConfigError::InvalidLife(self.initial_life));
        }
        Ok(())
    }
}

/// Soccer game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoccerConfig {
    pub field_width: f32,
    pub field_height: f32,

    pub player_radius: f32,
    /// Player speed (px/s)
    pub player_speed: f32,

    pub opponent_radius: f32,
    pub difficulty: Difficulty,
    /// Overrides the difficulty preset when set
    pub opponent_speed: Option<f32>,

    // === Ball ===
    pub ball_radius: f32,
    pub kick_speed: f32,
    pub friction: f32,
    pub stop_threshold: f32,
    pub restitution: f32,

    // === Goals ===
    pub goal_width_ratio: f32,
    pub goal_depth: f32,
    pub winning_score: u32,
}

impl Default for SoccerConfig {
    fn default() -> Self {
        Self {
            field_width: SOCCER_FIELD_WIDTH,
            field_height: SOCCER_FIELD_HEIGHT,

            player_radius: SOCCER_PLAYER_RADIUS,
            player_speed: SOCCER_PLAYER_SPEED,

            opponent_radius: SOCCER_OPPONENT_RADIUS,
            difficulty: Difficulty::Medium,
            opponent_speed: None,

            ball_radius: BALL_RADIUS,
            kick_speed: KICK_SPEED,
            friction: BALL_FRICTION,
            stop_threshold: BALL_STOP_THRESHOLD,
            restitution: WALL_RESTITUTION,

            goal_width_ratio: GOAL_WIDTH_RATIO,
            goal_depth: GOAL_DEPTH,
            winning_score: WINNING_SCORE,
        }
    }
}

impl SoccerConfig {
    /// Preset defaults with the given CPU difficulty
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Opponent speed after applying any explicit override
    pub fn effective_opponent_speed(&self) -> f32 {
        self.opponent_speed
            .unwrap_or_else(|| self.difficulty.opponent_speed())
    }

    /// Vertical extent of the goal mouth, `(top, bottom)`
    pub fn goal_span(&self) -> (f32, f32) {
        let mouth = self.field_height * self.goal_width_ratio;
        let top = (self.field_height - mouth) / 2.0;
        (top, top + mouth)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        let short_side = self.field_width.min(self.field_height);

        positive("player_radius", self.player_radius)?;
        positive("player_speed", self.player_speed)?;
        fits("player_radius", self.player_radius * 2.0, short_side)?;

        positive("opponent_radius", self.opponent_radius)?;
        non_negative("opponent_speed", self.effective_opponent_speed())?;
        fits("opponent_radius", self.opponent_radius * 2.0, short_side)?;

        positive("ball_radius", self.ball_radius)?;
        positive("kick_speed", self.kick_speed)?;
        fits("ball_radius", self.ball_radius * 2.0, short_side)?;
        in_range("friction", self.friction, 0.0, 1.0)?;
        non_negative("stop_threshold", self.stop_threshold)?;
        in_range("restitution", self.restitution, 0.0, 1.0)?;
        // Bounces must lose energy
        below("restitution", self.restitution, 1.0)?;

        positive("goal_width_ratio", self.goal_width_ratio)?;
        in_range("goal_width_ratio", self.goal_width_ratio, 0.0, 1.0)?;
        positive("goal_depth", self.goal_depth)?;
        fits("goal_depth", self.goal_depth * 2.0, self.field_width)?;
        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }
        Ok(())
    }
}

/// Which game a session runs, with its constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameConfig {
    Dodge(DodgeConfig),
    Soccer(SoccerConfig),
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            GameConfig::Dodge(c) => c.validate(),
            GameConfig::Soccer(c) => c.validate(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameConfig::Dodge(_) => "dodge",
            GameConfig::Soccer(_) => "soccer",
        }
    }

    /// Playfield size `(width, height)`
    pub fn field_size(&self) -> (f32, f32) {
        match self {
            GameConfig::Dodge(c) => (c.field_width, c.field_height),
            GameConfig::Soccer(c) => (c.field_width, c.field_height),
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn in_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn below(field: &'static str, value: f32, limit: f32) -> Result<(), ConfigError> {
    if value < limit {
        Ok(())
    } else {
        Err(ConfigError::NotBelow {
            field,
            value,
            limit,
        })
    }
}

fn fits(field: &'static str, size: f32, extent: f32) -> Result<(), ConfigError> {
    if size <= extent {
        Ok(())
    } else {
        Err(ConfigError::DoesNotFit {
            field,
            size,
            extent,
        })
    }
}
