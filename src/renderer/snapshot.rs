//! Plain-data frame description for an external renderer
//!
//! Nothing here draws. The host (canvas, terminal, test) reads a
//! `FrameSnapshot` and paints it however it likes.

use serde::Serialize;

use super::feedback::FlashOverlay;
use super::palette::{colors, fallback_color};
use crate::assets::{AssetManifest, sprite_name};
use crate::config::GameConfig;
use crate::sim::{Entity, EntityId, EntityKind, MatchState, Phase, Session, Shape, Side};

/// One entity as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Renderable {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    #[serde(flatten)]
    pub shape: Shape,
}

impl From<&Entity> for Renderable {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            x: entity.pos.x,
            y: entity.pos.y,
            shape: entity.shape,
        }
    }
}

/// How to paint an entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sprite {
    Image(&'static str),
    Fallback([f32; 4]),
}

impl Sprite {
    /// The entity's image if it loaded, otherwise its fallback color
    pub fn resolve(kind: EntityKind, assets: &AssetManifest) -> Self {
        let name = sprite_name(kind);
        if assets.is_ready(name) {
            Sprite::Image(name)
        } else {
            Sprite::Fallback(fallback_color(kind))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    #[serde(flatten)]
    pub entity: Renderable,
    pub sprite: Sprite,
}

/// Score line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    /// Soccer only
    pub opponent_score: Option<u32>,
    /// Dodge only
    pub life: Option<u32>,
    pub phase: Phase,
    pub winner: Option<Side>,
}

impl Hud {
    fn new(config: &GameConfig, state: &MatchState) -> Self {
        let soccer = matches!(config, GameConfig::Soccer(_));
        Self {
            score: state.score,
            opponent_score: soccer.then_some(state.opponent_score),
            life: (!soccer).then_some(state.life),
            phase: state.phase,
            winner: state.winner,
        }
    }

    /// One-line text rendering, e.g. for a terminal host
    pub fn text(&self) -> String {
        let mut line = match (self.opponent_score, self.life) {
            (Some(cpu), _) => format!("Player {} - {} CPU", self.score, cpu),
            (None, Some(life)) => format!("Score {}  Life {}", self.score, life),
            (None, None) => format!("Score {}", self.score),
        };
        if self.phase == Phase::Ended {
            line.push_str(match self.winner {
                Some(Side::Home) => "  | You win!",
                Some(Side::Away) => "  | CPU wins",
                None => "  | Game over",
            });
        }
        line
    }
}

/// Goal mouth markings, soccer only
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalMarks {
    pub top: f32,
    pub bottom: f32,
    pub depth: f32,
    pub color: [f32; 4],
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub width: f32,
    pub height: f32,
    pub background: [f32; 4],
    pub entities: Vec<DrawItem>,
    pub goals: Option<GoalMarks>,
    pub hud: Hud,
    /// Flash overlay color with faded alpha, when active
    pub flash: Option<[f32; 4]>,
}

impl FrameSnapshot {
    pub fn build(session: &Session, assets: &AssetManifest, flash: &FlashOverlay) -> Self {
        let config = session.config();
        let (width, height) = config.field_size();

        let entities = session
            .renderables()
            .into_iter()
            .map(|entity| DrawItem {
                sprite: Sprite::resolve(entity.kind, assets),
                entity,
            })
            .collect();

        let (background, goals) = match config {
            GameConfig::Dodge(_) => (colors::SKY, None),
            GameConfig::Soccer(c) => {
                let (top, bottom) = c.goal_span();
                let marks = GoalMarks {
                    top,
                    bottom,
                    depth: c.goal_depth,
                    color: colors::GOAL,
                };
                (colors::PITCH, Some(marks))
            }
        };

        let flash = flash.is_active().then(|| {
            let mut color = colors::FLASH;
            color[3] *= flash.alpha();
            color
        });

        Self {
            width,
            height,
            background,
            entities,
            goals,
            hud: Hud::new(config, session.match_state()),
            flash,
        }
    }

    /// Circle and rect counts, handy for quick sanity checks
    pub fn shape_counts(&self) -> (usize, usize) {
        let circles = self
            .entities
            .iter()
            .filter(|d| matches!(d.entity.shape, Shape::Circle { .. }))
            .count();
        (circles, self.entities.len() - circles)
    }
}
