//! Entity store
//!
//! Plain-data actors addressed by stable IDs. Positions are in playfield
//! pixels: rectangles are anchored at their top-left corner, circles at
//! their center.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stable entity identifier (allocation order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What an entity is, which decides how it moves and collides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Opponent,
    /// Collectible that scores (star/apple)
    GoodItem,
    /// Collectible that costs a life (bomb)
    BadItem,
    Ball,
}

impl EntityKind {
    pub fn is_item(&self) -> bool {
        matches!(self, EntityKind::GoodItem | EntityKind::BadItem)
    }
}

/// Collision/render extent. Serialized as bare fields (`width`/`height` or `radius`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
}

/// How `EntityStore::reset` re-spawns an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRule {
    /// Back to a fixed point, at rest
    Fixed(Vec2),
    /// Random column just above the playfield: `x in [0, span_x)`, `y = -height`
    AboveField { span_x: f32 },
}

/// A single actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: Shape,
}

impl Entity {
    /// Full extent `(width, height)` of the entity
    pub fn size(&self) -> Vec2 {
        match self.shape {
            Shape::Rect { width, height } => Vec2::new(width, height),
            Shape::Circle { radius } => Vec2::splat(radius * 2.0),
        }
    }

    /// Geometric center (rectangles are stored by corner)
    pub fn center(&self) -> Vec2 {
        match self.shape {
            Shape::Rect { width, height } => self.pos + Vec2::new(width, height) * 0.5,
            Shape::Circle { .. } => self.pos,
        }
    }

    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Rect { .. } => None,
        }
    }
}

/// Owns every actor of a session; iteration is in ID order
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    spawns: Vec<SpawnRule>,
    next_id: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity at `pos`; `spawn` is what `reset` returns it to
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        shape: Shape,
        pos: Vec2,
        spawn: SpawnRule,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            shape,
        });
        self.spawns.push(spawn);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.index_of(id).map(move |i| &mut self.entities[i])
    }

    pub fn for_each(&self, mut f: impl FnMut(&Entity)) {
        self.entities.iter().for_each(|e| f(e));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Re-spawn one entity's position and velocity; ID, kind and shape stay
    pub fn reset<R: Rng>(&mut self, id: EntityId, rng: &mut R) {
        let Some(i) = self.index_of(id) else {
            log::warn!("reset of unknown entity {:?}", id);
            return;
        };
        let entity = &mut self.entities[i];
        entity.vel = Vec2::ZERO;
        entity.pos = match self.spawns[i] {
            SpawnRule::Fixed(pos) => pos,
            SpawnRule::AboveField { span_x } => {
                let x = if span_x > 0.0 {
                    rng.random::<f32>() * span_x
                } else {
                    0.0
                };
                Vec2::new(x, -entity.size().y)
            }
        };
    }

    // IDs are dense and allocated in push order, so the ID is the index
    fn index_of(&self, id: EntityId) -> Option<usize> {
        let i = id.0 as usize;
        (i < self.entities.len()).then_some(i)
    }
}
