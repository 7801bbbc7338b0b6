//! Simulation core
//!
//! All gameplay logic lives here. It stays free of rendering and platform
//! code:
//! - Motion scales with the sanitized frame `dt`
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (by entity ID)

pub mod collision;
pub mod entity;
pub mod input;
pub mod session;
pub mod state;
pub mod step;
pub mod tick;

pub use collision::{Aabb, Bounds, Circle, Collider, Goals, collide, resolve_item_hit, resolve_kick};
pub use entity::{Entity, EntityId, EntityKind, EntityStore, Shape, SpawnRule};
pub use input::{InputState, aggregate};
pub use session::{Roster, Session, init_session};
pub use state::{FeedbackEvent, MatchState, Phase, Side, TickResult};
pub use step::{Axes, BallPhysics, Playfield, WallHits};
pub use tick::tick;
