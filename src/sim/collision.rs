//! Collision detection and response
//!
//! Overlap tests are shape-polymorphic through [`Collider`]. Responses are
//! game specific: items apply their effect to the match, the ball gets
//! pushed out and kicked.

use glam::Vec2;

use super::entity::{Entity, EntityKind, Shape};
use super::state::{FeedbackEvent, MatchState, Side};

/// Share of the overlap the ball is pushed out by; over one half so the pair
/// ends up strictly apart and the next tick does not re-trigger on equality
pub const SEPARATION_FACTOR: f32 = 0.51;

/// Below this center distance two circles are treated as coincident
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Symmetric overlap test between two shapes of the same family
pub trait Collider {
    fn overlaps(&self, other: &Self) -> bool;
}

/// Axis-aligned box by corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Closest point inside the box to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max())
    }
}

impl Collider for Aabb {
    /// Separating axis test; touching edges do not count
    fn overlaps(&self, other: &Self) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Collider for Circle {
    fn overlaps(&self, other: &Self) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }
}

/// Collision extent of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    Rect(Aabb),
    Circle(Circle),
}

impl Bounds {
    pub fn of(entity: &Entity) -> Self {
        match entity.shape {
            Shape::Rect { width, height } => {
                Bounds::Rect(Aabb::new(entity.pos, Vec2::new(width, height)))
            }
            Shape::Circle { radius } => Bounds::Circle(Circle {
                center: entity.pos,
                radius,
            }),
        }
    }
}

impl Collider for Bounds {
    fn overlaps(&self, other: &Self) -> bool {
        match (self, other) {
            (Bounds::Rect(a), Bounds::Rect(b)) => a.overlaps(b),
            (Bounds::Circle(a), Bounds::Circle(b)) => a.overlaps(b),
            (Bounds::Rect(r), Bounds::Circle(c)) | (Bounds::Circle(c), Bounds::Rect(r)) => {
                r.closest_point(c.center).distance_squared(c.center) < c.radius * c.radius
            }
        }
    }
}

/// Whether two entities overlap, whatever their shapes
pub fn collide(a: &Entity, b: &Entity) -> bool {
    Bounds::of(a).overlaps(&Bounds::of(b))
}

/// Penetration between two circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first circle's center toward the second's
    pub normal: Vec2,
    /// How far the circles interpenetrate
    pub overlap: f32,
}

/// Contact between `a` and `b`, or `None` when they are apart.
///
/// `fallback` is the normal used when the centers coincide.
pub fn circle_contact(a: &Circle, b: &Circle, fallback: Vec2) -> Option<Contact> {
    if !a.overlaps(b) {
        return None;
    }
    let delta = b.center - a.center;
    let dist = delta.length();
    let normal = if dist > COINCIDENT_EPSILON {
        delta / dist
    } else {
        fallback
    };
    Some(Contact {
        normal,
        overlap: a.radius + b.radius - dist,
    })
}

/// Push the ball clear of `kicker` and launch it at `kick_speed`.
///
/// The new velocity replaces the old one; the kicker's own motion is not
/// added. Returns true if the two were touching.
pub fn resolve_kick(kicker: &Entity, ball: &mut Entity, kick_speed: f32, fallback: Vec2) -> bool {
    let (Bounds::Circle(k), Bounds::Circle(b)) = (Bounds::of(kicker), Bounds::of(ball)) else {
        return false;
    };
    let Some(contact) = circle_contact(&k, &b, fallback) else {
        return false;
    };
    ball.pos += contact.normal * contact.overlap * SEPARATION_FACTOR;
    ball.vel = contact.normal * kick_speed;
    true
}

/// Apply a caught item's effect to the match
pub fn resolve_item_hit(
    item: &Entity,
    state: &mut MatchState,
    reward: u32,
) -> Option<FeedbackEvent> {
    match item.kind {
        EntityKind::GoodItem => {
            state.award(Side::Home, reward);
            Some(FeedbackEvent::ItemCaught {
                id: item.id,
                reward,
            })
        }
        EntityKind::BadItem => {
            state.lose_life();
            Some(FeedbackEvent::BombHit { id: item.id })
        }
        _ => None,
    }
}

/// Goal mouths at the left and right side lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goals {
    pub field_width: f32,
    /// Top edge of the goal mouth
    pub top: f32,
    /// Bottom edge of the goal mouth
    pub bottom: f32,
    /// Band width in from each side line
    pub depth: f32,
}

impl Goals {
    /// Which side scored, if the ball reaches into a goal band.
    ///
    /// The home side attacks the right goal.
    pub fn scored(&self, ball: &Entity) -> Option<Side> {
        let radius = ball.radius().unwrap_or(0.0);
        let in_mouth = ball.pos.y > self.top && ball.pos.y < self.bottom;
        if !in_mouth {
            return None;
        }
        if ball.pos.x + radius > self.field_width - self.depth {
            Some(Side::Home)
        } else if ball.pos.x - radius < self.depth {
            Some(Side::Away)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityId;

    const EPS: f32 = 1e-4;

    fn circle_entity(kind: EntityKind, x: f32, y: f32, radius: f32) -> Entity {
        Entity {
            id: EntityId(0),
            kind,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            shape: Shape::Circle { radius },
        }
    }

    fn rect_entity(kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity {
            id: EntityId(1),
            kind,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            shape: Shape::Rect {
                width: w,
                height: h,
            },
        }
    }

    #[test]
    fn test_rect_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        // Shared edge is not an overlap
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_circle_overlap() {
        let a = Circle {
            center: Vec2::ZERO,
            radius: 15.0,
        };
        let b = Circle {
            center: Vec2::new(24.0, 0.0),
            radius: 10.0,
        };
        let c = Circle {
            center: Vec2::new(25.0, 0.0),
            radius: 10.0,
        };
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_mixed_shapes() {
        let rect = rect_entity(EntityKind::Player, 0.0, 0.0, 30.0, 30.0);
        let near = circle_entity(EntityKind::Ball, 35.0, 15.0, 10.0);
        let far = circle_entity(EntityKind::Ball, 45.0, 45.0, 10.0);
        assert!(collide(&rect, &near));
        assert!(collide(&near, &rect));
        assert!(!collide(&rect, &far));
    }

    #[test]
    fn test_kick_from_left() {
        let player = circle_entity(EntityKind::Player, 380.0, 250.0, 15.0);
        let mut ball = circle_entity(EntityKind::Ball, 400.0, 250.0, 10.0);
        let overlap = 25.0 - 20.0;

        assert!(resolve_kick(&player, &mut ball, 300.0, Vec2::X));

        assert_eq!(ball.vel, Vec2::new(300.0, 0.0));
        assert!((ball.pos.x - (400.0 + overlap * SEPARATION_FACTOR)).abs() < EPS);
        assert_eq!(ball.pos.y, 250.0);
    }

    #[test]
    fn test_kick_overrides_velocity() {
        let player = circle_entity(EntityKind::Player, 400.0, 270.0, 15.0);
        let mut ball = circle_entity(EntityKind::Ball, 400.0, 250.0, 10.0);
        ball.vel = Vec2::new(500.0, 500.0);

        assert!(resolve_kick(&player, &mut ball, 300.0, Vec2::X));
        assert!((ball.vel - Vec2::new(0.0, -300.0)).length() < EPS);
    }

    #[test]
    fn test_kick_pushes_along_center_line() {
        let player = circle_entity(EntityKind::Player, 390.0, 245.0, 15.0);
        let mut ball = circle_entity(EntityKind::Ball, 400.0, 250.0, 10.0);
        let before = ball.pos.distance(player.pos);
        let overlap = 25.0 - before;

        assert!(resolve_kick(&player, &mut ball, 300.0, Vec2::X));

        let after = ball.pos.distance(player.pos);
        assert!((after - (before + overlap * SEPARATION_FACTOR)).abs() < EPS);
        let dir = (ball.pos - player.pos).normalize();
        assert!((ball.vel - dir * 300.0).length() < 1e-2);
    }

    #[test]
    fn test_kick_coincident_uses_fallback() {
        let cpu = circle_entity(EntityKind::Opponent, 400.0, 250.0, 15.0);
        let mut ball = circle_entity(EntityKind::Ball, 400.0, 250.0, 10.0);
        assert!(resolve_kick(&cpu, &mut ball, 300.0, -Vec2::X));
        assert_eq!(ball.vel, Vec2::new(-300.0, 0.0));
        assert!(ball.vel.is_finite() && ball.pos.is_finite());
    }

    #[test]
    fn test_no_kick_when_apart() {
        let player = circle_entity(EntityKind::Player, 300.0, 250.0, 15.0);
        let mut ball = circle_entity(EntityKind::Ball, 400.0, 250.0, 10.0);
        assert!(!resolve_kick(&player, &mut ball, 300.0, Vec2::X));
        assert_eq!(ball.pos, Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_item_effects() {
        let mut state = MatchState::new(3);
        state.start();

        let star = rect_entity(EntityKind::GoodItem, 0.0, 0.0, 40.0, 40.0);
        let event = resolve_item_hit(&star, &mut state, 10);
        assert_eq!(state.score, 10);
        assert!(matches!(event, Some(FeedbackEvent::ItemCaught { reward: 10, .. })));

        let bomb = rect_entity(EntityKind::BadItem, 0.0, 0.0, 40.0, 40.0);
        let event = resolve_item_hit(&bomb, &mut state, 10);
        assert_eq!(state.life, 2);
        assert!(matches!(event, Some(FeedbackEvent::BombHit { .. })));
    }

    #[test]
    fn test_goal_bands() {
        let goals = Goals {
            field_width: 800.0,
            top: 175.0,
            bottom: 325.0,
            depth: 10.0,
        };
        let right = circle_entity(EntityKind::Ball, 790.0, 250.0, 10.0);
        let left = circle_entity(EntityKind::Ball, 10.0, 250.0, 10.0);
        let wide = circle_entity(EntityKind::Ball, 790.0, 100.0, 10.0);
        let midfield = circle_entity(EntityKind::Ball, 400.0, 250.0, 10.0);

        assert_eq!(goals.scored(&right), Some(Side::Home));
        assert_eq!(goals.scored(&left), Some(Side::Away));
        assert_eq!(goals.scored(&wide), None);
        assert_eq!(goals.scored(&midfield), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rect_overlap_is_symmetric(
                ax in -100.0f32..100.0, ay in -100.0f32..100.0,
                aw in 0.0f32..80.0, ah in 0.0f32..80.0,
                bx in -100.0f32..100.0, by in -100.0f32..100.0,
                bw in 0.0f32..80.0, bh in 0.0f32..80.0,
            ) {
                let a = rect_entity(EntityKind::Player, ax, ay, aw, ah);
                let b = rect_entity(EntityKind::BadItem, bx, by, bw, bh);
                prop_assert_eq!(collide(&a, &b), collide(&b, &a));
            }

            #[test]
            fn circle_overlap_is_symmetric(
                ax in -100.0f32..100.0, ay in -100.0f32..100.0, ar in 0.0f32..40.0,
                bx in -100.0f32..100.0, by in -100.0f32..100.0, br in 0.0f32..40.0,
            ) {
                let a = circle_entity(EntityKind::Player, ax, ay, ar);
                let b = circle_entity(EntityKind::Ball, bx, by, br);
                prop_assert_eq!(collide(&a, &b), collide(&b, &a));
            }
        }
    }
}
