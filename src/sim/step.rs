//! Stepper: per-tick motion and boundary handling
//!
//! Controlled actors move by `direction * speed * dt` (frame-rate
//! independent). Falling items may be per-tick or per-second. The ball decays
//! by a per-tick friction factor and bounces off walls with restitution.

use glam::Vec2;

use super::entity::{Entity, Shape};
use crate::config::FallTiming;

/// Rectangular playfield anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    /// Allowed range for an entity's stored position so its full extent stays inside
    pub fn position_bounds(&self, shape: Shape) -> (Vec2, Vec2) {
        match shape {
            Shape::Rect { width, height } => (
                Vec2::ZERO,
                Vec2::new(self.width - width, self.height - height).max(Vec2::ZERO),
            ),
            Shape::Circle { radius } => {
                let min = Vec2::splat(radius);
                let max = Vec2::new(self.width - radius, self.height - radius).max(min);
                (min, max)
            }
        }
    }
}

/// Which axes a controlled actor may move and is clamped on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axes {
    Horizontal,
    Both,
}

/// Motion constants for the free ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPhysics {
    pub friction: f32,
    pub stop_threshold: f32,
    pub restitution: f32,
}

/// Walls the ball touched during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub x: bool,
    pub y: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Move a controlled actor along `direction` and keep it inside the field
pub fn step_controlled(
    entity: &mut Entity,
    direction: Vec2,
    speed: f32,
    dt: f32,
    field: &Playfield,
    axes: Axes,
) {
    let direction = match axes {
        Axes::Horizontal => Vec2::new(direction.x, 0.0),
        Axes::Both => direction,
    };
    entity.pos += direction * speed * dt;
    clamp_to_field(entity, field, axes);
}

/// Clamp the stored position so the entity's full extent is within the field
pub fn clamp_to_field(entity: &mut Entity, field: &Playfield, axes: Axes) {
    let (min, max) = field.position_bounds(entity.shape);
    entity.pos.x = entity.pos.x.clamp(min.x, max.x);
    if axes == Axes::Both {
        entity.pos.y = entity.pos.y.clamp(min.y, max.y);
    }
}

/// Drop an item straight down. Returns true once its top has left the bottom edge.
pub fn step_falling(
    entity: &mut Entity,
    speed: f32,
    timing: FallTiming,
    dt: f32,
    field: &Playfield,
) -> bool {
    entity.pos.y += match timing {
        FallTiming::PerTick => speed,
        FallTiming::PerSecond => speed * dt,
    };
    entity.pos.y > field.height
}

/// Steer `chaser` straight at `target` (pure pursuit, no prediction)
pub fn pursue(chaser: &mut Entity, target: Vec2, speed: f32, dt: f32, field: &Playfield) {
    let direction = (target - chaser.center()).normalize_or_zero();
    step_controlled(chaser, direction, speed, dt, field, Axes::Both);
}

/// Friction, rest snapping, integration, then wall bounces.
///
/// Friction is applied per tick, not per second.
pub fn step_ball(ball: &mut Entity, physics: &BallPhysics, dt: f32, field: &Playfield) -> WallHits {
    ball.vel *= physics.friction;
    if ball.vel.x.abs() < physics.stop_threshold {
        ball.vel.x = 0.0;
    }
    if ball.vel.y.abs() < physics.stop_threshold {
        ball.vel.y = 0.0;
    }

    ball.pos += ball.vel * dt;

    let (min, max) = field.position_bounds(ball.shape);
    let mut hits = WallHits::default();
    if ball.pos.x < min.x || ball.pos.x > max.x {
        ball.pos.x = ball.pos.x.clamp(min.x, max.x);
        ball.vel.x *= -physics.restitution;
        hits.x = true;
    }
    if ball.pos.y < min.y || ball.pos.y > max.y {
        ball.pos.y = ball.pos.y.clamp(min.y, max.y);
        ball.vel.y *= -physics.restitution;
        hits.y = true;
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityId, EntityKind};

    const EPS: f32 = 1e-4;

    fn rect(x: f32, y: f32) -> Entity {
        Entity {
            id: EntityId(0),
            kind: EntityKind::Player,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            shape: Shape::Rect {
                width: 30.0,
                height: 35.0,
            },
        }
    }

    fn circle(kind: EntityKind, x: f32, y: f32, radius: f32) -> Entity {
        Entity {
            id: EntityId(0),
            kind,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            shape: Shape::Circle { radius },
        }
    }

    fn physics() -> BallPhysics {
        BallPhysics {
            friction: 0.98,
            stop_threshold: 0.1,
            restitution: 0.8,
        }
    }

    #[test]
    fn test_controlled_is_frame_rate_independent() {
        let field = Playfield::new(800.0, 500.0);
        let mut one = circle(EntityKind::Player, 200.0, 250.0, 15.0);
        let mut many = one;

        step_controlled(&mut one, Vec2::X, 200.0, 0.1, &field, Axes::Both);
        for _ in 0..10 {
            step_controlled(&mut many, Vec2::X, 200.0, 0.01, &field, Axes::Both);
        }
        assert!((one.pos.x - 220.0).abs() < EPS);
        assert!((one.pos - many.pos).length() < EPS);
    }

    #[test]
    fn test_horizontal_ignores_vertical_input() {
        let field = Playfield::new(400.0, 600.0);
        let mut player = rect(185.0, 555.0);
        step_controlled(
            &mut player,
            Vec2::new(0.0, 1.0),
            240.0,
            0.1,
            &field,
            Axes::Horizontal,
        );
        assert_eq!(player.pos, Vec2::new(185.0, 555.0));
    }

    #[test]
    fn test_rect_clamped_to_field() {
        let field = Playfield::new(400.0, 600.0);
        let mut player = rect(360.0, 555.0);
        step_controlled(&mut player, Vec2::X, 240.0, 0.1, &field, Axes::Horizontal);
        assert_eq!(player.pos.x, 370.0);

        let mut player = rect(5.0, 555.0);
        step_controlled(&mut player, -Vec2::X, 240.0, 0.1, &field, Axes::Horizontal);
        assert_eq!(player.pos.x, 0.0);
    }

    #[test]
    fn test_circle_clamped_to_field() {
        let field = Playfield::new(800.0, 500.0);
        let mut player = circle(EntityKind::Player, 20.0, 20.0, 15.0);
        let dir = Vec2::new(-1.0, -1.0).normalize();
        step_controlled(&mut player, dir, 200.0, 0.1, &field, Axes::Both);
        assert_eq!(player.pos, Vec2::new(15.0, 15.0));
    }

    #[test]
    fn test_falling_per_tick_ignores_dt() {
        let field = Playfield::new(400.0, 600.0);
        let mut item = rect(100.0, 0.0);
        assert!(!step_falling(&mut item, 3.0, FallTiming::PerTick, 0.5, &field));
        assert_eq!(item.pos.y, 3.0);
        assert!(!step_falling(&mut item, 3.0, FallTiming::PerSecond, 0.5, &field));
        assert_eq!(item.pos.y, 4.5);
    }

    #[test]
    fn test_falling_reports_exit() {
        let field = Playfield::new(400.0, 600.0);
        let mut item = rect(100.0, 598.0);
        assert!(step_falling(&mut item, 3.0, FallTiming::PerTick, 0.016, &field));
    }

    #[test]
    fn test_ball_friction_and_snap() {
        let field = Playfield::new(800.0, 500.0);
        let mut ball = circle(EntityKind::Ball, 400.0, 250.0, 10.0);
        ball.vel = Vec2::new(100.0, 0.05);
        let hits = step_ball(&mut ball, &physics(), 0.1, &field);
        assert!(!hits.any());
        assert!((ball.vel.x - 98.0).abs() < EPS);
        assert_eq!(ball.vel.y, 0.0);
        assert!((ball.pos.x - 409.8).abs() < EPS);
    }

    #[test]
    fn test_ball_bounces_with_restitution() {
        let field = Playfield::new(800.0, 500.0);
        let mut ball = circle(EntityKind::Ball, 785.0, 250.0, 10.0);
        ball.vel = Vec2::new(100.0, 0.0);
        let hits = step_ball(&mut ball, &physics(), 0.1, &field);
        assert!(hits.x && !hits.y);
        assert_eq!(ball.pos.x, 790.0);
        assert!((ball.vel.x - (-100.0 * 0.98 * 0.8)).abs() < EPS);
    }

    #[test]
    fn test_ball_at_rest_stays_put() {
        let field = Playfield::new(800.0, 500.0);
        let mut ball = circle(EntityKind::Ball, 400.0, 250.0, 10.0);
        step_ball(&mut ball, &physics(), 0.1, &field);
        assert_eq!(ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_pursuit_heads_toward_target() {
        let field = Playfield::new(800.0, 500.0);
        let mut cpu = circle(EntityKind::Opponent, 600.0, 250.0, 15.0);
        pursue(&mut cpu, Vec2::new(400.0, 250.0), 150.0, 0.1, &field);
        assert!((cpu.pos - Vec2::new(585.0, 250.0)).length() < EPS);
    }

    #[test]
    fn test_pursuit_on_target_does_not_move() {
        let field = Playfield::new(800.0, 500.0);
        let mut cpu = circle(EntityKind::Opponent, 400.0, 250.0, 15.0);
        pursue(&mut cpu, Vec2::new(400.0, 250.0), 150.0, 0.1, &field);
        assert_eq!(cpu.pos, Vec2::new(400.0, 250.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn zero_direction_leaves_position(
                x in 15.0f32..785.0,
                y in 15.0f32..485.0,
                dt in 0.0f32..10.0,
                speed in 0.0f32..1000.0,
            ) {
                let field = Playfield::new(800.0, 500.0);
                let mut player = circle(EntityKind::Player, x, y, 15.0);
                step_controlled(&mut player, Vec2::ZERO, speed, dt, &field, Axes::Both);
                prop_assert_eq!(player.pos, Vec2::new(x, y));
            }

            #[test]
            fn rect_player_stays_in_field(
                x in 0.0f32..370.0,
                dx in -1.0f32..=1.0,
                dt in 0.0f32..5.0,
            ) {
                let field = Playfield::new(400.0, 600.0);
                let mut player = rect(x, 555.0);
                step_controlled(&mut player, Vec2::new(dx, 0.0), 240.0, dt, &field, Axes::Horizontal);
                prop_assert!(player.pos.x >= 0.0 && player.pos.x <= 370.0);
            }

            #[test]
            fn circle_player_stays_in_field(
                x in 15.0f32..785.0,
                y in 15.0f32..485.0,
                angle in 0.0f32..std::f32::consts::TAU,
                dt in 0.0f32..5.0,
            ) {
                let field = Playfield::new(800.0, 500.0);
                let mut player = circle(EntityKind::Player, x, y, 15.0);
                let dir = Vec2::new(angle.cos(), angle.sin());
                step_controlled(&mut player, dir, 200.0, dt, &field, Axes::Both);
                prop_assert!(player.pos.x >= 15.0 && player.pos.x <= 785.0);
                prop_assert!(player.pos.y >= 15.0 && player.pos.y <= 485.0);
            }
        }
    }
}
