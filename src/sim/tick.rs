//! Frame tick
//!
//! Advances a session by one frame: input, motion, collisions, scoring.
//! Nothing happens unless the match is `Playing`.

use glam::Vec2;
use rand::Rng;

use super::collision::{Goals, collide, resolve_item_hit, resolve_kick};
use super::entity::{EntityId, EntityStore};
use super::input::{InputState, aggregate};
use super::session::{Roster, Session};
use super::state::{FeedbackEvent, MatchState, Side, TickResult};
use super::step::{Axes, BallPhysics, Playfield, pursue, step_ball, step_controlled, step_falling};
use crate::config::{DodgeConfig, GameConfig, SoccerConfig};
use crate::sanitize_dt;

/// Advance `session` by `dt` seconds of wall time.
///
/// `dt` is sanitized first: negative or non-finite values count as zero.
/// Long frames are integrated in full. Ticks before start or after the end
/// are no-ops.
pub fn tick(session: &mut Session, dt: f32, input: &InputState) -> TickResult {
    if !session.match_state.is_playing() {
        return TickResult::idle(session.match_state);
    }

    let dt = sanitize_dt(dt);
    session.input = *input;
    session.match_state.ticks += 1;
    let score_before = session.match_state.score;
    let movement = aggregate(input);
    let mut events = Vec::new();

    let Session {
        config,
        rng,
        store,
        roster,
        match_state,
        ..
    } = session;

    match (&*config, &*roster) {
        (GameConfig::Dodge(c), Roster::Dodge { player, items }) => {
            tick_dodge(c, *player, items, store, rng, match_state, movement, dt, &mut events);
        }
        (
            GameConfig::Soccer(c),
            Roster::Soccer {
                player,
                opponent,
                ball,
            },
        ) => {
            let actors = SoccerActors {
                player: *player,
                opponent: *opponent,
                ball: *ball,
            };
            tick_soccer(c, actors, store, rng, match_state, movement, dt, &mut events);
        }
        _ => log::error!("Roster does not match the {} config", config.name()),
    }

    if match_state.is_over() {
        events.push(FeedbackEvent::MatchEnded {
            winner: match_state.winner,
        });
    }

    let gained = match_state.score.saturating_sub(score_before);
    TickResult {
        match_state: *match_state,
        score_delta: (gained > 0).then_some(gained),
        events,
    }
}

#[allow(clippy::too_many_arguments)]
fn tick_dodge<R: Rng>(
    config: &DodgeConfig,
    player: EntityId,
    items: &[EntityId],
    store: &mut EntityStore,
    rng: &mut R,
    state: &mut MatchState,
    movement: Vec2,
    dt: f32,
    events: &mut Vec<FeedbackEvent>,
) {
    let field = Playfield::new(config.field_width, config.field_height);

    if let Some(p) = store.get_mut(player) {
        step_controlled(p, movement, config.player_speed, dt, &field, Axes::Horizontal);
    }

    // Items that fall past the bottom wrap back to the top
    for &id in items {
        let fell_out = match store.get_mut(id) {
            Some(item) => step_falling(item, config.item_speed, config.fall_timing, dt, &field),
            None => false,
        };
        if fell_out {
            store.reset(id, rng);
        }
    }

    let Some(player) = store.get(player).copied() else {
        return;
    };
    for &id in items {
        // A bomb on the last life ends the match; later items are left alone
        if !state.is_playing() {
            break;
        }
        let Some(item) = store.get(id).copied() else {
            continue;
        };
        if !collide(&player, &item) {
            continue;
        }
        if let Some(event) = resolve_item_hit(&item, state, config.item_reward) {
            log::debug!("{:?}", event);
            events.push(event);
        }
        // Fresh spawn above the field
        store.reset(id, rng);
    }
}

#[derive(Debug, Clone, Copy)]
struct SoccerActors {
    player: EntityId,
    opponent: EntityId,
    ball: EntityId,
}

#[allow(clippy::too_many_arguments)]
fn tick_soccer<R: Rng>(
    config: &SoccerConfig,
    actors: SoccerActors,
    store: &mut EntityStore,
    rng: &mut R,
    state: &mut MatchState,
    movement: Vec2,
    dt: f32,
    events: &mut Vec<FeedbackEvent>,
) {
    let field = Playfield::new(config.field_width, config.field_height);

    if let Some(p) = store.get_mut(actors.player) {
        step_controlled(p, movement, config.player_speed, dt, &field, Axes::Both);
    }

    if let Some(target) = store.get(actors.ball).map(|b| b.pos) {
        if let Some(cpu) = store.get_mut(actors.opponent) {
            pursue(cpu, target, config.effective_opponent_speed(), dt, &field);
        }
    }

    let physics = BallPhysics {
        friction: config.friction,
        stop_threshold: config.stop_threshold,
        restitution: config.restitution,
    };
    if let Some(ball) = store.get_mut(actors.ball) {
        if step_ball(ball, &physics, dt, &field).any() {
            events.push(FeedbackEvent::WallBounce);
        }
    }

    // Player first, then the CPU; the later kick wins if both touch
    let kickers = [
        (actors.player, Side::Home, Vec2::X),
        (actors.opponent, Side::Away, Vec2::NEG_X),
    ];
    for (id, side, fallback) in kickers {
        let Some(kicker) = store.get(id).copied() else {
            continue;
        };
        let Some(ball) = store.get_mut(actors.ball) else {
            break;
        };
        if resolve_kick(&kicker, ball, config.kick_speed, fallback) {
            log::debug!("{:?} kicked, ball velocity {}", side, ball.vel);
            events.push(FeedbackEvent::Kick { by: side });
        }
    }

    let (top, bottom) = config.goal_span();
    let goals = Goals {
        field_width: config.field_width,
        top,
        bottom,
        depth: config.goal_depth,
    };
    let Some(scorer) = store.get(actors.ball).and_then(|b| goals.scored(b)) else {
        return;
    };
    state.award(scorer, 1);
    log::debug!(
        "Goal for {:?}: {} - {}",
        scorer,
        state.score,
        state.opponent_score
    );
    events.push(FeedbackEvent::Goal { scorer });
    store.reset(actors.ball, rng);
    state.check_winning_score(config.winning_score);
}
