//! Match state and per-tick results
//!
//! The phase only moves forward. Going back to `Playing` means building a
//! fresh `MatchState` through a session reset.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for assets / the start button
    NotStarted,
    /// Active gameplay
    Playing,
    /// Match over; ticks no longer mutate anything
    Ended,
}

/// Team attribution for scores and kicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The human player
    Home,
    /// The CPU
    Away,
}

/// Score, life and phase of one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Player score
    pub score: u32,
    /// CPU goals (soccer only)
    pub opponent_score: u32,
    /// Remaining lives (dodge only)
    pub life: u32,
    pub phase: Phase,
    /// Who won, once ended by score; `None` when the last life was lost
    pub winner: Option<Side>,
    /// Ticks simulated while playing
    pub ticks: u64,
}

impl MatchState {
    pub fn new(initial_life: u32) -> Self {
        Self {
            score: 0,
            opponent_score: 0,
            life: initial_life,
            phase: Phase::NotStarted,
            winner: None,
            ticks: 0,
        }
    }

    /// `NotStarted -> Playing`. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        self.phase = Phase::Playing;
        true
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Add points to a side; ignored unless playing
    pub fn award(&mut self, side: Side, points: u32) {
        if !self.is_playing() {
            return;
        }
        match side {
            Side::Home => self.score = self.score.saturating_add(points),
            Side::Away => self.opponent_score = self.opponent_score.saturating_add(points),
        }
    }

    /// Take one life; the match ends when none are left
    pub fn lose_life(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.end(None);
        }
    }

    /// End the match if either side has reached `winning_score`
    pub fn check_winning_score(&mut self, winning_score: u32) -> Option<Side> {
        if !self.is_playing() {
            return None;
        }
        let winner = if self.score >= winning_score {
            Side::Home
        } else if self.opponent_score >= winning_score {
            Side::Away
        } else {
            return None;
        };
        self.end(Some(winner));
        Some(winner)
    }

    fn end(&mut self, winner: Option<Side>) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Ended;
            self.winner = winner;
            log::info!(
                "Match ended: score={} opponent={} life={} winner={:?}",
                self.score,
                self.opponent_score,
                self.life,
                winner
            );
        }
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackEvent {
    /// Good item caught
    ItemCaught { id: EntityId, reward: u32 },
    /// Bomb caught; drives the screen flash
    BombHit { id: EntityId },
    /// Ball kicked
    Kick { by: Side },
    /// Ball bounced off a side line
    WallBounce,
    Goal { scorer: Side },
    MatchEnded { winner: Option<Side> },
}

impl FeedbackEvent {
    /// Name of the sound asset to play, if any
    pub fn sound_cue(&self) -> Option<&'static str> {
        match self {
            FeedbackEvent::Kick { .. } => Some("kick"),
            FeedbackEvent::Goal { .. } => Some("goal"),
            _ => None,
        }
    }

    /// Whether this event should flash the screen
    pub fn flashes(&self) -> bool {
        matches!(self, FeedbackEvent::BombHit { .. })
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    pub match_state: MatchState,
    /// Change in the player's score this tick
    pub score_delta: Option<u32>,
    pub events: Vec<FeedbackEvent>,
}

impl TickResult {
    /// Result for a tick that changed nothing
    pub fn idle(match_state: MatchState) -> Self {
        Self {
            match_state,
            score_delta: None,
            events: Vec::new(),
        }
    }
}
