//! Game session: everything one match needs, owned in one place
//!
//! A session is created from a validated config, started once its assets
//! have resolved, driven by the host through `tick`, and rebuilt as a whole
//! by `reset`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId, EntityKind, EntityStore, Shape, SpawnRule};
use super::input::InputState;
use super::state::{MatchState, Phase, TickResult};
use crate::assets::AssetManifest;
use crate::config::{DodgeConfig, GameConfig, SoccerConfig};
use crate::error::SessionError;
use crate::renderer::Renderable;

/// Entity IDs of the actors each game is built from
#[derive(Debug, Clone, PartialEq)]
pub enum Roster {
    Dodge {
        player: EntityId,
        items: Vec<EntityId>,
    },
    Soccer {
        player: EntityId,
        opponent: EntityId,
        ball: EntityId,
    },
}

/// One running game
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) config: GameConfig,
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) store: EntityStore,
    pub(super) roster: Roster,
    pub(super) match_state: MatchState,
    /// Input seen on the most recent tick
    pub(super) input: InputState,
    started: bool,
}

/// Validate `config` and build a session waiting to start
pub fn init_session(config: GameConfig, seed: u64) -> Result<Session, SessionError> {
    Session::new(config, seed)
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SessionError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let (store, roster) = build_entities(&config, &mut rng);
        let match_state = MatchState::new(initial_life(&config));

        log::info!(
            "{} session created (seed {}, {} entities)",
            config.name(),
            seed,
            store.len()
        );

        Ok(Self {
            config,
            seed,
            rng,
            store,
            roster,
            match_state,
            input: InputState::default(),
            started: false,
        })
    }

    /// Begin play once every asset in `assets` has resolved.
    ///
    /// Failed assets do not block; they are rendered with fallbacks.
    pub fn start(&mut self, assets: &AssetManifest) -> Result<(), SessionError> {
        if self.match_state.phase != Phase::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        let pending = assets.pending();
        if !pending.is_empty() {
            return Err(SessionError::AssetsPending(pending));
        }
        for name in assets.failed() {
            log::warn!("Starting without asset `{name}`, using fallback");
        }

        self.match_state.start();
        self.started = true;
        log::info!("{} match started", self.config.name());
        Ok(())
    }

    /// Advance one frame. See [`super::tick::tick`].
    pub fn tick(&mut self, dt: f32, input: &InputState) -> TickResult {
        super::tick::tick(self, dt, input)
    }

    /// Rebuild entities, match state and input together.
    ///
    /// A started session goes straight back to `Playing`. The RNG is not
    /// reseeded, so a restart lays items out differently.
    pub fn reset(&mut self) {
        let (store, roster) = build_entities(&self.config, &mut self.rng);
        self.store = store;
        self.roster = roster;
        self.match_state = MatchState::new(initial_life(&self.config));
        self.input = InputState::default();
        if self.started {
            self.match_state.start();
        }
        log::info!("{} session reset", self.config.name());
    }

    /// Plain-data view of every entity, in ID order
    pub fn renderables(&self) -> Vec<Renderable> {
        self.store.iter().map(Renderable::from).collect()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn phase(&self) -> Phase {
        self.match_state.phase
    }

    pub fn entities(&self) -> &EntityStore {
        &self.store
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn last_input(&self) -> &InputState {
        &self.input
    }

    pub fn player(&self) -> Option<&Entity> {
        let id = match &self.roster {
            Roster::Dodge { player, .. } | Roster::Soccer { player, .. } => *player,
        };
        self.store.get(id)
    }

    pub fn ball(&self) -> Option<&Entity> {
        match &self.roster {
            Roster::Soccer { ball, .. } => self.store.get(*ball),
            Roster::Dodge { .. } => None,
        }
    }

    pub fn opponent(&self) -> Option<&Entity> {
        match &self.roster {
            Roster::Soccer { opponent, .. } => self.store.get(*opponent),
            Roster::Dodge { .. } => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    #[cfg(test)]
    pub(crate) fn match_state_mut(&mut self) -> &mut MatchState {
        &mut self.match_state
    }
}

fn initial_life(config: &GameConfig) -> u32 {
    match config {
        // Validated to be at least 1
        GameConfig::Dodge(c) => c.initial_life.max(1) as u32,
        GameConfig::Soccer(_) => 1,
    }
}

fn build_entities<R: Rng>(config: &GameConfig, rng: &mut R) -> (EntityStore, Roster) {
    match config {
        GameConfig::Dodge(c) => build_dodge(c, rng),
        GameConfig::Soccer(c) => build_soccer(c),
    }
}

fn build_dodge<R: Rng>(config: &DodgeConfig, rng: &mut R) -> (EntityStore, Roster) {
    let mut store = EntityStore::new();

    let start = Vec2::new(
        (config.field_width - config.player_width) / 2.0,
        config.field_height - config.player_height - config.player_margin,
    );
    let player = store.spawn(
        EntityKind::Player,
        Shape::Rect {
            width: config.player_width,
            height: config.player_height,
        },
        start,
        SpawnRule::Fixed(start),
    );

    let span_x = config.field_width - config.item_width;
    let items = (0..config.item_count)
        .map(|i| {
            let kind = if i % 2 == 1 {
                EntityKind::BadItem
            } else {
                EntityKind::GoodItem
            };
            // Staggered above the field so they do not arrive together
            let x = rng.random::<f32>() * span_x;
            let y = -rng.random::<f32>() * config.field_height;
            store.spawn(
                kind,
                Shape::Rect {
                    width: config.item_width,
                    height: config.item_height,
                },
                Vec2::new(x, y),
                SpawnRule::AboveField { span_x },
            )
        })
        .collect();

    (store, Roster::Dodge { player, items })
}

fn build_soccer(config: &SoccerConfig) -> (EntityStore, Roster) {
    let mut store = EntityStore::new();
    let (w, h) = (config.field_width, config.field_height);

    let mut fixed = |kind, radius, pos: Vec2| {
        store.spawn(kind, Shape::Circle { radius }, pos, SpawnRule::Fixed(pos))
    };
    let player = fixed(
        EntityKind::Player,
        config.player_radius,
        Vec2::new(w / 4.0, h / 2.0),
    );
    let opponent = fixed(
        EntityKind::Opponent,
        config.opponent_radius,
        Vec2::new(w * 3.0 / 4.0, h / 2.0),
    );
    let ball = fixed(
        EntityKind::Ball,
        config.ball_radius,
        Vec2::new(w / 2.0, h / 2.0),
    );

    (
        store,
        Roster::Soccer {
            player,
            opponent,
            ball,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKind;
    use crate::error::ConfigError;

    fn dodge() -> Session {
        Session::new(GameConfig::Dodge(DodgeConfig::default()), 42).unwrap()
    }

    #[test]
    fn test_dodge_layout() {
        let session = dodge();
        let player = session.player().unwrap();
        assert_eq!(player.pos, Vec2::new(185.0, 555.0));

        let Roster::Dodge { items, .. } = session.roster() else {
            panic!("expected dodge roster");
        };
        assert_eq!(items.len(), 10);
        for (i, id) in items.iter().enumerate() {
            let item = session.entities().get(*id).unwrap();
            let expected = if i % 2 == 1 {
                EntityKind::BadItem
            } else {
                EntityKind::GoodItem
            };
            assert_eq!(item.kind, expected);
            assert!(item.pos.y <= 0.0 && item.pos.y >= -600.0);
            assert!(item.pos.x >= 0.0 && item.pos.x <= 360.0);
        }
    }

    #[test]
    fn test_soccer_layout() {
        let session = Session::new(GameConfig::Soccer(SoccerConfig::default()), 1).unwrap();
        assert_eq!(session.player().unwrap().pos, Vec2::new(200.0, 250.0));
        assert_eq!(session.opponent().unwrap().pos, Vec2::new(600.0, 250.0));
        assert_eq!(session.ball().unwrap().pos, Vec2::new(400.0, 250.0));
        assert_eq!(session.renderables().len(), 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::Dodge(DodgeConfig {
            initial_life: -3,
            ..Default::default()
        });
        assert!(matches!(
            init_session(config, 0),
            Err(SessionError::Config(ConfigError::InvalidLife(-3)))
        ));
    }

    #[test]
    fn test_config_error_reported_through_session_error() {
        let config = GameConfig::Soccer(SoccerConfig {
            winning_score: 0,
            ..Default::default()
        });
        let err = Session::new(config, 0).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Config(ConfigError::ZeroWinningScore)
        ));
        assert_eq!(err.to_string(), "winning score must be at least 1");
    }

    #[test]
    fn test_start_waits_for_assets() {
        let mut session = dodge();
        let mut assets = AssetManifest::new();
        assets.require("player", AssetKind::Image);

        let err = session.start(&assets).unwrap_err();
        assert!(matches!(err, SessionError::AssetsPending(ref names) if names == &["player"]));
        assert_eq!(session.phase(), Phase::NotStarted);

        assets.mark_failed("player", "404").unwrap();
        session.start(&assets).unwrap();
        assert_eq!(session.phase(), Phase::Playing);

        assert!(matches!(
            session.start(&assets),
            Err(SessionError::AlreadyStarted)
        ));
    }

    #[test]
    fn test_reset_rebuilds_everything() {
        let mut session = dodge();
        session.start(&AssetManifest::new()).unwrap();
        session.match_state_mut().score = 50;
        session.match_state_mut().life = 0;
        session.store_mut().get_mut(EntityId(0)).unwrap().pos.x = 0.0;
        session.input.right = true;

        session.reset();

        assert_eq!(session.match_state().score, 0);
        assert_eq!(session.match_state().life, 1);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.player().unwrap().pos, Vec2::new(185.0, 555.0));
        assert_eq!(session.last_input(), &InputState::default());
        assert_eq!(session.entities().len(), 11);
    }

    #[test]
    fn test_reset_before_start_stays_not_started() {
        let mut session = dodge();
        session.reset();
        assert_eq!(session.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_same_seed_same_layout() {
        assert_eq!(dodge().renderables(), dodge().renderables());
    }
}
