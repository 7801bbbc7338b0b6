//! Arcade Sim entry point
//!
//! Native builds run a headless demo: an autopilot plays each game for a
//! while and the score line is printed. The browser build is driven from
//! JavaScript through `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::error::Error;

    use arcade_sim::assets::{AssetKind, AssetProvider};
    use arcade_sim::renderer::{FlashOverlay, FrameSnapshot};
    use arcade_sim::sim::{EntityKind, FeedbackEvent};
    use arcade_sim::{
        AssetError, AssetManifest, DodgeConfig, GameConfig, InputState, Session, SoccerConfig,
    };
    use glam::Vec2;

    const DEMO_DT: f32 = 1.0 / 60.0;
    const DEMO_SECONDS: u32 = 120;

    /// Everything is "on disk" in a headless run
    struct HeadlessAssets;

    impl AssetProvider for HeadlessAssets {
        fn load(&mut self, name: &str, kind: AssetKind) -> Result<(), AssetError> {
            log::debug!("Headless load of {kind:?} `{name}`");
            Ok(())
        }
    }

    /// `dodge`, `soccer`, or a path to a JSON config
    pub fn load_config(arg: &str) -> Result<GameConfig, Box<dyn Error>> {
        match arg {
            "dodge" => Ok(GameConfig::Dodge(DodgeConfig::default())),
            "soccer" => Ok(GameConfig::Soccer(SoccerConfig::default())),
            path => {
                let json = std::fs::read_to_string(path)?;
                Ok(GameConfig::from_json(&json)?)
            }
        }
    }

    pub fn run(config: GameConfig, seed: u64) -> Result<(), Box<dyn Error>> {
        let mut assets = AssetManifest::for_game(&config);
        assets.load_all(&mut HeadlessAssets);

        let mut session = Session::new(config, seed)?;
        session.start(&assets)?;

        let mut flash = FlashOverlay::new();
        let mut flashes = 0u32;
        let mut kicks = 0u32;
        let ticks = DEMO_SECONDS * 60;
        for i in 0..ticks {
            let input = autopilot(&session);
            let result = session.tick(DEMO_DT, &input);

            flash.update(DEMO_DT);
            flash.observe(&result);
            flashes += result.events.iter().filter(|e| e.flashes()).count() as u32;
            kicks += result
                .events
                .iter()
                .filter(|e| matches!(e, FeedbackEvent::Kick { .. }))
                .count() as u32;

            if i % (10 * 60) == 0 || result.match_state.is_over() {
                let frame = FrameSnapshot::build(&session, &assets, &flash);
                log::info!("t={:>5.1}s  {}", i as f32 * DEMO_DT, frame.hud.text());
            }
            if result.match_state.is_over() {
                break;
            }
        }

        let frame = FrameSnapshot::build(&session, &assets, &flash);
        println!(
            "{:<6} seed {:<6} ticks {:<5} kicks {:<3} bombs {:<3} {}",
            session.config().name(),
            seed,
            session.match_state().ticks,
            kicks,
            flashes,
            frame.hud.text()
        );
        Ok(())
    }

    /// Simple pursuit bot for either game
    fn autopilot(session: &Session) -> InputState {
        let Some(player) = session.player() else {
            return InputState::default();
        };
        let target = match session.ball() {
            Some(ball) => {
                // Get behind the ball so contact pushes it toward the right goal
                let radius = player.radius().unwrap_or(0.0) + ball.radius().unwrap_or(0.0);
                ball.pos - Vec2::X * radius * 0.5
            }
            None => dodge_target(session, player.center()),
        };
        let to_target = target - player.center();
        if to_target.length() < 1.0 {
            return InputState::default();
        }
        InputState {
            analog: to_target.normalize_or_zero(),
            ..Default::default()
        }
    }

    /// Lowest falling star, unless a bomb is about to land on the player
    fn dodge_target(session: &Session, player: Vec2) -> Vec2 {
        let mut star: Option<Vec2> = None;
        for item in session.entities().iter() {
            let center = item.center();
            if center.y < 0.0 || center.y > player.y {
                continue;
            }
            match item.kind {
                EntityKind::BadItem
                    if (center.x - player.x).abs() < item.size().x
                        && player.y - center.y < 120.0 =>
                {
                    let away = if center.x > player.x { -1.0 } else { 1.0 };
                    return Vec2::new(player.x + away * item.size().x * 2.0, player.y);
                }
                EntityKind::GoodItem if star.is_none_or(|s| center.y > s.y) => {
                    star = Some(center);
                }
                _ => {}
            }
        }
        star.map_or(player, |s| Vec2::new(s.x, player.y))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arcade Sim (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let games = if args.is_empty() {
        vec!["dodge".to_string(), "soccer".to_string()]
    } else {
        args
    };

    let seed = 12345;
    for game in &games {
        let outcome = demo::load_config(game).and_then(|config| demo::run(config, seed));
        if let Err(err) = outcome {
            log::error!("{game}: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init_logging, this is just to satisfy the compiler
}
