//! Browser facade
//!
//! Exposes a session to JavaScript through `wasm-bindgen`. The page owns the
//! canvas, the asset loading and the event listeners. It forwards events
//! here and paints the JSON frame returned by `frame`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::input::KeyboardState;
use super::time::FrameClock;
use crate::assets::AssetManifest;
use crate::config::GameConfig;
use crate::renderer::{FlashOverlay, FrameSnapshot, sound_cues};
use crate::sim::Session;

#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) keeps the existing logger
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Arcade sim starting...");
}

#[derive(Serialize)]
struct WebFrame<'a> {
    #[serde(flatten)]
    snapshot: FrameSnapshot,
    sounds: Vec<&'a str>,
    fps: u32,
}

/// One game instance owned by the page
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    assets: AssetManifest,
    keys: KeyboardState,
    clock: FrameClock,
    flash: FlashOverlay,
}

#[wasm_bindgen]
impl WebSession {
    /// Build from a JSON config such as `{"game":"soccer","difficulty":"hard"}`
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed: f64) -> Result<WebSession, JsError> {
        let config = GameConfig::from_json(config_json)?;
        let assets = AssetManifest::for_game(&config);
        let seed = if seed.is_finite() && seed >= 0.0 {
            seed as u64
        } else {
            js_sys::Date::now() as u64
        };
        Ok(Self {
            session: Session::new(config, seed)?,
            assets,
            keys: KeyboardState::new(),
            clock: FrameClock::new(),
            flash: FlashOverlay::new(),
        })
    }

    /// Asset names the page still has to load
    #[wasm_bindgen(js_name = pendingAssets)]
    pub fn pending_assets(&self) -> Vec<String> {
        self.assets.pending()
    }

    #[wasm_bindgen(js_name = assetLoaded)]
    pub fn asset_loaded(&mut self, name: &str) -> Result<(), JsError> {
        Ok(self.assets.mark_ready(name)?)
    }

    #[wasm_bindgen(js_name = assetFailed)]
    pub fn asset_failed(&mut self, name: &str, reason: &str) -> Result<(), JsError> {
        Ok(self.assets.mark_failed(name, reason)?)
    }

    /// Start button. Fails while assets are still loading.
    pub fn start(&mut self) -> Result<(), JsError> {
        self.session.start(&self.assets)?;
        self.clock.reset();
        Ok(())
    }

    /// Restart button
    pub fn reset(&mut self) {
        self.session.reset();
        self.keys.clear();
        self.clock.reset();
        self.flash = FlashOverlay::new();
    }

    /// Returns true when the key is a game key and default handling should stop
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        self.keys.key_down(key)
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) -> bool {
        self.keys.key_up(key)
    }

    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, x: f32, canvas_width: f32) {
        self.keys.touch_start(x, canvas_width);
    }

    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self) {
        self.keys.touch_end();
    }

    /// Virtual joystick deflection, each axis in `[-1, 1]` (+y is down)
    #[wasm_bindgen(js_name = joystick)]
    pub fn joystick(&mut self, dx: f32, dy: f32) {
        self.keys.set_analog(dx, dy);
    }

    /// Window lost focus: release held keys
    pub fn blur(&mut self) {
        self.keys.clear();
    }

    /// Advance to the animation-frame timestamp and return the frame as JSON
    pub fn frame(&mut self, now_ms: f64) -> Result<String, JsError> {
        let dt = self.clock.frame(now_ms);
        let result = self.session.tick(dt, &self.keys.snapshot());

        self.flash.update(dt);
        self.flash.observe(&result);

        let frame = WebFrame {
            snapshot: FrameSnapshot::build(&self.session, &self.assets, &self.flash),
            sounds: sound_cues(&result, &self.assets),
            fps: self.clock.fps(),
        };
        Ok(serde_json::to_string(&frame)?)
    }
}
