//! Browser bindings
//!
//! The host page owns the canvas and the animation loop. It forwards pointer
//! and resize events here, calls `frame()` from `requestAnimationFrame`, and
//! draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::driver::FrameDriver;
use crate::platform::{JsonRenderer, PointerTracker, SystemClock, Vibrate};
use crate::settings::Settings;

/// Route panics and `log` output to the browser console
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Air Hockey starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    driver: FrameDriver,
    pointers: PointerTracker,
    clock: SystemClock,
    haptics: Vibrate,
    renderer: JsonRenderer,
    surface: (u32, u32),
}

#[wasm_bindgen]
impl WebGame {
    /// New match in the menu, sized to the canvas, with stored settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> WebGame {
        let surface = (width, height);
        WebGame {
            driver: FrameDriver::new(surface, Settings::load()),
            pointers: PointerTracker::new(),
            clock: SystemClock::new(),
            haptics: Vibrate,
            renderer: JsonRenderer::default(),
            surface,
        }
    }

    /// Menu tap / click
    pub fn start(&mut self) -> bool {
        self.driver.start()
    }

    pub fn reset(&mut self) {
        self.driver.reset();
    }

    /// Canvas size changed; applied on the next frame
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface = (width, height);
    }

    pub fn pointer_down(&mut self, id: i32, x: f32, y: f32) {
        self.pointers.press(i64::from(id), x, y);
    }

    pub fn pointer_move(&mut self, id: i32, x: f32, y: f32) {
        self.pointers.moved(i64::from(id), x, y);
    }

    pub fn pointer_up(&mut self, id: i32) {
        self.pointers.release(i64::from(id));
    }

    /// Window blur / touch cancel
    pub fn pointer_clear(&mut self) {
        self.pointers.clear();
    }

    /// Run one frame. Returns the frame's events as a JSON array.
    pub fn frame(&mut self) -> String {
        let events = self.driver.frame(
            &self.clock,
            &self.pointers,
            &self.surface,
            &mut self.renderer,
            &mut self.haptics,
        );
        match serde_json::to_string(&events) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Events not serialisable: {}", e);
                "[]".to_string()
            }
        }
    }

    /// JSON snapshot of the last rendered frame
    pub fn snapshot(&self) -> String {
        self.renderer.json.clone()
    }

    /// Screen shake magnitude for the last rendered frame
    pub fn shake(&self) -> f32 {
        self.renderer.shake
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        self.driver
            .sim
            .settings
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the settings mid-match and persist them to LocalStorage
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        settings.save();
        self.driver.sim.apply_settings(settings);
        log::info!("Settings applied");
        Ok(())
    }
}
