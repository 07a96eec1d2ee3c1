//! Output collaborators: haptics and headless render sinks

use super::{Haptics, RenderSink};
use crate::sim::FrameState;

/// Haptics for platforms without a vibration motor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&mut self, pattern_ms: &[u32]) {
        log::trace!("haptic pulse {:?} (no device)", pattern_ms);
    }
}

/// `navigator.vibrate` in the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Vibrate;

#[cfg(target_arch = "wasm32")]
impl Haptics for Vibrate {
    fn pulse(&mut self, pattern_ms: &[u32]) {
        use wasm_bindgen::JsValue;

        let Some(window) = web_sys::window() else {
            return;
        };
        let pattern: js_sys::Array = pattern_ms.iter().map(|&ms| JsValue::from(ms)).collect();
        // Unsupported or blocked (no user gesture yet) is fine
        let _ = window.navigator().vibrate_with_pattern(&pattern);
    }
}

/// Discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn render(&mut self, _frame: &FrameState<'_>) {}
}

/// Headless sink that logs the frame summary and tracks shake like a real
/// renderer would (kick on notification, 0.9 decay per frame)
#[derive(Debug, Clone, Default)]
pub struct LogRenderer {
    pub frames: u64,
    pub shake: f32,
}

impl RenderSink for LogRenderer {
    fn render(&mut self, frame: &FrameState<'_>) {
        self.frames += 1;
        log::trace!(
            "frame {} {:?}: puck ({:.1}, {:.1}) v=({:.1}, {:.1}) particles={} score={}-{} table={:.2} scale={:.2} shake={:.1}",
            self.frames,
            frame.phase,
            frame.puck.body.pos.x,
            frame.puck.body.pos.y,
            frame.puck.vel.x,
            frame.puck.vel.y,
            frame.particles.len(),
            frame.score.p1,
            frame.score.p2,
            frame.table_progress,
            frame.score_scale,
            self.shake
        );

        self.shake *= 0.9;
        if self.shake < 0.5 {
            self.shake = 0.0;
        }
    }

    fn shake(&mut self, magnitude: f32) {
        self.shake = self.shake.max(magnitude);
    }
}

/// Serialises each finished frame to JSON for a host-side renderer.
/// `shake` holds the magnitude for the frame just rendered.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    pub json: String,
    pub shake: f32,
    pending_shake: f32,
}

impl RenderSink for JsonRenderer {
    fn render(&mut self, frame: &FrameState<'_>) {
        match serde_json::to_string(frame) {
            Ok(json) => self.json = json,
            Err(e) => log::warn!("Frame not serialisable: {}", e),
        }

        self.shake = self.pending_shake;
        self.pending_shake *= 0.9;
        if self.pending_shake < 0.5 {
            self.pending_shake = 0.0;
        }
    }

    fn shake(&mut self, magnitude: f32) {
        self.pending_shake = self.pending_shake.max(magnitude);
    }
}
