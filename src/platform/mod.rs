//! Platform abstraction layer
//!
//! The simulation core talks to the outside world only through these traits:
//! - `PointerSource`: active mouse/touch pointers, snapshotted once per frame
//! - `Surface`: current drawing surface size
//! - `Clock`: monotonic wall-clock milliseconds
//! - `RenderSink`: frame output plus shake notifications
//! - `Haptics`: best-effort vibration pulses
//!
//! Browser and native implementations live in the submodules.

pub mod feedback;
pub mod input;
pub mod time;

pub use feedback::{JsonRenderer, LogRenderer, NoHaptics, NullRenderer};
#[cfg(target_arch = "wasm32")]
pub use feedback::Vibrate;
pub use input::PointerTracker;
pub use time::{ManualClock, SystemClock};

use crate::sim::{FrameState, Pointer};

/// Source of active pointers
pub trait PointerSource {
    /// Atomic snapshot of every active pointer. Order is unspecified.
    fn active_pointers(&self) -> Vec<Pointer>;
}

/// Drawing surface dimensions, re-read every frame
pub trait Surface {
    fn size(&self) -> (u32, u32);
}

impl Surface for (u32, u32) {
    fn size(&self) -> (u32, u32) {
        *self
    }
}

/// Monotonic wall clock
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> f64;
}

/// Consumer of finished frames. Fire-and-forget.
pub trait RenderSink {
    fn render(&mut self, frame: &FrameState<'_>);

    /// Kick the screen shake (the sink owns its decay)
    fn shake(&mut self, _magnitude: f32) {}
}

/// Vibration output. Failures are ignored.
pub trait Haptics {
    /// Alternating vibrate/pause durations in milliseconds
    fn pulse(&mut self, pattern_ms: &[u32]);
}
