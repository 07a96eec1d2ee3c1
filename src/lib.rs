//! Air Hockey - real-time simulation core for a two-player neon air hockey table
//!
//! Core modules:
//! - `sim`: Gameplay simulation (entities, collisions, match state, frame tick)
//! - `platform`: Collaborator traits and browser/native implementations
//! - `driver`: Per-frame glue between the clock, input, simulation and sinks
//! - `settings`: Data-driven configuration
//! - `web`: `#[wasm_bindgen]` surface for browser hosts (wasm32 only)

pub mod driver;
pub mod platform;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::FrameDriver;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Nominal frame step used when no previous clock reading exists (60 Hz)
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;
    /// Default upper bound on a single frame step (prevents tunneling on hitches)
    pub const DEFAULT_MAX_FRAME_DT: f32 = 1.0 / 15.0;

    /// Puck defaults
    pub const PUCK_RADIUS: f32 = 20.0;
    /// Velocity multiplier applied on every puck update
    pub const PUCK_FRICTION: f32 = 0.99;
    /// Maximum puck speed (pixels/s)
    pub const PUCK_MAX_SPEED: f32 = 1500.0;

    /// Mallet defaults
    pub const MALLET_RADIUS: f32 = 40.0;
    /// Starting line of player 1's mallet, as a fraction of arena height
    pub const P1_START_LINE: f32 = 0.85;
    /// Starting line of player 2's mallet, as a fraction of arena height
    pub const P2_START_LINE: f32 = 0.15;

    /// Collision restitution between puck and mallet (perfectly elastic)
    pub const RESTITUTION: f32 = 1.0;

    /// Goal opening width as a fraction of arena width
    pub const GOAL_WIDTH_FRACTION: f32 = 0.4;

    /// Puck speed above which a trail particle is emitted each frame
    pub const TRAIL_SPEED_THRESHOLD: f32 = 100.0;
    /// Particle life lost per second
    pub const PARTICLE_DECAY_RATE: f32 = 2.0;
    /// Particle radius range [min, max)
    pub const PARTICLE_MIN_RADIUS: f32 = 1.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 4.0;
    /// Maximum scatter speed per axis for a fresh particle
    pub const PARTICLE_SCATTER: f32 = 25.0;

    /// Opponent heuristic smoothing rate (per second)
    pub const AI_FOLLOW_RATE: f32 = 5.0;
    /// Opponent resting line (fraction of arena height)
    pub const AI_HOME_LINE: f32 = 0.15;
    /// Opponent defensive line when the puck is incoming (fraction of arena height)
    pub const AI_DEFEND_LINE: f32 = 0.25;

    /// Table-draw animation progress per second (2 seconds to draw)
    pub const TABLE_ANIMATION_RATE: f32 = 0.5;
    /// Score text emphasis applied on a goal
    pub const SCORE_SCALE_ON_GOAL: f32 = 2.5;
    /// Delay between a goal and the puck respawn (wall-clock milliseconds)
    pub const RESPAWN_DELAY_MS: f64 = 1000.0;

    /// Screen shake magnitude for a side-wall hit
    pub const WALL_SHAKE: f32 = 5.0;
    /// Screen shake magnitude for a goal
    pub const GOAL_SHAKE: f32 = 20.0;
    /// Haptic pattern for a side-wall hit (ms)
    pub const WALL_PULSE_MS: &[u32] = &[20];
    /// Haptic pattern for a goal (vibrate, pause, vibrate)
    pub const GOAL_PULSE_MS: &[u32] = &[100, 50, 100];
}
