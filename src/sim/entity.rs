//! Kinematic entities: puck, mallets and trail particles
//!
//! Every entity shares a `Body` (position, radius, colour tag). Self-integrating
//! entities implement `Integrate`; mallets are moved by input or the opponent
//! heuristic and never integrate themselves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::consts::*;

/// Cosmetic colour tag (packed 0xRRGGBB), passed through to rendering only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const PUCK: Color = Color(0xffffff);
    /// Electric blue
    pub const PLAYER_ONE: Color = Color(0x00f3ff);
    /// Neon magenta
    pub const PLAYER_TWO: Color = Color(0xff00ff);

    /// CSS-style hex string (e.g. `#00f3ff`)
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Shared kinematic sub-structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, color: Color) -> Self {
        Self { pos, radius, color }
    }
}

/// Entities that advance their own state over time
pub trait Integrate {
    fn update(&mut self, dt: f32);
}

/// Which side of the table a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Bottom half, scores through the top goal
    One,
    /// Top half (human or opponent heuristic), scores through the bottom goal
    Two,
}

impl Player {
    /// Index into the mallet array
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Player::One => Color::PLAYER_ONE,
            Player::Two => Color::PLAYER_TWO,
        }
    }

    /// Starting line as a fraction of arena height
    pub fn start_line(self) -> f32 {
        match self {
            Player::One => P1_START_LINE,
            Player::Two => P2_START_LINE,
        }
    }
}

/// The puck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Puck {
    pub body: Body,
    pub vel: Vec2,
    /// Velocity multiplier per update
    pub friction: f32,
    pub max_speed: f32,
}

impl Puck {
    /// Fresh puck at rest at `pos`
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, PUCK_RADIUS, Color::PUCK),
            vel: Vec2::ZERO,
            friction: PUCK_FRICTION,
            max_speed: PUCK_MAX_SPEED,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Respawn at `center` with zero velocity
    pub fn reset(&mut self, center: Vec2) {
        *self = Self::new(center);
    }
}

impl Integrate for Puck {
    fn update(&mut self, dt: f32) {
        self.body.pos += self.vel * dt;
        self.vel *= self.friction;

        // Cap speed
        let speed = self.vel.length();
        if speed > self.max_speed {
            self.vel *= self.max_speed / speed;
        }
    }
}

/// A player-controlled (or heuristic-controlled) mallet
///
/// Mallets have effectively infinite mass: the resolver reads their velocity
/// but never pushes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mallet {
    pub body: Body,
    /// Derived from positional delta every frame; zero when undriven
    pub vel: Vec2,
    pub owner: Player,
}

impl Mallet {
    pub fn new(owner: Player, pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, MALLET_RADIUS, owner.color()),
            vel: Vec2::ZERO,
            owner,
        }
    }

    /// Mallet placed on its owner's starting line, horizontally centred
    pub fn at_start(owner: Player, arena: &Arena) -> Self {
        Self::new(
            owner,
            Vec2::new(arena.width / 2.0, arena.height * owner.start_line()),
        )
    }

    /// Absolute position set. Does not clamp; callers confine the destination first.
    pub fn update_position(&mut self, pos: Vec2) {
        self.body.pos = pos;
    }

    /// Move to an already-confined destination, deriving velocity from the delta
    pub fn track(&mut self, dest: Vec2, dt: f32) {
        self.vel = if dt > 0.0 {
            (dest - self.body.pos) / dt
        } else {
            Vec2::ZERO
        };
        self.update_position(dest);
    }

    /// Zero velocity so a stationary mallet never imparts a phantom hit
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Confine a destination to the owner's half of the arena and the side walls
    pub fn confine(&self, dest: Vec2, arena: &Arena) -> Vec2 {
        let r = self.body.radius;
        let mid = arena.half_height();
        let (min_y, max_y) = match self.owner {
            Player::One => (mid + r, arena.height - r),
            Player::Two => (r, mid - r),
        };
        Vec2::new(
            clamp_lenient(dest.x, r, arena.width - r),
            clamp_lenient(dest.y, min_y, max_y),
        )
    }
}

/// A short-lived trail particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub vel: Vec2,
    /// Remaining life, starts at 1.0; removed once <= 0
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, radius, color),
            vel,
            life: 1.0,
            max_life: 1.0,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

impl Integrate for Particle {
    fn update(&mut self, dt: f32) {
        self.body.pos += self.vel * dt;
        self.life -= dt * PARTICLE_DECAY_RATE;
    }
}

/// `f32::clamp` panics when `min > max`, which a tiny surface can produce.
/// Here the lower bound wins instead.
#[inline]
pub(crate) fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
