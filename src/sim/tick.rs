//! Per-frame simulation tick
//!
//! Frame-time scaled (not fixed-step): every step is driven by the elapsed
//! wall time of the display refresh, sanitised and optionally clamped.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::{self, CollisionReport};
use super::entity::{Integrate, Mallet, Particle, Player, Puck, clamp_lenient};
use super::particles::ParticlePool;
use super::state::{MatchPhase, MatchState, Score};
use crate::consts::*;
use crate::settings::Settings;

/// One active pointer (mouse or touch) in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub id: i64,
    pub pos: Vec2,
}

impl Pointer {
    pub fn new(id: i64, x: f32, y: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, y),
        }
    }
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Active pointers, read atomically once per frame
    pub pointers: Vec<Pointer>,
    /// Current surface size; `None` keeps the previous arena
    pub surface: Option<(u32, u32)>,
}

/// Things that happened during a tick, for feedback (shake, haptics, audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Puck bounced off the left or right wall
    WallHit,
    /// A mallet struck the puck
    MalletHit { player: Player },
    /// A goal was scored
    Goal { player: Player },
    /// Puck respawned at centre after a goal
    Respawned,
}

/// Everything the render sink needs for one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameState<'a> {
    pub phase: MatchPhase,
    pub arena: &'a Arena,
    pub puck: &'a Puck,
    pub mallets: &'a [Mallet; 2],
    pub particles: &'a [Particle],
    pub score: Score,
    pub table_progress: f32,
    pub score_scale: f32,
}

/// The simulation context: all mutable gameplay state, touched only from the
/// frame tick
#[derive(Debug, Clone)]
pub struct Simulation {
    pub settings: Settings,
    pub arena: Arena,
    pub puck: Puck,
    /// Player one (bottom) then player two (top)
    pub mallets: [Mallet; 2],
    pub particles: ParticlePool,
    pub state: MatchState,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Simulation {
    pub fn new(surface: (u32, u32), settings: Settings) -> Self {
        let settings = settings.sanitized();
        let arena = Arena::from_surface(surface, settings.goal_width_fraction);
        log::info!(
            "Simulation created: {}x{} arena, goal width {:.0}",
            arena.width,
            arena.height,
            arena.goal_width
        );
        Self {
            arena,
            puck: Puck::new(arena.center()),
            mallets: [
                Mallet::at_start(Player::One, &arena),
                Mallet::at_start(Player::Two, &arena),
            ],
            particles: ParticlePool::new(settings.max_particles()),
            state: MatchState::new(settings.respawn_delay_ms),
            rng: Pcg32::seed_from_u64(settings.rng_seed),
            events: Vec::new(),
            settings,
        }
    }

    /// External start signal: `Menu` -> `Playing` with a fresh puck.
    /// Score and mallets are untouched. Repeat calls are ignored.
    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.puck.reset(self.arena.center());
        true
    }

    /// Manual reset: mallets to their starting lines, score zeroed, puck
    /// centred, and any pending respawn cancelled
    pub fn reset_match(&mut self) {
        self.mallets = [
            Mallet::at_start(Player::One, &self.arena),
            Mallet::at_start(Player::Two, &self.arena),
        ];
        self.puck.reset(self.arena.center());
        self.state.reset();
        log::info!("Match reset");
    }

    /// Replace the settings, applying what can change mid-match
    pub fn apply_settings(&mut self, settings: Settings) {
        let settings = settings.sanitized();
        self.particles.set_capacity(settings.max_particles());
        self.state.respawn_delay_ms = settings.respawn_delay_ms;
        self.arena = Arena::from_surface(self.arena.size(), settings.goal_width_fraction);
        self.settings = settings;
    }

    /// Borrow everything needed to draw the current frame
    pub fn frame(&self) -> FrameState<'_> {
        FrameState {
            phase: self.state.phase,
            arena: &self.arena,
            puck: &self.puck,
            mallets: &self.mallets,
            particles: self.particles.as_slice(),
            score: self.state.score,
            table_progress: self.state.table_progress,
            score_scale: self.state.score_scale,
        }
    }

    /// Clamp a raw frame step into something the physics can digest
    pub fn sanitize_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            return 0.0;
        }
        match self.settings.max_frame_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Advance the simulation by one display frame
    pub fn tick(&mut self, input: &TickInput, dt: f32, now_ms: f64) -> &[GameEvent] {
        self.events.clear();
        let dt = self.sanitize_dt(dt);

        if let Some(size) = input.surface.filter(|s| *s != self.arena.size()) {
            self.resize(size);
        }

        // Table animation runs in every phase
        self.state.advance_table_animation(dt);

        if !self.state.is_live() {
            return &self.events;
        }

        if self.state.phase == MatchPhase::Scored && self.state.poll_respawn(now_ms) {
            self.puck.reset(self.arena.center());
            self.events.push(GameEvent::Respawned);
        }

        // Scored freezes gameplay; only the trail keeps fading
        if self.state.phase == MatchPhase::Playing {
            self.step_play(&input.pointers, dt, now_ms);
        }

        self.particles.age(dt);

        &self.events
    }

    fn step_play(&mut self, pointers: &[Pointer], dt: f32, now_ms: f64) {
        let (p1_dest, p2_dest) = self.partition_pointers(pointers);

        self.drive_mallet(Player::One, p1_dest, dt);
        self.drive_mallet(Player::Two, p2_dest, dt);
        if p2_dest.is_none() && self.settings.opponent_ai {
            self.drive_opponent(dt);
        }

        self.puck.update(dt);
        let report = collision::resolve(&mut self.puck, &self.mallets, &self.arena);
        self.record_contacts(&report);

        if self.settings.particles && self.puck.speed() > TRAIL_SPEED_THRESHOLD {
            self.particles.emit_trail(&self.puck, &mut self.rng);
        }

        self.detect_goal(now_ms);
    }

    /// Split pointers by half: top half (`y <= height/2`) steers player two,
    /// the rest player one. Last pointer in each half wins.
    fn partition_pointers(&self, pointers: &[Pointer]) -> (Option<Vec2>, Option<Vec2>) {
        let mid = self.arena.half_height();
        let mut p1 = None;
        let mut p2 = None;
        for pointer in pointers {
            if pointer.pos.y <= mid {
                p2 = Some(pointer.pos);
            } else {
                p1 = Some(pointer.pos);
            }
        }
        (p1, p2)
    }

    fn drive_mallet(&mut self, player: Player, dest: Option<Vec2>, dt: f32) {
        let mallet = &mut self.mallets[player.index()];
        match dest {
            Some(dest) => {
                let dest = mallet.confine(dest, &self.arena);
                mallet.track(dest, dt);
            }
            None => mallet.halt(),
        }
    }

    /// Opponent heuristic for an untouched top mallet: shadow the puck
    /// horizontally, step forward to defend when it is incoming.
    fn drive_opponent(&mut self, dt: f32) {
        let arena = self.arena;
        let puck = self.puck;
        let mallet = &mut self.mallets[Player::Two.index()];

        let incoming = puck.body.pos.y < arena.half_height() && puck.vel.y < 0.0;
        let line = if incoming { AI_DEFEND_LINE } else { AI_HOME_LINE };
        let target = Vec2::new(puck.body.pos.x, arena.height * line);

        let follow = (AI_FOLLOW_RATE * dt).min(1.0);
        let next = mallet.body.pos + (target - mallet.body.pos) * follow;
        let next = mallet.confine(next, &arena);
        mallet.track(next, dt);
    }

    fn record_contacts(&mut self, report: &CollisionReport) {
        if report.side_wall {
            self.events.push(GameEvent::WallHit);
        }
        if let Some(i) = report.mallet_hit {
            let player = self.mallets[i].owner;
            log::debug!("{:?} hit the puck at {:.0} px/s", player, self.puck.speed());
            self.events.push(GameEvent::MalletHit { player });
        }
    }

    /// Top goal scores for player one, bottom goal for player two
    fn detect_goal(&mut self, now_ms: f64) {
        let pos = self.puck.body.pos;
        if !self.arena.in_goal_span(pos.x) {
            return;
        }
        let scorer = if pos.y < 0.0 {
            Player::One
        } else if pos.y > self.arena.height {
            Player::Two
        } else {
            return;
        };

        if self.state.goal(scorer, now_ms).is_some() {
            self.events.push(GameEvent::Goal { player: scorer });
        }
    }

    /// Adopt a new surface size and pull every entity back inside it
    pub fn resize(&mut self, size: (u32, u32)) {
        // Passthrough is judged on the table the puck was actually moving in:
        // edge already past an end wall, inside that goal opening
        let old = self.arena;
        let r = self.puck.body.radius;
        let pos = self.puck.body.pos;
        let passing = (pos.y - r < 0.0 || pos.y + r > old.height) && old.in_goal_span(pos.x);

        self.arena.resize(size);
        let arena = self.arena;
        log::info!("Arena resized to {}x{}", arena.width, arena.height);

        for mallet in &mut self.mallets {
            let pos = mallet.confine(mallet.body.pos, &arena);
            mallet.update_position(pos);
        }

        for particle in self.particles.iter_mut() {
            particle.body.pos = clamp_to_arena(particle.body.pos, particle.body.radius, &arena);
        }

        // A puck mid goal-passthrough stays where it is
        if !passing {
            self.puck.body.pos = clamp_to_arena(pos, r, &arena);
        }
    }
}

fn clamp_to_arena(pos: Vec2, radius: f32, arena: &Arena) -> Vec2 {
    Vec2::new(
        clamp_lenient(pos.x, radius, arena.width - radius),
        clamp_lenient(pos.y, radius, arena.height - radius),
    )
}
