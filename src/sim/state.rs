//! Match state machine
//!
//! `Menu` -> `Playing` on the external start signal, `Playing` -> `Scored` on a
//! goal, `Scored` -> `Playing` once the respawn delay has elapsed on the wall
//! clock. `Menu` is never re-entered.

use serde::{Deserialize, Serialize};

use super::entity::Player;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the start signal; only the table-draw animation runs
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Goal just scored, waiting for the puck respawn
    Scored,
}

/// Goal tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub p1: u32,
    pub p2: u32,
}

impl Score {
    pub fn credit(&mut self, player: Player) {
        match player {
            Player::One => self.p1 += 1,
            Player::Two => self.p2 += 1,
        }
    }
}

/// Identifies one scheduled respawn. Firing a stale handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespawnHandle {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct PendingRespawn {
    handle: RespawnHandle,
    fire_at_ms: f64,
}

/// High-level match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub score: Score,
    /// Score text emphasis; set on a goal, decayed by the renderer
    pub score_scale: f32,
    /// Table-draw animation in [0, 1]; saturates and never resets
    pub table_progress: f32,
    /// Wall-clock delay between a goal and the respawn
    pub respawn_delay_ms: f64,
    pending: Option<PendingRespawn>,
    generation: u64,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(RESPAWN_DELAY_MS)
    }
}

impl MatchState {
    pub fn new(respawn_delay_ms: f64) -> Self {
        Self {
            phase: MatchPhase::Menu,
            score: Score::default(),
            score_scale: 1.0,
            table_progress: 0.0,
            respawn_delay_ms,
            pending: None,
            generation: 0,
        }
    }

    /// Whether entity simulation runs at all this frame
    pub fn is_live(&self) -> bool {
        matches!(self.phase, MatchPhase::Playing | MatchPhase::Scored)
    }

    /// Advance the table-draw animation (runs in every phase)
    pub fn advance_table_animation(&mut self, dt: f32) {
        if self.table_progress < 1.0 {
            self.table_progress = (self.table_progress + dt * TABLE_ANIMATION_RATE).min(1.0);
        }
    }

    /// Handle the external start signal. Only valid from `Menu`.
    pub fn start(&mut self) -> bool {
        if self.phase != MatchPhase::Menu {
            return false;
        }
        self.phase = MatchPhase::Playing;
        log::info!("Match started");
        true
    }

    /// Record a goal and schedule the respawn at `now_ms + respawn_delay_ms`.
    /// Ignored unless `Playing`.
    pub fn goal(&mut self, scorer: Player, now_ms: f64) -> Option<RespawnHandle> {
        if self.phase != MatchPhase::Playing {
            return None;
        }
        self.score.credit(scorer);
        self.score_scale = SCORE_SCALE_ON_GOAL;
        self.phase = MatchPhase::Scored;

        self.generation += 1;
        let handle = RespawnHandle {
            generation: self.generation,
        };
        self.pending = Some(PendingRespawn {
            handle,
            fire_at_ms: now_ms + self.respawn_delay_ms,
        });

        log::info!(
            "Goal for {:?}! Score {} - {}",
            scorer,
            self.score.p1,
            self.score.p2
        );
        Some(handle)
    }

    /// Fire the pending respawn if it is due. Returns true when the match
    /// resumed; the caller then respawns the puck.
    pub fn poll_respawn(&mut self, now_ms: f64) -> bool {
        match self.pending {
            Some(pending) if now_ms >= pending.fire_at_ms => self.fire(pending.handle),
            _ => false,
        }
    }

    /// Fire a specific scheduled respawn (for hosts that drive their own
    /// timers). Stale or cancelled handles do nothing.
    pub fn fire(&mut self, handle: RespawnHandle) -> bool {
        match self.pending {
            Some(pending) if pending.handle == handle => {
                self.pending = None;
                if self.phase == MatchPhase::Scored {
                    self.phase = MatchPhase::Playing;
                }
                log::debug!("Respawn fired (generation {})", handle.generation);
                true
            }
            _ => {
                log::debug!("Ignoring stale respawn (generation {})", handle.generation);
                false
            }
        }
    }

    /// Invalidate any scheduled respawn
    pub fn cancel_respawn(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("Pending respawn cancelled");
        }
        self.generation += 1;
    }

    pub fn respawn_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wall-clock time at which the pending respawn fires
    pub fn respawn_due_at(&self) -> Option<f64> {
        self.pending.map(|p| p.fire_at_ms)
    }

    /// Manual reset: zero the tally, cancel the respawn, resume play if scored
    pub fn reset(&mut self) {
        self.cancel_respawn();
        self.score = Score::default();
        self.score_scale = 1.0;
        if self.phase == MatchPhase::Scored {
            self.phase = MatchPhase::Playing;
        }
    }
}
