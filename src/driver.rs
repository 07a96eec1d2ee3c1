//! Frame driver
//!
//! Glue invoked once per display refresh: reads the clock, snapshots input
//! and surface size, ticks the simulation, turns game events into feedback,
//! and hands the finished frame to the render sink.

use crate::consts::*;
use crate::platform::{Clock, Haptics, PointerSource, RenderSink, Surface};
use crate::settings::Settings;
use crate::sim::{GameEvent, MatchPhase, Simulation, TickInput};

pub struct FrameDriver {
    pub sim: Simulation,
    last_ms: Option<f64>,
    last_phase: MatchPhase,
}

impl FrameDriver {
    pub fn new(surface: (u32, u32), settings: Settings) -> Self {
        Self::with_simulation(Simulation::new(surface, settings))
    }

    pub fn with_simulation(sim: Simulation) -> Self {
        let last_phase = sim.state.phase;
        Self {
            sim,
            last_ms: None,
            last_phase,
        }
    }

    /// External start signal (menu tap / click)
    pub fn start(&mut self) -> bool {
        self.sim.start()
    }

    /// Manual reset of the running match
    pub fn reset(&mut self) {
        self.sim.reset_match();
    }

    /// Run one frame. Returns the events the simulation produced.
    pub fn frame(
        &mut self,
        clock: &dyn Clock,
        pointers: &dyn PointerSource,
        surface: &dyn Surface,
        renderer: &mut dyn RenderSink,
        haptics: &mut dyn Haptics,
    ) -> Vec<GameEvent> {
        let now = clock.now_ms();
        let dt = match self.last_ms {
            Some(last) => ((now - last) / 1000.0) as f32,
            None => NOMINAL_DT,
        };
        self.last_ms = Some(now);

        let input = TickInput {
            pointers: pointers.active_pointers(),
            surface: Some(surface.size()),
        };
        let events = self.sim.tick(&input, dt, now).to_vec();

        for event in &events {
            self.dispatch_feedback(*event, renderer, haptics);
        }

        let phase = self.sim.state.phase;
        if phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, phase);
            self.last_phase = phase;
        }

        renderer.render(&self.sim.frame());
        events
    }

    fn dispatch_feedback(
        &self,
        event: GameEvent,
        renderer: &mut dyn RenderSink,
        haptics: &mut dyn Haptics,
    ) {
        let (shake, pulse) = match event {
            GameEvent::WallHit => (WALL_SHAKE, WALL_PULSE_MS),
            GameEvent::Goal { .. } => (GOAL_SHAKE, GOAL_PULSE_MS),
            GameEvent::MalletHit { .. } | GameEvent::Respawned => return,
        };

        let settings = &self.sim.settings;
        if settings.effective_screen_shake() {
            renderer.shake(shake);
        }
        if settings.haptics {
            haptics.pulse(pulse);
        }
    }
}
