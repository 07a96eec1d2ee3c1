//! End-to-end match flow through the frame driver

use air_hockey::FrameDriver;
use air_hockey::consts::{GOAL_PULSE_MS, GOAL_SHAKE};
use air_hockey::platform::{Haptics, ManualClock, PointerTracker, RenderSink};
use air_hockey::settings::Settings;
use air_hockey::sim::{FrameState, GameEvent, MatchPhase, Player, Score};
use glam::Vec2;

const FRAME_MS: f64 = 1000.0 / 60.0;
const SURFACE: (u32, u32) = (1000, 1000);

#[derive(Default)]
struct Sink {
    frames: Vec<(MatchPhase, Vec2, Score)>,
    shakes: Vec<f32>,
}

impl RenderSink for Sink {
    fn render(&mut self, frame: &FrameState<'_>) {
        self.frames
            .push((frame.phase, frame.puck.body.pos, frame.score));
    }

    fn shake(&mut self, magnitude: f32) {
        self.shakes.push(magnitude);
    }
}

#[derive(Default)]
struct Buzz(Vec<Vec<u32>>);

impl Haptics for Buzz {
    fn pulse(&mut self, pattern_ms: &[u32]) {
        self.0.push(pattern_ms.to_vec());
    }
}

struct Harness {
    driver: FrameDriver,
    clock: ManualClock,
    pointers: PointerTracker,
    sink: Sink,
    buzz: Buzz,
}

impl Harness {
    fn new(settings: Settings) -> Self {
        Self {
            driver: FrameDriver::new(SURFACE, settings),
            clock: ManualClock::new(0.0),
            pointers: PointerTracker::new(),
            sink: Sink::default(),
            buzz: Buzz::default(),
        }
    }

    fn step(&mut self) -> Vec<GameEvent> {
        let events = self.driver.frame(
            &self.clock,
            &self.pointers,
            &SURFACE,
            &mut self.sink,
            &mut self.buzz,
        );
        self.clock.advance(FRAME_MS);
        events
    }
}

#[test]
fn goal_pause_and_respawn() {
    let mut h = Harness::new(Settings::default());
    assert!(h.driver.start());

    h.driver.sim.puck.body.pos = Vec2::new(500.0, -5.0);
    h.driver.sim.puck.vel = Vec2::new(0.0, -50.0);

    let events = h.step();
    assert_eq!(events, vec![GameEvent::Goal { player: Player::One }]);
    assert_eq!(h.driver.sim.state.score, Score { p1: 1, p2: 0 });
    assert_eq!(h.driver.sim.state.phase, MatchPhase::Scored);
    assert_eq!(h.sink.shakes, vec![GOAL_SHAKE]);
    assert_eq!(h.buzz.0, vec![GOAL_PULSE_MS.to_vec()]);

    // Frozen for the rest of the second
    let mut respawned_at = None;
    for i in 1..=70 {
        let events = h.step();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Goal { .. })));
        if events.contains(&GameEvent::Respawned) {
            respawned_at = Some(i);
            break;
        }
        assert_eq!(h.driver.sim.state.phase, MatchPhase::Scored);
    }

    // Goal at t=0, respawn on the first frame at or after 1000 ms
    let frame = respawned_at.expect("puck never respawned");
    assert!((60..=61).contains(&frame));
    assert_eq!(h.driver.sim.state.phase, MatchPhase::Playing);
    assert_eq!(h.driver.sim.puck.body.pos, Vec2::new(500.0, 500.0));
    assert_eq!(h.driver.sim.puck.vel, Vec2::ZERO);
    assert_eq!(h.driver.sim.state.score, Score { p1: 1, p2: 0 });
}

#[test]
fn menu_freezes_play_until_started() {
    let mut h = Harness::new(Settings::default());
    h.pointers.press(1, 200.0, 900.0);

    for _ in 0..30 {
        assert!(h.step().is_empty());
    }
    assert_eq!(h.driver.sim.state.phase, MatchPhase::Menu);
    // Mallet ignored the pointer
    assert_eq!(h.driver.sim.mallets[0].body.pos, Vec2::new(500.0, 850.0));
    assert!(h.driver.sim.state.table_progress > 0.0);

    assert!(h.driver.start());
    h.step();
    assert_eq!(h.driver.sim.mallets[0].body.pos, Vec2::new(200.0, 900.0));
}

#[test]
fn table_animation_completes_in_two_seconds() {
    let mut h = Harness::new(Settings::default());
    for _ in 0..119 {
        h.step();
    }
    assert!(h.driver.sim.state.table_progress < 1.0);
    h.step();
    h.step();
    assert_eq!(h.driver.sim.state.table_progress, 1.0);
    for _ in 0..10 {
        h.step();
    }
    assert_eq!(h.driver.sim.state.table_progress, 1.0);
}

#[test]
fn player_one_strike_scores() {
    let mut h = Harness::new(Settings::default());
    h.driver.start();
    h.driver.sim.puck.body.pos = Vec2::new(500.0, 560.0);

    // Park player two's mallet out of the shot with a second touch
    h.pointers.press(2, 900.0, 100.0);

    // Wind up below the puck, then lunge through it
    h.pointers.moved(-1, 500.0, 640.0);
    h.step();
    h.pointers.moved(-1, 500.0, 600.0);
    let events = h.step();
    assert!(events.contains(&GameEvent::MalletHit { player: Player::One }));
    assert!(h.driver.sim.puck.vel.y < -1000.0);

    let mut scored = false;
    for _ in 0..60 {
        let events = h.step();
        if events.contains(&GameEvent::Goal { player: Player::One }) {
            scored = true;
            break;
        }
        // Speed cap holds every frame
        assert!(h.driver.sim.puck.speed() <= 1500.0 * (1.0 + 1e-5));
    }
    assert!(scored);
    assert_eq!(h.driver.sim.state.score, Score { p1: 1, p2: 0 });
    // The shot left a trail
    assert!(!h.driver.sim.particles.is_empty());
}

#[test]
fn resize_between_frames_reclamps() {
    let mut h = Harness::new(Settings::default());
    h.step();

    let small = (600u32, 400u32);
    h.driver.frame(
        &h.clock,
        &h.pointers,
        &small,
        &mut h.sink,
        &mut h.buzz,
    );
    let sim = &h.driver.sim;
    assert_eq!(sim.arena.width, 600.0);
    assert_eq!(sim.arena.height, 400.0);
    for mallet in &sim.mallets {
        let p = mallet.body.pos;
        let r = mallet.body.radius;
        assert!(p.x >= r && p.x <= 600.0 - r);
        assert!(p.y >= r && p.y <= 400.0 - r);
    }
    let puck = sim.puck.body.pos;
    assert!(puck.x >= 20.0 && puck.x <= 580.0);
    assert!(puck.y >= 20.0 && puck.y <= 380.0);
    assert!((sim.arena.goal_width - 240.0).abs() < 1e-3);
    assert_eq!(h.sink.frames.len(), 2);
}

#[test]
fn reset_during_pause_discards_stale_respawn() {
    let mut h = Harness::new(Settings::default());
    h.driver.start();
    h.driver.sim.puck.body.pos = Vec2::new(500.0, 1004.0);
    h.driver.sim.puck.vel = Vec2::new(0.0, 60.0);

    let events = h.step();
    assert_eq!(events, vec![GameEvent::Goal { player: Player::Two }]);

    for _ in 0..10 {
        h.step();
    }
    h.driver.reset();
    assert_eq!(h.driver.sim.state.phase, MatchPhase::Playing);
    assert_eq!(h.driver.sim.state.score, Score::default());

    // Nudge the puck so a stale respawn would be visible
    h.driver.sim.puck.vel = Vec2::new(200.0, 0.0);
    for _ in 0..70 {
        let events = h.step();
        assert!(!events.contains(&GameEvent::Respawned));
    }
    assert_ne!(h.driver.sim.puck.body.pos, Vec2::new(500.0, 500.0));
    assert!(h.sink.frames.iter().any(|(phase, _, _)| *phase == MatchPhase::Scored));
}
