//! Air Hockey headless runner
//!
//! Native builds play a scripted match: player one is a pointer sweeping
//! across the bottom half and lunging at the puck, player two is the
//! built-in opponent. Web builds start from `air_hockey::web` instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use air_hockey::FrameDriver;
    use air_hockey::platform::{LogRenderer, ManualClock, NoHaptics, PointerTracker};
    use air_hockey::settings::{QualityPreset, Settings};
    use air_hockey::sim::MatchPhase;

    env_logger::init();
    log::info!("Air Hockey (headless) starting...");

    // Usage: air-hockey [FRAMES] [low|medium|high] [--save-settings]
    let mut settings = Settings::load();
    let mut frames: u32 = 60 * 60;
    let mut save = false;
    for arg in std::env::args().skip(1) {
        if arg == "--save-settings" {
            save = true;
        } else if let Ok(n) = arg.parse() {
            frames = n;
        } else if let Some(preset) = QualityPreset::from_str(&arg) {
            settings.apply_preset(preset);
        } else {
            log::warn!("Ignoring unknown argument {:?}", arg);
        }
    }
    if save {
        settings.save();
    }

    let surface = (720u32, 1280u32);

    let mut driver = FrameDriver::new(surface, settings);
    let clock = ManualClock::new(0.0);
    let pointers = PointerTracker::new();
    let mut renderer = LogRenderer::default();
    let mut haptics = NoHaptics;

    driver.start();

    let frame_ms = 1000.0 / 60.0;
    let (w, h) = (surface.0 as f32, surface.1 as f32);
    for frame in 0..frames {
        // Scripted player one: follow the puck when it is on our side,
        // otherwise drift back and forth on the defensive line
        let puck = driver.sim.puck.body.pos;
        let t = frame as f32 * frame_ms as f32 / 1000.0;
        if driver.sim.state.phase == MatchPhase::Playing && puck.y > h / 2.0 {
            pointers.moved(-1, puck.x, puck.y + 30.0);
        } else {
            let sweep = w / 2.0 + (t * 1.3).sin() * w * 0.35;
            pointers.moved(-1, sweep, h * 0.85);
        }

        let events = driver.frame(&clock, &pointers, &surface, &mut renderer, &mut haptics);
        for event in events {
            log::debug!("frame {}: {:?}", frame, event);
        }

        clock.advance(frame_ms);
    }

    let score = driver.sim.state.score;
    log::info!("Played {} frames", renderer.frames);
    println!("Final score: {} - {}", score.p1, score.p2);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
