//! Track Runner entry point
//!
//! On the web the game is driven from JavaScript through `track_runner::web`.
//! Natively this runs a headless autopilot session and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use track_runner::consts::SIM_DT;
    use track_runner::sim::{GameState, autopilot, tick};
    use track_runner::{FixedStep, HighScores, Tuning};

    env_logger::init();
    log::info!("Track Runner (native) starting...");

    // Usage: track-runner [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(12345);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("{}: {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::load(),
    };

    const MAX_TICKS: u64 = 60 * 60 * 5;
    let mut state = GameState::with_tuning(seed, tuning);
    let mut clock = FixedStep::default();
    let mut ticks = 0u64;

    // Simulate a 60 Hz frame callback
    while !state.is_game_over() && ticks < MAX_TICKS {
        for _ in 0..clock.advance(SIM_DT) {
            let input =
                autopilot::plan(&state.runner.player, state.track.segments(), &state.tuning);
            tick(&mut state, &input);
            ticks += 1;
        }
        let events = state.drain_events();
        log::trace!("{} events this frame", events.len());
    }

    let hud = state.hud();
    match &hud.game_over {
        Some(reason) => println!(
            "Run over after {} ticks: {} score={} distance={:.1}",
            ticks, reason, hud.score, hud.distance
        ),
        None => println!(
            "Autopilot survived {} ticks: score={} distance={:.1}",
            ticks, hud.score, hud.distance
        ),
    }

    let mut scores = HighScores::new();
    if let Some(rank) = scores.record_run(&state, 0.0) {
        println!("Leaderboard rank #{}", rank);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is track_runner::web::wasm_start, this is just to satisfy the compiler
}
