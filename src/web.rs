//! Browser facade
//!
//! The page owns the scene graph, key listeners and the animation-frame loop.
//! It feeds key state and frame deltas in, and pulls the player pose, HUD and
//! track lifecycle events back out as JSON.

use wasm_bindgen::prelude::*;

use crate::clock::FixedStep;
use crate::highscores::HighScores;
use crate::sim::{GameState, InputState, autopilot, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Track Runner starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct RunnerGame {
    state: GameState,
    clock: FixedStep,
    input: InputState,
    idle_mode: bool,
    high_scores: HighScores,
    recorded: bool,
}

#[wasm_bindgen]
impl RunnerGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> RunnerGame {
        let tuning = Tuning::load();
        log::info!("Game initialized with seed: {}", seed);
        RunnerGame {
            state: GameState::with_tuning(u64::from(seed), tuning),
            clock: FixedStep::default(),
            input: InputState::default(),
            idle_mode: false,
            high_scores: HighScores::new(),
            recorded: false,
        }
    }

    /// Keys currently held
    pub fn set_keys(&mut self, steer_left: bool, steer_right: bool, jump: bool) {
        self.input = InputState {
            steer_left,
            steer_right,
            jump,
        };
    }

    pub fn set_idle_mode(&mut self, enabled: bool) {
        self.idle_mode = enabled;
        log::info!("Idle mode: {}", enabled);
    }

    /// Run the ticks owed for `dt` seconds of wall time; returns ticks run
    pub fn frame(&mut self, dt: f32) -> u32 {
        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            let input = if self.idle_mode {
                autopilot::plan(
                    &self.state.runner.player,
                    self.state.track.segments(),
                    &self.state.tuning,
                )
            } else {
                self.input
            };
            tick(&mut self.state, &input);
        }

        if self.state.is_game_over() && !self.recorded {
            self.recorded = true;
            self.high_scores.record_run(&self.state, js_sys::Date::now());
        }
        steps
    }

    /// User-initiated restart
    pub fn reset(&mut self) {
        self.state.reset();
        self.clock.reset();
        self.input = InputState::default();
        self.recorded = false;
    }

    /// `[x, y, z]` of the player's center
    pub fn player_pose(&self) -> Vec<f32> {
        let p = self.state.runner.player.position();
        vec![p.x, p.y, p.z]
    }

    pub fn viewpoint_z(&self) -> f32 {
        self.state.viewpoint_z()
    }

    /// Render interpolation factor between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn hud_json(&self) -> String {
        serde_json::to_string(&self.state.hud()).unwrap_or_default()
    }

    /// Spawn/retire/game-over events since the last call
    pub fn drain_events_json(&mut self) -> String {
        let events = self.state.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Failed to encode events: {}", e);
            "[]".to_string()
        })
    }

    pub fn high_scores_json(&self) -> String {
        serde_json::to_string(&self.high_scores).unwrap_or_default()
    }
}
