//! Game state and core simulation types
//!
//! `GameState` is the single owner of a run: the runner, the track and the
//! queue of events for the presentation layer. Nothing here is process-global.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::tick::InputState;
use super::track::{TrackEvent, TrackGenerator};
use crate::consts::SIM_HZ;
use crate::tuning::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Ran into an obstacle
    Crashed,
    /// Stood on nothing at resting height
    FellInGap,
}

impl GameOverCause {
    /// Text shown by the display layer
    pub fn message(&self) -> &'static str {
        match self {
            GameOverCause::Crashed => "You crashed into an obstacle!",
            GameOverCause::FellInGap => "You fell into a gap!",
        }
    }
}

/// Player kinematics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Lateral position (center)
    pub x: f32,
    pub vx: f32,
    /// Vertical position (center)
    pub y: f32,
    pub vy: f32,
    /// Longitudinal position (center)
    pub z: f32,
    pub airborne: bool,
    /// Jump pressed this tick; consumed by `RunnerState::tick`
    pub jump_requested: bool,
    pub forward_speed: f32,
    pub resting_height: f32,
    /// Edge length of the player's cube
    pub size: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: 0.0,
            vx: 0.0,
            y: tuning.resting_height(),
            vy: 0.0,
            z: 0.0,
            airborne: false,
            jump_requested: false,
            forward_speed: tuning.forward_speed,
            resting_height: tuning.resting_height(),
            size: tuning.player_size,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// World-space bounding volume
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position(), Vec3::splat(self.size / 2.0))
    }
}

/// Player kinematics plus the run's counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerState {
    tuning: Tuning,
    pub player: Player,
    /// Distance run so far. Kept apart from `player.z`, which stops
    /// advancing once the f32 spacing exceeds `forward_speed`.
    pub distance: f64,
    /// `distance * score_rate`; never decreases during a run
    pub score: f64,
    /// Not awarded by anything yet; kept for the HUD
    pub coins: u32,
    pub game_over: Option<GameOverCause>,
    /// Ticks simulated this run
    pub ticks: u64,
}

impl RunnerState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            player: Player::new(&tuning),
            distance: 0.0,
            score: 0.0,
            coins: 0,
            game_over: None,
            ticks: 0,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Apply one tick of held input. Opposite steer keys cancel out.
    pub fn apply_input(&mut self, input: &InputState) {
        if self.is_game_over() {
            return;
        }
        if input.steer_left {
            self.player.vx -= self.tuning.steer_accel;
        }
        if input.steer_right {
            self.player.vx += self.tuning.steer_accel;
        }
        if input.jump {
            self.player.jump_requested = true;
        }
    }

    /// Advance player physics and score by one tick
    pub fn tick(&mut self) {
        if self.is_game_over() {
            return;
        }
        let t = &self.tuning;
        let p = &mut self.player;

        // Lateral: friction, speed cap, then keep the player on the track
        p.vx = (p.vx * t.friction).clamp(-t.max_lateral_speed, t.max_lateral_speed);
        let limit = t.lateral_limit();
        p.x = (p.x + p.vx).clamp(-limit, limit);

        // Vertical
        if p.jump_requested && !p.airborne {
            p.vy = t.jump_velocity;
            p.airborne = true;
        }
        p.jump_requested = false;

        if p.airborne {
            p.y += p.vy;
            p.vy -= t.gravity;
            if p.y <= p.resting_height {
                p.y = p.resting_height;
                p.vy = 0.0;
                p.airborne = false;
            }
        }

        p.z += p.forward_speed;
        self.distance += f64::from(p.forward_speed);
        self.score = self.distance * f64::from(t.score_rate);
        self.ticks += 1;
    }

    /// Enter the terminal game-over state
    pub fn end_run(&mut self, cause: GameOverCause) {
        if self.game_over.is_none() {
            self.game_over = Some(cause);
        }
    }

    /// Restore initial kinematics and counters
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        self.distance = 0.0;
        self.score = 0.0;
        self.coins = 0;
        self.game_over = None;
        self.ticks = 0;
    }
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A track object was created or destroyed
    Track(TrackEvent),
    GameOver { cause: GameOverCause, score: u64 },
    Reset,
}

/// What the display layer shows each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub distance: f64,
    /// Forward speed in units per second
    pub speed: f32,
    pub coins: u32,
    pub game_over: Option<String>,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub runner: RunnerState,
    pub track: TrackGenerator,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            tuning,
            runner: RunnerState::new(tuning),
            track: TrackGenerator::new(tuning, seed),
            events: Vec::new(),
        };
        // Track under and ahead of the player before the first tick
        state.track.extend(state.runner.player.z);
        state.flush_track_events();
        log::info!("Run started with seed {}", seed);
        state
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.runner.is_game_over()
    }

    /// Longitudinal position of the camera
    #[inline]
    pub fn viewpoint_z(&self) -> f32 {
        self.runner.player.z - self.tuning.camera_distance
    }

    /// End the run; later ticks are no-ops until `reset`
    pub fn end_run(&mut self, cause: GameOverCause) {
        if self.runner.is_game_over() {
            return;
        }
        self.runner.end_run(cause);
        let score = self.score();
        log::info!(
            "Game over at z={:.1}: {} (score {})",
            self.runner.player.z,
            cause.message(),
            score
        );
        self.events.push(GameEvent::GameOver { cause, score });
    }

    /// Start a fresh run on a new stretch of the same RNG stream
    pub fn reset(&mut self) {
        self.runner.reset();
        self.track.reset();
        self.track.extend(self.runner.player.z);
        self.flush_track_events();
        self.events.push(GameEvent::Reset);
        log::info!("Run reset");
    }

    /// Whole-point score for display
    pub fn score(&self) -> u64 {
        self.runner.score.floor() as u64
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score(),
            distance: self.runner.distance,
            speed: self.runner.player.forward_speed * SIM_HZ as f32,
            coins: self.runner.coins,
            game_over: self.runner.game_over.map(|c| c.message().to_string()),
        }
    }

    /// Move queued track lifecycle events into the game event queue
    pub(crate) fn flush_track_events(&mut self) {
        self.events
            .extend(self.track.drain_events().into_iter().map(GameEvent::Track));
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.flush_track_events();
        std::mem::take(&mut self.events)
    }
}
