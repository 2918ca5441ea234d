//! Track Runner - an endless-runner game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, track generation, collisions)
//! - `tuning`: Data-driven game balance
//! - `clock`: Fixed timestep driver for variable frame rates
//! - `highscores`: Leaderboard of finished runs
//! - `web`: wasm-bindgen facade for the browser presentation layer

pub mod clock;
pub mod highscores;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::FixedStep;
pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate; all tuning values are expressed per tick at this rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta accepted before clamping (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
