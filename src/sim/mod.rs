//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod track;

pub use aabb::Aabb;
pub use collision::{Outcome, check_player};
pub use state::{GameEvent, GameOverCause, GameState, Hud, Player, RunnerState};
pub use tick::{InputState, tick};
pub use track::{ObjectKind, Obstacle, SegmentKind, TrackEvent, TrackGenerator, TrackObject, TrackSegment};
