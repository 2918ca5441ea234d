//! Data-driven game balance
//!
//! Every gameplay constant lives here, in per-tick units at [`crate::consts::SIM_HZ`].
//! Tuning can be loaded from JSON (LocalStorage on web); missing fields fall back
//! to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Game balance parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player kinematics ===
    /// Forward distance covered each tick (constant per run)
    pub forward_speed: f32,
    /// Lateral acceleration while a steer key is held
    pub steer_accel: f32,
    /// Lateral velocity multiplier applied every tick (< 1)
    pub friction: f32,
    /// Lateral speed cap
    pub max_lateral_speed: f32,
    /// Vertical velocity given on jump
    pub jump_velocity: f32,
    /// Vertical velocity lost per tick while airborne
    pub gravity: f32,
    /// Edge length of the player's cube
    pub player_size: f32,

    // === Track geometry ===
    pub track_width: f32,
    pub track_thickness: f32,
    /// Score gained per unit of forward distance
    pub score_rate: f32,
    /// Track must always exist this far ahead of the player
    pub lookahead: f32,
    /// Segments ending this far behind the viewpoint are retired
    pub trailing_cutoff: f32,
    /// Viewpoint sits this far behind the player
    pub camera_distance: f32,
    pub segment_min_length: f32,
    pub segment_max_length: f32,
    pub gap_min_length: f32,
    pub gap_max_length: f32,
    /// Probability a new segment is a gap
    pub gap_chance: f32,
    /// Probability a solid segment receives obstacles
    pub obstacle_chance: f32,
    pub max_obstacles: u32,
    pub obstacle_size: f32,
    /// Minimum clearance between an obstacle and the track edge
    pub obstacle_edge_inset: f32,
    /// Length of the obstacle-free opening segment
    pub runway_length: f32,
    /// Where the runway begins (behind the camera)
    pub track_start_z: f32,
    /// How far above resting height the player still counts as grounded
    pub ground_tolerance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            forward_speed: 0.3,
            steer_accel: 0.02,
            friction: 0.9,
            max_lateral_speed: 0.2,
            // 0.25 up, 1/64 down: lands exactly 33 ticks after takeoff
            jump_velocity: 0.25,
            gravity: 0.015625,
            player_size: 1.0,

            track_width: 6.0,
            track_thickness: 0.5,
            score_rate: 0.1,
            lookahead: 120.0,
            trailing_cutoff: 20.0,
            camera_distance: 6.0,
            segment_min_length: 8.0,
            segment_max_length: 20.0,
            gap_min_length: 2.0,
            gap_max_length: 4.0,
            gap_chance: 0.2,
            obstacle_chance: 0.5,
            max_obstacles: 3,
            obstacle_size: 1.0,
            obstacle_edge_inset: 0.25,
            runway_length: 40.0,
            track_start_z: -30.0,
            ground_tolerance: 0.05,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "track_runner_tuning";

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject parameter sets the generator or physics cannot honor
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            (self.forward_speed, "forward_speed must be positive"),
            (self.jump_velocity, "jump_velocity must be positive"),
            (self.gravity, "gravity must be positive"),
            (self.player_size, "player_size must be positive"),
            (self.track_width, "track_width must be positive"),
            (self.track_thickness, "track_thickness must be positive"),
            (self.lookahead, "lookahead must be positive"),
            (self.segment_min_length, "segment_min_length must be positive"),
            (self.gap_min_length, "gap_min_length must be positive"),
            (self.obstacle_size, "obstacle_size must be positive"),
            (self.runway_length, "runway_length must be positive"),
        ];
        for (value, msg) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid(msg));
            }
        }

        if self.steer_accel < 0.0 || self.max_lateral_speed < 0.0 {
            return Err(TuningError::Invalid("steering parameters must not be negative"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(TuningError::Invalid("friction must be in (0, 1]"));
        }
        if self.trailing_cutoff < 0.0 || self.camera_distance < 0.0 || self.ground_tolerance < 0.0 {
            return Err(TuningError::Invalid("distances must not be negative"));
        }
        if self.segment_max_length < self.segment_min_length {
            return Err(TuningError::Invalid("segment length range is inverted"));
        }
        if self.gap_max_length < self.gap_min_length {
            return Err(TuningError::Invalid("gap length range is inverted"));
        }
        if !(0.0..=1.0).contains(&self.gap_chance) || !(0.0..=1.0).contains(&self.obstacle_chance) {
            return Err(TuningError::Invalid("chances must be in [0, 1]"));
        }
        if self.max_obstacles == 0 {
            return Err(TuningError::Invalid("max_obstacles must be at least 1"));
        }
        if self.player_size >= self.track_width {
            return Err(TuningError::Invalid("player is wider than the track"));
        }
        if self.obstacle_size / 2.0 + self.obstacle_edge_inset > self.half_width() {
            return Err(TuningError::Invalid("obstacles do not fit inside the track inset"));
        }
        if self.segment_min_length < self.obstacle_size {
            return Err(TuningError::Invalid("segments are shorter than an obstacle"));
        }
        Ok(())
    }

    /// Half the track width
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.track_width / 2.0
    }

    /// Furthest the player's center may move from the track centerline
    #[inline]
    pub fn lateral_limit(&self) -> f32 {
        self.half_width() - self.player_size / 2.0
    }

    /// Player center height when standing on the track surface (y = 0)
    #[inline]
    pub fn resting_height(&self) -> f32 {
        self.player_size / 2.0
    }

    /// Furthest an obstacle's center may sit from the centerline
    #[inline]
    pub fn obstacle_lateral_limit(&self) -> f32 {
        self.half_width() - self.obstacle_size / 2.0 - self.obstacle_edge_inset
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
