//! Idle/demo mode - the AI plays the game
//!
//! Produces the same `InputState` a player would, so demo runs go through the
//! normal tick pipeline and stay deterministic.
//!
//! Each tick a small set of input scripts (steer for a while, jump now or a
//! little later) is rolled forward on a copy of the runner against the live
//! track. The script that survives longest wins, with ties going to the one
//! that does least and ends nearest the centerline, then to the earliest
//! takeoff. Only its first input is used; the search runs again next tick.

use super::collision::{Outcome, check_player};
use super::state::{Player, RunnerState};
use super::tick::InputState;
use super::track::{TrackObject, TrackSegment};
use crate::tuning::Tuning;

/// Steering durations tried, in ticks (`None` holds the key for the whole rollout)
const STEER_TICKS: [Option<u32>; 3] = [Some(4), Some(12), None];
/// Latest tick offset at which a jump is tried; every earlier offset is tried too
const MAX_JUMP_DELAY: u32 = 16;
/// Ticks simulated after a full jump arc
const LANDING_TICKS: u32 = 16;

const STEER_COST: f32 = 0.01;
const JUMP_COST: f32 = 1.0;
const OFF_CENTER_COST: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Steer {
    Straight,
    Left(Option<u32>),
    Right(Option<u32>),
}

/// One input script for the rollout
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    steer: Steer,
    jump_at: Option<u32>,
}

impl Candidate {
    fn input_at(&self, tick: u32) -> InputState {
        let held = |ticks: Option<u32>| ticks.is_none_or(|n| tick < n);
        let (steer_left, steer_right) = match self.steer {
            Steer::Straight => (false, false),
            Steer::Left(ticks) => (held(ticks), false),
            Steer::Right(ticks) => (false, held(ticks)),
        };
        InputState {
            steer_left,
            steer_right,
            jump: self.jump_at == Some(tick),
        }
    }

    /// Cost of the script's inputs alone
    fn effort(&self, horizon: u32) -> f32 {
        let steer_ticks = match self.steer {
            Steer::Straight => 0,
            Steer::Left(ticks) | Steer::Right(ticks) => ticks.map_or(horizon, |n| n.min(horizon)),
        };
        let jump = if self.jump_at.is_some() { JUMP_COST } else { 0.0 };
        STEER_COST * steer_ticks as f32 + jump
    }
}

fn candidates() -> impl Iterator<Item = Candidate> {
    let steers = std::iter::once(Steer::Straight)
        .chain(STEER_TICKS.into_iter().map(Steer::Left))
        .chain(STEER_TICKS.into_iter().map(Steer::Right));
    steers.flat_map(|steer| {
        std::iter::once(None)
            .chain((0..=MAX_JUMP_DELAY).map(Some))
            .map(move |jump_at| Candidate { steer, jump_at })
    })
}

/// Ticks from takeoff to landing
pub fn airtime_ticks(tuning: &Tuning) -> u32 {
    (2.0 * tuning.jump_velocity / tuning.gravity).floor() as u32 + 1
}

struct Rollout {
    /// Ticks completed before the run would have ended
    survived: u32,
    end_x: f32,
}

fn simulate(
    candidate: &Candidate,
    player: &Player,
    objects: &[TrackObject],
    tuning: &Tuning,
    horizon: u32,
) -> Rollout {
    let mut runner = RunnerState::new(*tuning);
    runner.player = *player;
    for tick in 0..horizon {
        runner.apply_input(&candidate.input_at(tick));
        runner.tick();
        if check_player(&runner.player, objects, tuning.ground_tolerance) != Outcome::Ok {
            return Rollout {
                survived: tick,
                end_x: runner.player.x,
            };
        }
    }
    Rollout {
        survived: horizon,
        end_x: runner.player.x,
    }
}

/// Plan input for the next tick from the live track
pub fn plan(player: &Player, segments: &[TrackSegment], tuning: &Tuning) -> InputState {
    let horizon = airtime_ticks(tuning) + LANDING_TICKS;
    let reach = player.z + horizon as f32 * player.forward_speed + player.size;
    let objects: Vec<TrackObject> = segments
        .iter()
        .filter(|s| s.end_z >= player.z - player.size && s.start_z <= reach)
        .flat_map(|s| s.objects(tuning.track_thickness))
        .collect();

    let mut best: Option<(u32, f32, Candidate)> = None;
    for candidate in candidates() {
        let effort = candidate.effort(horizon);
        if let Some((survived, cost, _)) = best {
            // Cannot beat a full survivor that is already cheaper
            if survived == horizon && effort >= cost {
                continue;
            }
        }

        let rollout = simulate(&candidate, player, &objects, tuning, horizon);
        let cost = effort + OFF_CENTER_COST * rollout.end_x.abs();
        let better = match best {
            None => true,
            Some((survived, best_cost, _)) => {
                rollout.survived > survived || (rollout.survived == survived && cost < best_cost)
            }
        };
        if better {
            best = Some((rollout.survived, cost, candidate));
        }
    }

    best.map(|(_, _, c)| c.input_at(0)).unwrap_or_default()
}
