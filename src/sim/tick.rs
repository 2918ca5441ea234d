//! Fixed timestep simulation tick
//!
//! One tick runs to completion: input → physics → spawn → collision → retire.

use serde::{Deserialize, Serialize};

use super::collision::{Outcome, check_player};
use super::state::GameState;

/// Input held during a single tick (deterministic snapshot)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub steer_left: bool,
    pub steer_right: bool,
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &InputState) -> Outcome {
    // Game over is terminal until reset
    if let Some(cause) = state.runner.game_over {
        return cause.into();
    }

    state.runner.apply_input(input);
    state.runner.tick();

    state.track.extend(state.runner.player.z);

    let outcome = check_player(
        &state.runner.player,
        state.track.objects(),
        state.tuning.ground_tolerance,
    );

    match outcome.cause() {
        Some(cause) => state.end_run(cause),
        None => {
            let viewpoint = state.viewpoint_z();
            state.track.retire(viewpoint);
        }
    }

    state.flush_track_events();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameEvent, GameOverCause};
    use crate::sim::track::TrackEvent;
    use crate::tuning::Tuning;

    /// Tuning with an empty track after the runway
    fn no_gaps_no_obstacles() -> Tuning {
        Tuning {
            gap_chance: 0.0,
            obstacle_chance: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_clear_track_survives() {
        let mut state = GameState::with_tuning(7, no_gaps_no_obstacles());
        for _ in 0..5000 {
            assert_eq!(tick(&mut state, &InputState::default()), Outcome::Ok);
        }
        assert!(!state.is_game_over());
        assert!(state.score() > 0);
    }

    #[test]
    fn test_live_set_stays_bounded() {
        let tuning = no_gaps_no_obstacles();
        let mut state = GameState::with_tuning(7, tuning);
        // One partial segment may hang off each end of the live window
        let window = tuning.lookahead
            + tuning.camera_distance
            + tuning.trailing_cutoff
            + 2.0 * tuning.segment_max_length.max(tuning.runway_length);
        let bound = (window / tuning.segment_min_length) as usize + 2;
        for _ in 0..10_000 {
            tick(&mut state, &InputState::default());
            assert!(state.track.segments().len() <= bound);
            assert!(state.track.frontier() >= state.runner.player.z + tuning.lookahead);
        }
    }

    #[test]
    fn test_gap_only_track_ends_in_fall() {
        // After the runway every segment is a gap or a solid; the first gap kills
        let tuning = Tuning {
            gap_chance: 1.0,
            obstacle_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(11, tuning);
        let mut outcome = Outcome::Ok;
        for _ in 0..1000 {
            outcome = tick(&mut state, &InputState::default());
            if outcome != Outcome::Ok {
                break;
            }
        }
        assert_eq!(outcome, Outcome::FellInGap);
        assert_eq!(state.runner.game_over, Some(GameOverCause::FellInGap));
        // Fell just past the runway
        let runway_end = tuning.track_start_z + tuning.runway_length;
        assert!(state.runner.player.z > runway_end);
    }

    #[test]
    fn test_obstacle_ahead_crashes_and_skips_retire() {
        let tuning = no_gaps_no_obstacles();
        let mut state = GameState::with_tuning(13, tuning);
        let runway = state.track.segments()[0].clone();

        // Run up to the tick on which the runway would fall behind the cutoff
        let mut guard = 0;
        loop {
            let z = state.runner.player.z;
            let next_viewpoint = z + state.runner.player.forward_speed - tuning.camera_distance;
            if state.track.is_behind(runway.end_z, next_viewpoint) {
                break;
            }
            assert_eq!(tick(&mut state, &InputState::default()), Outcome::Ok);
            guard += 1;
            assert!(guard < 1000, "runway never reached the cutoff");
        }

        let player = state.runner.player;
        assert!(
            state
                .track
                .insert_obstacle(player.x, player.z + player.size)
                .is_some()
        );
        state.drain_events();

        assert_eq!(tick(&mut state, &InputState::default()), Outcome::Crashed);
        assert_eq!(state.runner.game_over, Some(GameOverCause::Crashed));

        let events = state.drain_events();
        let game_overs = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::GameOver {
                        cause: GameOverCause::Crashed,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(game_overs, 1);
        let retired = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Track(TrackEvent::Retired { .. })))
            .count();
        assert_eq!(retired, 0);

        // The crash tick left stale track in place
        assert_eq!(state.track.segments()[0].id, runway.id);
        assert!(state.track.is_behind(runway.end_z, state.viewpoint_z()));
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = GameState::with_tuning(5, no_gaps_no_obstacles());
        tick(&mut state, &InputState::default());
        state.end_run(GameOverCause::Crashed);
        state.drain_events();

        let z = state.runner.player.z;
        let frontier = state.track.frontier();
        let held = InputState {
            steer_left: true,
            steer_right: false,
            jump: true,
        };
        for _ in 0..50 {
            assert_eq!(tick(&mut state, &held), Outcome::Crashed);
        }
        assert_eq!(state.runner.player.z, z);
        assert_eq!(state.track.frontier(), frontier);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_reset_after_game_over_restarts() {
        let mut state = GameState::with_tuning(5, no_gaps_no_obstacles());
        for _ in 0..200 {
            tick(&mut state, &InputState::default());
        }
        state.end_run(GameOverCause::FellInGap);
        state.reset();
        assert_eq!(state.score(), 0);
        assert_eq!(state.runner.player.z, 0.0);
        assert_eq!(tick(&mut state, &InputState::default()), Outcome::Ok);
    }

    #[test]
    fn test_retire_events_flow_out() {
        let mut state = GameState::with_tuning(9, no_gaps_no_obstacles());
        state.drain_events();
        let mut retired = 0;
        for _ in 0..2000 {
            tick(&mut state, &InputState::default());
            retired += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::Track(TrackEvent::Retired { .. })))
                .count();
        }
        assert!(retired > 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            InputState {
                steer_left: true,
                ..Default::default()
            },
            InputState {
                jump: true,
                ..Default::default()
            },
            InputState {
                steer_right: true,
                ..Default::default()
            },
            InputState::default(),
        ];

        for i in 0..400 {
            let input = &inputs[i % inputs.len()];
            let a = tick(&mut state1, input);
            let b = tick(&mut state2, input);
            assert_eq!(a, b);
        }

        assert_eq!(state1.runner.player, state2.runner.player);
        assert_eq!(state1.track.segments(), state2.track.segments());
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
