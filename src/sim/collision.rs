//! Collision detection between the player and live track objects

use super::state::{GameOverCause, Player};
use super::track::{ObjectKind, SegmentKind, TrackObject};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Player is supported (or airborne) and touching no obstacle
    Ok,
    /// Player's volume touches an obstacle
    Crashed,
    /// Player is at resting height with no solid surface beneath
    FellInGap,
}

impl Outcome {
    /// Terminal cause, if this outcome ends the run
    pub fn cause(&self) -> Option<GameOverCause> {
        match self {
            Outcome::Ok => None,
            Outcome::Crashed => Some(GameOverCause::Crashed),
            Outcome::FellInGap => Some(GameOverCause::FellInGap),
        }
    }
}

impl From<GameOverCause> for Outcome {
    fn from(cause: GameOverCause) -> Self {
        match cause {
            GameOverCause::Crashed => Outcome::Crashed,
            GameOverCause::FellInGap => Outcome::FellInGap,
        }
    }
}

/// Check the player against every live object.
///
/// A solid segment supports the player only while they are within
/// `ground_tolerance` of resting height; the support probe is the player's
/// box lowered by the same tolerance. Obstacle contact wins over support.
pub fn check_player(player: &Player, objects: &[TrackObject], ground_tolerance: f32) -> Outcome {
    let body = player.bounds();
    let probe = body.extended_down(ground_tolerance);
    let near_ground = player.y <= player.resting_height + ground_tolerance;

    let mut on_track = false;
    for object in objects {
        match object.kind {
            ObjectKind::Obstacle => {
                if body.intersects(&object.bounds) {
                    return Outcome::Crashed;
                }
            }
            ObjectKind::Segment(SegmentKind::Solid) => {
                if near_ground && !on_track && probe.intersects(&object.bounds) {
                    on_track = true;
                }
            }
            // Gaps have no geometry
            ObjectKind::Segment(SegmentKind::Gap) => {}
        }
    }

    if !on_track && player.y <= player.resting_height && !player.airborne {
        Outcome::FellInGap
    } else {
        Outcome::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aabb::Aabb;
    use crate::tuning::Tuning;
    use glam::Vec3;

    fn segment(id: u32, kind: SegmentKind, start_z: f32, end_z: f32) -> TrackObject {
        TrackObject {
            id,
            segment_id: id,
            kind: ObjectKind::Segment(kind),
            bounds: Aabb::new(Vec3::new(-3.0, -0.5, start_z), Vec3::new(3.0, 0.0, end_z)),
        }
    }

    fn obstacle(id: u32, segment_id: u32, x: f32, z: f32) -> TrackObject {
        TrackObject {
            id,
            segment_id,
            kind: ObjectKind::Obstacle,
            bounds: Aabb::from_center(Vec3::new(x, 0.5, z), Vec3::splat(0.5)),
        }
    }

    fn player_at(z: f32) -> Player {
        let mut player = Player::new(&Tuning::default());
        player.z = z;
        player
    }

    #[test]
    fn test_on_solid_segment_is_ok() {
        let objects = [segment(1, SegmentKind::Solid, -10.0, 10.0)];
        assert_eq!(check_player(&player_at(0.0), &objects, 0.05), Outcome::Ok);
    }

    #[test]
    fn test_exact_obstacle_overlap_crashes() {
        let player = player_at(5.0);
        let objects = [
            segment(1, SegmentKind::Solid, -10.0, 10.0),
            TrackObject {
                id: 2,
                segment_id: 1,
                kind: ObjectKind::Obstacle,
                bounds: player.bounds(),
            },
        ];
        assert_eq!(check_player(&player, &objects, 0.05), Outcome::Crashed);
    }

    #[test]
    fn test_obstacle_beside_player_is_ok() {
        let objects = [
            segment(1, SegmentKind::Solid, -10.0, 10.0),
            obstacle(2, 1, 2.0, 0.0),
        ];
        assert_eq!(check_player(&player_at(0.0), &objects, 0.05), Outcome::Ok);
    }

    #[test]
    fn test_no_surface_falls() {
        let objects = [
            segment(1, SegmentKind::Solid, -10.0, 0.0),
            segment(2, SegmentKind::Gap, 0.0, 4.0),
            segment(3, SegmentKind::Solid, 4.0, 20.0),
        ];
        assert_eq!(check_player(&player_at(2.0), &objects, 0.05), Outcome::FellInGap);
        assert_eq!(check_player(&player_at(2.0), &[], 0.05), Outcome::FellInGap);
    }

    #[test]
    fn test_partial_support_keeps_player_up() {
        // Player spans z 0.0..1.0; the solid segment ends at 0.2
        let objects = [
            segment(1, SegmentKind::Solid, -10.0, 0.2),
            segment(2, SegmentKind::Gap, 0.2, 4.0),
        ];
        assert_eq!(check_player(&player_at(0.5), &objects, 0.05), Outcome::Ok);
    }

    #[test]
    fn test_airborne_over_gap_is_ok() {
        let objects = [segment(1, SegmentKind::Gap, 0.0, 4.0)];
        let mut player = player_at(2.0);
        player.airborne = true;
        player.y = 1.5;
        assert_eq!(check_player(&player, &objects, 0.05), Outcome::Ok);
    }

    #[test]
    fn test_jumping_over_obstacle_is_ok() {
        let objects = [
            segment(1, SegmentKind::Solid, -10.0, 10.0),
            obstacle(2, 1, 0.0, 0.0),
        ];
        let mut player = player_at(0.0);
        player.airborne = true;
        player.y = 2.0;
        assert_eq!(check_player(&player, &objects, 0.05), Outcome::Ok);
    }

    #[test]
    fn test_outcome_cause_roundtrip() {
        assert_eq!(Outcome::Ok.cause(), None);
        for outcome in [Outcome::Crashed, Outcome::FellInGap] {
            let cause = outcome.cause().unwrap();
            assert_eq!(Outcome::from(cause), outcome);
        }
    }
}
