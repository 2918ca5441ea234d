//! Procedural track generation
//!
//! Track is laid down just-in-time in a window ahead of the player and
//! discarded once it scrolls behind the viewpoint, so the live set (and the
//! per-tick collision cost) stays roughly constant over an arbitrarily long run.

use std::collections::HashSet;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::tuning::Tuning;

/// Whether a segment has a surface to stand on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Solid,
    Gap,
}

/// An obstacle sitting on a solid segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Lateral offset of the center
    pub x: f32,
    /// Longitudinal position of the center
    pub z: f32,
    /// Edge length (obstacles are cubes resting on the surface)
    pub size: f32,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        let half = self.size / 2.0;
        Aabb::from_center(Vec3::new(self.x, half, self.z), Vec3::splat(half))
    }
}

/// A stretch of track between two longitudinal coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub id: u32,
    pub start_z: f32,
    pub end_z: f32,
    pub kind: SegmentKind,
    pub width: f32,
    /// Obstacles spawned with (and retired with) this segment
    pub obstacles: Vec<Obstacle>,
}

impl TrackSegment {
    #[inline]
    pub fn length(&self) -> f32 {
        self.end_z - self.start_z
    }

    #[inline]
    pub fn contains_z(&self, z: f32) -> bool {
        z >= self.start_z && z <= self.end_z
    }

    /// Surface slab: top face at y = 0
    pub fn bounds(&self, thickness: f32) -> Aabb {
        let half_width = self.width / 2.0;
        Aabb::new(
            Vec3::new(-half_width, -thickness, self.start_z),
            Vec3::new(half_width, 0.0, self.end_z),
        )
    }

    /// The segment's slab followed by its obstacles, tagged for the live set
    pub fn objects(&self, thickness: f32) -> impl Iterator<Item = TrackObject> + '_ {
        let segment_id = self.id;
        let slab = TrackObject {
            id: segment_id,
            segment_id,
            kind: ObjectKind::Segment(self.kind),
            bounds: self.bounds(thickness),
        };
        std::iter::once(slab).chain(self.obstacles.iter().map(move |o| TrackObject {
            id: o.id,
            segment_id,
            kind: ObjectKind::Obstacle,
            bounds: o.bounds(),
        }))
    }
}

/// Collision/render tag carried alongside each live object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Segment(SegmentKind),
    Obstacle,
}

/// Flattened view of a live segment or obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: u32,
    /// Owning segment (its own id for segments)
    pub segment_id: u32,
    pub kind: ObjectKind,
    pub bounds: Aabb,
}

/// Lifecycle notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackEvent {
    Spawned(TrackObject),
    Retired { id: u32 },
}

/// Owns the live segment/obstacle collection
#[derive(Debug, Clone)]
pub struct TrackGenerator {
    tuning: Tuning,
    rng: Pcg32,
    /// Longitudinal coordinate up to which track exists
    frontier: f32,
    /// Live segments ordered by `start_z`
    segments: Vec<TrackSegment>,
    /// Live segments and obstacles, in spawn order
    objects: Vec<TrackObject>,
    events: Vec<TrackEvent>,
    runway_placed: bool,
    next_id: u32,
}

impl TrackGenerator {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            frontier: tuning.track_start_z,
            segments: Vec::new(),
            objects: Vec::new(),
            events: Vec::new(),
            runway_placed: false,
            next_id: 1,
        }
    }

    #[inline]
    pub fn frontier(&self) -> f32 {
        self.frontier
    }

    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    pub fn objects(&self) -> &[TrackObject] {
        &self.objects
    }

    /// Segment covering longitudinal position `z`, if any is live
    pub fn segment_at(&self, z: f32) -> Option<&TrackSegment> {
        self.segments.iter().find(|s| s.contains_z(z))
    }

    /// Take all queued spawn/retire events
    pub fn drain_events(&mut self) -> Vec<TrackEvent> {
        std::mem::take(&mut self.events)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn segments until the frontier is at least `lookahead` ahead of `player_z`.
    ///
    /// Returns the number of segments spawned; a repeated call with the same
    /// `player_z` spawns nothing.
    pub fn extend(&mut self, player_z: f32) -> usize {
        let target = player_z + self.tuning.lookahead;
        let mut spawned = 0;
        while self.frontier < target {
            self.spawn_segment();
            spawned += 1;
        }
        if spawned > 0 {
            log::debug!(
                "Spawned {} segments, frontier now {:.1} ({} live objects)",
                spawned,
                self.frontier,
                self.objects.len()
            );
        }
        spawned
    }

    fn spawn_segment(&mut self) {
        let t = self.tuning;
        let start_z = self.frontier;
        let previous_was_gap = self
            .segments
            .last()
            .is_some_and(|s| s.kind == SegmentKind::Gap);

        let (kind, length, allow_obstacles) = if !self.runway_placed {
            self.runway_placed = true;
            (SegmentKind::Solid, t.runway_length, false)
        } else if !previous_was_gap && self.rng.random_bool(t.gap_chance as f64) {
            let length = self.rng.random_range(t.gap_min_length..=t.gap_max_length);
            (SegmentKind::Gap, length, false)
        } else {
            let length = self
                .rng
                .random_range(t.segment_min_length..=t.segment_max_length);
            (SegmentKind::Solid, length, true)
        };

        let id = self.next_entity_id();
        let mut segment = TrackSegment {
            id,
            start_z,
            end_z: start_z + length,
            kind,
            width: t.track_width,
            obstacles: Vec::new(),
        };

        if allow_obstacles && self.rng.random_bool(t.obstacle_chance as f64) {
            let count = self.rng.random_range(1..=t.max_obstacles);
            let lateral = t.obstacle_lateral_limit();
            let half = t.obstacle_size / 2.0;
            for _ in 0..count {
                let obstacle = Obstacle {
                    id: self.next_entity_id(),
                    x: self.rng.random_range(-lateral..=lateral),
                    z: self
                        .rng
                        .random_range(segment.start_z + half..=segment.end_z - half),
                    size: t.obstacle_size,
                };
                segment.obstacles.push(obstacle);
            }
        }

        self.frontier = segment.end_z;
        for object in segment.objects(t.track_thickness) {
            self.objects.push(object);
            self.events.push(TrackEvent::Spawned(object));
        }
        self.segments.push(segment);
    }

    /// Whether a segment ending at `end_z` has scrolled past the trailing cutoff
    #[inline]
    pub fn is_behind(&self, end_z: f32, viewpoint_z: f32) -> bool {
        end_z < viewpoint_z - self.tuning.trailing_cutoff
    }

    /// Remove segments past the trailing cutoff, together with their obstacles.
    ///
    /// Linear in the live set however many segments go at once.
    /// Returns the number of objects removed.
    pub fn retire(&mut self, viewpoint_z: f32) -> usize {
        // Same predicate as `is_behind`
        let cutoff = viewpoint_z - self.tuning.trailing_cutoff;
        let mut retired_segments = HashSet::new();
        self.segments.retain(|s| {
            if s.end_z < cutoff {
                retired_segments.insert(s.id);
                false
            } else {
                true
            }
        });
        if retired_segments.is_empty() {
            return 0;
        }

        let before = self.objects.len();
        let events = &mut self.events;
        self.objects.retain(|o| {
            let keep = !retired_segments.contains(&o.segment_id);
            if !keep {
                events.push(TrackEvent::Retired { id: o.id });
            }
            keep
        });
        let removed = before - self.objects.len();
        log::debug!(
            "Retired {} segments ({} objects) behind z={:.1}",
            retired_segments.len(),
            removed,
            viewpoint_z
        );
        removed
    }

    /// Place an extra obstacle on the live segment covering `z`
    #[cfg(test)]
    pub(crate) fn insert_obstacle(&mut self, x: f32, z: f32) -> Option<u32> {
        let obstacle = Obstacle {
            id: self.next_entity_id(),
            x,
            z,
            size: self.tuning.obstacle_size,
        };
        let segment = self.segments.iter_mut().find(|s| s.contains_z(z))?;
        segment.obstacles.push(obstacle);
        let object = TrackObject {
            id: obstacle.id,
            segment_id: segment.id,
            kind: ObjectKind::Obstacle,
            bounds: obstacle.bounds(),
        };
        self.objects.push(object);
        self.events.push(TrackEvent::Spawned(object));
        Some(obstacle.id)
    }

    /// Drop all live track and rewind the frontier; the RNG stream continues
    pub fn reset(&mut self) {
        for object in self.objects.drain(..) {
            self.events.push(TrackEvent::Retired { id: object.id });
        }
        self.segments.clear();
        self.frontier = self.tuning.track_start_z;
        self.runway_placed = false;
    }
}
