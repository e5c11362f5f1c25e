//! Fire-rate gating.
//!
//! [`FireController`] counts time while fire is held and releases one batch of
//! [`SpawnRequest`]s, one per spawn point of the active entry, each time the
//! accumulator reaches the fire interval.

use super::fire_points::FirePointEntry;
use crate::constants::FALLBACK_SHOTS_PER_SECOND;
use bevy::prelude::*;

/// Request to create one projectile, written as a message for
/// [`crate::projectile::spawn_projectile_system`].
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// World-space spawn position.
    pub position: Vec2,
    /// World-space orientation; the projectile travels along its local +Y.
    pub rotation: Quat,
}

/// Convert a shots-per-second setting into seconds between batches.
///
/// Zero, negative, and non-finite rates fall back to
/// [`FALLBACK_SHOTS_PER_SECOND`].
#[inline]
pub fn fire_interval(shots_per_second: f32) -> f32 {
    let rate = if shots_per_second.is_finite() && shots_per_second > 0.0 {
        shots_per_second
    } else {
        FALLBACK_SHOTS_PER_SECOND
    };
    1.0 / rate
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireController {
    interval: f32,
    /// Seconds accumulated toward the next batch.
    since_last_shot: f32,
}

impl FireController {
    /// The accumulator starts full so the first held-fire tick shoots immediately.
    pub fn new(shots_per_second: f32) -> Self {
        let interval = fire_interval(shots_per_second);
        Self {
            interval,
            since_last_shot: interval,
        }
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    #[inline]
    pub fn since_last_shot(&self) -> f32 {
        self.since_last_shot
    }

    /// Change the rate without disturbing the accumulator.
    pub fn set_shots_per_second(&mut self, shots_per_second: f32) {
        self.interval = fire_interval(shots_per_second);
    }

    /// Advance by `dt` and append any spawn requests to `out`.
    ///
    /// At most one batch is released per call; the accumulator resets to zero,
    /// not to the overshoot.  Returns the number of requests appended.
    pub fn tick(
        &mut self,
        dt: f32,
        fire_held: bool,
        entry: Option<&FirePointEntry>,
        ship_position: Vec2,
        out: &mut Vec<SpawnRequest>,
    ) -> usize {
        if !fire_held {
            return 0;
        }

        self.since_last_shot += dt;
        if self.since_last_shot < self.interval {
            return 0;
        }
        self.since_last_shot = 0.0;

        let Some(entry) = entry else {
            return 0;
        };
        let before = out.len();
        out.extend(entry.spawn_points.iter().map(|point| SpawnRequest {
            position: ship_position + point.offset(),
            rotation: point.spawn_rotation(),
        }));
        out.len() - before
    }
}
