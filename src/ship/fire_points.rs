//! Fire-point configuration: which spawn points fire on which power-up level.
//!
//! The table is tiny (one entry per level, five levels), so lookup is a plain
//! linear scan in declaration order.

use super::power_up::PowerUpLevel;
use crate::constants::{FIRE_POINT_NOSE_Y, FIRE_POINT_SPACING_X, FIRE_POINT_SPREAD};
use crate::error::{ConfigError, ConfigResult};
use bevy::prelude::*;
use serde::Deserialize;

/// One gun mount, relative to the ship center.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FirePoint {
    /// Local offset from the ship center.
    pub position: [f32; 2],
    /// Local orientation in radians, counter-clockwise from +Y.
    pub rotation: f32,
    /// When `true` the projectile inherits `rotation`; otherwise it flies straight up.
    pub align_to_transform: bool,
}

impl Default for FirePoint {
    fn default() -> Self {
        Self {
            position: [0.0, FIRE_POINT_NOSE_Y],
            rotation: 0.0,
            align_to_transform: true,
        }
    }
}

impl FirePoint {
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self {
            position: [x, y],
            rotation,
            align_to_transform: true,
        }
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    /// World orientation a projectile spawned here should take.
    #[inline]
    pub fn spawn_rotation(&self) -> Quat {
        if self.align_to_transform {
            Quat::from_rotation_z(self.rotation)
        } else {
            Quat::IDENTITY
        }
    }
}

/// Ordered spawn points used while the ship sits on `level`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FirePointEntry {
    pub level: u8,
    #[serde(default)]
    pub spawn_points: Vec<FirePoint>,
}

/// Every configured [`FirePointEntry`], in declaration order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FirePointTable {
    pub entries: Vec<FirePointEntry>,
}

impl FirePointTable {
    pub fn new(entries: Vec<FirePointEntry>) -> Self {
        Self { entries }
    }

    /// Index of the first entry declared for `level`.
    ///
    /// Later entries for the same level are never reached, even when the first
    /// one has no spawn points.
    pub fn resolve(&self, level: PowerUpLevel) -> ConfigResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.level == level.get())
            .ok_or(ConfigError::MissingFirePoints { level: level.get() })
    }

    pub fn entry(&self, index: usize) -> Option<&FirePointEntry> {
        self.entries.get(index)
    }

    /// Report every configuration problem, one error per problem.
    ///
    /// An empty table yields only [`ConfigError::EmptyFirePointTable`] rather
    /// than one "missing" error per level.
    pub fn validate(&self) -> Vec<ConfigError> {
        if self.entries.is_empty() {
            return vec![ConfigError::EmptyFirePointTable];
        }

        let mut errors = Vec::new();
        for entry in &self.entries {
            if entry.level > PowerUpLevel::MAX.get() {
                errors.push(ConfigError::LevelOutOfRange {
                    level: entry.level,
                    max: PowerUpLevel::MAX.get(),
                });
            } else if entry.spawn_points.is_empty() {
                errors.push(ConfigError::EmptySpawnPoints { level: entry.level });
            }
        }
        for level in PowerUpLevel::all() {
            if self.resolve(level).is_err() {
                errors.push(ConfigError::MissingFirePoints { level: level.get() });
            }
        }
        errors
    }
}

impl Default for FirePointTable {
    /// Five-level pattern: single nose gun, twin guns, then angled spread guns.
    fn default() -> Self {
        let y = FIRE_POINT_NOSE_Y;
        let dx = FIRE_POINT_SPACING_X;
        let spread = FIRE_POINT_SPREAD;
        let entry = |level, spawn_points| FirePointEntry {
            level,
            spawn_points,
        };
        Self::new(vec![
            entry(0, vec![FirePoint::new(0.0, y, 0.0)]),
            entry(
                1,
                vec![
                    FirePoint::new(-dx * 0.5, y, 0.0),
                    FirePoint::new(dx * 0.5, y, 0.0),
                ],
            ),
            entry(
                2,
                vec![
                    FirePoint::new(-dx, y - 6.0, spread),
                    FirePoint::new(0.0, y, 0.0),
                    FirePoint::new(dx, y - 6.0, -spread),
                ],
            ),
            entry(
                3,
                vec![
                    FirePoint::new(-dx * 1.5, y - 8.0, spread),
                    FirePoint::new(-dx * 0.5, y, 0.0),
                    FirePoint::new(dx * 0.5, y, 0.0),
                    FirePoint::new(dx * 1.5, y - 8.0, -spread),
                ],
            ),
            entry(
                4,
                vec![
                    FirePoint::new(-dx * 2.0, y - 10.0, spread * 2.0),
                    FirePoint::new(-dx, y - 6.0, spread),
                    FirePoint::new(0.0, y, 0.0),
                    FirePoint::new(dx, y - 6.0, -spread),
                    FirePoint::new(dx * 2.0, y - 10.0, -spread * 2.0),
                ],
            ),
        ])
    }
}
