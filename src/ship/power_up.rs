//! Power-up level and the state machine that tracks the active fire pattern.

use super::fire_points::{FirePointEntry, FirePointTable};
use crate::constants::POWER_UP_LEVELS;
use bevy::prelude::*;

/// Bounded power-up level in `0..=PowerUpLevel::MAX`.
///
/// Construction clamps, and the only way to move between levels is the
/// saturating step methods, so an out-of-range level cannot be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PowerUpLevel(u8);

impl PowerUpLevel {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(POWER_UP_LEVELS - 1);

    #[inline]
    pub fn new(level: u8) -> Self {
        Self(level.min(Self::MAX.0))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// One level up, or unchanged at [`Self::MAX`].
    #[inline]
    pub fn saturating_increment(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// One level down, or unchanged at [`Self::MIN`].
    #[inline]
    pub fn saturating_decrement(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Every valid level in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }
}

/// Current power-up level plus the fire-point entry it selects.
///
/// `increment` / `decrement` are the only mutators.  Both re-resolve the active
/// entry even when the level is already at a bound.
#[derive(Debug, Clone)]
pub struct PowerUpStateMachine {
    level: PowerUpLevel,
    table: FirePointTable,
    active: Option<usize>,
}

impl PowerUpStateMachine {
    /// Start at level 0.  A missing entry for the starting level is not logged
    /// here; [`FirePointTable::validate`] has already reported it.
    pub fn new(table: FirePointTable) -> Self {
        Self::with_level(table, PowerUpLevel::MIN)
    }

    pub fn with_level(table: FirePointTable, level: PowerUpLevel) -> Self {
        let active = table.resolve(level).ok();
        Self {
            level,
            table,
            active,
        }
    }

    #[inline]
    pub fn level(&self) -> PowerUpLevel {
        self.level
    }

    pub fn active_entry(&self) -> Option<&FirePointEntry> {
        self.active.and_then(|idx| self.table.entry(idx))
    }

    pub fn increment(&mut self) {
        self.transition(self.level.saturating_increment());
    }

    pub fn decrement(&mut self) {
        self.transition(self.level.saturating_decrement());
    }

    fn transition(&mut self, next: PowerUpLevel) {
        if next != self.level {
            debug!("[power-up] level {} -> {}", self.level.get(), next.get());
        }
        self.level = next;
        self.active = match self.table.resolve(next) {
            Ok(idx) => Some(idx),
            Err(e) => {
                error!("[power-up] {e}");
                None
            }
        };
    }
}
