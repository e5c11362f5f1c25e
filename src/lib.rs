//! Player ship simulation for a vertical-scrolling arcade shooter.
//!
//! Input becomes ship motion clamped to the visible play field, held fire is
//! gated by a configurable rate, a bounded power-up level picks the firing
//! pattern, and the ship banks its sprite only after sustained steering.

pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod projectile;
pub mod ship;
pub mod sprites;
