//! Runtime ship configuration loaded from `assets/ship.toml`.
//!
//! [`ShipConfig`] is a Bevy [`Resource`] that mirrors the constants in
//! [`crate::constants`].  At startup, [`load_ship_config`] reads
//! `assets/ship.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Example
//!
//! ```toml
//! move_speed = 280.0
//! shots_per_second = 6.0
//! default_sprite_index = 1
//!
//! [[fire_points]]
//! level = 0
//! spawn_points = [{ position = [0.0, 24.0] }]
//!
//! [[sprite_sets]]
//! left = "sprites/red_left.png"
//! center = "sprites/red_center.png"
//! right = "sprites/red_right.png"
//! ```
//!
//! Out-of-range parameters are not rejected.  [`ShipConfig::sanitized`]
//! replaces them with safe values wherever the config is consumed.

use crate::constants::*;
use crate::ship::fire_points::FirePointTable;
use bevy::prelude::*;
use serde::Deserialize;

/// Image paths for one ship variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpriteSetPaths {
    pub left: String,
    pub center: String,
    pub right: String,
}

impl Default for SpriteSetPaths {
    fn default() -> Self {
        Self {
            left: DEFAULT_SPRITE_LEFT.to_owned(),
            center: DEFAULT_SPRITE_CENTER.to_owned(),
            right: DEFAULT_SPRITE_RIGHT.to_owned(),
        }
    }
}

/// Runtime-tunable ship, fire, and projectile configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    // ── Movement ──────────────────────────────────────────────────────────────
    pub move_speed: f32,
    pub steering_delay: f32,

    // ── Firing ────────────────────────────────────────────────────────────────
    pub shots_per_second: f32,
    pub fire_points: FirePointTable,

    // ── Projectile ────────────────────────────────────────────────────────────
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_collider_radius: f32,

    // ── Sprites ───────────────────────────────────────────────────────────────
    /// Signed so that a negative value in the TOML parses and can be corrected.
    pub default_sprite_index: i64,
    pub sprite_sets: Vec<SpriteSetPaths>,

    // ── Gamepad ───────────────────────────────────────────────────────────────
    pub gamepad_deadzone: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            move_speed: SHIP_MOVE_SPEED,
            steering_delay: STEERING_DELAY,
            shots_per_second: SHOTS_PER_SECOND,
            fire_points: FirePointTable::default(),
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime: PROJECTILE_LIFETIME,
            projectile_collider_radius: PROJECTILE_COLLIDER_RADIUS,
            default_sprite_index: 0,
            sprite_sets: vec![SpriteSetPaths::default()],
            gamepad_deadzone: GAMEPAD_DEADZONE,
        }
    }
}

impl ShipConfig {
    /// Copy with every parameter error corrected:
    ///
    /// - `shots_per_second <= 0` → [`FALLBACK_SHOTS_PER_SECOND`]
    /// - `default_sprite_index < 0` → 0
    /// - negative `move_speed`, `steering_delay`, `projectile_lifetime` → 0
    /// - no `sprite_sets` → the built-in set
    ///
    /// The fire-point table is left alone; its problems are configuration
    /// errors reported by [`FirePointTable::validate`].
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        if !(out.shots_per_second.is_finite() && out.shots_per_second > 0.0) {
            out.shots_per_second = FALLBACK_SHOTS_PER_SECOND;
        }
        out.default_sprite_index = out.default_sprite_index.max(0);
        out.move_speed = out.move_speed.max(0.0);
        out.steering_delay = out.steering_delay.max(0.0);
        out.projectile_lifetime = out.projectile_lifetime.max(0.0);
        out.projectile_collider_radius = out.projectile_collider_radius.max(0.1);
        if out.sprite_sets.is_empty() {
            out.sprite_sets.push(SpriteSetPaths::default());
        }
        out
    }

    /// Seconds between spawn batches.
    #[inline]
    pub fn fire_interval(&self) -> f32 {
        crate::ship::fire::fire_interval(self.shots_per_second)
    }
}

/// Startup system: attempt to load `assets/ship.toml` and overwrite the
/// `ShipConfig` resource with any values present in the file.
///
/// Parse errors are logged but do not abort startup.  A missing file is not an
/// error; defaults are already in place from `insert_resource`.
pub fn load_ship_config(mut config: ResMut<ShipConfig>) {
    let path = "assets/ship.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse_ship_config(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded ship config from {path}");
            }
            Err(e) => {
                warn!("Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {path} found; using compiled defaults");
        }
    }
}

/// Parse a TOML document into a [`ShipConfig`], defaulting missing keys.
pub fn parse_ship_config(contents: &str) -> Result<ShipConfig, toml::de::Error> {
    toml::from_str::<ShipConfig>(contents)
}
