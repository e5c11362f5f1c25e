//! Centralised ship and projectile constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  They are the compiled defaults behind
//! [`crate::config::ShipConfig::default`]; `assets/ship.toml` can override any
//! of them at startup.

// ── Power-up ──────────────────────────────────────────────────────────────────

/// Number of discrete power-up levels.  Valid levels are `0..POWER_UP_LEVELS`.
pub const POWER_UP_LEVELS: u8 = 5;

// ── Ship: Movement ────────────────────────────────────────────────────────────

/// Ship speed at full stick deflection (world units / s).
pub const SHIP_MOVE_SPEED: f32 = 320.0;

/// Seconds of sustained horizontal input before the ship shows a banked sprite.
///
/// Brief taps shorter than this never leave the center sprite.
pub const STEERING_DELAY: f32 = 0.25;

/// Where the ship appears at startup: horizontally centered, low on screen.
pub const SHIP_SPAWN_POSITION: [f32; 2] = [0.0, -240.0];

/// Ball collider radius of the ship body.
pub const SHIP_COLLIDER_RADIUS: f32 = 14.0;

// ── Ship: Combat ──────────────────────────────────────────────────────────────

/// Spawn batches per second while fire is held.
///
/// Non-positive values are replaced by [`FALLBACK_SHOTS_PER_SECOND`].
pub const SHOTS_PER_SECOND: f32 = 8.0;

/// Rate used when a configured `shots_per_second` is zero or negative.
pub const FALLBACK_SHOTS_PER_SECOND: f32 = 1.0;

// ── Projectile ────────────────────────────────────────────────────────────────

/// Projectile travel speed along its local +Y (world units / s).
pub const PROJECTILE_SPEED: f32 = 1280.0;

/// Seconds a projectile lives before it is despawned.
pub const PROJECTILE_LIFETIME: f32 = 10.0;

/// Sensor collider radius for projectiles.
pub const PROJECTILE_COLLIDER_RADIUS: f32 = 3.0;

// ── Default fire pattern ──────────────────────────────────────────────────────

/// Vertical offset of the nose guns from the ship center.
pub const FIRE_POINT_NOSE_Y: f32 = 24.0;

/// Horizontal spacing between adjacent parallel guns.
pub const FIRE_POINT_SPACING_X: f32 = 10.0;

/// Spread angle (radians) of the outer angled guns on higher levels.
pub const FIRE_POINT_SPREAD: f32 = 0.18;

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Sprite set loaded when `assets/ship.toml` lists none.
pub const DEFAULT_SPRITE_LEFT: &str = "sprites/ship_left.png";
pub const DEFAULT_SPRITE_CENTER: &str = "sprites/ship_center.png";
pub const DEFAULT_SPRITE_RIGHT: &str = "sprites/ship_right.png";

// ── Gamepad ───────────────────────────────────────────────────────────────────

/// Left-stick magnitude below which movement input is treated as zero.
pub const GAMEPAD_DEADZONE: f32 = 0.15;
