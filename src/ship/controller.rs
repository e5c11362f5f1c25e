//! Per-ship coordinator.
//!
//! [`ShipController`] owns the ship's state and its four sub-controllers.  The
//! driver calls three methods and nothing else reaches inside:
//!
//! | Method | Schedule | Drives |
//! |--------|----------|--------|
//! | [`ShipController::initialize`] | startup / config change | every sub-controller |
//! | [`ShipController::tick`] | `Update` | fire gating, banking sprite |
//! | [`ShipController::physics_tick`] | `FixedUpdate` | movement + clamping |
//!
//! Input is pushed in between ticks with the `set_*` methods and the two
//! power-up transitions.

use super::fire::{FireController, SpawnRequest};
use super::movement::{MovementController, PlayField};
use super::power_up::{PowerUpLevel, PowerUpStateMachine};
use super::sprite_direction::{SpriteDirection, SpriteDirectionSelector};
use crate::config::ShipConfig;
use crate::sprites::ShipSpriteRegistry;
use bevy::prelude::*;

/// Sprite the renderer should show: which variant, which banking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteChange {
    pub variant: usize,
    pub direction: SpriteDirection,
}

/// Everything one [`ShipController::tick`] produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipTick {
    pub spawns: Vec<SpawnRequest>,
    pub sprite_change: Option<SpriteChange>,
}

#[derive(Component, Debug, Clone)]
pub struct ShipController {
    position: Vec2,
    /// Raw movement input; zero when nothing is pressed.
    movement_input: Vec2,
    fire_held: bool,
    sprite_variant: usize,
    /// Set when `initialize` picked a different variant; reported by the next tick.
    variant_changed: bool,
    power_up: PowerUpStateMachine,
    fire: FireController,
    movement: MovementController,
    sprite: SpriteDirectionSelector,
}

impl ShipController {
    /// Build a ship at `position` and [`initialize`](Self::initialize) it.
    ///
    /// The fire accumulator starts full, so holding fire on the first tick
    /// shoots immediately.
    pub fn new(config: &ShipConfig, registry: &ShipSpriteRegistry, position: Vec2) -> Self {
        let config = config.sanitized();
        let mut ship = Self {
            position,
            movement_input: Vec2::ZERO,
            fire_held: false,
            sprite_variant: 0,
            variant_changed: false,
            power_up: PowerUpStateMachine::new(config.fire_points.clone()),
            fire: FireController::new(config.shots_per_second),
            movement: MovementController::new(config.move_speed),
            sprite: SpriteDirectionSelector::new(config.steering_delay),
        };
        ship.initialize(&config, registry);
        // The spawner draws the initial sprite from `current_sprite`.
        ship.variant_changed = false;
        ship
    }

    /// Apply (or re-apply) configuration.
    ///
    /// Position, power-up level, and the fire accumulator survive.  Fire-point
    /// problems are logged here, once per call, and never again per tick.
    pub fn initialize(&mut self, config: &ShipConfig, registry: &ShipSpriteRegistry) {
        let config = config.sanitized();
        for e in config.fire_points.validate() {
            error!("[ship] {e}");
        }

        self.power_up =
            PowerUpStateMachine::with_level(config.fire_points.clone(), self.power_up.level());
        self.fire.set_shots_per_second(config.shots_per_second);
        self.movement.set_move_speed(config.move_speed);
        self.sprite.set_delay(config.steering_delay);
        let variant = registry.resolve_variant(config.default_sprite_index);
        if variant != self.sprite_variant {
            self.sprite_variant = variant;
            self.variant_changed = true;
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Non-finite components are treated as zero.
    pub fn set_movement_input(&mut self, input: Vec2) {
        self.movement_input = if input.is_finite() { input } else { Vec2::ZERO };
    }

    pub fn set_fire_held(&mut self, held: bool) {
        self.fire_held = held;
    }

    pub fn increase_power_up(&mut self) {
        self.power_up.increment();
    }

    pub fn decrease_power_up(&mut self) {
        self.power_up.decrement();
    }

    // ── Ticks ─────────────────────────────────────────────────────────────────

    /// Variable-rate frame tick.
    ///
    /// A sprite change is reported when the banking direction flips or when
    /// the last `initialize` switched variants.
    pub fn tick(&mut self, dt: f32) -> ShipTick {
        let mut spawns = Vec::new();
        self.fire.tick(
            dt,
            self.fire_held,
            self.power_up.active_entry(),
            self.position,
            &mut spawns,
        );

        let turned = self.sprite.update(self.movement_input.x, dt).is_some();
        let reconfigured = std::mem::take(&mut self.variant_changed);
        let sprite_change = (turned || reconfigured).then(|| self.current_sprite());

        ShipTick {
            spawns,
            sprite_change,
        }
    }

    /// Fixed-rate physics tick.  Returns the new position.
    pub fn physics_tick(&mut self, fixed_dt: f32) -> Vec2 {
        self.position = self
            .movement
            .physics_tick(self.position, self.movement_input, fixed_dt);
        self.position
    }

    // ── State ─────────────────────────────────────────────────────────────────

    pub fn set_play_field(&mut self, play_field: Option<PlayField>) {
        self.movement.set_play_field(play_field);
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn movement_input(&self) -> Vec2 {
        self.movement_input
    }

    #[inline]
    pub fn power_up_level(&self) -> PowerUpLevel {
        self.power_up.level()
    }

    pub fn play_field(&self) -> Option<PlayField> {
        self.movement.play_field()
    }

    #[inline]
    pub fn fire_interval(&self) -> f32 {
        self.fire.interval()
    }

    #[inline]
    pub fn sprite_variant(&self) -> usize {
        self.sprite_variant
    }

    /// The sprite that should currently be shown.
    pub fn current_sprite(&self) -> SpriteChange {
        SpriteChange {
            variant: self.sprite_variant,
            direction: self.sprite.current(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::fire_points::{FirePoint, FirePointEntry, FirePointTable};
    use crate::sprites::SpriteSet;

    fn registry() -> ShipSpriteRegistry {
        ShipSpriteRegistry::new(vec![SpriteSet::default(); 2])
    }

    fn config() -> ShipConfig {
        ShipConfig {
            move_speed: 100.0,
            shots_per_second: 5.0,
            steering_delay: 0.25,
            ..Default::default()
        }
    }

    #[test]
    fn first_held_tick_fires_immediately() {
        let mut ship = ShipController::new(&config(), &registry(), Vec2::ZERO);
        ship.set_fire_held(true);
        let out = ship.tick(0.0);
        assert_eq!(out.spawns.len(), 1);
    }

    #[test]
    fn spawns_follow_ship_position() {
        let mut ship = ShipController::new(&config(), &registry(), Vec2::new(10.0, 20.0));
        ship.set_fire_held(true);
        let out = ship.tick(0.016);
        let nose = FirePointTable::default().entries[0].spawn_points[0].offset();
        let expected = Vec2::new(10.0, 20.0) + nose;
        assert_eq!(out.spawns[0].position, expected);
    }

    #[test]
    fn power_up_changes_fan_out() {
        let mut ship = ShipController::new(&config(), &registry(), Vec2::ZERO);
        ship.set_fire_held(true);
        ship.increase_power_up();
        ship.increase_power_up();
        assert_eq!(ship.tick(0.0).spawns.len(), 3);
    }

    #[test]
    fn missing_level_fires_nothing() {
        let cfg = ShipConfig {
            fire_points: FirePointTable::new(vec![FirePointEntry {
                level: 1,
                spawn_points: vec![FirePoint::default()],
            }]),
            ..config()
        };
        let mut ship = ShipController::new(&cfg, &registry(), Vec2::ZERO);
        ship.set_fire_held(true);
        // `tick` has no logging path; the missing level is reported once by
        // `initialize` through `validate`.
        for _ in 0..30 {
            assert!(ship.tick(0.1).spawns.is_empty());
        }
        ship.increase_power_up();
        assert_eq!(ship.tick(0.2).spawns.len(), 1);
    }

    #[test]
    fn physics_tick_moves_and_clamps() {
        let mut ship = ShipController::new(&config(), &registry(), Vec2::ZERO);
        ship.set_play_field(Some(PlayField {
            view: Rect::from_center_half_size(Vec2::ZERO, Vec2::splat(10.0)),
            ship_half_extents: Vec2::splat(1.0),
        }));
        ship.set_movement_input(Vec2::X);
        assert_eq!(ship.physics_tick(0.05), Vec2::new(5.0, 0.0));
        assert_eq!(ship.physics_tick(0.5), Vec2::new(9.0, 0.0));
    }

    #[test]
    fn banking_sprite_carries_variant() {
        let cfg = ShipConfig {
            default_sprite_index: 1,
            ..config()
        };
        let mut ship = ShipController::new(&cfg, &registry(), Vec2::ZERO);
        ship.set_movement_input(Vec2::new(-1.0, 0.0));
        assert_eq!(ship.tick(0.2).sprite_change, None);
        assert_eq!(
            ship.tick(0.1).sprite_change,
            Some(SpriteChange {
                variant: 1,
                direction: SpriteDirection::Left
            })
        );
    }

    #[test]
    fn reinitialize_keeps_position_and_level() {
        let reg = registry();
        let mut ship = ShipController::new(&config(), &reg, Vec2::new(3.0, 4.0));
        ship.increase_power_up();
        ship.initialize(
            &ShipConfig {
                shots_per_second: 0.0,
                ..config()
            },
            &reg,
        );
        assert_eq!(ship.position(), Vec2::new(3.0, 4.0));
        assert_eq!(ship.power_up_level().get(), 1);
        assert_eq!(ship.fire_interval(), 1.0);
    }

    #[test]
    fn variant_switch_is_reported_once_on_next_tick() {
        let reg = registry();
        let mut ship = ShipController::new(&config(), &reg, Vec2::ZERO);
        assert_eq!(ship.tick(0.016).sprite_change, None);

        ship.initialize(
            &ShipConfig {
                default_sprite_index: 1,
                ..config()
            },
            &reg,
        );
        assert_eq!(ship.sprite_variant(), 1);
        assert_eq!(
            ship.tick(0.016).sprite_change,
            Some(SpriteChange {
                variant: 1,
                direction: SpriteDirection::Center
            })
        );
        assert_eq!(ship.tick(0.016).sprite_change, None);
    }

    #[test]
    fn reinitialize_with_same_variant_reports_nothing() {
        let reg = registry();
        let mut ship = ShipController::new(&config(), &reg, Vec2::ZERO);
        ship.initialize(&config(), &reg);
        assert_eq!(ship.tick(0.016).sprite_change, None);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut ship = ShipController::new(&config(), &registry(), Vec2::ZERO);
        ship.set_movement_input(Vec2::new(f32::NAN, 1.0));
        assert_eq!(ship.movement_input(), Vec2::ZERO);
    }
}
