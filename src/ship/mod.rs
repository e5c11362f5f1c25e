//! Player ship: power-up levels, fire gating, movement, banking sprites.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`power_up`] | `PowerUpLevel` bounded counter and `PowerUpStateMachine` |
//! | [`fire_points`] | `FirePointTable` per-level spawn points and validation |
//! | [`fire`] | `FireController` accumulator and `SpawnRequest` |
//! | [`movement`] | `MovementController` integration and `PlayField` clamping |
//! | [`sprite_direction`] | `SpriteDirectionSelector` steering debounce |
//! | [`controller`] | `ShipController`, the per-ship coordinator component |
//! | [`input`] | keyboard / gamepad → `ShipInput` + `PowerUpAction` |
//!
//! The systems in this file are the driver: they feed input into each
//! [`ShipController`], call `tick` from `Update` and `physics_tick` from
//! `FixedUpdate`, and forward what comes out to the projectile spawner, the
//! sprite, and the transform.

pub mod controller;
pub mod fire;
pub mod fire_points;
pub mod input;
pub mod movement;
pub mod power_up;
pub mod sprite_direction;

pub use controller::{ShipController, ShipTick, SpriteChange};
pub use fire::SpawnRequest;
pub use input::{PowerUpAction, ShipInput};
pub use movement::PlayField;
pub use power_up::PowerUpLevel;
pub use sprite_direction::SpriteDirection;

use crate::config::ShipConfig;
use crate::constants::{SHIP_COLLIDER_RADIUS, SHIP_SPAWN_POSITION};
use crate::sprites::ShipSpriteRegistry;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// A sprite swap for one ship, consumed by [`apply_ship_sprite_system`].
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipSpriteChange {
    pub ship: Entity,
    pub change: SpriteChange,
}

pub struct ShipPlugin;

impl Plugin for ShipPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShipInput>()
            .init_resource::<input::PreferredGamepad>()
            .init_resource::<ShipSpriteRegistry>()
            .add_message::<PowerUpAction>()
            .add_message::<ShipSpriteChange>()
            .add_message::<SpawnRequest>()
            .add_systems(
                Update,
                (
                    input::gamepad_connection_system,
                    input::ship_input_clear_system,
                    input::keyboard_to_ship_input_system,
                    input::gamepad_to_ship_input_system,
                    reconfigure_ships_system,
                    power_up_action_system,
                    ship_tick_system,
                    apply_ship_sprite_system,
                    play_field_system,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, ship_physics_system);
    }
}

// ── Ship spawn ─────────────────────────────────────────────────────────────────

/// Spawn the player's ship.
///
/// Must run after [`crate::config::load_ship_config`] and
/// [`crate::sprites::load_sprite_registry`].
///
/// Collision groups:
/// - `GROUP_2` — ship belongs to this group
/// - collides with `GROUP_1` (targets) only; not with `GROUP_3` (projectiles)
pub fn spawn_ship(
    mut commands: Commands,
    config: Res<ShipConfig>,
    registry: Res<ShipSpriteRegistry>,
) {
    let position = Vec2::from_array(SHIP_SPAWN_POSITION);
    let ship = ShipController::new(&config, &registry, position);
    let current = ship.current_sprite();
    let sprite = registry
        .image(current.variant, current.direction)
        .map(Sprite::from_image)
        .unwrap_or_default();

    commands.spawn((
        ship,
        sprite,
        Transform::from_translation(position.extend(0.0)),
        Visibility::default(),
        RigidBody::KinematicPositionBased,
        Collider::ball(SHIP_COLLIDER_RADIUS),
        CollisionGroups::new(
            bevy_rapier2d::geometry::Group::GROUP_2,
            bevy_rapier2d::geometry::Group::GROUP_1,
        ),
        ActiveEvents::COLLISION_EVENTS,
    ));

    info!("Player ship spawned at {position}");
}

// ── Driver systems ────────────────────────────────────────────────────────────

/// Re-apply [`ShipConfig`] to every ship when the resource changes.
///
/// The first run is skipped: ships were built from the startup config.
pub fn reconfigure_ships_system(
    config: Res<ShipConfig>,
    registry: Res<ShipSpriteRegistry>,
    mut q: Query<&mut ShipController>,
    mut primed: Local<bool>,
) {
    if !*primed {
        *primed = true;
        return;
    }
    if !config.is_changed() {
        return;
    }
    for mut ship in q.iter_mut() {
        ship.initialize(&config, &registry);
    }
    info!("[ship] Configuration changed; ships re-initialized");
}

pub fn power_up_action_system(
    mut actions: MessageReader<PowerUpAction>,
    mut q: Query<&mut ShipController>,
) {
    for action in actions.read() {
        for mut ship in q.iter_mut() {
            match action {
                PowerUpAction::Increase => ship.increase_power_up(),
                PowerUpAction::Decrease => ship.decrease_power_up(),
            }
        }
    }
}

/// Frame tick: push this frame's input, then forward spawn and sprite requests.
pub fn ship_tick_system(
    input: Res<ShipInput>,
    time: Res<Time>,
    mut q: Query<(Entity, &mut ShipController)>,
    mut spawns: MessageWriter<SpawnRequest>,
    mut sprite_changes: MessageWriter<ShipSpriteChange>,
) {
    let dt = time.delta_secs();
    for (entity, mut ship) in q.iter_mut() {
        ship.set_movement_input(input.movement);
        ship.set_fire_held(input.fire_held);

        let out = ship.tick(dt);
        for request in out.spawns {
            spawns.write(request);
        }
        if let Some(change) = out.sprite_change {
            sprite_changes.write(ShipSpriteChange {
                ship: entity,
                change,
            });
        }
    }
}

/// Swap the ship's image to the requested sprite from the registry.
pub fn apply_ship_sprite_system(
    mut changes: MessageReader<ShipSpriteChange>,
    registry: Res<ShipSpriteRegistry>,
    mut q: Query<&mut Sprite, With<ShipController>>,
) {
    for ShipSpriteChange { ship, change } in changes.read() {
        let Ok(mut sprite) = q.get_mut(*ship) else {
            continue;
        };
        match registry.image(change.variant, change.direction) {
            Some(image) => sprite.image = image,
            None => warn!("[sprites] no sprite set for variant {}", change.variant),
        }
    }
}

/// Half the ship's rendered size: explicit `custom_size` first, then the
/// loaded image size, times the transform scale.  Zero until the image loads.
pub fn sprite_half_extents(sprite: &Sprite, images: &Assets<Image>, scale: Vec3) -> Vec2 {
    let size = sprite
        .custom_size
        .or_else(|| images.get(&sprite.image).map(|image| image.size_f32()))
        .unwrap_or(Vec2::ZERO);
    size * scale.truncate().abs() * 0.5
}

/// Visible world rectangle of `camera`, from its viewport corners.
pub fn camera_view_rect(camera: &Camera, camera_transform: &GlobalTransform) -> Option<Rect> {
    let size = camera.logical_viewport_size()?;
    let a = camera
        .viewport_to_world_2d(camera_transform, Vec2::ZERO)
        .ok()?;
    let b = camera.viewport_to_world_2d(camera_transform, size).ok()?;
    Some(Rect::from_corners(a, b))
}

/// Play field for a ship drawn with `sprite` at `scale` inside `view`.
pub fn ship_play_field(view: Rect, sprite: &Sprite, images: &Assets<Image>, scale: Vec3) -> PlayField {
    PlayField {
        view,
        ship_half_extents: sprite_half_extents(sprite, images, scale),
    }
}

/// Refresh each ship's play field from the camera and the active sprite.
///
/// Ships keep their previous field (initially none) while the camera has no
/// computed viewport.
pub fn play_field_system(
    q_camera: Query<(&Camera, &GlobalTransform)>,
    mut q_ships: Query<(&mut ShipController, &Sprite, &Transform)>,
    images: Res<Assets<Image>>,
) {
    let Ok((camera, camera_transform)) = q_camera.single() else {
        return;
    };
    let Some(view) = camera_view_rect(camera, camera_transform) else {
        return;
    };
    for (mut ship, sprite, transform) in q_ships.iter_mut() {
        ship.set_play_field(Some(ship_play_field(view, sprite, &images, transform.scale)));
    }
}

/// Fixed-step movement; the clamped position is written to the transform.
pub fn ship_physics_system(mut q: Query<(&mut ShipController, &mut Transform)>, time: Res<Time>) {
    let dt = time.delta_secs();
    for (mut ship, mut transform) in q.iter_mut() {
        let position = ship.physics_tick(dt);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_sprite(size: Vec2) -> Sprite {
        Sprite {
            custom_size: Some(size),
            ..default()
        }
    }

    #[test]
    fn half_extents_use_custom_size_and_absolute_scale() {
        let images = Assets::<Image>::default();
        let sprite = sized_sprite(Vec2::new(20.0, 40.0));
        let half = sprite_half_extents(&sprite, &images, Vec3::new(2.0, -1.0, 1.0));
        assert_eq!(half, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn half_extents_are_zero_until_image_loads() {
        let images = Assets::<Image>::default();
        let half = sprite_half_extents(&Sprite::default(), &images, Vec3::ONE);
        assert_eq!(half, Vec2::ZERO);
    }

    #[test]
    fn ship_play_field_insets_view_by_sprite() {
        let images = Assets::<Image>::default();
        let view = Rect::from_corners(Vec2::new(-270.0, -480.0), Vec2::new(270.0, 480.0));
        let field = ship_play_field(view, &sized_sprite(Vec2::new(28.0, 32.0)), &images, Vec3::ONE);
        assert_eq!(field.view, view);
        assert_eq!(field.ship_half_extents, Vec2::new(14.0, 16.0));
        assert_eq!(field.clamp(Vec2::splat(1000.0)), Vec2::new(256.0, 464.0));
    }

    #[test]
    fn play_field_waits_for_camera_viewport() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Assets<Image>>();
        app.add_systems(Update, play_field_system);

        let config = ShipConfig::default();
        let registry = ShipSpriteRegistry::default();
        let ship = app
            .world_mut()
            .spawn((
                ShipController::new(&config, &registry, Vec2::ZERO),
                sized_sprite(Vec2::splat(10.0)),
                Transform::default(),
            ))
            .id();

        // No camera at all.
        app.update();
        assert!(app.world().get::<ShipController>(ship).unwrap().play_field().is_none());

        // A camera without a render target has no logical viewport size.
        app.world_mut()
            .spawn((Camera::default(), GlobalTransform::default()));
        app.update();
        assert!(app.world().get::<ShipController>(ship).unwrap().play_field().is_none());
    }
}
