use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use vertical_shooter::config::{self, ShipConfig};
use vertical_shooter::projectile::ProjectilePlugin;
use vertical_shooter::ship::{self, ShipPlugin};
use vertical_shooter::{graphics, sprites};

/// Configure Rapier physics: no gravity in space.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Vertical Shooter".into(),
                resolution: WindowResolution::new(540, 960),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_ship_config overwrites them from
        // assets/ship.toml (if present) in the Startup schedule.
        .insert_resource(ShipConfig::default())
        // pixels_per_meter(1.0) keeps world units identical to sprite pixels.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins((ShipPlugin, ProjectilePlugin))
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the final values.
                config::load_ship_config,
                sprites::load_sprite_registry.after(config::load_ship_config),
                graphics::setup_camera,
                ship::spawn_ship
                    .after(sprites::load_sprite_registry)
                    .after(graphics::setup_camera),
                setup_physics_config,
            ),
        )
        .run();
}
