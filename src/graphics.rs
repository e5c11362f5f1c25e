use bevy::prelude::*;

/// Setup camera for 2D rendering.
///
/// The ship's play field is derived from this camera's viewport every frame,
/// so it must be the only `Camera2d` in the world.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}
