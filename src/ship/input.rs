//! Keyboard and gamepad input, reduced to [`ShipInput`] plus
//! [`PowerUpAction`] messages.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`ship_input_clear_system`] — zeroes `ShipInput`.
//! 2. [`keyboard_to_ship_input_system`] — WASD / arrows, Space, E / Q.
//! 3. [`gamepad_to_ship_input_system`] — left stick / D-pad, South, shoulders.
//!
//! Tests can populate `ShipInput` directly or write `PowerUpAction` messages
//! without a real input device.

use bevy::input::gamepad::{GamepadAxis, GamepadButton, GamepadConnection, GamepadConnectionEvent};
use bevy::prelude::*;

use crate::config::ShipConfig;

/// Continuous input sampled this frame.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ShipInput {
    /// Movement vector with length ≤ 1; zero when nothing is pressed.
    pub movement: Vec2,
    pub fire_held: bool,
}

/// Edge-triggered power-up request.  One message = one transition.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpAction {
    Increase,
    Decrease,
}

/// Most recently connected gamepad.
#[derive(Resource, Default)]
pub struct PreferredGamepad(pub Option<Entity>);

pub fn ship_input_clear_system(mut input: ResMut<ShipInput>) {
    *input = ShipInput::default();
}

/// Map a set of held directions onto a unit-or-zero movement vector.
pub fn digital_movement(left: bool, right: bool, down: bool, up: bool) -> Vec2 {
    let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
    Vec2::new(axis(left, right), axis(down, up)).normalize_or_zero()
}

pub fn keyboard_to_ship_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<ShipInput>,
    mut actions: MessageWriter<PowerUpAction>,
) {
    let any = |codes: [KeyCode; 2]| codes.iter().any(|k| keys.pressed(*k));
    input.movement = digital_movement(
        any([KeyCode::KeyA, KeyCode::ArrowLeft]),
        any([KeyCode::KeyD, KeyCode::ArrowRight]),
        any([KeyCode::KeyS, KeyCode::ArrowDown]),
        any([KeyCode::KeyW, KeyCode::ArrowUp]),
    );
    input.fire_held = keys.pressed(KeyCode::Space);

    if keys.just_pressed(KeyCode::KeyE) {
        actions.write(PowerUpAction::Increase);
    }
    if keys.just_pressed(KeyCode::KeyQ) {
        actions.write(PowerUpAction::Decrease);
    }
}

/// Track gamepad connect / disconnect events and update [`PreferredGamepad`].
pub fn gamepad_connection_system(
    mut events: MessageReader<GamepadConnectionEvent>,
    mut preferred: ResMut<PreferredGamepad>,
) {
    for event in events.read() {
        match &event.connection {
            GamepadConnection::Connected { .. } => {
                preferred.0 = Some(event.gamepad);
                info!("[gamepad] {:?} connected (now preferred)", event.gamepad);
            }
            GamepadConnection::Disconnected => {
                info!("[gamepad] {:?} disconnected", event.gamepad);
                if preferred.0 == Some(event.gamepad) {
                    preferred.0 = None;
                }
            }
        }
    }
}

/// Gamepad input on top of the keyboard.  An active stick or D-pad replaces
/// keyboard movement; fire is OR-ed.
pub fn gamepad_to_ship_input_system(
    preferred: Res<PreferredGamepad>,
    gamepads: Query<&Gamepad>,
    config: Res<ShipConfig>,
    mut input: ResMut<ShipInput>,
    mut actions: MessageWriter<PowerUpAction>,
) {
    let Some(gamepad_entity) = preferred.0 else {
        return;
    };
    let Ok(gamepad) = gamepads.get(gamepad_entity) else {
        return;
    };

    let stick = Vec2::new(
        gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0),
        gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0),
    );
    let dpad = digital_movement(
        gamepad.pressed(GamepadButton::DPadLeft),
        gamepad.pressed(GamepadButton::DPadRight),
        gamepad.pressed(GamepadButton::DPadDown),
        gamepad.pressed(GamepadButton::DPadUp),
    );
    if stick.length() >= config.gamepad_deadzone {
        input.movement = stick.clamp_length_max(1.0);
    } else if dpad != Vec2::ZERO {
        input.movement = dpad;
    }

    input.fire_held |= gamepad.pressed(GamepadButton::South);

    if gamepad.just_pressed(GamepadButton::RightTrigger) {
        actions.write(PowerUpAction::Increase);
    }
    if gamepad.just_pressed(GamepadButton::LeftTrigger) {
        actions.write(PowerUpAction::Decrease);
    }
}
