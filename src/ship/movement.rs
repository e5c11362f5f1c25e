//! Velocity integration and play-field clamping.

use bevy::prelude::*;

/// Rectangle the ship's center may occupy: the visible world rectangle inset
/// by half the ship's rendered extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub view: Rect,
    pub ship_half_extents: Vec2,
}

impl PlayField {
    /// Clamp `position` so the ship's bounding box stays inside the view.
    ///
    /// When the ship is larger than the view on an axis, that axis is pinned
    /// to the view center.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        let min = self.view.min + self.ship_half_extents;
        let max = self.view.max - self.ship_half_extents;
        let center = self.view.center();
        let axis = |p: f32, lo: f32, hi: f32, mid: f32| {
            if lo > hi {
                mid
            } else {
                p.clamp(lo, hi)
            }
        };
        Vec2::new(
            axis(position.x, min.x, max.x, center.x),
            axis(position.y, min.y, max.y, center.y),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementController {
    move_speed: f32,
    play_field: Option<PlayField>,
}

impl MovementController {
    pub fn new(move_speed: f32) -> Self {
        Self {
            move_speed,
            play_field: None,
        }
    }

    pub fn set_move_speed(&mut self, move_speed: f32) {
        self.move_speed = move_speed;
    }

    pub fn play_field(&self) -> Option<PlayField> {
        self.play_field
    }

    pub fn set_play_field(&mut self, play_field: Option<PlayField>) {
        self.play_field = play_field;
    }

    /// `position + input * speed * dt`, clamped to the play field once one is known.
    pub fn physics_tick(&self, position: Vec2, input: Vec2, dt: f32) -> Vec2 {
        let moved = position + input * self.move_speed * dt;
        match self.play_field {
            Some(field) => field.clamp(moved),
            None => moved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(half_view: Vec2, half_ship: Vec2) -> PlayField {
        PlayField {
            view: Rect::from_center_half_size(Vec2::ZERO, half_view),
            ship_half_extents: half_ship,
        }
    }

    #[test]
    fn clamps_to_view_inset_by_half_ship() {
        let f = field(Vec2::new(10.0, 20.0), Vec2::new(1.0, 2.0));
        assert_eq!(f.clamp(Vec2::new(15.0, 0.0)).x, 9.0);
        assert_eq!(f.clamp(Vec2::new(-15.0, 0.0)).x, -9.0);
        assert_eq!(f.clamp(Vec2::new(0.0, 30.0)).y, 18.0);
        assert_eq!(f.clamp(Vec2::new(3.0, -4.0)), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn oversized_ship_pins_to_view_center() {
        let f = PlayField {
            view: Rect::new(0.0, 0.0, 4.0, 100.0),
            ship_half_extents: Vec2::new(5.0, 1.0),
        };
        let p = f.clamp(Vec2::new(-50.0, 50.0));
        assert_eq!(p, Vec2::new(2.0, 50.0));
    }

    #[test]
    fn zero_input_is_a_steady_state() {
        let m = MovementController::new(300.0);
        let p = Vec2::new(4.0, -2.0);
        assert_eq!(m.physics_tick(p, Vec2::ZERO, 1.0 / 64.0), p);
    }

    #[test]
    fn integrates_input_times_speed_times_dt() {
        let m = MovementController::new(100.0);
        let p = m.physics_tick(Vec2::ZERO, Vec2::new(1.0, -0.5), 0.5);
        assert_eq!(p, Vec2::new(50.0, -25.0));
    }

    #[test]
    fn integration_result_is_clamped() {
        let mut m = MovementController::new(100.0);
        m.set_play_field(Some(field(Vec2::splat(10.0), Vec2::splat(1.0))));
        assert!(m.play_field().is_some());
        let p = m.physics_tick(Vec2::new(8.0, 0.0), Vec2::X, 1.0);
        assert_eq!(p, Vec2::new(9.0, 0.0));
    }
}
