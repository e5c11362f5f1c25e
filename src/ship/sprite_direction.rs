//! Banking sprite selection with a steering debounce.
//!
//! Two timers track how long the stick has been held left or right.  The ship
//! only shows a banked sprite once the matching timer reaches the delay, so
//! short taps stay on the center sprite.

/// Which of the three sprites in a [`crate::sprites::SpriteSet`] is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpriteDirection {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDirectionSelector {
    delay: f32,
    left_time: f32,
    right_time: f32,
    current: SpriteDirection,
}

impl SpriteDirectionSelector {
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            left_time: 0.0,
            right_time: 0.0,
            current: SpriteDirection::Center,
        }
    }

    pub fn set_delay(&mut self, delay: f32) {
        self.delay = delay.max(0.0);
    }

    #[inline]
    pub fn current(&self) -> SpriteDirection {
        self.current
    }

    #[inline]
    pub fn left_time(&self) -> f32 {
        self.left_time
    }

    #[inline]
    pub fn right_time(&self) -> f32 {
        self.right_time
    }

    /// Advance the timers from the horizontal input and pick a direction.
    ///
    /// Returns the new direction only when it differs from the previous one.
    pub fn update(&mut self, input_x: f32, dt: f32) -> Option<SpriteDirection> {
        let next = if input_x < 0.0 {
            self.right_time = 0.0;
            self.left_time += dt;
            if self.left_time >= self.delay {
                SpriteDirection::Left
            } else {
                SpriteDirection::Center
            }
        } else if input_x > 0.0 {
            self.left_time = 0.0;
            self.right_time += dt;
            if self.right_time >= self.delay {
                SpriteDirection::Right
            } else {
                SpriteDirection::Center
            }
        } else {
            // Zero (or NaN) horizontal input: both timers clear.
            self.left_time = 0.0;
            self.right_time = 0.0;
            SpriteDirection::Center
        };

        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold(sel: &mut SpriteDirectionSelector, x: f32, secs: f32) {
        let steps = (secs / 0.01).round() as usize;
        for _ in 0..steps {
            sel.update(x, 0.01);
        }
    }

    #[test]
    fn short_hold_stays_centered() {
        let mut sel = SpriteDirectionSelector::new(0.25);
        hold(&mut sel, -1.0, 0.24);
        assert_eq!(sel.current(), SpriteDirection::Center);
    }

    #[test]
    fn sustained_hold_banks_left() {
        let mut sel = SpriteDirectionSelector::new(0.25);
        hold(&mut sel, -1.0, 0.26);
        assert_eq!(sel.current(), SpriteDirection::Left);
    }

    #[test]
    fn release_recenters_and_zeroes_both_timers() {
        let mut sel = SpriteDirectionSelector::new(0.25);
        hold(&mut sel, -1.0, 0.3);
        assert_eq!(sel.update(0.0, 0.01), Some(SpriteDirection::Center));
        assert_eq!(sel.left_time(), 0.0);
        assert_eq!(sel.right_time(), 0.0);
    }

    #[test]
    fn vertical_only_input_counts_as_centered() {
        // The selector only sees input.x; a pure vertical stick passes 0.0.
        let mut sel = SpriteDirectionSelector::new(0.1);
        hold(&mut sel, 1.0, 0.2);
        assert_eq!(sel.current(), SpriteDirection::Right);
        sel.update(0.0, 0.01);
        assert_eq!(sel.current(), SpriteDirection::Center);
    }

    #[test]
    fn reversing_clears_opposite_timer() {
        let mut sel = SpriteDirectionSelector::new(0.25);
        hold(&mut sel, -1.0, 0.2);
        sel.update(1.0, 0.01);
        assert_eq!(sel.left_time(), 0.0);
        assert!(sel.right_time() > 0.0);
        assert_eq!(sel.current(), SpriteDirection::Center);
    }

    #[test]
    fn reports_only_changes() {
        let mut sel = SpriteDirectionSelector::new(0.0);
        assert_eq!(sel.update(1.0, 0.01), Some(SpriteDirection::Right));
        assert_eq!(sel.update(1.0, 0.01), None);
        assert_eq!(sel.update(-1.0, 0.01), Some(SpriteDirection::Left));
    }
}
