//! Input aggregation
//!
//! Digital keys and the analog stick are summed, not prioritized. The sum is
//! only shortened when it would exceed unit length, so pressing two keys never
//! moves faster than one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Polled input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Analog stick vector, expected inside the unit circle (+y is down)
    pub analog: Vec2,
}

impl InputState {
    /// Digital direction as a vector with components in {-1, 0, 1}
    pub fn digital(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    /// Analog vector clamped into the unit circle; non-finite input reads as centered
    pub fn analog_clamped(&self) -> Vec2 {
        if !self.analog.is_finite() {
            log::warn!("Ignoring non-finite analog input {:?}", self.analog);
            return Vec2::ZERO;
        }
        if self.analog.length_squared() > 1.0 {
            log::debug!("Clamping analog input {:?} to unit circle", self.analog);
        }
        self.analog.clamp_length_max(1.0)
    }

    pub fn is_idle(&self) -> bool {
        self.digital() == Vec2::ZERO && self.analog_clamped() == Vec2::ZERO
    }
}

/// Combine digital and analog input into one movement vector, `|v| <= 1`
pub fn aggregate(input: &InputState) -> Vec2 {
    let sum = input.digital() + input.analog_clamped();
    let len = sum.length();
    if len > 1.0 {
        sum / len
    } else {
        // Includes the zero vector, which stays zero
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_idle_is_zero() {
        let input = InputState::default();
        assert_eq!(aggregate(&input), Vec2::ZERO);
        assert!(input.is_idle());
    }

    #[test]
    fn test_diagonal_keys_normalized() {
        let input = InputState {
            right: true,
            down: true,
            ..Default::default()
        };
        let v = aggregate(&input);
        assert!((v.length() - 1.0).abs() < EPS);
        assert!((v.x - v.y).abs() < EPS);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(aggregate(&input), Vec2::ZERO);
    }

    #[test]
    fn test_partial_analog_not_amplified() {
        let input = InputState {
            analog: Vec2::new(0.5, 0.0),
            ..Default::default()
        };
        assert_eq!(aggregate(&input), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_keys_and_analog_are_additive() {
        // Opposing analog partially cancels the key instead of being ignored
        let input = InputState {
            right: true,
            analog: Vec2::new(-0.25, 0.0),
            ..Default::default()
        };
        let v = aggregate(&input);
        assert!((v.x - 0.75).abs() < EPS);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_out_of_range_analog_clamped() {
        let input = InputState {
            analog: Vec2::new(3.0, 4.0),
            ..Default::default()
        };
        let v = aggregate(&input);
        assert!((v - Vec2::new(0.6, 0.8)).length() < EPS);

        let input = InputState {
            analog: Vec2::new(f32::NAN, 0.5),
            ..Default::default()
        };
        assert_eq!(aggregate(&input), Vec2::ZERO);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn movement_never_exceeds_unit_length(
                left in any::<bool>(),
                right in any::<bool>(),
                up in any::<bool>(),
                down in any::<bool>(),
                ax in -10.0f32..10.0,
                ay in -10.0f32..10.0,
            ) {
                let input = InputState { left, right, up, down, analog: Vec2::new(ax, ay) };
                let v = aggregate(&input);
                prop_assert!(v.length() <= 1.0 + EPS, "|{:?}| = {}", v, v.length());
            }
        }
    }
}
