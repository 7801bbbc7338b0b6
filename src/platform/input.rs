//! Host key, touch and joystick events mapped onto `InputState`

use glam::Vec2;

use crate::sim::InputState;

/// Logical direction a key or touch drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Map a DOM `KeyboardEvent.key` value to a direction.
///
/// Accepts arrow keys, the legacy `Left`/`Right`/`Up`/`Down` names and WASD.
pub fn map_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "Left" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "Right" | "d" | "D" => Some(Direction::Right),
        "ArrowUp" | "Up" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "Down" | "s" | "S" => Some(Direction::Down),
        _ => None,
    }
}

/// Touch on the left half steers left, the right half steers right
pub fn touch_direction(x: f32, width: f32) -> Option<Direction> {
    if !x.is_finite() || !width.is_finite() || width <= 0.0 {
        return None;
    }
    if x < width / 2.0 {
        Some(Direction::Left)
    } else {
        Some(Direction::Right)
    }
}

/// Held keys, an optional touch and the virtual joystick, read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyboardState {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    touch: Option<Direction>,
    /// Joystick deflection as reported by the page (+y is down)
    analog: Vec2,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is mapped (the host may then prevent default)
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    pub fn touch_start(&mut self, x: f32, width: f32) {
        self.touch = touch_direction(x, width);
    }

    /// Joystick moved. Out-of-range values are clamped when the tick aggregates input.
    pub fn set_analog(&mut self, dx: f32, dy: f32) {
        self.analog = Vec2::new(dx, dy);
    }

    /// Finger lifted: releases both the touch half and the joystick
    pub fn touch_end(&mut self) {
        self.touch = None;
        self.analog = Vec2::ZERO;
    }

    /// Release everything, e.g. on window blur
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Current input for the simulation
    pub fn snapshot(&self) -> InputState {
        InputState {
            left: self.left || self.touch == Some(Direction::Left),
            right: self.right || self.touch == Some(Direction::Right),
            up: self.up,
            down: self.down,
            analog: self.analog,
        }
    }

    fn set(&mut self, key: &str, pressed: bool) -> bool {
        let Some(direction) = map_key(key) else {
            return false;
        };
        match direction {
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
        }
        true
    }
}
