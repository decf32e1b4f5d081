//! # Input State
//!
//! Per-frame snapshots of keyboard and mouse state, as handed to the engine.

use std::collections::HashMap;

use winit::{event::MouseButton, keyboard::KeyCode};

/// Represents the state of a key or button within one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RawInputState {
    /// Key/button is up and was up last frame
    #[default]
    NotPressed,
    /// Key/button went down this frame
    Pressed,
    /// Key/button has been down since an earlier frame
    Held,
    /// Key/button went up this frame
    Released,
}

impl RawInputState {
    /// Whether the input is down (pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Whether the input went down this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Whether the input went up this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from whether the input was down last frame and
    /// whether it is down now.
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed input states with state transitions.
///
/// Inputs that are not tracked read as [`RawInputState::NotPressed`].
#[derive(Debug, Default, Clone)]
pub struct ProcessedInputState {
    /// State of every tracked keyboard key
    pub keyboard_states: HashMap<KeyCode, RawInputState>,

    /// State of every tracked mouse button
    pub mouse_button_states: HashMap<MouseButton, RawInputState>,

    /// Mouse movement since the last frame (x, y), if the mouse moved
    pub mouse_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the state of a keyboard key
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Gets the state of a mouse button
    pub fn get_mouse_button_state(&self, button: MouseButton) -> RawInputState {
        self.mouse_button_states.get(&button).copied().unwrap_or_default()
    }

    /// Gets the mouse movement delta since the last frame
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

/// Raw mouse state between two frames.
#[derive(Debug, Default)]
pub struct MouseInput {
    /// Whether each tracked button was down at the end of last frame
    pub mouse_button_inputs_old: HashMap<MouseButton, bool>,
    /// Whether each tracked button is down now
    pub mouse_button_inputs_new: HashMap<MouseButton, bool>,

    /// Mouse movement accumulated since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}
