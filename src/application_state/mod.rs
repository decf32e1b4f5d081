//! # Application State Management
//!
//! This module sits between the windowing layer and the engine:
//! - Window and device events are fed into the [`InputManager`]
//! - Once per frame, input is snapshotted and handed to the [`EngineState`]
//!   together with the time elapsed since the previous frame
//!
//! Creating the window and submitting draw calls are left to the embedding
//! application; [`ApplicationState`] only needs the events it produces.

pub mod input_manager;
pub mod input_state;

use input_manager::InputManager;

use web_time::{Duration, Instant};
use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::engine_state::{
    rendering::mesh::{MeshBackend, MeshStore},
    EngineState,
};
use crate::error::EngineError;

/// Whether the application should keep running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    Exit,
}

/// The running application: the engine plus the input and timing around it.
pub struct ApplicationState<B: MeshBackend = MeshStore> {
    /// The core game engine state and logic
    pub engine_state: EngineState<B>,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_frame_time: Instant,

    /// Frames run so far
    pub frame_count: u64,
}

impl<B: MeshBackend> ApplicationState<B> {
    /// Wraps an engine, starting the frame clock now.
    pub fn new(engine_state: EngineState<B>) -> Self {
        Self {
            engine_state,
            input_manager: InputManager::new(),
            last_frame_time: Instant::now(),
            frame_count: 0,
        }
    }

    /// Handles a window event.
    ///
    /// Keyboard and mouse button events update the input state. Losing focus
    /// releases everything that was held.
    ///
    /// # Returns
    /// [`EventOutcome::Exit`] on a close request or Escape.
    pub fn window_event(&mut self, event: &WindowEvent) -> EventOutcome {
        self.input_manager.intake_input(event);

        match event {
            WindowEvent::Focused(false) => {
                self.input_manager.release_all();
                EventOutcome::Continue
            }
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => EventOutcome::Exit,
            _ => EventOutcome::Continue,
        }
    }

    /// Handles device-level input events such as raw mouse motion.
    pub fn device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input_manager.intake_mouse_motion(*delta);
        }
    }

    /// Runs one frame timed against the wall clock.
    pub fn frame(&mut self) -> Result<(), EngineError> {
        let now = Instant::now();
        let dt = now - self.last_frame_time;
        self.last_frame_time = now;
        self.frame_with_dt(dt)
    }

    /// Runs one frame with an explicit elapsed time.
    ///
    /// # Arguments
    /// * `dt` - Time the frame represents
    pub fn frame_with_dt(&mut self, dt: Duration) -> Result<(), EngineError> {
        let processed_input = self.input_manager.get_and_reset_processed_input();
        self.engine_state.set_input_commands(processed_input);
        self.engine_state.update(dt)?;
        self.frame_count += 1;
        Ok(())
    }
}
