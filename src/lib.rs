#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! The world and movement core of a first-person block sandbox: a sparse voxel
//! world that only draws exposed blocks near the player, and a player that
//! walks, jumps, flies and collides against it.
//!
//! ## Key Modules
//!
//! * `application_state` - Turns window events and frame timing into engine ticks
//! * `engine_state` - The session: world, player, configuration and rendering data
//! * `error` - Configuration and world error types
//!
//! ## Architecture
//!
//! The engine is single threaded and frame driven:
//! * Input is collected between frames and applied at the start of each one
//! * Mesh work for blocks entering or leaving view is queued and drained under
//!   a per-frame time budget
//! * Player physics runs in fixed substeps against the block grid
//!
//! Window creation and GPU submission live outside this crate; a renderer
//! plugs in through [`engine_state::rendering::mesh::MeshBackend`].
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_sandbox::run();
//! }
//! ```
//!
//! Set `VOXEL_SANDBOX_CONFIG` to a JSON file to override the defaults in
//! [`engine_state::engine_config::EngineConfig`], and `RUST_LOG` to choose
//! the log level.

use application_state::ApplicationState;
use engine_state::{engine_config::EngineConfig, EngineState};
use error::EngineError;
use log::{error, info};
use web_time::Duration;
use winit::keyboard::KeyCode;

pub mod application_state;
pub mod engine_state;
pub mod error;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_SANDBOX_CONFIG";

/// Frames the headless session runs for.
const HEADLESS_FRAMES: u32 = 600;

/// Loads the configuration named by [`CONFIG_ENV_VAR`], or the defaults.
pub fn load_config() -> Result<EngineConfig, EngineError> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            Ok(EngineConfig::load(path)?)
        }
        Err(_) => {
            info!("Using default configuration");
            Ok(EngineConfig::default())
        }
    }
}

/// Runs a scripted session without a window.
///
/// The player settles onto the floor, walks forward while turning, jumps,
/// digs out the block below and places one back, flies up, and lands again.
/// World and queue statistics are logged at the end.
pub fn run_headless(config: EngineConfig) -> Result<ApplicationState, EngineError> {
    let frame = Duration::from_secs(1) / config.ticks_per_second;
    let mut application = ApplicationState::new(EngineState::new(config)?);

    for index in 0..HEADLESS_FRAMES {
        let input = &mut application.input_manager;
        match index {
            60 => input.set_key(KeyCode::KeyW, true),
            120..=240 => input.intake_mouse_motion((4.0, 0.0)),
            250 => input.set_key(KeyCode::Space, true),
            251 => input.set_key(KeyCode::Space, false),
            300 => {
                input.set_key(KeyCode::KeyW, false);
                input.intake_mouse_motion((0.0, 600.0));
                input.set_mouse_button(winit::event::MouseButton::Left, true);
            }
            301 => input.set_mouse_button(winit::event::MouseButton::Left, false),
            310 => {
                input.set_key(KeyCode::Digit2, true);
                input.set_mouse_button(winit::event::MouseButton::Right, true);
            }
            311 => {
                input.set_key(KeyCode::Digit2, false);
                input.set_mouse_button(winit::event::MouseButton::Right, false);
            }
            350 => {
                input.set_key(KeyCode::Tab, true);
                input.intake_mouse_motion((0.0, -1200.0));
                input.set_key(KeyCode::KeyW, true);
            }
            351 => input.set_key(KeyCode::Tab, false),
            420 => {
                input.set_key(KeyCode::KeyW, false);
                input.set_key(KeyCode::Tab, true);
            }
            421 => input.set_key(KeyCode::Tab, false),
            _ => {}
        }
        application.frame_with_dt(frame)?;
    }

    let engine_state = &application.engine_state;
    let world = &engine_state.world;
    info!(
        "Ran {} frames: player at {:?} in sector {:?}",
        application.frame_count, engine_state.player.position, engine_state.player.sector
    );
    info!(
        "World holds {} blocks in {} sectors; {} shown, {} realised, {} queued",
        world.len(),
        world.sector_count(),
        world.shown_len(),
        world.realized_len(),
        world.queue().len()
    );
    info!(
        "Meshes built {}, released {}",
        world.backend().total_built(),
        world.backend().total_released()
    );
    Ok(application)
}

/// Entry point of the binary: sets up logging, loads configuration and runs
/// the headless session.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    info!("Logger initialized");

    if let Err(err) = load_config().and_then(run_headless) {
        error!("{}", err);
        std::process::exit(1);
    }
}
