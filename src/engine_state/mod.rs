//! # Engine State Module
//!
//! The session that owns the world and the player and advances both once per
//! frame.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the [`World`] and the [`PlayerState`], turns input into
//!   player actions and runs the per-frame update
//! * `engine_config` - Tunable constants, loaded from JSON
//! * `player_state` - Player body, movement vectors and collision
//! * `rendering` - Cube geometry, vertex layout and the renderer boundary
//! * `voxels` - Block storage, visibility and the deferred mesh queue
//!
//! ## Frame Order
//!
//! Each call to [`EngineState::update`]:
//! 1. applies the player actions gathered from input
//! 2. drains the mesh queue under the frame budget
//! 3. moves the visible sector window if the player changed sector (draining
//!    the whole queue on the very first frame, so the world is complete before
//!    it is first shown)
//! 4. steps player physics

use web_time::Duration;
use winit::{event::MouseButton, keyboard::KeyCode};

use engine_config::EngineConfig;
use player_state::{movement::StrafeIntent, PlayerState};
use rendering::mesh::{MeshBackend, MeshStore};
use voxels::{
    block::block_type::BlockType, generation::flat_world, spatial::BlockCoordinate, world::World,
};

use crate::{
    application_state::input_state::ProcessedInputState,
    error::{EngineError, WorldError},
};

pub mod engine_config;
pub mod player_state;
pub mod rendering;
pub mod voxels;

/// Keys that pick a slot of the inventory, in slot order.
const INVENTORY_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];

/// The sandbox session.
///
/// # Type Parameters
/// - `B`: Renderer backend the world realises block meshes through
///
/// # Examples
///
/// ```
/// use voxel_sandbox::engine_state::{engine_config::EngineConfig, EngineState};
/// use web_time::Duration;
///
/// let config = EngineConfig { world_half_extent: 8, ..EngineConfig::default() };
/// let mut engine_state = EngineState::new(config).unwrap();
/// engine_state.update(Duration::from_millis(16)).unwrap();
/// assert!(engine_state.world.realized_len() > 0);
/// ```
pub struct EngineState<B: MeshBackend = MeshStore> {
    /// The voxel world and its visibility state
    pub world: World<B>,
    /// The player moving through the world
    pub player: PlayerState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    config: EngineConfig,
    /// Inventory slot placed by a right click
    selected_slot: usize,
}

impl EngineState<MeshStore> {
    /// Creates a session with an in-memory mesh store.
    ///
    /// # Errors
    /// Any configuration error, or a world error raised while seeding.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        EngineState::with_backend(config, MeshStore::new())
    }
}

impl<B: MeshBackend> EngineState<B> {
    /// Creates a session that realises meshes through `backend`.
    ///
    /// The world is seeded with a flat floor but nothing is shown until the
    /// first [`update`](Self::update).
    ///
    /// # Arguments
    /// * `config` - Engine settings, validated here
    /// * `backend` - Renderer that receives built and released meshes
    pub fn with_backend(config: EngineConfig, backend: B) -> Result<Self, EngineError> {
        let mut world = World::with_backend(&config, backend)?;
        flat_world(&mut world, config.world_half_extent)?;
        let player = PlayerState::new(&config);

        log::info!(
            "Session started with {} blocks, player at {:?}",
            world.len(),
            player.position
        );

        Ok(Self {
            world,
            player,
            player_actions: PlayerAction::default(),
            config,
            selected_slot: 0,
        })
    }

    /// The settings this session runs with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Block type a right click places.
    pub fn selected_block(&self) -> BlockType {
        self.config.inventory[self.selected_slot]
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = Self::translate_processed_input(&input);
    }

    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    ///
    /// # Returns
    /// A PlayerAction struct with the appropriate actions set
    fn translate_processed_input(input: &ProcessedInputState) -> PlayerAction {
        let mut player_action = PlayerAction::default();

        // Movement and sprint follow the key while it is down
        player_action.move_forward = input.get_key_state(KeyCode::KeyW).is_active();
        player_action.move_backward = input.get_key_state(KeyCode::KeyS).is_active();
        player_action.move_left = input.get_key_state(KeyCode::KeyA).is_active();
        player_action.move_right = input.get_key_state(KeyCode::KeyD).is_active();
        player_action.sprint = input.get_key_state(KeyCode::ControlLeft).is_active();

        // Everything else fires once per press
        player_action.jump = input.get_key_state(KeyCode::Space).is_just_pressed();
        player_action.toggle_flying = input.get_key_state(KeyCode::Tab).is_just_pressed();
        player_action.select_slot = INVENTORY_KEYS
            .iter()
            .position(|key| input.get_key_state(*key).is_just_pressed());

        player_action.rotate_view = input.get_mouse_delta();
        player_action.break_block = input
            .get_mouse_button_state(MouseButton::Left)
            .is_just_pressed();
        player_action.place_block = input
            .get_mouse_button_state(MouseButton::Right)
            .is_just_pressed();

        player_action
    }

    /// Applies the current player actions.
    ///
    /// One-shot actions (jump, flying toggle, slot selection, clicks, view
    /// rotation) are cleared once applied; held movement stays until the next
    /// input arrives.
    pub fn process_input(&mut self) -> Result<(), WorldError> {
        let held = PlayerAction {
            move_forward: self.player_actions.move_forward,
            move_backward: self.player_actions.move_backward,
            move_left: self.player_actions.move_left,
            move_right: self.player_actions.move_right,
            sprint: self.player_actions.sprint,
            ..PlayerAction::default()
        };
        let actions = std::mem::replace(&mut self.player_actions, held);

        self.player.strafe = StrafeIntent::from_keys(
            actions.move_forward,
            actions.move_backward,
            actions.move_left,
            actions.move_right,
        );
        self.player.sprinting = actions.sprint;

        if let Some((dx, dy)) = actions.rotate_view {
            self.player.rotate(dx, dy);
        }
        if actions.toggle_flying {
            self.player.toggle_flying();
            log::debug!("Flying {}", if self.player.flying { "on" } else { "off" });
        }
        if actions.jump {
            self.player.jump();
        }
        if let Some(slot) = actions.select_slot {
            self.selected_slot = slot % self.config.inventory.len();
            log::debug!("Selected {:?}", self.selected_block());
        }
        if actions.break_block {
            self.break_targeted_block()?;
        }
        if actions.place_block {
            self.place_selected_block()?;
        }
        Ok(())
    }

    /// Removes the block the player is looking at, unless it is indestructible.
    ///
    /// # Returns
    /// The coordinate of the removed block, if any.
    pub fn break_targeted_block(&mut self) -> Result<Option<BlockCoordinate>, WorldError> {
        let (block, _) = self.target();
        let Some(block) = block else {
            return Ok(None);
        };
        match self.world.block_at(block) {
            Some(block_type) if !block_type.is_destructible() => {
                log::warn!("Ignoring attempt to break {:?} at {:?}", block_type, block);
                Ok(None)
            }
            _ => {
                self.world.remove_block(block, true)?;
                log::debug!("Removed block at {:?}", block);
                Ok(Some(block))
            }
        }
    }

    /// Places the selected block against the face the player is looking at.
    ///
    /// # Returns
    /// The coordinate of the placed block, if any.
    pub fn place_selected_block(&mut self) -> Result<Option<BlockCoordinate>, WorldError> {
        let (Some(_), Some(previous)) = self.target() else {
            return Ok(None);
        };
        let block_type = self.selected_block();
        self.world.add_block(previous, block_type, true)?;
        log::debug!("Placed {:?} at {:?}", block_type, previous);
        Ok(Some(previous))
    }

    /// Block in the player's line of sight and the empty block in front of it.
    fn target(&self) -> (Option<BlockCoordinate>, Option<BlockCoordinate>) {
        self.world.hit_test(
            self.player.position,
            self.player.sight_vector(),
            self.config.hit_test_distance,
        )
    }

    /// Advances the session by one frame.
    ///
    /// # Arguments
    /// * `dt` - The time elapsed since the last frame
    pub fn update(&mut self, dt: Duration) -> Result<(), EngineError> {
        self.process_input()?;
        self.world.process_queue();

        let sector = self.world.sector_size().sectorize(self.player.position);
        if self.player.sector != Some(sector) {
            self.world.change_sectors(self.player.sector, Some(sector));
            if self.player.sector.is_none() {
                let drained = self.world.process_entire_queue();
                log::info!(
                    "Initial world materialised: {} queue entries, {} blocks shown",
                    drained,
                    self.world.shown_len()
                );
            }
            self.player.sector = Some(sector);
        }

        self.player.tick(&self.world, dt);
        Ok(())
    }
}

/// Represents player actions derived from input
///
/// Held actions mirror the key state every frame. The rest are set for a
/// single frame when their key or button is pressed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub sprint: bool,

    /// View rotation from mouse movement
    pub rotate_view: Option<(f64, f64)>,

    /// Actions that should only trigger on key press, not hold
    pub jump: bool,
    pub toggle_flying: bool,
    pub select_slot: Option<usize>,
    pub break_block: bool,
    pub place_block: bool,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cgmath::Point3;

    use super::*;
    use crate::application_state::input_state::RawInputState;

    const FRAME: Duration = Duration::from_millis(16);

    fn engine_with_extent(world_half_extent: i32) -> EngineState {
        let config = EngineConfig {
            world_half_extent,
            render_distance: 1,
            ..EngineConfig::default()
        };
        EngineState::new(config).unwrap()
    }

    fn engine() -> EngineState {
        engine_with_extent(12)
    }

    /// Input with `keys` and `buttons` just pressed.
    fn pressed(keys: &[KeyCode], buttons: &[MouseButton], delta: Option<(f64, f64)>) -> ProcessedInputState {
        ProcessedInputState {
            keyboard_states: keys.iter().map(|k| (*k, RawInputState::Pressed)).collect(),
            mouse_button_states: buttons.iter().map(|b| (*b, RawInputState::Pressed)).collect(),
            mouse_delta: delta,
        }
    }

    fn settle(engine: &mut EngineState) {
        for _ in 0..120 {
            engine.update(FRAME).unwrap();
        }
    }

    fn look_down(engine: &mut EngineState) {
        engine.set_input_commands(pressed(&[], &[], Some((0.0, 1000.0))));
        engine.update(FRAME).unwrap();
    }

    #[test]
    fn first_frame_materialises_the_world() {
        let mut engine = engine();
        assert_eq!(engine.world.shown_len(), 0);
        engine.update(FRAME).unwrap();

        assert_eq!(engine.player.sector, Some(Point3::new(0, 0, 0)));
        assert!(engine.world.queue().is_empty());
        assert!(engine.world.shown_len() > 0);
        assert_eq!(engine.world.realized_len(), engine.world.shown_len());
        assert!(engine.world.is_shown(Point3::new(0, -2, 0)));
        // the stone bed under the grass floor is buried
        assert!(!engine.world.is_shown(Point3::new(0, -3, 0)));
    }

    #[test]
    fn player_settles_on_the_floor() {
        let mut engine = engine();
        settle(&mut engine);
        assert!((engine.player.position.y - -0.25).abs() < 1e-3);
        assert_eq!(engine.player.vertical_velocity, 0.0);
    }

    #[test]
    fn stone_cannot_be_broken() {
        let mut engine = engine();
        settle(&mut engine);
        look_down(&mut engine);

        engine.set_input_commands(pressed(&[], &[MouseButton::Left], None));
        engine.update(FRAME).unwrap();
        assert_eq!(engine.world.block_at(Point3::new(0, -2, 0)), None);
        assert!(engine.world.is_shown(Point3::new(0, -3, 0)));

        assert_eq!(engine.break_targeted_block().unwrap(), None);
        assert_eq!(engine.world.block_at(Point3::new(0, -3, 0)), Some(BlockType::STONE));
    }

    #[test]
    fn right_click_places_selected_block() {
        let mut engine = engine();
        settle(&mut engine);
        look_down(&mut engine);
        assert_eq!(engine.selected_block(), BlockType::BRICK);

        engine.set_input_commands(pressed(&[KeyCode::Digit3], &[MouseButton::Right], None));
        engine.update(FRAME).unwrap();

        assert_eq!(engine.selected_block(), BlockType::SAND);
        assert_eq!(engine.world.block_at(Point3::new(0, -1, 0)), Some(BlockType::SAND));
        assert!(engine.world.is_realized(Point3::new(0, -1, 0)));
    }

    #[test]
    fn jump_and_flying_toggle_fire_once_per_press() {
        let mut engine = engine();
        settle(&mut engine);

        engine.set_input_commands(pressed(&[KeyCode::Space], &[], None));
        engine.update(FRAME).unwrap();
        assert!(engine.player.vertical_velocity > 0.0);

        engine.set_input_commands(pressed(&[KeyCode::Tab], &[], None));
        engine.update(FRAME).unwrap();
        assert!(engine.player.flying);
        engine.update(FRAME).unwrap();
        assert!(engine.player.flying);
    }

    #[test]
    fn walking_across_a_sector_boundary_moves_the_window() {
        let mut engine = engine_with_extent(20);
        settle(&mut engine);
        let mut held = HashMap::new();
        held.insert(KeyCode::KeyD, RawInputState::Held);
        engine.set_input_commands(ProcessedInputState {
            keyboard_states: held,
            mouse_button_states: HashMap::new(),
            mouse_delta: None,
        });

        // yaw 0, moving right is +x; the wall at x = 20 stops the player in sector 1
        for _ in 0..300 {
            engine.update(FRAME).unwrap();
        }
        assert_eq!(engine.player.sector, Some(Point3::new(1, 0, 0)));
        assert!((engine.player.position.x - 19.25).abs() < 1e-3);
        assert!(engine.world.is_shown(Point3::new(19, -2, 0)));
    }

    #[test]
    fn empty_inventory_is_rejected() {
        let config = EngineConfig {
            inventory: Vec::new(),
            ..EngineConfig::default()
        };
        assert!(EngineState::new(config).is_err());
    }
}
