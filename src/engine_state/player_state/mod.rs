//! # Player State
//!
//! The player's body: where it is, where it looks, and how it moves through
//! the block grid.
//!
//! ## Key Components
//! * [`PlayerState`] - position, velocity, look angles and movement flags
//! * [`movement`] - sight and motion vectors from look angles and strafe intent
//! * [`collision`] - per-axis collision against the world
//!
//! ## Integration
//!
//! One frame of physics is [`PlayerState::tick`]: the frame time is clamped and
//! split into a fixed number of substeps, each of which moves the player and
//! resolves collisions. Vertical velocity accumulates gravity while walking and
//! is zeroed on landing or hitting a ceiling.

pub mod collision;
pub mod movement;

use cgmath::{Deg, InnerSpace, Point3, Vector3};
use web_time::Duration;

use collision::collide;
use movement::{motion_vector, sight_vector, StrafeIntent};

use super::engine_config::EngineConfig;
use super::voxels::spatial::Sector;
use super::voxels::world::BlockOccupancy;

/// Limits on pitch, so the player cannot look past straight up or down.
const MAX_PITCH: Deg<f32> = Deg(90.0);

/// Physics constants copied out of [`EngineConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementSettings {
    pub walking_speed: f32,
    pub sprinting_speed: f32,
    pub flying_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    pub terminal_velocity: f32,
    pub height: u32,
    pub padding: f32,
    pub max_tick_seconds: f32,
    pub substeps: u32,
    pub max_step_distance: f32,
    pub mouse_sensitivity: f32,
}

impl From<&EngineConfig> for MovementSettings {
    fn from(config: &EngineConfig) -> Self {
        MovementSettings {
            walking_speed: config.walking_speed,
            sprinting_speed: config.sprinting_speed,
            flying_speed: config.flying_speed,
            gravity: config.gravity,
            jump_speed: config.jump_speed(),
            terminal_velocity: config.terminal_velocity,
            height: config.player_height,
            padding: config.collision_padding,
            max_tick_seconds: config.max_tick_seconds,
            substeps: config.tick_substeps.max(1),
            max_step_distance: config.max_step_distance,
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }
}

/// The player's position, orientation and movement state.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// Eye position; the body extends `height - 1` blocks below it
    pub position: Point3<f32>,
    /// Vertical speed in blocks per second, positive upwards
    pub vertical_velocity: f32,
    /// Horizontal look angle
    pub yaw: Deg<f32>,
    /// Vertical look angle, clamped to `-90°..=90°`
    pub pitch: Deg<f32>,
    /// Requested movement direction
    pub strafe: StrafeIntent,
    /// Flying ignores gravity and follows pitch
    pub flying: bool,
    /// Sprinting raises walking speed
    pub sprinting: bool,
    /// Sector the world was last made visible around, `None` before the first frame
    pub sector: Option<Sector>,
    settings: MovementSettings,
}

impl PlayerState {
    /// Creates a player standing at the configured spawn position, looking
    /// down negative Z.
    pub fn new(config: &EngineConfig) -> Self {
        let [x, y, z] = config.spawn_position;
        PlayerState {
            position: Point3::new(x, y, z),
            vertical_velocity: 0.0,
            yaw: Deg(0.0),
            pitch: Deg(0.0),
            strafe: StrafeIntent::default(),
            flying: false,
            sprinting: false,
            sector: None,
            settings: MovementSettings::from(config),
        }
    }

    /// The physics constants this player moves with.
    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    /// Unit vector pointing where the player looks.
    pub fn sight_vector(&self) -> Vector3<f32> {
        sight_vector(self.yaw, self.pitch)
    }

    /// Unit vector the player is currently moving along, or zero.
    pub fn motion_vector(&self) -> Vector3<f32> {
        motion_vector(self.yaw, self.pitch, self.strafe, self.flying)
    }

    /// Horizontal speed for the current movement mode.
    pub fn speed(&self) -> f32 {
        if self.flying {
            self.settings.flying_speed
        } else if self.sprinting {
            self.settings.sprinting_speed
        } else {
            self.settings.walking_speed
        }
    }

    /// Turns the view by a mouse movement.
    ///
    /// # Arguments
    /// * `dx` - Horizontal mouse delta, positive to the right
    /// * `dy` - Vertical mouse delta, positive downwards
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        let sensitivity = self.settings.mouse_sensitivity;
        self.yaw += Deg(dx as f32 * sensitivity);
        let pitch = self.pitch - Deg(dy as f32 * sensitivity);
        self.pitch = Deg(pitch.0.clamp(-MAX_PITCH.0, MAX_PITCH.0));
    }

    /// Starts a jump if the player is standing still vertically.
    ///
    /// # Returns
    /// Whether the jump started.
    pub fn jump(&mut self) -> bool {
        if self.flying || self.vertical_velocity != 0.0 {
            return false;
        }
        self.vertical_velocity = self.settings.jump_speed;
        true
    }

    /// Switches between flying and walking.
    pub fn toggle_flying(&mut self) {
        self.flying = !self.flying;
        self.vertical_velocity = 0.0;
    }

    /// Advances one frame of physics.
    ///
    /// Frames longer than `max_tick_seconds` are shortened, then split into
    /// `substeps` equal steps.
    pub fn tick<W: BlockOccupancy + ?Sized>(&mut self, world: &W, dt: Duration) {
        let dt = dt.as_secs_f32().min(self.settings.max_tick_seconds);
        let step = dt / self.settings.substeps as f32;
        for _ in 0..self.settings.substeps {
            self.step(world, step);
        }
    }

    /// Moves the player once and resolves collisions.
    pub fn step<W: BlockOccupancy + ?Sized>(&mut self, world: &W, dt: f32) {
        let mut displacement = self.motion_vector() * (self.speed() * dt);

        let horizontal = Vector3::new(displacement.x, 0.0, displacement.z);
        let distance = horizontal.magnitude();
        if distance > self.settings.max_step_distance {
            let scale = self.settings.max_step_distance / distance;
            displacement.x *= scale;
            displacement.z *= scale;
        }

        if !self.flying {
            self.vertical_velocity -= dt * self.settings.gravity;
            self.vertical_velocity = self
                .vertical_velocity
                .max(-self.settings.terminal_velocity);
            displacement.y += self.vertical_velocity * dt;
        }

        let collision = collide(
            world,
            self.position + displacement,
            self.settings.height,
            self.settings.padding,
        );
        self.position = collision.position;
        if collision.vertical {
            self.vertical_velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::engine_state::voxels::spatial::BlockCoordinate;

    struct Solid(HashSet<BlockCoordinate>);

    impl BlockOccupancy for Solid {
        fn is_occupied(&self, coord: BlockCoordinate) -> bool {
            self.0.contains(&coord)
        }
    }

    /// A 9x9 floor at `y`.
    fn floor(y: i32) -> Solid {
        let mut blocks = HashSet::new();
        for x in -4..=4 {
            for z in -4..=4 {
                blocks.insert(Point3::new(x, y, z));
            }
        }
        Solid(blocks)
    }

    fn player() -> PlayerState {
        PlayerState::new(&EngineConfig::default())
    }

    #[test]
    fn falling_player_lands_and_stops() {
        let world = floor(-2);
        let mut player = player();
        player.position = Point3::new(0.0, 0.1, 0.0);
        player.vertical_velocity = -5.0;

        player.tick(&world, Duration::from_secs_f32(0.1));

        assert!((player.position.y - -0.25).abs() < 1e-4, "{:?}", player.position);
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn gravity_accelerates_up_to_terminal_velocity() {
        let world = Solid(HashSet::new());
        let mut player = player();
        for _ in 0..100 {
            player.tick(&world, Duration::from_secs_f32(0.2));
        }
        assert_eq!(player.vertical_velocity, -player.settings().terminal_velocity);
    }

    #[test]
    fn jump_only_from_rest() {
        let mut player = player();
        assert!(player.jump());
        assert!((player.vertical_velocity - 40.0f32.sqrt()).abs() < 1e-5);
        assert!(!player.jump());

        let mut flyer = PlayerState::new(&EngineConfig::default());
        flyer.toggle_flying();
        assert!(!flyer.jump());
    }

    #[test]
    fn jump_reaches_about_one_block() {
        let world = floor(-2);
        let mut player = player();
        player.position = Point3::new(0.0, -0.25, 0.0);
        assert!(player.jump());

        let mut peak = player.position.y;
        for _ in 0..60 {
            player.tick(&world, Duration::from_secs_f32(1.0 / 60.0));
            peak = peak.max(player.position.y);
        }
        assert!(peak > 0.6 && peak < 0.8, "peak {}", peak);
        assert!((player.position.y - -0.25).abs() < 1e-3);
    }

    #[test]
    fn walking_into_a_wall_stops_at_padding() {
        let mut world = floor(-2);
        world.0.insert(Point3::new(0, -1, -2));
        world.0.insert(Point3::new(0, 0, -2));
        let mut player = player();
        player.position = Point3::new(0.0, -0.25, 0.0);
        player.strafe = StrafeIntent::from_keys(true, false, false, false);

        for _ in 0..30 {
            player.tick(&world, Duration::from_secs_f32(1.0 / 60.0));
        }
        assert!((player.position.z - -1.25).abs() < 1e-4, "{:?}", player.position);
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn long_frames_are_clamped() {
        let world = floor(-2);
        let mut player = player();
        player.position = Point3::new(0.0, -0.25, 0.0);
        player.strafe = StrafeIntent::from_keys(false, false, false, true);
        player.tick(&world, Duration::from_secs(5));
        // 0.2 s at walking speed
        assert!((player.position.x - 1.0).abs() < 1e-4, "{:?}", player.position);
    }

    #[test]
    fn flying_ignores_gravity_and_follows_pitch() {
        let world = floor(-100);
        let mut player = player();
        player.toggle_flying();
        player.pitch = Deg(90.0);
        player.strafe = StrafeIntent::from_keys(true, false, false, false);
        player.tick(&world, Duration::from_secs_f32(0.1));
        assert!((player.position.y - 1.5).abs() < 1e-4);
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn sprinting_is_faster_than_walking() {
        let mut player = player();
        let walking = player.speed();
        player.sprinting = true;
        assert!(player.speed() > walking);
        player.toggle_flying();
        assert_eq!(player.speed(), player.settings().flying_speed);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut player = player();
        player.rotate(100.0, -10_000.0);
        assert_eq!(player.pitch, Deg(90.0));
        assert!((player.yaw.0 - 15.0).abs() < 1e-4);
        player.rotate(0.0, 10_000.0);
        assert_eq!(player.pitch, Deg(-90.0));
    }
}
