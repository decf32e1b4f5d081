//! # Engine Configuration
//!
//! Tunable constants for the world and the player, loaded from JSON.
//! Every field is optional in the file; missing fields take the defaults below.
//!
//! ```json
//! { "sector_size": 16, "flying_speed": 20.0, "inventory": ["BRICK", "SAND"] }
//! ```

use std::path::Path;

use serde::Deserialize;
use web_time::Duration;

use super::voxels::block::block_type::BlockType;
use crate::error::ConfigError;

/// Largest accepted sector edge, in blocks.
pub const MAX_SECTOR_SIZE: u32 = 1 << 12;
/// Largest accepted render distance, in sectors.
pub const MAX_RENDER_DISTANCE: u32 = 1 << 10;
/// Largest accepted block-picking reach, in blocks.
pub const MAX_HIT_TEST_DISTANCE: u32 = 1 << 10;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sector edge length in blocks
    pub sector_size: u32,
    /// Sectors kept visible around the player
    pub render_distance: u32,
    /// Tiles per texture atlas edge
    pub texture_atlas_size: u32,
    /// Seed world spans `-n..=n` in x and z
    pub world_half_extent: i32,
    /// Frame rate the queue budget is derived from
    pub ticks_per_second: u32,

    /// Walking speed in blocks per second
    pub walking_speed: f32,
    /// Sprinting speed in blocks per second
    pub sprinting_speed: f32,
    /// Flying speed in blocks per second
    pub flying_speed: f32,
    /// Downward acceleration in blocks per second squared
    pub gravity: f32,
    /// Height of a jump in blocks
    pub max_jump_height: f32,
    /// Maximum falling speed in blocks per second
    pub terminal_velocity: f32,

    /// Player height in whole blocks
    pub player_height: u32,
    /// Gap kept between the player and the faces of blocks it collides with
    pub collision_padding: f32,
    /// Frame time above which physics is slowed down rather than stepped further
    pub max_tick_seconds: f32,
    /// Physics substeps per frame
    pub tick_substeps: u32,
    /// Maximum horizontal displacement per physics substep, in blocks
    pub max_step_distance: f32,

    /// Block-picking reach in blocks
    pub hit_test_distance: u32,
    /// Look rotation in degrees per unit of mouse movement
    pub mouse_sensitivity: f32,
    /// Blocks the player can place, selected with the number keys
    pub inventory: Vec<BlockType>,
    /// Where the player starts
    pub spawn_position: [f32; 3],
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            sector_size: 16,
            render_distance: 4,
            texture_atlas_size: 4,
            world_half_extent: 80,
            ticks_per_second: 60,
            walking_speed: 5.0,
            sprinting_speed: 8.0,
            flying_speed: 15.0,
            gravity: 20.0,
            max_jump_height: 1.0,
            terminal_velocity: 50.0,
            player_height: 2,
            collision_padding: 0.25,
            max_tick_seconds: 0.2,
            tick_substeps: 8,
            max_step_distance: 1.0,
            hit_test_distance: 8,
            mouse_sensitivity: 0.15,
            inventory: vec![BlockType::BRICK, BlockType::GRASS, BlockType::SAND],
            spawn_position: [0.0, 0.0, 0.0],
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks every value the engine would otherwise divide by, clamp with or
    /// integrate over.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sector_size == 0 {
            return Err(ConfigError::ZeroSectorSize);
        }
        if self.texture_atlas_size == 0 {
            return Err(ConfigError::ZeroAtlasSize);
        }
        if self.inventory.is_empty() {
            return Err(ConfigError::EmptyInventory);
        }

        let bounded = [
            ("sector_size", self.sector_size, MAX_SECTOR_SIZE),
            ("render_distance", self.render_distance, MAX_RENDER_DISTANCE),
            ("hit_test_distance", self.hit_test_distance, MAX_HIT_TEST_DISTANCE),
        ];
        for (field, value, max) in bounded {
            if value > max {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value.into(),
                    max: max.into(),
                });
            }
        }

        let positive = [
            ("ticks_per_second", self.ticks_per_second as f64),
            ("walking_speed", self.walking_speed as f64),
            ("sprinting_speed", self.sprinting_speed as f64),
            ("flying_speed", self.flying_speed as f64),
            ("gravity", self.gravity as f64),
            ("max_jump_height", self.max_jump_height as f64),
            ("terminal_velocity", self.terminal_velocity as f64),
            ("player_height", self.player_height as f64),
            ("max_tick_seconds", self.max_tick_seconds as f64),
            ("tick_substeps", self.tick_substeps as f64),
            ("max_step_distance", self.max_step_distance as f64),
        ];
        for (field, value) in positive {
            // written as a negated comparison so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }

    /// Wall-clock budget for draining the world queue once per frame.
    pub fn queue_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second.max(1) as f64)
    }

    /// Initial upward speed that lifts the player `max_jump_height` blocks.
    pub fn jump_speed(&self) -> f32 {
        (2.0 * self.gravity * self.max_jump_height).sqrt()
    }
}
