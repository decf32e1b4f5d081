//! # Block Type Module
//!
//! This module defines the materials a block can be made of and which tiles of
//! the texture atlas each of them is drawn with.

use serde::Deserialize;

use super::{AtlasTile, BLOCK_TYPE_TO_TEXTURE_TILES};

/// Enumerates all block materials in the sandbox.
///
/// Air is not a block type: an empty coordinate is simply absent from the
/// World Store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum BlockType {
    /// Grass on top, dirt underneath, grass-on-dirt on the sides.
    GRASS,

    /// Sand on every face.
    SAND,

    /// Brick on every face.
    BRICK,

    /// Stone on every face. Forms the floor and outer walls of the seed world
    /// and cannot be broken by the player.
    STONE,
}

impl BlockType {
    /// Atlas tiles for the top, bottom and side faces, in that order.
    pub fn tiles(&self) -> [AtlasTile; 3] {
        BLOCK_TYPE_TO_TEXTURE_TILES[*self as usize]
    }

    /// Whether the player is allowed to remove a block of this type.
    pub fn is_destructible(&self) -> bool {
        *self != BlockType::STONE
    }
}
