//! # Block Module
//!
//! Block materials, block faces and the texture-atlas lookup table that ties
//! them together.

pub mod block_side;
pub mod block_type;

/// A single tile of the texture atlas, addressed by grid column and row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasTile {
    /// Column of the tile, counted from the left edge of the atlas.
    pub col: u32,
    /// Row of the tile, counted from the bottom edge of the atlas.
    pub row: u32,
}

impl AtlasTile {
    /// Creates a tile reference for grid cell (`col`, `row`).
    pub const fn new(col: u32, row: u32) -> Self {
        AtlasTile { col, row }
    }
}

/// Maps each block type to the atlas tiles used for its faces.
///
/// The outer array is indexed by `BlockType` as a `usize`.
/// The inner array holds the tiles for [Top, Bottom, Side]; the side tile is
/// reused for all four vertical faces.
pub static BLOCK_TYPE_TO_TEXTURE_TILES: [[AtlasTile; 3]; 4] = [
    [AtlasTile::new(1, 0), AtlasTile::new(0, 1), AtlasTile::new(0, 0)], // GRASS
    [AtlasTile::new(1, 1), AtlasTile::new(1, 1), AtlasTile::new(1, 1)], // SAND
    [AtlasTile::new(2, 0), AtlasTile::new(2, 0), AtlasTile::new(2, 0)], // BRICK
    [AtlasTile::new(2, 1), AtlasTile::new(2, 1), AtlasTile::new(2, 1)], // STONE
];
