//! Seed world generation.
//!
//! Only a flat world is generated: a grass floor over a stone bed, fenced in
//! by a stone wall. Blocks are added without showing them; the first sector
//! change makes the ones near the player visible.

use cgmath::Point3;

use super::block::block_type::BlockType;
use super::world::World;
use crate::engine_state::rendering::mesh::MeshBackend;
use crate::error::WorldError;

/// Height of the grass floor.
pub const FLOOR_HEIGHT: i32 = -2;

/// Highest block of the perimeter wall.
pub const WALL_TOP: i32 = 2;

/// Fills `world` with a flat floor spanning `-half_extent..=half_extent` in `x`
/// and `z`.
///
/// # Layout
/// * `y = -2`: grass, stone on the outer ring
/// * `y = -3`: stone
/// * outer ring (`|x| == n` or `|z| == n`): stone walls at `y = -1..=2`
///
/// # Returns
/// The number of blocks placed.
pub fn flat_world<B: MeshBackend>(world: &mut World<B>, half_extent: i32) -> Result<usize, WorldError> {
    let n = half_extent;
    let mut placed = 0;
    for x in -n..=n {
        for z in -n..=n {
            let perimeter = x.abs() == n || z.abs() == n;
            let floor = if perimeter { BlockType::STONE } else { BlockType::GRASS };
            world.add_block(Point3::new(x, FLOOR_HEIGHT, z), floor, false)?;
            world.add_block(Point3::new(x, FLOOR_HEIGHT - 1, z), BlockType::STONE, false)?;
            placed += 2;
            if perimeter {
                for y in FLOOR_HEIGHT + 1..=WALL_TOP {
                    world.add_block(Point3::new(x, y, z), BlockType::STONE, false)?;
                    placed += 1;
                }
            }
        }
    }
    log::info!("Generated flat world of {} blocks (half extent {})", placed, n);
    Ok(placed)
}
