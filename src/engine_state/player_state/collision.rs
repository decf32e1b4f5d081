//! # Collision
//!
//! Axis-separated collision of a player column against the block grid.
//!
//! Each axis is resolved on its own against the block adjacent to the player
//! on that side. Fast diagonal movement can clip block corners; per-frame
//! substeps keep displacement small enough for this to be rare.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::spatial::normalize;
use crate::engine_state::voxels::world::BlockOccupancy;

/// Outcome of [`collide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Position after being pushed out of every block it overlapped
    pub position: Point3<f32>,
    /// Whether the floor or ceiling was hit
    pub vertical: bool,
}

/// Pushes a player column out of the blocks around it.
///
/// The column is `height` blocks tall and extends downwards from `position`.
/// For every face, if the player has moved more than `padding` past the centre
/// of its block towards that face and any block of the column has a solid
/// neighbor on that side, the position is clamped back to `padding` from the
/// shared boundary.
///
/// # Arguments
/// * `world` - Occupancy of the block grid
/// * `position` - Candidate position after movement
/// * `height` - Player height in blocks
/// * `padding` - Distance kept from block faces
pub fn collide<W: BlockOccupancy + ?Sized>(
    world: &W,
    position: Point3<f32>,
    height: u32,
    padding: f32,
) -> Collision {
    let block = normalize(position);
    let mut resolved = position;
    let mut vertical = false;

    for side in BlockSide::all() {
        let normal = side.normal();
        for axis in 0..3 {
            let direction = normal[axis];
            if direction == 0 {
                continue;
            }
            let penetration = (resolved[axis] - block[axis] as f32) * direction as f32;
            if penetration < padding {
                continue;
            }
            for dy in 0..height as i32 {
                let mut neighbor = block;
                neighbor.y -= dy;
                neighbor[axis] += direction;
                if !world.is_occupied(neighbor) {
                    continue;
                }
                resolved[axis] -= (penetration - padding) * direction as f32;
                if side.is_on_vertical_axis() {
                    vertical = true;
                }
                break;
            }
        }
    }

    Collision {
        position: resolved,
        vertical,
    }
}
