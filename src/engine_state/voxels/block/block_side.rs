//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, in the fixed order shared
//! by the geometry utilities, the exposure test and the collision resolver.

use cgmath::Vector3;

/// One of the six axis-aligned faces of a block.
///
/// The discriminants match the order faces are emitted in by
/// [`cube_vertices`](crate::engine_state::rendering::geometry::cube_vertices):
/// `[TOP, BOTTOM, LEFT, RIGHT, FRONT, BACK]`.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The left face (facing negative X)
    LEFT = 2,

    /// The right face (facing positive X)
    RIGHT = 3,

    /// The front face (facing positive Z)
    FRONT = 4,

    /// The back face (facing negative Z)
    BACK = 5,
}

impl BlockSide {
    /// Returns all six block faces in emission order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::LEFT,
            BlockSide::RIGHT,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// Unit normal pointing out of this face.
    ///
    /// Adding the normal to a block coordinate gives the face-adjacent neighbor
    /// on this side.
    pub fn normal(&self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
        }
    }

    /// Whether this face is TOP or BOTTOM, i.e. its normal lies on the y axis.
    pub fn is_on_vertical_axis(&self) -> bool {
        matches!(self, BlockSide::TOP | BlockSide::BOTTOM)
    }
}
