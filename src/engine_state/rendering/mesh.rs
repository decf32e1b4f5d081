//! The boundary between the visibility engine and whatever draws the world.
//!
//! The world only needs two things from a renderer: turn a [`BlockMesh`] into an
//! opaque handle it can keep, and release that handle later. [`MeshStore`] is an
//! in-memory backend that is enough for headless runs and tests.

use std::collections::HashMap;

use cgmath::Point3;

use super::geometry::{cube_vertices, TextureAtlas};
use super::vertex::Vertex;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::spatial::BlockCoordinate;

/// Vertices per block mesh: 6 faces × 4 corners.
pub const BLOCK_MESH_VERTICES: usize = 24;

/// Geometry for a single unit block, ready to be uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockMesh {
    /// Block type the mesh was textured for
    pub block_type: BlockType,
    /// Four vertices per face, in [`BlockSide`](crate::engine_state::voxels::block::block_side::BlockSide) order
    pub vertices: Vec<Vertex>,
}

impl BlockMesh {
    /// Builds the textured unit cube for a block.
    ///
    /// # Arguments
    /// * `coord` - Block the cube is centred on
    /// * `block_type` - Material, selects the atlas tiles
    /// * `atlas` - Atlas the tiles are looked up in
    pub fn new(coord: BlockCoordinate, block_type: BlockType, atlas: &TextureAtlas) -> Self {
        let center = Point3::new(coord.x as f32, coord.y as f32, coord.z as f32);
        let positions = cube_vertices(center, 0.5);
        let [top, bottom, side] = block_type.tiles();
        let uvs = atlas.tex_coords(top, bottom, side);

        let vertices = positions
            .chunks_exact(3)
            .zip(uvs.chunks_exact(2))
            .map(|(p, uv)| Vertex::new([p[0], p[1], p[2]], [uv[0], uv[1]]))
            .collect();

        BlockMesh {
            block_type,
            vertices,
        }
    }
}

/// A renderer-side store of block meshes.
///
/// Implementations decide what a handle is (a buffer slot, a batch entry, an
/// id). The world never inspects handles, it only keeps them until it asks for
/// them to be released.
pub trait MeshBackend {
    /// Opaque reference to a realised mesh.
    type Handle;

    /// Takes ownership of a mesh for the block at `coord` and returns a handle to it.
    fn build(&mut self, coord: BlockCoordinate, mesh: BlockMesh) -> Self::Handle;

    /// Frees the mesh behind `handle`.
    fn release(&mut self, handle: Self::Handle);
}

/// Identifier of a mesh held by a [`MeshStore`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

/// In-memory [`MeshBackend`] that keeps every live mesh in a map.
#[derive(Debug, Default)]
pub struct MeshStore {
    meshes: HashMap<MeshHandle, (BlockCoordinate, BlockMesh)>,
    next_id: u64,
    total_built: u64,
    total_released: u64,
}

impl MeshStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meshes currently alive.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether no mesh is alive.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Looks up a live mesh and the block it was built for.
    pub fn get(&self, handle: &MeshHandle) -> Option<&(BlockCoordinate, BlockMesh)> {
        self.meshes.get(handle)
    }

    /// Meshes built over the lifetime of the store.
    pub fn total_built(&self) -> u64 {
        self.total_built
    }

    /// Meshes released over the lifetime of the store.
    pub fn total_released(&self) -> u64 {
        self.total_released
    }
}

impl MeshBackend for MeshStore {
    type Handle = MeshHandle;

    fn build(&mut self, coord: BlockCoordinate, mesh: BlockMesh) -> MeshHandle {
        let handle = MeshHandle(self.next_id);
        self.next_id += 1;
        self.total_built += 1;
        self.meshes.insert(handle, (coord, mesh));
        handle
    }

    fn release(&mut self, handle: MeshHandle) {
        if self.meshes.remove(&handle).is_some() {
            self.total_released += 1;
        } else {
            log::warn!("Released unknown mesh handle {:?}", handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::geometry::DEFAULT_ATLAS_SIZE;

    #[test]
    fn block_mesh_zips_positions_with_uvs() {
        let atlas = TextureAtlas::new(DEFAULT_ATLAS_SIZE).unwrap();
        let mesh = BlockMesh::new(Point3::new(2, 0, -1), BlockType::GRASS, &atlas);
        assert_eq!(mesh.vertices.len(), BLOCK_MESH_VERTICES);

        // First vertex is the first corner of the top face, textured with the grass top tile.
        assert_eq!(mesh.vertices[0].position, [1.5, 0.5, -1.5]);
        assert_eq!(mesh.vertices[0].tex_coords, [0.25, 0.0]);
        // Last face is the back face, textured with the grass side tile.
        assert_eq!(mesh.vertices[23].position, [2.5, 0.5, -1.5]);
        assert_eq!(mesh.vertices[23].tex_coords, [0.0, 0.25]);
    }

    #[test]
    fn store_hands_out_unique_handles() {
        let atlas = TextureAtlas::new(DEFAULT_ATLAS_SIZE).unwrap();
        let mut store = MeshStore::new();
        let coord = Point3::new(0, 0, 0);
        let a = store.build(coord, BlockMesh::new(coord, BlockType::SAND, &atlas));
        let b = store.build(coord, BlockMesh::new(coord, BlockType::SAND, &atlas));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        store.release(a);
        assert_eq!(store.len(), 1);
        assert!(store.get(&a).is_none());
        assert_eq!(store.get(&b).map(|(c, _)| *c), Some(coord));
        assert_eq!((store.total_built(), store.total_released()), (2, 1));
    }
}
