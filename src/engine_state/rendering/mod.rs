//! Renderer-facing side of the voxel engine.
//!
//! Nothing here talks to a graphics API. This module produces the data a
//! renderer consumes (cube positions, atlas UVs, packed vertices) and defines
//! the [`mesh::MeshBackend`] boundary through which visible blocks are handed
//! over and later released.

pub mod geometry;
pub mod mesh;
mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
