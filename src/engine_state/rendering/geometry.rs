//! Pure geometry helpers for building block meshes.
//!
//! Faces are always produced in the order `[TOP, BOTTOM, LEFT, RIGHT, FRONT, BACK]`
//! (see [`BlockSide`](crate::engine_state::voxels::block::block_side::BlockSide)),
//! four vertices per face, so vertex positions from [`cube_vertices`] can be zipped
//! directly with the UV corners from [`tex_coords`].

use std::num::NonZeroU32;

use cgmath::Point3;

use crate::engine_state::voxels::block::AtlasTile;
use crate::error::ConfigError;

/// Number of floats returned by [`cube_vertices`]: 6 faces × 4 vertices × xyz.
pub const CUBE_VERTEX_FLOATS: usize = 6 * 4 * 3;

/// Number of floats returned by [`tex_coords`]: 6 faces × 4 corners × uv.
pub const CUBE_TEX_COORD_FLOATS: usize = 6 * 4 * 2;

/// Number of tiles per atlas edge used by the bundled texture atlas.
pub const DEFAULT_ATLAS_SIZE: u32 = 4;

/// Returns the corner positions of an axis-aligned cube.
///
/// # Arguments
/// * `center` - Centre of the cube
/// * `half_size` - Half of the cube's edge length
///
/// # Returns
/// 72 floats: for each face in emission order, four `x, y, z` corners wound
/// counter-clockwise when seen from outside the cube.
#[rustfmt::skip]
pub fn cube_vertices(center: Point3<f32>, half_size: f32) -> [f32; CUBE_VERTEX_FLOATS] {
    let (x, y, z, n) = (center.x, center.y, center.z, half_size);
    [
        x-n,y+n,z-n, x-n,y+n,z+n, x+n,y+n,z+n, x+n,y+n,z-n,  // top
        x-n,y-n,z-n, x+n,y-n,z-n, x+n,y-n,z+n, x-n,y-n,z+n,  // bottom
        x-n,y-n,z-n, x-n,y-n,z+n, x-n,y+n,z+n, x-n,y+n,z-n,  // left
        x+n,y-n,z+n, x+n,y-n,z-n, x+n,y+n,z-n, x+n,y+n,z+n,  // right
        x-n,y-n,z+n, x+n,y-n,z+n, x+n,y+n,z+n, x-n,y+n,z+n,  // front
        x+n,y-n,z-n, x-n,y-n,z-n, x-n,y+n,z-n, x+n,y+n,z-n,  // back
    ]
}

/// Maps an atlas grid cell to its four normalised UV corners.
///
/// # Arguments
/// * `col`, `row` - Grid cell of the tile
/// * `atlas_size` - Number of tiles per atlas edge
///
/// # Returns
/// `[u0, v0, u1, v0, u1, v1, u0, v1]`, matching the vertex winding of
/// [`cube_vertices`].
///
/// # Errors
/// [`ConfigError::ZeroAtlasSize`] if `atlas_size` is zero.
pub fn tex_coord(col: u32, row: u32, atlas_size: u32) -> Result<[f32; 8], ConfigError> {
    let atlas_size = NonZeroU32::new(atlas_size).ok_or(ConfigError::ZeroAtlasSize)?;
    Ok(tile_corners(col, row, atlas_size))
}

/// UV corners for all six faces of a block.
///
/// The side tile is reused for the four vertical faces.
///
/// # Errors
/// [`ConfigError::ZeroAtlasSize`] if `atlas_size` is zero.
pub fn tex_coords(
    top: AtlasTile,
    bottom: AtlasTile,
    side: AtlasTile,
    atlas_size: u32,
) -> Result<[f32; CUBE_TEX_COORD_FLOATS], ConfigError> {
    let atlas = TextureAtlas::new(atlas_size)?;
    Ok(atlas.tex_coords(top, bottom, side))
}

fn tile_corners(col: u32, row: u32, atlas_size: NonZeroU32) -> [f32; 8] {
    let m = 1.0 / atlas_size.get() as f32;
    let dx = col as f32 * m;
    let dy = row as f32 * m;
    [dx, dy, dx + m, dy, dx + m, dy + m, dx, dy + m]
}

/// A square texture atlas with a validated, non-zero tile count per edge.
///
/// Validating once up front lets every mesh build look up UVs without a
/// fallible path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextureAtlas {
    size: NonZeroU32,
}

impl TextureAtlas {
    /// # Errors
    /// [`ConfigError::ZeroAtlasSize`] if `size` is zero.
    pub fn new(size: u32) -> Result<Self, ConfigError> {
        let size = NonZeroU32::new(size).ok_or(ConfigError::ZeroAtlasSize)?;
        Ok(TextureAtlas { size })
    }

    /// Tiles per atlas edge.
    pub fn size(&self) -> u32 {
        self.size.get()
    }

    /// UV corners of a single tile.
    pub fn tex_coord(&self, tile: AtlasTile) -> [f32; 8] {
        tile_corners(tile.col, tile.row, self.size)
    }

    /// UV corners for all six faces, in the same order as [`cube_vertices`].
    pub fn tex_coords(
        &self,
        top: AtlasTile,
        bottom: AtlasTile,
        side: AtlasTile,
    ) -> [f32; CUBE_TEX_COORD_FLOATS] {
        let mut result = [0.0; CUBE_TEX_COORD_FLOATS];
        let faces = [top, bottom, side, side, side, side];
        for (chunk, tile) in result.chunks_exact_mut(8).zip(faces) {
            chunk.copy_from_slice(&self.tex_coord(tile));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn cube_vertices_stay_within_half_size_of_center() {
        let center = Point3::new(3.0, -2.0, 7.0);
        let vertices = cube_vertices(center, 0.5);
        assert_eq!(vertices.len(), 72);
        for corner in vertices.chunks_exact(3) {
            assert!((corner[0] - center.x).abs() - 0.5 < EPSILON);
            assert!((corner[1] - center.y).abs() - 0.5 < EPSILON);
            assert!((corner[2] - center.z).abs() - 0.5 < EPSILON);
        }
    }

    #[test]
    fn each_face_lies_on_its_own_plane() {
        let vertices = cube_vertices(Point3::new(0.0, 0.0, 0.0), 1.0);
        let faces: Vec<&[f32]> = vertices.chunks_exact(12).collect();
        // (axis, expected value) for top, bottom, left, right, front, back
        let planes = [(1, 1.0), (1, -1.0), (0, -1.0), (0, 1.0), (2, 1.0), (2, -1.0)];
        for (face, (axis, value)) in faces.iter().zip(planes) {
            for corner in face.chunks_exact(3) {
                assert_eq!(corner[axis], value);
            }
        }
    }

    #[test]
    fn cube_vertices_are_deterministic() {
        let center = Point3::new(1.5, 2.5, 3.5);
        assert_eq!(cube_vertices(center, 0.25), cube_vertices(center, 0.25));
    }

    #[test]
    fn tex_coord_spans_one_tile() {
        let uv = tex_coord(1, 2, 4).unwrap();
        assert_eq!(uv, [0.25, 0.5, 0.5, 0.5, 0.5, 0.75, 0.25, 0.75]);
    }

    #[test]
    fn tex_coord_rejects_zero_atlas() {
        assert!(matches!(tex_coord(3, 1, 0), Err(ConfigError::ZeroAtlasSize)));
        assert!(matches!(TextureAtlas::new(0), Err(ConfigError::ZeroAtlasSize)));
    }

    #[test]
    fn tex_coords_reuses_side_tile_for_all_vertical_faces() {
        let top = AtlasTile::new(1, 0);
        let bottom = AtlasTile::new(0, 1);
        let side = AtlasTile::new(0, 0);
        let uvs = tex_coords(top, bottom, side, DEFAULT_ATLAS_SIZE).unwrap();
        assert_eq!(uvs.len(), 48);

        let atlas = TextureAtlas::new(DEFAULT_ATLAS_SIZE).unwrap();
        assert_eq!(uvs[0..8], atlas.tex_coord(top));
        assert_eq!(uvs[8..16], atlas.tex_coord(bottom));
        for face in uvs[16..].chunks_exact(8) {
            assert_eq!(face, atlas.tex_coord(side));
        }
    }
}
