//! Vertex data structure handed across the renderer boundary.

/// A single textured corner of a block face.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 20 bytes. The layout is `#[repr(C)]` and `Pod` so a renderer can
/// `bytemuck::cast_slice` a mesh straight into a vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// UV texture coordinates within the atlas (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(position: [f32; 3], tex_coords: [f32; 2]) -> Self {
        Vertex {
            position,
            tex_coords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_casts_to_tightly_packed_floats() {
        let vertices = [
            Vertex::new([1.0, 2.0, 3.0], [0.25, 0.5]),
            Vertex::new([4.0, 5.0, 6.0], [0.75, 1.0]),
        ];
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.25, 0.5, 4.0, 5.0, 6.0, 0.75, 1.0]);
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
    }
}
