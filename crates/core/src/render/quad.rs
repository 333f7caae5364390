//! The static clip-space quad every preview frame draws.
//!
//! Four vertices span the full [-1, 1] view; two index triples triangulate
//! them. The constants are pure data (testable without a GPU); `QuadGeometry`
//! uploads them once into a vertex array + vertex buffer + index buffer set
//! that is created at startup, never mutated, and destroyed at shutdown.

use bytemuck::cast_slice;
use glam::{uvec3, vec2, UVec3, Vec2};

use crate::error::PreviewError;
use crate::render::context::check_gl;

/// The quad corners, clockwise from the top-right.
pub const QUAD_VERTICES: [Vec2; 4] = [
    vec2(1.0, 1.0),
    vec2(1.0, -1.0),
    vec2(-1.0, -1.0),
    vec2(-1.0, 1.0),
];

/// Two triangles sharing the top-right/bottom-left diagonal.
pub const QUAD_INDICES: [UVec3; 2] = [uvec3(0, 1, 3), uvec3(1, 2, 3)];

/// Index count for the quad draw call.
pub const QUAD_INDEX_COUNT: i32 = 6;

/// GPU-side quad geometry: one VAO, one vertex buffer, one index buffer.
pub struct QuadGeometry {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
}

impl QuadGeometry {
    /// Uploads the quad into fresh GL buffers and wires the vertex stream
    /// to `position_attrib` (two floats per vertex, stride of one `Vec2`).
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Resource`] if an object cannot be allocated,
    /// or [`PreviewError::Gl`] if the context rejects the setup calls.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, position_attrib: u32) -> Result<Self, PreviewError> {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. All handles used below
        // come from successful create_* calls, the byte views cover the
        // const arrays exactly, and check_gl verifies the context accepted
        // the setup.
        let (vao, vbo, ebo) = unsafe {
            let vao = gl.create_vertex_array().map_err(PreviewError::Resource)?;
            gl.bind_vertex_array(Some(vao));

            let vbo = gl.create_buffer().map_err(PreviewError::Resource)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );

            let ebo = gl.create_buffer().map_err(PreviewError::Resource)?;
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                cast_slice(&QUAD_INDICES),
                glow::STATIC_DRAW,
            );

            gl.vertex_attrib_pointer_f32(
                position_attrib,
                2,
                glow::FLOAT,
                false,
                std::mem::size_of::<Vec2>() as i32,
                0,
            );
            gl.enable_vertex_attrib_array(position_attrib);

            (vao, vbo, ebo)
        };

        check_gl(gl)?;

        Ok(Self { vao, vbo, ebo })
    }

    /// Issues the indexed draw call for the quad's six indices.
    ///
    /// The caller must have bound the intended draw framebuffer and set a
    /// matching viewport first.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.vao carries valid buffer bindings from new().
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_elements(glow::TRIANGLES, QUAD_INDEX_COUNT, glow::UNSIGNED_INT, 0);
        }
    }

    /// Deletes the vertex array and both buffers.
    ///
    /// Must be called before dropping the `QuadGeometry` for deterministic
    /// cleanup; GL objects have no destructor of their own.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: all three handles are valid objects from new().
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Twice the signed area of the triangle (a, b, c); sign encodes winding.
    fn doubled_signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        (b - a).perp_dot(c - a)
    }

    fn triangle(t: UVec3) -> (Vec2, Vec2, Vec2) {
        (
            QUAD_VERTICES[t.x as usize],
            QUAD_VERTICES[t.y as usize],
            QUAD_VERTICES[t.z as usize],
        )
    }

    #[test]
    fn index_count_matches_the_index_data() {
        assert_eq!(QUAD_INDEX_COUNT as usize, QUAD_INDICES.len() * 3);
    }

    #[test]
    fn indices_reference_only_the_four_vertices() {
        for t in QUAD_INDICES {
            for i in [t.x, t.y, t.z] {
                assert!(
                    (i as usize) < QUAD_VERTICES.len(),
                    "index {i} out of range"
                );
            }
        }
    }

    #[test]
    fn indices_reference_exactly_four_distinct_vertices() {
        let mut seen = [false; 4];
        for t in QUAD_INDICES {
            for i in [t.x, t.y, t.z] {
                seen[i as usize] = true;
            }
        }
        assert_eq!(seen, [true; 4], "every vertex must be referenced");
    }

    #[test]
    fn vertices_span_the_full_clip_space_square() {
        for (x, y) in [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)] {
            assert!(
                QUAD_VERTICES.contains(&vec2(x, y)),
                "missing corner ({x}, {y})"
            );
        }
    }

    #[test]
    fn triangles_are_nondegenerate_with_consistent_winding() {
        let (a0, b0, c0) = triangle(QUAD_INDICES[0]);
        let (a1, b1, c1) = triangle(QUAD_INDICES[1]);
        let area0 = doubled_signed_area(a0, b0, c0);
        let area1 = doubled_signed_area(a1, b1, c1);
        assert!(area0 != 0.0 && area1 != 0.0, "degenerate triangle");
        assert!(
            area0.signum() == area1.signum(),
            "triangles wind in opposite directions: {area0} vs {area1}"
        );
    }

    #[test]
    fn triangles_tile_the_square_exactly_once() {
        // Two triangles sharing one diagonal, with total area equal to the
        // full 2x2 clip-space square, cover it with no overlap and no gap.
        let (a0, b0, c0) = triangle(QUAD_INDICES[0]);
        let (a1, b1, c1) = triangle(QUAD_INDICES[1]);
        let total =
            doubled_signed_area(a0, b0, c0).abs() / 2.0 + doubled_signed_area(a1, b1, c1).abs() / 2.0;
        assert_eq!(total, 4.0, "triangle areas must sum to the 2x2 square");

        let first: Vec<u32> = vec![QUAD_INDICES[0].x, QUAD_INDICES[0].y, QUAD_INDICES[0].z];
        let second = [QUAD_INDICES[1].x, QUAD_INDICES[1].y, QUAD_INDICES[1].z];
        let shared: Vec<u32> = second
            .iter()
            .copied()
            .filter(|i| first.contains(i))
            .collect();
        assert_eq!(shared.len(), 2, "triangles must share exactly one edge");
    }

    #[test]
    fn vertex_stride_is_one_vec2() {
        assert_eq!(std::mem::size_of::<Vec2>(), 8);
        assert_eq!(cast_slice::<Vec2, u8>(&QUAD_VERTICES).len(), 4 * 8);
    }

    #[test]
    fn index_bytes_cover_six_u32s() {
        assert_eq!(cast_slice::<UVec3, u8>(&QUAD_INDICES).len(), 6 * 4);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_uploads_and_binds_the_vertex_stream() {
        // Would test: QuadGeometry::new(gl, 0) succeeds and leaves the
        // attribute array enabled with stride 8.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn destroy_releases_all_three_objects() {
        // Would test: after destroy(), the VAO and both buffers are deleted.
    }
}
