use bytemuck::{Pod, Zeroable};
use glow::HasContext;
use thiserror::Error;

use super::shader::ShaderProgram;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("could not create a {0} object: {1}")]
    Create(&'static str, String),
    #[error("vertex attribute `{0}` not found in the linked program")]
    AttributeNotFound(&'static str),
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [-0.7, -0.7, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    Vertex {
        position: [0.0, 0.7, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    Vertex {
        position: [0.7, -0.7, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];

const ATTRIBUTES: [(&str, i32, i32); 2] = [
    ("position", 3, 0),
    ("color", 3, 3 * std::mem::size_of::<f32>() as i32),
];

/// One static triangle uploaded to a vertex buffer, with its interleaved
/// position/color attributes wired to locations queried by name from the
/// linked program. A missing attribute name is a hard error rather than a
/// silently ignored location.
pub struct TriangleMesh {
    vertex_array: glow::NativeVertexArray,
    vertex_buffer: glow::NativeBuffer,
    vertex_count: i32,
}

impl TriangleMesh {
    pub fn new(gl: &glow::Context, program: &ShaderProgram) -> Result<Self, MeshError> {
        unsafe {
            let vertex_array = match gl.create_vertex_array() {
                Ok(vertex_array) => vertex_array,
                Err(e) => return Err(MeshError::Create("vertex array", e)),
            };
            gl.bind_vertex_array(Some(vertex_array));

            let vertex_buffer = match gl.create_buffer() {
                Ok(vertex_buffer) => vertex_buffer,
                Err(e) => {
                    gl.delete_vertex_array(vertex_array);
                    return Err(MeshError::Create("buffer", e));
                }
            };
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&TRIANGLE),
                glow::STATIC_DRAW,
            );

            let stride = std::mem::size_of::<Vertex>() as i32;
            for (name, size, offset) in ATTRIBUTES {
                let Some(location) = program.attrib_location(gl, name) else {
                    gl.bind_vertex_array(None);
                    gl.delete_buffer(vertex_buffer);
                    gl.delete_vertex_array(vertex_array);
                    return Err(MeshError::AttributeNotFound(name));
                };
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(location, size, glow::FLOAT, false, stride, offset);
            }
            gl.bind_vertex_array(None);

            Ok(Self {
                vertex_array,
                vertex_buffer,
                vertex_count: TRIANGLE.len() as i32,
            })
        }
    }

    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vertex_array));
            gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
        }
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.vertex_buffer);
            gl.delete_vertex_array(self.vertex_array);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_attribute_pointers() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(std::mem::offset_of!(Vertex, position), 0);
        assert_eq!(std::mem::offset_of!(Vertex, color), 12);
        assert_eq!(ATTRIBUTES[1].2 as usize, std::mem::offset_of!(Vertex, color));
    }

    #[test]
    fn test_triangle_uploads_as_18_floats() {
        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(floats.len(), 18);
        // First vertex: bottom-left, red.
        assert_eq!(&floats[..6], &[-0.7, -0.7, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_each_corner_has_a_distinct_primary_color() {
        let colors: Vec<[f32; 3]> = TRIANGLE.iter().map(|v| v.color).collect();
        assert_eq!(
            colors,
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }
}
