pub mod mesh;
pub mod shader;

pub use mesh::{MeshError, TriangleMesh, Vertex};
pub use shader::{ShaderError, ShaderProgram, ShaderStage};
