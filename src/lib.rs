pub mod assets;
pub mod config;
pub mod render;

// Re-export commonly used types
pub use assets::sources::{read_entire_file, SourceError};
pub use config::AppConfig;
pub use render::mesh::{MeshError, TriangleMesh, Vertex};
pub use render::shader::{ShaderError, ShaderProgram, ShaderStage};
