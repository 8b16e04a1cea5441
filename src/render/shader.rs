use std::fmt;
use std::path::{Path, PathBuf};

use glow::HasContext;
use log::debug;
use thiserror::Error;

use crate::assets::sources::{read_entire_file, SourceError};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("shader source {} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
    #[error("could not create a {0} object: {1}")]
    Create(&'static str, String),
    #[error("could not compile {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("could not link shader program: {log}")]
    Link { log: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Compiles one shader stage. On failure the driver's diagnostic log is
/// fetched into the returned error and the shader object is deleted, so a
/// handle only ever escapes this function compiled.
pub fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::NativeShader, ShaderError> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_type())
            .map_err(|e| ShaderError::Create("shader", e))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }
        Ok(shader)
    }
}

fn compile_stage_from_file(
    gl: &glow::Context,
    stage: ShaderStage,
    path: &Path,
) -> Result<glow::NativeShader, ShaderError> {
    let bytes = read_entire_file(path)?;
    let source = String::from_utf8(bytes).map_err(|_| ShaderError::Encoding {
        path: path.to_path_buf(),
    })?;
    debug!("Compiling {} shader from {}", stage, path.display());
    // The source buffer drops at the end of this call, right after the
    // compile attempt.
    compile_stage(gl, stage, &source)
}

/// A linked two-stage shader program. The wrapped handle is always valid:
/// every failure path of the builder reports an error instead of handing
/// out a sentinel.
pub struct ShaderProgram {
    id: glow::NativeProgram,
}

impl ShaderProgram {
    /// Loads, compiles, and links a vertex/fragment pair. Fails fast on the
    /// first load or compile error; the intermediate shader objects never
    /// outlive this call, whether linking succeeds or not.
    pub fn from_files(
        gl: &glow::Context,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage_from_file(gl, ShaderStage::Vertex, vertex_path)?;
        let fragment = match compile_stage_from_file(gl, ShaderStage::Fragment, fragment_path) {
            Ok(fragment) => fragment,
            Err(err) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(err);
            }
        };

        unsafe {
            let program = match gl.create_program() {
                Ok(program) => program,
                Err(e) => {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                    return Err(ShaderError::Create("program", e));
                }
            };
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            // Stage objects are released unconditionally, linked or not.
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }
            debug!(
                "Linked shader program from {} + {}",
                vertex_path.display(),
                fragment_path.display()
            );
            Ok(Self { id: program })
        }
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.id)) };
    }

    pub fn attrib_location(&self, gl: &glow::Context, name: &str) -> Option<u32> {
        unsafe { gl.get_attrib_location(self.id, name) }
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_gl_types() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn test_compile_error_surfaces_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error, unexpected IDENTIFIER".into(),
        };
        let message = err.to_string();
        assert!(message.contains("fragment"));
        assert!(message.contains("syntax error"));
    }

    #[test]
    fn test_link_error_surfaces_log() {
        let err = ShaderError::Link {
            log: "error: vertex shader output `vertex_color' not read".into(),
        };
        assert!(err.to_string().contains("vertex_color"));
    }

    #[test]
    fn test_source_error_passes_through() {
        let err = ShaderError::from(read_entire_file("missing/triangle.frag").unwrap_err());
        assert!(matches!(
            err,
            ShaderError::Source(SourceError::Open { .. })
        ));
    }
}
