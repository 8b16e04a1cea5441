use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub clear_color: [f32; 4],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Modern OpenGL".to_string(),
            width: 800,
            height: 600,
            vertex_shader: PathBuf::from("assets/shaders/triangle.vert"),
            fragment_shader: PathBuf::from("assets/shaders/triangle.frag"),
            clear_color: [0.17, 0.17, 0.17, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shader_paths() {
        let config = AppConfig::default();
        assert_eq!(
            config.vertex_shader,
            PathBuf::from("assets/shaders/triangle.vert")
        );
        assert_eq!(
            config.fragment_shader,
            PathBuf::from("assets/shaders/triangle.frag")
        );
    }

    #[test]
    fn test_default_window_and_clear() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Modern OpenGL");
        assert_eq!(config.clear_color, [0.17, 0.17, 0.17, 1.0]);
    }
}
