use anyhow::{anyhow, Context as _, Result};
use glow::HasContext;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{ffi::CString, num::NonZeroU32};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use modern_gl::{AppConfig, ShaderProgram, TriangleMesh};

/// Everything that issues draw calls, deleted together when the window
/// closes.
struct Renderer {
    program: ShaderProgram,
    mesh: TriangleMesh,
}

impl Renderer {
    fn draw(&self, gl: &glow::Context) {
        self.program.bind(gl);
        self.mesh.draw(gl);
    }

    fn delete(self, gl: &glow::Context) {
        self.mesh.delete(gl);
        self.program.delete(gl);
    }
}

struct App {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    gl: glow::Context,
    renderer: Option<Renderer>,
    clear_color: [f32; 4],
}

impl App {
    fn new(config: AppConfig) -> Result<(Self, EventLoop<()>)> {
        SimpleLogger::new().with_level(LevelFilter::Info).init()?;
        info!("Initializing application...");

        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24)
            .with_stencil_size(8);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // Prefer the config with the most MSAA samples.
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("the display offered no GL configs")
            })
            .map_err(|e| anyhow!("could not pick a GL framebuffer config: {e}"))?;

        let window = window.ok_or_else(|| anyhow!("the display builder produced no window"))?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("could not create the OpenGL 3.3 core context")?;

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .context("could not create the GL surface")?;

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("could not make the GL context current")?;

        // Resolve the GL entry points against the live context once; every
        // draw-issuing routine takes this context explicitly.
        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                let symbol = CString::new(symbol).unwrap();
                gl_display.get_proc_address(symbol.as_c_str()) as *const _
            })
        };

        info!("Building shader program...");
        let program = ShaderProgram::from_files(&gl, &config.vertex_shader, &config.fragment_shader)?;
        let mesh = TriangleMesh::new(&gl, &program)?;

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
                gl,
                renderer: Some(Renderer { program, mesh }),
                clear_color: config.clear_color,
            },
            event_loop,
        ))
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.gl_surface.resize(&self.gl_context, width, height);
            unsafe {
                self.gl.viewport(0, 0, size.width as i32, size.height as i32);
            }
        }
    }

    fn redraw(&self) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
        if let Some(renderer) = &self.renderer {
            renderer.draw(&self.gl);
        }
        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            error!("Could not swap buffers: {e}");
        }
    }

    fn cleanup(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.delete(&self.gl);
        }
    }
}

fn main() -> Result<()> {
    let (mut app, event_loop) = App::new(AppConfig::default())?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                app.cleanup();
                elwt.exit();
            }
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::RedrawRequested => app.redraw(),
            _ => (),
        },
        Event::AboutToWait => {
            app.window.request_redraw();
        }
        _ => (),
    })?;

    Ok(())
}
