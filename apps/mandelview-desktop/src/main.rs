use anyhow::Result;
use clap::Parser;
use mandelview_render_wgpu::{EscapeRenderer, GpuContext, RenderError};
use mandelview_viewport::{InputEvent, ViewportState, ZoomDirection, apply};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "mandelview", about = "Interactive escape-time fractal viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
}

/// GPU state bundled so it either fully exists or not at all.
struct Gpu {
    context: GpuContext,
    config: wgpu::SurfaceConfiguration,
    renderer: EscapeRenderer,
}

impl Gpu {
    fn init(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let context = GpuContext::new(window)?;

        let surface_caps = context.surface.get_capabilities(&context.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        context.surface.configure(&context.device, &config);

        let renderer = EscapeRenderer::new(&context.device, surface_format)?;

        Ok(Self {
            context,
            config,
            renderer,
        })
    }
}

struct App {
    initial_size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    viewport: ViewportState,
    primary_held: bool,
}

impl App {
    fn new(width: u32, height: u32) -> Self {
        Self {
            initial_size: PhysicalSize::new(width.max(1), height.max(1)),
            window: None,
            gpu: None,
            viewport: ViewportState::initial(width.max(1), height.max(1)),
            primary_held: false,
        }
    }

    /// Run one controller step and request a redraw if the state moved.
    fn handle_input(&mut self, event: InputEvent) {
        let next = apply(&self.viewport, event);
        if next != self.viewport {
            self.viewport = next;
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &self.gpu else {
            return;
        };

        let output = match gpu.context.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.context.surface.configure(&gpu.context.device, &gpu.config);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer
            .draw(&gpu.context.device, &gpu.context.queue, &view, &self.viewport);

        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Mandelview")
            .with_inner_size(self.initial_size);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match Gpu::init(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("failed to initialize rendering: {e}");
                event_loop.exit();
                return;
            }
        };

        self.viewport = ViewportState::initial(gpu.config.width, gpu.config.height);
        window.request_redraw();

        self.window = Some(window);
        self.gpu = Some(gpu);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let (width, height) = (new_size.width.max(1), new_size.height.max(1));
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = width;
                    gpu.config.height = height;
                    gpu.context.surface.configure(&gpu.context.device, &gpu.config);
                }
                self.handle_input(InputEvent::Resize { width, height });
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.primary_held = state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y,
                };
                let direction = if scroll > 0.0 {
                    ZoomDirection::In
                } else if scroll < 0.0 {
                    ZoomDirection::Out
                } else {
                    return;
                };
                self.handle_input(InputEvent::Zoom(direction));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.handle_input(InputEvent::Pan {
                dx,
                dy,
                primary_held: self.primary_held,
            });
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("mandelview starting");

    let event_loop = EventLoop::new()?;
    // Demand-driven rendering: redraws are requested by state changes,
    // there is no continuous animation loop.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}
