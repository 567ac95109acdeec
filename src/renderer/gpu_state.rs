use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Result;
use wgpu::util::DeviceExt;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowBuilder};

use super::box_renderer::{collect_instances, BoxRenderer};
use super::error::{gpu_operation_error, RendererErrorContext};
use crate::app::AppContext;
use crate::camera::{build_camera_uniform, CameraUniform};
use crate::config::EngineConfig;
use crate::constants::render;
use crate::input::START_KEY;
use crate::time::Clock;
use crate::ui::HudSink;

/// Shared "start requested" flag. Set by the Enter key natively and by the
/// page's start button in the browser; consumed once per frame.
pub type StartRequest = Rc<Cell<bool>>;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth_texture: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    box_renderer: BoxRenderer,
    window: Arc<Window>,
    frames_rendered: u64,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        log::info!("[GpuState::new] Starting GPU initialization");
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .renderer_context("create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| gpu_operation_error("request_adapter", "no compatible adapter"))?;

        let info = adapter.get_info();
        log::info!(
            "[GpuState::new] Adapter: {} ({:?}, {:?})",
            info.name,
            info.device_type,
            info.backend
        );

        #[cfg(target_arch = "wasm32")]
        let limits = wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());
        #[cfg(not(target_arch = "wasm32"))]
        let limits = wgpu::Limits::default();

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: limits,
                    label: Some("Ball Hunt Device"),
                },
                None,
            )
            .await
            .map_err(|e| gpu_operation_error("request_device", e))?;

        device.on_uncaptured_error(Box::new(|error| {
            log::error!("[GPU] Uncaptured device error: {:?}", error);
        }));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| gpu_operation_error("surface_capabilities", "no surface formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        log::info!("[GpuState::new] Surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform {
                view_projection_matrix: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let box_renderer = BoxRenderer::new(&device, config.format, &camera_bind_group_layout);

        log::info!("[GpuState::new] GPU ready at {}x{}", config.width, config.height);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            depth_texture,
            camera_buffer,
            camera_bind_group,
            box_renderer,
            window,
            frames_rendered: 0,
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let max_dimension = self.device.limits().max_texture_dimension_2d;
        let (width, height, was_clamped) =
            validate_texture_dimensions(new_size.width, new_size.height, max_dimension);
        if was_clamped {
            log::warn!(
                "[GpuState::resize] {}x{} exceeds GPU limit {}, clamping to {}x{}",
                new_size.width,
                new_size.height,
                max_dimension,
                width,
                height
            );
        }

        self.size = PhysicalSize::new(width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = create_depth_texture(&self.device, &self.config);
    }

    pub fn render(&mut self, ctx: &AppContext) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[build_camera_uniform(&ctx.camera)]),
        );
        self.box_renderer.prepare(&self.queue, &collect_instances(ctx));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let [r, g, b] = render::BACKGROUND;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a: 1.0 }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.box_renderer
                .render(&mut render_pass, &self.camera_bind_group);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.frames_rendered += 1;
        if self.frames_rendered == 1 {
            log::info!("[GpuState::render] First frame presented");
        }
        Ok(())
    }
}

/// Pure function - clamps requested texture size to the device limit
fn validate_texture_dimensions(
    requested_width: u32,
    requested_height: u32,
    max_dimension: u32,
) -> (u32, u32, bool) {
    let width = requested_width.min(max_dimension);
    let height = requested_height.min(max_dimension);
    (width, height, width != requested_width || height != requested_height)
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Create the window; in the browser its canvas is attached to the page
pub fn build_window(event_loop: &EventLoop<()>, config: &EngineConfig) -> Result<Arc<Window>> {
    let window = WindowBuilder::new()
        .with_title(&config.window_title)
        .with_inner_size(LogicalSize::new(config.window_width, config.window_height))
        .build(event_loop)
        .renderer_context("create window")?;

    #[cfg(target_arch = "wasm32")]
    crate::web::attach_canvas(&window)?;

    Ok(Arc::new(window))
}

/// Frame loop state moved into the event loop closure
struct Runtime<H: HudSink> {
    gpu: GpuState,
    ctx: AppContext,
    hud: H,
    clock: Clock,
    start_request: StartRequest,
}

impl<H: HudSink> Runtime<H> {
    fn handle_event(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match event {
            Event::WindowEvent { event, window_id } if window_id == self.gpu.window.id() => {
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(physical_size) => {
                        self.gpu.resize(physical_size);
                        self.ctx.resize(physical_size.width, physical_size.height);
                    }
                    WindowEvent::Focused(false) => self.ctx.input.clear(),
                    WindowEvent::KeyboardInput { event, .. } => {
                        if let PhysicalKey::Code(keycode) = event.physical_key {
                            if keycode == START_KEY
                                && event.state == ElementState::Pressed
                                && !event.repeat
                            {
                                self.start_request.set(true);
                            }
                            self.ctx.input.process_key(keycode, event.state);
                        }
                    }
                    WindowEvent::RedrawRequested => self.frame(elwt),
                    _ => {}
                }
            }
            Event::AboutToWait => {
                self.ctx.tick(self.clock.now());
                self.present_events();
                self.gpu.window.request_redraw();
            }
            _ => {}
        }
    }

    fn frame(&mut self, elwt: &EventLoopWindowTarget<()>) {
        let now = self.clock.now();

        if self.start_request.replace(false) {
            if let Err(e) = self.ctx.request_start(now) {
                log::info!("[gpu_state::frame] Start ignored: {}", e);
            }
        }

        self.ctx.update_frame(now);
        self.present_events();

        match self.gpu.render(&self.ctx) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => self.gpu.resize(self.gpu.size()),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu_state::frame] Out of GPU memory, exiting");
                elwt.exit();
            }
            Err(e) => log::warn!("[gpu_state::frame] Render error: {:?}", e),
        }
    }

    fn present_events(&mut self) {
        if !self.ctx.drain_events().is_empty() {
            self.hud.present(&self.ctx.hud);
        }
    }
}

/// Build the GPU state and drive `ctx` from the window's event loop
pub async fn run_app<H: HudSink + 'static>(
    event_loop: EventLoop<()>,
    window: Arc<Window>,
    ctx: AppContext,
    mut hud: H,
    start_request: StartRequest,
) -> Result<()> {
    log::info!("[gpu_state::run_app] Creating GPU state...");
    let gpu = GpuState::new(window).await?;

    hud.present(&ctx.hud);
    let mut runtime = Runtime {
        gpu,
        ctx,
        hud,
        clock: Clock::new(),
        start_request,
    };
    runtime.gpu.window.request_redraw();

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::EventLoopExtWebSys;
        event_loop.spawn(move |event, elwt| runtime.handle_event(event, elwt));
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        event_loop.run(move |event, elwt| runtime.handle_event(event, elwt))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_dimensions_clamp_to_limit() {
        assert_eq!(validate_texture_dimensions(1280, 720, 8192), (1280, 720, false));
        assert_eq!(validate_texture_dimensions(10000, 720, 8192), (8192, 720, true));
        assert_eq!(validate_texture_dimensions(800, 9000, 4096), (800, 4096, true));
    }
}
