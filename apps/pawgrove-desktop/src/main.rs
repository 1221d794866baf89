use anyhow::{Context, Result, anyhow, ensure};
use clap::Parser;
use glam::{Mat4, Vec3};
use pawgrove_assets::{MeshData, TextureData, import_obj};
use pawgrove_camera::Camera;
use pawgrove_common::FrameTimer;
use pawgrove_input::{CameraController, ControllerConfig, MoveState};
use pawgrove_render_wgpu::{MeshRenderer, RenderContext};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Longest frame step fed to the camera, so a stall doesn't teleport it.
const MAX_FRAME_SECONDS: f32 = 0.1;

#[derive(Parser, Debug)]
#[command(name = "pawgrove-desktop", about = "First-person viewer for a textured mesh")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window title
    #[arg(long, default_value = "PawGrove")]
    title: String,

    /// Client area width in pixels
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// Client area height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Wavefront OBJ model to display (a cube when omitted)
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Image applied to the model (a checkerboard when omitted)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 45.0)]
    fov_degrees: f32,

    /// Near clip distance
    #[arg(long, default_value_t = 1.0)]
    near: f32,

    /// Far clip distance
    #[arg(long, default_value_t = 1000.0)]
    far: f32,

    /// Movement speed in world units per second
    #[arg(long, default_value_t = 10.0)]
    move_speed: f32,

    /// Mouse look in degrees per pixel
    #[arg(long, default_value_t = 0.25)]
    look_sensitivity: f32,
}

impl Cli {
    fn lens(&self) -> Result<Lens> {
        let fov_y = self.fov_degrees.to_radians();
        ensure!(
            fov_y > 0.0 && fov_y < std::f32::consts::PI,
            "field of view must be between 0 and 180 degrees, got {}",
            self.fov_degrees
        );
        ensure!(
            self.near > 0.0 && self.near < self.far,
            "clip planes must satisfy 0 < near < far, got near={} far={}",
            self.near,
            self.far
        );
        Ok(Lens {
            fov_y,
            near: self.near,
            far: self.far,
        })
    }

    fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            move_speed: self.move_speed,
            look_sensitivity: self.look_sensitivity.to_radians(),
        }
    }

    fn load_scene(&self) -> Result<Scene> {
        let meshes = match &self.mesh {
            Some(path) => import_obj(path)
                .with_context(|| format!("failed to import {}", path.display()))?,
            None => vec![MeshData::cube(1.0)],
        };
        let texture = match &self.texture {
            Some(path) => TextureData::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => TextureData::checkerboard(256, 8, [235, 235, 235, 255], [40, 90, 160, 255]),
        };
        Ok(Scene { meshes, texture })
    }
}

/// Frustum settings reapplied whenever the aspect ratio changes.
#[derive(Debug, Clone, Copy)]
struct Lens {
    fov_y: f32,
    near: f32,
    far: f32,
}

/// CPU-side scene data waiting for the GPU to come up.
struct Scene {
    meshes: Vec<MeshData>,
    texture: TextureData,
}

/// Map a key to the movement flag it controls. Returns false for other keys.
fn set_move_key(keys: &mut MoveState, key: KeyCode, pressed: bool) -> bool {
    let flag = match key {
        KeyCode::KeyW | KeyCode::ArrowUp => &mut keys.forward,
        KeyCode::KeyS | KeyCode::ArrowDown => &mut keys.backward,
        KeyCode::KeyA | KeyCode::ArrowLeft => &mut keys.left,
        KeyCode::KeyD | KeyCode::ArrowRight => &mut keys.right,
        _ => return false,
    };
    *flag = pressed;
    true
}

/// Camera and input state. Owns no GPU resources.
struct AppState {
    title: String,
    camera: Camera,
    controller: CameraController,
    lens: Lens,
    keys: MoveState,
    mouse_captured: bool,
    last_frame: Instant,
    timer: FrameTimer,
}

impl AppState {
    fn new(cli: &Cli) -> Result<Self> {
        let lens = cli.lens()?;
        let controller = CameraController::new(cli.controller_config())?;

        let mut camera = Camera::new();
        camera.set_lens(
            lens.fov_y,
            cli.width as f32 / cli.height.max(1) as f32,
            lens.near,
            lens.far,
        );
        camera.look_at(Vec3::new(0.0, 2.0, -15.0), Vec3::ZERO, Vec3::Y);
        camera.update_view_matrix();

        Ok(Self {
            title: cli.title.clone(),
            camera,
            controller,
            lens,
            keys: MoveState::default(),
            mouse_captured: false,
            last_frame: Instant::now(),
            timer: FrameTimer::new(120),
        })
    }

    /// Poll input into the camera and rebuild its view matrix.
    ///
    /// Returns a new window title when frame statistics are due.
    fn advance(&mut self) -> Option<String> {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        let dt = elapsed.as_secs_f32().min(MAX_FRAME_SECONDS);
        self.controller.update(&mut self.camera, &self.keys, dt);

        let stats = self.timer.record(elapsed)?;
        let p = self.camera.position();
        tracing::debug!("{stats}, camera at ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z);
        Some(format!("{}    {stats}", self.title))
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.camera
            .set_lens(self.lens.fov_y, aspect, self.lens.near, self.lens.far);
    }

    /// Drop held keys and mouse capture, e.g. when the window loses focus.
    fn release_input(&mut self) {
        if !self.keys.is_idle() || self.mouse_captured {
            tracing::debug!("releasing held input");
        }
        self.keys = MoveState::default();
        self.mouse_captured = false;
    }

    fn mouse_moved(&mut self, dx: f32, dy: f32) {
        if self.mouse_captured {
            self.controller.look(&mut self.camera, dx, dy);
        }
    }
}

/// GPU objects created once the window exists.
struct Gpu {
    context: RenderContext,
    renderer: MeshRenderer,
}

struct App {
    state: AppState,
    width: u32,
    height: u32,
    scene: Option<Scene>,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(cli: &Cli, scene: Scene) -> Result<Self> {
        Ok(Self {
            state: AppState::new(cli)?,
            width: cli.width,
            height: cli.height,
            scene: Some(scene),
            window: None,
            gpu: None,
            error: None,
        })
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.state.title.clone())
            .with_inner_size(PhysicalSize::new(self.width, self.height))
            .with_position(PhysicalPosition::new(300, 300));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let context = RenderContext::new(window.clone(), size.width, size.height)?;
        let scene = self
            .scene
            .take()
            .ok_or_else(|| anyhow!("scene already uploaded"))?;
        let renderer = MeshRenderer::new(&context, &scene.meshes, &scene.texture)?;
        tracing::info!(
            backend = context.backend().to_str(),
            "renderer ready with {} mesh(es)",
            scene.meshes.len()
        );

        self.state.set_aspect(context.aspect());
        self.window = Some(window);
        self.gpu = Some(Gpu { context, renderer });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self) {
        if let Some(title) = self.state.advance() {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
        }

        if let Some(gpu) = &self.gpu {
            if let Err(e) = gpu
                .renderer
                .draw_frame(&gpu.context, &self.state.camera, Mat4::IDENTITY)
            {
                tracing::error!("frame failed: {e}");
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            self.fail(event_loop, e.context("graphics initialization failed"));
        }
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
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(new_size.width, new_size.height);
                    gpu.renderer.resize(&gpu.context);
                    self.state.set_aspect(gpu.context.aspect());
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                if key == KeyCode::Escape && pressed {
                    event_loop.exit();
                    return;
                }
                set_move_key(&mut self.state.keys, key, pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.state.mouse_captured = btn_state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    window.set_cursor_visible(!self.state.mouse_captured);
                }
            }
            WindowEvent::Focused(false) => {
                self.state.release_input();
                if let Some(window) = &self.window {
                    window.set_cursor_visible(true);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.mouse_moved(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("pawgrove-desktop starting");

    let scene = cli.load_scene()?;
    let mut app = App::new(&cli, scene)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
