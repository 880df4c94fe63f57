use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use cgmath::Vector3;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::animation::{Animation, AnimationManager};
use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    rendering::render_engine::RenderEngine,
    scene::Scene,
};

pub struct GladeApp {
    event_loop: Option<EventLoop<()>>,
    pub app_state: AppState,
}

pub struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    pub scene: Scene,
    animations: AnimationManager,
    paper_texture: Option<PathBuf>,
    started: Instant,
    last_frame: Option<Instant>,
}

impl GladeApp {
    /// Create a new application with the demo's default orbit camera
    pub async fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        // Start pose equivalent to an eye at (30, 25, 30) looking at the
        // temple; the polar cap keeps the orbit just above the horizon
        let mut camera = OrbitCamera::new(
            49.0,
            1.04,
            std::f32::consts::FRAC_PI_4,
            Vector3::new(0.0, 0.0, 0.0),
            1.5,
        );
        camera.limits.min_distance = 15.0;
        camera.limits.max_distance = 100.0;
        camera.limits.max_polar = std::f32::consts::PI / 2.1;
        let controller = CameraController::new(0.005, 0.1);

        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                animations: AnimationManager::new(),
                paper_texture: None,
                started: Instant::now(),
                last_frame: None,
            },
        }
    }

    /// Mutable access to the scene for world building
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Attach a per-frame animation
    pub fn attach_animation(&mut self, animation: impl Animation + 'static) {
        self.app_state.animations.attach(animation);
    }

    /// Request the watercolor pass, fed by a paper texture at `path`.
    ///
    /// The load happens during GPU bring-up; failure logs a warning and the
    /// demo renders without the effect.
    pub fn set_paper_texture(&mut self, path: impl Into<PathBuf>) {
        self.app_state.paper_texture = Some(path.into());
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("glade")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.scene
                .camera_manager
                .camera
                .resize_projection(width, height);

            let window_clone = window_handle.clone();
            let mut renderer =
                pollster::block_on(
                    async move { RenderEngine::new(window_clone, width, height).await },
                );

            if let Some(paper) = &self.paper_texture {
                match renderer.enable_watercolor(paper) {
                    Ok(()) => log::info!("watercolor effect initialized"),
                    Err(e) => {
                        log::warn!("{}; rendering without watercolor effect", e);
                    }
                }
            }

            self.scene
                .init_gpu_resources(renderer.device(), renderer.queue());

            self.render_engine = Some(renderer);
            self.started = Instant::now();
            self.last_frame = None;
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if matches!(
                    event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.scene.camera_manager.process_keyboard_event(&event);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = self
                    .last_frame
                    .map(|last| (now - last).as_secs_f32())
                    .unwrap_or(0.0);
                self.last_frame = Some(now);
                let elapsed = self.started.elapsed().as_secs_f32();

                self.animations.update_all(dt, elapsed, &mut self.scene);
                self.scene.update();
                self.scene.update_all_transforms(render_engine.queue());
                render_engine.update(
                    self.scene.camera_manager.camera.uniform,
                    &self.scene.point_lights,
                );
                render_engine.render_frame(&self.scene);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
