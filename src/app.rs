use cgmath::Vector3;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, fly_camera::FlyCamera,
    },
    rendering::render_engine::RenderEngine,
    scene::Scene,
};
use crate::simulation::{manager::SimulationManager, traits::Simulation};

/// Top-level application: owns the event loop and the shared state.
pub struct PlummetApp {
    event_loop: Option<EventLoop<()>>,
    pub app_state: AppState,
}

/// State threaded through the winit callbacks.
///
/// Everything the frame loop touches lives here explicitly; there is no
/// process-global state.
pub struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    pub scene: Scene,
    pub simulation: SimulationManager,
    last_frame: Instant,
}

impl PlummetApp {
    /// Create a new application with default settings
    pub async fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let camera = FlyCamera::new(Vector3::new(0.0, 2.0, 8.0), 1.5);
        let controller = CameraController::new(4.0, 0.004);
        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                simulation: SimulationManager::new(),
                last_frame: Instant::now(),
            },
        }
    }

    /// Attach a simulation to be stepped every frame
    pub fn attach_simulation(&mut self, simulation: impl Simulation + 'static) {
        self.app_state
            .simulation
            .attach_simulation(Box::new(simulation), &mut self.app_state.scene);
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("plummet")
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
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            renderer.init_scene_resources(&mut self.scene);
            self.render_engine = Some(renderer);
            self.last_frame = Instant::now();
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
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.scene.camera_manager.process_keyboard_event(&key_event);
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
                let delta_time = self.last_frame.elapsed().as_secs_f32();
                self.last_frame = Instant::now();

                // Per-frame order: simulation first, then camera, then the
                // render step reads the resulting transforms.
                self.simulation.update(delta_time, &mut self.scene);
                self.scene.camera_manager.update(delta_time);
                self.scene.update();

                render_engine.update(self.scene.camera_manager.camera.uniform);
                self.scene.update_all_transforms(render_engine.queue());
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
