//! # Falling Cube Demo
//!
//! Loads a textured cube model, drops it from a height, and lets it bounce
//! on the ground plane. Drag with the left mouse button to look around,
//! move with WASD, Space/Shift for up/down.

use plummet::prelude::*;

/// Side length of the physics box and the visual scale of the unit cube,
/// so the rendered mesh matches the collision bounds.
const CUBE_SIZE: f32 = 0.5;

/// Drop height the simulation starts (and resets) from.
const DROP_HEIGHT: f32 = 10.0;

/// Single falling body bounced off the ground plane.
struct DropSimulation {
    body: PhysicsObject,
    ground: Ground,
    running: bool,
}

impl DropSimulation {
    fn new() -> Self {
        Self {
            body: Self::spawn_body(),
            ground: Ground::default(),
            running: true,
        }
    }

    fn spawn_body() -> PhysicsObject {
        PhysicsObject::new(
            Vector3::new(0.0, DROP_HEIGHT, 0.0),
            Vector3::new(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE),
        )
    }

    fn sync_to_scene(&self, scene: &mut Scene) {
        if let Some(object) = scene.find_object_mut("cube") {
            object.set_transform_trs(self.body.position, CUBE_SIZE);
        }
    }
}

impl Simulation for DropSimulation {
    fn initialize(&mut self, scene: &mut Scene) {
        if let Some(ground) = scene.find_object_mut("ground") {
            ground.set_translation(self.ground.position);
        }
        self.sync_to_scene(scene);
    }

    fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        if !self.running {
            return;
        }

        physics::step(&mut self.body, delta_time, &self.ground);
        self.sync_to_scene(scene);
    }

    fn name(&self) -> &str {
        "falling cube"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self, scene: &mut Scene) {
        self.body = Self::spawn_body();
        self.sync_to_scene(scene);
    }
}

/// Builds an RGBA checkerboard so the demo has no binary assets.
fn checkerboard(size: u32, cells: u32, bright: [u8; 3], dark: [u8; 3]) -> TextureImage {
    let cell = (size / cells).max(1);
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let color = if ((x / cell) + (y / cell)) % 2 == 0 {
                bright
            } else {
                dark
            };
            data.extend_from_slice(&[color[0], color[1], color[2], 255]);
        }
    }
    TextureImage::from_rgba(data, size, size)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = plummet::default();

    // The model is loaded once, before the frame loop; a load failure
    // aborts the run here.
    let model_path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/falling_cube/cube.obj");
    let cube = app
        .app_state
        .scene
        .add_model_file("cube", model_path)?;
    cube.set_texture(checkerboard(256, 8, [220, 120, 40], [120, 60, 20]));

    let ground = app
        .app_state
        .scene
        .add_ground_plane("ground", 20.0, 20.0, 20.0);
    ground.set_texture(checkerboard(128, 2, [160, 160, 160], [90, 90, 90]));

    // Start the camera where both the drop and the floor are in view.
    let camera = &mut app.app_state.scene.camera_manager.camera;
    camera.position = Vector3::new(0.0, 4.0, 14.0);
    camera.set_look_at(Vector3::new(0.0, 3.0, 0.0));

    app.attach_simulation(DropSimulation::new());

    app.run()
}
