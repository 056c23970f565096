//! Scene management
//!
//! The scene owns the camera and the renderable objects. Objects come from
//! the model loader (once, at startup) or from procedural geometry.

pub mod object;

pub use object::{DrawObject, Mesh, Object};

use std::path::Path;

use crate::gfx::camera::camera_utils::CameraManager;
use crate::gfx::geometry;
use crate::gfx::mesh::{self, LoadError, MeshBuffers};

/// Main scene containing the camera and renderable objects
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
}

impl Scene {
    /// Creates a new empty scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
        }
    }

    /// Updates per-frame scene state (camera matrices)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Loads a model file through the mesh loader and adds it as an object
    ///
    /// Runs once at startup; a failure here aborts the run before the
    /// frame loop starts.
    pub fn add_model_file(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&mut Object, LoadError> {
        let buffers = mesh::load_mesh_file(path)?;
        Ok(self.add_mesh_buffers(name, buffers))
    }

    /// Adds an object from already constructed mesh buffers
    pub fn add_mesh_buffers(
        &mut self,
        name: impl Into<String>,
        buffers: MeshBuffers,
    ) -> &mut Object {
        self.objects.push(Object::new(name, Mesh::new(buffers)));
        self.objects.last_mut().unwrap()
    }

    /// Adds a procedural ground plane with tiled texture coordinates
    pub fn add_ground_plane(
        &mut self,
        name: impl Into<String>,
        width: f32,
        depth: f32,
        uv_tiles: f32,
    ) -> &mut Object {
        self.add_mesh_buffers(name, geometry::plane(width, depth, uv_tiles))
    }

    /// Gets a mutable reference to an object by name
    pub fn find_object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|obj| obj.name == name)
    }

    /// Gets the total number of objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Syncs all object transforms to the GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{camera_controller::CameraController, fly_camera::FlyCamera};
    use cgmath::Vector3;

    fn empty_scene() -> Scene {
        let camera = FlyCamera::new(Vector3::new(0.0, 2.0, 8.0), 1.5);
        let controller = CameraController::new(4.0, 0.004);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn objects_are_found_by_name() {
        let mut scene = empty_scene();
        scene.add_ground_plane("ground", 20.0, 20.0, 20.0);
        scene.add_mesh_buffers("model", crate::gfx::geometry::plane(1.0, 1.0, 1.0));

        assert_eq!(scene.object_count(), 2);
        assert!(scene.find_object_mut("model").is_some());
        assert!(scene.find_object_mut("missing").is_none());
    }

    #[test]
    fn missing_model_file_propagates_the_loader_error() {
        let mut scene = empty_scene();
        let result = scene.add_model_file("model", "no/such/model.obj");
        assert!(matches!(result, Err(LoadError::SourceUnavailable(_))));
        assert_eq!(scene.object_count(), 0);
    }
}
