use cgmath::{Matrix4, SquareMatrix, Vector3};
use wgpu::Device;

use crate::gfx::mesh::{MeshBuffers, Vertex};
use crate::gfx::resources::texture_resource::{TextureImage, TextureResource};

/// CPU-side mesh data plus its lazily created GPU buffers.
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    /// Wraps loader or generator output; GPU buffers are created later by
    /// [`Mesh::init_gpu_resources`].
    pub fn new(buffers: MeshBuffers) -> Self {
        let index_count = buffers.indices.len() as u32;
        Self {
            vertices: buffers.vertices,
            indices: buffers.indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Uploads vertex and index data to the GPU.
    pub fn init_gpu_resources(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// GPU resources owned by one object: its transform uniform, the uploaded
/// texture (if any), and the bind groups the render pass needs.
pub struct ObjectGpuResources {
    pub transform_buffer: wgpu::Buffer,
    pub transform_bind_group: wgpu::BindGroup,
    pub texture: Option<TextureResource>,
    pub texture_bind_group: wgpu::BindGroup,
}

/// A renderable object: one mesh, a model transform, and an optional
/// diffuse texture (a shared white fallback is bound otherwise).
///
/// The texture is held CPU-side until GPU resources are initialized.
pub struct Object {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Matrix4<f32>,
    pub visible: bool,
    texture: Option<TextureImage>,
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    /// Create a new object with an identity transform
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: Matrix4::identity(),
            visible: true,
            texture: None,
            gpu_resources: None,
        }
    }

    /// Assign a diffuse texture, uploaded when GPU resources are created
    pub fn set_texture(&mut self, texture: TextureImage) {
        self.texture = Some(texture);
    }

    /// Set translation, replacing the current transform
    pub fn set_translation(&mut self, translation: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation);
    }

    /// Set a translate-then-scale transform
    ///
    /// This is the shape the frame loop uses every frame: translate by the
    /// body position, scale by a fixed visual factor.
    pub fn set_transform_trs(&mut self, translation: Vector3<f32>, scale: f32) {
        self.transform = Matrix4::from_translation(translation) * Matrix4::from_scale(scale);
    }

    /// Set a non-uniform scale combined with a translation
    pub fn set_transform_trs_xyz(&mut self, translation: Vector3<f32>, scale: Vector3<f32>) {
        self.transform = Matrix4::from_translation(translation)
            * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    }

    /// Sync the transform to the GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        if let Some(gpu_resources) = &self.gpu_resources {
            // cgmath matrices are column-major, which is what the GPU expects
            let transform_data: &[f32; 16] = self.transform.as_ref();

            queue.write_buffer(
                &gpu_resources.transform_buffer,
                0,
                bytemuck::cast_slice(transform_data),
            );
        }
    }

    /// Creates the object's GPU buffers and bind groups.
    ///
    /// `fallback_texture` is bound for objects without their own texture.
    pub fn init_gpu_resources(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        transform_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
        fallback_texture: &TextureResource,
    ) {
        self.mesh.init_gpu_resources(device);

        let transform_data: &[f32; 16] = self.transform.as_ref();
        let transform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Transform Uniform Buffer"),
                contents: bytemuck::cast_slice(transform_data),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
        });

        let texture = self
            .texture
            .as_ref()
            .map(|image| image.upload(device, queue, &self.name));
        let bound_texture = texture.as_ref().unwrap_or(fallback_texture);
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&bound_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&bound_texture.sampler),
                },
            ],
        });

        self.gpu_resources = Some(ObjectGpuResources {
            transform_buffer,
            transform_bind_group,
            texture,
            texture_bind_group,
        });
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let vertex_buffer = match &mesh.vertex_buffer {
            Some(buffer) => buffer,
            None => return, // Skip drawing if not uploaded
        };
        let index_buffer = match &mesh.index_buffer {
            Some(buffer) => buffer,
            None => return,
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_object(&mut self, object: &'b Object) {
        let Some(gpu_resources) = &object.gpu_resources else {
            return;
        };
        self.set_bind_group(1, &gpu_resources.transform_bind_group, &[]);
        self.set_bind_group(2, &gpu_resources.texture_bind_group, &[]);
        self.draw_mesh(&object.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry;

    #[test]
    fn mesh_tracks_counts_from_its_buffers() {
        let mesh = Mesh::new(geometry::plane(4.0, 4.0, 1.0));
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
    }

    #[test]
    fn trs_transform_translates_the_origin() {
        let mut object = Object::new("cube", Mesh::new(geometry::plane(1.0, 1.0, 1.0)));
        object.set_transform_trs(Vector3::new(1.0, 2.0, 3.0), 0.5);

        // Column-major: the last column carries the translation.
        let m = object.transform;
        assert_eq!(m.w.x, 1.0);
        assert_eq!(m.w.y, 2.0);
        assert_eq!(m.w.z, 3.0);
        // Scale sits on the diagonal.
        assert_eq!(m.x.x, 0.5);
        assert_eq!(m.y.y, 0.5);
    }

    #[test]
    fn objects_start_visible_with_identity_transform() {
        let object = Object::new("plane", Mesh::new(geometry::plane(1.0, 1.0, 1.0)));
        assert!(object.visible);
        assert_eq!(object.transform, Matrix4::identity());
        assert!(object.gpu_resources.is_none());
    }
}
