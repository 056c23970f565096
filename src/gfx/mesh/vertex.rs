//! # Vertex Data Structures
//!
//! GPU-compatible vertex format shared by the model loader and the
//! rendering pipeline.

/// A 3D vertex with position, normal, and texture coordinate data.
///
/// One record per face corner as emitted by the loader; vertices are never
/// shared between faces, so identity is purely the index into the buffer.
///
/// # Memory Layout
///
/// `#[repr(C)]` guarantees a C-compatible layout so the struct can be cast
/// directly into a GPU vertex buffer with bytemuck.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]; values outside [0, 1] are passed through
    /// unvalidated and rely on the sampler's repeat addressing
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: position (Float32x3) at shader location 0
    /// - Attribute 1: normal (Float32x3) at shader location 1
    /// - Attribute 2: texture coordinates (Float32x2) at shader location 2
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: (mem::size_of::<[f32; 3]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
