//! # Procedural Geometry
//!
//! Small helpers for generating primitive shapes without a model file.
//! Currently only the ground plane; model meshes come from the loader.

use super::mesh::{MeshBuffers, Vertex};

/// Generates a flat plane in the XZ plane, centered at the origin, facing
/// +Y.
///
/// `uv_tiles` controls how often the texture repeats across the surface
/// (texture coordinates run from 0 to `uv_tiles`), which pairs with the
/// repeat-addressing sampler for tiled ground textures.
pub fn plane(width: f32, depth: f32, uv_tiles: f32) -> MeshBuffers {
    let half_width = width * 0.5;
    let half_depth = depth * 0.5;
    let normal = [0.0, 1.0, 0.0];

    let vertices = vec![
        Vertex {
            position: [-half_width, 0.0, -half_depth],
            normal,
            tex_coords: [0.0, 0.0],
        },
        Vertex {
            position: [half_width, 0.0, -half_depth],
            normal,
            tex_coords: [uv_tiles, 0.0],
        },
        Vertex {
            position: [half_width, 0.0, half_depth],
            normal,
            tex_coords: [uv_tiles, uv_tiles],
        },
        Vertex {
            position: [-half_width, 0.0, half_depth],
            normal,
            tex_coords: [0.0, uv_tiles],
        },
    ];

    let indices = vec![0, 2, 1, 0, 3, 2];

    MeshBuffers { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_is_two_triangles() {
        let buffers = plane(10.0, 10.0, 4.0);
        assert_eq!(buffers.vertices.len(), 4);
        assert_eq!(buffers.indices.len(), 6);
        assert_eq!(buffers.face_count(), 2);
    }

    #[test]
    fn plane_extents_and_tiling_match_the_arguments() {
        let buffers = plane(20.0, 10.0, 20.0);
        for vertex in &buffers.vertices {
            assert!(vertex.position[0].abs() <= 10.0);
            assert_eq!(vertex.position[1], 0.0);
            assert!(vertex.position[2].abs() <= 5.0);
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        }
        let max_u = buffers
            .vertices
            .iter()
            .map(|v| v.tex_coords[0])
            .fold(0.0f32, f32::max);
        assert_eq!(max_u, 20.0);
    }

    #[test]
    fn plane_indices_stay_in_range() {
        let buffers = plane(1.0, 1.0, 1.0);
        for index in &buffers.indices {
            assert!((*index as usize) < buffers.vertices.len());
        }
    }
}
