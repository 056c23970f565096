//! # Mesh Module
//!
//! Model ingestion for the engine: the face-indexed text-model loader and
//! the GPU vertex format it produces. Loading happens once at startup; the
//! resulting buffers are owned by the render side for the process lifetime.

pub mod loader;
pub mod vertex;

pub use loader::{load_mesh, load_mesh_file, LoadError, MeshBuffers};
pub use vertex::Vertex;
