//! GPU resource management
//!
//! Textures and globally shared uniform bindings.

pub mod global_bindings;
pub mod texture_resource;

pub use global_bindings::{GlobalBindings, GlobalUBO, LightConfig};
pub use texture_resource::{TextureImage, TextureResource};
