//! Rendering pipeline
//!
//! The forward render engine and its WGSL shader.

pub mod render_engine;

pub use render_engine::RenderEngine;
