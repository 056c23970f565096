// src/lib.rs
//! Plummet
//!
//! A minimal real-time 3D drop demo built on wgpu and winit: load a
//! textured mesh, fly the camera around, and watch the body fall and
//! bounce on the ground plane.

pub mod app;
pub mod gfx;
pub mod prelude;
pub mod simulation;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::PlummetApp;

/// Creates a default application instance
pub fn default() -> PlummetApp {
    pollster::block_on(PlummetApp::new())
}
