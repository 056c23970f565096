//! # Plummet Prelude
//!
//! Convenient imports for typical applications and simulations:
//!
//! ```no_run
//! use plummet::prelude::*;
//! ```

// Re-export core application types
pub use crate::app::PlummetApp;
pub use crate::default;

// Re-export graphics and scene types
pub use crate::gfx::camera::{CameraManager, FlyCamera};
pub use crate::gfx::geometry;
pub use crate::gfx::mesh::{load_mesh, load_mesh_file, LoadError, MeshBuffers, Vertex};
pub use crate::gfx::resources::{TextureImage, TextureResource};
pub use crate::gfx::scene::Scene;

// Re-export the simulation framework and drop physics
pub use crate::simulation::physics::{self, Ground, PhysicsObject, PhysicsProperties};
pub use crate::simulation::{Simulation, SimulationManager};

// Math types used throughout the public API
pub use cgmath::{Deg, Matrix4, Rad, Vector3};
