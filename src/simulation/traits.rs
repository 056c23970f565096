//! Core simulation trait for the engine
//!
//! Defines the interface a simulation implements to be driven once per
//! frame by the main loop.

use crate::gfx::scene::Scene;

/// Core trait for user-defined simulations
///
/// The engine calls these lifecycle methods; the simulation owns its state
/// and writes results back into the scene.
pub trait Simulation {
    /// Initialize the simulation
    ///
    /// Called once when the simulation is attached. Use this to set up
    /// initial state and position scene objects.
    fn initialize(&mut self, scene: &mut Scene);

    /// Update simulation state
    ///
    /// Called every frame to advance the simulation by one time step.
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since the last update in seconds
    /// * `scene` - Scene to update with the new object positions
    fn update(&mut self, delta_time: f32, scene: &mut Scene);

    /// Get the simulation name for diagnostics
    fn name(&self) -> &str;

    /// Whether the simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause the simulation
    fn set_running(&mut self, running: bool);

    /// Reset the simulation to its initial state
    fn reset(&mut self, scene: &mut Scene);

    /// Optional: custom cleanup when the simulation is removed
    fn cleanup(&mut self, _scene: &mut Scene) {
        // Default: no cleanup needed
    }
}
