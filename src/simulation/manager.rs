//! Simulation manager
//!
//! Owns the attached simulation and integrates it with the main frame
//! loop, including pause state, time scaling, and an optional fixed
//! timestep for deterministic stepping.

use super::traits::Simulation;
use crate::gfx::scene::Scene;

/// Manages the lifecycle of the attached simulation
pub struct SimulationManager {
    simulation: Option<Box<dyn Simulation>>,
    is_paused: bool,
    time_scale: f32,
    accumulated_time: f32,
    fixed_timestep: Option<f32>,
}

impl SimulationManager {
    /// Create a new simulation manager with nothing attached
    pub fn new() -> Self {
        Self {
            simulation: None,
            is_paused: false,
            time_scale: 1.0,
            accumulated_time: 0.0,
            fixed_timestep: None,
        }
    }

    /// Attach a simulation, replacing (and cleaning up) any previous one
    ///
    /// # Arguments
    /// * `simulation` - Boxed simulation implementing the [`Simulation`] trait
    /// * `scene` - Scene to initialize the simulation with
    pub fn attach_simulation(&mut self, mut simulation: Box<dyn Simulation>, scene: &mut Scene) {
        if let Some(mut old_sim) = self.simulation.take() {
            old_sim.cleanup(scene);
        }

        simulation.initialize(scene);
        log::info!("simulation attached: {}", simulation.name());
        self.simulation = Some(simulation);
        self.is_paused = false;
    }

    /// Remove the current simulation
    pub fn detach_simulation(&mut self, scene: &mut Scene) {
        if let Some(mut sim) = self.simulation.take() {
            sim.cleanup(scene);
        }
    }

    /// Update the simulation (called every frame)
    ///
    /// With a fixed timestep configured, the frame delta accumulates and
    /// the simulation is stepped in deterministic increments; otherwise it
    /// is stepped once with the scaled frame delta.
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since the last frame in seconds
    /// * `scene` - Scene to update with simulation results
    pub fn update(&mut self, delta_time: f32, scene: &mut Scene) {
        if self.is_paused {
            return;
        }

        if let Some(simulation) = &mut self.simulation {
            let scaled_delta = delta_time * self.time_scale;

            if let Some(fixed_dt) = self.fixed_timestep {
                self.accumulated_time += scaled_delta;

                while self.accumulated_time >= fixed_dt {
                    simulation.update(fixed_dt, scene);
                    self.accumulated_time -= fixed_dt;
                }
            } else {
                simulation.update(scaled_delta, scene);
            }
        }
    }

    /// Get the current simulation name
    pub fn current_simulation_name(&self) -> Option<&str> {
        self.simulation.as_ref().map(|s| s.name())
    }

    /// Check if a simulation is attached and not paused
    pub fn is_running(&self) -> bool {
        !self.is_paused && self.simulation.is_some()
    }

    /// Check if the manager is paused
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    /// Set the pause state
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
        if let Some(simulation) = &mut self.simulation {
            simulation.set_running(!paused);
        }
    }

    /// Enable or disable fixed timestep mode
    ///
    /// # Arguments
    /// * `timestep` - Fixed timestep in seconds, or None for variable timestep
    pub fn set_fixed_timestep(&mut self, timestep: Option<f32>) {
        self.fixed_timestep = timestep;
        self.accumulated_time = 0.0;
    }

    /// Get the current time scale multiplier
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the time scale (1.0 = normal speed; negative values are clamped)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Check if a simulation is currently attached
    pub fn has_simulation(&self) -> bool {
        self.simulation.is_some()
    }
}

impl Default for SimulationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{
        camera_controller::CameraController, camera_utils::CameraManager, fly_camera::FlyCamera,
    };
    use cgmath::Vector3;

    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingSimulation {
        updates: Rc<Cell<usize>>,
        running: bool,
    }

    impl CountingSimulation {
        fn new() -> (Self, Rc<Cell<usize>>) {
            let updates = Rc::new(Cell::new(0));
            (
                Self {
                    updates: updates.clone(),
                    running: true,
                },
                updates,
            )
        }
    }

    impl Simulation for CountingSimulation {
        fn initialize(&mut self, _scene: &mut Scene) {}

        fn update(&mut self, _delta_time: f32, _scene: &mut Scene) {
            self.updates.set(self.updates.get() + 1);
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn is_running(&self) -> bool {
            self.running
        }

        fn set_running(&mut self, running: bool) {
            self.running = running;
        }

        fn reset(&mut self, _scene: &mut Scene) {
            self.updates.set(0);
        }
    }

    fn test_scene() -> Scene {
        let camera = FlyCamera::new(Vector3::new(0.0, 2.0, 8.0), 1.5);
        let controller = CameraController::new(4.0, 0.004);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn fixed_timestep_accumulates_whole_steps() {
        let mut scene = test_scene();
        let mut manager = SimulationManager::new();
        let (sim, updates) = CountingSimulation::new();
        manager.attach_simulation(Box::new(sim), &mut scene);
        manager.set_fixed_timestep(Some(0.25));

        // 0.6s of frame time yields two 0.25s steps with 0.1s carried over.
        manager.update(0.6, &mut scene);
        assert_eq!(updates.get(), 2);

        // The carry plus 0.2s crosses the threshold once more.
        manager.update(0.2, &mut scene);
        assert_eq!(updates.get(), 3);

        assert_eq!(manager.current_simulation_name(), Some("counting"));
    }

    #[test]
    fn paused_manager_does_not_step() {
        let mut scene = test_scene();
        let mut manager = SimulationManager::new();
        let (sim, updates) = CountingSimulation::new();
        manager.attach_simulation(Box::new(sim), &mut scene);
        manager.set_paused(true);

        manager.update(1.0, &mut scene);
        assert_eq!(updates.get(), 0);
        assert!(!manager.is_running());
        assert!(manager.has_simulation());
    }

    #[test]
    fn detach_removes_the_simulation() {
        let mut scene = test_scene();
        let mut manager = SimulationManager::new();
        let (sim, _updates) = CountingSimulation::new();
        manager.attach_simulation(Box::new(sim), &mut scene);
        assert!(manager.has_simulation());

        manager.detach_simulation(&mut scene);
        assert!(!manager.has_simulation());
        assert_eq!(manager.current_simulation_name(), None);
    }

    #[test]
    fn time_scale_never_goes_negative() {
        let mut manager = SimulationManager::new();
        manager.set_time_scale(-3.0);
        assert_eq!(manager.time_scale(), 0.0);
        manager.set_time_scale(2.0);
        assert_eq!(manager.time_scale(), 2.0);
    }
}
