//! Core engine implementation
//!
//! The engine owns the scene graph, its physics world, and frame timing, and
//! drives an [`Application`] through its lifecycle. Rendering is not part of
//! this crate; a renderer consumes the scene graph after
//! [`Engine::update`] has run.

use crate::application::Application;
use crate::config::{ConfigError, EngineConfig};
use crate::foundation::time::{FixedStep, Timer};
use crate::physics::{PhysicsError, ScenePhysics};
use crate::scene::SceneGraph;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration was invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Physics stepping failed
    #[error("physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// Error bubbled up from the application
    #[error("application error: {0}")]
    Application(String),
}

/// Main engine struct
///
/// Coordinates the scene graph, physics world, and frame timing.
pub struct Engine {
    /// Scene hierarchy
    pub scene: SceneGraph,

    /// Physics world for this scene
    pub physics: ScenePhysics,

    /// Frame timing
    timer: Timer,

    /// Fixed-step accumulator for physics
    fixed_step: FixedStep,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the main loop should keep running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("initializing engine");

        let physics = ScenePhysics::with_gravity(config.physics.gravity_vec());
        let fixed_step = FixedStep::new(config.timing.fixed_timestep);

        Ok(Self {
            scene: SceneGraph::with_capacity(config.scene.node_capacity),
            physics,
            timer: Timer::new(),
            fixed_step,
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Each frame is paced to the configured fixed timestep: after updating,
    /// the loop sleeps out the remainder of the frame so wall-clock time
    /// accumulates into physics steps even for trivially cheap frames.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;
        let frame_budget = Duration::from_secs_f32(engine.fixed_step.step());

        app.initialize(&mut engine)
            .map_err(|e| EngineError::Application(format!("initialize: {e}")))?;
        engine.scene.update_world_transforms();

        log::info!("entering main loop");
        while engine.running {
            let frame_start = Instant::now();
            engine.timer.update();
            let delta_time = engine.timer.delta_time();

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::Application(format!("update: {e}")))?;

            engine.update(delta_time)?;

            if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        app.cleanup(&mut engine);
        log::info!(
            "engine shutdown after {} frames ({:.1} fps average)",
            engine.timer.frame_count(),
            engine.timer.average_fps()
        );
        Ok(())
    }

    /// Advance engine systems by one frame
    ///
    /// Steps physics in fixed increments, then recomputes world transforms so
    /// the scene graph reflects the new body poses.
    pub fn update(&mut self, delta_time: f32) -> Result<(), EngineError> {
        if self.config.physics.enabled {
            let step = self.fixed_step.step();
            for _ in 0..self.fixed_step.advance(delta_time) {
                self.physics.update_dynamics(&mut self.scene, step)?;
            }
        }
        self.scene.update_world_transforms();
        Ok(())
    }

    /// Request the main loop to exit after the current frame
    pub fn stop(&mut self) {
        log::info!("engine stop requested");
        self.running = false;
    }

    /// Whether the main loop is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Engine configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Total frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }
}
