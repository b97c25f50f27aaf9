//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::physics::PhysicsError;
use crate::scene::SceneError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive the engine. The engine calls the methods in
/// order: `initialize` once, then `update` every frame until the application
/// calls [`Engine::stop`], then `cleanup`.
pub trait Application {
    /// Set up the initial scene and physics state
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Advance application logic by one frame
    ///
    /// `delta_time` is the wall-clock time since the previous frame in
    /// seconds. Physics stepping happens after this returns.
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Release application resources before shutdown
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Scene-graph error
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// Physics error
    #[error("physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// Custom application error
    #[error("application error: {0}")]
    Custom(String),
}
