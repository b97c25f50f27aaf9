//! # scene3d
//!
//! Core of a mobile-style 3D scene-graph engine: hierarchical nodes with
//! transform propagation, skeletal debug nodes, math types aliased onto
//! nalgebra, and thin wrappers over the rapier3d rigid-body engine.
//!
//! ## What lives here
//!
//! - **Scene graph**: nodes own their children; each carries a local
//!   transform and a payload (group, mesh, camera, light, or bone)
//! - **Animators**: skeleton/bone helpers for joint hierarchies
//! - **Physics**: one rigid body per node, one physics world per scene,
//!   forwarding to rapier3d
//! - **Foundation**: math aliases, frame timing, logging
//!
//! Rendering, shader handling, and animation blending are out of scope;
//! a renderer consumes the scene graph this crate maintains.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene3d::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let node = engine.scene.add_child(
//!             engine.scene.root(),
//!             "crate",
//!             NodePayload::Mesh(Mesh::cuboid(1.0, 1.0, 1.0)),
//!         )?;
//!         engine.scene.set_position(node, Vec3::new(0.0, 5.0, 0.0))?;
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         if engine.frame_count() > 600 {
//!             engine.stop();
//!         }
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Engine::run(EngineConfig::default(), &mut MyApp)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod animators;
pub mod config;
pub mod foundation;
pub mod physics;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animators::Skeleton,
        config::{EngineConfig, PhysicsSettings, SceneSettings, TimingSettings},
        foundation::{
            math::{Mat4, Mat4Ext, Point3, Quat, Transform, Vec3},
            time::Timer,
        },
        physics::{NodeDynamics, PhysicsError, ScenePhysics},
        scene::{
            Camera, Light, Mesh, Node, NodeFlags, NodeId, NodePayload, SceneError, SceneGraph,
        },
        AppError, Application, Engine, EngineError,
    };
}
