//! Rigid-body physics wrappers
//!
//! Thin forwarding layer over the rapier3d dynamics engine: the scene side
//! only ever sees [`ScenePhysics`] (one physics world per scene, with its own
//! gravity) and [`NodeDynamics`] (one rigid body bound to one node). Shapes,
//! integration, and collision resolution are rapier's business.

mod dynamics;
mod world;

pub use dynamics::NodeDynamics;
pub use world::{ScenePhysics, DEFAULT_GRAVITY};

use thiserror::Error;

/// Errors from the physics wrappers
#[derive(Error, Debug)]
pub enum PhysicsError {
    /// The target node is not (or no longer) in the scene graph
    #[error("node not found in scene graph")]
    NodeNotFound,

    /// No dynamics registered for the node, or the body handle is stale
    #[error("no dynamics registered for this node")]
    UnknownDynamics,

    /// A node can carry at most one dynamics object
    #[error("dynamics already registered for this node")]
    DuplicateDynamics,

    /// Mesh-shape construction requires a mesh payload
    #[error("node does not carry a mesh")]
    NotAMeshNode,

    /// The collision shape could not be built from the given geometry
    #[error("collision shape could not be built: {0}")]
    InvalidShape(String),
}
