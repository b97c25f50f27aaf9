//! Scene graph: hierarchical nodes with transform propagation
//!
//! Nodes are created through [`SceneGraph::add_child`] and addressed by
//! [`NodeId`]. Each node carries a local [`Transform`](crate::foundation::math::Transform)
//! and a payload (group, mesh, camera, light, or bone). World transforms are
//! cached and recomputed by [`SceneGraph::update_world_transforms`].

mod camera;
mod graph;
mod light;
mod mesh;
mod node;

pub use camera::{Camera, Projection};
pub use graph::SceneGraph;
pub use light::{Light, LightKind};
pub use mesh::Mesh;
pub use node::{Node, NodeFlags, NodeId, NodePayload};

use thiserror::Error;

/// Errors from scene-graph operations
#[derive(Error, Debug)]
pub enum SceneError {
    /// The node handle is stale or belongs to another graph
    #[error("node not found in scene graph")]
    NodeNotFound,

    /// The root node cannot be removed
    #[error("the root node cannot be removed")]
    CannotRemoveRoot,

    /// The root node cannot be given a parent
    #[error("the root node cannot be re-parented")]
    CannotReparentRoot,

    /// Re-parenting would make a node its own ancestor
    #[error("re-parenting would create a cycle")]
    CycleDetected,

    /// Mesh data failed validation
    #[error("invalid mesh: {detail}")]
    InvalidMesh {
        /// What the validation found
        detail: String,
    },

    /// Operation requires a bone node
    #[error("node is not a bone")]
    NotABone,
}
