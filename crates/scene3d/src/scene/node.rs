//! Scene-graph node data
//!
//! A node is a hierarchical element with a local transform and an ordered
//! list of children. Nodes live in a [`SceneGraph`](crate::scene::SceneGraph)
//! arena and are addressed by [`NodeId`]; a node owns its children, so
//! removing a node removes its whole subtree.

use crate::foundation::math::{Mat4, Transform};
use crate::scene::{Camera, Light, Mesh};
use bitflags::bitflags;
use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a scene graph
    ///
    /// Handles stay valid until the node is removed; lookups with a stale
    /// handle return `None` rather than panicking.
    pub struct NodeId;
}

bitflags! {
    /// Per-node state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Node (and by inheritance its subtree) is visible
        const VISIBLE = 0b0000_0001;
        /// Local transform changed since the last propagation pass
        const TRANSFORM_DIRTY = 0b0000_0010;
    }
}

/// What a node represents beyond its place in the hierarchy
#[derive(Debug, Clone)]
pub enum NodePayload {
    /// Pure container with no content of its own
    Group,
    /// Node carrying mesh geometry
    Mesh(Mesh),
    /// Node carrying a camera
    Camera(Camera),
    /// Node carrying a light source
    Light(Light),
    /// Skeletal joint, used for debug visualisation of imported skeletons
    Bone,
}

impl NodePayload {
    /// Whether this payload is a skeletal bone
    pub fn is_bone(&self) -> bool {
        matches!(self, NodePayload::Bone)
    }
}

/// A single element of the scene hierarchy
#[derive(Debug)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) local: Transform,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) flags: NodeFlags,
    pub(crate) world_matrix: Mat4,
    pub(crate) payload: NodePayload,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, payload: NodePayload) -> Self {
        Self {
            name: name.into(),
            local: Transform::identity(),
            parent: None,
            children: Vec::new(),
            flags: NodeFlags::VISIBLE | NodeFlags::TRANSFORM_DIRTY,
            world_matrix: Mat4::identity(),
            payload,
        }
    }

    /// Node name (for debugging and lookup by name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local transform relative to the parent node
    pub fn local_transform(&self) -> &Transform {
        &self.local
    }

    /// Parent node, `None` only for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node itself is flagged visible
    ///
    /// Effective visibility also requires every ancestor to be visible; see
    /// [`SceneGraph::is_visible_in_hierarchy`](crate::scene::SceneGraph::is_visible_in_hierarchy).
    pub fn is_visible(&self) -> bool {
        self.flags.contains(NodeFlags::VISIBLE)
    }

    /// Node payload
    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    /// Mutable access to the payload
    pub fn payload_mut(&mut self) -> &mut NodePayload {
        &mut self.payload
    }
}
