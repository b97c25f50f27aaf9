//! Skeleton view over a bone subtree
//!
//! Bones are ordinary scene nodes carrying [`NodePayload::Bone`]; any node
//! hierarchy is animatable by driving local transforms. The [`Skeleton`] type
//! is a convenience view over the bone subtree of an imported model: it
//! creates joints in parent/child order (an elbow bone as a child of a
//! shoulder bone, so the elbow's world transform is the product of both) and
//! exposes joint positions for debug visualisation.

use crate::foundation::math::Vec3;
use crate::scene::{NodeId, NodePayload, SceneError, SceneGraph};

/// Handle to a skeleton's bone subtree in a scene graph
#[derive(Debug, Clone, Copy)]
pub struct Skeleton {
    root: NodeId,
}

impl Skeleton {
    /// Create a skeleton root bone under `parent` and return the view
    pub fn attach(
        graph: &mut SceneGraph,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<Self, SceneError> {
        let root = graph.add_child(parent, name, NodePayload::Bone)?;
        Ok(Self { root })
    }

    /// Wrap an existing bone node as a skeleton root
    pub fn from_root(graph: &SceneGraph, root: NodeId) -> Result<Self, SceneError> {
        let node = graph.get(root).ok_or(SceneError::NodeNotFound)?;
        if !node.payload().is_bone() {
            return Err(SceneError::NotABone);
        }
        Ok(Self { root })
    }

    /// The root bone node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a bone node and automatically add it as a child of `parent`
    ///
    /// `parent` must be a bone belonging to this skeleton.
    pub fn add_bone(
        &self,
        graph: &mut SceneGraph,
        parent: NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, SceneError> {
        if !self.contains(graph, parent) {
            return Err(SceneError::NotABone);
        }
        graph.add_child(parent, name, NodePayload::Bone)
    }

    /// Whether `node` is a bone of this skeleton
    pub fn contains(&self, graph: &SceneGraph, node: NodeId) -> bool {
        let Some(entry) = graph.get(node) else {
            return false;
        };
        if !entry.payload().is_bone() {
            return false;
        }
        // Walk up to confirm the bone hangs off this skeleton's root
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = graph.get(id).and_then(|n| n.parent());
        }
        false
    }

    /// All bones in hierarchy (depth-first) order, root first
    ///
    /// Non-bone nodes grafted into the subtree are skipped.
    pub fn bones(&self, graph: &SceneGraph) -> Vec<NodeId> {
        graph
            .descendants(self.root)
            .into_iter()
            .filter(|&id| graph.get(id).is_some_and(|n| n.payload().is_bone()))
            .collect()
    }

    /// Number of bones in the skeleton
    pub fn bone_count(&self, graph: &SceneGraph) -> usize {
        self.bones(graph).len()
    }

    /// World-space joint positions for debug visualisation
    ///
    /// Positions reflect the last
    /// [`update_world_transforms`](SceneGraph::update_world_transforms) pass.
    pub fn joint_positions(&self, graph: &SceneGraph) -> Vec<(NodeId, Vec3)> {
        self.bones(graph)
            .into_iter()
            .filter_map(|id| graph.world_position(id).map(|position| (id, position)))
            .collect()
    }
}
