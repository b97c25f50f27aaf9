//! Arena-based scene graph with transform propagation
//!
//! The graph owns every node in a slotmap arena and keeps the hierarchy as
//! parent/child links between [`NodeId`]s. World transforms are cached per
//! node and recomputed lazily: mutating a local transform marks the node
//! dirty, and [`SceneGraph::update_world_transforms`] walks the tree once per
//! frame recomputing only the dirty subtrees.

use crate::foundation::math::{Mat4, Quat, Transform, Vec3};
use crate::scene::{Node, NodeFlags, NodeId, NodePayload, SceneError};
use slotmap::SlotMap;

/// Hierarchical scene container
///
/// Holds a single tree rooted at [`SceneGraph::root`]. Every mutation goes
/// through the graph so parent/child links and cached world matrices stay
/// consistent.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only a root group node
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a graph with room for `capacity` nodes reserved up front
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = SlotMap::with_capacity_and_key(capacity);
        let root = nodes.insert(Node::new("root", NodePayload::Group));
        Self { nodes, root }
    }

    /// The root node of the graph
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the graph, including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Whether `node` is still alive in this graph
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Look up a node
    pub fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node)
    }

    /// Look up a node mutably
    ///
    /// Transform changes must go through the setter methods so dirty flags
    /// stay correct; this accessor is for payload and name edits.
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node)
    }

    /// Create a node and add it as a child of `parent`
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        payload: NodePayload,
    ) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound);
        }
        let mut node = Node::new(name, payload);
        node.parent = Some(parent);
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        log::trace!("added node {:?} under {:?}", id, parent);
        Ok(id)
    }

    /// Remove a node and its entire subtree
    ///
    /// The root cannot be removed. Handles into the removed subtree become
    /// stale.
    pub fn remove(&mut self, node: NodeId) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::CannotRemoveRoot);
        }
        if !self.nodes.contains_key(node) {
            return Err(SceneError::NodeNotFound);
        }

        // Unlink from parent first, then drop the subtree bottom-up
        if let Some(parent) = self.nodes[node].parent {
            self.nodes[parent].children.retain(|&child| child != node);
        }

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(removed) = self.nodes.remove(current) {
                stack.extend(removed.children);
            }
        }
        Ok(())
    }

    /// Move a node under a new parent, keeping its local transform
    ///
    /// Re-parenting the root or creating a cycle (moving a node under its own
    /// descendant) is rejected.
    pub fn set_parent(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::CannotReparentRoot);
        }
        if !self.nodes.contains_key(node) || !self.nodes.contains_key(new_parent) {
            return Err(SceneError::NodeNotFound);
        }

        // Walk up from the new parent; hitting `node` means a cycle
        let mut ancestor = Some(new_parent);
        while let Some(current) = ancestor {
            if current == node {
                return Err(SceneError::CycleDetected);
            }
            ancestor = self.nodes[current].parent;
        }

        if let Some(old_parent) = self.nodes[node].parent {
            self.nodes[old_parent].children.retain(|&child| child != node);
        }
        self.nodes[node].parent = Some(new_parent);
        self.nodes[new_parent].children.push(node);
        self.mark_dirty(node);
        Ok(())
    }

    /// Replace a node's local transform
    pub fn set_local_transform(&mut self, node: NodeId, transform: Transform) -> Result<(), SceneError> {
        let entry = self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound)?;
        entry.local = transform;
        self.mark_dirty(node);
        Ok(())
    }

    /// Set a node's local position
    pub fn set_position(&mut self, node: NodeId, position: Vec3) -> Result<(), SceneError> {
        let entry = self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound)?;
        entry.local.position = position;
        self.mark_dirty(node);
        Ok(())
    }

    /// Set a node's local rotation
    pub fn set_rotation(&mut self, node: NodeId, rotation: Quat) -> Result<(), SceneError> {
        let entry = self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound)?;
        entry.local.rotation = rotation;
        self.mark_dirty(node);
        Ok(())
    }

    /// Set a node's local scale
    pub fn set_scale(&mut self, node: NodeId, scale: Vec3) -> Result<(), SceneError> {
        let entry = self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound)?;
        entry.local.scale = scale;
        self.mark_dirty(node);
        Ok(())
    }

    /// Toggle a node's own visibility flag
    pub fn set_visible(&mut self, node: NodeId, visible: bool) -> Result<(), SceneError> {
        let entry = self.nodes.get_mut(node).ok_or(SceneError::NodeNotFound)?;
        entry.flags.set(NodeFlags::VISIBLE, visible);
        Ok(())
    }

    /// Whether a node and all of its ancestors are visible
    pub fn is_visible_in_hierarchy(&self, node: NodeId) -> Result<bool, SceneError> {
        let mut current = Some(node);
        if !self.nodes.contains_key(node) {
            return Err(SceneError::NodeNotFound);
        }
        while let Some(id) = current {
            let entry = &self.nodes[id];
            if !entry.flags.contains(NodeFlags::VISIBLE) {
                return Ok(false);
            }
            current = entry.parent;
        }
        Ok(true)
    }

    /// Recompute cached world matrices for all dirty subtrees
    ///
    /// A node's world matrix is the product of every local matrix on the path
    /// from the root. Call once per frame after mutations.
    pub fn update_world_transforms(&mut self) {
        let root = self.root;
        self.propagate(root, Mat4::identity(), false);
    }

    fn propagate(&mut self, node: NodeId, parent_world: Mat4, parent_dirty: bool) {
        let dirty = parent_dirty || self.nodes[node].flags.contains(NodeFlags::TRANSFORM_DIRTY);
        if dirty {
            let world = parent_world * self.nodes[node].local.to_matrix();
            let entry = &mut self.nodes[node];
            entry.world_matrix = world;
            entry.flags.remove(NodeFlags::TRANSFORM_DIRTY);
        }
        let world = self.nodes[node].world_matrix;
        let children = self.nodes[node].children.clone();
        for child in children {
            self.propagate(child, world, dirty);
        }
    }

    /// Cached world matrix of a node
    ///
    /// Valid after the last [`SceneGraph::update_world_transforms`] pass.
    pub fn world_matrix(&self, node: NodeId) -> Option<Mat4> {
        self.nodes.get(node).map(|entry| entry.world_matrix)
    }

    /// World-space position of a node
    pub fn world_position(&self, node: NodeId) -> Option<Vec3> {
        self.world_matrix(node)
            .map(|matrix| Vec3::new(matrix.m14, matrix.m24, matrix.m34))
    }

    /// World transform of a node, decomposed
    pub fn world_transform(&self, node: NodeId) -> Option<Transform> {
        self.world_matrix(node).map(Transform::from_matrix)
    }

    /// All nodes in the subtree rooted at `node`, depth-first, `node` first
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        if !self.nodes.contains_key(node) {
            return result;
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            result.push(current);
            // Reverse so the first child is visited first
            for &child in self.nodes[current].children.iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Find the first node with the given name, depth-first from the root
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.nodes[id].name == name)
    }

    fn mark_dirty(&mut self, node: NodeId) {
        if let Some(entry) = self.nodes.get_mut(node) {
            entry.flags.insert(NodeFlags::TRANSFORM_DIRTY);
        }
    }
}
