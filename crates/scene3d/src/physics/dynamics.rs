//! Per-node rigid-body dynamics
//!
//! A [`NodeDynamics`] ties exactly one rapier rigid body to one scene node.
//! Construction inserts the body and its collider into a [`ScenePhysics`]
//! world at the node's current world pose; after each physics step the body
//! pose is written back into the node's local transform.

use crate::foundation::math::{Point3, Transform, Vec3};
use crate::physics::{PhysicsError, ScenePhysics};
use crate::scene::{NodeId, NodePayload, SceneGraph};
use nalgebra::{Isometry3, Translation3};
use rapier3d::prelude::{
    ColliderBuilder, ColliderHandle, RigidBodyBuilder, RigidBodyHandle, SharedShape,
};

/// Rigid-body wrapper for a single scene node
///
/// Lightweight handle pair; the body itself lives inside the owning
/// [`ScenePhysics`]. A mass of `0.0` builds a fixed (immovable) body, the
/// convention inherited from classic rigid-body engines.
#[derive(Debug, Clone, Copy)]
pub struct NodeDynamics {
    node: NodeId,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl NodeDynamics {
    /// Create dynamics with a box collision shape of the given dimensions
    pub fn new_box(
        physics: &mut ScenePhysics,
        graph: &SceneGraph,
        node: NodeId,
        width: f32,
        height: f32,
        depth: f32,
        mass: f32,
        restitution: f32,
    ) -> Result<Self, PhysicsError> {
        let shape = SharedShape::cuboid(width * 0.5, height * 0.5, depth * 0.5);
        Self::with_shape(physics, graph, node, shape, mass, restitution)
    }

    /// Create dynamics from a mesh node's geometry
    ///
    /// `concave` builds an exact triangle-mesh shape; otherwise the convex
    /// hull of the vertices is used. The node must carry a mesh payload.
    pub fn from_mesh_node(
        physics: &mut ScenePhysics,
        graph: &SceneGraph,
        node: NodeId,
        concave: bool,
        mass: f32,
        restitution: f32,
    ) -> Result<Self, PhysicsError> {
        let entry = graph.get(node).ok_or(PhysicsError::NodeNotFound)?;
        let NodePayload::Mesh(mesh) = entry.payload() else {
            return Err(PhysicsError::NotAMeshNode);
        };

        if mesh.vertex_count() == 0 {
            return Err(PhysicsError::InvalidShape("mesh has no vertices".into()));
        }
        let shape = if concave {
            if mesh.triangle_count() == 0 {
                return Err(PhysicsError::InvalidShape("mesh has no triangles".into()));
            }
            SharedShape::trimesh(mesh.positions().to_vec(), mesh.indices().to_vec())
        } else {
            SharedShape::convex_hull(mesh.positions())
                .ok_or_else(|| PhysicsError::InvalidShape("degenerate convex hull".into()))?
        };
        Self::with_shape(physics, graph, node, shape, mass, restitution)
    }

    /// Create dynamics with an arbitrary collision shape
    pub fn with_shape(
        physics: &mut ScenePhysics,
        graph: &SceneGraph,
        node: NodeId,
        shape: SharedShape,
        mass: f32,
        restitution: f32,
    ) -> Result<Self, PhysicsError> {
        let world = graph
            .world_transform(node)
            .ok_or(PhysicsError::NodeNotFound)?;
        let pose = Isometry3::from_parts(Translation3::from(world.position), world.rotation);

        // Mass 0 means an immovable body
        let builder = if mass > 0.0 {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let body = physics.insert_body(builder.position(pose).build());
        let collider = ColliderBuilder::new(shape)
            .mass(mass)
            .restitution(restitution)
            .build();
        let collider = physics.insert_collider(collider, body);

        log::debug!(
            "created dynamics for node {:?} (mass {}, restitution {})",
            node,
            mass,
            restitution
        );
        Ok(Self {
            node,
            body,
            collider,
        })
    }

    /// The scene node this dynamics object drives
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Opaque handle to the underlying rigid body
    pub fn rigid_body(&self) -> RigidBodyHandle {
        self.body
    }

    /// Handle to the body's collider
    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    /// Apply a force at a world-space point
    ///
    /// Forces accumulate until the next [`ScenePhysics::update_dynamics`]
    /// step and are cleared afterwards.
    pub fn apply_force(&self, physics: &mut ScenePhysics, force: Vec3, world_point: Point3) {
        if let Some(body) = physics.body_mut(self.body) {
            body.add_force_at_point(force, world_point, true);
        }
    }

    /// Apply a force through the body's center of mass
    pub fn apply_central_force(&self, physics: &mut ScenePhysics, force: Vec3) {
        if let Some(body) = physics.body_mut(self.body) {
            body.add_force(force, true);
        }
    }

    /// Write the body's current pose back into the node's local transform
    ///
    /// The new local transform is computed against the parent's cached world
    /// transform, so dynamics nodes may sit anywhere in the hierarchy. The
    /// node's scale is left untouched; rigid bodies carry none.
    pub fn update_transformation(
        &self,
        physics: &ScenePhysics,
        graph: &mut SceneGraph,
    ) -> Result<(), PhysicsError> {
        let body = physics
            .body(self.body)
            .ok_or(PhysicsError::UnknownDynamics)?;
        let pose = body.position();
        let world_position = pose.translation.vector;
        let world_rotation = pose.rotation;

        let entry = graph.get(self.node).ok_or(PhysicsError::NodeNotFound)?;
        let inv_parent = match entry.parent() {
            Some(parent) => graph
                .world_transform(parent)
                .ok_or(PhysicsError::NodeNotFound)?
                .inverse(),
            None => Transform::identity(),
        };

        let local_position = inv_parent
            .to_matrix()
            .transform_point(&Point3::from(world_position))
            .coords;
        let local_rotation = inv_parent.rotation * world_rotation;

        graph
            .set_position(self.node, local_position)
            .map_err(|_| PhysicsError::NodeNotFound)?;
        graph
            .set_rotation(self.node, local_rotation)
            .map_err(|_| PhysicsError::NodeNotFound)?;
        Ok(())
    }
}
