//! Physics world wrapper
//!
//! [`ScenePhysics`] owns the rapier simulation state for one scene: body and
//! collider sets, the stepping pipeline, and per-world gravity. The engine
//! never reaches into rapier directly; everything goes through this wrapper
//! and the per-node [`NodeDynamics`] objects registered with it.

use crate::foundation::math::Vec3;
use crate::physics::{NodeDynamics, PhysicsError};
use crate::scene::{NodeId, SceneGraph};
use rapier3d::prelude::{
    CCDSolver, Collider, ColliderHandle, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    QueryPipeline, RigidBody, RigidBodyHandle, RigidBodySet,
};
use slotmap::SecondaryMap;

/// Default gravity, standard Earth value along -Y
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// Rigid-body world for one scene
pub struct ScenePhysics {
    gravity: Vec3,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    registered: SecondaryMap<NodeId, NodeDynamics>,
}

impl Default for ScenePhysics {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenePhysics {
    /// Create a physics world with default gravity
    pub fn new() -> Self {
        Self::with_gravity(DEFAULT_GRAVITY)
    }

    /// Create a physics world with the given gravity
    pub fn with_gravity(gravity: Vec3) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            registered: SecondaryMap::new(),
        }
    }

    /// Current gravity for this world
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Set gravity for this world
    ///
    /// Takes effect on the next [`ScenePhysics::update_dynamics`] step and
    /// affects only this world.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        log::debug!("gravity set to {:?}", gravity);
        self.gravity = gravity;
    }

    /// Register a dynamics object so its node is synced every step
    pub fn add_node_dynamics(&mut self, dynamics: NodeDynamics) -> Result<(), PhysicsError> {
        if self.registered.contains_key(dynamics.node()) {
            return Err(PhysicsError::DuplicateDynamics);
        }
        self.registered.insert(dynamics.node(), dynamics);
        Ok(())
    }

    /// Unregister the dynamics for a node and remove its body from the world
    pub fn remove_node_dynamics(&mut self, node: NodeId) -> Result<(), PhysicsError> {
        let dynamics = self
            .registered
            .remove(node)
            .ok_or(PhysicsError::UnknownDynamics)?;
        self.bodies.remove(
            dynamics.rigid_body(),
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        Ok(())
    }

    /// Dynamics registered for a node, if any
    pub fn node_dynamics(&self, node: NodeId) -> Option<NodeDynamics> {
        self.registered.get(node).copied()
    }

    /// Number of registered dynamics objects
    pub fn dynamics_count(&self) -> usize {
        self.registered.len()
    }

    /// Step the simulation by `dt` seconds and sync bodies into their nodes
    ///
    /// Accumulated forces are cleared after the step, so forces applied via
    /// [`NodeDynamics`] act for exactly one step. Dynamics whose nodes have
    /// been removed from the graph are dropped with a warning.
    pub fn update_dynamics(&mut self, graph: &mut SceneGraph, dt: f32) -> Result<(), PhysicsError> {
        if dt <= 0.0 {
            return Ok(());
        }
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        let all: Vec<NodeDynamics> = self.registered.values().copied().collect();
        let mut stale = Vec::new();
        for dynamics in &all {
            match dynamics.update_transformation(self, graph) {
                Ok(()) => {}
                Err(PhysicsError::NodeNotFound) => {
                    log::warn!(
                        "node {:?} no longer in scene graph, dropping its dynamics",
                        dynamics.node()
                    );
                    stale.push(dynamics.node());
                }
                Err(other) => return Err(other),
            }
        }
        for node in stale {
            self.remove_node_dynamics(node)?;
        }

        for dynamics in &all {
            if let Some(body) = self.bodies.get_mut(dynamics.rigid_body()) {
                body.reset_forces(true);
            }
        }
        Ok(())
    }

    /// Read access to a rigid body
    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    /// Mutable access to a rigid body
    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub(crate) fn insert_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.bodies.insert(body)
    }

    pub(crate) fn insert_collider(
        &mut self,
        collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderHandle {
        self.colliders
            .insert_with_parent(collider, parent, &mut self.bodies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodePayload;
    use approx::assert_relative_eq;

    const STEP: f32 = 1.0 / 60.0;

    fn graph_with_box(position: Vec3) -> (SceneGraph, NodeId) {
        let mut graph = SceneGraph::new();
        let node = graph
            .add_child(graph.root(), "box", NodePayload::Group)
            .expect("root exists");
        graph.set_position(node, position).expect("node exists");
        graph.update_world_transforms();
        (graph, node)
    }

    #[test]
    fn dynamic_body_falls_under_gravity() {
        let (mut graph, node) = graph_with_box(Vec3::new(0.0, 10.0, 0.0));
        let mut physics = ScenePhysics::new();
        let dynamics =
            NodeDynamics::new_box(&mut physics, &graph, node, 1.0, 1.0, 1.0, 1.0, 0.0).unwrap();
        physics.add_node_dynamics(dynamics).unwrap();

        for _ in 0..30 {
            physics.update_dynamics(&mut graph, STEP).unwrap();
        }
        graph.update_world_transforms();

        let position = graph.world_position(node).unwrap();
        assert!(position.y < 10.0, "body should have fallen, y = {}", position.y);
    }

    #[test]
    fn fixed_body_does_not_move() {
        let (mut graph, node) = graph_with_box(Vec3::new(0.0, 5.0, 0.0));
        let mut physics = ScenePhysics::new();
        let dynamics =
            NodeDynamics::new_box(&mut physics, &graph, node, 1.0, 1.0, 1.0, 0.0, 0.0).unwrap();
        physics.add_node_dynamics(dynamics).unwrap();

        for _ in 0..30 {
            physics.update_dynamics(&mut graph, STEP).unwrap();
        }
        graph.update_world_transforms();

        assert_relative_eq!(
            graph.world_position(node).unwrap(),
            Vec3::new(0.0, 5.0, 0.0),
            epsilon = 1e-4
        );
    }

    #[test]
    fn central_force_accelerates_along_its_direction() {
        let (mut graph, node) = graph_with_box(Vec3::zeros());
        let mut physics = ScenePhysics::with_gravity(Vec3::zeros());
        let dynamics =
            NodeDynamics::new_box(&mut physics, &graph, node, 1.0, 1.0, 1.0, 1.0, 0.0).unwrap();
        physics.add_node_dynamics(dynamics).unwrap();

        dynamics.apply_central_force(&mut physics, Vec3::new(50.0, 0.0, 0.0));
        physics.update_dynamics(&mut graph, STEP).unwrap();

        let velocity = *physics.body(dynamics.rigid_body()).unwrap().linvel();
        assert!(velocity.x > 0.0);
        assert_relative_eq!(velocity.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(velocity.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn force_cleared_after_step() {
        let (mut graph, node) = graph_with_box(Vec3::zeros());
        let mut physics = ScenePhysics::with_gravity(Vec3::zeros());
        let dynamics =
            NodeDynamics::new_box(&mut physics, &graph, node, 1.0, 1.0, 1.0, 1.0, 0.0).unwrap();
        physics.add_node_dynamics(dynamics).unwrap();

        dynamics.apply_central_force(&mut physics, Vec3::new(50.0, 0.0, 0.0));
        physics.update_dynamics(&mut graph, STEP).unwrap();
        let after_one = physics.body(dynamics.rigid_body()).unwrap().linvel().x;

        // No new force: velocity should stay where the first step left it
        physics.update_dynamics(&mut graph, STEP).unwrap();
        let after_two = physics.body(dynamics.rigid_body()).unwrap().linvel().x;
        assert_relative_eq!(after_one, after_two, epsilon = 1e-5);
    }

    #[test]
    fn offset_force_induces_spin() {
        let (mut graph, node) = graph_with_box(Vec3::zeros());
        let mut physics = ScenePhysics::with_gravity(Vec3::zeros());
        let dynamics =
            NodeDynamics::new_box(&mut physics, &graph, node, 1.0, 1.0, 1.0, 1.0, 0.0).unwrap();
        physics.add_node_dynamics(dynamics).unwrap();

        // Push +X at a point above the center: torque around Z
        dynamics.apply_force(
            &mut physics,
            Vec3::new(50.0, 0.0, 0.0),
            crate::foundation::math::Point3::new(0.0, 0.5, 0.0),
        );
        physics.update_dynamics(&mut graph, STEP).unwrap();

        let angvel = *physics.body(dynamics.rigid_body()).unwrap().angvel();
        assert!(angvel.magnitude() > 0.0, "expected spin, angvel = {:?}", angvel);
    }

    #[test]
    fn gravity_is_per_world() {
        let (mut graph_a, node_a) = graph_with_box(Vec3::new(0.0, 10.0, 0.0));
        let (mut graph_b, node_b) = graph_with_box(Vec3::new(0.0, 10.0, 0.0));

        let mut heavy = ScenePhysics::with_gravity(Vec3::new(0.0, -20.0, 0.0));
        let mut weightless = ScenePhysics::with_gravity(Vec3::zeros());

        let dyn_a =
            NodeDynamics::new_box(&mut heavy, &graph_a, node_a, 1.0, 1.0, 1.0, 1.0, 0.0).unwrap();
        heavy.add_node_dynamics(dyn_a).unwrap();
        let dyn_b =
            NodeDynamics::new_box(&mut weightless, &graph_b, node_b, 1.0, 1.0, 1.0, 1.0, 0.0)
                .unwrap();
        weightless.add_node_dynamics(dyn_b).unwrap();

        for _ in 0..30 {
            heavy.update_dynamics(&mut graph_a, STEP).unwrap();
            weightless.update_dynamics(&mut graph_b, STEP).unwrap();
        }
        graph_a.update_world_transforms();
        graph_b.update_world_transforms();

        assert!(graph_a.world_position(node_a).unwrap().y < 10.0);
        assert_relative_eq!(
            graph_b.world_position(node_b).unwrap().y,
            10.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let (graph, node) = graph_with_box(Vec3::zeros());
        let mut physics = ScenePhysics::new();
        let dynamics =
            NodeDynamics::new_box(&mut physics, &graph, node, 1.0, 1.0, 1.0, 1.0, 0.0).unwrap();

        physics.add_node_dynamics(dynamics).unwrap();
        assert!(matches!(
            physics.add_node_dynamics(dynamics),
            Err(PhysicsError::DuplicateDynamics)
        ));
    }

    #[test]
    fn removed_node_drops_its_dynamics() {
        let (mut graph, node) = graph_with_box(Vec3::new(0.0, 10.0, 0.0));
        let mut physics = ScenePhysics::new();
        let dynamics =
            NodeDynamics::new_box(&mut physics, &graph, node, 1.0, 1.0, 1.0, 1.0, 0.0).unwrap();
        physics.add_node_dynamics(dynamics).unwrap();

        graph.remove(node).unwrap();
        physics.update_dynamics(&mut graph, STEP).unwrap();

        assert_eq!(physics.dynamics_count(), 0);
        assert!(physics.node_dynamics(node).is_none());
    }

    #[test]
    fn mesh_node_dynamics_builds_shapes() {
        use crate::scene::Mesh;

        let mut graph = SceneGraph::new();
        let node = graph
            .add_child(
                graph.root(),
                "mesh",
                NodePayload::Mesh(Mesh::cuboid(1.0, 1.0, 1.0)),
            )
            .unwrap();
        graph.update_world_transforms();

        let mut physics = ScenePhysics::new();
        assert!(NodeDynamics::from_mesh_node(&mut physics, &graph, node, true, 1.0, 0.5).is_ok());
        assert!(NodeDynamics::from_mesh_node(&mut physics, &graph, node, false, 1.0, 0.5).is_ok());

        // A non-mesh node cannot provide geometry
        let group = graph.add_child(graph.root(), "group", NodePayload::Group).unwrap();
        graph.update_world_transforms();
        assert!(matches!(
            NodeDynamics::from_mesh_node(&mut physics, &graph, group, true, 1.0, 0.5),
            Err(PhysicsError::NotAMeshNode)
        ));
    }

    #[test]
    fn degenerate_mesh_shapes_are_rejected() {
        use crate::foundation::math::Point3;
        use crate::scene::Mesh;

        let mut graph = SceneGraph::new();
        let no_triangles = Mesh::new(
            vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![],
        )
        .unwrap();
        let node = graph
            .add_child(graph.root(), "loose-points", NodePayload::Mesh(no_triangles))
            .unwrap();
        let empty = Mesh::new(vec![], vec![]).unwrap();
        let empty_node = graph
            .add_child(graph.root(), "empty", NodePayload::Mesh(empty))
            .unwrap();
        graph.update_world_transforms();

        let mut physics = ScenePhysics::new();
        assert!(matches!(
            NodeDynamics::from_mesh_node(&mut physics, &graph, node, true, 1.0, 0.5),
            Err(PhysicsError::InvalidShape(_))
        ));
        assert!(matches!(
            NodeDynamics::from_mesh_node(&mut physics, &graph, empty_node, true, 1.0, 0.5),
            Err(PhysicsError::InvalidShape(_))
        ));
        assert!(matches!(
            NodeDynamics::from_mesh_node(&mut physics, &graph, empty_node, false, 1.0, 0.5),
            Err(PhysicsError::InvalidShape(_))
        ));
    }
}
