//! Skeleton demo application
//!
//! Headless tour of the engine: builds a three-bone arm, a camera and a
//! light, then drops a crate onto a fixed ground plane while the arm waves.
//! State is logged every half second; the demo stops after five simulated
//! seconds.

use scene3d::prelude::*;

const DEMO_FRAMES: u64 = 300;
const LOG_EVERY: u64 = 30;

struct SkeletonDemo {
    skeleton: Option<Skeleton>,
    crate_node: Option<NodeId>,
    elapsed: f32,
}

impl SkeletonDemo {
    fn new() -> Self {
        Self {
            skeleton: None,
            crate_node: None,
            elapsed: 0.0,
        }
    }
}

impl Application for SkeletonDemo {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let root = engine.scene.root();

        // Camera and light, attached like any other nodes
        let camera_node = engine.scene.add_child(
            root,
            "camera",
            NodePayload::Camera(Camera::perspective(60.0, 16.0 / 9.0, 0.1, 100.0)),
        )?;
        engine
            .scene
            .set_position(camera_node, Vec3::new(0.0, 3.0, 10.0))?;
        engine.scene.add_child(
            root,
            "sun",
            NodePayload::Light(Light::directional(Vec3::new(-0.3, -1.0, -0.2))),
        )?;

        // Three-bone arm: shoulder -> elbow -> wrist
        let skeleton = Skeleton::attach(&mut engine.scene, root, "shoulder")?;
        engine
            .scene
            .set_position(skeleton.root(), Vec3::new(-2.0, 2.0, 0.0))?;
        let elbow = skeleton.add_bone(&mut engine.scene, skeleton.root(), "elbow")?;
        engine.scene.set_position(elbow, Vec3::new(1.2, 0.0, 0.0))?;
        let wrist = skeleton.add_bone(&mut engine.scene, elbow, "wrist")?;
        engine.scene.set_position(wrist, Vec3::new(1.0, 0.0, 0.0))?;
        log::info!("skeleton built with {} bones", skeleton.bone_count(&engine.scene));

        // Fixed ground slab (mass 0) and a crate dropped from four meters
        let ground = engine.scene.add_child(
            root,
            "ground",
            NodePayload::Mesh(Mesh::plane(20.0, 20.0)),
        )?;
        let crate_node = engine.scene.add_child(
            root,
            "crate",
            NodePayload::Mesh(Mesh::cuboid(1.0, 1.0, 1.0)),
        )?;
        engine
            .scene
            .set_position(crate_node, Vec3::new(2.0, 4.0, 0.0))?;
        engine.scene.update_world_transforms();

        let ground_dynamics = NodeDynamics::new_box(
            &mut engine.physics,
            &engine.scene,
            ground,
            20.0,
            0.5,
            20.0,
            0.0,
            0.3,
        )?;
        engine.physics.add_node_dynamics(ground_dynamics)?;

        let crate_dynamics = NodeDynamics::new_box(
            &mut engine.physics,
            &engine.scene,
            crate_node,
            1.0,
            1.0,
            1.0,
            2.0,
            0.3,
        )?;
        engine.physics.add_node_dynamics(crate_dynamics)?;

        // A sideways nudge so the crate tumbles instead of falling straight
        crate_dynamics.apply_force(
            &mut engine.physics,
            Vec3::new(8.0, 0.0, 0.0),
            Point3::new(2.0, 4.5, 0.0),
        );

        self.skeleton = Some(skeleton);
        self.crate_node = Some(crate_node);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.elapsed += delta_time;

        // Wave the arm by driving bone rotations
        if let Some(skeleton) = self.skeleton {
            let swing = (self.elapsed * 2.0).sin() * 0.6;
            engine
                .scene
                .set_rotation(skeleton.root(), Quat::from_euler_angles(0.0, 0.0, swing))?;

            if engine.frame_count() % LOG_EVERY == 0 {
                for (id, position) in skeleton.joint_positions(&engine.scene) {
                    let name = engine
                        .scene
                        .get(id)
                        .map_or("?", |node| node.name())
                        .to_owned();
                    log::info!("joint {name}: {position:?}");
                }
            }
        }

        if let Some(crate_node) = self.crate_node {
            if engine.frame_count() % LOG_EVERY == 0 {
                if let Some(position) = engine.scene.world_position(crate_node) {
                    log::info!("crate at {position:?}");
                }
            }
        }

        if engine.frame_count() >= DEMO_FRAMES {
            engine.stop();
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "demo finished: {} nodes, {} dynamics objects",
            engine.scene.len(),
            engine.physics.dynamics_count()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    scene3d::foundation::logging::init();

    let config = EngineConfig::default();
    Engine::run(config, &mut SkeletonDemo::new())?;
    Ok(())
}
