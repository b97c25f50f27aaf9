//! End-to-end tests driving the engine across scene, animators, and physics

use approx::assert_relative_eq;
use scene3d::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn falling_box_lands_on_fixed_ground() {
    let mut config = EngineConfig::default();
    config.timing.fixed_timestep = FRAME;
    let mut engine = Engine::new(config).unwrap();

    let ground = engine
        .scene
        .add_child(engine.scene.root(), "ground", NodePayload::Group)
        .unwrap();
    let crate_node = engine
        .scene
        .add_child(
            engine.scene.root(),
            "crate",
            NodePayload::Mesh(Mesh::cuboid(1.0, 1.0, 1.0)),
        )
        .unwrap();
    engine
        .scene
        .set_position(crate_node, Vec3::new(0.0, 4.0, 0.0))
        .unwrap();
    engine.scene.update_world_transforms();

    let ground_dynamics = NodeDynamics::new_box(
        &mut engine.physics,
        &engine.scene,
        ground,
        20.0,
        1.0,
        20.0,
        0.0,
        0.2,
    )
    .unwrap();
    engine.physics.add_node_dynamics(ground_dynamics).unwrap();

    let crate_dynamics = NodeDynamics::new_box(
        &mut engine.physics,
        &engine.scene,
        crate_node,
        1.0,
        1.0,
        1.0,
        2.0,
        0.2,
    )
    .unwrap();
    engine.physics.add_node_dynamics(crate_dynamics).unwrap();

    // Three simulated seconds is plenty of time to fall four meters and settle
    for _ in 0..180 {
        engine.update(FRAME).unwrap();
    }

    let resting_y = engine.scene.world_position(crate_node).unwrap().y;
    // Ground top at y = 0.5, crate half-height 0.5: resting center near y = 1
    assert_relative_eq!(resting_y, 1.0, epsilon = 0.1);

    // The fixed ground must not have moved
    assert_relative_eq!(
        engine.scene.world_position(ground).unwrap(),
        Vec3::zeros(),
        epsilon = 1e-4
    );
}

#[test]
fn skeleton_and_physics_coexist_in_one_scene() {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();

    let root = engine.scene.root();
    let skeleton = Skeleton::attach(&mut engine.scene, root, "pelvis").unwrap();
    let spine = skeleton
        .add_bone(&mut engine.scene, skeleton.root(), "spine")
        .unwrap();
    engine
        .scene
        .set_position(spine, Vec3::new(0.0, 1.0, 0.0))
        .unwrap();
    skeleton.add_bone(&mut engine.scene, spine, "head").unwrap();

    let body = engine
        .scene
        .add_child(engine.scene.root(), "body", NodePayload::Group)
        .unwrap();
    engine
        .scene
        .set_position(body, Vec3::new(3.0, 5.0, 0.0))
        .unwrap();
    engine.scene.update_world_transforms();

    let dynamics = NodeDynamics::new_box(
        &mut engine.physics,
        &engine.scene,
        body,
        1.0,
        1.0,
        1.0,
        1.0,
        0.0,
    )
    .unwrap();
    engine.physics.add_node_dynamics(dynamics).unwrap();

    for _ in 0..60 {
        engine.update(1.0 / 60.0).unwrap();
    }

    // Bones are untouched by physics
    assert_eq!(skeleton.bone_count(&engine.scene), 3);
    let joints = skeleton.joint_positions(&engine.scene);
    assert_eq!(joints.len(), 3);

    // The dynamic body fell while the skeleton stayed put
    assert!(engine.scene.world_position(body).unwrap().y < 5.0);
    assert_relative_eq!(
        engine.scene.world_position(spine).unwrap(),
        Vec3::new(0.0, 1.0, 0.0),
        epsilon = 1e-5
    );
}

#[test]
fn run_drives_application_lifecycle() {
    struct CountingApp {
        initialized: bool,
        cleaned_up: bool,
        frames: u32,
    }

    impl Application for CountingApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            self.initialized = true;
            engine
                .scene
                .add_child(engine.scene.root(), "marker", NodePayload::Group)?;
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.frames += 1;
            if self.frames >= 5 {
                engine.stop();
            }
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    let mut app = CountingApp {
        initialized: false,
        cleaned_up: false,
        frames: 0,
    };
    Engine::run(EngineConfig::default(), &mut app).unwrap();

    assert!(app.initialized);
    assert!(app.cleaned_up);
    assert_eq!(app.frames, 5);
}

#[test]
fn paced_run_loop_advances_physics() {
    struct DropApp {
        node: Option<NodeId>,
        frames: u32,
    }

    impl Application for DropApp {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            let node = engine
                .scene
                .add_child(engine.scene.root(), "box", NodePayload::Group)?;
            engine.scene.set_position(node, Vec3::new(0.0, 10.0, 0.0))?;
            engine.scene.update_world_transforms();

            let dynamics = NodeDynamics::new_box(
                &mut engine.physics,
                &engine.scene,
                node,
                1.0,
                1.0,
                1.0,
                1.0,
                0.0,
            )?;
            engine.physics.add_node_dynamics(dynamics)?;
            self.node = Some(node);
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.frames += 1;
            if self.frames >= 30 {
                engine.stop();
            }
            Ok(())
        }

        fn cleanup(&mut self, engine: &mut Engine) {
            // Even a frame-count-limited app must see its body move: the run
            // loop paces frames so wall time reaches the fixed timestep
            let node = self.node.expect("initialized");
            let y = engine.scene.world_position(node).expect("node alive").y;
            assert!(y < 9.9, "body barely moved over 30 paced frames, y = {y}");
        }
    }

    let mut config = EngineConfig::default();
    config.timing.fixed_timestep = 0.01;
    let mut app = DropApp {
        node: None,
        frames: 0,
    };
    Engine::run(config, &mut app).unwrap();
}

#[test]
fn disabled_physics_freezes_bodies() {
    let mut config = EngineConfig::default();
    config.physics.enabled = false;
    let mut engine = Engine::new(config).unwrap();

    let node = engine
        .scene
        .add_child(engine.scene.root(), "box", NodePayload::Group)
        .unwrap();
    engine
        .scene
        .set_position(node, Vec3::new(0.0, 10.0, 0.0))
        .unwrap();
    engine.scene.update_world_transforms();

    let dynamics = NodeDynamics::new_box(
        &mut engine.physics,
        &engine.scene,
        node,
        1.0,
        1.0,
        1.0,
        1.0,
        0.0,
    )
    .unwrap();
    engine.physics.add_node_dynamics(dynamics).unwrap();

    for _ in 0..30 {
        engine.update(1.0 / 60.0).unwrap();
    }

    assert_relative_eq!(
        engine.scene.world_position(node).unwrap(),
        Vec3::new(0.0, 10.0, 0.0),
        epsilon = 1e-5
    );
}
