use std::path::PathBuf;

use cgmath::{Matrix4, Point3, SquareMatrix, Vector3};
use orbit_viewer::{Node, Scene, data_structures::model::Mesh};

pub const EPSILON: f32 = 1e-5;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

pub fn assert_matrix_near(actual: &Matrix4<f32>, expected: &Matrix4<f32>) {
    let a: &[[f32; 4]; 4] = actual.as_ref();
    let e: &[[f32; 4]; 4] = expected.as_ref();
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                (a[col][row] - e[col][row]).abs() < EPSILON,
                "matrices differ at column {}, row {}:\n{:?}\n{:?}",
                col,
                row,
                actual,
                expected
            );
        }
    }
}

pub fn assert_point_near(actual: Point3<f32>, expected: Point3<f32>) {
    assert!(
        (actual.x - expected.x).abs() < EPSILON
            && (actual.y - expected.y).abs() < EPSILON
            && (actual.z - expected.z).abs() < EPSILON,
        "points differ: {:?} vs {:?}",
        actual,
        expected
    );
}

/// Names of all nodes in traversal order.
pub fn visit_order(scene: &Scene) -> Vec<String> {
    let mut names = Vec::new();
    scene
        .root
        .traverse(&Matrix4::identity(), &mut |node, _| names.push(node.name.clone()));
    names
}

pub fn named_mesh(name: &str) -> Mesh {
    Mesh {
        name: name.to_string(),
        ..Default::default()
    }
}

/**
 * root
 * ├── A (mesh 0)
 * │   ├── A1 (mesh 1)
 * │   └── A2
 * └── B (mesh 2)
 *     └── B1 (mesh 0)
 */
pub fn two_branch_scene() -> Scene {
    let a = Node::new("A", translation(1.0, 0.0, 0.0))
        .with_meshes(vec![0])
        .with_child(Node::new("A1", translation(0.0, 1.0, 0.0)).with_meshes(vec![1]))
        .with_child(Node::new("A2", Matrix4::identity()));
    let b = Node::new("B", translation(0.0, 0.0, 1.0))
        .with_meshes(vec![2])
        .with_child(Node::new("B1", Matrix4::from_scale(2.0)).with_meshes(vec![0]));
    let root = Node::default().with_child(a).with_child(b);
    Scene::new(
        vec![named_mesh("m0"), named_mesh("m1"), named_mesh("m2")],
        root,
    )
}

#[cfg(feature = "integration-tests")]
pub fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let runtime = tokio::runtime::Runtime::new().expect("failed to start runtime");
    runtime.block_on(async {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .expect("no adapter available for integration tests");
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("test device"),
                ..Default::default()
            })
            .await
            .expect("failed to open device")
    })
}
