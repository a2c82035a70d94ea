use cgmath::{EuclideanSpace, Matrix4, Point3, SquareMatrix, Transform};
use orbit_viewer::{ImportError, Scene, config::ViewerConfig, flow, load_scene};

use crate::common::test_utils::{assert_point_near, fixture, visit_order};

mod common;

fn assert_well_formed(scene: &Scene) {
    for mesh in &scene.meshes {
        assert_eq!(mesh.indices.len() % 3, 0, "mesh {:?} is not triangulated", mesh.name);
        assert!(mesh.triangle_count() > 0, "mesh {:?} has no triangles", mesh.name);
        for &index in &mesh.indices {
            assert!(
                (index as usize) < mesh.vertices.len(),
                "mesh {:?} indexes vertex {} of {}",
                mesh.name,
                index,
                mesh.vertices.len()
            );
        }
    }
    for draw in scene.draw_list(&Matrix4::identity()) {
        assert!(draw.mesh < scene.mesh_count());
    }
}

#[test]
fn should_fail_on_missing_file_and_leave_scene_empty() {
    let mut scene = Scene::default();
    let err = scene
        .load_from(fixture("does_not_exist.obj"))
        .expect_err("import of a missing file must fail");

    assert!(matches!(err, ImportError::Io { .. }), "got {:?}", err);
    assert!(scene.is_empty());
    assert_eq!(scene, Scene::default());
}

#[test]
fn should_keep_previous_scene_when_reload_fails() {
    let mut scene = Scene::default();
    scene.load_from(fixture("quad.obj")).expect("quad loads");
    let before = scene.clone();

    assert!(scene.load_from(fixture("not_a_model.txt")).is_err());
    assert_eq!(scene, before);
}

#[test]
fn should_return_import_failure_with_model_path() {
    let config = ViewerConfig {
        model_path: fixture("does_not_exist.obj"),
        ..Default::default()
    };
    let err = flow::load_model(&config).expect_err("missing model is fatal");

    let message = format!("{:#}", err);
    assert!(message.contains("does_not_exist.obj"), "{}", message);
    assert!(matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::Io { .. })
    ));
}

#[test]
fn should_load_configured_model() {
    let config = ViewerConfig {
        model_path: fixture("quad.obj"),
        ..Default::default()
    };
    let scene = flow::load_model(&config).expect("quad loads");
    assert_eq!(scene.mesh_count(), 1);
}

#[test]
fn should_reject_unknown_extension() {
    match load_scene(fixture("not_a_model.txt")) {
        Err(ImportError::UnsupportedFormat { extension, .. }) => assert_eq!(extension, "txt"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
}

#[test]
fn should_reject_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(load_scene(dir.path()), Err(ImportError::Io { .. })));
}

#[test]
fn should_reject_gltf_without_meshes() {
    assert!(matches!(
        load_scene(fixture("no_meshes.gltf")),
        Err(ImportError::NoMeshes(_))
    ));
}

#[test]
fn should_reject_empty_obj() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.obj");
    std::fs::write(&path, "").expect("write fixture");

    let mut scene = Scene::default();
    let err = scene.load_from(&path).expect_err("an empty obj has nothing to show");
    assert!(matches!(err, ImportError::NoMeshes(_)), "got {:?}", err);
    assert!(scene.is_empty());
}

#[test]
fn should_reject_obj_without_faces() {
    assert!(matches!(
        load_scene(fixture("vertices_only.obj")),
        Err(ImportError::NoMeshes(_))
    ));
}

#[test]
fn should_reject_gltf_without_triangles() {
    assert!(matches!(
        load_scene(fixture("no_triangles.gltf")),
        Err(ImportError::NoMeshes(_))
    ));
}

#[test]
fn should_report_malformed_gltf() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.gltf");
    std::fs::write(&path, "{ this is not json").expect("write fixture");
    assert!(matches!(load_scene(&path), Err(ImportError::Gltf(_))));
}

#[test]
fn should_match_extension_case_insensitively() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("QUAD.OBJ");
    std::fs::copy(fixture("quad.obj"), &path).expect("copy fixture");

    let scene = load_scene(&path).expect("upper case extension loads");
    assert_eq!(scene.mesh_count(), 1);
    assert_eq!(scene.root.name, "QUAD");
}

#[test]
fn should_triangulate_and_generate_normals_for_obj_quad() {
    let scene = load_scene(fixture("quad.obj")).expect("quad loads");
    assert_well_formed(&scene);

    assert_eq!(scene.mesh_count(), 1);
    let mesh = &scene.meshes[0];
    assert_eq!(mesh.triangle_count(), 2);
    // both faces share the +Z normal, so the corners are joined again
    assert_eq!(mesh.vertices.len(), 4);
    for vertex in &mesh.vertices {
        assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn should_create_one_node_per_obj_object() {
    let scene = load_scene(fixture("two_objects.obj")).expect("obj loads");
    assert_well_formed(&scene);

    assert_eq!(scene.root.name, "two_objects");
    assert_eq!(visit_order(&scene), ["two_objects", "first", "second"]);
    let meshes: Vec<usize> = scene
        .draw_list(&Matrix4::identity())
        .iter()
        .map(|d| d.mesh)
        .collect();
    assert_eq!(meshes, [0, 1]);
    assert_eq!(scene.meshes[1].vertices[0].position[2], 1.0);
}

#[test]
fn should_load_gltf_hierarchy() {
    let scene = load_scene(fixture("hierarchy.gltf")).expect("gltf loads");
    assert_well_formed(&scene);

    assert_eq!(scene.mesh_count(), 1);
    assert_eq!(scene.meshes[0].name, "triangle[0]");
    assert_eq!(scene.meshes[0].triangle_count(), 1);
    assert_eq!(visit_order(&scene), ["hierarchy", "A", "C", "B"]);

    let draws = scene.draw_list(&Matrix4::identity());
    assert_eq!(draws.len(), 2);
    assert!(draws.iter().all(|d| d.mesh == 0));
    assert_point_near(
        draws[0].world.transform_point(Point3::origin()),
        Point3::new(1.0, 2.0, 0.0),
    );
    assert_point_near(
        draws[1].world.transform_point(Point3::origin()),
        Point3::new(0.0, 0.0, 3.0),
    );
}

#[test]
fn should_generate_normals_for_gltf_without_them() {
    let scene = load_scene(fixture("hierarchy.gltf")).expect("gltf loads");
    for vertex in &scene.meshes[0].vertices {
        assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
    }
}

#[test]
fn should_load_default_cube() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("cube.obj");
    let scene = load_scene(path).expect("cube loads");
    assert_well_formed(&scene);

    assert_eq!(scene.triangle_count(), 12);
    // four corners per face, each with the face normal
    assert_eq!(scene.meshes[0].vertices.len(), 24);
    assert_eq!(scene.draw_count(), 1);
    assert_eq!(scene.root.transform, Matrix4::identity());
}
