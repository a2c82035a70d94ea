use std::path::PathBuf;

use orbit_viewer::{
    camera::{MAX_RADIUS, MIN_RADIUS, PITCH_LIMIT},
    config::{Command, ViewerConfig},
};

use crate::common::test_utils::fixture;

mod common;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn run_config(list: &[&str]) -> ViewerConfig {
    match ViewerConfig::from_args(args(list)).expect("arguments parse") {
        Command::Run(config) => config,
        Command::Help => panic!("unexpected help"),
    }
}

#[test]
fn should_default_to_bundled_cube() {
    let config = run_config(&[]);
    assert_eq!(config, ViewerConfig::default());
    assert_eq!(config.model_path, PathBuf::from("assets").join("cube.obj"));
}

#[test]
fn should_take_model_from_positional_argument() {
    let config = run_config(&["scene.glb"]);
    assert_eq!(config.model_path, PathBuf::from("scene.glb"));
}

#[test]
fn should_print_help() {
    assert_eq!(ViewerConfig::from_args(args(&["--help"])).unwrap(), Command::Help);
    assert_eq!(ViewerConfig::from_args(args(&["model.obj", "-h"])).unwrap(), Command::Help);
}

#[test]
fn should_reject_unknown_flags_and_extra_models() {
    assert!(ViewerConfig::from_args(args(&["--wireframe"])).is_err());
    assert!(ViewerConfig::from_args(args(&["a.obj", "b.obj"])).is_err());
    assert!(ViewerConfig::from_args(args(&["--config"])).is_err());
}

#[test]
fn should_fill_missing_ron_fields_with_defaults() {
    let config = ViewerConfig::from_ron_str("(window: (width: 1024))").expect("ron parses");
    assert_eq!(config.window.width, 1024);
    assert_eq!(config.window.height, 600);
    assert_eq!(config.camera, Default::default());
}

#[test]
fn should_load_config_file_and_let_argument_win() {
    let path = fixture("viewer.ron");
    let path = path.to_str().expect("utf-8 path");

    let from_file = run_config(&["--config", path]);
    assert_eq!(from_file.model_path, PathBuf::from("tests/fixtures/hierarchy.gltf"));
    assert_eq!(from_file.window.title, "fixture");
    assert_eq!(from_file.window.width, 320);
    assert_eq!(from_file.camera.radius, 8.0);

    let overridden = run_config(&["-c", path, "other.obj"]);
    assert_eq!(overridden.model_path, PathBuf::from("other.obj"));
    assert_eq!(overridden.window.width, 320);
}

#[test]
fn should_report_missing_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.ron");
    let result = ViewerConfig::from_args(vec!["--config".to_string(), missing.display().to_string()]);
    assert!(result.is_err());
}

#[test]
fn should_report_malformed_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.ron");
    std::fs::write(&path, "(window: (width: \"wide\"))").expect("write config");
    assert!(ViewerConfig::from_file(&path).is_err());
}

#[test]
fn should_build_clamped_camera() {
    let config = ViewerConfig::from_ron_str("(camera: (pitch: 120.0, radius: 50.0, sensitivity: 0.5))")
        .expect("ron parses");
    let camera = config.camera.build();
    assert_eq!(camera.pitch(), PITCH_LIMIT);
    assert_eq!(camera.radius(), MAX_RADIUS);
    assert_eq!(camera.sensitivity(), 0.5);
}

#[test]
fn should_keep_fixed_zoom_range_whatever_the_config_says() {
    // zoom bounds are not configurable, old keys are ignored
    let config = ViewerConfig::from_ron_str("(camera: (min_radius: 0.0, max_radius: 50.0, radius: 30.0))")
        .expect("ron parses");
    let mut camera = config.camera.build();
    assert_eq!(camera.radius(), MAX_RADIUS);

    camera.zoom(-100.0);
    assert_eq!(camera.radius(), MAX_RADIUS);
    camera.zoom(100.0);
    assert_eq!(camera.radius(), MIN_RADIUS);
    assert!(camera.view_matrix().x.x.is_finite());
}

#[test]
fn should_survive_ron_round_trip() {
    let config = ViewerConfig::default();
    let text = ron::to_string(&config).expect("serializes");
    assert_eq!(ViewerConfig::from_ron_str(&text).expect("parses"), config);
}

#[test]
fn should_convert_clear_colour() {
    let config = ViewerConfig::from_ron_str("(clear_colour: (1.0, 0.5, 0.25, 1.0))").expect("ron parses");
    let colour = config.clear_colour();
    assert_eq!((colour.r, colour.g, colour.b, colour.a), (1.0, 0.5, 0.25, 1.0));
}
