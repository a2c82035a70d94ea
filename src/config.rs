//! Viewer configuration.
//!
//! Everything has a default, so the viewer runs with no configuration at all.
//! A RON file can override any subset of fields, and the model path given on
//! the command line wins over the one in the file.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::camera::{DEFAULT_SENSITIVITY, OrbitCamera};

pub const USAGE: &str = "\
usage: orbit-viewer [MODEL] [--config FILE]

  MODEL          .gltf, .glb or .obj file to show (default: assets/cube.obj)
  -c, --config   RON file with viewer settings
  -h, --help     print this message

Drag with the left mouse button to orbit, scroll to zoom.";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model_path: PathBuf,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub clear_colour: [f64; 4],
    pub mesh_colour: [f32; 4],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets").join("cube.obj"),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            clear_colour: [0.05, 0.05, 0.1, 1.0],
            mesh_colour: [0.3, 0.4, 1.0, 0.5],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "orbit-viewer".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Initial camera placement, input sensitivity and projection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub sensitivity: f32,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            radius: 5.0,
            sensitivity: DEFAULT_SENSITIVITY,
            fovy_degrees: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn build(&self) -> OrbitCamera {
        OrbitCamera::new(self.yaw, self.pitch, self.radius).with_sensitivity(self.sensitivity)
    }
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Run(ViewerConfig),
    Help,
}

impl ViewerConfig {
    pub fn from_ron_str(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {:?}", path))?;
        let config = Self::from_ron_str(&text)
            .with_context(|| format!("could not parse config file {:?}", path))?;
        log::info!("loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse command line arguments, without the program name.
    pub fn from_args<I>(args: I) -> anyhow::Result<Command>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut model_path = None;
        let mut config_path = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-c" | "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow!("{} expects a file\n\n{}", arg, USAGE))?;
                    config_path = Some(PathBuf::from(path));
                }
                flag if flag.starts_with('-') => bail!("unknown option {}\n\n{}", flag, USAGE),
                path => {
                    if model_path.is_some() {
                        bail!("only one model may be given\n\n{}", USAGE);
                    }
                    model_path = Some(PathBuf::from(path));
                }
            }
        }

        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        if let Some(model_path) = model_path {
            config.model_path = model_path;
        }
        Ok(Command::Run(config))
    }

    pub fn clear_colour(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_colour;
        wgpu::Color { r, g, b, a }
    }
}
