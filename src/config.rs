//! Startup settings: defaults, then `sketchpad.toml`, then environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

use crate::{
    error::ConfigError,
    geom::{CanvasConfig, Curvature},
    interaction::DEFAULT_HIT_RADIUS,
};

pub const DEFAULT_CONFIG_FILE: &str = "sketchpad.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub canvas: CanvasConfig,
    pub geometry: Curvature,
    pub hit_radius: f64,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            geometry: Curvature::default(),
            hit_radius: DEFAULT_HIT_RADIUS,
        }
    }
}
impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.canvas.validate()?;
        if !(self.hit_radius.is_finite() && self.hit_radius > 0.) {
            return Err(ConfigError::HitRadius(self.hit_radius));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    geometry: Option<String>,
    hit_radius: Option<f64>,
    canvas: FileCanvas,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileCanvas {
    width: Option<f64>,
    height: Option<f64>,
    center_x: Option<f64>,
    center_y: Option<f64>,
    boundary_radius: Option<f64>,
}

/// Layers a TOML document over the defaults. Omitted centre coordinates
/// follow the canvas size.
pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    let file: FileSettings = toml::from_str(raw).context("invalid settings file")?;
    let defaults = CanvasConfig::default();
    let width = file.canvas.width.unwrap_or(defaults.width);
    let height = file.canvas.height.unwrap_or(defaults.height);
    let canvas = CanvasConfig {
        width,
        height,
        center_x: file.canvas.center_x.unwrap_or(width / 2.),
        center_y: file.canvas.center_y.unwrap_or(height / 2.),
        boundary_radius: file
            .canvas
            .boundary_radius
            .unwrap_or(defaults.boundary_radius),
    };
    let geometry = match file.geometry {
        Some(name) => name.parse()?,
        None => Curvature::default(),
    };
    Ok(Settings {
        canvas,
        geometry,
        hit_radius: file.hit_radius.unwrap_or(DEFAULT_HIT_RADIUS),
    })
}

/// Applies `SKETCHPAD_GEOMETRY` and `SKETCHPAD_HIT_RADIUS` as read by `var`.
pub fn apply_env(
    settings: &mut Settings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = var("SKETCHPAD_GEOMETRY") {
        settings.geometry = v.parse()?;
    }
    if let Some(v) = var("SKETCHPAD_HIT_RADIUS") {
        settings.hit_radius = v
            .trim()
            .parse()
            .with_context(|| format!("SKETCHPAD_HIT_RADIUS is not a number: {v:?}"))?;
    }
    Ok(())
}

/// Loads settings from `path`, or from `sketchpad.toml` in the working
/// directory if it exists, then applies the process environment.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let mut settings = match fs::read_to_string(&path) {
        Ok(raw) => parse_settings(&raw).with_context(|| format!("reading {}", path.display()))?,
        Err(err) if required => {
            return Err(anyhow::Error::new(err).context(format!("reading {}", path.display())));
        }
        Err(_) => Settings::default(),
    };
    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    settings.validate()?;
    Ok(settings)
}
