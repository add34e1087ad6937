use thiserror::Error;

use crate::geom::Curvature;

/// A click the active geometry could not turn into an object. Recoverable;
/// the scene is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("point ({x:.0}, {y:.0}) is out of bounds for {curvature} geometry")]
    OutOfBounds { x: f64, y: f64, curvature: Curvature },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("canvas {field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("canvas {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("unknown geometry {0:?}, expected euclidean, spherical or hyperbolic")]
    UnknownGeometry(String),
    #[error("hit radius must be positive, got {0}")]
    HitRadius(f64),
}
