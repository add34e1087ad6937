//! Geometry models: what distance, straight lines and valid locations mean
//! under each curvature, all sharing one drawing plane.

mod canvas;
mod circles;
mod euclidean;
mod hyperbolic;
mod lines;
mod points;
mod spherical;

use std::{fmt, str::FromStr};

pub use canvas::CanvasConfig;
pub use circles::{Boundary, CircleShape};
pub use euclidean::EuclideanModel;
pub use hyperbolic::HyperbolicModel;
pub use lines::{GuideLine, LineShape};
pub use points::Pos;
pub use spherical::SphericalModel;

use crate::error::ConfigError;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Curvature {
    Spherical,
    Euclidean,
    #[default]
    Hyperbolic,
}
impl Curvature {
    pub const ALL: [Curvature; 3] = [
        Curvature::Euclidean,
        Curvature::Spherical,
        Curvature::Hyperbolic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Curvature::Spherical => "Spherical",
            Curvature::Euclidean => "Euclidean",
            Curvature::Hyperbolic => "Hyperbolic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Curvature::Spherical => {
                "Positive curvature: great circles always meet, so no parallels exist."
            }
            Curvature::Euclidean => {
                "Flat plane: exactly one parallel passes through a point off a line."
            }
            Curvature::Hyperbolic => {
                "Negative curvature: infinitely many parallels pass through a point off a line."
            }
        }
    }
}
impl fmt::Display for Curvature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for Curvature {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Curvature::Euclidean),
            "spherical" => Ok(Curvature::Spherical),
            "hyperbolic" => Ok(Curvature::Hyperbolic),
            _ => Err(ConfigError::UnknownGeometry(s.to_owned())),
        }
    }
}

/// The capabilities every geometry provides.
pub trait GeometryModel {
    fn curvature(&self) -> Curvature;
    fn config(&self) -> &CanvasConfig;

    /// Metric distance in plane units.
    fn distance(&self, p1: Pos, p2: Pos) -> f64;
    /// Where `point` lands after being nudged by `(dx, dy)`.
    fn move_point(&self, point: Pos, dx: f64, dy: f64) -> Pos;
    fn is_point_in_bounds(&self, point: Pos) -> bool;
    /// Example lines through `point` that never meet `line`.
    fn parallel_lines(&self, line: GuideLine, point: Pos) -> Vec<GuideLine>;
    /// How the geodesic through `p1` and `p2` appears on the plane.
    fn line_shape(&self, p1: Pos, p2: Pos) -> LineShape;
    fn circle_shape(&self, center: Pos, radius: f64) -> CircleShape;

    fn boundary(&self) -> Option<Boundary> {
        None
    }
    fn name(&self) -> &'static str {
        self.curvature().name()
    }
    fn description(&self) -> &'static str {
        self.curvature().description()
    }
}

/// The active geometry. A closed set, picked by [`Engine::new`].
#[derive(Debug, Clone, PartialEq)]
pub enum Engine {
    Euclidean(EuclideanModel),
    Spherical(SphericalModel),
    Hyperbolic(HyperbolicModel),
}
impl Engine {
    pub fn new(curvature: Curvature, config: CanvasConfig) -> Self {
        match curvature {
            Curvature::Euclidean => Engine::Euclidean(EuclideanModel::new(config)),
            Curvature::Spherical => Engine::Spherical(SphericalModel::new(config)),
            Curvature::Hyperbolic => Engine::Hyperbolic(HyperbolicModel::new(config)),
        }
    }

    fn model(&self) -> &dyn GeometryModel {
        match self {
            Engine::Euclidean(m) => m,
            Engine::Spherical(m) => m,
            Engine::Hyperbolic(m) => m,
        }
    }
}
impl GeometryModel for Engine {
    fn curvature(&self) -> Curvature {
        self.model().curvature()
    }
    fn config(&self) -> &CanvasConfig {
        self.model().config()
    }
    fn distance(&self, p1: Pos, p2: Pos) -> f64 {
        self.model().distance(p1, p2)
    }
    fn move_point(&self, point: Pos, dx: f64, dy: f64) -> Pos {
        self.model().move_point(point, dx, dy)
    }
    fn is_point_in_bounds(&self, point: Pos) -> bool {
        self.model().is_point_in_bounds(point)
    }
    fn parallel_lines(&self, line: GuideLine, point: Pos) -> Vec<GuideLine> {
        self.model().parallel_lines(line, point)
    }
    fn line_shape(&self, p1: Pos, p2: Pos) -> LineShape {
        self.model().line_shape(p1, p2)
    }
    fn circle_shape(&self, center: Pos, radius: f64) -> CircleShape {
        self.model().circle_shape(center, radius)
    }
    fn boundary(&self) -> Option<Boundary> {
        self.model().boundary()
    }
}

/// Radius fraction at which a moving point gets pulled back inside a disk.
const DISK_CLAMP_TRIGGER: f64 = 0.95;
/// Radius fraction a pulled-back point lands on.
const DISK_CLAMP_TARGET: f64 = 0.9;

/// Moves a point freely, but projects it radially back to 90% of the disk
/// radius once it gets within 5% of the rim.
fn clamp_into_disk(config: &CanvasConfig, point: Pos, dx: f64, dy: f64) -> Pos {
    let naive = point + Pos::new(dx, dy);
    let center = config.center();
    let offset = naive - center;
    if offset.norm() >= config.boundary_radius * DISK_CLAMP_TRIGGER {
        center + Pos::from_polar(config.boundary_radius * DISK_CLAMP_TARGET, offset.angle())
    } else {
        naive
    }
}

fn disk_boundary(config: &CanvasConfig) -> Boundary {
    Boundary {
        center: config.center(),
        radius: config.boundary_radius,
    }
}

fn disk_contains(config: &CanvasConfig, point: Pos) -> bool {
    disk_boundary(config).contains(point)
}
