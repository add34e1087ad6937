use std::f64::consts::PI;

use super::{
    clamp_into_disk, disk_boundary, disk_contains, lines::shortest_sweep, Boundary, CanvasConfig,
    CircleShape, Curvature, GeometryModel, GuideLine, LineShape, Pos,
};

/// Segments whose midpoint is this close to the centre are drawn as diameters.
const DIAMETER_THRESHOLD: f64 = 20.;
/// Distance of a geodesic arc's centre from the disk centre, in boundary radii.
const ARC_CENTER_DISTANCE: f64 = 1.5;
/// Largest stretch applied to a circle drawn at the rim.
const MAX_CIRCLE_DISTORTION: f64 = 0.3;
/// How many example parallels to offer.
const PARALLEL_COUNT: usize = 3;

/// The Poincaré disk model, filling the boundary disk.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperbolicModel {
    config: CanvasConfig,
}
impl HyperbolicModel {
    pub fn new(config: CanvasConfig) -> Self {
        Self { config }
    }
}
impl GeometryModel for HyperbolicModel {
    fn curvature(&self) -> Curvature {
        Curvature::Hyperbolic
    }
    fn config(&self) -> &CanvasConfig {
        &self.config
    }

    fn distance(&self, p1: Pos, p2: Pos) -> f64 {
        let (u1, u2) = (self.config.normalize(p1), self.config.normalize(p2));
        let (r1, r2) = (u1.norm_sq(), u2.norm_sq());
        if r1 >= 1. || r2 >= 1. {
            return self.config.boundary_radius * u1.dist(&u2);
        }
        let denominator = (1. - r1) * (1. - r2);
        if denominator <= 0. {
            return f64::INFINITY;
        }
        let ratio = u1.dist_sq(&u2) / denominator;
        self.config.boundary_radius * (1. + 2. * ratio).acosh()
    }

    fn move_point(&self, point: Pos, dx: f64, dy: f64) -> Pos {
        clamp_into_disk(&self.config, point, dx, dy)
    }

    fn is_point_in_bounds(&self, point: Pos) -> bool {
        disk_contains(&self.config, point)
    }

    fn parallel_lines(&self, line: GuideLine, point: Pos) -> Vec<GuideLine> {
        let dir = line.direction();
        if dir.normalized().is_none() {
            return vec![];
        }
        let base = dir.angle();
        (0..PARALLEL_COUNT)
            .map(|i| {
                let angle = base + (i as f64 - 1.) * 0.3;
                let reach = 50. + 30. * i as f64;
                GuideLine::new(
                    point + Pos::from_polar(reach, angle),
                    point + Pos::from_polar(reach, angle + PI),
                )
            })
            .collect()
    }

    fn line_shape(&self, p1: Pos, p2: Pos) -> LineShape {
        let Some(dir) = (p2 - p1).normalized() else {
            return LineShape::Degenerate;
        };
        let center = self.config.center();
        let radius = self.config.boundary_radius;
        let offset = p1.midpoint(p2) - center;
        let outward = match offset.normalized() {
            Some(outward) if offset.norm() >= DIAMETER_THRESHOLD => outward,
            _ => {
                return LineShape::Straight {
                    from: center - radius * dir,
                    to: center + radius * dir,
                }
            }
        };
        let arc_center = center + (ARC_CENTER_DISTANCE * radius) * outward;
        let (v1, v2) = (p1 - arc_center, p2 - arc_center);
        let start_angle = v1.angle();
        LineShape::Arc {
            center: arc_center,
            radius: 0.5 * (v1.norm() + v2.norm()),
            start_angle,
            sweep: shortest_sweep(start_angle, v2.angle()),
        }
    }

    fn circle_shape(&self, center: Pos, radius: f64) -> CircleShape {
        let t = (center.dist(&self.config.center()) / self.config.boundary_radius).min(1.);
        CircleShape {
            center,
            radius_x: radius * (1. + MAX_CIRCLE_DISTORTION * t),
            radius_y: radius * (1. - MAX_CIRCLE_DISTORTION * t),
        }
    }

    fn boundary(&self) -> Option<Boundary> {
        Some(disk_boundary(&self.config))
    }
}
