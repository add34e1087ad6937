use super::{
    clamp_into_disk, disk_boundary, disk_contains, Boundary, CanvasConfig, CircleShape, Curvature,
    GeometryModel, GuideLine, LineShape, Pos,
};

/// Bow of a drawn great-circle arc, as a fraction of the midpoint's distance
/// from the centre.
const BOW_PER_OFFSET: f64 = 0.3;
/// Upper bound on the bow, as a fraction of the boundary radius.
const MAX_BOW: f64 = 0.2;
/// Circles never flatten beyond this vertical factor.
const MIN_ELLIPSE_FACTOR: f64 = 0.3;

/// A sphere seen through the boundary disk. Plane offsets from the centre,
/// in units of the boundary radius, are read as latitude (x) and
/// longitude (y).
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalModel {
    config: CanvasConfig,
}
impl SphericalModel {
    pub fn new(config: CanvasConfig) -> Self {
        Self { config }
    }

    /// Central angle between two points, by the haversine formula.
    fn central_angle(&self, p1: Pos, p2: Pos) -> f64 {
        let (u1, u2) = (self.config.normalize(p1), self.config.normalize(p2));
        let (lat1, lon1) = (u1.x, u1.y);
        let (lat2, lon2) = (u2.x, u2.y);
        let h = ((lat2 - lat1) / 2.).sin().powi(2)
            + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.).sin().powi(2);
        let h = h.clamp(0., 1.);
        2. * h.sqrt().atan2((1. - h).sqrt())
    }
}
impl GeometryModel for SphericalModel {
    fn curvature(&self) -> Curvature {
        Curvature::Spherical
    }
    fn config(&self) -> &CanvasConfig {
        &self.config
    }

    fn distance(&self, p1: Pos, p2: Pos) -> f64 {
        self.config.boundary_radius * self.central_angle(p1, p2)
    }

    fn move_point(&self, point: Pos, dx: f64, dy: f64) -> Pos {
        clamp_into_disk(&self.config, point, dx, dy)
    }

    fn is_point_in_bounds(&self, point: Pos) -> bool {
        disk_contains(&self.config, point)
    }

    fn parallel_lines(&self, _line: GuideLine, _point: Pos) -> Vec<GuideLine> {
        // Any two great circles intersect.
        vec![]
    }

    fn line_shape(&self, p1: Pos, p2: Pos) -> LineShape {
        let Some(normal) = (p2 - p1).perp().normalized() else {
            return LineShape::Degenerate;
        };
        let mid = p1.midpoint(p2);
        let offset = mid - self.config.center();
        let bow = (offset.norm() * BOW_PER_OFFSET).min(self.config.boundary_radius * MAX_BOW);
        // Bulge towards the rim, whichever order the endpoints came in.
        let normal = if normal.dot(offset) < 0. { -normal } else { normal };
        LineShape::Quadratic {
            from: p1,
            control: mid + bow * normal,
            to: p2,
        }
    }

    fn circle_shape(&self, center: Pos, radius: f64) -> CircleShape {
        let t = center.dist(&self.config.center()) / self.config.boundary_radius;
        CircleShape {
            center,
            radius_x: radius,
            radius_y: radius * t.cos().max(MIN_ELLIPSE_FACTOR),
        }
    }

    fn boundary(&self) -> Option<Boundary> {
        Some(disk_boundary(&self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::tests::approx;

    fn model() -> SphericalModel {
        SphericalModel::new(CanvasConfig::default())
    }

    #[test]
    fn distance_along_the_equator_is_arc_length() {
        let m = model();
        let c = m.config.center();
        let d = m.distance(c, c + Pos::new(125., 0.));
        assert!(approx(d, 125.), "{d}");
        assert_eq!(m.distance(c, c), 0.);
    }

    #[test]
    fn distance_shrinks_towards_the_poles() {
        let m = model();
        let c = m.config.center();
        let equator = m.distance(c + Pos::new(0., -50.), c + Pos::new(0., 50.));
        let high = m.distance(c + Pos::new(200., -50.), c + Pos::new(200., 50.));
        assert!(high < equator);
    }

    #[test]
    fn horizontal_offsets_are_latitude() {
        let m = model();
        let c = m.config.center();
        // Same longitude, latitudes 0.4 rad apart.
        let d = m.distance(c + Pos::new(-50., 200.), c + Pos::new(50., 200.));
        assert!(approx(d, 100.), "{d}");
        let d = m.distance(c + Pos::new(200., -50.), c + Pos::new(200., 50.));
        assert!(d < 100., "{d}");
    }

    #[test]
    fn points_near_the_rim_are_pulled_inside() {
        let m = model();
        let c = m.config.center();
        let moved = m.move_point(c + Pos::new(200., 0.), 40., 0.);
        assert!(moved.dist(&(c + Pos::new(225., 0.))) < 1e-9);
        let free = m.move_point(c, 30., -40.);
        assert_eq!(free, c + Pos::new(30., -40.));
    }

    #[test]
    fn there_are_no_parallels() {
        let line = GuideLine::new(Pos::new(300., 300.), Pos::new(500., 300.));
        assert!(model().parallel_lines(line, Pos::new(400., 200.)).is_empty());
    }

    #[test]
    fn arcs_bulge_away_from_the_centre() {
        let m = model();
        let c = m.config.center();
        let (a, b) = (c + Pos::new(-100., 100.), c + Pos::new(100., 100.));
        for (p1, p2) in [(a, b), (b, a)] {
            let LineShape::Quadratic { control, .. } = m.line_shape(p1, p2) else {
                panic!("expected a curve");
            };
            assert!(approx(control.y, c.y + 100. + 30.), "{control:?}");
        }
    }

    #[test]
    fn circles_flatten_away_from_the_centre() {
        let m = model();
        let c = m.config.center();
        let centred = m.circle_shape(c, 40.);
        assert_eq!(centred.radius_y, 40.);
        let far = m.circle_shape(c + Pos::new(0., 249.), 40.);
        assert!(far.radius_y < 40. * 0.6);
        assert_eq!(far.radius_x, 40.);
        let floor = m.circle_shape(c + Pos::new(10_000., 0.), 40.);
        assert!(approx(floor.radius_y, 12.));
    }
}
