use super::{CanvasConfig, CircleShape, Curvature, GeometryModel, GuideLine, LineShape, Pos};

/// Distance a dragged point keeps from the canvas edge.
const EDGE_MARGIN: f64 = 10.;

/// The flat plane, bounded by the drawing rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct EuclideanModel {
    config: CanvasConfig,
}
impl EuclideanModel {
    pub fn new(config: CanvasConfig) -> Self {
        Self { config }
    }

    /// Clips the infinite line through `p1` and `p2` to the drawing area.
    fn clip_to_canvas(&self, p1: Pos, p2: Pos) -> Option<(Pos, Pos)> {
        let dir = p2 - p1;
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        for (origin, delta, hi) in [
            (p1.x, dir.x, self.config.width),
            (p1.y, dir.y, self.config.height),
        ] {
            if delta.abs() <= f64::EPSILON {
                if !(0. ..=hi).contains(&origin) {
                    return None;
                }
                continue;
            }
            let (a, b) = ((0. - origin) / delta, (hi - origin) / delta);
            t_min = t_min.max(a.min(b));
            t_max = t_max.min(a.max(b));
        }
        (t_min <= t_max).then(|| (p1 + t_min * dir, p1 + t_max * dir))
    }
}
/// Clamps `v` into `[EDGE_MARGIN, extent - EDGE_MARGIN]`. Extents too small
/// for the margin collapse to their midpoint.
fn clamp_to_margin(v: f64, extent: f64) -> f64 {
    let half = extent / 2.;
    v.clamp(EDGE_MARGIN.min(half), (extent - EDGE_MARGIN).max(half))
}

impl GeometryModel for EuclideanModel {
    fn curvature(&self) -> Curvature {
        Curvature::Euclidean
    }
    fn config(&self) -> &CanvasConfig {
        &self.config
    }

    fn distance(&self, p1: Pos, p2: Pos) -> f64 {
        p1.dist(&p2)
    }

    fn move_point(&self, point: Pos, dx: f64, dy: f64) -> Pos {
        Pos::new(
            clamp_to_margin(point.x + dx, self.config.width),
            clamp_to_margin(point.y + dy, self.config.height),
        )
    }

    fn is_point_in_bounds(&self, point: Pos) -> bool {
        (0. ..=self.config.width).contains(&point.x)
            && (0. ..=self.config.height).contains(&point.y)
    }

    fn parallel_lines(&self, line: GuideLine, point: Pos) -> Vec<GuideLine> {
        let dir = line.direction();
        if dir.normalized().is_none() {
            return vec![];
        }
        vec![GuideLine::new(point, point + dir)]
    }

    fn line_shape(&self, p1: Pos, p2: Pos) -> LineShape {
        if p1.dist(&p2) <= f64::EPSILON {
            return LineShape::Degenerate;
        }
        match self.clip_to_canvas(p1, p2) {
            Some((from, to)) => LineShape::Straight { from, to },
            None => LineShape::Degenerate,
        }
    }

    fn circle_shape(&self, center: Pos, radius: f64) -> CircleShape {
        CircleShape::round(center, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> EuclideanModel {
        EuclideanModel::new(CanvasConfig::new(500., 500., 200.))
    }

    #[test]
    fn distance_is_the_planar_norm() {
        assert_eq!(model().distance(Pos::new(0., 0.), Pos::new(3., 4.)), 5.);
    }

    #[test]
    fn moves_are_clamped_away_from_the_edges() {
        let m = model();
        assert_eq!(m.move_point(Pos::new(100., 100.), -500., 20.), Pos::new(10., 120.));
        assert_eq!(m.move_point(Pos::new(480., 20.), 50., -50.), Pos::new(490., 10.));
        assert_eq!(m.move_point(Pos::new(250., 250.), 5., 5.), Pos::new(255., 255.));
    }

    #[test]
    fn tiny_canvases_keep_moved_points_inside() {
        let m = EuclideanModel::new(CanvasConfig::new(5., 5., 2.));
        assert!(m.config.validate().is_ok());
        let moved = m.move_point(Pos::new(2.5, 2.5), 0., 0.);
        assert!(m.is_point_in_bounds(moved), "{moved:?}");
        assert_eq!(moved, Pos::new(2.5, 2.5));
        let moved = m.move_point(Pos::new(1., 4.), 30., -30.);
        assert_eq!(moved, Pos::new(2.5, 2.5));
    }

    #[test]
    fn bounds_are_the_canvas_rectangle() {
        let m = model();
        assert!(m.is_point_in_bounds(Pos::new(0., 500.)));
        assert!(!m.is_point_in_bounds(Pos::new(-0.5, 10.)));
        assert!(!m.is_point_in_bounds(Pos::new(10., 500.5)));
    }

    #[test]
    fn exactly_one_parallel() {
        let line = GuideLine::new(Pos::new(0., 0.), Pos::new(10., 5.));
        let parallels = model().parallel_lines(line, Pos::new(100., 100.));
        assert_eq!(parallels, vec![GuideLine::new(Pos::new(100., 100.), Pos::new(110., 105.))]);
    }

    #[test]
    fn lines_extend_to_the_canvas_edges() {
        let shape = model().line_shape(Pos::new(100., 100.), Pos::new(200., 100.));
        assert_eq!(
            shape,
            LineShape::Straight {
                from: Pos::new(0., 100.),
                to: Pos::new(500., 100.)
            }
        );
        let shape = model().line_shape(Pos::new(100., 100.), Pos::new(200., 200.));
        assert_eq!(
            shape,
            LineShape::Straight {
                from: Pos::new(0., 0.),
                to: Pos::new(500., 500.)
            }
        );
    }

    #[test]
    fn zero_length_lines_are_skipped() {
        let p = Pos::new(42., 42.);
        assert_eq!(model().line_shape(p, p), LineShape::Degenerate);
    }
}
