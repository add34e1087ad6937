use super::Pos;

/// How a geodesic through two points is realised on the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineShape {
    /// A straight segment, already extended/clipped as the geometry requires.
    Straight { from: Pos, to: Pos },
    /// A quadratic Bézier curve bowing away from the chord.
    Quadratic { from: Pos, control: Pos, to: Pos },
    /// A circular arc. `sweep` is signed, positive is counter-clockwise in
    /// plane coordinates, and never exceeds half a turn.
    Arc {
        center: Pos,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
    /// Zero-length input. Nothing to draw.
    Degenerate,
}
impl LineShape {
    /// Samples the shape into a polyline with `segments + 1` points.
    pub fn sample(&self, segments: usize) -> Vec<Pos> {
        let segments = segments.max(1);
        let ts = (0..=segments).map(|i| i as f64 / segments as f64);
        match *self {
            LineShape::Straight { from, to } => vec![from, to],
            LineShape::Quadratic { from, control, to } => ts
                .map(|t| {
                    let s = 1. - t;
                    (s * s) * from + (2. * s * t) * control + (t * t) * to
                })
                .collect(),
            LineShape::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => ts
                .map(|t| center + Pos::from_polar(radius, start_angle + sweep * t))
                .collect(),
            LineShape::Degenerate => vec![],
        }
    }
}

/// An unpersisted straight guide through two plane positions, used for
/// construction previews such as parallel lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub p1: Pos,
    pub p2: Pos,
}
impl GuideLine {
    pub fn new(p1: Pos, p2: Pos) -> Self {
        Self { p1, p2 }
    }
    pub fn direction(&self) -> Pos {
        self.p2 - self.p1
    }
}

/// Wraps an angle difference into `(-pi, pi]`.
pub(crate) fn shortest_sweep(start: f64, end: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut sweep = (end - start) % TAU;
    if sweep > PI {
        sweep -= TAU;
    } else if sweep <= -PI {
        sweep += TAU;
    }
    sweep
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn sweep_takes_the_short_way_round() {
        let sweep = shortest_sweep(170f64.to_radians(), -170f64.to_radians());
        assert!((sweep - 20f64.to_radians()).abs() < 1e-12);
        let sweep = shortest_sweep(-170f64.to_radians(), 170f64.to_radians());
        assert!((sweep + 20f64.to_radians()).abs() < 1e-12);
        assert!(shortest_sweep(0., 3. * PI).abs() <= PI);
    }

    #[test]
    fn quadratic_samples_hit_both_endpoints() {
        let shape = LineShape::Quadratic {
            from: Pos::new(0., 0.),
            control: Pos::new(5., 5.),
            to: Pos::new(10., 0.),
        };
        let pts = shape.sample(8);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], Pos::new(0., 0.));
        assert_eq!(pts[8], Pos::new(10., 0.));
        assert_eq!(pts[4], Pos::new(5., 2.5));
    }

    #[test]
    fn degenerate_samples_nothing() {
        assert!(LineShape::Degenerate.sample(16).is_empty());
    }
}
