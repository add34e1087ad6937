use super::Pos;

/// How a stored circle is painted: an axis-aligned ellipse around `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub center: Pos,
    pub radius_x: f64,
    pub radius_y: f64,
}
impl CircleShape {
    pub fn round(center: Pos, radius: f64) -> Self {
        Self {
            center,
            radius_x: radius,
            radius_y: radius,
        }
    }

    pub fn sample(&self, segments: usize) -> Vec<Pos> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let theta = std::f64::consts::TAU * i as f64 / segments as f64;
                self.center + Pos::new(self.radius_x * theta.cos(), self.radius_y * theta.sin())
            })
            .collect()
    }
}

/// The disk outline bounding a non-Euclidean model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub center: Pos,
    pub radius: f64,
}
impl Boundary {
    pub fn contains(&self, point: Pos) -> bool {
        self.center.dist_sq(&point) <= self.radius * self.radius
    }
}
