use std::ops::{Add, Mul, Neg, Sub};

/// A position on the shared drawing plane. Also doubles as a complex number
/// where the disk models need one.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}
impl Pos {
    pub const ORIGIN: Self = Pos { x: 0., y: 0. };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub fn from_polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }

    pub fn dist_sq(self, other: &Pos) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }
    pub fn dist(self, other: &Pos) -> f64 {
        self.dist_sq(other).sqrt()
    }
    pub fn norm_sq(self) -> f64 {
        self.dist_sq(&Pos::ORIGIN)
    }
    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }
    /// Angle of the vector from the origin, in `(-pi, pi]`.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
    pub fn dot(self, other: Pos) -> f64 {
        self.x * other.x + self.y * other.y
    }
    /// Rotated a quarter turn counter-clockwise.
    pub fn perp(self) -> Self {
        Pos {
            x: -self.y,
            y: self.x,
        }
    }
    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(self) -> Option<Self> {
        let len = self.norm();
        (len > f64::EPSILON).then(|| (1. / len) * self)
    }
    pub fn midpoint(self, other: Pos) -> Self {
        0.5 * (self + other)
    }
}
impl Add for Pos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Pos {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl Mul<Pos> for f64 {
    type Output = Pos;

    fn mul(self, rhs: Pos) -> Self::Output {
        Pos {
            x: self * rhs.x,
            y: self * rhs.y,
        }
    }
}
impl Neg for Pos {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Pos {
            x: -self.x,
            y: -self.y,
        }
    }
}
impl Sub for Pos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}


#[cfg(test)]
mod tests {
    use super::Pos;

    #[test]
    fn complex_division_inverts_multiplication() {
        let a = Pos::new(0.3, -0.7);
        let b = Pos::new(-1.2, 0.4);
        let back = (a * b) / b;
        assert!(back.dist(&a) < 1e-12);
    }

    #[test]
    fn perp_is_orthogonal() {
        let v = Pos::new(3., 4.);
        assert_eq!(v.dot(v.perp()), 0.);
        assert_eq!(v.perp().norm(), 5.);
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert_eq!(Pos::ORIGIN.normalized(), None);
        let unit = Pos::new(0., -2.).normalized().expect("non-zero");
        assert_eq!(unit, Pos::new(0., -1.));
    }
}
