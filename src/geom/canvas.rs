use super::Pos;
use crate::error::ConfigError;

/// Where geometric space lives on the drawing plane. Shared by every engine
/// and fixed for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub boundary_radius: f64,
}
impl Default for CanvasConfig {
    fn default() -> Self {
        Self::new(800., 600., 250.)
    }
}
impl CanvasConfig {
    /// A canvas with the disk centred in the drawing area.
    pub fn new(width: f64, height: f64, boundary_radius: f64) -> Self {
        Self {
            width,
            height,
            center_x: width / 2.,
            center_y: height / 2.,
            boundary_radius,
        }
    }

    pub fn center(&self) -> Pos {
        Pos::new(self.center_x, self.center_y)
    }

    /// Maps a plane position into the unit disk.
    pub fn normalize(&self, point: Pos) -> Pos {
        let offset = point - self.center();
        Pos::new(
            offset.x / self.boundary_radius,
            offset.y / self.boundary_radius,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("boundary_radius", self.boundary_radius),
        ] {
            if !(value.is_finite() && value > 0.) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [("center_x", self.center_x), ("center_y", self.center_y)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}
