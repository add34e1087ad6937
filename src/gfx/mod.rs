mod paint;
pub(crate) mod palette;

use eframe::egui::{vec2, Pos2, Rect, Vec2};

use geodesic_sketchpad::{CanvasConfig, Pos};

pub(crate) use paint::{paint_session, paint_thumbnail};

/// Maps canvas coordinates onto a screen rectangle, keeping the aspect ratio
/// and centring the canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct View {
    unit: f32,
    offset: Vec2,
}
impl View {
    pub fn fit(rect: Rect, config: &CanvasConfig) -> Self {
        let (width, height) = (config.width as f32, config.height as f32);
        let unit = f32::min(rect.width() / width, rect.height() / height);
        let used = vec2(width, height) * unit;
        let offset = rect.min.to_vec2() + (rect.size() - used) / 2.;
        Self { unit, offset }
    }

    pub fn to_screen(&self, pos: Pos) -> Pos2 {
        transform(to_pos2(pos), (self.unit, self.offset))
    }
    pub fn to_canvas(&self, pos: Pos2) -> Pos {
        from_pos2(inv_transform(pos, (self.unit, self.offset)))
    }
    /// A canvas length in screen points.
    pub fn scale(&self, len: f64) -> f32 {
        len as f32 * self.unit
    }
}

fn to_pos2(pos: Pos) -> Pos2 {
    Pos2::new(pos.x as f32, pos.y as f32)
}
fn from_pos2(pos: Pos2) -> Pos {
    Pos::new(pos.x as f64, pos.y as f64)
}

fn transform(pos: Pos2, transform: (f32, Vec2)) -> Pos2 {
    (pos.to_vec2() * transform.0).to_pos2() + transform.1
}
fn inv_transform(pos: Pos2, transform: (f32, Vec2)) -> Pos2 {
    ((pos - transform.1).to_vec2() / transform.0).to_pos2()
}
