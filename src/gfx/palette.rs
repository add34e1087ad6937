use eframe::egui::Color32;

use geodesic_sketchpad::scene::{CircleId, LineId};

pub const BACKGROUND: Color32 = Color32::from_rgb(0x1a, 0x1a, 0x1a);
pub const PANEL: Color32 = Color32::from_rgb(0x2a, 0x2a, 0x2a);
pub const BOUNDARY: Color32 = Color32::from_gray(0x44);
pub const GUIDE: Color32 = Color32::from_gray(0x88);
pub const POINT: Color32 = Color32::WHITE;
pub const SELECTED: Color32 = Color32::from_rgb(0xff, 0xff, 0x00);
pub const GEODESIC: Color32 = Color32::from_rgb(0x00, 0xff, 0x88);

fn from_colorous(col: colorous::Color) -> Color32 {
    Color32::from_rgb(col.r, col.g, col.b)
}

/// Each line gets its own hue so crossings stay readable.
pub fn line_color(id: LineId) -> Color32 {
    from_colorous(colorous::SINEBOW.eval_rational((id.0 % 20) as usize, 21))
}

pub fn circle_color(id: CircleId) -> Color32 {
    from_colorous(colorous::WARM.eval_rational((id.0 % 8) as usize + 2, 12))
}
