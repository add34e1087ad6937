use std::time::Instant;

use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke};
use itertools::Itertools;

use geodesic_sketchpad::{
    animation::AnimationTarget,
    geom::{CircleShape, GeometryModel, GuideLine, LineShape},
    scene::CircleId,
    CanvasConfig, Curvature, Engine, Pos, Preview, Session,
};

use super::{palette, View};

/// Polyline resolution for curved geodesics and circles.
const CURVE_SEGMENTS: usize = 64;
const DASH: f32 = 6.;
const GAP: f32 = 6.;
const MIN_STEP: f32 = 0.01;
const POINT_RADIUS: f32 = 6.;
const SELECTION_RING: f32 = 10.;

pub(crate) fn paint_session(painter: &Painter, view: &View, session: &Session, now: Instant) {
    painter.rect_filled(painter.clip_rect(), 0., palette::BACKGROUND);
    let engine = session.engine();
    let scene = session.scene();
    let animations = session.animations();

    match engine.boundary() {
        Some(boundary) => {
            let outline = CircleShape::round(boundary.center, boundary.radius);
            let ring = outline.sample(CURVE_SEGMENTS);
            paint_polyline(painter, view, &ring, palette::BOUNDARY, 2., Some(0.));
        }
        None => {
            let config = engine.config();
            let rect = Rect::from_two_pos(
                view.to_screen(Pos::ORIGIN),
                view.to_screen(Pos::new(config.width, config.height)),
            );
            painter.rect_stroke(rect, 0., Stroke::new(1., palette::BOUNDARY));
        }
    }

    for guide in session.parallel_guides() {
        let shape = engine.line_shape(guide.p1, guide.p2);
        paint_line_shape(painter, view, &shape, palette::GUIDE, 1., Some(0.));
    }

    for line in scene.lines() {
        let dash = animations.dash_offset(AnimationTarget::Line(line.id), now);
        let shape = session.line_shape(line);
        paint_line_shape(painter, view, &shape, palette::line_color(line.id), 2., dash);
    }

    for circle in scene.circles() {
        let Some(shape) = session.circle_shape(circle) else {
            continue;
        };
        let width = if circle.animating { 3. } else { 2. };
        let col = palette::circle_color(circle.id);
        paint_polyline(painter, view, &shape.sample(CURVE_SEGMENTS), col, width, None);
    }

    match session.preview() {
        Some(Preview::Line(shape)) => {
            let col = palette::GEODESIC.gamma_multiply(0.5);
            paint_line_shape(painter, view, &shape, col, 2., None);
        }
        Some(Preview::Circle(shape)) => {
            let col = palette::circle_color(CircleId(0)).gamma_multiply(0.5);
            paint_polyline(painter, view, &shape.sample(CURVE_SEGMENTS), col, 2., None);
        }
        None => {}
    }

    for point in scene.points() {
        let center = view.to_screen(point.pos);
        let pulse = animations.pulse_scale(AnimationTarget::Point(point.id), now) as f32;
        let col = if point.selected { palette::SELECTED } else { palette::POINT };
        painter.circle_filled(center, POINT_RADIUS * pulse, col);
        if point.selected {
            painter.circle_stroke(center, SELECTION_RING, Stroke::new(2., palette::SELECTED));
        }
    }
}

/// A small picture of how parallels behave in `curvature`.
pub(crate) fn paint_thumbnail(painter: &Painter, rect: Rect, curvature: Curvature) {
    painter.rect_filled(rect, 4., palette::PANEL);
    let config = CanvasConfig::new(200., 200., 80.);
    let view = View::fit(rect, &config);
    let engine = Engine::new(curvature, config);
    let c = config.center();

    if let Some(boundary) = engine.boundary() {
        let outline = CircleShape::round(boundary.center, boundary.radius);
        let ring = outline.sample(CURVE_SEGMENTS);
        paint_polyline(painter, &view, &ring, palette::BOUNDARY, 1., None);
    }

    let base = GuideLine::new(c + Pos::new(-50., 30.), c + Pos::new(50., 30.));
    let through = c + Pos::new(0., -25.);
    let mut lines = vec![base];
    lines.extend(engine.parallel_lines(base, through));
    if lines.len() == 1 {
        // Nothing parallel on the sphere: show a second great circle meeting the first.
        lines.push(GuideLine::new(c + Pos::new(-40., -45.), c + Pos::new(35., 55.)));
    }
    for guide in lines {
        let shape = engine.line_shape(guide.p1, guide.p2);
        paint_line_shape(painter, &view, &shape, palette::GEODESIC, 2., None);
    }
    painter.circle_filled(view.to_screen(through), 3., palette::SELECTED);
}

fn paint_line_shape(
    painter: &Painter,
    view: &View,
    shape: &LineShape,
    col: Color32,
    width: f32,
    dash: Option<f64>,
) {
    paint_polyline(painter, view, &shape.sample(CURVE_SEGMENTS), col, width, dash);
}

fn paint_polyline(
    painter: &Painter,
    view: &View,
    points: &[Pos],
    col: Color32,
    width: f32,
    dash: Option<f64>,
) {
    if points.len() < 2 {
        return;
    }
    let screen: Vec<Pos2> = points.iter().map(|&p| view.to_screen(p)).collect();
    let stroke = Stroke::new(width, col);
    match dash {
        Some(offset) => paint_dashed(painter, &screen, stroke, view.scale(offset)),
        None => {
            painter.add(Shape::line(screen, stroke));
        }
    }
}

/// Walks the polyline, drawing `DASH`-long pieces separated by `GAP`, with the
/// pattern shifted by `offset`. Steps never drop below `MIN_STEP`.
fn paint_dashed(painter: &Painter, points: &[Pos2], stroke: Stroke, offset: f32) {
    let period = DASH + GAP;
    let mut phase = offset.rem_euclid(period);
    for (a, b) in points.iter().copied().tuple_windows() {
        let len = a.distance(b);
        let mut travelled = 0.;
        while len - travelled > MIN_STEP {
            let in_dash = phase < DASH;
            let left = if in_dash { DASH - phase } else { period - phase };
            let step = left.max(MIN_STEP).min(len - travelled);
            if in_dash {
                painter.line_segment(
                    [a.lerp(b, travelled / len), a.lerp(b, (travelled + step) / len)],
                    stroke,
                );
            }
            travelled += step;
            phase = (phase + step) % period;
        }
    }
}
