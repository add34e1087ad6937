//! The session controller: the one place the UI and renderer read from and
//! send commands to.

use std::time::Instant;

use tracing::{info, warn};

use crate::{
    animation::{AnimationQueue, AnimationTarget},
    config::Settings,
    error::PlacementError,
    geom::{CanvasConfig, CircleShape, Curvature, Engine, GeometryModel, GuideLine, LineShape, Pos},
    interaction::{ClickOutcome, Interaction, Tool},
    scene::{Circle, Line, PointId, Pruned, Scene, SceneCounts},
};

/// A construction shown before it is committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview {
    Line(LineShape),
    Circle(CircleShape),
}

#[derive(Debug, Clone)]
pub struct Session {
    engine: Engine,
    scene: Scene,
    interaction: Interaction,
    animations: AnimationQueue,
}
impl Session {
    pub fn new(curvature: Curvature, config: CanvasConfig, hit_radius: f64) -> Self {
        Self {
            engine: Engine::new(curvature, config),
            scene: Scene::new(),
            interaction: Interaction::new(hit_radius),
            animations: AnimationQueue::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.geometry, settings.canvas, settings.hit_radius)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
    pub fn config(&self) -> &CanvasConfig {
        self.engine.config()
    }
    pub fn curvature(&self) -> Curvature {
        self.engine.curvature()
    }
    pub fn tool(&self) -> Tool {
        self.interaction.tool()
    }
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
    pub fn selection(&self) -> &[PointId] {
        self.interaction.selection()
    }
    pub fn dragged(&self) -> Option<PointId> {
        self.interaction.dragged()
    }
    pub fn pointer(&self) -> Option<Pos> {
        self.interaction.pointer()
    }
    pub fn animations(&self) -> &AnimationQueue {
        &self.animations
    }
    pub fn counts(&self) -> SceneCounts {
        self.scene.counts()
    }

    /// Swaps the active geometry and drops every object the new one cannot
    /// hold.
    pub fn set_geometry(&mut self, curvature: Curvature) -> Pruned {
        let config = *self.engine.config();
        self.engine = Engine::new(curvature, config);
        let engine = &self.engine;
        let pruned = self
            .scene
            .retain_points(|p| engine.is_point_in_bounds(p.pos));
        self.interaction.forget_missing(&self.scene);
        self.animations.forget_missing(&self.scene);
        info!(
            geometry = %curvature,
            dropped_points = pruned.points.len(),
            dropped_lines = pruned.lines.len(),
            dropped_circles = pruned.circles.len(),
            "switched geometry"
        );
        pruned
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.interaction.set_tool(tool, &mut self.scene);
        info!(%tool, "switched tool");
    }

    pub fn click(&mut self, pos: Pos, now: Instant) -> Result<ClickOutcome, PlacementError> {
        let outcome = self
            .interaction
            .click(pos, &mut self.scene, &self.engine)
            .inspect_err(|err| warn!("{err}"))?;
        match outcome {
            ClickOutcome::PointAdded(id) => self.animations.start(AnimationTarget::Point(id), now),
            ClickOutcome::LineAdded(id) => self.animations.start(AnimationTarget::Line(id), now),
            ClickOutcome::CircleAdded(id) => {
                self.animations.start(AnimationTarget::Circle(id), now)
            }
            ClickOutcome::Cleared => self.animations.clear(),
            _ => {}
        }
        Ok(outcome)
    }

    pub fn pointer_move(&mut self, pos: Pos) -> Option<PointId> {
        self.interaction
            .pointer_move(pos, &mut self.scene, &self.engine)
    }
    pub fn pointer_release(&mut self) {
        self.interaction.pointer_release();
    }
    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    /// Expires finished animations. Returns whether any are still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.animations.tick(now, &mut self.scene);
        !self.animations.is_empty()
    }

    /// Removes a point and everything built on it.
    pub fn remove_point(&mut self, id: PointId) -> Pruned {
        let pruned = self.scene.remove_point(id);
        self.interaction.forget_missing(&self.scene);
        self.animations.forget_missing(&self.scene);
        pruned
    }

    /// How a committed line should be drawn right now.
    pub fn line_shape(&self, line: &Line) -> LineShape {
        match self.scene.endpoints(line) {
            Some((p1, p2)) => self.engine.line_shape(p1, p2),
            None => LineShape::Degenerate,
        }
    }

    pub fn circle_shape(&self, circle: &Circle) -> Option<CircleShape> {
        let center = self.scene.point(circle.center)?;
        Some(self.engine.circle_shape(center.pos, circle.radius))
    }

    /// The construction the pointer would complete, if one is under way.
    pub fn preview(&self) -> Option<Preview> {
        let pointer = self.pointer()?;
        let anchor = self.scene.point(*self.selection().first()?)?.pos;
        match self.tool() {
            Tool::DrawLine => Some(Preview::Line(self.engine.line_shape(anchor, pointer))),
            Tool::DrawCircle => {
                let radius = self.engine.distance(anchor, pointer);
                Some(Preview::Circle(self.engine.circle_shape(anchor, radius)))
            }
            _ => None,
        }
    }

    /// Parallels to the newest line through the hovered location, shown while
    /// the move tool is idle.
    pub fn parallel_guides(&self) -> Vec<GuideLine> {
        if self.tool() != Tool::Move || self.dragged().is_some() {
            return vec![];
        }
        let (Some(pointer), Some(line)) = (self.pointer(), self.scene.lines().last()) else {
            return vec![];
        };
        match self.scene.endpoints(line) {
            Some((p1, p2)) => self
                .engine
                .parallel_lines(GuideLine::new(p1, p2), pointer),
            None => vec![],
        }
    }

    pub fn geometry_label(&self) -> String {
        format!("Current: {} Geometry", self.curvature().name())
    }

    pub fn tool_label(&self) -> String {
        format!("Tool: {}", self.tool().label())
    }

    pub fn pointer_label(&self) -> String {
        match self.pointer() {
            Some(p) => format!("Mouse: ({}, {})", p.x.round(), p.y.round()),
            None => "Mouse: -".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn euclidean() -> Session {
        Session::new(Curvature::Euclidean, CanvasConfig::new(500., 500., 200.), 15.)
    }

    #[test]
    fn new_objects_animate_until_their_time_is_up() {
        let mut s = euclidean();
        let t0 = Instant::now();
        let ClickOutcome::PointAdded(id) = s.click(Pos::new(100., 100.), t0).unwrap() else {
            panic!("expected a point");
        };
        assert!(s.tick(t0 + Duration::from_millis(100)));
        assert!(s.scene().point(id).unwrap().animating);
        assert!(!s.tick(t0 + Duration::from_millis(300)));
        assert!(!s.scene().point(id).unwrap().animating);
    }

    #[test]
    fn rejected_points_leave_the_scene_alone() {
        let mut s = Session::new(Curvature::Hyperbolic, CanvasConfig::new(500., 500., 200.), 15.);
        let err = s.click(Pos::new(5., 5.), Instant::now()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "point (5, 5) is out of bounds for Hyperbolic geometry"
        );
        assert_eq!(s.counts(), SceneCounts::default());
        assert!(s.animations().is_empty());
    }

    #[test]
    fn previews_follow_the_pointer() {
        let mut s = euclidean();
        let now = Instant::now();
        s.click(Pos::new(100., 100.), now).unwrap();
        s.set_tool(Tool::DrawCircle);
        assert_eq!(s.preview(), None);
        s.click(Pos::new(100., 100.), now).unwrap();
        s.pointer_move(Pos::new(130., 140.));
        assert_eq!(
            s.preview(),
            Some(Preview::Circle(CircleShape::round(Pos::new(100., 100.), 50.)))
        );
        s.set_tool(Tool::DrawLine);
        assert_eq!(s.preview(), None);
    }

    #[test]
    fn parallel_guides_need_a_line_and_the_move_tool() {
        let mut s = euclidean();
        let now = Instant::now();
        s.click(Pos::new(100., 100.), now).unwrap();
        s.click(Pos::new(200., 100.), now).unwrap();
        s.set_tool(Tool::Move);
        s.pointer_move(Pos::new(300., 300.));
        assert!(s.parallel_guides().is_empty());

        s.set_tool(Tool::DrawLine);
        s.click(Pos::new(100., 100.), now).unwrap();
        s.click(Pos::new(200., 100.), now).unwrap();
        s.set_tool(Tool::Move);
        s.pointer_move(Pos::new(300., 300.));
        assert_eq!(
            s.parallel_guides(),
            vec![GuideLine::new(Pos::new(300., 300.), Pos::new(400., 300.))]
        );
    }

    #[test]
    fn removing_a_point_takes_its_lines_and_selection() {
        let mut s = euclidean();
        let now = Instant::now();
        s.click(Pos::new(100., 100.), now).unwrap();
        s.click(Pos::new(200., 100.), now).unwrap();
        s.click(Pos::new(300., 100.), now).unwrap();
        s.set_tool(Tool::DrawLine);
        s.click(Pos::new(100., 100.), now).unwrap();
        s.click(Pos::new(200., 100.), now).unwrap();
        s.click(Pos::new(300., 100.), now).unwrap();
        let third = s.selection()[0];

        let first = s.scene().points()[0].id;
        let pruned = s.remove_point(first);
        assert_eq!(pruned.lines.len(), 1);
        assert_eq!(s.counts().lines, 0);
        assert_eq!(s.selection(), &[third]);

        s.remove_point(third);
        assert!(s.selection().is_empty());
    }

    #[test]
    fn labels_describe_the_session() {
        let mut s = euclidean();
        assert_eq!(s.geometry_label(), "Current: Euclidean Geometry");
        assert_eq!(s.tool_label(), "Tool: Add Point");
        assert_eq!(s.pointer_label(), "Mouse: -");
        s.pointer_move(Pos::new(10.4, 99.6));
        assert_eq!(s.pointer_label(), "Mouse: (10, 100)");
    }
}
