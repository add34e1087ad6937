//! Turns pointer input into scene edits under the active tool.

use std::fmt;

use tracing::debug;

use crate::{
    error::PlacementError,
    geom::{Engine, GeometryModel, Pos},
    scene::{CircleId, LineId, PointId, Scene, Selection},
};

/// Default pick radius around a point, in plane units.
pub const DEFAULT_HIT_RADIUS: f64 = 15.;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tool {
    #[default]
    AddPoint,
    DrawLine,
    DrawCircle,
    Move,
    Clear,
}
impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::AddPoint,
        Tool::DrawLine,
        Tool::DrawCircle,
        Tool::Move,
        Tool::Clear,
    ];

    /// The identifier the UI layer uses for this tool.
    pub fn key(self) -> &'static str {
        match self {
            Tool::AddPoint => "add_point",
            Tool::DrawLine => "draw_line",
            Tool::DrawCircle => "draw_circle",
            Tool::Move => "move",
            Tool::Clear => "clear",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::AddPoint => "Add Point",
            Tool::DrawLine => "Draw Line",
            Tool::DrawCircle => "Draw Circle",
            Tool::Move => "Move",
            Tool::Clear => "Clear",
        }
    }
}
impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What a click did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    PointAdded(PointId),
    Selected(PointId),
    Deselected(PointId),
    LineAdded(LineId),
    CircleAdded(CircleId),
    DragStarted(PointId),
    DragCancelled,
    Cleared,
    /// Nothing under the pointer.
    Missed,
}

/// Tool, in-progress selection and drag state.
#[derive(Debug, Clone)]
pub struct Interaction {
    tool: Tool,
    selection: Selection,
    dragged: Option<PointId>,
    pointer: Option<Pos>,
    hit_radius: f64,
}
impl Default for Interaction {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_RADIUS)
    }
}
impl Interaction {
    pub fn new(hit_radius: f64) -> Self {
        Self {
            tool: Tool::default(),
            selection: Default::default(),
            dragged: None,
            pointer: None,
            hit_radius,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }
    pub fn selection(&self) -> &[PointId] {
        self.selection.as_slice()
    }
    pub fn dragged(&self) -> Option<PointId> {
        self.dragged
    }
    pub fn pointer(&self) -> Option<Pos> {
        self.pointer
    }
    pub fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    /// Switches tool, dropping any half-built construction.
    pub fn set_tool(&mut self, tool: Tool, scene: &mut Scene) {
        self.reset(scene);
        self.tool = tool;
    }

    /// Deselects everything and ends any drag. Committed objects are untouched.
    pub fn reset(&mut self, scene: &mut Scene) {
        for id in self.selection.take() {
            scene.set_selected(id, false);
        }
        self.dragged = None;
    }

    /// Forgets points that are no longer in the scene.
    pub fn forget_missing(&mut self, scene: &Scene) {
        let stale: Vec<PointId> = self
            .selection
            .as_slice()
            .iter()
            .copied()
            .filter(|&id| scene.point(id).is_none())
            .collect();
        for id in stale {
            self.selection.remove(id);
        }
        if self.dragged.is_some_and(|id| scene.point(id).is_none()) {
            self.dragged = None;
        }
    }

    pub fn click(
        &mut self,
        pos: Pos,
        scene: &mut Scene,
        engine: &Engine,
    ) -> Result<ClickOutcome, PlacementError> {
        self.pointer = Some(pos);
        let outcome = match self.tool {
            Tool::AddPoint => {
                if !engine.is_point_in_bounds(pos) {
                    return Err(PlacementError::OutOfBounds {
                        x: pos.x,
                        y: pos.y,
                        curvature: engine.curvature(),
                    });
                }
                ClickOutcome::PointAdded(scene.add_point(pos))
            }
            Tool::DrawLine => self.click_line(pos, scene),
            Tool::DrawCircle => self.click_circle(pos, scene, engine),
            Tool::Move => match scene.hit_test(pos, self.hit_radius) {
                Some(id) => {
                    self.dragged = Some(id);
                    ClickOutcome::DragStarted(id)
                }
                None => {
                    self.dragged = None;
                    ClickOutcome::DragCancelled
                }
            },
            Tool::Clear => {
                scene.clear();
                self.selection.take();
                self.dragged = None;
                ClickOutcome::Cleared
            }
        };
        debug!(tool = %self.tool, ?outcome, x = pos.x, y = pos.y, "click");
        Ok(outcome)
    }

    fn click_line(&mut self, pos: Pos, scene: &mut Scene) -> ClickOutcome {
        let Some(id) = scene.hit_test(pos, self.hit_radius) else {
            return ClickOutcome::Missed;
        };
        if self.selection.remove(id) {
            scene.set_selected(id, false);
            return ClickOutcome::Deselected(id);
        }
        self.selection.push(id);
        scene.set_selected(id, true);
        if self.selection.len() < Selection::MAX {
            return ClickOutcome::Selected(id);
        }
        let picked = self.selection.take();
        for &p in &picked {
            scene.set_selected(p, false);
        }
        match scene.add_line(picked[0], picked[1]) {
            Some(line) => ClickOutcome::LineAdded(line),
            None => ClickOutcome::Missed,
        }
    }

    fn click_circle(&mut self, pos: Pos, scene: &mut Scene, engine: &Engine) -> ClickOutcome {
        let Some(id) = scene.hit_test(pos, self.hit_radius) else {
            return ClickOutcome::Missed;
        };
        let Some(center) = self.selection.first() else {
            self.selection.push(id);
            scene.set_selected(id, true);
            return ClickOutcome::Selected(id);
        };
        self.selection.take();
        scene.set_selected(center, false);
        let (Some(c), Some(edge)) = (scene.point(center), scene.point(id)) else {
            return ClickOutcome::Missed;
        };
        let radius = engine.distance(c.pos, edge.pos);
        match scene.add_circle(center, radius) {
            Some(circle) => ClickOutcome::CircleAdded(circle),
            None => ClickOutcome::Missed,
        }
    }

    /// Tracks the pointer and drags the grabbed point along with it. Returns
    /// the point that moved, if any.
    pub fn pointer_move(
        &mut self,
        pos: Pos,
        scene: &mut Scene,
        engine: &Engine,
    ) -> Option<PointId> {
        self.pointer = Some(pos);
        let id = self.dragged?;
        let point = scene.point_mut(id)?;
        let delta = pos - point.pos;
        point.pos = engine.move_point(point.pos, delta.x, delta.y);
        Some(id)
    }

    pub fn pointer_release(&mut self) {
        self.dragged = None;
    }

    pub fn pointer_leave(&mut self) {
        self.dragged = None;
        self.pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{CanvasConfig, Curvature};

    fn setup(tool: Tool) -> (Interaction, Scene, Engine) {
        let mut interaction = Interaction::default();
        let mut scene = Scene::new();
        interaction.set_tool(tool, &mut scene);
        let engine = Engine::new(Curvature::Euclidean, CanvasConfig::new(500., 500., 200.));
        (interaction, scene, engine)
    }

    #[test]
    fn add_point_rejects_out_of_bounds() {
        let (mut ix, mut scene, engine) = setup(Tool::AddPoint);
        let err = ix.click(Pos::new(600., 10.), &mut scene, &engine).unwrap_err();
        assert!(matches!(err, PlacementError::OutOfBounds { .. }));
        assert_eq!(scene.counts().points, 0);
        let ok = ix.click(Pos::new(100., 100.), &mut scene, &engine).unwrap();
        assert!(matches!(ok, ClickOutcome::PointAdded(_)));
        assert!(scene.points()[0].animating);
    }

    #[test]
    fn clicking_a_selected_point_deselects_it() {
        let (mut ix, mut scene, engine) = setup(Tool::DrawLine);
        let a = scene.add_point(Pos::new(100., 100.));
        assert_eq!(
            ix.click(Pos::new(101., 99.), &mut scene, &engine),
            Ok(ClickOutcome::Selected(a))
        );
        assert!(scene.point(a).unwrap().selected);
        assert_eq!(
            ix.click(Pos::new(100., 100.), &mut scene, &engine),
            Ok(ClickOutcome::Deselected(a))
        );
        assert!(!scene.point(a).unwrap().selected);
        assert!(ix.selection().is_empty());
        assert_eq!(scene.counts().lines, 0);
    }

    #[test]
    fn missing_every_point_changes_nothing() {
        let (mut ix, mut scene, engine) = setup(Tool::DrawLine);
        scene.add_point(Pos::new(100., 100.));
        assert_eq!(ix.click(Pos::new(300., 300.), &mut scene, &engine), Ok(ClickOutcome::Missed));
        assert!(ix.selection().is_empty());
    }

    #[test]
    fn dragging_follows_the_pointer_until_release() {
        let (mut ix, mut scene, engine) = setup(Tool::Move);
        let a = scene.add_point(Pos::new(100., 100.));
        assert_eq!(
            ix.click(Pos::new(105., 100.), &mut scene, &engine),
            Ok(ClickOutcome::DragStarted(a))
        );
        assert_eq!(ix.pointer_move(Pos::new(200., 150.), &mut scene, &engine), Some(a));
        assert_eq!(scene.point(a).unwrap().pos, Pos::new(200., 150.));
        assert_eq!(ix.pointer_move(Pos::new(-50., 150.), &mut scene, &engine), Some(a));
        assert_eq!(scene.point(a).unwrap().pos, Pos::new(10., 150.));
        ix.pointer_release();
        assert_eq!(ix.pointer_move(Pos::new(300., 300.), &mut scene, &engine), None);
        assert_eq!(scene.point(a).unwrap().pos, Pos::new(10., 150.));
    }

    #[test]
    fn clicking_empty_space_cancels_a_drag() {
        let (mut ix, mut scene, engine) = setup(Tool::Move);
        scene.add_point(Pos::new(100., 100.));
        ix.click(Pos::new(100., 100.), &mut scene, &engine).unwrap();
        assert!(ix.dragged().is_some());
        assert_eq!(
            ix.click(Pos::new(400., 400.), &mut scene, &engine),
            Ok(ClickOutcome::DragCancelled)
        );
        assert!(ix.dragged().is_none());
    }

    #[test]
    fn leaving_the_surface_ends_a_drag() {
        let (mut ix, mut scene, engine) = setup(Tool::Move);
        scene.add_point(Pos::new(100., 100.));
        ix.click(Pos::new(100., 100.), &mut scene, &engine).unwrap();
        ix.pointer_leave();
        assert!(ix.dragged().is_none());
        assert!(ix.pointer().is_none());
    }

    #[test]
    fn switching_tools_clears_selection_only() {
        let (mut ix, mut scene, engine) = setup(Tool::DrawCircle);
        let a = scene.add_point(Pos::new(100., 100.));
        ix.click(Pos::new(100., 100.), &mut scene, &engine).unwrap();
        assert_eq!(ix.selection(), &[a]);
        ix.set_tool(Tool::DrawLine, &mut scene);
        assert!(ix.selection().is_empty());
        assert!(!scene.point(a).unwrap().selected);
        assert_eq!(scene.counts().points, 1);
    }
}
