//! Committed points, lines and circles.
//!
//! Points live in an id-ordered table; lines and circles refer to them by
//! [`PointId`] only. Removing a point always removes everything built on it.

use std::fmt;

use bitvec::vec::BitVec;

use crate::geom::Pos;

macro_rules! object_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u64);
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}
object_id!(PointId, "point");
object_id!(LineId, "line");
object_id!(CircleId, "circle");

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub pos: Pos,
    pub selected: bool,
    pub animating: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub point1: PointId,
    pub point2: PointId,
    pub animating: bool,
}
impl Line {
    pub fn uses(&self, point: PointId) -> bool {
        self.point1 == point || self.point2 == point
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub id: CircleId,
    pub center: PointId,
    /// Distance under the geometry that was active when it was drawn.
    pub radius: f64,
    pub animating: bool,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SceneCounts {
    pub points: usize,
    pub lines: usize,
    pub circles: usize,
}
impl fmt::Display for SceneCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Points: {} | Lines: {} | Circles: {}",
            self.points, self.lines, self.circles
        )
    }
}

/// What a removal took with it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pruned {
    pub points: Vec<PointId>,
    pub lines: Vec<LineId>,
    pub circles: Vec<CircleId>,
}
impl Pruned {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.circles.is_empty()
    }
}

/// Points picked by an unfinished construction, in click order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    points: Vec<PointId>,
}
impl Selection {
    pub const MAX: usize = 2;

    /// Appends `id` unless the selection is full or already holds it.
    pub fn push(&mut self, id: PointId) -> bool {
        if self.points.len() >= Self::MAX || self.contains(id) {
            return false;
        }
        self.points.push(id);
        true
    }
    pub fn remove(&mut self, id: PointId) -> bool {
        let before = self.points.len();
        self.points.retain(|&p| p != id);
        self.points.len() != before
    }
    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains(&id)
    }
    pub fn first(&self) -> Option<PointId> {
        self.points.first().copied()
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn as_slice(&self) -> &[PointId] {
        &self.points
    }
    /// Empties the selection, handing back what it held.
    pub fn take(&mut self) -> Vec<PointId> {
        std::mem::take(&mut self.points)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Scene {
    points: Vec<Point>,
    lines: Vec<Line>,
    circles: Vec<Circle>,
    next_point: u64,
    next_line: u64,
    next_circle: u64,
}
impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }
    pub fn counts(&self) -> SceneCounts {
        SceneCounts {
            points: self.points.len(),
            lines: self.lines.len(),
            circles: self.circles.len(),
        }
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        find_point(&self.points, id).map(|i| &self.points[i])
    }
    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        find_point(&self.points, id).map(move |i| &mut self.points[i])
    }
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }
    pub fn circle(&self, id: CircleId) -> Option<&Circle> {
        self.circles.iter().find(|c| c.id == id)
    }
    /// Both endpoint positions of a line.
    pub fn endpoints(&self, line: &Line) -> Option<(Pos, Pos)> {
        Some((self.point(line.point1)?.pos, self.point(line.point2)?.pos))
    }

    pub fn add_point(&mut self, pos: Pos) -> PointId {
        let id = PointId(self.next_point);
        self.next_point += 1;
        self.points.push(Point {
            id,
            pos,
            selected: false,
            animating: true,
        });
        id
    }

    /// Returns `None` if either endpoint is not in the scene.
    pub fn add_line(&mut self, point1: PointId, point2: PointId) -> Option<LineId> {
        find_point(&self.points, point1)?;
        find_point(&self.points, point2)?;
        let id = LineId(self.next_line);
        self.next_line += 1;
        self.lines.push(Line {
            id,
            point1,
            point2,
            animating: true,
        });
        Some(id)
    }

    /// Returns `None` if the centre is not in the scene.
    pub fn add_circle(&mut self, center: PointId, radius: f64) -> Option<CircleId> {
        find_point(&self.points, center)?;
        let id = CircleId(self.next_circle);
        self.next_circle += 1;
        self.circles.push(Circle {
            id,
            center,
            radius,
            animating: true,
        });
        Some(id)
    }

    pub fn set_selected(&mut self, id: PointId, selected: bool) {
        if let Some(point) = self.point_mut(id) {
            point.selected = selected;
        }
    }

    /// Nearest point within `radius` of `pos`. Ties go to the oldest point.
    pub fn hit_test(&self, pos: Pos, radius: f64) -> Option<PointId> {
        self.points
            .iter()
            .map(|p| (p.id, p.pos.dist(&pos)))
            .filter(|&(_, d)| d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Removes a point together with every line and circle that uses it.
    pub fn remove_point(&mut self, id: PointId) -> Pruned {
        self.retain_points(|p| p.id != id)
    }

    /// Keeps the points matching `keep`, dropping dependants of the rest.
    pub fn retain_points(&mut self, mut keep: impl FnMut(&Point) -> bool) -> Pruned {
        let mask: BitVec = self.points.iter().map(&mut keep).collect();
        if mask.all() {
            return Pruned::default();
        }
        let dropped: Vec<PointId> = self
            .points
            .iter()
            .zip(mask.iter().by_vals())
            .filter(|&(_, kept)| !kept)
            .map(|(p, _)| p.id)
            .collect();
        let mut index = 0;
        self.points.retain(|_| {
            let kept = mask[index];
            index += 1;
            kept
        });

        let points = &self.points;
        let mut lines = vec![];
        self.lines.retain(|l| {
            let alive =
                find_point(points, l.point1).is_some() && find_point(points, l.point2).is_some();
            if !alive {
                lines.push(l.id);
            }
            alive
        });
        let mut circles = vec![];
        self.circles.retain(|c| {
            let alive = find_point(points, c.center).is_some();
            if !alive {
                circles.push(c.id);
            }
            alive
        });
        Pruned {
            points: dropped,
            lines,
            circles,
        }
    }

    pub fn set_line_animating(&mut self, id: LineId, animating: bool) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.animating = animating;
        }
    }
    pub fn set_circle_animating(&mut self, id: CircleId, animating: bool) {
        if let Some(circle) = self.circles.iter_mut().find(|c| c.id == id) {
            circle.animating = animating;
        }
    }

    /// Empties every collection. Ids keep counting up.
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.circles.clear();
    }
}

/// Points are stored in id order, so lookups can bisect.
fn find_point(points: &[Point], id: PointId) -> Option<usize> {
    points.binary_search_by_key(&id, |p| p.id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Scene, [PointId; 3]) {
        let mut scene = Scene::new();
        let a = scene.add_point(Pos::new(10., 10.));
        let b = scene.add_point(Pos::new(50., 10.));
        let c = scene.add_point(Pos::new(30., 40.));
        (scene, [a, b, c])
    }

    #[test]
    fn ids_are_never_reused() {
        let (mut scene, [a, _, c]) = triangle();
        scene.clear();
        let d = scene.add_point(Pos::new(1., 1.));
        assert!(d > c && d != a);
        assert_eq!(scene.counts().points, 1);
    }

    #[test]
    fn lines_need_existing_endpoints() {
        let (mut scene, [a, b, _]) = triangle();
        assert!(scene.add_line(a, b).is_some());
        assert!(scene.add_line(a, PointId(99)).is_none());
        assert!(scene.add_circle(PointId(99), 3.).is_none());
        assert_eq!(scene.counts().lines, 1);
    }

    #[test]
    fn removing_a_point_cascades() {
        let (mut scene, [a, b, c]) = triangle();
        let ab = scene.add_line(a, b).expect("line");
        let bc = scene.add_line(b, c).expect("line");
        let around_a = scene.add_circle(a, 5.).expect("circle");
        let around_c = scene.add_circle(c, 5.).expect("circle");

        let pruned = scene.remove_point(a);
        assert_eq!(pruned.points, vec![a]);
        assert_eq!(pruned.lines, vec![ab]);
        assert_eq!(pruned.circles, vec![around_a]);
        assert!(scene.line(bc).is_some());
        assert!(scene.circle(around_c).is_some());
        assert!(scene
            .lines()
            .iter()
            .all(|l| scene.point(l.point1).is_some() && scene.point(l.point2).is_some()));
    }

    #[test]
    fn retaining_everything_prunes_nothing() {
        let (mut scene, _) = triangle();
        assert!(scene.retain_points(|_| true).is_empty());
        assert_eq!(scene.counts().points, 3);
    }

    #[test]
    fn lookups_survive_removals() {
        let (mut scene, [a, b, c]) = triangle();
        scene.remove_point(b);
        assert_eq!(scene.point(a).map(|p| p.pos), Some(Pos::new(10., 10.)));
        assert_eq!(scene.point(c).map(|p| p.pos), Some(Pos::new(30., 40.)));
        assert!(scene.point(b).is_none());
    }

    #[test]
    fn hit_test_prefers_nearest_then_oldest() {
        let mut scene = Scene::new();
        let first = scene.add_point(Pos::new(100., 100.));
        let second = scene.add_point(Pos::new(110., 100.));
        let third = scene.add_point(Pos::new(120., 100.));
        assert_eq!(scene.hit_test(Pos::new(108., 100.), 15.), Some(second));
        assert_eq!(scene.hit_test(Pos::new(105., 100.), 15.), Some(first));
        assert_eq!(scene.hit_test(Pos::new(121., 100.), 15.), Some(third));
        assert_eq!(scene.hit_test(Pos::new(200., 200.), 15.), None);
    }

    #[test]
    fn selection_holds_at_most_two_distinct_points() {
        let mut selection = Selection::default();
        assert!(selection.push(PointId(1)));
        assert!(!selection.push(PointId(1)));
        assert!(selection.push(PointId(2)));
        assert!(!selection.push(PointId(3)));
        assert_eq!(selection.as_slice(), &[PointId(1), PointId(2)]);
        assert!(selection.remove(PointId(1)));
        assert_eq!(selection.take(), vec![PointId(2)]);
        assert!(selection.is_empty());
    }
}
