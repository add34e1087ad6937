//! Short-lived highlight animations for freshly built objects.
//!
//! Entries only feed presentation values; expiring one clears the object's
//! `animating` flag and nothing else.

use std::time::{Duration, Instant};

use crate::scene::{CircleId, LineId, PointId, Scene};

/// How far a dash pattern travels over a line animation, in plane units.
const DASH_TRAVEL: f64 = 40.;
/// Extra size of a point at the peak of its pulse.
const PULSE_AMPLITUDE: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    Point(PointId),
    Line(LineId),
    Circle(CircleId),
}
impl AnimationTarget {
    pub fn duration(self) -> Duration {
        match self {
            AnimationTarget::Point(_) => Duration::from_millis(300),
            AnimationTarget::Line(_) => Duration::from_millis(800),
            AnimationTarget::Circle(_) => Duration::from_millis(600),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Animation {
    pub target: AnimationTarget,
    pub started: Instant,
    pub duration: Duration,
}
impl Animation {
    /// Fraction of the animation elapsed at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.)
    }
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

#[derive(Debug, Default, Clone)]
pub struct AnimationQueue {
    entries: Vec<Animation>,
}
impl AnimationQueue {
    pub fn start(&mut self, target: AnimationTarget, now: Instant) {
        self.entries.retain(|a| a.target != target);
        self.entries.push(Animation {
            target,
            started: now,
            duration: target.duration(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops finished entries and clears their objects' `animating` flags.
    /// Returns how many expired.
    pub fn tick(&mut self, now: Instant, scene: &mut Scene) -> usize {
        let before = self.entries.len();
        self.entries.retain(|a| {
            if !a.is_finished(now) {
                return true;
            }
            match a.target {
                AnimationTarget::Point(id) => {
                    if let Some(p) = scene.point_mut(id) {
                        p.animating = false;
                    }
                }
                AnimationTarget::Line(id) => scene.set_line_animating(id, false),
                AnimationTarget::Circle(id) => scene.set_circle_animating(id, false),
            }
            false
        });
        before - self.entries.len()
    }

    /// Drops entries whose objects are gone.
    pub fn forget_missing(&mut self, scene: &Scene) {
        self.entries.retain(|a| match a.target {
            AnimationTarget::Point(id) => scene.point(id).is_some(),
            AnimationTarget::Line(id) => scene.line(id).is_some(),
            AnimationTarget::Circle(id) => scene.circle(id).is_some(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn progress(&self, target: AnimationTarget, now: Instant) -> Option<f64> {
        self.entries
            .iter()
            .find(|a| a.target == target)
            .map(|a| a.progress(now))
    }

    /// Size multiplier for a point: swells and settles back to 1.
    pub fn pulse_scale(&self, target: AnimationTarget, now: Instant) -> f64 {
        self.progress(target, now)
            .map_or(1., |t| 1. + PULSE_AMPLITUDE * (std::f64::consts::PI * t).sin())
    }

    /// Dash offset for a line being drawn in; `None` once it is solid.
    pub fn dash_offset(&self, target: AnimationTarget, now: Instant) -> Option<f64> {
        self.progress(target, now).map(|t| (1. - t) * DASH_TRAVEL)
    }
}
