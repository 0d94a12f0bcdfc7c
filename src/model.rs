//! Value types shared by the drag store, the event binder and the views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::rc::Rc;

/// A position or displacement in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Snapshot of one tracked node, as seen by a view during render.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragResult {
    /// Movement folded into the most recently published frame.
    pub delta: Point,
    /// Movement since the gesture's start event.
    pub total: Point,
    pub is_dragging: bool,
}

impl DragResult {
    pub const EMPTY: DragResult = DragResult {
        delta: Point::ZERO,
        total: Point::ZERO,
        is_dragging: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for DragResult {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Identifies the rendered node a drag result belongs to.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(Rc<str>);

impl NodeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey(Rc::from(s))
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        NodeKey(Rc::from(s))
    }
}

impl fmt::Debug for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKey({:?})", &*self.0)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Start,
    Move,
    End,
}

/// Which kind of native event produced a [`DragEvent`]. Kept for logging only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// Mouse and touch input normalised into one shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
    pub phase: DragPhase,
    pub source: InputSource,
    pub position: Point,
}

impl DragEvent {
    pub fn mouse(phase: DragPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            source: InputSource::Mouse,
            position: Point::new(x, y),
        }
    }

    pub fn touch(phase: DragPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            source: InputSource::Touch,
            position: Point::new(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_default() {
        assert_eq!(DragResult::default(), DragResult::EMPTY);
        assert!(DragResult::EMPTY.is_empty());
        let moved = DragResult {
            delta: Point::new(1.0, 0.0),
            ..DragResult::EMPTY
        };
        assert!(!moved.is_empty());
    }

    #[test]
    fn keys_compare_by_content() {
        let a = NodeKey::from("root");
        let b = NodeKey::from(String::from("root"));
        assert_eq!(a, b);
        assert_ne!(a, NodeKey::from("child"));
        assert_eq!(a.to_string(), "root");
    }

    #[test]
    fn point_arithmetic() {
        let mut p = Point::new(110.0, 55.0) - Point::new(100.0, 50.0);
        assert_eq!(p, Point::new(10.0, 5.0));
        p += Point::new(-15.0, -15.0);
        assert_eq!(p + Point::ZERO, Point::new(-5.0, -10.0));
    }
}
