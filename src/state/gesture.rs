// Per-key drag state machine. Owned by the store, one per tracked node.
use crate::model::{DragEvent, DragPhase, DragResult, Point};

#[derive(Debug, Clone, Default)]
pub struct TrackedGesture {
    pub dragging: bool,
    pub last_position: Option<Point>,
    /// Deltas folded since the last published frame.
    pub pending: Point,
    /// Deltas folded since the gesture's start event.
    pub total: Point,
    pub dirty: bool,
    /// An ended gesture was published and reverts to empty on the next frame.
    settling: bool,
    published: DragResult,
}

impl TrackedGesture {
    /// Folds one normalised event into the state. Returns false when the
    /// event was dropped (move or end without a preceding start).
    pub fn apply(&mut self, event: &DragEvent) -> bool {
        match event.phase {
            DragPhase::Start => {
                self.dragging = true;
                self.last_position = Some(event.position);
                self.pending = Point::ZERO;
                self.total = Point::ZERO;
            }
            DragPhase::Move => {
                if !self.fold(event.position) {
                    return false;
                }
            }
            DragPhase::End => {
                if !self.fold(event.position) {
                    return false;
                }
                self.dragging = false;
                self.last_position = None;
            }
        }
        self.dirty = true;
        true
    }

    fn fold(&mut self, position: Point) -> bool {
        let last = match (self.dragging, self.last_position) {
            (true, Some(last)) => last,
            _ => return false,
        };
        let d = position - last;
        self.pending += d;
        self.total += d;
        self.last_position = Some(position);
        true
    }

    /// Moves the folded state into the readable snapshot at a frame boundary.
    /// Returns whether anything changed since the previous frame. The frame
    /// after an ended gesture was published clears the snapshot back to empty
    /// without counting as a change.
    pub fn publish(&mut self) -> bool {
        let changed = self.dirty;
        if changed {
            self.published = DragResult {
                delta: self.pending,
                total: self.total,
                is_dragging: self.dragging,
            };
            self.settling = !self.dragging;
        } else if self.settling {
            self.published = DragResult::EMPTY;
            self.total = Point::ZERO;
            self.settling = false;
        } else {
            self.published.delta = Point::ZERO;
        }
        self.pending = Point::ZERO;
        self.dirty = false;
        changed
    }

    /// Whether the next frame still has to clear an ended gesture.
    pub fn is_settling(&self) -> bool {
        self.settling
    }

    pub fn snapshot(&self) -> DragResult {
        self.published
    }
}
