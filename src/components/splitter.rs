use workbench_drag::{DragResult, Point};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Drags left/right, resizes a width.
    Horizontal,
    /// Drags up/down, resizes a height.
    Vertical,
}

/// Pane size driven by a splitter's drag result. Recomputes from the size at
/// gesture start plus the gesture total, so re-reading the same result during
/// extra renders does not move the pane again.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitState {
    pub size: f64,
    pub min: f64,
    pub max: f64,
    /// Positive when dragging toward larger coordinates grows the pane.
    pub sign: f64,
    size_at_start: f64,
    was_dragging: bool,
    last: DragResult,
}

impl SplitState {
    pub fn new(size: f64, min: f64, max: f64) -> Self {
        Self {
            size,
            min,
            max,
            sign: 1.0,
            size_at_start: size,
            was_dragging: false,
            last: DragResult::EMPTY,
        }
    }

    pub fn inverted(mut self) -> Self {
        self.sign = -1.0;
        self
    }

    pub fn apply(&mut self, result: DragResult, axis: Axis) {
        if result == self.last {
            return;
        }
        self.last = result;
        if result.is_dragging && !self.was_dragging {
            self.size_at_start = self.size;
        }
        // a press and release inside one frame shows up only as an ended result
        let ended_unseen = !result.is_dragging && !self.was_dragging && result.total != Point::ZERO;
        if ended_unseen {
            self.size_at_start = self.size;
        }
        if result.is_dragging || self.was_dragging || ended_unseen {
            let along = match axis {
                Axis::Horizontal => result.total.x,
                Axis::Vertical => result.total.y,
            };
            self.size = (self.size_at_start + self.sign * along).clamp(self.min, self.max);
        }
        self.was_dragging = result.is_dragging;
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SplitterProps {
    pub node_ref: NodeRef,
    pub axis: Axis,
    pub active: bool,
}

#[function_component(Splitter)]
pub fn splitter(props: &SplitterProps) -> Html {
    let (cursor, size) = match props.axis {
        Axis::Horizontal => ("col-resize", "width:6px; height:100%;"),
        Axis::Vertical => ("row-resize", "height:6px; width:100%;"),
    };
    let bg = if props.active { "#388bfd" } else { "#30363d" };
    let style = format!("{} cursor:{}; background:{}; flex:none; touch-action:none;", size, cursor, bg);
    html! { <div ref={props.node_ref.clone()} style={style}></div> }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragging(tx: f64, ty: f64) -> DragResult {
        DragResult {
            delta: Point::ZERO,
            total: Point::new(tx, ty),
            is_dragging: true,
        }
    }

    #[test]
    fn rereading_a_result_does_not_move_twice() {
        let mut s = SplitState::new(240.0, 120.0, 600.0);
        s.apply(dragging(0.0, 0.0), Axis::Horizontal);
        s.apply(dragging(30.0, 9.0), Axis::Horizontal);
        s.apply(dragging(30.0, 9.0), Axis::Horizontal);
        assert_eq!(s.size, 270.0);
        let ended = DragResult {
            is_dragging: false,
            ..dragging(40.0, 9.0)
        };
        s.apply(ended, Axis::Horizontal);
        s.apply(ended, Axis::Horizontal);
        assert_eq!(s.size, 280.0);
    }

    #[test]
    fn gesture_within_one_frame_is_applied_once() {
        let mut s = SplitState::new(240.0, 120.0, 600.0);
        let clicked = DragResult {
            delta: Point::new(25.0, 0.0),
            total: Point::new(25.0, 0.0),
            is_dragging: false,
        };
        s.apply(clicked, Axis::Horizontal);
        assert_eq!(s.size, 265.0);
        s.apply(clicked, Axis::Horizontal);
        assert_eq!(s.size, 265.0);
        s.apply(DragResult::EMPTY, Axis::Horizontal);
        assert_eq!(s.size, 265.0);
    }

    #[test]
    fn size_is_clamped_and_sign_is_honoured() {
        let mut s = SplitState::new(200.0, 80.0, 400.0).inverted();
        s.apply(dragging(0.0, -500.0), Axis::Vertical);
        assert_eq!(s.size, 400.0);
        s.apply(dragging(0.0, 500.0), Axis::Vertical);
        assert_eq!(s.size, 80.0);
    }

    #[test]
    fn next_gesture_starts_from_the_committed_size() {
        let mut s = SplitState::new(100.0, 0.0, 1000.0);
        s.apply(dragging(50.0, 0.0), Axis::Horizontal);
        s.apply(DragResult { is_dragging: false, ..dragging(50.0, 0.0) }, Axis::Horizontal);
        s.apply(dragging(-20.0, 0.0), Axis::Horizontal);
        assert_eq!(s.size, 130.0);
    }
}
