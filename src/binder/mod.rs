//! Event binding: attaches native listeners to a node and turns mouse and
//! touch events into [`DragEvent`]s.

mod web;

pub use web::WebBinding;

use std::rc::Rc;

use crate::config::DragConfig;
use crate::error::DragError;
use crate::model::{DragEvent, DragPhase};

/// Receives normalised events from a binding. Returns true when the event
/// changed drag state; dropped events return false.
pub type EventSink = Rc<dyn Fn(DragEvent) -> bool>;

pub const MOUSE_EVENTS: [&str; 3] = ["mousedown", "mousemove", "mouseup"];
pub const TOUCH_EVENTS: [&str; 4] = ["touchstart", "touchmove", "touchend", "touchcancel"];

/// Listeners added by one [`DragNode::bind`] call.
pub trait ListenerBinding {
    /// Removes exactly the listeners this binding added. Safe to call twice.
    fn unbind(&mut self);
}

/// A node drag listeners can be bound to.
pub trait DragNode: Clone + PartialEq + 'static {
    fn bind(
        &self,
        sink: EventSink,
        config: &DragConfig,
    ) -> Result<Box<dyn ListenerBinding>, DragError>;
}

pub fn mouse_phase(event_type: &str) -> Option<DragPhase> {
    match event_type {
        "mousedown" => Some(DragPhase::Start),
        "mousemove" => Some(DragPhase::Move),
        "mouseup" => Some(DragPhase::End),
        _ => None,
    }
}

pub fn touch_phase(event_type: &str, config: &DragConfig) -> Option<DragPhase> {
    match event_type {
        "touchstart" => Some(DragPhase::Start),
        "touchmove" => Some(DragPhase::Move),
        "touchend" => Some(DragPhase::End),
        "touchcancel" if config.touch_cancel_ends_drag => Some(DragPhase::End),
        _ => None,
    }
}

/// Every `(event type, phase)` pair a binding listens to under `config`.
pub fn bound_events(config: &DragConfig) -> impl Iterator<Item = (&'static str, DragPhase)> + '_ {
    let mouse = MOUSE_EVENTS
        .into_iter()
        .filter_map(|t| mouse_phase(t).map(|p| (t, p)));
    let touch = TOUCH_EVENTS
        .into_iter()
        .filter_map(move |t| touch_phase(t, config).map(|p| (t, p)));
    mouse.chain(touch)
}
