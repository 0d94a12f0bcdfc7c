use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, MouseEvent, TouchEvent};

use super::{DragNode, EventSink, ListenerBinding, bound_events};
use crate::config::DragConfig;
use crate::error::{DragError, describe_js};
use crate::model::{DragEvent, DragPhase, InputSource};

struct WebListener {
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Listeners added to one element. Dropping it removes them.
pub struct WebBinding {
    target: Element,
    listeners: Vec<WebListener>,
}

impl WebBinding {
    fn add(&mut self, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Result<(), DragError> {
        self.target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| DragError::Listener {
                event,
                reason: describe_js(&e),
            })?;
        self.listeners.push(WebListener { event, callback });
        Ok(())
    }
}

impl ListenerBinding for WebBinding {
    fn unbind(&mut self) {
        for l in self.listeners.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(l.event, l.callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for WebBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}

fn mouse_listener(phase: DragPhase, sink: EventSink) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |e: Event| {
        if let Some(me) = e.dyn_ref::<MouseEvent>() {
            sink(DragEvent::mouse(phase, me.page_x() as f64, me.page_y() as f64));
        }
    }) as Box<dyn FnMut(Event)>)
}

fn touch_listener(phase: DragPhase, sink: EventSink, prevent_scroll: bool) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |e: Event| {
        let Some(te) = e.dyn_ref::<TouchEvent>() else {
            return;
        };
        // first changed touch only; pinch and friends are not tracked
        let Some(t0) = te.changed_touches().item(0) else {
            return;
        };
        let consumed = sink(DragEvent::touch(phase, t0.screen_x() as f64, t0.screen_y() as f64));
        if consumed && prevent_scroll && phase == DragPhase::Move {
            e.prevent_default();
        }
    }) as Box<dyn FnMut(Event)>)
}

impl DragNode for Element {
    fn bind(&self, sink: EventSink, config: &DragConfig) -> Result<Box<dyn ListenerBinding>, DragError> {
        let mut binding = WebBinding {
            target: self.clone(),
            listeners: Vec::new(),
        };
        for (event, phase) in bound_events(config) {
            let source = if event.starts_with("touch") {
                InputSource::Touch
            } else {
                InputSource::Mouse
            };
            let callback = match source {
                InputSource::Mouse => mouse_listener(phase, sink.clone()),
                InputSource::Touch => touch_listener(phase, sink.clone(), config.prevent_touch_scroll),
            };
            // on failure `binding` drops here and removes what was already added
            binding.add(event, callback)?;
        }
        Ok(Box::new(binding))
    }
}
