//! Frame coalescing: any number of state changes between two animation
//! frames turn into a single frame callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::error::{DragError, describe_js};
use crate::util::clog;

pub trait FrameScheduler {
    /// Runs `callback` once, on the next frame.
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), DragError>;
}

/// Schedules through `window.requestAnimationFrame`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimationFrameScheduler;

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), DragError> {
        let window = web_sys::window().ok_or(DragError::NoWindow)?;
        let cb = Closure::once_into_js(move || callback());
        window
            .request_animation_frame(cb.unchecked_ref::<js_sys::Function>())
            .map(|_| ())
            .map_err(|e| DragError::AnimationFrame(describe_js(&e)))
    }
}

/// Queues frame callbacks until the owner steps a frame by hand.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
    refuse: Rc<Cell<bool>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback queued so far and returns how many ran.
    /// Callbacks queued while stepping wait for the next step.
    pub fn step(&self) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let n = due.len();
        for cb in due {
            cb();
        }
        n
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Makes subsequent requests fail, as a page without a window would.
    pub fn set_refuse(&self, refuse: bool) {
        self.refuse.set(refuse);
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), DragError> {
        if self.refuse.get() {
            return Err(DragError::NoWindow);
        }
        self.queue.borrow_mut().push(callback);
        Ok(())
    }
}

/// Single-slot pending flag in front of a [`FrameScheduler`].
pub struct FrameBridge {
    scheduler: Rc<dyn FrameScheduler>,
    pending: Cell<bool>,
}

impl FrameBridge {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            pending: Cell::new(false),
        }
    }

    /// Requests a frame unless one is already pending. Returns whether a new
    /// request went out.
    pub fn schedule(&self, callback: impl FnOnce() + 'static) -> bool {
        if self.pending.replace(true) {
            return false;
        }
        match self.scheduler.request_frame(Box::new(callback)) {
            Ok(()) => true,
            Err(e) => {
                // leave the slot free so the next change retries
                self.pending.set(false);
                clog(&format!("drag: frame request failed: {}", e));
                false
            }
        }
    }

    pub fn frame_fired(&self) {
        self.pending.set(false);
    }

    pub fn cancel(&self) {
        self.pending.set(false);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}
