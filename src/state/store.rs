//! Per-view drag store: owns the gesture state and listener bindings of every
//! tracked node, and publishes snapshots once per frame.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::binder::{DragNode, EventSink, ListenerBinding};
use crate::config::DragConfig;
use crate::error::DragError;
use crate::frame::{FrameBridge, FrameScheduler};
use crate::model::{DragEvent, DragResult, NodeKey};
use crate::state::gesture::TrackedGesture;
use crate::util::clog;

struct Entry<N> {
    node: N,
    binding: Option<Box<dyn ListenerBinding>>,
    /// Identifies the binding whose listeners may feed this entry.
    generation: u64,
    gesture: TrackedGesture,
}

struct StoreState<N> {
    entries: HashMap<NodeKey, Entry<N>>,
    next_generation: u64,
}

struct Shared<N> {
    state: RefCell<StoreState<N>>,
    bridge: FrameBridge,
    invalidate: Rc<dyn Fn()>,
    config: DragConfig,
}

/// Cheap to clone; clones share state. Single-threaded.
pub struct DragStore<N: DragNode> {
    shared: Rc<Shared<N>>,
}

impl<N: DragNode> Clone for DragStore<N> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<N: DragNode> DragStore<N> {
    pub fn new(scheduler: Rc<dyn FrameScheduler>, invalidate: Rc<dyn Fn()>) -> Self {
        Self::with_config(DragConfig::default(), scheduler, invalidate)
    }

    pub fn with_config(config: DragConfig, scheduler: Rc<dyn FrameScheduler>, invalidate: Rc<dyn Fn()>) -> Self {
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(StoreState {
                    entries: HashMap::new(),
                    next_generation: 0,
                }),
                bridge: FrameBridge::new(scheduler),
                invalidate,
                config,
            }),
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.shared.config
    }

    /// Latest published result for `key`; the empty result when the key has
    /// no entry. Never mutates.
    pub fn get(&self, key: &NodeKey) -> DragResult {
        self.shared
            .state
            .borrow()
            .entries
            .get(key)
            .map(|e| e.gesture.snapshot())
            .unwrap_or(DragResult::EMPTY)
    }

    pub fn is_attached(&self, key: &NodeKey) -> bool {
        self.shared
            .state
            .borrow()
            .entries
            .get(key)
            .is_some_and(|e| e.binding.is_some())
    }

    pub fn tracked_keys(&self) -> Vec<NodeKey> {
        let mut keys: Vec<_> = self.shared.state.borrow().entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Binds listeners for `key` to `node`. Binding the same node again is a
    /// no-op; a different node replaces the old binding and keeps the
    /// gesture state. A node already bound under another key is taken over:
    /// that key's binding and state go away. If binding fails the key is left
    /// unbound with its state reset, and the view is invalidated when that
    /// changes what it reads.
    pub fn attach(&self, key: NodeKey, node: N) -> Result<(), DragError> {
        let mut released: Vec<Box<dyn ListenerBinding>> = Vec::new();
        let mut lost_visible_state = false;
        let result = {
            let mut state = self.shared.state.borrow_mut();
            if let Some(entry) = state.entries.get(&key) {
                if entry.binding.is_some() && entry.node == node {
                    return Ok(());
                }
            }

            let stale: Vec<NodeKey> = state
                .entries
                .iter()
                .filter(|(k, e)| **k != key && e.node == node)
                .map(|(k, _)| k.clone())
                .collect();
            for k in stale {
                if self.shared.config.debug_log {
                    clog(&format!("drag: node moved from `{}` to `{}`", k, key));
                }
                if let Some(e) = state.entries.remove(&k) {
                    lost_visible_state |= !e.gesture.snapshot().is_empty();
                    released.extend(e.binding);
                }
            }

            state.next_generation += 1;
            let generation = state.next_generation;
            let entry = state.entries.entry(key.clone()).or_insert_with(|| Entry {
                node: node.clone(),
                binding: None,
                generation,
                gesture: TrackedGesture::default(),
            });
            if let Some(old) = entry.binding.take() {
                released.push(old);
            }
            entry.node = node.clone();
            entry.generation = generation;
            match node.bind(self.sink(key.clone(), generation), &self.shared.config) {
                Ok(binding) => {
                    entry.binding = Some(binding);
                    Ok(())
                }
                Err(e) => {
                    // nothing can end a gesture on an unbound entry, so start over
                    lost_visible_state |= !entry.gesture.snapshot().is_empty();
                    entry.gesture = TrackedGesture::default();
                    Err(e)
                }
            }
        };
        for mut binding in released {
            binding.unbind();
        }
        if result.is_err() && lost_visible_state {
            (self.shared.invalidate)();
        }
        result
    }

    /// Drops the binding and state of one key.
    pub fn detach(&self, key: &NodeKey) {
        let removed = self.shared.state.borrow_mut().entries.remove(key);
        if let Some(mut binding) = removed.and_then(|e| e.binding) {
            binding.unbind();
        }
    }

    /// Drops every binding and all state. Events still in flight for the old
    /// bindings are discarded. Safe to call more than once.
    pub fn detach_all(&self) {
        let entries = std::mem::take(&mut self.shared.state.borrow_mut().entries);
        self.shared.bridge.cancel();
        for (_, entry) in entries {
            if let Some(mut binding) = entry.binding {
                binding.unbind();
            }
        }
    }

    /// Feeds one normalised event for an attached key. Events for keys
    /// without a binding are dropped. Returns whether drag state changed.
    pub fn handle(&self, key: &NodeKey, event: DragEvent) -> bool {
        self.apply(key, None, event)
    }

    fn sink(&self, key: NodeKey, generation: u64) -> EventSink {
        let weak: Weak<Shared<N>> = Rc::downgrade(&self.shared);
        Rc::new(move |event: DragEvent| match weak.upgrade() {
            Some(shared) => DragStore { shared }.apply(&key, Some(generation), event),
            None => false,
        })
    }

    fn apply(&self, key: &NodeKey, generation: Option<u64>, event: DragEvent) -> bool {
        let changed = {
            let mut state = self.shared.state.borrow_mut();
            let entry = match state.entries.get_mut(key) {
                Some(e) if e.binding.is_some() && generation.is_none_or(|g| g == e.generation) => e,
                _ => return false,
            };
            entry.gesture.apply(&event)
        };
        if self.shared.config.debug_log {
            if changed {
                clog(&format!("drag: {} {:?} ({:?}) at {:?}", key, event.phase, event.source, event.position));
            } else {
                clog(&format!("drag: dropped {:?} for `{}` without a start", event.phase, key));
            }
        }
        if changed {
            self.request_frame();
        }
        changed
    }

    fn request_frame(&self) {
        let weak = Rc::downgrade(&self.shared);
        self.shared.bridge.schedule(move || {
            if let Some(shared) = weak.upgrade() {
                DragStore { shared }.flush_frame();
            }
        });
    }

    /// Publishes every entry's folded state and invalidates the view once if
    /// anything changed since the previous frame. Keys whose drag ended in
    /// this frame read as empty after the following one.
    pub fn flush_frame(&self) {
        self.shared.bridge.frame_fired();
        let (changed, settling) = {
            let mut state = self.shared.state.borrow_mut();
            let mut changed = false;
            let mut settling = false;
            for entry in state.entries.values_mut() {
                changed |= entry.gesture.publish();
                settling |= entry.gesture.is_settling();
            }
            (changed, settling)
        };
        // ended gestures go back to empty on the next frame, without a re-render
        if settling {
            self.request_frame();
        }
        if changed {
            (self.shared.invalidate)();
        }
    }
}
