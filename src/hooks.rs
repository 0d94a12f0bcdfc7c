//! Yew glue: one [`DragStore`] per component instance, bound to the nodes the
//! component renders and torn down with it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::Element;
use yew::prelude::*;

use crate::config::DragConfig;
use crate::frame::AnimationFrameScheduler;
use crate::model::{DragResult, NodeKey};
use crate::state::DragStore;
use crate::util::clog;

struct RefSlot {
    node_ref: NodeRef,
    /// Consecutive renders after which the ref held no element.
    empty_renders: u8,
}

type RefSlots = HashMap<NodeKey, RefSlot>;

#[derive(Clone)]
pub struct UseDragHandle {
    store: DragStore<Element>,
    refs: Rc<RefCell<RefSlots>>,
}

impl UseDragHandle {
    /// Current result for `key`, safe to call on every render.
    pub fn get(&self, key: impl Into<NodeKey>) -> DragResult {
        self.store.get(&key.into())
    }

    /// The `ref` to put on the element tracked under `key`. Stable across renders.
    pub fn node_ref(&self, key: impl Into<NodeKey>) -> NodeRef {
        self.refs
            .borrow_mut()
            .entry(key.into())
            .or_insert_with(|| RefSlot {
                node_ref: NodeRef::default(),
                empty_renders: 0,
            })
            .node_ref
            .clone()
    }

    pub fn store(&self) -> &DragStore<Element> {
        &self.store
    }
}

/// Splits the slots into elements to bind and keys that lost their element
/// in this render. A slot still empty one render later is forgotten, so keys
/// a view stopped rendering do not linger.
fn sweep(slots: &mut RefSlots) -> (Vec<(NodeKey, Element)>, Vec<NodeKey>) {
    let mut bound = Vec::new();
    let mut lost = Vec::new();
    slots.retain(|key, slot| match slot.node_ref.cast::<Element>() {
        Some(el) => {
            slot.empty_renders = 0;
            bound.push((key.clone(), el));
            true
        }
        None => {
            slot.empty_renders = slot.empty_renders.saturating_add(1);
            if slot.empty_renders == 1 {
                lost.push(key.clone());
            }
            slot.empty_renders < 2
        }
    });
    (bound, lost)
}

/// [`use_drag_with`] using the config persisted in `localStorage`.
#[hook]
pub fn use_drag() -> UseDragHandle {
    let config = use_memo((), |_| DragConfig::load());
    use_drag_with((*config).clone())
}

/// Tracks drags on the elements the component hands out through
/// [`UseDragHandle::node_ref`]. `config` is read on the first render only.
#[hook]
pub fn use_drag_with(config: DragConfig) -> UseDragHandle {
    let update = use_force_update();
    let store = use_memo((), move |_| {
        let invalidate: Rc<dyn Fn()> = Rc::new(move || update.force_update());
        DragStore::with_config(config, Rc::new(AnimationFrameScheduler), invalidate)
    });
    let refs = use_mut_ref(RefSlots::new);

    // Bind after every render, once the concrete nodes exist.
    {
        let store = (*store).clone();
        let refs = refs.clone();
        use_effect(move || {
            let (bound, lost) = sweep(&mut refs.borrow_mut());
            for (key, el) in bound {
                if let Err(e) = store.attach(key.clone(), el) {
                    clog(&format!("drag: could not bind `{}`: {}", key, e));
                }
            }
            for key in lost {
                store.detach(&key);
            }
            || ()
        });
    }
    // Teardown
    {
        let store = (*store).clone();
        use_effect_with((), move |_| move || store.detach_all());
    }

    UseDragHandle {
        store: (*store).clone(),
        refs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> RefSlot {
        RefSlot {
            node_ref: NodeRef::default(),
            empty_renders: 0,
        }
    }

    #[test]
    fn empty_refs_are_detached_once_then_forgotten() {
        let mut slots = RefSlots::new();
        slots.insert(NodeKey::from("gone"), slot());

        let (bound, lost) = sweep(&mut slots);
        assert!(bound.is_empty());
        assert_eq!(lost, vec![NodeKey::from("gone")]);
        assert!(slots.contains_key(&NodeKey::from("gone")));

        let (_, lost) = sweep(&mut slots);
        assert!(lost.is_empty());
        assert!(slots.is_empty());
    }

    #[test]
    fn requesting_a_ref_again_restarts_the_count() {
        let mut slots = RefSlots::new();
        slots.insert(NodeKey::from("pane"), slot());
        sweep(&mut slots);
        let (_, lost) = sweep(&mut slots);
        assert!(lost.is_empty());
        slots.insert(NodeKey::from("pane"), slot());
        let (_, lost) = sweep(&mut slots);
        assert_eq!(lost, vec![NodeKey::from("pane")]);
        assert_eq!(slots.len(), 1);
    }
}
