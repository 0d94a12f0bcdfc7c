// In-memory DOM stand-in for native tests: nodes with parent links, per-node
// listener lists and bubbling dispatch.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::binder::{DragNode, EventSink, ListenerBinding, bound_events};
use crate::config::DragConfig;
use crate::error::DragError;
use crate::model::{DragEvent, Point};

pub type MockCallback = Rc<dyn Fn(Point)>;

struct MockListener {
    id: u64,
    event: &'static str,
    callback: MockCallback,
}

struct NodeInner {
    parent: Option<MockNode>,
    listeners: RefCell<Vec<MockListener>>,
    next_id: Rc<Cell<u64>>,
    fail_on: RefCell<Option<&'static str>>,
}

#[derive(Clone)]
pub struct MockNode(Rc<NodeInner>);

impl PartialEq for MockNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl MockNode {
    pub fn root() -> Self {
        Self(Rc::new(NodeInner {
            parent: None,
            listeners: RefCell::new(Vec::new()),
            next_id: Rc::new(Cell::new(0)),
            fail_on: RefCell::new(None),
        }))
    }

    pub fn child(&self) -> Self {
        Self(Rc::new(NodeInner {
            parent: Some(self.clone()),
            listeners: RefCell::new(Vec::new()),
            next_id: self.0.next_id.clone(),
            fail_on: RefCell::new(None),
        }))
    }

    pub fn add_listener(&self, event: &'static str, callback: MockCallback) -> u64 {
        let id = self.0.next_id.get() + 1;
        self.0.next_id.set(id);
        self.0.listeners.borrow_mut().push(MockListener { id, event, callback });
        id
    }

    pub fn remove_listener(&self, id: u64) {
        self.0.listeners.borrow_mut().retain(|l| l.id != id);
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    /// Callbacks currently registered for `event`, for replaying an event
    /// that was already in flight when its listener went away.
    pub fn listeners_for(&self, event: &str) -> Vec<MockCallback> {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.event == event)
            .map(|l| l.callback.clone())
            .collect()
    }

    /// Makes the next bind fail when it reaches `event`.
    pub fn fail_on(&self, event: &'static str) {
        *self.0.fail_on.borrow_mut() = Some(event);
    }

    /// Dispatches on this node and bubbles through its ancestors.
    pub fn dispatch(&self, event: &str, x: f64, y: f64) {
        let mut node = Some(self.clone());
        while let Some(n) = node {
            for cb in n.listeners_for(event) {
                cb(Point::new(x, y));
            }
            node = n.0.parent.clone();
        }
    }
}

pub struct MockBinding {
    node: MockNode,
    ids: Vec<u64>,
}

impl ListenerBinding for MockBinding {
    fn unbind(&mut self) {
        for id in self.ids.drain(..) {
            self.node.remove_listener(id);
        }
    }
}

impl Drop for MockBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}

impl DragNode for MockNode {
    fn bind(&self, sink: EventSink, config: &DragConfig) -> Result<Box<dyn ListenerBinding>, DragError> {
        let mut binding = MockBinding {
            node: self.clone(),
            ids: Vec::new(),
        };
        for (event, phase) in bound_events(config) {
            if *self.0.fail_on.borrow() == Some(event) {
                self.0.fail_on.borrow_mut().take();
                return Err(DragError::Listener {
                    event,
                    reason: "refused by test".into(),
                });
            }
            let sink = sink.clone();
            let touch = event.starts_with("touch");
            let id = self.add_listener(
                event,
                Rc::new(move |p: Point| {
                    let ev = if touch {
                        DragEvent::touch(phase, p.x, p.y)
                    } else {
                        DragEvent::mouse(phase, p.x, p.y)
                    };
                    sink(ev);
                }),
            );
            binding.ids.push(id);
        }
        Ok(Box::new(binding))
    }
}
