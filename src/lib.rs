//! Pointer and touch drag tracking for workbench views.
//!
//! A view asks [`hooks::use_drag`] for a handle, puts `handle.node_ref(key)`
//! on the elements it wants to track, and reads `handle.get(key)` while
//! rendering. Mouse and touch events on those elements (or their
//! descendants) are folded into a [`DragResult`] per key and published once
//! per animation frame.

pub mod binder;
pub mod config;
pub mod error;
pub mod frame;
pub mod hooks;
pub mod model;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

pub use config::DragConfig;
pub use error::DragError;
pub use hooks::{UseDragHandle, use_drag, use_drag_with};
pub use model::{DragEvent, DragPhase, DragResult, InputSource, NodeKey, Point};
pub use state::DragStore;
