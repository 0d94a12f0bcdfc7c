pub mod gesture;
pub mod store;

pub use gesture::TrackedGesture;
pub use store::DragStore;
