pub mod app;
pub mod splitter;
