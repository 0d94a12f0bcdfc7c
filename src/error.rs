use thiserror::Error;

#[derive(Debug, Error)]
pub enum DragError {
    #[error("failed to add `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },
    #[error("no global `window` exists")]
    NoWindow,
    #[error("requestAnimationFrame failed: {0}")]
    AnimationFrame(String),
    #[error("could not persist drag config: {0}")]
    Storage(String),
    #[error("invalid drag config: {0}")]
    Config(#[from] serde_json::Error),
}

/// Renders a thrown JS value for an error message.
pub(crate) fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
