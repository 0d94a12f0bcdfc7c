use serde::{Deserialize, Serialize};

use crate::error::{DragError, describe_js};

/// `localStorage` key holding the persisted [`DragConfig`] as JSON.
pub const STORAGE_KEY: &str = "wb_drag_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Treat `touchcancel` like `touchend` so an interrupted touch does not stay dragging.
    pub touch_cancel_ends_drag: bool,
    /// Call `preventDefault` on `touchmove` while dragging so the page does not scroll.
    pub prevent_touch_scroll: bool,
    /// Log phase transitions and dropped events to the console.
    pub debug_log: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            touch_cancel_ends_drag: true,
            prevent_touch_scroll: true,
            debug_log: false,
        }
    }
}

impl DragConfig {
    pub fn from_json(raw: &str) -> Result<Self, DragError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, DragError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads the persisted config, falling back to defaults when storage is
    /// unavailable, empty, or holds something unparsable.
    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                    match Self::from_json(&raw) {
                        Ok(cfg) => return cfg,
                        Err(e) => crate::util::clog(&format!("drag config ignored: {}", e)),
                    }
                }
            }
        }
        Self::default()
    }

    /// Persists the config. A missing or refused `localStorage` (private
    /// browsing, quota exceeded) is reported as [`DragError::Storage`].
    pub fn save(&self) -> Result<(), DragError> {
        let raw = self.to_json()?;
        let win = web_sys::window().ok_or(DragError::NoWindow)?;
        let store = win
            .local_storage()
            .map_err(|e| DragError::Storage(describe_js(&e)))?
            .ok_or_else(|| DragError::Storage("localStorage is unavailable".into()))?;
        store
            .set_item(STORAGE_KEY, &raw)
            .map_err(|e| DragError::Storage(describe_js(&e)))
    }
}
