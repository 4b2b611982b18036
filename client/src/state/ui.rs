//! Local UI chrome state (active tool, zoom display, pending zoom commands).
//!
//! DESIGN
//! ======
//! Toolbar and zoom buttons never touch the engine directly. They write here,
//! and `CanvasHost` relays the change to the mounted engine. Zoom commands are
//! one-shot, so each carries a sequence number the host compares against the
//! last one it applied.

use canvas::input::Tool;

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Discrete zoom command issued by the zoom controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomRequest {
    In,
    Out,
    /// Back to 100% with the origin at the top-left corner.
    Reset,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub active_tool: Tool,
    /// Zoom level reported by the engine, rounded to a whole percent.
    pub zoom_percent: u32,
    pub zoom_request: Option<ZoomRequest>,
    pub zoom_request_seq: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self { active_tool: Tool::default(), zoom_percent: 100, zoom_request: None, zoom_request_seq: 0 }
    }
}

impl UiState {
    /// Queue a zoom command for the canvas host.
    pub fn request_zoom(&mut self, request: ZoomRequest) {
        self.zoom_request = Some(request);
        self.zoom_request_seq += 1;
    }

    /// The queued zoom command, unless `last_applied_seq` already covers it.
    #[must_use]
    pub fn pending_zoom(&self, last_applied_seq: u64) -> Option<ZoomRequest> {
        if self.zoom_request_seq == last_applied_seq {
            return None;
        }
        self.zoom_request
    }

    /// Text for the zoom percentage button, e.g. `"125%"`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("{}%", self.zoom_percent)
    }
}
