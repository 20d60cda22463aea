use crate::core::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Input events the host forwards to the map.
///
/// Applying an event only changes the viewport; the host then redraws
/// through [`Map::draw`](crate::core::map::Map::draw).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// One level of detail in
    ZoomIn,
    /// One level of detail out
    ZoomOut,
    /// Move the view center to a coordinate
    PanTo { center: GeoPoint },
    /// Drag the map by a screen offset in pixels
    PanBy { dx: i64, dy: i64 },
    /// Mouse wheel; positive deltas roll forward (zoom in)
    Scroll { delta: f64 },
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    /// The viewport changed and the tiles need a redraw
    Handled,
    /// The event left the viewport as it was
    NotHandled,
}

impl EventHandled {
    pub fn needs_redraw(self) -> bool {
        self == EventHandled::Handled
    }
}

impl InputEvent {
    /// Mouse-wheel step: forward zooms in, backward zooms out
    pub fn wheel(forward: bool) -> Self {
        InputEvent::Scroll {
            delta: if forward { 1.0 } else { -1.0 },
        }
    }

    /// Checks if this event changes the zoom level
    pub fn is_zoom_event(&self) -> bool {
        matches!(
            self,
            InputEvent::ZoomIn | InputEvent::ZoomOut | InputEvent::Scroll { .. }
        )
    }

    /// Checks if this event moves the view center
    pub fn is_pan_event(&self) -> bool {
        matches!(self, InputEvent::PanTo { .. } | InputEvent::PanBy { .. })
    }
}
