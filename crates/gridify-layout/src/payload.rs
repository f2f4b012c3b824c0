#![forbid(unsafe_code)]

//! Drag payload carried from drag-start to drop.
//!
//! Hosts that move the payload through an opaque string channel (for
//! example a drag-and-drop data transfer) use [`DragPayload::encode`] and
//! [`DragPayload::decode`]. Decoding never fails loudly: anything that is
//! not a well-formed payload yields `None`, and the drop is abandoned.

use gridify_core::Point;
use serde::{Deserialize, Serialize};

use crate::item::ItemId;

/// Transport media type for encoded payloads.
pub const DRAG_PAYLOAD_MEDIA_TYPE: &str = "application/json";

/// Which item is being dragged, and where it was grabbed.
///
/// The grab offset is the pixel distance from the item's top-left corner to
/// the pointer at drag start. Subtracting it on drop places the item's corner
/// rather than the pointer onto the target line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub item_id: ItemId,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl DragPayload {
    #[must_use]
    pub const fn new(item_id: ItemId, grab_offset: Point) -> Self {
        Self {
            item_id,
            offset_x: grab_offset.x,
            offset_y: grab_offset.y,
        }
    }

    #[must_use]
    pub const fn grab_offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Serialize for an opaque string channel.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a transported payload; `None` for empty or malformed input.
    #[must_use]
    pub fn decode(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        let payload: Self = serde_json::from_str(raw).ok()?;
        (payload.offset_x.is_finite() && payload.offset_y.is_finite()).then_some(payload)
    }
}
