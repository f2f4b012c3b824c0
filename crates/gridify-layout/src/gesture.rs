#![forbid(unsafe_code)]

//! Gesture Controller: pointer gestures resolved into placement updates.
//!
//! [`GestureController`] interprets two gesture families against the
//! current grid geometry and the [`PlacementStore`]:
//!
//! - **Move** (`Idle -> Dragging -> Idle`): a drag captures a
//!   [`DragPayload`] and leaves the store untouched until the drop, which
//!   repositions the item's top-left corner (span preserved, clamped so the
//!   item fits the grid).
//! - **Resize** (`Idle -> Resizing -> Idle`): a handle press captures a
//!   [`ResizeSession`]; every pointer move re-derives the end lines from the
//!   *original* end lines plus the rounded cell delta, and commits when they
//!   differ from the stored ones. Release only ends the session.
//!
//! ```text
//! Idle --DragStart--> Dragging --Drop/DragEnd/PointerUp--> Idle
//! Idle --ResizeStart--> Resizing --PointerMove (commit)--> Resizing
//!                       Resizing --PointerUp--> Idle
//! ```
//!
//! # Invariants
//!
//! 1. A move never changes an item's span.
//! 2. A resize never shrinks a span below 1 and never pushes an end line
//!    past `count + 1`.
//! 3. While `Resizing`, a drag start for any item is consumed as a no-op,
//!    so the handle press is never also read as a move.
//! 4. Every event yields exactly one [`GestureTransition`]; rejected input is
//!    reported as [`GestureEffect::Noop`] with a reason, never as an error.
//!
//! # Failure Modes
//!
//! - Drop without a payload (foreign or malformed drag data): the drag ends
//!   and nothing moves.
//! - Item removed mid-gesture: later events for it are no-ops and the
//!   session stays open until release.

use gridify_core::{
    CellGeometry, ContainerBounds, GridArea, GridConfiguration, Point, line_delta, pixel_to_line,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::item::{GridItemPatch, ItemId};
use crate::payload::DragPayload;
use crate::store::PlacementStore;

/// State captured when a resize starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeSession {
    pub item_id: ItemId,
    /// Pointer position at press, in client pixels.
    pub origin: Point,
    pub original_col_end: u16,
    pub original_row_end: u16,
}

/// Gesture lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
    },
    Resizing {
        session: ResizeSession,
    },
}

impl GestureState {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
        }
    }
}

/// Pointer input delivered by the host. Positions are client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Drag began over an item, grabbed `grab_offset` pixels from its
    /// top-left corner.
    DragStart { item_id: ItemId, grab_offset: Point },
    /// Drag released over the grid. `payload` is whatever the transport
    /// delivered; `None` when it was missing or unreadable.
    Drop {
        payload: Option<DragPayload>,
        pointer: Point,
    },
    /// Drag source reported the drag finished (dropped elsewhere or
    /// aborted).
    DragEnd,
    /// Pointer pressed on an item's resize handle.
    ResizeStart { item_id: ItemId, pointer: Point },
    PointerMove { pointer: Point },
    PointerUp { pointer: Point },
}

/// Why an event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureNoopReason {
    NoActiveGesture,
    NoActiveDrag,
    GestureAlreadyActive,
    SuppressedByResize,
    AwaitingDrop,
    MissingPayload,
    UnknownItem,
    Unchanged,
}

/// Effect of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum GestureEffect {
    DragStarted {
        item_id: ItemId,
        grab_offset: Point,
    },
    Moved {
        item_id: ItemId,
        from: GridArea,
        to: GridArea,
    },
    DragEnded {
        item_id: ItemId,
    },
    ResizeStarted {
        item_id: ItemId,
        origin: Point,
    },
    Resized {
        item_id: ItemId,
        from: GridArea,
        to: GridArea,
    },
    ResizeEnded {
        item_id: ItemId,
    },
    Noop {
        reason: GestureNoopReason,
    },
}

impl GestureEffect {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DragStarted { .. } => "drag_started",
            Self::Moved { .. } => "moved",
            Self::DragEnded { .. } => "drag_ended",
            Self::ResizeStarted { .. } => "resize_started",
            Self::Resized { .. } => "resized",
            Self::ResizeEnded { .. } => "resize_ended",
            Self::Noop { .. } => "noop",
        }
    }

    /// Whether the store was mutated.
    #[must_use]
    pub const fn is_commit(&self) -> bool {
        matches!(self, Self::Moved { .. } | Self::Resized { .. })
    }
}

/// One state-machine step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureTransition {
    pub transition_id: u64,
    pub from: GestureState,
    pub to: GestureState,
    pub effect: GestureEffect,
}

/// Geometry a gesture is resolved against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub config: GridConfiguration,
    pub cells: CellGeometry,
    pub container: ContainerBounds,
}

/// Where a moved area lands when its top-left corner is at `top_left`
/// (container-relative pixels).
///
/// The start line is clamped to `[1, count - span + 1]`, so the span always
/// fits unless it is wider than the grid itself, in which case it starts at
/// line 1.
#[must_use]
pub fn move_target(area: &GridArea, top_left: Point, ctx: &GestureContext) -> GridArea {
    let config = &ctx.config;
    let target_col =
        pixel_to_line(top_left.x, ctx.cells.cell_width, config.gap(), config.columns());
    let target_row =
        pixel_to_line(top_left.y, ctx.cells.cell_height, config.gap(), config.rows());
    let col_start = clamp_start(target_col, area.col_span(), config.columns());
    let row_start = clamp_start(target_row, area.row_span(), config.rows());
    area.moved_to(col_start, row_start).unwrap_or(*area)
}

/// End lines for a resize of `area` with the pointer now at `pointer`.
///
/// Deltas are measured from the session origin and applied to the session's
/// original end lines, so repeated moves never accumulate rounding drift.
#[must_use]
pub fn resize_target(
    area: &GridArea,
    session: &ResizeSession,
    pointer: Point,
    ctx: &GestureContext,
) -> GridArea {
    let delta = pointer.minus(session.origin);
    let col_end = clamp_end(
        session.original_col_end,
        line_delta(delta.x, ctx.cells.cell_width),
        area.col_start(),
        ctx.config.columns(),
    );
    let row_end = clamp_end(
        session.original_row_end,
        line_delta(delta.y, ctx.cells.cell_height),
        area.row_start(),
        ctx.config.rows(),
    );
    area.with_ends(col_end, row_end).unwrap_or(*area)
}

fn clamp_start(target: u16, span: u16, count: u16) -> u16 {
    let max_start = i32::from(count) - i32::from(span) + 1;
    // Lower bound applied last: a span wider than the grid pins to line 1.
    i32::from(target).min(max_start).max(1) as u16
}

fn clamp_end(original: u16, change: i32, start: u16, count: u16) -> u16 {
    let proposed = i64::from(original) + i64::from(change);
    let clamped = proposed
        .min(i64::from(count) + 1)
        .max(i64::from(start) + 1);
    clamped.min(i64::from(u16::MAX)) as u16
}

/// Runtime gesture machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureController {
    state: GestureState,
    transition_counter: u64,
}

impl GestureController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a drag or resize is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    /// Apply one event, committing to `store` where the gesture calls for it.
    pub fn apply(
        &mut self,
        event: &GestureEvent,
        store: &mut PlacementStore,
        ctx: &GestureContext,
    ) -> GestureTransition {
        let from = self.state;
        let effect = match (from, *event) {
            // -- move -------------------------------------------------------
            (GestureState::Idle, GestureEvent::DragStart { item_id, grab_offset }) => {
                if store.get(item_id).is_none() {
                    noop(GestureNoopReason::UnknownItem)
                } else {
                    self.state = GestureState::Dragging {
                        payload: DragPayload::new(item_id, grab_offset),
                    };
                    GestureEffect::DragStarted {
                        item_id,
                        grab_offset,
                    }
                }
            }
            (GestureState::Resizing { .. }, GestureEvent::DragStart { .. }) => {
                noop(GestureNoopReason::SuppressedByResize)
            }
            (GestureState::Dragging { .. }, GestureEvent::DragStart { .. }) => {
                noop(GestureNoopReason::GestureAlreadyActive)
            }
            (GestureState::Resizing { .. }, GestureEvent::Drop { .. }) => {
                noop(GestureNoopReason::SuppressedByResize)
            }
            (_, GestureEvent::Drop { payload, pointer }) => {
                // The transported payload is authoritative, so drops of
                // drags started elsewhere still resolve.
                self.state = GestureState::Idle;
                match payload {
                    Some(payload) => commit_move(store, &payload, pointer, ctx),
                    None => noop(GestureNoopReason::MissingPayload),
                }
            }
            (GestureState::Dragging { payload }, GestureEvent::DragEnd)
            | (GestureState::Dragging { payload }, GestureEvent::PointerUp { .. }) => {
                self.state = GestureState::Idle;
                GestureEffect::DragEnded {
                    item_id: payload.item_id,
                }
            }
            (_, GestureEvent::DragEnd) => noop(GestureNoopReason::NoActiveDrag),
            (GestureState::Dragging { .. }, GestureEvent::PointerMove { .. }) => {
                noop(GestureNoopReason::AwaitingDrop)
            }

            // -- resize -----------------------------------------------------
            (GestureState::Idle, GestureEvent::ResizeStart { item_id, pointer }) => {
                match store.get(item_id) {
                    None => noop(GestureNoopReason::UnknownItem),
                    Some(item) => {
                        self.state = GestureState::Resizing {
                            session: ResizeSession {
                                item_id,
                                origin: pointer,
                                original_col_end: item.col_end(),
                                original_row_end: item.row_end(),
                            },
                        };
                        GestureEffect::ResizeStarted {
                            item_id,
                            origin: pointer,
                        }
                    }
                }
            }
            (_, GestureEvent::ResizeStart { .. }) => noop(GestureNoopReason::GestureAlreadyActive),
            (GestureState::Resizing { session }, GestureEvent::PointerMove { pointer }) => {
                commit_resize(store, &session, pointer, ctx)
            }
            (GestureState::Resizing { session }, GestureEvent::PointerUp { .. }) => {
                self.state = GestureState::Idle;
                GestureEffect::ResizeEnded {
                    item_id: session.item_id,
                }
            }
            (
                GestureState::Idle,
                GestureEvent::PointerMove { .. } | GestureEvent::PointerUp { .. },
            ) => noop(GestureNoopReason::NoActiveGesture),
        };
        self.record(from, effect)
    }

    /// Return to `Idle` without an input event (focus loss, teardown).
    ///
    /// Resize commits already made are kept. Returns `None` when idle.
    pub fn force_cancel(&mut self) -> Option<GestureTransition> {
        let from = self.state;
        let effect = match from {
            GestureState::Idle => return None,
            GestureState::Dragging { payload } => GestureEffect::DragEnded {
                item_id: payload.item_id,
            },
            GestureState::Resizing { session } => GestureEffect::ResizeEnded {
                item_id: session.item_id,
            },
        };
        self.state = GestureState::Idle;
        Some(self.record(from, effect))
    }

    fn record(&mut self, from: GestureState, effect: GestureEffect) -> GestureTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = GestureTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        };
        match effect {
            GestureEffect::Noop { reason } => debug!(
                transition_id = transition.transition_id,
                state = from.name(),
                ?reason,
                "gesture event ignored"
            ),
            _ => debug!(
                transition_id = transition.transition_id,
                from = from.name(),
                to = transition.to.name(),
                effect = effect.name(),
                "gesture transition"
            ),
        }
        transition
    }
}

const fn noop(reason: GestureNoopReason) -> GestureEffect {
    GestureEffect::Noop { reason }
}

fn commit_move(
    store: &mut PlacementStore,
    payload: &DragPayload,
    pointer: Point,
    ctx: &GestureContext,
) -> GestureEffect {
    let Some(item) = store.get(payload.item_id) else {
        return noop(GestureNoopReason::UnknownItem);
    };
    let from = item.area;
    let top_left = ctx.container.to_local(pointer).minus(payload.grab_offset());
    let to = move_target(&from, top_left, ctx);
    if to == from || !store.update(payload.item_id, &GridItemPatch::area(to)) {
        return noop(GestureNoopReason::Unchanged);
    }
    GestureEffect::Moved {
        item_id: payload.item_id,
        from,
        to,
    }
}

fn commit_resize(
    store: &mut PlacementStore,
    session: &ResizeSession,
    pointer: Point,
    ctx: &GestureContext,
) -> GestureEffect {
    let Some(item) = store.get(session.item_id) else {
        return noop(GestureNoopReason::UnknownItem);
    };
    let from = item.area;
    let to = resize_target(&from, session, pointer, ctx);
    if to == from
        || !store.update(
            session.item_id,
            &GridItemPatch::ends(to.col_end(), to.row_end()),
        )
    {
        return noop(GestureNoopReason::Unchanged);
    }
    GestureEffect::Resized {
        item_id: session.item_id,
        from,
        to,
    }
}
