#![forbid(unsafe_code)]

//! Placement engine for the Gridify CSS grid editor.
//!
//! # Role in Gridify
//! `gridify-layout` turns pointer gestures into grid placements and keeps
//! the generated code in step with them.
//!
//! # Primary responsibilities
//! - **PlacementStore**: ordered, observable collection of [`GridItem`]s.
//! - **GestureController**: drag-to-move and handle-to-resize state machines.
//! - **Occupancy**: free cells for "add item here" affordances.
//! - **Projector**: markup and stylesheet text for the current layout.
//! - **GridEditor**: facade wiring the above to configuration and container
//!   measurements.
//!
//! Overlapping placements are allowed; the engine does not pack or resolve
//! collisions.

pub mod color;
pub mod editor;
pub mod gesture;
pub mod item;
pub mod occupancy;
pub mod payload;
pub mod projector;
pub mod store;

pub use gridify_core::{
    CellGeometry, ContainerBounds, EditorSettings, GridArea, GridCell, GridConfigError,
    GridConfiguration, Point,
};

pub use color::{ColorSource, HslPalette};
pub use editor::GridEditor;
pub use gesture::{
    GestureContext, GestureController, GestureEffect, GestureEvent, GestureNoopReason,
    GestureState, GestureTransition, ResizeSession, move_target, resize_target,
};
pub use item::{GridItem, GridItemPatch, ItemId, ItemIdAllocator, ItemIdError};
pub use occupancy::{occupied_cells, unoccupied_cells};
pub use payload::{DRAG_PAYLOAD_MEDIA_TYPE, DragPayload};
pub use projector::{CodeProjection, item_class, project, project_markup, project_stylesheet};
pub use store::{PlacementStore, StoreChange, Subscription};
