#![forbid(unsafe_code)]

//! Editor facade wiring configuration, geometry, store and gestures.
//!
//! Hosts own the event loop. They forward configuration updates, container
//! measurements and pointer events here, and read back items, free cells
//! and projected code. Everything runs on the caller's thread; events are
//! processed strictly in the order they are delivered.

use std::collections::BTreeSet;

use gridify_core::{
    CellGeometry, ContainerBounds, EditorSettings, GridCell, GridConfiguration, Point,
};
use tracing::debug;

use crate::color::HslPalette;
use crate::gesture::{GestureContext, GestureController, GestureEvent, GestureTransition};
use crate::item::{GridItem, GridItemPatch, ItemId, ItemIdError};
use crate::occupancy::unoccupied_cells;
use crate::payload::DragPayload;
use crate::projector::{CodeProjection, project};
use crate::store::{PlacementStore, StoreChange, Subscription};

/// Interactive grid layout editor.
#[derive(Debug)]
pub struct GridEditor {
    settings: EditorSettings,
    config: GridConfiguration,
    container: ContainerBounds,
    cells: CellGeometry,
    store: PlacementStore,
    gestures: GestureController,
}

impl Default for GridEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl GridEditor {
    /// Editor with the palette and labels described by `settings`.
    #[must_use]
    pub fn new(settings: EditorSettings) -> Self {
        let store = PlacementStore::new(
            HslPalette::new(settings.palette_seed),
            settings.label_prefix.clone(),
        );
        Self::with_store(settings, store)
    }

    /// Editor around a caller-built store (custom color source, etc.).
    #[must_use]
    pub fn with_store(settings: EditorSettings, store: PlacementStore) -> Self {
        let config = settings.grid;
        let container = ContainerBounds::default();
        let cells = CellGeometry::measure(&container, &config, settings.min_cell_px);
        Self {
            settings,
            config,
            container,
            cells,
            store,
            gestures: GestureController::new(),
        }
    }

    #[must_use]
    pub const fn configuration(&self) -> GridConfiguration {
        self.config
    }

    #[must_use]
    pub const fn container(&self) -> ContainerBounds {
        self.container
    }

    #[must_use]
    pub const fn cell_geometry(&self) -> CellGeometry {
        self.cells
    }

    #[must_use]
    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    #[must_use]
    pub fn items(&self) -> &[GridItem] {
        self.store.items()
    }

    #[must_use]
    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    /// Replace the configuration and re-derive cell sizes.
    ///
    /// Items are left exactly as they are, even when the new grid is smaller
    /// than their footprint.
    pub fn set_configuration(&mut self, config: GridConfiguration) {
        self.config = config;
        self.remeasure();
    }

    /// Record a new container measurement and re-derive cell sizes.
    pub fn set_container(&mut self, container: ContainerBounds) {
        self.container = container;
        self.remeasure();
    }

    fn remeasure(&mut self) {
        self.cells =
            CellGeometry::measure(&self.container, &self.config, self.settings.min_cell_px);
        debug!(
            columns = self.config.columns(),
            rows = self.config.rows(),
            gap = self.config.gap(),
            cell_width = self.cells.cell_width,
            cell_height = self.cells.cell_height,
            "cell geometry recomputed"
        );
    }

    /// Add a 1×1 item at `cell`.
    ///
    /// Cells outside the current grid are clamped onto its nearest edge, so
    /// a new item always fits the configuration it was added under.
    pub fn add_item(&mut self, cell: GridCell) -> Result<GridItem, ItemIdError> {
        let target = self.config.clamp_cell(cell);
        if target != cell {
            debug!(
                row = cell.row,
                col = cell.col,
                clamped_row = target.row,
                clamped_col = target.col,
                "add target outside grid"
            );
        }
        self.store.add(target)
    }

    /// Merge `patch` into an item; `false` when nothing changed.
    pub fn update_item(&mut self, id: ItemId, patch: &GridItemPatch) -> bool {
        self.store.update(id, patch)
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<GridItem> {
        self.store.remove(id)
    }

    /// Register a change callback on the store.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&StoreChange, &[GridItem]) + 'static,
    ) -> Subscription {
        self.store.subscribe(callback)
    }

    fn context(&self) -> GestureContext {
        GestureContext {
            config: self.config,
            cells: self.cells,
            container: self.container,
        }
    }

    /// Feed one pointer event to the gesture controller.
    pub fn apply(&mut self, event: &GestureEvent) -> GestureTransition {
        let ctx = self.context();
        self.gestures.apply(event, &mut self.store, &ctx)
    }

    /// Payload for a drag of `id` grabbed at client position `pointer`.
    ///
    /// The grab offset is measured from the item's top-left as placed by the
    /// even track model; hosts that know the rendered rect can build the
    /// payload themselves.
    #[must_use]
    pub fn drag_payload(&self, id: ItemId, pointer: Point) -> Option<DragPayload> {
        let item = self.store.get(id)?;
        let corner = self.cells.area_origin(&item.area, self.config.gap());
        let grab_offset = self.container.to_local(pointer).minus(corner);
        Some(DragPayload::new(id, grab_offset))
    }

    /// Start dragging `id` from client position `pointer`.
    pub fn begin_drag(&mut self, id: ItemId, pointer: Point) -> GestureTransition {
        // Unknown items still go through the controller so the no-op is
        // reported like any other.
        let grab_offset = self
            .drag_payload(id, pointer)
            .map_or(Point::default(), |payload| payload.grab_offset());
        self.apply(&GestureEvent::DragStart {
            item_id: id,
            grab_offset,
        })
    }

    /// Drop with a payload that travelled through a string channel.
    pub fn drop_encoded(&mut self, raw: &str, pointer: Point) -> GestureTransition {
        self.apply(&GestureEvent::Drop {
            payload: DragPayload::decode(raw),
            pointer,
        })
    }

    /// In-grid cells not covered by any item.
    #[must_use]
    pub fn unoccupied_cells(&self) -> BTreeSet<GridCell> {
        unoccupied_cells(&self.config, self.store.items())
    }

    /// Markup and stylesheet for the current layout.
    #[must_use]
    pub fn project(&self) -> CodeProjection {
        project(&self.config, self.store.items())
    }
}
