#![forbid(unsafe_code)]

//! Occupancy Scanner: which grid cells are free for an "add item" affordance.
//!
//! Cost is `O(rows * columns + total item area)`, fine for grids of at most
//! 100×100.

use std::collections::BTreeSet;

use gridify_core::{GridCell, GridConfiguration};
use rustc_hash::FxHashSet;

use crate::item::GridItem;

/// Every cell covered by at least one item footprint.
///
/// Cells outside the current grid are included when items extend past it
/// (e.g. after the configuration shrank).
#[must_use]
pub fn occupied_cells(items: &[GridItem]) -> FxHashSet<GridCell> {
    let capacity = items.iter().map(|item| item.area.area() as usize).sum();
    let mut occupied = FxHashSet::with_capacity_and_hasher(capacity, Default::default());
    for item in items {
        occupied.extend(item.area.cells());
    }
    occupied
}

/// In-grid cells covered by no item, in row-major order.
#[must_use]
pub fn unoccupied_cells(config: &GridConfiguration, items: &[GridItem]) -> BTreeSet<GridCell> {
    let occupied = occupied_cells(items);
    config.cells().filter(|cell| !occupied.contains(cell)).collect()
}
