#![forbid(unsafe_code)]

//! Placement Store: the ordered collection of grid items.
//!
//! # Design
//!
//! The store is the single source of truth for placements. Insertion order
//! is preserved and doubles as z-order (later items paint on top). Every
//! effective mutation bumps a version counter and notifies subscribers with
//! the change and the full item slice, so occupancy and code projection can
//! be recomputed deterministically after each commit.
//!
//! # Invariants
//!
//! 1. Item IDs are unique and never reused for the lifetime of the store.
//! 2. Every stored area satisfies `1 <= start < end` on both axes.
//! 3. `version` increments by exactly 1 per effective mutation; no-op
//!    updates and unknown IDs leave it unchanged and notify nobody.
//! 4. Overlapping items are accepted as-is.
//!
//! # Failure Modes
//!
//! - Unknown IDs on `update`/`remove` are silent no-ops (stale references
//!   from a removed item are expected mid-gesture).
//! - A patch whose merged lines are invalid is dropped without touching the
//!   item.

use std::fmt;
use std::rc::{Rc, Weak};

use gridify_core::{GridArea, GridCell};
use tracing::{debug, debug_span, trace};

use crate::color::{ColorSource, HslPalette};
use crate::item::{GridItem, GridItemPatch, ItemId, ItemIdAllocator, ItemIdError};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Added { id: ItemId, version: u64 },
    Updated { id: ItemId, version: u64 },
    Removed { id: ItemId, version: u64 },
}

impl StoreChange {
    #[must_use]
    pub const fn id(&self) -> ItemId {
        match self {
            Self::Added { id, .. } | Self::Updated { id, .. } | Self::Removed { id, .. } => *id,
        }
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        match self {
            Self::Added { version, .. }
            | Self::Updated { version, .. }
            | Self::Removed { version, .. } => *version,
        }
    }
}

type Callback = dyn Fn(&StoreChange, &[GridItem]);

/// RAII guard for a store subscriber.
///
/// Dropping it unsubscribes; the dead entry is pruned on the next
/// notification.
pub struct Subscription {
    _guard: Rc<Callback>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Ordered, observable collection of grid items.
pub struct PlacementStore {
    items: Vec<GridItem>,
    ids: ItemIdAllocator,
    colors: Box<dyn ColorSource>,
    label_prefix: String,
    version: u64,
    subscribers: Vec<Weak<Callback>>,
}

impl fmt::Debug for PlacementStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacementStore")
            .field("items", &self.items)
            .field("version", &self.version)
            .field("subscriber_count", &self.subscribers.len())
            .finish()
    }
}

impl Default for PlacementStore {
    fn default() -> Self {
        Self::new(HslPalette::default(), "Item")
    }
}

impl PlacementStore {
    /// Create an empty store that colors new items from `colors` and labels
    /// them `"{label_prefix} {n}"`.
    #[must_use]
    pub fn new(colors: impl ColorSource + 'static, label_prefix: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            ids: ItemIdAllocator::default(),
            colors: Box::new(colors),
            label_prefix: label_prefix.into(),
            version: 0,
            subscribers: Vec::new(),
        }
    }

    /// Items in insertion (z-) order.
    #[must_use]
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&GridItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Position of an item in insertion order.
    #[must_use]
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Effective-mutation counter.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Append a 1×1 item at `cell`.
    ///
    /// Occupancy is not checked: adding onto a covered cell stacks a new item
    /// on top. The only failure is exhaustion of the ID space.
    pub fn add(&mut self, cell: GridCell) -> Result<GridItem, ItemIdError> {
        let id = self.ids.allocate()?;
        let item = GridItem {
            id,
            area: GridArea::cell(cell),
            label: format!("{} {}", self.label_prefix, self.items.len() + 1),
            color: self.colors.next_color(),
        };
        debug!(
            item_id = id.get(),
            row = item.row_start(),
            col = item.col_start(),
            "placement added"
        );
        self.items.push(item.clone());
        self.commit(StoreChange::Added {
            id,
            version: self.version + 1,
        });
        Ok(item)
    }

    /// Merge `patch` into the item with `id`.
    ///
    /// Returns `true` when the item changed. Unknown IDs, invalid merged
    /// lines, and patches that change nothing are no-ops returning `false`.
    pub fn update(&mut self, id: ItemId, patch: &GridItemPatch) -> bool {
        let Some(index) = self.index_of(id) else {
            trace!(item_id = id.get(), reason = "unknown_id", "update ignored");
            return false;
        };
        let updated = match patch.apply_to(&self.items[index]) {
            Ok(updated) => updated,
            Err(error) => {
                trace!(item_id = id.get(), reason = "invalid_patch", %error, "update ignored");
                return false;
            }
        };
        if updated == self.items[index] {
            trace!(item_id = id.get(), reason = "unchanged", "update ignored");
            return false;
        }
        debug!(
            item_id = id.get(),
            col_start = updated.col_start(),
            col_end = updated.col_end(),
            row_start = updated.row_start(),
            row_end = updated.row_end(),
            "placement updated"
        );
        self.items[index] = updated;
        self.commit(StoreChange::Updated {
            id,
            version: self.version + 1,
        });
        true
    }

    /// Remove the item with `id`, returning it. Unknown IDs are a no-op.
    pub fn remove(&mut self, id: ItemId) -> Option<GridItem> {
        let Some(index) = self.index_of(id) else {
            trace!(item_id = id.get(), reason = "unknown_id", "remove ignored");
            return None;
        };
        let removed = self.items.remove(index);
        debug!(item_id = id.get(), "placement removed");
        self.commit(StoreChange::Removed {
            id,
            version: self.version + 1,
        });
        Some(removed)
    }

    /// Register a change callback.
    ///
    /// The callback receives each change together with the item slice as it
    /// stands after the change. Callbacks cannot mutate the store.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&StoreChange, &[GridItem]) + 'static,
    ) -> Subscription {
        let strong: Rc<Callback> = Rc::new(callback);
        self.subscribers.push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    /// Registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn commit(&mut self, change: StoreChange) {
        self.version = change.version();
        self.subscribers.retain(|weak| weak.strong_count() > 0);
        let callbacks: Vec<Rc<Callback>> =
            self.subscribers.iter().filter_map(Weak::upgrade).collect();
        if callbacks.is_empty() {
            return;
        }
        let _span = debug_span!(
            "gridify.store.notify",
            version = self.version,
            subscribers = callbacks.len() as u64
        )
        .entered();
        for callback in &callbacks {
            callback(&change, self.items.as_slice());
        }
    }
}
