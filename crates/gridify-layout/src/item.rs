#![forbid(unsafe_code)]

//! Grid items, their identifiers, and partial updates.

use std::fmt;

use gridify_core::{GridArea, GridAreaError};
use serde::{Deserialize, Serialize};

/// Stable identifier for grid items.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ItemId(u64);

impl ItemId {
    /// Lowest valid item ID.
    pub const MIN: Self = Self(1);

    /// Create a new item ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, ItemIdError> {
        if raw == 0 {
            return Err(ItemIdError::Zero);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, ItemIdError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(ItemIdError::Overflow { current: self });
        };
        Self::new(next)
    }
}

impl TryFrom<u64> for ItemId {
    type Error = ItemIdError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ItemId> for u64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Monotonic allocator; IDs handed out are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdAllocator {
    next: ItemId,
}

impl ItemIdAllocator {
    /// Start allocating from a known ID.
    #[must_use]
    pub const fn with_next(next: ItemId) -> Self {
        Self { next }
    }

    /// Peek at the next ID without consuming.
    #[must_use]
    pub const fn peek(&self) -> ItemId {
        self.next
    }

    /// Allocate the next ID and advance.
    pub fn allocate(&mut self) -> Result<ItemId, ItemIdError> {
        let current = self.next;
        self.next = self.next.checked_next()?;
        Ok(current)
    }
}

impl Default for ItemIdAllocator {
    fn default() -> Self {
        Self { next: ItemId::MIN }
    }
}

/// Identifier construction and allocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemIdError {
    Zero,
    Overflow { current: ItemId },
}

impl fmt::Display for ItemIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("item id 0 is reserved"),
            Self::Overflow { current } => write!(f, "item id space exhausted after {current}"),
        }
    }
}

impl std::error::Error for ItemIdError {}

/// One placed rectangle on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: ItemId,
    pub area: GridArea,
    pub label: String,
    pub color: String,
}

impl GridItem {
    #[must_use]
    pub const fn col_start(&self) -> u16 {
        self.area.col_start()
    }

    #[must_use]
    pub const fn col_end(&self) -> u16 {
        self.area.col_end()
    }

    #[must_use]
    pub const fn row_start(&self) -> u16 {
        self.area.row_start()
    }

    #[must_use]
    pub const fn row_end(&self) -> u16 {
        self.area.row_end()
    }
}

/// Fields to merge into an existing item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridItemPatch {
    pub col_start: Option<u16>,
    pub col_end: Option<u16>,
    pub row_start: Option<u16>,
    pub row_end: Option<u16>,
    pub label: Option<String>,
    pub color: Option<String>,
}

impl GridItemPatch {
    /// Replace every line of the item.
    #[must_use]
    pub fn area(area: GridArea) -> Self {
        Self {
            col_start: Some(area.col_start()),
            col_end: Some(area.col_end()),
            row_start: Some(area.row_start()),
            row_end: Some(area.row_end()),
            ..Self::default()
        }
    }

    /// Replace only the end lines.
    #[must_use]
    pub fn ends(col_end: u16, row_end: u16) -> Self {
        Self {
            col_end: Some(col_end),
            row_end: Some(row_end),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge onto `item`, producing the updated copy.
    ///
    /// Fails when the merged lines would violate `1 <= start < end`; the
    /// original item is left untouched in that case.
    pub fn apply_to(&self, item: &GridItem) -> Result<GridItem, GridAreaError> {
        let area = GridArea::new(
            self.col_start.unwrap_or(item.col_start()),
            self.col_end.unwrap_or(item.col_end()),
            self.row_start.unwrap_or(item.row_start()),
            self.row_end.unwrap_or(item.row_end()),
        )?;
        Ok(GridItem {
            id: item.id,
            area,
            label: self.label.clone().unwrap_or_else(|| item.label.clone()),
            color: self.color.clone().unwrap_or_else(|| item.color.clone()),
        })
    }
}
