#![forbid(unsafe_code)]

//! Grid configuration: column/row track counts and the gap between tracks.
//!
//! A [`GridConfiguration`] is only ever constructed through validation, so
//! every value reaching the placement engine already satisfies the bounds
//! below. Hosts feeding numeric form input should call
//! [`GridConfiguration::new`] and drop the update on `Err`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{GridArea, GridCell};

/// Smallest accepted column or row count.
pub const MIN_TRACKS: u16 = 1;

/// Largest accepted column or row count.
pub const MAX_TRACKS: u16 = 100;

/// Largest accepted gap in pixels.
pub const MAX_GAP: u16 = 50;

/// Validated grid track counts and gap.
///
/// # Invariants
///
/// - `MIN_TRACKS <= columns <= MAX_TRACKS`
/// - `MIN_TRACKS <= rows <= MAX_TRACKS`
/// - `gap <= MAX_GAP`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridConfigurationRepr", into = "GridConfigurationRepr")]
pub struct GridConfiguration {
    columns: u16,
    rows: u16,
    gap: u16,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GridConfigurationRepr {
    columns: u16,
    rows: u16,
    gap: u16,
}

impl TryFrom<GridConfigurationRepr> for GridConfiguration {
    type Error = GridConfigError;

    fn try_from(raw: GridConfigurationRepr) -> Result<Self, Self::Error> {
        Self::new(raw.columns, raw.rows, raw.gap)
    }
}

impl From<GridConfiguration> for GridConfigurationRepr {
    fn from(config: GridConfiguration) -> Self {
        Self {
            columns: config.columns,
            rows: config.rows,
            gap: config.gap,
        }
    }
}

impl Default for GridConfiguration {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 8,
            gap: 10,
        }
    }
}

impl GridConfiguration {
    /// Build a configuration, rejecting out-of-range values.
    pub fn new(columns: u16, rows: u16, gap: u16) -> Result<Self, GridConfigError> {
        if !(MIN_TRACKS..=MAX_TRACKS).contains(&columns) {
            return Err(GridConfigError::ColumnsOutOfRange { columns });
        }
        if !(MIN_TRACKS..=MAX_TRACKS).contains(&rows) {
            return Err(GridConfigError::RowsOutOfRange { rows });
        }
        if gap > MAX_GAP {
            return Err(GridConfigError::GapOutOfRange { gap });
        }
        Ok(Self { columns, rows, gap })
    }

    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Gap between adjacent tracks, in pixels.
    #[must_use]
    pub const fn gap(&self) -> u16 {
        self.gap
    }

    /// Replace the column count.
    pub fn with_columns(self, columns: u16) -> Result<Self, GridConfigError> {
        Self::new(columns, self.rows, self.gap)
    }

    /// Replace the row count.
    pub fn with_rows(self, rows: u16) -> Result<Self, GridConfigError> {
        Self::new(self.columns, rows, self.gap)
    }

    /// Replace the gap.
    pub fn with_gap(self, gap: u16) -> Result<Self, GridConfigError> {
        Self::new(self.columns, self.rows, gap)
    }

    /// Number of cells in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.columns as u32 * self.rows as u32
    }

    /// Whether a cell lies inside the grid.
    #[must_use]
    pub const fn contains_cell(&self, cell: GridCell) -> bool {
        cell.row >= 1 && cell.row <= self.rows && cell.col >= 1 && cell.col <= self.columns
    }

    /// Whether an area's end lines stay within `count + 1` on both axes.
    ///
    /// Areas left behind by a shrinking configuration fail this check; the
    /// engine keeps them as-is rather than correcting them.
    #[must_use]
    pub const fn contains_area(&self, area: &GridArea) -> bool {
        area.col_end() <= self.columns + 1 && area.row_end() <= self.rows + 1
    }

    /// Iterate every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let columns = self.columns;
        (1..=self.rows)
            .flat_map(move |row| (1..=columns).map(move |col| GridCell::new(row, col)))
    }

    /// Nearest in-grid cell.
    #[must_use]
    pub fn clamp_cell(&self, cell: GridCell) -> GridCell {
        GridCell::new(cell.row.clamp(1, self.rows), cell.col.clamp(1, self.columns))
    }
}

/// Out-of-range configuration input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridConfigError {
    ColumnsOutOfRange { columns: u16 },
    RowsOutOfRange { rows: u16 },
    GapOutOfRange { gap: u16 },
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnsOutOfRange { columns } => write!(
                f,
                "columns must be in {MIN_TRACKS}..={MAX_TRACKS} (got {columns})"
            ),
            Self::RowsOutOfRange { rows } => {
                write!(f, "rows must be in {MIN_TRACKS}..={MAX_TRACKS} (got {rows})")
            }
            Self::GapOutOfRange { gap } => write!(f, "gap must be in 0..={MAX_GAP} (got {gap})"),
        }
    }
}

impl std::error::Error for GridConfigError {}
