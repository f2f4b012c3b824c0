#![forbid(unsafe_code)]

//! Geometric primitives for the grid editor.
//!
//! Two coordinate spaces meet here:
//!
//! - **Line space**: placements are expressed in 1-based grid lines. A span
//!   from line `s` to line `e` covers `e - s` tracks ([`GridArea`]).
//! - **Pixel space**: pointer input arrives as floating-point pixels
//!   ([`Point`]), either in client coordinates or relative to the container
//!   origin ([`ContainerBounds::to_local`]).
//!
//! [`cell_size`] and [`pixel_to_line`] bridge the two.
//!
//! # Approximation
//!
//! `pixel_to_line` spreads the total gap evenly across every track
//! (`gap * (count - 1) / count` per track). A rendering engine snaps each
//! track to whole device pixels and places gaps only *between* tracks, so the
//! mapping can be off by one near track boundaries. It is a best-effort
//! inverse, not a pixel-perfect one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Floor applied to derived cell sizes, in pixels.
///
/// Keeps cell sizes positive when the container is smaller than the gap
/// budget, so line mapping never divides by zero.
pub const MIN_CELL_PX: f64 = 10.0;

/// Grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Column,
    Row,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column => f.write_str("column"),
            Self::Row => f.write_str("row"),
        }
    }
}

// ---------------------------------------------------------------------------
// Line space
// ---------------------------------------------------------------------------

/// A single grid cell, addressed by its 1-based row and column.
///
/// Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u16,
    pub col: u16,
}

impl GridCell {
    #[inline]
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// A rectangular placement in grid lines, end-exclusive on both axes.
///
/// # Invariants
///
/// `1 <= col_start < col_end` and `1 <= row_start < row_end`. Upper bounds
/// depend on the grid configuration and are enforced by callers that clamp
/// against it, not by the area itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridAreaRepr", into = "GridAreaRepr")]
pub struct GridArea {
    col_start: u16,
    col_end: u16,
    row_start: u16,
    row_end: u16,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridAreaRepr {
    col_start: u16,
    col_end: u16,
    row_start: u16,
    row_end: u16,
}

impl TryFrom<GridAreaRepr> for GridArea {
    type Error = GridAreaError;

    fn try_from(raw: GridAreaRepr) -> Result<Self, Self::Error> {
        Self::new(raw.col_start, raw.col_end, raw.row_start, raw.row_end)
    }
}

impl From<GridArea> for GridAreaRepr {
    fn from(area: GridArea) -> Self {
        Self {
            col_start: area.col_start,
            col_end: area.col_end,
            row_start: area.row_start,
            row_end: area.row_end,
        }
    }
}

impl GridArea {
    /// Build an area from column and row line pairs.
    pub fn new(
        col_start: u16,
        col_end: u16,
        row_start: u16,
        row_end: u16,
    ) -> Result<Self, GridAreaError> {
        check_span(Axis::Column, col_start, col_end)?;
        check_span(Axis::Row, row_start, row_end)?;
        Ok(Self {
            col_start,
            col_end,
            row_start,
            row_end,
        })
    }

    /// A 1×1 area covering `cell`.
    ///
    /// Coordinates are clamped to `1..=u16::MAX - 1` so the end line always
    /// exists and the span is never empty.
    #[must_use]
    pub fn cell(cell: GridCell) -> Self {
        let row = cell.row.clamp(1, u16::MAX - 1);
        let col = cell.col.clamp(1, u16::MAX - 1);
        Self {
            col_start: col,
            col_end: col + 1,
            row_start: row,
            row_end: row + 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn col_start(&self) -> u16 {
        self.col_start
    }

    #[inline]
    #[must_use]
    pub const fn col_end(&self) -> u16 {
        self.col_end
    }

    #[inline]
    #[must_use]
    pub const fn row_start(&self) -> u16 {
        self.row_start
    }

    #[inline]
    #[must_use]
    pub const fn row_end(&self) -> u16 {
        self.row_end
    }

    /// Number of columns covered.
    #[inline]
    #[must_use]
    pub const fn col_span(&self) -> u16 {
        self.col_end - self.col_start
    }

    /// Number of rows covered.
    #[inline]
    #[must_use]
    pub const fn row_span(&self) -> u16 {
        self.row_end - self.row_start
    }

    /// Number of cells covered.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.col_span() as u32 * self.row_span() as u32
    }

    /// Top-left cell of the area.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> GridCell {
        GridCell::new(self.row_start, self.col_start)
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, cell: GridCell) -> bool {
        cell.col >= self.col_start
            && cell.col < self.col_end
            && cell.row >= self.row_start
            && cell.row < self.row_end
    }

    /// Whether two areas share at least one cell.
    #[must_use]
    pub const fn overlaps(&self, other: &GridArea) -> bool {
        self.col_start < other.col_end
            && other.col_start < self.col_end
            && self.row_start < other.row_end
            && other.row_start < self.row_end
    }

    /// Iterate the footprint in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let (c0, c1) = (self.col_start, self.col_end);
        (self.row_start..self.row_end)
            .flat_map(move |row| (c0..c1).map(move |col| GridCell::new(row, col)))
    }

    /// Same span, moved so its top-left corner sits on the given lines.
    pub fn moved_to(&self, col_start: u16, row_start: u16) -> Result<Self, GridAreaError> {
        Self::new(
            col_start,
            col_start.saturating_add(self.col_span()),
            row_start,
            row_start.saturating_add(self.row_span()),
        )
    }

    /// Same start lines, with new end lines.
    pub fn with_ends(&self, col_end: u16, row_end: u16) -> Result<Self, GridAreaError> {
        Self::new(self.col_start, col_end, self.row_start, row_end)
    }
}

fn check_span(axis: Axis, start: u16, end: u16) -> Result<(), GridAreaError> {
    if start == 0 {
        return Err(GridAreaError::ZeroLine { axis });
    }
    if end <= start {
        return Err(GridAreaError::EmptySpan { axis, start, end });
    }
    Ok(())
}

/// Line pairs that violate `1 <= start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAreaError {
    ZeroLine { axis: Axis },
    EmptySpan { axis: Axis, start: u16, end: u16 },
}

impl fmt::Display for GridAreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLine { axis } => write!(f, "{axis} lines are 1-based (got 0)"),
            Self::EmptySpan { axis, start, end } => {
                write!(f, "{axis} span {start} / {end} must satisfy start < end")
            }
        }
    }
}

impl std::error::Error for GridAreaError {}

// ---------------------------------------------------------------------------
// Pixel space
// ---------------------------------------------------------------------------

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[inline]
    #[must_use]
    pub fn minus(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise `self + other`.
    #[inline]
    #[must_use]
    pub fn plus(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// Measured position and size of the rendering surface, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerBounds {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds anchored at the client origin.
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Convert a client-space point into container-relative pixels.
    #[inline]
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        client.minus(self.origin())
    }
}

/// Derived per-cell pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            cell_width: MIN_CELL_PX,
            cell_height: MIN_CELL_PX,
        }
    }
}

impl CellGeometry {
    /// Cell sizes for `container` under `config`, floored at `min_cell`.
    #[must_use]
    pub fn measure(
        container: &ContainerBounds,
        config: &crate::config::GridConfiguration,
        min_cell: f64,
    ) -> Self {
        let min_cell = if min_cell.is_finite() && min_cell > 0.0 {
            min_cell
        } else {
            MIN_CELL_PX
        };
        Self {
            cell_width: track_size(container.width, config.columns(), config.gap(), min_cell),
            cell_height: track_size(container.height, config.rows(), config.gap(), min_cell),
        }
    }

    /// Container-relative top-left pixel of an area's first cell.
    ///
    /// Uses the same even track model as [`pixel_to_line`] and shares its
    /// approximation.
    #[must_use]
    pub fn area_origin(&self, area: &GridArea, gap: u16) -> Point {
        let gap = f64::from(gap);
        Point::new(
            f64::from(area.col_start() - 1) * (self.cell_width + gap),
            f64::from(area.row_start() - 1) * (self.cell_height + gap),
        )
    }
}

/// Per-cell pixel size for both axes.
///
/// `cell = max(MIN_CELL_PX, (container - (count - 1) * gap) / count)`,
/// computed independently for width and height.
#[must_use]
pub fn cell_size(
    container_width: f64,
    container_height: f64,
    columns: u16,
    rows: u16,
    gap: u16,
) -> (f64, f64) {
    (
        track_size(container_width, columns, gap, MIN_CELL_PX),
        track_size(container_height, rows, gap, MIN_CELL_PX),
    )
}

fn track_size(extent: f64, count: u16, gap: u16, min_cell: f64) -> f64 {
    let count = count.max(1);
    let gaps = f64::from(count - 1) * f64::from(gap);
    // f64::max ignores a NaN operand, so a NaN extent floors to min_cell.
    min_cell.max((extent - gaps) / f64::from(count))
}

/// Map a container-relative pixel offset to a 1-based line in `[1, count]`.
///
/// The offset is divided by the effective per-track stride
/// `cell + gap * (count - 1) / count`, rounded to the nearest integer, and
/// shifted to 1-based numbering. See the module docs for why this is an
/// approximation.
#[must_use]
pub fn pixel_to_line(pixel_offset: f64, cell_size: f64, gap: u16, count: u16) -> u16 {
    let count = count.max(1);
    let n = f64::from(count);
    let stride = cell_size + f64::from(gap) * (n - 1.0) / n;
    if pixel_offset.is_nan() || stride.is_nan() || stride <= 0.0 {
        return 1;
    }
    let line = round_half_up(pixel_offset / stride) + 1.0;
    line.clamp(1.0, n) as u16
}

/// Whole-track delta for a pixel delta, rounded to nearest.
///
/// Non-finite input saturates (NaN maps to 0).
#[must_use]
pub fn line_delta(pixel_delta: f64, cell_size: f64) -> i32 {
    if cell_size <= 0.0 {
        return 0;
    }
    round_half_up(pixel_delta / cell_size) as i32
}

/// Round to nearest, with exact halves going towards positive infinity
/// (`-2.5` rounds to `-2`).
#[inline]
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfiguration;

    #[test]
    fn area_rejects_zero_and_empty_spans() {
        assert_eq!(
            GridArea::new(0, 2, 1, 2),
            Err(GridAreaError::ZeroLine { axis: Axis::Column })
        );
        assert_eq!(
            GridArea::new(1, 2, 3, 3),
            Err(GridAreaError::EmptySpan {
                axis: Axis::Row,
                start: 3,
                end: 3
            })
        );
    }

    #[test]
    fn single_cell_area() {
        let area = GridArea::cell(GridCell::new(2, 5));
        assert_eq!(area.col_start(), 5);
        assert_eq!(area.col_end(), 6);
        assert_eq!(area.row_start(), 2);
        assert_eq!(area.row_end(), 3);
        assert_eq!(area.area(), 1);
        assert!(area.contains(GridCell::new(2, 5)));
        assert!(!area.contains(GridCell::new(2, 6)));
    }

    #[test]
    fn zero_cell_is_raised_to_first_line() {
        let area = GridArea::cell(GridCell::new(0, 0));
        assert_eq!(area.origin(), GridCell::new(1, 1));
    }

    #[test]
    fn last_representable_cell_keeps_a_unit_span() {
        let area = GridArea::cell(GridCell::new(u16::MAX, u16::MAX));
        assert_eq!((area.col_start(), area.col_end()), (u16::MAX - 1, u16::MAX));
        assert_eq!((area.row_start(), area.row_end()), (u16::MAX - 1, u16::MAX));
        assert_eq!((area.col_span(), area.row_span()), (1, 1));
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(serde_json::from_str::<GridArea>(&json).unwrap(), area);
    }

    #[test]
    fn footprint_iterates_every_cell() {
        let area = GridArea::new(2, 4, 1, 3).unwrap();
        let cells: Vec<_> = area.cells().collect();
        assert_eq!(
            cells,
            vec![
                GridCell::new(1, 2),
                GridCell::new(1, 3),
                GridCell::new(2, 2),
                GridCell::new(2, 3),
            ]
        );
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = GridArea::new(1, 3, 1, 3).unwrap();
        let b = GridArea::new(2, 4, 2, 4).unwrap();
        let c = GridArea::new(3, 4, 1, 2).unwrap();
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!(!a.overlaps(&c) && !c.overlaps(&a));
    }

    #[test]
    fn moved_to_keeps_span() {
        let area = GridArea::new(1, 4, 2, 3).unwrap();
        let moved = area.moved_to(10, 5).unwrap();
        assert_eq!((moved.col_start(), moved.col_end()), (10, 13));
        assert_eq!((moved.row_start(), moved.row_end()), (5, 6));
    }

    #[test]
    fn area_json_uses_camel_case() {
        let area = GridArea::new(1, 4, 2, 3).unwrap();
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(json, r#"{"colStart":1,"colEnd":4,"rowStart":2,"rowEnd":3}"#);
        let empty = r#"{"colStart":4,"colEnd":4,"rowStart":1,"rowEnd":2}"#;
        assert!(serde_json::from_str::<GridArea>(empty).is_err());
    }

    #[test]
    fn cell_size_subtracts_gaps() {
        let (w, h) = cell_size(1210.0, 870.0, 12, 8, 10);
        assert!((w - 91.666_666).abs() < 1e-3);
        assert!((h - 100.0).abs() < 1e-9);
    }

    #[test]
    fn cell_size_floors_degenerate_containers() {
        let (w, h) = cell_size(50.0, 0.0, 12, 8, 50);
        assert_eq!(w, MIN_CELL_PX);
        assert_eq!(h, MIN_CELL_PX);

        let (w, _) = cell_size(f64::NAN, 100.0, 4, 4, 0);
        assert_eq!(w, MIN_CELL_PX);
    }

    #[test]
    fn measure_uses_custom_floor() {
        let config = GridConfiguration::new(10, 10, 0).unwrap();
        let cells = CellGeometry::measure(&ContainerBounds::from_size(20.0, 20.0), &config, 4.0);
        assert_eq!(cells.cell_width, 4.0);
        let fallback =
            CellGeometry::measure(&ContainerBounds::from_size(20.0, 20.0), &config, -1.0);
        assert_eq!(fallback.cell_height, MIN_CELL_PX);
    }

    #[test]
    fn pixel_to_line_maps_track_origins() {
        // stride = 90 + 10 * 11 / 12 ≈ 99.17
        assert_eq!(pixel_to_line(0.0, 90.0, 10, 12), 1);
        assert_eq!(pixel_to_line(100.0, 90.0, 10, 12), 2);
        assert_eq!(pixel_to_line(495.0, 90.0, 10, 12), 6);
    }

    #[test]
    fn pixel_to_line_clamps_both_ends() {
        assert_eq!(pixel_to_line(-500.0, 90.0, 10, 12), 1);
        assert_eq!(pixel_to_line(1.0e9, 90.0, 10, 12), 12);
        assert_eq!(pixel_to_line(f64::INFINITY, 90.0, 10, 12), 12);
        assert_eq!(pixel_to_line(f64::NEG_INFINITY, 90.0, 10, 12), 1);
        assert_eq!(pixel_to_line(f64::NAN, 90.0, 10, 12), 1);
    }

    #[test]
    fn pixel_to_line_tolerates_bad_cell_size() {
        assert_eq!(pixel_to_line(100.0, 0.0, 0, 4), 1);
        assert_eq!(pixel_to_line(100.0, -3.0, 0, 4), 1);
    }

    #[test]
    fn line_delta_rounds_to_nearest() {
        assert_eq!(line_delta(0.0, 50.0), 0);
        assert_eq!(line_delta(24.9, 50.0), 0);
        assert_eq!(line_delta(25.0, 50.0), 1);
        assert_eq!(line_delta(-74.0, 50.0), -1);
        assert_eq!(line_delta(-76.0, 50.0), -2);
        assert_eq!(line_delta(10.0, 0.0), 0);
        assert_eq!(line_delta(f64::NAN, 10.0), 0);
    }

    #[test]
    fn round_half_up_breaks_ties_upwards() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn area_origin_follows_tracks() {
        let cells = CellGeometry {
            cell_width: 90.0,
            cell_height: 50.0,
        };
        let area = GridArea::new(3, 4, 2, 3).unwrap();
        assert_eq!(cells.area_origin(&area, 10), Point::new(200.0, 60.0));
    }

    #[test]
    fn container_to_local() {
        let bounds = ContainerBounds::new(40.0, 100.0, 800.0, 600.0);
        assert_eq!(bounds.to_local(Point::new(50.0, 90.0)), Point::new(10.0, -10.0));
    }
}
