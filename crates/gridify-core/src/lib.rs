#![forbid(unsafe_code)]

//! Core: grid configuration, line areas, and pixel geometry for Gridify.
//!
//! # Role in Gridify
//! `gridify-core` is the leaf crate. It owns the validated
//! [`GridConfiguration`], the line-space [`GridArea`] used by every
//! placement, and the Geometry Engine that maps pointer pixels onto grid
//! lines.
//!
//! # How it fits in the system
//! `gridify-layout` builds the placement store, gesture controller,
//! occupancy scanner and code projector on top of these types. Nothing here
//! holds mutable state; every function is a pure mapping of its inputs.

pub mod config;
pub mod geometry;
pub mod settings;

pub use config::{GridConfigError, GridConfiguration, MAX_GAP, MAX_TRACKS, MIN_TRACKS};
pub use geometry::{
    Axis, CellGeometry, ContainerBounds, GridArea, GridAreaError, GridCell, MIN_CELL_PX, Point,
    cell_size, line_delta, pixel_to_line, round_half_up,
};
pub use settings::{EditorSettings, SettingsError};
