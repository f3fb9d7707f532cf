//! Spatial data structures for tracking pieces
//!
//! This module contains spatial-related functionality including:
//! - Locations, scopes and the location to storage index mapping
//! - Piece registries and handles
//! - The grid itself, its text rendering and its serializable state

/// Grid of named pieces with surface and content layers
pub mod grid;
/// Coordinates, scopes and index conversion
pub mod location;
/// Piece name, handle and placement bookkeeping
pub mod registry;
/// Text rendering of grid layers
pub mod render;
/// Serializable grid state
pub mod snapshot;

pub use grid::{CellView, Grid};
pub use location::{Location, Scope};
pub use registry::{PieceId, Placement};
pub use snapshot::{GridSnapshot, PieceSnapshot};
