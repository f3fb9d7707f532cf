//! Spatial core for text role-playing games: named pieces on 2D or 3D grids
//!
//! A [`Grid`] places, moves and removes uniquely named pieces while keeping
//! a decorative surface layer independent of its content. An optional
//! [`Cell`] describes the geometry of each location, derives measurements
//! such as area and volume from registered formulas, and caps how many
//! pieces a location may hold.

#![forbid(unsafe_code)]

/// Cell geometry and measurement formulas
pub mod geometry;
/// Errors, configuration, logging and the command-line front end
pub mod io;
/// Grids, locations, piece registries and rendering
pub mod spatial;

pub use geometry::{Cell, Formula, Measurement, Strategy};
pub use io::error::{GridError, Result};
pub use spatial::{Grid, Location, PieceId, Scope};
