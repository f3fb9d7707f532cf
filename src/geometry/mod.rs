//! Cell geometry and derived measurements

/// Cell shape, capacity and measurement formulas
pub mod cell;
/// Measurement kinds and computation strategies
pub mod formula;

pub use cell::Cell;
pub use formula::{Formula, Measurement, Strategy};
