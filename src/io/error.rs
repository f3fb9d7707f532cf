//! Error types for grid, cell and command-line operations

use std::fmt;

use crate::geometry::formula::Measurement;
use crate::spatial::location::{Location, Scope};

/// Main error type for all grid and cell operations
#[derive(Debug)]
pub enum GridError {
    /// Requested grid dimensions are not positive or overflow
    InvalidDimensions {
        /// Requested width
        width: i64,
        /// Requested height
        height: i64,
        /// Requested number of layers
        layers: i64,
    },

    /// Operation needs a grid that has been created first
    NotCreated {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Location falls outside the current grid scope
    OutOfRange {
        /// The rejected location
        location: Location,
        /// Scope the location was checked against
        scope: Scope,
    },

    /// A piece with this name is already on the grid
    DuplicateName {
        /// Name of the existing piece
        name: String,
    },

    /// The object is already placed under another name
    DuplicateObject {
        /// Name the object is currently registered under
        existing: String,
    },

    /// Location already holds as many pieces as it may
    CellFull {
        /// Location that is full
        location: Location,
        /// Maximum occupants allowed at that location
        capacity: usize,
    },

    /// No piece with this name is on the grid
    PieceNotFound {
        /// Name that was looked up
        name: String,
    },

    /// No formula registered for the measurement
    FormulaUndefined {
        /// Measurement that was requested
        measurement: Measurement,
    },

    /// The formula needs an input that has not been measured
    MissingMeasurement {
        /// Measurement that was requested
        measurement: Measurement,
        /// Input names the formula requires
        required: Vec<String>,
        /// Input names currently set on the cell
        available: Vec<String>,
    },

    /// The formula's strategy cannot be evaluated over its inputs
    InvalidFormula {
        /// Measurement that was requested
        measurement: Measurement,
        /// Why evaluation failed
        reason: String,
    },

    /// A measurement value could not be coerced to an integer
    InvalidMeasurement {
        /// Name of the measurement input
        name: String,
    },

    /// A measurement update contained no values
    EmptyMeasurements,

    /// Operation needs a cell attached to the grid
    NoCell {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Every piece handle has been issued
    HandlesExhausted,

    /// Serialized grid state is inconsistent
    InvalidSnapshot {
        /// Description of the inconsistency
        reason: String,
    },

    /// Command-line value could not be parsed
    InvalidArgument {
        /// Name of the argument
        argument: &'static str,
        /// Provided value that failed to parse
        value: String,
        /// Explanation of the expected format
        reason: String,
    },

    /// Snapshot could not be encoded
    Serialization {
        /// Underlying serde error
        source: serde_json::Error,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions {
                width,
                height,
                layers,
            } => {
                write!(
                    f,
                    "Invalid grid dimensions {width}x{height}x{layers}: every axis must be at least 1"
                )
            }
            Self::NotCreated { operation } => {
                write!(f, "Cannot {operation}: the grid has not been created")
            }
            Self::OutOfRange { location, scope } => {
                write!(f, "Location {location} is out of range for grid scope {scope}")
            }
            Self::DuplicateName { name } => {
                write!(f, "Game piece '{name}' already exists")
            }
            Self::DuplicateObject { existing } => {
                write!(f, "Object is already placed on the grid as '{existing}'")
            }
            Self::CellFull { location, capacity } => {
                write!(
                    f,
                    "Location {location} is full (holds at most {capacity} piece(s))"
                )
            }
            Self::PieceNotFound { name } => {
                write!(f, "Game piece '{name}' does not exist on the grid")
            }
            Self::FormulaUndefined { measurement } => {
                write!(f, "No formula to calculate {measurement} has been defined")
            }
            Self::MissingMeasurement {
                measurement,
                required,
                available,
            } => {
                write!(
                    f,
                    "Unable to calculate {measurement}: requires [{}], currently set [{}]",
                    required.join(", "),
                    available.join(", ")
                )
            }
            Self::InvalidFormula {
                measurement,
                reason,
            } => {
                write!(f, "Formula for {measurement} cannot be evaluated: {reason}")
            }
            Self::InvalidMeasurement { name } => {
                write!(f, "Measurement '{name}' is not a valid integer")
            }
            Self::EmptyMeasurements => {
                write!(f, "At least one measurement must be provided")
            }
            Self::NoCell { operation } => {
                write!(f, "Cannot {operation}: no cell is attached to the grid")
            }
            Self::HandlesExhausted => {
                write!(f, "No piece handles are left to issue")
            }
            Self::InvalidSnapshot { reason } => {
                write!(f, "Invalid grid snapshot: {reason}")
            }
            Self::InvalidArgument {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid argument '{argument}' = '{value}': {reason}")
            }
            Self::Serialization { source } => {
                write!(f, "Failed to encode grid snapshot: {source}")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization { source } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { source: err }
    }
}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

/// Create an invalid argument error
pub fn invalid_argument(
    argument: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidArgument {
        argument,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid snapshot error
pub fn invalid_snapshot(reason: &impl ToString) -> GridError {
    GridError::InvalidSnapshot {
        reason: reason.to_string(),
    }
}
