//! Grid constants and runtime configuration defaults

// Coordinate conventions
/// Layer used when a location omits its z coordinate
pub const DEFAULT_LAYER: i64 = 1;

/// Occupancy cap meaning "no limit"
pub const UNLIMITED_OCCUPANTS: i64 = -1;

/// Pieces a location may hold when the grid has no cell attached
pub const CELLLESS_CAPACITY: usize = 1;

// Rendering settings
/// Placeholder printed for a blank surface glyph or an empty location
pub const EMPTY_GLYPH: &str = "-";
/// Printed by the surface renderer before the grid is created
pub const BLANK_SURFACE_MESSAGE: &str = "The grid's surface is blank.";
/// Printed by the content renderer before the grid is created
pub const EMPTY_CONTENT_MESSAGE: &str = "The grid is empty.";

// Default values for command-line parameters
/// Default grid width
pub const DEFAULT_WIDTH: i64 = 3;

/// Default grid height
pub const DEFAULT_HEIGHT: i64 = 3;

/// Default number of layers
pub const DEFAULT_LAYERS: i64 = 1;

/// Default side length used for preset cells
pub const DEFAULT_SIDE_LENGTH: i64 = 5;
