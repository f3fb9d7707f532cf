//! Input/output: errors, constants, logging and the command-line front end

/// Command-line arguments and the session that applies them
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Logger initialization
pub mod logging;
