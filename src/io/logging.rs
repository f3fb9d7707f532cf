//! Logger setup for the command-line front end

use log::LevelFilter;

/// Map a `-v` count to a level filter
///
/// No flag shows warnings and errors, each extra flag adds one level.
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger
///
/// `RUST_LOG` overrides the level chosen from `verbosity`. Calling this more
/// than once keeps the first logger.
pub fn init(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbosity))
        .format_timestamp_secs()
        .parse_default_env();
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
