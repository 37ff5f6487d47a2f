// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

pub const LOG_FILE_NAME: &str = "guess5.log";

/// Map the `-v` count to a level. Warnings are always on because that is
/// where recovered storage and word-source failures are reported.
#[must_use]
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. `RUST_LOG` overrides the verbosity flag.
///
/// With `log_dir` set, output is appended to `guess5.log` in that directory
/// instead of stderr, which the full-screen interface owns while running.
pub fn init_logging(verbose: u8, log_dir: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(level_for_verbosity(verbose));
    builder.parse_default_env();

    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE_NAME))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // A logger may already be installed (tests, embedding); keep it.
    let _ = builder.try_init();
    Ok(())
}
