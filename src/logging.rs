//! Logger set-up for the binary and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages from this crate are printed.
/// Otherwise only info level and above are shown. `RUST_LOG` always wins.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}

/// Returns the filter directive used when `RUST_LOG` is unset.
///
/// Verbose mode only raises this crate to `debug`; the render backends stay at
/// `warn` because they are noisy at lower levels.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("{level},tomhawk={level},wgpu=warn,naga=warn")
}
