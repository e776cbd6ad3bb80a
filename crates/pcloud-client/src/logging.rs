//! Opt-in tracing subscriber setup.
//!
//! The library only emits `tracing` events; nothing is printed until the
//! embedding application installs a subscriber. [`init`] is a ready-made one.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a global subscriber for the process.
///
/// `verbosity` maps 0..=3 to warn, info, debug and trace; `RUST_LOG`
/// overrides it when set. Request parameters are logged at debug level
/// with the auth token redacted.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(verbosity: u8, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()
    }
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
