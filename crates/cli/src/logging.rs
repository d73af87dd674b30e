// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr.
//!
//! Job output owns stdout, so diagnostics never interleave with it.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "tsh=debug,tsh_shell=debug,tsh_core=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. `TSH_LOG` overrides the verbosity flag.
///
/// Fails if a global subscriber is already installed.
pub fn init(verbose: bool) -> Result<(), TryInitError> {
    let directive =
        tsh_shell::env::log_filter().unwrap_or_else(|| default_directive(verbose).to_string());
    let filter = EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish()
        .try_init()
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
