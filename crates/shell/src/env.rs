// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the shell crate.

use std::time::Duration;
use tsh_core::DEFAULT_MAX_JOBS;

/// Upper bound accepted from `TSH_MAX_JOBS`.
pub const MAX_JOBS_LIMIT: usize = 1024;

/// Job table capacity (default 16, configurable via `TSH_MAX_JOBS`).
pub fn max_jobs() -> usize {
    std::env::var("TSH_MAX_JOBS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .map(|n| n.clamp(1, MAX_JOBS_LIMIT))
        .unwrap_or(DEFAULT_MAX_JOBS)
}

/// Fallback re-check interval for foreground waits (default 1s, `TSH_FG_POLL_MS`).
pub fn fg_poll() -> Duration {
    std::env::var("TSH_FG_POLL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(1))
}

/// Tracing filter directive override.
pub fn log_filter() -> Option<String> {
    std::env::var("TSH_LOG").ok().filter(|s| !s.is_empty())
}
