// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground wait.

use std::time::Duration;
use tracing::debug;
use tsh_core::Pid;

use crate::jobs::Jobs;

/// Block until `pid` leaves the foreground (removed, stopped, or demoted).
///
/// Wakes on every table change and, failing that, re-checks every `recheck`.
/// Only reads the table; the reaper performs the transition.
pub async fn wait_foreground(jobs: &Jobs, pid: Pid, recheck: Duration) {
    let mut changes = jobs.subscribe();
    while jobs.is_foreground(pid) {
        // `Jobs` owns the sender, so `changed` cannot fail while it is borrowed.
        let _ = tokio::time::timeout(recheck, changes.changed()).await;
    }
    debug!(%pid, "left foreground");
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
