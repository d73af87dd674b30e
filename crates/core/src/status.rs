// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child status changes as reported by the OS.

use nix::sys::signal::Signal;
use nix::unistd::Pid;

/// A single status change collected for a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    /// Exited normally with the given code.
    Exited { pid: Pid, code: i32 },
    /// Terminated by an uncaught signal.
    Signaled { pid: Pid, signal: Signal },
    /// Stopped by a signal; still alive.
    Stopped { pid: Pid, signal: Signal },
}

impl ChildStatus {
    pub fn pid(&self) -> Pid {
        match self {
            ChildStatus::Exited { pid, .. }
            | ChildStatus::Signaled { pid, .. }
            | ChildStatus::Stopped { pid, .. } => *pid,
        }
    }
}
