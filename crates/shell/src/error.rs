// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fatal interpreter errors.
//!
//! User input mistakes never reach these types: they are printed where they
//! are detected and the read loop continues.

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use thiserror::Error;

/// Errors raised while collecting child status changes.
#[derive(Debug, Error)]
pub enum ReapError {
    #[error("waitpid error: {0}")]
    Wait(#[from] Errno),

    /// A status the reaper has no rule for (ptrace events, continued).
    #[error("waitpid error: unexpected status {0:?}")]
    UnexpectedStatus(WaitStatus),
}

/// Errors that terminate the interpreter.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The OS refused to create a process.
    #[error("fork error: failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("failed to install {signal:?} handler: {source}")]
    SignalInstall {
        signal: Signal,
        source: std::io::Error,
    },

    #[error("kill error: failed to send {signal:?} to process group {pgid}: {errno}")]
    Kill {
        signal: Signal,
        pgid: Pid,
        errno: Errno,
    },

    #[error(transparent)]
    Reap(#[from] ReapError),

    #[error("failed to read command line: {0}")]
    Input(#[source] std::io::Error),
}
