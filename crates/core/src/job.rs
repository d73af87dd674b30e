// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier and state machine.
//!
//! State transitions and the events that drive them:
//!
//! ```text
//! Foreground -> Stopped     ctrl-z (reaper observes the stop)
//! Stopped    -> Foreground  fg
//! Stopped    -> Background  bg
//! Background -> Foreground  fg
//! ```
//!
//! There is no terminal state: a job that exits is removed from the table.

use nix::unistd::Pid;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// User-facing job identifier, shown as `%jid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Jid(u32);

impl Jid {
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Jid {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

/// Controlling state of a live job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    /// Owns the interpreter's attention; the main flow waits on it.
    Foreground,
    /// Running without blocking the main flow.
    Background,
    /// Suspended by a stop signal.
    Stopped,
}

impl JobState {
    pub fn is_foreground(self) -> bool {
        matches!(self, JobState::Foreground)
    }
}

// Listing names: a background job is reported as "Running".
crate::simple_display! {
    JobState {
        Foreground => "Foreground",
        Background => "Running",
        Stopped => "Stopped",
    }
}

/// One tracked process group.
///
/// `pid` is also the process-group id: jobs are always launched as the
/// leader of a fresh group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub pid: Pid,
    pub jid: Jid,
    pub state: JobState,
    pub command_line: String,
}

impl Job {
    /// `[jid] (pid) command_line`, printed when a job starts or resumes in the background.
    pub fn announcement(&self) -> String {
        format!("[{}] ({}) {}", self.jid, self.pid, self.command_line)
    }

    /// `[jid] (pid) StateName command_line`, one line of `jobs` output.
    pub fn listing(&self) -> String {
        format!(
            "[{}] ({}) {} {}",
            self.jid, self.pid, self.state, self.command_line
        )
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
