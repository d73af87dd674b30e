// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child reaper.
//!
//! Runs on every SIGCHLD. Collects every pending child status without
//! blocking and folds each one into the job table:
//!
//! - stopped: job becomes `Stopped`, a notice names the stopping signal
//! - killed by a signal: a notice names the signal, the job is removed
//! - exited: the job is removed silently
//!
//! A status for a pid the table does not know is logged and skipped.

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use tracing::{debug, warn};
use tsh_core::{ChildStatus, JobState, JobTable};

use crate::error::ReapError;
use crate::jobs::Jobs;
use crate::output::Output;

/// Source of child status changes.
pub trait ChildWaiter {
    /// Next available status change, or `None` once nothing is pending.
    /// Must never block waiting for a child that has not changed yet.
    fn try_wait(&mut self) -> Result<Option<ChildStatus>, ReapError>;
}

/// Collects statuses for any child of this process via `waitpid(-1)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemWaiter;

impl ChildWaiter for SystemWaiter {
    fn try_wait(&mut self) -> Result<Option<ChildStatus>, ReapError> {
        let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED;
        loop {
            match waitpid(Pid::from_raw(-1), Some(flags)) {
                Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => return Ok(None),
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(ReapError::Wait(errno)),
                Ok(status) => return classify(status).map(Some),
            }
        }
    }
}

/// Map a raw wait status onto the three outcomes the reaper handles.
pub fn classify(status: WaitStatus) -> Result<ChildStatus, ReapError> {
    match status {
        WaitStatus::Exited(pid, code) => Ok(ChildStatus::Exited { pid, code }),
        WaitStatus::Signaled(pid, signal, _) => Ok(ChildStatus::Signaled { pid, signal }),
        WaitStatus::Stopped(pid, signal) => Ok(ChildStatus::Stopped { pid, signal }),
        other => Err(ReapError::UnexpectedStatus(other)),
    }
}

/// Counts from one drain pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReapSummary {
    pub removed: usize,
    pub stopped: usize,
    pub untracked: usize,
}

impl ReapSummary {
    /// True when the table was modified.
    pub fn changed(&self) -> bool {
        self.removed + self.stopped > 0
    }
}

/// Apply every pending status from `waiter` to `table`.
pub fn drain(
    table: &mut JobTable,
    waiter: &mut impl ChildWaiter,
    out: &Output,
) -> Result<ReapSummary, ReapError> {
    let mut summary = ReapSummary::default();

    while let Some(status) = waiter.try_wait()? {
        let pid = status.pid();
        let Some(job) = table.find_by_pid_mut(pid) else {
            warn!(%pid, ?status, "status change for untracked child");
            summary.untracked += 1;
            continue;
        };
        let jid = job.jid;

        match status {
            ChildStatus::Stopped { signal, .. } => {
                job.state = JobState::Stopped;
                summary.stopped += 1;
                debug!(%jid, %pid, ?signal, "job stopped");
                out.line(format_args!(
                    "Job [{jid}] ({pid}) stopped by signal {}",
                    signal as i32
                ));
            }
            ChildStatus::Signaled { signal, .. } => {
                table.remove(pid);
                summary.removed += 1;
                debug!(%jid, %pid, ?signal, "job terminated");
                out.line(format_args!(
                    "Job [{jid}] ({pid}) terminated by signal {}",
                    signal as i32
                ));
            }
            ChildStatus::Exited { code, .. } => {
                table.remove(pid);
                summary.removed += 1;
                debug!(%jid, %pid, code, "job exited");
            }
        }
    }

    Ok(summary)
}

/// Drain under the table lock, then wake foreground waits if anything changed.
pub fn reap(
    jobs: &Jobs,
    waiter: &mut impl ChildWaiter,
    out: &Output,
) -> Result<ReapSummary, ReapError> {
    let summary = drain(&mut jobs.lock(), waiter, out)?;
    if summary.changed() {
        jobs.notify();
    }
    Ok(summary)
}

#[cfg(test)]
#[path = "reaper_tests.rs"]
mod tests;
