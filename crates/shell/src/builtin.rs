// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in commands: `quit`, `jobs`, `bg`, `fg`.

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use thiserror::Error;
use tracing::{debug, warn};
use tsh_core::{Jid, Job, JobState, JobTable, Pid};

use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::jobs::Jobs;
use crate::output::Output;
use crate::wait::wait_foreground;

/// A recognized builtin and its raw target argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin<'a> {
    Quit,
    Jobs,
    Bg(Option<&'a str>),
    Fg(Option<&'a str>),
}

impl<'a> Builtin<'a> {
    /// Recognize `argv` as a builtin; `None` means launch it as a program.
    pub fn recognize(argv: &'a [String]) -> Option<Self> {
        let target = argv.get(1).map(String::as_str);
        match argv.first()?.as_str() {
            "quit" => Some(Builtin::Quit),
            "jobs" => Some(Builtin::Jobs),
            "bg" => Some(Builtin::Bg(target)),
            "fg" => Some(Builtin::Fg(target)),
            _ => None,
        }
    }
}

/// How the read loop proceeds after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Target of `bg`/`fg`: `%jid` or a bare pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobRef {
    Jid(Jid),
    Pid(Pid),
}

/// User input errors from `bg`/`fg`. Printed verbatim; never fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobRefError {
    #[error("{command} command requires PID or %jobid argument")]
    Missing { command: &'static str },

    #[error("{command}: argument must be a pid or %jobid")]
    NotNumeric { command: &'static str },

    #[error("{arg}: no such job")]
    NoSuchJob { arg: String },

    #[error("({arg}): no such process")]
    NoSuchProcess { arg: String },
}

impl JobRef {
    /// Parse the argument given to `command`.
    pub fn parse(command: &'static str, arg: Option<&str>) -> Result<Self, JobRefError> {
        let arg = arg.ok_or(JobRefError::Missing { command })?;
        let not_numeric = || JobRefError::NotNumeric { command };

        match arg.strip_prefix('%') {
            Some(digits) => parse_digits(digits)
                .map(|n| JobRef::Jid(Jid::new(n)))
                .ok_or_else(not_numeric),
            None => parse_digits(arg)
                .and_then(|n| i32::try_from(n).ok())
                .map(|n| JobRef::Pid(Pid::from_raw(n)))
                .ok_or_else(not_numeric),
        }
    }

    /// Find the referenced job. `arg` is echoed in the error message.
    pub fn resolve<'t>(&self, table: &'t JobTable, arg: &str) -> Result<&'t Job, JobRefError> {
        match *self {
            JobRef::Jid(jid) => table.find_by_jid(jid).ok_or_else(|| JobRefError::NoSuchJob {
                arg: arg.to_string(),
            }),
            JobRef::Pid(pid) => table
                .find_by_pid(pid)
                .ok_or_else(|| JobRefError::NoSuchProcess { arg: arg.to_string() }),
        }
    }
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Run a builtin.
pub async fn run(
    builtin: Builtin<'_>,
    jobs: &Jobs,
    config: &ShellConfig,
    out: &Output,
) -> Result<Flow, ShellError> {
    match builtin {
        Builtin::Quit => return Ok(Flow::Quit),
        Builtin::Jobs => list_jobs(jobs, out),
        Builtin::Bg(arg) => resume(jobs, "bg", arg, JobState::Background, config, out).await?,
        Builtin::Fg(arg) => resume(jobs, "fg", arg, JobState::Foreground, config, out).await?,
    }
    Ok(Flow::Continue)
}

/// Print every live job. The reaper may act between this snapshot and the
/// next prompt, so the listing is only as fresh as the last reaped signal.
pub fn list_jobs(jobs: &Jobs, out: &Output) {
    for job in jobs.snapshot() {
        out.line(job.listing());
    }
}

/// `bg`/`fg`: continue the job's process group and move it to `state`.
async fn resume(
    jobs: &Jobs,
    command: &'static str,
    arg: Option<&str>,
    state: JobState,
    config: &ShellConfig,
    out: &Output,
) -> Result<(), ShellError> {
    let target = match JobRef::parse(command, arg) {
        Ok(target) => target,
        Err(e) => {
            out.line(e);
            return Ok(());
        }
    };

    let job = {
        let mut table = jobs.lock();
        let job = match target.resolve(&table, arg.unwrap_or_default()) {
            Ok(job) => job.clone(),
            Err(e) => {
                out.line(e);
                return Ok(());
            }
        };

        match killpg(job.pid, Signal::SIGCONT) {
            Ok(()) => {}
            Err(Errno::ESRCH) => {
                // Exited but not yet reaped; the reaper will remove it.
                warn!(jid = %job.jid, pid = %job.pid, "job vanished before it could be resumed");
                return Ok(());
            }
            Err(errno) => {
                return Err(ShellError::Kill {
                    signal: Signal::SIGCONT,
                    pgid: job.pid,
                    errno,
                })
            }
        }

        if let Err(e) = table.set_state(job.pid, state) {
            out.line(e);
            return Ok(());
        }
        debug!(jid = %job.jid, pid = %job.pid, ?state, "job resumed");
        Job { state, ..job }
    };
    jobs.notify();

    match state {
        JobState::Foreground => wait_foreground(jobs, job.pid, config.fg_poll).await,
        _ => out.line(job.announcement()),
    }
    Ok(())
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;
