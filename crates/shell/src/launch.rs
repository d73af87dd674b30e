// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process launcher.
//!
//! Every job runs as the leader of a new process group, so keyboard
//! signals forwarded to a job never reach the interpreter, and a signal
//! sent to the group reaches every process the job spawns.

use std::io;
use std::os::unix::process::CommandExt;
use std::process::Command;
use tracing::{debug, warn};
use tsh_core::{Job, JobState, Pid, TableError};

use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::jobs::Jobs;
use crate::output::Output;
use crate::parse::CommandLine;
use crate::wait::wait_foreground;

/// Outcome of spawning a command.
#[derive(Debug)]
pub enum Spawned {
    /// Running and registered.
    Tracked(Job),
    /// Running, but the table refused it.
    Untracked { pid: Pid, error: TableError },
    /// The program could not be executed.
    NotFound,
}

/// Spawn `argv` in its own process group and register it as `state`.
///
/// The table lock is held from before the spawn until the job is
/// registered, so the reaper cannot collect the child's status first.
// The child handle is dropped on purpose: the SIGCHLD reaper collects it.
#[allow(clippy::zombie_processes)]
pub fn spawn_job(
    jobs: &Jobs,
    argv: &[String],
    state: JobState,
    command_line: &str,
) -> Result<Spawned, ShellError> {
    let Some((program, args)) = argv.split_first() else {
        return Ok(Spawned::NotFound);
    };

    let mut table = jobs.lock();
    let child = match Command::new(program).args(args).process_group(0).spawn() {
        Ok(child) => child,
        Err(e) if is_exec_failure(&e) => {
            debug!(program, error = %e, "exec failed");
            return Ok(Spawned::NotFound);
        }
        Err(source) => {
            return Err(ShellError::Spawn {
                command: program.clone(),
                source,
            })
        }
    };
    let pid = Pid::from_raw(child.id() as i32);

    let registered = table.add(pid, state, command_line).map(|jid| Job {
        pid,
        jid,
        state,
        command_line: command_line.to_string(),
    });
    drop(table);
    jobs.notify();

    match registered {
        Ok(job) => {
            debug!(jid = %job.jid, %pid, ?state, command = command_line, "added job");
            Ok(Spawned::Tracked(job))
        }
        Err(error) => {
            warn!(%pid, %error, "launched process is not tracked");
            Ok(Spawned::Untracked { pid, error })
        }
    }
}

/// Launch a parsed command line.
///
/// A foreground job blocks here until it leaves the foreground; a
/// background job is announced and control returns at once.
pub async fn launch(
    jobs: &Jobs,
    command: &CommandLine,
    config: &ShellConfig,
    out: &Output,
) -> Result<(), ShellError> {
    let state = if command.background {
        JobState::Background
    } else {
        JobState::Foreground
    };

    match spawn_job(jobs, &command.argv, state, &command.text)? {
        Spawned::Tracked(job) if command.background => out.line(job.announcement()),
        Spawned::Tracked(job) => wait_foreground(jobs, job.pid, config.fg_poll).await,
        Spawned::Untracked { error, .. } => out.line(error),
        Spawned::NotFound => out.line(format_args!("{}: Command not found.", command.program())),
    }
    Ok(())
}

/// Errors that come from `exec` in the child rather than from `fork`.
fn is_exec_failure(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    ) || e.raw_os_error() == Some(nix::libc::ENOEXEC)
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
