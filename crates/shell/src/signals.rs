// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal wiring.
//!
//! - SIGCHLD runs the reaper
//! - SIGINT and SIGTSTP are forwarded to the foreground job's process group
//! - SIGQUIT prints a notice and terminates the interpreter
//!
//! All streams are registered before any task is spawned, so no child can
//! change state before the reaper is listening.

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::ShellError;
use crate::jobs::Jobs;
use crate::output::Output;
use crate::reaper::{reap, SystemWaiter};

/// Handles to the signal tasks; dropping them leaves the tasks running.
pub struct SignalTasks {
    pub reaper: JoinHandle<()>,
    pub interrupt: JoinHandle<()>,
    pub stop: JoinHandle<()>,
    pub quit: JoinHandle<()>,
}

impl SignalTasks {
    pub fn abort(&self) {
        self.reaper.abort();
        self.interrupt.abort();
        self.stop.abort();
        self.quit.abort();
    }
}

/// Register the interpreter's signal streams and spawn their tasks.
///
/// Must be called from inside a tokio runtime, before the first launch.
pub fn install(jobs: Arc<Jobs>, out: Output) -> Result<SignalTasks, ShellError> {
    let mut sigchld = listen(Signal::SIGCHLD)?;
    let mut sigint = listen(Signal::SIGINT)?;
    let mut sigtstp = listen(Signal::SIGTSTP)?;
    let mut sigquit = listen(Signal::SIGQUIT)?;

    let reaper = {
        let jobs = Arc::clone(&jobs);
        let out = out.clone();
        tokio::spawn(async move {
            let mut waiter = SystemWaiter;
            while sigchld.recv().await.is_some() {
                if let Err(e) = reap(&jobs, &mut waiter, &out) {
                    fatal(&out, &e.into());
                }
            }
        })
    };

    let interrupt = {
        let jobs = Arc::clone(&jobs);
        let out = out.clone();
        tokio::spawn(async move {
            while sigint.recv().await.is_some() {
                forward(&jobs, &out, Signal::SIGINT);
            }
        })
    };

    let stop = {
        let out = out.clone();
        tokio::spawn(async move {
            while sigtstp.recv().await.is_some() {
                forward(&jobs, &out, Signal::SIGTSTP);
            }
        })
    };

    let quit = tokio::spawn(async move {
        if sigquit.recv().await.is_some() {
            out.line("Terminating after receipt of SIGQUIT signal");
            std::process::exit(1);
        }
    });

    Ok(SignalTasks {
        reaper,
        interrupt,
        stop,
        quit,
    })
}

fn listen(sig: Signal) -> Result<tokio::signal::unix::Signal, ShellError> {
    signal(SignalKind::from_raw(sig as i32)).map_err(|source| ShellError::SignalInstall {
        signal: sig,
        source,
    })
}

/// Send `sig` to the foreground job's whole process group, if there is one.
/// The interpreter itself is never the target.
pub fn forward(jobs: &Jobs, out: &Output, sig: Signal) {
    let Some(pgid) = jobs.foreground_pid() else {
        return;
    };
    debug!(%pgid, ?sig, "forwarding to foreground job");
    match killpg(pgid, sig) {
        // Already gone; the reaper has or will have its status.
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(errno) => fatal(
            out,
            &ShellError::Kill {
                signal: sig,
                pgid,
                errno,
            },
        ),
    }
}

fn fatal(out: &Output, e: &ShellError) -> ! {
    error!(error = %e, "fatal error in signal handling");
    out.line(e);
    std::process::exit(1);
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
