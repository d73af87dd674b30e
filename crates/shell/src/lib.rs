// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tsh-shell: job-control interpreter
//!
//! Launches commands in their own process groups, tracks them in a shared
//! job table, reaps them on SIGCHLD, and implements `jobs`, `bg`, `fg` and
//! `quit`.

pub mod builtin;
pub mod config;
pub mod env;
pub mod error;
pub mod jobs;
pub mod launch;
pub mod output;
pub mod parse;
pub mod reaper;
mod shell;
pub mod signals;
pub mod wait;


pub use builtin::{Builtin, Flow, JobRef, JobRefError};
pub use config::{ShellConfig, PROMPT};
pub use error::{ReapError, ShellError};
pub use jobs::Jobs;
pub use launch::{launch, spawn_job, Spawned};
pub use output::{Captured, Output};
pub use parse::{parse_line, CommandLine, ParseError};
pub use reaper::{drain, reap, ChildWaiter, ReapSummary, SystemWaiter};
pub use shell::Shell;
pub use signals::SignalTasks;
pub use wait::wait_foreground;
