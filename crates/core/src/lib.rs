// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tsh-core: job records and the bounded job table shared by the shell

pub mod macros;

pub mod job;
pub mod status;
pub mod table;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use job::{Jid, Job, JobState};
pub use nix::unistd::Pid;
pub use status::ChildStatus;
pub use table::{JobTable, TableError, DEFAULT_MAX_JOBS, MAX_JID};
