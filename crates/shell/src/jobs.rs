// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared handle to the job table.
//!
//! Holding the table lock is the interpreter's critical section: the
//! launcher keeps it from spawn through registration and the reaper takes
//! it before collecting any status. The lock is never held across an await.

use parking_lot::{Mutex, MutexGuard};
use tokio::sync::watch;
use tsh_core::{Job, JobTable, Pid};

pub struct Jobs {
    table: Mutex<JobTable>,
    changes: watch::Sender<u64>,
}

impl Jobs {
    pub fn new(capacity: usize) -> Self {
        Self::from_table(JobTable::new(capacity))
    }

    pub fn from_table(table: JobTable) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            table: Mutex::new(table),
            changes,
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, JobTable> {
        self.table.lock()
    }

    /// Wake every foreground wait so it re-reads the table.
    pub fn notify(&self) {
        self.changes.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    /// Receiver that observes every `notify` issued after this call.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Job> {
        self.lock().snapshot()
    }

    pub fn foreground_pid(&self) -> Option<Pid> {
        self.lock().foreground_pid()
    }

    pub fn is_foreground(&self, pid: Pid) -> bool {
        self.lock().is_foreground(pid)
    }
}
