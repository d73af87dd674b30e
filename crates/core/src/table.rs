// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded job table.
//!
//! A fixed arena of `Option<Job>` slots sized at construction. Callers share
//! it behind a lock; every method here is a short scan or a single slot write
//! and never allocates except to store a command line or build a snapshot.

use crate::job::{Jid, Job, JobState};
use nix::unistd::Pid;
use thiserror::Error;

/// Default number of concurrently tracked jobs.
pub const DEFAULT_MAX_JOBS: usize = 16;

/// Largest job id handed out before allocation wraps back to 1.
pub const MAX_JID: u32 = 1 << 16;

/// Errors from job table operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Every slot is occupied.
    #[error("Tried to create too many jobs")]
    Full,

    /// Another job already holds the foreground.
    #[error("job ({pid}) already holds the foreground")]
    ForegroundTaken { pid: Pid },

    /// A live job already uses this pid.
    #[error("job ({pid}) is already tracked")]
    DuplicatePid { pid: Pid },

    /// Pids below 1 never name a single child process.
    #[error("invalid pid {pid}")]
    InvalidPid { pid: Pid },

    #[error("({pid}): no such process")]
    NoSuchJob { pid: Pid },
}

#[derive(Debug, Clone)]
pub struct JobTable {
    slots: Box<[Option<Job>]>,
    next_jid: u32,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_JOBS)
    }
}

impl JobTable {
    /// Create an empty table with room for `capacity` jobs (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, (MAX_JID - 1) as usize);
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
            next_jid: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Live jobs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.slots.iter().flatten()
    }

    /// Register a job in the first free slot and return its new jid.
    ///
    /// On error no slot is touched and the jid counter does not move.
    pub fn add(
        &mut self,
        pid: Pid,
        state: JobState,
        command_line: impl Into<String>,
    ) -> Result<Jid, TableError> {
        if pid.as_raw() < 1 {
            return Err(TableError::InvalidPid { pid });
        }
        if self.find_by_pid(pid).is_some() {
            return Err(TableError::DuplicatePid { pid });
        }
        if state.is_foreground() {
            if let Some(holder) = self.foreground_pid() {
                return Err(TableError::ForegroundTaken { pid: holder });
            }
        }
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(TableError::Full)?;

        let jid = self.allocate_jid();
        self.slots[index] = Some(Job {
            pid,
            jid,
            state,
            command_line: command_line.into(),
        });
        Ok(jid)
    }

    /// Clear the slot holding `pid`. Returns whether a job was removed.
    ///
    /// Afterwards the next jid is one past the highest live jid, so ids freed
    /// at the top of the range are handed out again.
    pub fn remove(&mut self, pid: Pid) -> bool {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|job| job.pid == pid))
        else {
            return false;
        };
        *slot = None;
        self.next_jid = self.max_jid() + 1;
        true
    }

    pub fn find_by_pid(&self, pid: Pid) -> Option<&Job> {
        self.iter().find(|job| job.pid == pid)
    }

    pub fn find_by_pid_mut(&mut self, pid: Pid) -> Option<&mut Job> {
        self.slots.iter_mut().flatten().find(|job| job.pid == pid)
    }

    pub fn find_by_jid(&self, jid: Jid) -> Option<&Job> {
        self.iter().find(|job| job.jid == jid)
    }

    /// Pid of the foreground job, if any.
    pub fn foreground_pid(&self) -> Option<Pid> {
        self.iter()
            .find(|job| job.state.is_foreground())
            .map(|job| job.pid)
    }

    /// True while `pid` is tracked and still in the foreground.
    pub fn is_foreground(&self, pid: Pid) -> bool {
        self.find_by_pid(pid)
            .is_some_and(|job| job.state.is_foreground())
    }

    /// Move a job to `state`, refusing to create a second foreground job.
    pub fn set_state(&mut self, pid: Pid, state: JobState) -> Result<(), TableError> {
        if state.is_foreground() {
            if let Some(holder) = self.foreground_pid().filter(|holder| *holder != pid) {
                return Err(TableError::ForegroundTaken { pid: holder });
            }
        }
        let job = self
            .find_by_pid_mut(pid)
            .ok_or(TableError::NoSuchJob { pid })?;
        job.state = state;
        Ok(())
    }

    /// Highest live jid, or 0 when the table is empty.
    pub fn max_jid(&self) -> u32 {
        self.iter().map(|job| job.jid.get()).max().unwrap_or(0)
    }

    /// Copy of every live job in slot order.
    pub fn snapshot(&self) -> Vec<Job> {
        self.iter().cloned().collect()
    }

    fn allocate_jid(&mut self) -> Jid {
        let mut candidate = wrap_jid(self.next_jid);
        while self.iter().any(|job| job.jid.get() == candidate) {
            candidate = wrap_jid(candidate + 1);
        }
        self.next_jid = wrap_jid(candidate + 1);
        Jid::new(candidate)
    }
}

fn wrap_jid(n: u32) -> u32 {
    if n == 0 || n > MAX_JID {
        1
    } else {
        n
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
