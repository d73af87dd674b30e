// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{JobState, JobTable, Pid};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for job table types.
pub mod strategies {
    use crate::{JobState, Pid};
    use proptest::prelude::*;

    /// A single mutation applied to a table.
    #[derive(Debug, Clone)]
    pub enum TableOp {
        Add(Pid, JobState),
        Remove(Pid),
        SetState(Pid, JobState),
    }

    pub fn arb_job_state() -> impl Strategy<Value = JobState> {
        prop_oneof![
            Just(JobState::Foreground),
            Just(JobState::Background),
            Just(JobState::Stopped),
        ]
    }

    /// Pids from a small range so sequences collide often.
    pub fn arb_pid() -> impl Strategy<Value = Pid> {
        (1..40i32).prop_map(Pid::from_raw)
    }

    pub fn arb_table_op() -> impl Strategy<Value = TableOp> {
        prop_oneof![
            3 => (arb_pid(), arb_job_state()).prop_map(|(pid, state)| TableOp::Add(pid, state)),
            2 => arb_pid().prop_map(TableOp::Remove),
            1 => (arb_pid(), arb_job_state()).prop_map(|(pid, state)| TableOp::SetState(pid, state)),
        ]
    }
}

/// Build a table holding one job per `(pid, state)` pair, in order.
pub fn table_with(capacity: usize, jobs: &[(i32, JobState)]) -> JobTable {
    let mut table = JobTable::new(capacity);
    for (pid, state) in jobs {
        let _ = table.add(Pid::from_raw(*pid), *state, format!("job {pid}"));
    }
    table
}
