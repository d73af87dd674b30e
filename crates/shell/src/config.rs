// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interpreter configuration.

use std::time::Duration;
use tsh_core::DEFAULT_MAX_JOBS;

use crate::env;

/// Prompt printed before each command line.
pub const PROMPT: &str = "tsh> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Prompt text, or `None` to read silently.
    pub prompt: Option<String>,
    /// Job table capacity.
    pub max_jobs: usize,
    /// Fallback interval at which a foreground wait re-checks the table.
    pub fg_poll: Duration,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: Some(PROMPT.to_string()),
            max_jobs: DEFAULT_MAX_JOBS,
            fg_poll: Duration::from_secs(1),
        }
    }
}

impl ShellConfig {
    /// Defaults with `TSH_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self {
            max_jobs: env::max_jobs(),
            fg_poll: env::fg_poll(),
            ..Self::default()
        }
    }

    pub fn prompt(mut self, prompt: Option<String>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn max_jobs(mut self, max_jobs: usize) -> Self {
        self.max_jobs = max_jobs;
        self
    }

    pub fn fg_poll(mut self, fg_poll: Duration) -> Self {
        self.fg_poll = fg_poll;
        self
    }
}
