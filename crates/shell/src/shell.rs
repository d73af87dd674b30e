// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The read-eval loop.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::builtin::{self, Builtin, Flow};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::jobs::Jobs;
use crate::launch::launch;
use crate::output::Output;
use crate::parse::parse_line;

pub struct Shell {
    jobs: Arc<Jobs>,
    config: ShellConfig,
    out: Output,
}

impl Shell {
    pub fn new(config: ShellConfig, out: Output) -> Self {
        Self {
            jobs: Arc::new(Jobs::new(config.max_jobs)),
            config,
            out,
        }
    }

    pub fn jobs(&self) -> &Arc<Jobs> {
        &self.jobs
    }

    pub fn output(&self) -> &Output {
        &self.out
    }

    /// Evaluate one command line.
    pub async fn eval(&self, line: &str) -> Result<Flow, ShellError> {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                self.out.line(e);
                return Ok(Flow::Continue);
            }
        };

        if let Some(builtin) = Builtin::recognize(&command.argv) {
            return builtin::run(builtin, &self.jobs, &self.config, &self.out).await;
        }

        launch(&self.jobs, &command, &self.config, &self.out).await?;
        Ok(Flow::Continue)
    }

    /// Prompt, read, and evaluate until `quit` or end of input.
    ///
    /// Outstanding background jobs are left running.
    pub async fn run(&self, input: impl AsyncBufRead + Unpin) -> Result<(), ShellError> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = &self.config.prompt {
                self.out.prompt(prompt);
            }
            let Some(line) = lines.next_line().await.map_err(ShellError::Input)? else {
                return Ok(());
            };
            if self.eval(&line).await? == Flow::Quit {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
