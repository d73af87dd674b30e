// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tsh - a tiny shell with job control

mod exit_error;
mod logging;

use clap::Parser;
use std::process::ExitCode;
use tokio::io::BufReader;
use tsh_shell::{signals, Output, Shell, ShellConfig, PROMPT};

use crate::exit_error::ExitError;

#[derive(Parser, Debug)]
#[command(name = "tsh", version, about = "A tiny shell with job control")]
struct Cli {
    /// Print additional diagnostic information
    #[arg(short, long)]
    verbose: bool,

    /// Do not emit a command prompt
    #[arg(short = 'p', long = "no-prompt")]
    no_prompt: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("tsh: diagnostics disabled: {e}");
    }

    let config = ShellConfig::from_env().prompt((!cli.no_prompt).then(|| PROMPT.to_string()));

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "tsh exiting");
            println!("{e}");
            ExitCode::from(e.code)
        }
    }
}

fn run(config: ShellConfig) -> Result<(), ExitError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ExitError::new(1, format!("failed to start runtime: {e}")))?;

    runtime.block_on(async {
        let shell = Shell::new(config, Output::stdout());
        let tasks = signals::install(shell.jobs().clone(), shell.output().clone())?;
        let result = shell.run(BufReader::new(tokio::io::stdin())).await;
        tasks.abort();
        result
    })?;
    Ok(())
}
