//! # trisat
//!
//! `trisat` solves propositional satisfiability problems given in DIMACS CNF
//! format with one of three algorithms:
//!
//! 1.  **DPLL**: complete backtracking search with unit propagation and pure
//!     literal elimination. Reports satisfiable or unsatisfiable.
//! 2.  **GSAT**: greedy hill climbing from random assignments with restarts.
//! 3.  **WalkSAT**: a noisy random walk driven by unsatisfied clauses.
//!
//! The local search algorithms are incomplete: when their budget runs out
//! they report that no conclusion was reached.
//!
//! ## Usage
//!
//! ```sh
//! trisat [OPTIONS] <PATH> <COMMAND>
//!
//! trisat problem.cnf dpll
//! trisat -s problem.cnf gsat 10 500 --scan cumulative
//! trisat -vvv --logfile run.log problems/ walksat 0.5 10000 --seed 42
//! trisat completions zsh
//! ```
//!
//! For every solved file a result file with the `.out` extension is written
//! next to it unless `--no-sol` is given. `PATH` may also be a directory, in
//! which case every `.cnf` file beneath it is solved.

use crate::command_line::cli::{Cli, CliError, Commands, CommonOptions, solve_path};
use clap::{CommandFactory, Parser};
use std::fs::File;
use trisat::sat::targets::CLI as LOG_CLI;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Configures `env_logger` at the level chosen on the command line. `RUST_LOG`
/// refines the filter, and `--logfile` redirects the output to a file.
fn logger_builder(common: &CommonOptions) -> std::io::Result<env_logger::Builder> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(common.log_level())
        .parse_default_env()
        .format_timestamp_secs();

    if let Some(path) = &common.logfile {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    Ok(builder)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let path = cli.path.as_deref().ok_or(CliError::MissingPath)?;
    solve_path(path, &cli.command, &cli.common)
}

fn main() {
    let cli = Cli::parse();

    match logger_builder(&cli.common) {
        Ok(mut builder) => builder.init(),
        Err(e) => {
            eprintln!("Unable to open the log file: {e}");
            std::process::exit(2);
        }
    }

    if let Err(e) = run(&cli) {
        log::error!(target: LOG_CLI, "{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
