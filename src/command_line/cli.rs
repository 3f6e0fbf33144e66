#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tikv_jemalloc_ctl::{epoch, stats};
use trisat::sat::cnf::Cnf;
use trisat::sat::dimacs::parse_file;
use trisat::sat::dpll::{Dpll, DpllConfig};
use trisat::sat::error::{ConfigError, DimacsError};
use trisat::sat::gsat::{Gsat, GsatConfig, SuccessorScan};
use trisat::sat::output::write_result_file;
use trisat::sat::solver::{SolutionStats, SolveResult, Solver, SolverImpls};
use trisat::sat::targets::CLI as LOG_CLI;
use trisat::sat::walksat::{WalkSat, WalkSatConfig};

const MIB: f64 = 1024.0 * 1024.0;

/// Defines the command-line interface.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "trisat",
    version,
    about = "Solve DIMACS CNF problems with DPLL, GSAT or WalkSAT"
)]
pub(crate) struct Cli {
    /// A DIMACS .cnf file, or a directory searched recursively for .cnf files.
    pub path: Option<PathBuf>,

    /// The algorithm to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Options shared by every algorithm.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available algorithms.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub(crate) enum Commands {
    /// Complete backtracking search with unit propagation and pure literal elimination.
    Dpll {
        /// Do not assign pure symbols before branching.
        #[arg(long, default_value_t = false)]
        no_pure_literals: bool,

        /// Do not assign symbols forced by unit clauses before branching.
        #[arg(long, default_value_t = false)]
        no_unit_propagation: bool,
    },

    /// Greedy hill climbing with random restarts.
    Gsat {
        /// Maximum number of restarts.
        max_restarts: usize,

        /// Maximum number of climbs per restart.
        max_climbs: usize,

        /// How the candidate flips of a climb are scored.
        #[arg(long, value_enum, default_value_t = SuccessorScan::Independent)]
        scan: SuccessorScan,
    },

    /// Random walk over the unsatisfied clauses.
    Walksat {
        /// Probability of flipping a random symbol of the chosen clause.
        #[arg(allow_negative_numbers = true)]
        p: f64,

        /// Maximum number of flips.
        max_flips: usize,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines command-line options shared by every algorithm.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Print the problem before solving it.
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) print_problem: bool,

    /// Print the outcome and, if one was found, the model.
    #[arg(short = 's', long, global = true, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Write the log to this file instead of stderr.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub(crate) logfile: Option<PathBuf>,

    /// Raise the log level: warn, info, debug, then trace.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,

    /// Number of times each problem is solved.
    #[arg(
        short,
        long,
        global = true,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub(crate) runs: u32,

    /// Do not write the `.out` result file.
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) no_sol: bool,

    /// Seed for the local search engines.
    #[arg(long, global = true)]
    pub(crate) seed: Option<u64>,

    /// Print problem and search statistics after each run.
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) stats: bool,

    /// Check any model found against the formula.
    #[arg(long, global = true, default_value_t = false)]
    pub(crate) verify: bool,
}

impl CommonOptions {
    /// Log level selected by the number of `-v` flags.
    pub(crate) const fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Everything that can stop the command line from finishing a problem.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("no input path given")]
    MissingPath,

    #[error("{} is neither a file nor a directory", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Dimacs {
        path: PathBuf,
        #[source]
        source: DimacsError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write the result for {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model for {} failed verification", .0.display())]
    Verification(PathBuf),

    #[error("`{0}` does not solve problems")]
    NotAnAlgorithm(&'static str),
}

/// Builds the engine selected by `command` for `cnf`.
///
/// # Errors
///
/// If the engine parameters are out of range, or `command` is not an algorithm.
pub(crate) fn get_solver(
    command: &Commands,
    common: &CommonOptions,
    cnf: Cnf,
) -> Result<SolverImpls, CliError> {
    let solver = match *command {
        Commands::Dpll {
            no_pure_literals,
            no_unit_propagation,
        } => {
            let config = DpllConfig {
                pure_literals: !no_pure_literals,
                unit_propagation: !no_unit_propagation,
            };
            SolverImpls::Dpll(Box::new(Dpll::with_config(cnf, config)))
        }
        Commands::Gsat {
            max_restarts,
            max_climbs,
            scan,
        } => {
            let config = GsatConfig::new(max_restarts, max_climbs)
                .with_scan(scan)
                .with_seed(common.seed);
            SolverImpls::Gsat(Box::new(Gsat::new(cnf, config)))
        }
        Commands::Walksat { p, max_flips } => {
            let config = WalkSatConfig::new(p, max_flips)?.with_seed(common.seed);
            SolverImpls::WalkSat(Box::new(WalkSat::new(cnf, config)))
        }
        Commands::Completions { .. } => return Err(CliError::NotAnAlgorithm("completions")),
    };
    Ok(solver)
}

/// Solves `path`: a single DIMACS file, or every `.cnf` file below a directory.
///
/// # Errors
///
/// The first problem that cannot be read, solved, verified or written.
pub(crate) fn solve_path(
    path: &Path,
    command: &Commands,
    common: &CommonOptions,
) -> Result<(), CliError> {
    if path.is_dir() {
        solve_dir(path, command, common)
    } else if path.is_file() {
        solve_file(path, command, common)
    } else {
        Err(CliError::NotFound(path.to_path_buf()))
    }
}

/// Solves a directory of CNF files.
///
/// Every `.cnf` file beneath `path` is parsed, solved and reported in
/// directory walk order. Other entries are skipped.
///
/// # Errors
///
/// Stops at the first file that fails.
pub(crate) fn solve_dir(
    path: &Path,
    command: &Commands,
    common: &CommonOptions,
) -> Result<(), CliError> {
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            log::debug!(target: LOG_CLI, "Skipping non-CNF file: {}", file_path.display());
            continue;
        }

        solve_file(file_path, command, common)?;
    }

    Ok(())
}

/// Parses one DIMACS file and solves it.
///
/// # Errors
///
/// If the file cannot be parsed, or solving it fails.
pub(crate) fn solve_file(
    path: &Path,
    command: &Commands,
    common: &CommonOptions,
) -> Result<(), CliError> {
    log::debug!(target: LOG_CLI, "Parsing file {}", path.display());
    let time = std::time::Instant::now();
    let cnf = parse_file(path).map_err(|source| CliError::Dimacs {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_time = time.elapsed();
    log::debug!(target: LOG_CLI, "Done parsing file");

    if common.print_problem {
        println!("{cnf}");
    }

    solve_and_report(path, &cnf, command, common, parse_time)
}

/// Verifies a model against the formula it was found for.
///
/// # Errors
///
/// `CliError::Verification` if some clause is not satisfied by the model.
pub(crate) fn verify_solution(
    cnf: &Cnf,
    result: &SolveResult,
    path: &Path,
) -> Result<(), CliError> {
    if let Some(solutions) = result.solutions() {
        let ok = cnf.verify(solutions);
        log::info!(target: LOG_CLI, "Verified: {ok}");
        if !ok {
            return Err(CliError::Verification(path.to_path_buf()));
        }
    }
    Ok(())
}

/// Solves `cnf` the requested number of times, reporting every run.
///
/// The engine is built once, so a seeded local search continues its random
/// sequence from one run to the next.
///
/// # Errors
///
/// If the engine cannot be built, a model fails verification, or the result
/// file cannot be written.
pub(crate) fn solve_and_report(
    path: &Path,
    cnf: &Cnf,
    command: &Commands,
    common: &CommonOptions,
    parse_time: Duration,
) -> Result<(), CliError> {
    let mut solver = get_solver(command, common, cnf.clone())?;

    for run in 1..=common.runs {
        log::debug!(
            target: LOG_CLI,
            "Solving {} with {} (run {run}/{})",
            path.display(),
            solver.name(),
            common.runs
        );

        let time = std::time::Instant::now();
        let result = solver.solve();
        let elapsed = time.elapsed();

        log::info!(
            target: LOG_CLI,
            "{}: {} in {:.3}s",
            path.display(),
            outcome(&result),
            elapsed.as_secs_f64()
        );

        if common.print_solution {
            print_result(&result);
        }

        if common.verify {
            verify_solution(cnf, &result, path)?;
        }

        if common.stats {
            print_stats(
                parse_time,
                elapsed,
                cnf,
                solver.name(),
                &solver.stats(),
                memory_usage(),
            );
        }

        if !common.no_sol {
            write_result_file(path, solver.name(), cnf, &result).map_err(|source| {
                CliError::Output {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        }
    }

    Ok(())
}

/// One line summary of a result.
pub(crate) const fn outcome(result: &SolveResult) -> &'static str {
    match result {
        SolveResult::Satisfiable(_) => "Solution found!",
        SolveResult::Unsatisfiable => "Problem not satisfiable!",
        SolveResult::Unknown => "No conclusion reached...",
    }
}

pub(crate) fn print_result(result: &SolveResult) {
    println!("{}", outcome(result));
    if let Some(solutions) = result.solutions() {
        println!("{solutions}");
    }
}

/// Allocated and resident memory in MiB, if jemalloc can report them.
pub(crate) fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    algorithm: &str,
    s: &SolutionStats,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.num_literals());

    println!("========================[ Search Statistics ]========================");
    stat_line("Algorithm", algorithm);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Pure literals", s.pure_literals, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line_with_rate("Restarts", s.restarts, elapsed_secs);
    stat_line_with_rate("Flips", s.flips, elapsed_secs);
    stat_line_with_rate("Random walks", s.random_walks, elapsed_secs);
    match memory {
        Some((allocated, resident)) => {
            stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
            stat_line("Resident memory (MiB)", format!("{resident:.2}"));
        }
        None => stat_line("Memory usage (MiB)", "n/a"),
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
