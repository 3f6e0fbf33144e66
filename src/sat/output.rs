//! Writes solver results in the DIMACS solution format.
//!
//! ```text
//! c
//! c Used algorithm: dpll
//! c
//! c Satisfiable Problem
//! s cnf 1 3 2
//! v 1 -2 0
//! ```
//!
//! The solution line carries `1` for satisfiable, `0` for unsatisfiable and
//! `-1` when no conclusion was reached. The variable line is written only for
//! satisfiable results and leaves out symbols the model does not fix.

use crate::sat::cnf::Cnf;
use crate::sat::solver::SolveResult;
use crate::sat::targets::OUTPUT as LOG_OUTPUT;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// The result file path for `input`: same location, `.out` extension.
#[must_use]
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("out")
}

/// Writes the result of running `algorithm` on `cnf` to `writer`.
///
/// # Errors
///
/// Any error from `writer`.
pub fn write_result<W: Write>(
    writer: &mut W,
    algorithm: &str,
    cnf: &Cnf,
    result: &SolveResult,
) -> io::Result<()> {
    writeln!(writer, "c")?;
    writeln!(writer, "c Used algorithm: {algorithm}")?;
    writeln!(writer, "c")?;

    let summary = match result {
        SolveResult::Satisfiable(_) => "Satisfiable Problem",
        SolveResult::Unsatisfiable => "Unsatisfiable Problem",
        SolveResult::Unknown => "No solution was found",
    };
    writeln!(writer, "c {summary}")?;
    writeln!(
        writer,
        "s cnf {} {} {}",
        result.code(),
        cnf.num_vars,
        cnf.len()
    )?;

    if let Some(solutions) = result.solutions() {
        write!(writer, "v ")?;
        for lit in solutions.literals() {
            write!(writer, "{lit} ")?;
        }
        writeln!(writer, "0")?;
    }

    Ok(())
}

/// Writes the result file next to `input`.
///
/// # Errors
///
/// If the file cannot be created or written.
pub fn write_result_file(
    input: &Path,
    algorithm: &str,
    cnf: &Cnf,
    result: &SolveResult,
) -> io::Result<PathBuf> {
    let path = output_path(input);
    let mut file = io::BufWriter::new(std::fs::File::create(&path)?);
    write_result(&mut file, algorithm, cnf, result)?;
    file.flush()?;
    log::debug!(target: LOG_OUTPUT, "Result written to {}", path.display());
    Ok(path)
}
