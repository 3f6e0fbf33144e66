#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The format includes:
//! - Comment lines starting with 'c'.
//! - A single problem line 'p cnf <`num_variables`> <`num_clauses`>'. Only the
//!   `cnf` format is supported and the line may not appear twice.
//! - Clause data: signed integers, positive for a symbol and negative for its
//!   negation. A '0' terminates a clause; a clause may span several lines and
//!   a final clause without its '0' is still kept.
//! - An optional '%' line that ends the data (used by some benchmark sets).
//!
//! The number of clauses read must match the count declared on the problem
//! line, and every literal must name a symbol in `1..=num_variables`.

use crate::sat::cnf::Cnf;
use crate::sat::error::DimacsError;
use crate::sat::targets::DIMACS as LOG_DIMACS;
use std::io::{self, BufRead};
use std::path::Path;

/// The counts declared on the problem line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    num_vars: usize,
    num_clauses: usize,
}

fn parse_header<'a>(
    mut parts: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Header, DimacsError> {
    let format = parts.next().ok_or(DimacsError::MalformedHeader { line })?;
    if format != "cnf" {
        return Err(DimacsError::UnsupportedFormat {
            format: format.to_string(),
        });
    }

    let mut count = || {
        parts
            .next()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or(DimacsError::MalformedHeader { line })
    };
    let num_vars = count()?;
    let num_clauses = count()?;

    Ok(Header {
        num_vars,
        num_clauses,
    })
}

/// Parses DIMACS formatted data from a `BufRead` source into a `Cnf`.
///
/// # Errors
///
/// Any [`DimacsError`]: unreadable input, a missing, repeated, malformed or
/// unsupported problem line, a token that is not an integer, a literal out of
/// range, or a clause count different from the declared one.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, DimacsError> {
    let mut header: Option<Header> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();
    let mut line_no = 0;

    for line in reader.lines() {
        let line = line?;
        line_no += 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            None | Some(&"c") => {}
            Some(&"%") => break,
            Some(&"p") => {
                if header.is_some() {
                    return Err(DimacsError::HeaderRedefined { line: line_no });
                }
                parts.next();
                let parsed = parse_header(parts, line_no)?;
                log::debug!(
                    target: LOG_DIMACS,
                    "Problem line: {} variables, {} clauses",
                    parsed.num_vars,
                    parsed.num_clauses
                );
                header = Some(parsed);
            }
            Some(first) if first.parse::<i32>().is_ok() => {
                if header.is_none() {
                    return Err(DimacsError::MissingHeader { line: line_no });
                }
                for token in parts {
                    let value = token
                        .parse::<i32>()
                        .map_err(|_| DimacsError::InvalidLiteral {
                            token: token.to_string(),
                            line: line_no,
                        })?;
                    if value == 0 {
                        if !current.is_empty() {
                            clauses.push(std::mem::take(&mut current));
                        }
                    } else {
                        current.push(value);
                    }
                }
            }
            Some(other) => {
                log::trace!(target: LOG_DIMACS, "Ignoring line {line_no} starting with '{other}'");
            }
        }
    }

    if !current.is_empty() {
        clauses.push(current);
    }

    let header = header.ok_or(DimacsError::MissingHeader { line: line_no })?;
    if clauses.len() != header.num_clauses {
        return Err(DimacsError::ClauseCountMismatch {
            declared: header.num_clauses,
            actual: clauses.len(),
        });
    }

    Ok(Cnf::new(header.num_vars, clauses)?)
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// `DimacsError::Io` if the file cannot be opened, otherwise any error of
/// [`parse_dimacs`].
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<Cnf, DimacsError> {
    let file = std::fs::File::open(file_path.as_ref())?;
    let reader = io::BufReader::new(file);
    parse_dimacs(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::error::CnfError;
    use crate::sat::literal::Literal;
    use std::io::Cursor;

    fn parse(content: &str) -> Result<Cnf, DimacsError> {
        parse_dimacs(Cursor::new(content))
    }

    #[test]
    fn test_parse_simple_dimacs() {
        let cnf = parse(
            "c This is a comment\n\
             p cnf 3 2\n\
             1 -2 0\n\
             2 3 0\n",
        )
        .unwrap();

        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.num_vars, 3);
        let c1: Vec<i32> = cnf[0].iter().map(|l| l.to_i32()).collect();
        assert_eq!(c1, vec![1, -2]);
        assert_eq!(cnf[1][1], Literal::from(3));
    }

    #[test]
    fn test_parse_dimacs_with_empty_lines_and_end_marker() {
        let cnf = parse(
            "p cnf 2 2\n\
             \n\
             1 0\n\
             \n\
             -2 0\n\
             %\n\
             0\n\
             c this should be ignored",
        )
        .unwrap();

        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf[1][0].to_i32(), -2);
    }

    #[test]
    fn test_clause_spanning_lines_and_missing_terminator() {
        let cnf = parse("p cnf 4 2\n1 2\n-3 0 4\n").unwrap();
        assert_eq!(cnf.to_dimacs(), "p cnf 4 2\n1 2 -3 0\n4 0\n");
    }

    #[test]
    fn test_lone_zero_is_not_a_clause() {
        let cnf = parse("p cnf 1 1\n0\n1 0\n").unwrap();
        assert_eq!(cnf.len(), 1);
    }

    #[test]
    fn test_no_clauses() {
        let cnf = parse("p cnf 0 0\n").unwrap();
        assert!(cnf.is_empty());
        assert_eq!(cnf.num_vars, 0);
    }

    #[test]
    fn test_header_redefined() {
        let err = parse("p cnf 1 1\np cnf 1 1\n1 0\n").unwrap_err();
        assert!(matches!(err, DimacsError::HeaderRedefined { line: 2 }));
    }

    #[test]
    fn test_unsupported_format() {
        let err = parse("p sat 3 1\n").unwrap_err();
        assert!(matches!(err, DimacsError::UnsupportedFormat { ref format } if format == "sat"));
        assert_eq!(err.to_string(), "problem type sat not supported");
    }

    #[test]
    fn test_malformed_header() {
        assert!(matches!(
            parse("p cnf three 1\n").unwrap_err(),
            DimacsError::MalformedHeader { line: 1 }
        ));
        assert!(matches!(
            parse("p\n").unwrap_err(),
            DimacsError::MalformedHeader { line: 1 }
        ));
    }

    #[test]
    fn test_declared_variables_beyond_i32() {
        for header in ["p cnf 18446744073709551615 1\n1 0\n", "p cnf 10000000000 1\n1 0\n"] {
            assert!(matches!(
                parse(header).unwrap_err(),
                DimacsError::Cnf(CnfError::TooManyVariables { .. })
            ));
        }

        let cnf = parse("p cnf 2147483647 1\n-2147483647 0\n").unwrap();
        assert_eq!(cnf[0][0].to_i32(), -2_147_483_647);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            parse("c nothing\n1 2 0\n").unwrap_err(),
            DimacsError::MissingHeader { line: 2 }
        ));
        assert!(matches!(
            parse("").unwrap_err(),
            DimacsError::MissingHeader { .. }
        ));
    }

    #[test]
    fn test_malformed_literal() {
        let err = parse("p cnf 2 1\n1 abc 0\n").unwrap_err();
        assert!(matches!(
            err,
            DimacsError::InvalidLiteral { ref token, line: 2 } if token == "abc"
        ));
    }

    #[test]
    fn test_clause_count_mismatch() {
        let err = parse("p cnf 2 3\n1 0\n2 0\n").unwrap_err();
        assert!(matches!(
            err,
            DimacsError::ClauseCountMismatch {
                declared: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_literal_out_of_range() {
        let err = parse("p cnf 2 1\n1 -5 0\n").unwrap_err();
        assert!(matches!(
            err,
            DimacsError::Cnf(CnfError::VariableOutOfRange { literal: -5, .. })
        ));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("definitely/not/here.cnf").unwrap_err();
        assert!(matches!(err, DimacsError::Io(_)));
    }
}
