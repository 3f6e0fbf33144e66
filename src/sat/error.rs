//! Error types for formula construction, DIMACS input and engine configuration.

use thiserror::Error;

/// Raised when clause data cannot form a well-defined formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CnfError {
    /// `0` is a clause terminator, not a literal.
    #[error("literal 0 is not a valid literal")]
    ZeroLiteral,

    /// A literal names a symbol outside `[1, num_vars]`.
    #[error("literal {literal} is outside the declared variable range 1..={num_vars}")]
    VariableOutOfRange {
        /// The offending literal.
        literal: i32,
        /// The declared number of symbols.
        num_vars: usize,
    },

    /// Symbols are written as `i32` literals, so at most `i32::MAX` can be declared.
    #[error("{num_vars} variables declared, at most {} are supported", i32::MAX)]
    TooManyVariables {
        /// The declared number of symbols.
        num_vars: usize,
    },
}

/// Raised while reading a DIMACS CNF problem.
#[derive(Debug, Error)]
pub enum DimacsError {
    /// The input could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A second `p` line.
    #[error("line {line}: tried to redefine the problem")]
    HeaderRedefined {
        /// 1-based line number.
        line: usize,
    },

    /// A `p` line naming a format other than `cnf`.
    #[error("problem type {format} not supported")]
    UnsupportedFormat {
        /// The format as written.
        format: String,
    },

    /// A `p` line without two non-negative counts.
    #[error("line {line}: malformed problem line")]
    MalformedHeader {
        /// 1-based line number.
        line: usize,
    },

    /// Clause data before any `p` line.
    #[error("line {line}: clause data before the problem line")]
    MissingHeader {
        /// 1-based line number.
        line: usize,
    },

    /// A token that is not an `i32`.
    #[error("line {line}: cannot parse literal '{token}'")]
    InvalidLiteral {
        /// The token as written.
        token: String,
        /// 1-based line number.
        line: usize,
    },

    /// The clause count differs from the `p` line.
    #[error("problem declares {declared} clauses but {actual} were read")]
    ClauseCountMismatch {
        /// Clauses announced by the `p` line.
        declared: usize,
        /// Clauses found.
        actual: usize,
    },

    /// The clauses do not form a valid formula.
    #[error(transparent)]
    Cnf(#[from] CnfError),
}

/// Raised when engine parameters are out of range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// WalkSAT noise must be a probability.
    #[error("noise probability {0} is outside [0, 1]")]
    NoiseOutOfRange(f64),
}
