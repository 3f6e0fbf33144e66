#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The common interface of the three engines and the values they report.

use crate::sat::assignment::Truth;
use crate::sat::dpll::Dpll;
use crate::sat::gsat::Gsat;
use crate::sat::literal::Variable;
use crate::sat::walksat::WalkSat;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A model over symbols `1..=N`. Symbols the engine never had to fix are `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Solutions(Vec<Truth>);

impl Solutions {
    /// Wraps the truths of symbols `1..=values.len()`.
    #[must_use]
    pub const fn new(values: Vec<Truth>) -> Self {
        Self(values)
    }

    /// Truth of symbol `var`, `Unknown` when out of range.
    #[must_use]
    pub fn get(&self, var: Variable) -> Truth {
        var.checked_sub(1)
            .and_then(|i| self.0.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Number of symbols covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no symbol is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(symbol, truth)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Truth)> + '_ {
        self.0.iter().enumerate().map(|(i, &t)| (i + 1, t))
    }

    /// Signed literals of every decided symbol; unknown symbols are left out.
    #[must_use]
    pub fn literals(&self) -> Vec<i64> {
        self.iter()
            .filter_map(|(var, t)| {
                let var = i64::try_from(var).ok()?;
                t.as_bool().map(|b| if b { var } else { -var })
            })
            .collect()
    }

    /// The truths, symbol 1 first.
    #[must_use]
    pub fn values(&self) -> &[Truth] {
        &self.0
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.literals().iter().join(" "))
    }
}

/// Outcome of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// A model under which every clause is true.
    Satisfiable(Solutions),
    /// Exhaustive search found no model. Only complete engines report this.
    Unsatisfiable,
    /// The search budget ran out. Says nothing about whether a model exists.
    Unknown,
}

impl SolveResult {
    /// Returns `true` for `Satisfiable`.
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    /// Returns `true` for `Unsatisfiable`.
    #[must_use]
    pub const fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }

    /// The model of a `Satisfiable` result.
    #[must_use]
    pub const fn solutions(&self) -> Option<&Solutions> {
        match self {
            Self::Satisfiable(s) => Some(s),
            _ => None,
        }
    }

    /// DIMACS solution code: 1 satisfiable, 0 unsatisfiable, -1 unknown.
    #[must_use]
    pub const fn code(&self) -> i8 {
        match self {
            Self::Satisfiable(_) => 1,
            Self::Unsatisfiable => 0,
            Self::Unknown => -1,
        }
    }
}

/// Counters collected while solving. Engines leave the ones they do not use at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SolutionStats {
    /// Falsified states reached by DPLL.
    pub conflicts: usize,
    /// DPLL branching decisions.
    pub decisions: usize,
    /// DPLL assignments forced by unit clauses.
    pub propagations: usize,
    /// DPLL assignments of pure symbols.
    pub pure_literals: usize,
    /// Fresh random assignments drawn by local search.
    pub restarts: usize,
    /// Symbol flips made by local search.
    pub flips: usize,
    /// WalkSAT noise steps.
    pub random_walks: usize,
}

/// A satisfiability engine bound to one formula.
pub trait Solver {
    /// Runs the engine to completion or until its budget is spent.
    fn solve(&mut self) -> SolveResult;

    /// The engine's current truth vector over all symbols.
    fn solutions(&self) -> Solutions;

    /// Counters from the most recent run.
    fn stats(&self) -> SolutionStats;

    /// Algorithm name as reported in result files.
    fn name(&self) -> &'static str;
}

/// Dynamic dispatch over the available engines.
#[derive(Debug, Clone)]
pub enum SolverImpls {
    /// Complete DPLL search.
    Dpll(Box<Dpll>),
    /// Greedy local search.
    Gsat(Box<Gsat>),
    /// Noisy local search.
    WalkSat(Box<WalkSat>),
}

impl Solver for SolverImpls {
    fn solve(&mut self) -> SolveResult {
        match self {
            Self::Dpll(s) => s.solve(),
            Self::Gsat(s) => s.solve(),
            Self::WalkSat(s) => s.solve(),
        }
    }

    fn solutions(&self) -> Solutions {
        match self {
            Self::Dpll(s) => s.solutions(),
            Self::Gsat(s) => s.solutions(),
            Self::WalkSat(s) => s.solutions(),
        }
    }

    fn stats(&self) -> SolutionStats {
        match self {
            Self::Dpll(s) => s.stats(),
            Self::Gsat(s) => s.stats(),
            Self::WalkSat(s) => s.stats(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Dpll(s) => s.name(),
            Self::Gsat(s) => s.name(),
            Self::WalkSat(s) => s.name(),
        }
    }
}
