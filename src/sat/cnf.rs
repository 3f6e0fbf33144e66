#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The formula: a conjunction of clauses over symbols `1..=num_vars`.
//!
//! Evaluation is three-valued. A formula is `True` when every clause is true,
//! `False` as soon as one clause is false and `Unknown` otherwise. The local
//! search engines use [`Cnf::score`] instead, which simply counts the clauses
//! that are currently true and never reports `Unknown`.

use crate::sat::assignment::{Assignment, Truth};
use crate::sat::clause::Clause;
use crate::sat::error::CnfError;
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::Solutions;
use core::ops::Index;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A conjunction of clauses over symbols `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// The clauses, in input order.
    pub clauses: Vec<Clause>,
    /// The declared number of symbols, which may exceed the ones in use.
    pub num_vars: usize,
}

impl Cnf {
    /// Builds a formula from signed-integer clauses.
    ///
    /// # Errors
    ///
    /// `CnfError::TooManyVariables` if `num_vars` exceeds `i32::MAX`,
    /// `CnfError::ZeroLiteral` for a `0` literal and
    /// `CnfError::VariableOutOfRange` for a symbol outside `1..=num_vars`.
    pub fn new<I, J>(num_vars: usize, clauses: I) -> Result<Self, CnfError>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = i32>,
    {
        if i32::try_from(num_vars).is_err() {
            return Err(CnfError::TooManyVariables { num_vars });
        }

        let clauses = clauses
            .into_iter()
            .map(|clause| {
                clause
                    .into_iter()
                    .map(|value| check_literal(value, num_vars))
                    .collect::<Result<Clause, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { clauses, num_vars })
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if there are no clauses, which makes the formula true.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterates over the clauses.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Total number of literal occurrences.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Three-valued conjunction of every clause.
    #[must_use]
    pub fn eval(&self, assignment: &Assignment) -> Truth {
        let mut undecided = false;
        for clause in &self.clauses {
            match clause.eval(assignment) {
                Truth::False => return Truth::False,
                Truth::Unknown => undecided = true,
                Truth::True => {}
            }
        }
        if undecided { Truth::Unknown } else { Truth::True }
    }

    /// Returns `true` if every clause is true under `assignment`.
    #[must_use]
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.eval(assignment).is_true()
    }

    /// Number of clauses that are currently true.
    #[must_use]
    pub fn score(&self, assignment: &Assignment) -> usize {
        self.clauses
            .iter()
            .filter(|clause| clause.is_satisfied(assignment))
            .count()
    }

    /// Indices of the clauses that are not currently true.
    #[must_use]
    pub fn unsatisfied_clauses(&self, assignment: &Assignment) -> Vec<usize> {
        self.clauses
            .iter()
            .positions(|clause| !clause.is_satisfied(assignment))
            .collect()
    }

    /// Checks a model: every clause must contain a literal the model makes true.
    /// Symbols the model leaves unknown satisfy nothing.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        self.clauses.iter().all(|clause| {
            clause.iter().any(|lit| {
                let truth = solutions.get(lit.var);
                if lit.negated { truth.is_false() } else { truth.is_true() }
            })
        })
    }

    /// Renders the formula in DIMACS CNF.
    #[must_use]
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_vars, self.clauses.len());
        for clause in &self.clauses {
            out.push_str(&clause.iter().map(|lit| lit.to_i32()).join(" "));
            out.push_str(" 0\n");
        }
        out
    }
}

fn check_literal(value: i32, num_vars: usize) -> Result<Literal, CnfError> {
    if value == 0 {
        return Err(CnfError::ZeroLiteral);
    }
    let var = value.unsigned_abs() as Variable;
    if var > num_vars {
        return Err(CnfError::VariableOutOfRange {
            literal: value,
            num_vars,
        });
    }
    Ok(Literal::from_i32(value))
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.clauses.iter().join("∧"))
    }
}
