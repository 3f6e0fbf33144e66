#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A clause is a disjunction of literals.

use crate::sat::assignment::{Assignment, Truth};
use crate::sat::literal::Literal;
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// A disjunction of literals. The empty clause is always false.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause {
    /// The literals, in input order.
    pub literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    /// Builds a clause from its literals.
    #[must_use]
    pub fn new(literals: Vec<Literal>) -> Self {
        Self {
            literals: SmallVec::from_vec(literals),
        }
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns `true` for the empty clause.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Iterates over the literals.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Three-valued disjunction: `True` as soon as one literal is true,
    /// `False` only when every literal is false.
    #[must_use]
    pub fn eval(&self, assignment: &Assignment) -> Truth {
        let mut undecided = false;
        for lit in &self.literals {
            match lit.eval(assignment) {
                Truth::True => return Truth::True,
                Truth::Unknown => undecided = true,
                Truth::False => {}
            }
        }
        if undecided { Truth::Unknown } else { Truth::False }
    }

    /// Returns `true` if some literal is true under `assignment`.
    #[must_use]
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.eval(assignment).is_true()
    }

    /// If the clause is not yet satisfied and exactly one of its literals is
    /// unassigned, returns that literal: it is the only way left to satisfy
    /// the clause.
    #[must_use]
    pub fn unit_literal(&self, assignment: &Assignment) -> Option<Literal> {
        let mut unit = None;
        for &lit in &self.literals {
            match lit.eval(assignment) {
                Truth::True => return None,
                Truth::False => {}
                Truth::Unknown => {
                    if unit.is_some_and(|u| u != lit) {
                        return None;
                    }
                    unit = Some(lit);
                }
            }
        }
        unit
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        literals.into_iter().map(Literal::from).collect()
    }
}

impl From<&[i32]> for Clause {
    fn from(literals: &[i32]) -> Self {
        literals.iter().copied().map(Literal::from).collect()
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self {
            literals: iter.into_iter().collect(),
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.literals.iter().join("∨"))
    }
}
