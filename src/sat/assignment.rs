#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Three-valued truth and the per-symbol assignment vector shared by every engine.
//!
//! Symbols are numbered from 1. The assignment stores one extra slot at index 0
//! so that a symbol id can be used directly as an index.

use crate::sat::literal::Variable;
use crate::sat::solver::Solutions;
use core::ops::{Index, IndexMut, Not};

/// The truth of a symbol, literal, clause or formula.
///
/// `Unknown` is an ordinary outcome meaning "not enough symbols are assigned
/// to decide", never a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum Truth {
    /// Definitely true.
    True,
    /// Definitely false.
    False,
    /// Not yet decided.
    #[default]
    Unknown,
}

impl Truth {
    /// Returns `true` if the value is `True` or `False`.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns `true` only for `Truth::True`.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    /// Returns `true` only for `Truth::False`.
    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    /// Logical negation. `Unknown` stays `Unknown`.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }

    /// The definite boolean, if there is one.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }
}

impl From<Option<bool>> for Truth {
    fn from(b: Option<bool>) -> Self {
        b.map_or(Self::Unknown, Self::from)
    }
}

impl Not for Truth {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

/// Truth values for symbols `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<Truth>);

impl Index<Variable> for Assignment {
    type Output = Truth;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<Variable> for Assignment {
    fn index_mut(&mut self, index: Variable) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Assignment {
    /// Creates an assignment with every symbol `Unknown`.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![Truth::Unknown; num_vars + 1])
    }

    /// Number of symbols covered.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Sets `var` to the given polarity.
    pub fn set(&mut self, var: Variable, b: bool) {
        self.0[var] = Truth::from(b);
    }

    /// Returns `var` to `Unknown`.
    pub fn unassign(&mut self, var: Variable) {
        self.0[var] = Truth::Unknown;
    }

    /// Inverts the truth of `var`. An `Unknown` symbol is left unchanged.
    pub fn flip(&mut self, var: Variable) {
        self.0[var] = self.0[var].negate();
    }

    /// Resets every symbol to `Unknown`.
    pub fn clear(&mut self) {
        self.0.fill(Truth::Unknown);
    }

    /// Draws a uniformly random total assignment.
    pub fn randomize(&mut self, rng: &mut fastrand::Rng) {
        for truth in self.0.iter_mut().skip(1) {
            *truth = Truth::from(rng.bool());
        }
    }

    /// Returns `true` if `var` is `True` or `False`.
    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self.0[var].is_known()
    }

    /// The lowest-numbered symbol still `Unknown`.
    #[must_use]
    pub fn first_unassigned(&self) -> Option<Variable> {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .find_map(|(i, t)| (!t.is_known()).then_some(i))
    }

    /// Truth values of symbols `1..=num_vars`, in order.
    #[must_use]
    pub fn values(&self) -> &[Truth] {
        self.0.get(1..).unwrap_or_default()
    }

    /// Snapshot of the current truth vector.
    #[must_use]
    pub fn get_solutions(&self) -> Solutions {
        Solutions::new(self.values().to_vec())
    }
}
