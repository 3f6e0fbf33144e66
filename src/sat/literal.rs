#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literals: a symbol paired with a sign, convertible to and from DIMACS integers.

use crate::sat::assignment::{Assignment, Truth};
use core::ops::{Neg, Not};
use std::fmt::{Display, Formatter};

/// Symbol id, numbered from 1.
pub type Variable = usize;

/// Digits used by `Display` to write symbol ids as subscripts.
const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// A symbol or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal {
    /// The symbol.
    pub var: Variable,
    /// `true` for `¬var`.
    pub negated: bool,
}

impl Literal {
    /// Builds the literal `var` or, if `negated`, `¬var`.
    #[must_use]
    pub const fn new(var: Variable, negated: bool) -> Self {
        Self { var, negated }
    }

    /// Builds a literal from its signed DIMACS form. `value` must be non-zero.
    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        Self::new(value.unsigned_abs() as Variable, value.is_negative())
    }

    /// Signed DIMACS form. A variable beyond `i32::MAX`, which no `Cnf` can
    /// hold, saturates.
    #[must_use]
    pub fn to_i32(self) -> i32 {
        let var = i32::try_from(self.var).unwrap_or(i32::MAX);
        if self.negated { -var } else { var }
    }

    /// The value the symbol must take for this literal to be true.
    #[must_use]
    pub const fn polarity(self) -> bool {
        !self.negated
    }

    /// The complementary literal.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self::new(self.var, !self.negated)
    }

    /// Truth of the literal under `assignment`.
    #[must_use]
    pub fn eval(self, assignment: &Assignment) -> Truth {
        let truth = assignment[self.var];
        if self.negated { truth.negate() } else { truth }
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x")?;
        if self.negated {
            write!(f, "\u{0304}")?;
        }
        for digit in self.var.to_string().bytes() {
            write!(f, "{}", SUBSCRIPTS[usize::from(digit - b'0')])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(-Literal::new(1, false), Literal::new(1, true));
        assert_eq!(!Literal::new(1, true), Literal::new(1, false));
    }

    #[test]
    fn test_from_i32() {
        let lit = Literal::from(-7);
        assert_eq!(lit.var, 7);
        assert!(lit.negated);
        assert!(!lit.polarity());
        assert_eq!(lit.to_i32(), -7);
        assert_eq!(Literal::from(3).to_i32(), 3);
    }

    #[test]
    fn test_to_i32_saturates() {
        assert_eq!(Literal::new(usize::MAX, false).to_i32(), i32::MAX);
        assert_eq!(Literal::new(usize::MAX, true).to_i32(), -i32::MAX);
        assert_eq!(Literal::from(i32::MAX).to_i32(), i32::MAX);
    }

    #[test]
    fn test_eval() {
        let mut a = Assignment::new(2);
        let pos = Literal::from(1);
        let neg = Literal::from(-1);

        assert_eq!(pos.eval(&a), Truth::Unknown);
        assert_eq!(neg.eval(&a), Truth::Unknown);

        a.set(1, true);
        assert_eq!(pos.eval(&a), Truth::True);
        assert_eq!(neg.eval(&a), Truth::False);

        a.set(1, false);
        assert_eq!(pos.eval(&a), Truth::False);
        assert_eq!(neg.eval(&a), Truth::True);
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::from(12).to_string(), "x₁₂");
        assert_eq!(Literal::from(-3).to_string(), "x\u{0304}₃");
    }
}
