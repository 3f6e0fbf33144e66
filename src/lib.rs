#![deny(missing_docs)]
//! Satisfiability engines for propositional formulas in conjunctive normal form.
//!
//! The crate provides a three-valued logic model over clause lists, a complete
//! DPLL search with unit propagation and pure literal elimination, and the
//! GSAT and WalkSAT local search procedures.

/// The `sat` module holds the logic model, the engines and the DIMACS boundary.
pub mod sat;
