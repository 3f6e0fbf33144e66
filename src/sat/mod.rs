#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod dimacs;
pub mod dpll;
pub mod error;
pub mod gsat;
pub mod literal;
pub mod local_search;
pub mod output;
pub mod solver;
pub mod targets;
pub mod walksat;
