#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) SAT solver.
//!
//! This module provides the `Dpll` struct, a complete backtracking search over
//! a partial assignment. At every step the formula is evaluated under the
//! current assignment:
//!
//! 1.  **Satisfied:** every clause is true. The assignment is returned; symbols
//!     the search never had to fix stay `Unknown`.
//! 2.  **Falsified:** some clause is false. The search backtracks.
//! 3.  **Undecided:** the two simplification rules are tried in order before
//!     branching:
//!     - **Pure literal:** an unassigned symbol that occurs with a single
//!       polarity in the clauses not yet satisfied is set to that polarity.
//!     - **Unit clause:** a clause that is not yet satisfied and has exactly
//!       one unassigned literal forces that literal.
//!
//!     A forced assignment is never retried with the opposite value: if it
//!     leads to a conflict it is retracted and the failure propagates.
//! 4.  **Decision:** otherwise the lowest-numbered unassigned symbol is set to
//!     `true`, and to `false` if that branch fails.
//!
//! The search does not recurse. Each assignment step is recorded as a
//! [`Frame`] on a heap-allocated stack, so the depth is bounded by the number
//! of symbols rather than by the host call stack. Backtracking pops frames,
//! returning every popped symbol to `Unknown`, until it finds a decision whose
//! `false` branch has not been tried yet. An empty stack means the formula is
//! unsatisfiable.

use crate::sat::assignment::{Assignment, Truth};
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::{SolutionStats, Solutions, SolveResult, Solver};
use crate::sat::targets::DPLL as LOG_DPLL;
use bit_vec::BitVec;

/// Switches for the two simplification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DpllConfig {
    /// Assign pure symbols before branching.
    pub pure_literals: bool,
    /// Assign literals forced by unit clauses before branching.
    pub unit_propagation: bool,
}

impl Default for DpllConfig {
    fn default() -> Self {
        Self {
            pure_literals: true,
            unit_propagation: true,
        }
    }
}

/// One assignment step taken during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Set by the pure-literal or unit-clause rule.
    Forced(Variable),
    /// Set by branching; `value` is the branch currently being explored.
    Decision {
        /// The branching symbol.
        var: Variable,
        /// The value tried on this branch.
        value: bool,
    },
}

/// Represents a DPLL SAT solver.
///
/// The solver owns the formula and the partial assignment it mutates. Calling
/// [`Solver::solve`] again starts over from an empty assignment.
#[derive(Debug, Clone)]
pub struct Dpll {
    /// The formula being solved.
    pub cnf: Cnf,
    /// The current partial assignment.
    pub assignment: Assignment,
    /// Which simplification rules run before each decision.
    pub config: DpllConfig,
    frames: Vec<Frame>,
    stats: SolutionStats,
}

impl Dpll {
    /// Creates a solver with both simplification rules enabled.
    #[must_use]
    pub fn new(cnf: Cnf) -> Self {
        Self::with_config(cnf, DpllConfig::default())
    }

    /// Creates a solver with the given simplification rules.
    #[must_use]
    pub fn with_config(cnf: Cnf, config: DpllConfig) -> Self {
        let assignment = Assignment::new(cnf.num_vars);
        Self {
            frames: Vec::new(),
            cnf,
            assignment,
            config,
            stats: SolutionStats::default(),
        }
    }

    /// The assignment steps currently in effect, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn reset(&mut self) {
        self.assignment.clear();
        self.frames.clear();
        self.stats = SolutionStats::default();
    }

    /// Finds the lowest-numbered pure symbol among the clauses not yet satisfied.
    fn pure_literal(&self) -> Option<Literal> {
        let n = self.cnf.num_vars + 1;
        let mut positive = BitVec::from_elem(n, false);
        let mut negative = BitVec::from_elem(n, false);

        for clause in self.cnf.iter() {
            if clause.eval(&self.assignment).is_true() {
                continue;
            }
            for lit in clause.iter() {
                if self.assignment.is_assigned(lit.var) {
                    continue;
                }
                if lit.negated {
                    negative.set(lit.var, true);
                } else {
                    positive.set(lit.var, true);
                }
            }
        }

        positive
            .iter()
            .zip(negative.iter())
            .position(|(p, n)| p != n)
            .map(|var| Literal::new(var, negative[var]))
    }

    /// Finds the first unit clause in formula order and returns its literal.
    fn unit_literal(&self) -> Option<Literal> {
        self.cnf
            .iter()
            .find_map(|clause| clause.unit_literal(&self.assignment))
    }

    fn force(&mut self, lit: Literal) {
        self.assignment.set(lit.var, lit.polarity());
        self.frames.push(Frame::Forced(lit.var));
    }

    fn decide(&mut self, var: Variable) {
        self.stats.decisions += 1;
        log::trace!(target: LOG_DPLL, "Decide x{var} = true at depth {}", self.frames.len());
        self.assignment.set(var, true);
        self.frames.push(Frame::Decision { var, value: true });
    }

    /// Takes one step from an undecided state. Returns `false` if no step was possible.
    fn step(&mut self) -> bool {
        if self.config.pure_literals {
            if let Some(lit) = self.pure_literal() {
                self.stats.pure_literals += 1;
                log::trace!(target: LOG_DPLL, "Pure symbol {lit}");
                self.force(lit);
                return true;
            }
        }

        if self.config.unit_propagation {
            if let Some(lit) = self.unit_literal() {
                self.stats.propagations += 1;
                log::trace!(target: LOG_DPLL, "Unit clause forces {lit}");
                self.force(lit);
                return true;
            }
        }

        // An undecided formula always mentions an unassigned symbol.
        let Some(var) = self.assignment.first_unassigned() else {
            return false;
        };
        self.decide(var);
        true
    }

    /// Undoes frames up to the most recent decision still on its `true`
    /// branch and switches it to `false`. Returns `false` when the stack runs out.
    fn backtrack(&mut self) -> bool {
        while let Some(frame) = self.frames.pop() {
            match frame {
                Frame::Decision { var, value: true } => {
                    self.stats.decisions += 1;
                    log::trace!(target: LOG_DPLL, "Retry x{var} = false at depth {}", self.frames.len());
                    self.assignment.set(var, false);
                    self.frames.push(Frame::Decision { var, value: false });
                    return true;
                }
                Frame::Forced(var) | Frame::Decision { var, value: false } => {
                    self.assignment.unassign(var);
                }
            }
        }
        false
    }
}

impl Solver for Dpll {
    /// Runs the search to completion. There is no budget: the answer is
    /// either a model or a proof that none exists.
    fn solve(&mut self) -> SolveResult {
        self.reset();
        log::debug!(
            target: LOG_DPLL,
            "Solving {} clauses over {} symbols",
            self.cnf.len(),
            self.cnf.num_vars
        );

        loop {
            let progressed = match self.cnf.eval(&self.assignment) {
                Truth::True => {
                    log::debug!(target: LOG_DPLL, "Satisfied: {:?}", self.stats);
                    return SolveResult::Satisfiable(self.solutions());
                }
                Truth::False => {
                    self.stats.conflicts += 1;
                    false
                }
                Truth::Unknown => self.step(),
            };

            if !progressed && !self.backtrack() {
                log::debug!(target: LOG_DPLL, "Unsatisfiable: {:?}", self.stats);
                return SolveResult::Unsatisfiable;
            }
        }
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }

    fn name(&self) -> &'static str {
        "dpll"
    }
}
