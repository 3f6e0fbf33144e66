#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! GSAT: random restarts followed by greedy hill climbing.
//!
//! Each restart draws a random total assignment. Each climb flips the symbol
//! whose flip gives the highest number of satisfied clauses, with ties broken
//! uniformly at random. A flip is made on every climb, even when no candidate
//! improves on the current score. The search is incomplete: running out of
//! restarts and climbs says nothing about satisfiability.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::local_search::{BestCandidates, make_rng, random_assignment, score_with_flip};
use crate::sat::solver::{SolutionStats, Solutions, SolveResult, Solver};
use crate::sat::targets::GSAT as LOG_GSAT;
use clap::ValueEnum;
use std::fmt::{Display, Formatter};

/// How the candidate flips of one climb are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum SuccessorScan {
    /// Every candidate is scored against the same baseline assignment.
    #[default]
    Independent,
    /// Trial flips are not undone, so each candidate is scored on top of the
    /// candidates scanned before it. The chosen symbol is then flipped on the
    /// fully scanned assignment.
    Cumulative,
}

impl Display for SuccessorScan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Independent => write!(f, "independent"),
            Self::Cumulative => write!(f, "cumulative"),
        }
    }
}

/// Search budget and options for [`Gsat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GsatConfig {
    /// Number of random assignments to climb from.
    pub max_restarts: usize,
    /// Flips made from each random assignment.
    pub max_climbs: usize,
    /// How candidate flips are scored.
    pub scan: SuccessorScan,
    /// Seed for the random source; `None` seeds from the environment.
    pub seed: Option<u64>,
}

impl GsatConfig {
    /// A budget of `max_restarts` restarts of `max_climbs` climbs each.
    #[must_use]
    pub const fn new(max_restarts: usize, max_climbs: usize) -> Self {
        Self {
            max_restarts,
            max_climbs,
            scan: SuccessorScan::Independent,
            seed: None,
        }
    }

    /// Sets the successor scan.
    #[must_use]
    pub const fn with_scan(mut self, scan: SuccessorScan) -> Self {
        self.scan = scan;
        self
    }

    /// Fixes the seed for reproducible runs.
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// The GSAT engine.
#[derive(Debug, Clone)]
pub struct Gsat {
    /// The formula being solved.
    pub cnf: Cnf,
    /// The current total assignment.
    pub assignment: Assignment,
    /// Budget and options.
    pub config: GsatConfig,
    rng: fastrand::Rng,
    stats: SolutionStats,
}

impl Gsat {
    /// Creates an engine. The random source is seeded from `config`.
    #[must_use]
    pub fn new(cnf: Cnf, config: GsatConfig) -> Self {
        Self {
            assignment: Assignment::new(cnf.num_vars),
            rng: make_rng(config.seed),
            cnf,
            config,
            stats: SolutionStats::default(),
        }
    }

    /// Applies one climb. Returns `false` if there is nothing to flip.
    fn climb(&mut self) -> bool {
        let mut best = BestCandidates::with_capacity(self.cnf.num_vars);

        for var in 1..=self.cnf.num_vars {
            let score = match self.config.scan {
                SuccessorScan::Independent => score_with_flip(&self.cnf, &mut self.assignment, var),
                SuccessorScan::Cumulative => {
                    self.assignment.flip(var);
                    self.cnf.score(&self.assignment)
                }
            };
            best.offer(var, score);
        }

        let Some(var) = best.choose(&mut self.rng) else {
            return false;
        };
        log::trace!(
            target: LOG_GSAT,
            "Flip x{var} among {} candidates scoring {:?}",
            best.candidates().len(),
            best.best_score()
        );
        self.assignment.flip(var);
        self.stats.flips += 1;
        true
    }

    fn satisfied(&self) -> Option<SolveResult> {
        self.cnf
            .is_satisfied(&self.assignment)
            .then(|| SolveResult::Satisfiable(self.solutions()))
    }
}

impl Solver for Gsat {
    fn solve(&mut self) -> SolveResult {
        self.stats = SolutionStats::default();
        log::debug!(
            target: LOG_GSAT,
            "Solving with {} restarts of {} climbs ({:?} scan)",
            self.config.max_restarts,
            self.config.max_climbs,
            self.config.scan
        );

        for restart in 0..self.config.max_restarts {
            random_assignment(&mut self.assignment, &mut self.rng);
            self.stats.restarts += 1;

            for _ in 0..self.config.max_climbs {
                if let Some(result) = self.satisfied() {
                    log::debug!(target: LOG_GSAT, "Satisfied in restart {restart}: {:?}", self.stats);
                    return result;
                }
                if !self.climb() {
                    break;
                }
            }

            if let Some(result) = self.satisfied() {
                log::debug!(target: LOG_GSAT, "Satisfied by the last climb of restart {restart}");
                return result;
            }
            log::trace!(
                target: LOG_GSAT,
                "Restart {restart} ended with score {}/{}",
                self.cnf.score(&self.assignment),
                self.cnf.len()
            );
        }

        log::debug!(target: LOG_GSAT, "No conclusion: {:?}", self.stats);
        SolveResult::Unknown
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }

    fn name(&self) -> &'static str {
        "gsat"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::Truth;

    fn cnf(num_vars: usize, clauses: &[&[i32]]) -> Cnf {
        Cnf::new(num_vars, clauses.iter().map(|c| c.iter().copied())).unwrap()
    }

    #[test]
    fn test_trivial_clause_both_scans() {
        let f = cnf(2, &[&[1, 2]]);
        for scan in [SuccessorScan::Independent, SuccessorScan::Cumulative] {
            for seed in 0..50 {
                let config = GsatConfig::new(1, 1).with_scan(scan).with_seed(Some(seed));
                let mut solver = Gsat::new(f.clone(), config);
                let result = solver.solve();
                let model = result.solutions().expect("trivial instance must be solved");
                assert!(f.verify(model), "{scan:?} seed {seed}");
            }
        }
    }

    #[test]
    fn test_result_is_total_and_sound() {
        let f = cnf(4, &[&[1, -2], &[2, 3], &[-3, 4], &[-1, -4, 2]]);
        let mut solver = Gsat::new(f.clone(), GsatConfig::new(20, 50).with_seed(Some(3)));
        let result = solver.solve();
        let model = result.solutions().unwrap();
        assert!(f.verify(model));
        assert!(model.values().iter().all(|t| t.is_known()));
        assert_eq!(solver.solutions(), *model);
    }

    #[test]
    fn test_unsat_gives_no_conclusion() {
        let f = cnf(1, &[&[1], &[-1]]);
        let mut solver = Gsat::new(f, GsatConfig::new(3, 4).with_seed(Some(8)));
        assert_eq!(solver.solve(), SolveResult::Unknown);
        assert_eq!(solver.stats().restarts, 3);
        assert_eq!(solver.stats().flips, 12);
    }

    #[test]
    fn test_zero_budget_gives_no_conclusion() {
        let f = cnf(2, &[&[1, 2]]);
        let mut solver = Gsat::new(f, GsatConfig::new(0, 10).with_seed(Some(1)));
        assert_eq!(solver.solve(), SolveResult::Unknown);
        assert_eq!(solver.solutions().values(), &[Truth::Unknown; 2]);
    }

    #[test]
    fn test_cumulative_scan_flips_against_scanned_state() {
        // Every symbol is pinned by a unit clause, so the cumulative scan ends on
        // the complement of the start and the chosen flip is relative to that.
        let f = cnf(3, &[&[1], &[2], &[3]]);
        let mut solver = Gsat::new(
            f.clone(),
            GsatConfig::new(1, 1)
                .with_scan(SuccessorScan::Cumulative)
                .with_seed(Some(5)),
        );
        solver.assignment.set(1, false);
        solver.assignment.set(2, false);
        solver.assignment.set(3, false);
        assert!(solver.climb());
        // Scores after x1, x1+x2, x1+x2+x3: 1, 2, 3. Best is x3, flipped back off.
        assert_eq!(solver.assignment.values(), &[Truth::True, Truth::True, Truth::False]);
    }

    #[test]
    fn test_independent_scan_picks_best_single_flip() {
        let f = cnf(3, &[&[1], &[2], &[3]]);
        let mut solver = Gsat::new(f, GsatConfig::new(1, 1).with_seed(Some(5)));
        solver.assignment.set(1, false);
        solver.assignment.set(2, true);
        solver.assignment.set(3, true);
        assert!(solver.climb());
        assert!(solver.assignment.values().iter().all(|t| *t == Truth::True));
    }

    #[test]
    fn test_no_symbols_to_flip() {
        let f = Cnf::new(0, vec![Vec::<i32>::new()]).unwrap();
        let mut solver = Gsat::new(f, GsatConfig::new(2, 5).with_seed(Some(0)));
        assert_eq!(solver.solve(), SolveResult::Unknown);
        assert_eq!(solver.stats().flips, 0);
    }
}
