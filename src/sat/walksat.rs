#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! WalkSAT: a random walk over total assignments guided by unsatisfied clauses.
//!
//! Each flip picks an unsatisfied clause uniformly at random. With probability
//! `noise` one of its symbols is flipped blindly; otherwise every symbol of the
//! clause is scored by flipping it alone against the current assignment and
//! one of the best is flipped, ties broken uniformly at random.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::error::ConfigError;
use crate::sat::local_search::{
    BestCandidates, make_rng, pick_uniform, random_assignment, score_with_flip,
};
use crate::sat::solver::{SolutionStats, Solutions, SolveResult, Solver};
use crate::sat::targets::WALKSAT as LOG_WALKSAT;

/// Noise, flip budget and seed for [`WalkSat`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSatConfig {
    noise: f64,
    /// Flips made before giving up.
    pub max_flips: usize,
    /// Seed for the random source; `None` seeds from the environment.
    pub seed: Option<u64>,
}

impl WalkSatConfig {
    /// A configuration with walk probability `noise` and `max_flips` flips.
    ///
    /// # Errors
    ///
    /// `ConfigError::NoiseOutOfRange` unless `0 <= noise <= 1`.
    pub fn new(noise: f64, max_flips: usize) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&noise) {
            return Err(ConfigError::NoiseOutOfRange(noise));
        }
        Ok(Self {
            noise,
            max_flips,
            seed: None,
        })
    }

    /// Fixes the seed for reproducible runs.
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Probability of a random walk step.
    #[must_use]
    pub const fn noise(&self) -> f64 {
        self.noise
    }
}

/// The WalkSAT engine.
#[derive(Debug, Clone)]
pub struct WalkSat {
    /// The formula being solved.
    pub cnf: Cnf,
    /// The current total assignment.
    pub assignment: Assignment,
    /// Noise, budget and seed.
    pub config: WalkSatConfig,
    rng: fastrand::Rng,
    stats: SolutionStats,
}

impl WalkSat {
    /// Creates an engine. The random source is seeded from `config`.
    #[must_use]
    pub fn new(cnf: Cnf, config: WalkSatConfig) -> Self {
        Self {
            assignment: Assignment::new(cnf.num_vars),
            rng: make_rng(config.seed),
            cnf,
            config,
            stats: SolutionStats::default(),
        }
    }

    /// Flips one symbol of a random unsatisfied clause. Returns `false` if
    /// there is nothing to flip.
    fn flip(&mut self) -> bool {
        let unsatisfied = self.cnf.unsatisfied_clauses(&self.assignment);
        let Some(idx) = pick_uniform(&mut self.rng, &unsatisfied) else {
            return false;
        };
        let clause = &self.cnf[idx];
        if clause.is_empty() {
            return false;
        }

        let var = if self.rng.f64() < self.config.noise {
            self.stats.random_walks += 1;
            clause[self.rng.usize(..clause.len())].var
        } else {
            let mut best = BestCandidates::with_capacity(clause.len());
            for lit in clause.iter() {
                best.offer(lit.var, score_with_flip(&self.cnf, &mut self.assignment, lit.var));
            }
            match best.choose(&mut self.rng) {
                Some(var) => var,
                None => return false,
            }
        };

        log::trace!(target: LOG_WALKSAT, "Flip x{var} from clause {idx}");
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

impl Solver for WalkSat {
    fn solve(&mut self) -> SolveResult {
        self.stats = SolutionStats::default();
        log::debug!(
            target: LOG_WALKSAT,
            "Solving with noise {} and {} flips",
            self.config.noise,
            self.config.max_flips
        );

        random_assignment(&mut self.assignment, &mut self.rng);
        self.stats.restarts = 1;

        for _ in 0..self.config.max_flips {
            if let Some(result) = self.satisfied() {
                log::debug!(target: LOG_WALKSAT, "Satisfied: {:?}", self.stats);
                return result;
            }
            if !self.flip() {
                break;
            }
        }

        if let Some(result) = self.satisfied() {
            log::debug!(target: LOG_WALKSAT, "Satisfied by the last flip: {:?}", self.stats);
            return result;
        }

        log::debug!(target: LOG_WALKSAT, "No conclusion: {:?}", self.stats);
        SolveResult::Unknown
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }

    fn name(&self) -> &'static str {
        "walksat"
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
    fn test_config_rejects_bad_noise() {
        assert_eq!(
            WalkSatConfig::new(1.5, 10).unwrap_err(),
            ConfigError::NoiseOutOfRange(1.5)
        );
        assert!(WalkSatConfig::new(-0.1, 10).is_err());
        assert!(WalkSatConfig::new(f64::NAN, 10).is_err());
        assert!(WalkSatConfig::new(0.0, 10).is_ok());
        assert!(WalkSatConfig::new(1.0, 10).is_ok());
    }

    #[test]
    fn test_trivial_clause() {
        let f = cnf(2, &[&[1, 2]]);
        for noise in [0.0, 0.5, 1.0] {
            for seed in 0..50 {
                let config = WalkSatConfig::new(noise, 1).unwrap().with_seed(Some(seed));
                let result = WalkSat::new(f.clone(), config).solve();
                let model = result.solutions().expect("trivial instance must be solved");
                assert!(f.verify(model), "noise {noise} seed {seed}");
            }
        }
    }

    #[test]
    fn test_solves_small_instance() {
        let f = cnf(
            5,
            &[&[1, 2, -3], &[-1, 3], &[-2, 4, 5], &[-4, -5], &[3, -5], &[-1, -2]],
        );
        let config = WalkSatConfig::new(0.5, 10_000).unwrap().with_seed(Some(17));
        let mut solver = WalkSat::new(f.clone(), config);
        let result = solver.solve();
        assert!(f.verify(result.solutions().unwrap()));
        assert!(solver.solutions().values().iter().all(|t| t.is_known()));
    }

    #[test]
    fn test_unsat_gives_no_conclusion() {
        let f = cnf(2, &[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]]);
        let config = WalkSatConfig::new(0.3, 200).unwrap().with_seed(Some(2));
        let mut solver = WalkSat::new(f, config);
        assert_eq!(solver.solve(), SolveResult::Unknown);
        assert_eq!(solver.stats().flips, 200);
        assert!(solver.stats().random_walks > 0);
    }

    #[test]
    fn test_greedy_step_takes_best_flip() {
        // Only x1 can be flipped to satisfy [1] without breaking [-2].
        let f = cnf(2, &[&[1, 2], &[-2]]);
        let config = WalkSatConfig::new(0.0, 1).unwrap().with_seed(Some(4));
        let mut solver = WalkSat::new(f, config);
        solver.assignment.set(1, false);
        solver.assignment.set(2, false);
        assert!(solver.flip());
        assert_eq!(solver.assignment.values(), &[Truth::True, Truth::False]);
        assert_eq!(solver.stats().random_walks, 0);
    }

    #[test]
    fn test_empty_clause_cannot_be_flipped() {
        let f = Cnf::new(1, vec![Vec::<i32>::new()]).unwrap();
        let config = WalkSatConfig::new(0.5, 10).unwrap().with_seed(Some(0));
        let mut solver = WalkSat::new(f, config);
        assert_eq!(solver.solve(), SolveResult::Unknown);
        assert_eq!(solver.stats().flips, 0);
    }
}
