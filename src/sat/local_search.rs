#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Pieces shared by the GSAT and WalkSAT engines.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Variable;

/// Creates the random source for an engine: seeded when `seed` is given.
#[must_use]
pub fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

/// Draws a fresh total assignment: every symbol `True` or `False` with probability one half.
pub fn random_assignment(assignment: &mut Assignment, rng: &mut fastrand::Rng) {
    assignment.randomize(rng);
}

/// Picks an element uniformly at random. `None` for an empty slice.
pub fn pick_uniform<T: Copy>(rng: &mut fastrand::Rng, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.usize(..items.len())])
}

/// Collects every candidate that reaches the highest score seen so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BestCandidates {
    best: Option<usize>,
    candidates: Vec<Variable>,
}

impl BestCandidates {
    /// An empty collector with room for `n` tied candidates.
    #[must_use]
    pub fn with_capacity(n: usize) -> Self {
        Self {
            best: None,
            candidates: Vec::with_capacity(n),
        }
    }

    /// Records `var` if `score` ties or beats the best seen so far.
    pub fn offer(&mut self, var: Variable, score: usize) {
        match self.best {
            Some(best) if score < best => {}
            Some(best) if score == best => self.candidates.push(var),
            _ => {
                self.best = Some(score);
                self.candidates.clear();
                self.candidates.push(var);
            }
        }
    }

    /// The highest score offered, if any.
    #[must_use]
    pub const fn best_score(&self) -> Option<usize> {
        self.best
    }

    /// Every symbol offered with the best score.
    #[must_use]
    pub fn candidates(&self) -> &[Variable] {
        &self.candidates
    }

    /// Uniform choice among the maximisers.
    pub fn choose(&self, rng: &mut fastrand::Rng) -> Option<Variable> {
        pick_uniform(rng, &self.candidates)
    }
}

/// Score the formula would have with `var` flipped. The assignment is left
/// as it was found.
pub fn score_with_flip(cnf: &Cnf, assignment: &mut Assignment, var: Variable) -> usize {
    assignment.flip(var);
    let score = cnf.score(assignment);
    assignment.flip(var);
    score
}
