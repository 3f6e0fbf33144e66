//! Log targets, so each component can be filtered with `RUST_LOG`.

/// DPLL search progress.
pub const DPLL: &str = "dpll";
/// GSAT restarts and climbs.
pub const GSAT: &str = "gsat";
/// WalkSAT flips.
pub const WALKSAT: &str = "walksat";
/// DIMACS parsing.
pub const DIMACS: &str = "dimacs";
/// Result files.
pub const OUTPUT: &str = "output";
/// The command-line driver.
pub const CLI: &str = "cli";
