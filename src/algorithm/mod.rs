//! # Algorithms
//!
//! The two-phase simplex method, the transformation to the dual problem, and an independent
//! vertex enumerator for problems in two variables.
pub mod duality;
pub mod geometry;
pub mod two_phase;
pub(crate) mod utilities;

/// Tolerance for all sign, zero, optimality and ratio comparisons, unless configured otherwise.
pub const EPSILON: f64 = 1e-10;

/// Configuration of a single solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Values within this distance of zero are treated as zero.
    pub epsilon: f64,
    /// Maximum number of pivots over both phases, `None` for no limit.
    ///
    /// There is no anti-cycling rule, so a degenerate problem may cycle without a limit.
    pub max_iterations: Option<usize>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            max_iterations: None,
        }
    }
}
