//! # Errors raised while building or solving a linear program
//!
//! An infeasible or unbounded problem is not an error: those outcomes are reported through
//! `SolutionState`. The variants here signal malformed input or a numerical defect.
use thiserror::Error;

/// Error type for constructing and solving linear programs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinearProgramError {
    /// Vector or matrix lengths disagree with the variable or constraint count.
    #[error("invalid dimension: {what} has length {actual}, expected {expected}")]
    InvalidDimension {
        /// Which part of the input is malformed.
        what: String,
        /// Length implied by the rest of the problem.
        expected: usize,
        /// Length actually provided.
        actual: usize,
    },

    /// A coefficient is NaN or infinite.
    #[error("non-finite value in {what}")]
    NonFinite {
        /// Which part of the input holds the value.
        what: String,
    },

    /// A pivot element that the ratio test should have guaranteed positive is (close to) zero.
    ///
    /// Signals loss of numerical precision. The solve is aborted and not retried.
    #[error("pivot element {value:e} at row {row}, column {column} is below tolerance")]
    DegeneratePivot {
        /// Tableau row of the pivot.
        row: usize,
        /// Tableau column of the pivot.
        column: usize,
        /// The offending pivot value.
        value: f64,
    },

    /// An artificial variable is still basic in a row that is kept for phase two.
    ///
    /// Phase one either drives these variables out or marks their rows as redundant, so this
    /// signals an internal inconsistency.
    #[error("artificial variable still basic in constraint {row} after phase one")]
    ArtificialBasis {
        /// Standard form row index.
        row: usize,
    },

    /// The configured maximum number of pivots was reached.
    #[error("no terminal state after {0} pivots")]
    IterationLimit(usize),

    /// The problem can't be expressed by the requested solver.
    #[error("unsupported problem: {0}")]
    Unsupported(String),
}

impl LinearProgramError {
    pub(crate) fn dimension(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        LinearProgramError::InvalidDimension { what: what.into(), expected, actual }
    }
}

/// Result type for linear program operations.
pub type Result<T> = std::result::Result<T, LinearProgramError>;
