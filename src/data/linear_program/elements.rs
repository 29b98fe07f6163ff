//! # Building blocks to describe linear programs.
use std::fmt;
use std::ops::Not;

use enum_map::Enum;

/// Direction of optimization.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Objective {
    #[default]
    Maximize,
    Minimize,
}

impl Objective {
    /// Sign that turns this objective into a minimization.
    ///
    /// Minimizing `sign * c^T x` is equivalent to optimizing `c^T x` in this direction.
    #[must_use]
    pub fn minimization_sign(self) -> f64 {
        match self {
            Objective::Maximize => -1_f64,
            Objective::Minimize => 1_f64,
        }
    }
}

/// The dual of a maximization is a minimization and vice versa.
impl Not for Objective {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Objective::Maximize => Objective::Minimize,
            Objective::Minimize => Objective::Maximize,
        }
    }
}

/// The relation between a constraint's left-hand side and its right-hand side.
///
/// Read "from constraint to constraint value": `Less` is `<a, x> <= b`.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConstraintRelation {
    Less,
    Greater,
    Equal,
}

impl ConstraintRelation {
    /// The relation that holds after multiplying both sides by `-1`.
    #[must_use]
    pub fn negated(self) -> Self {
        match self {
            ConstraintRelation::Less => ConstraintRelation::Greater,
            ConstraintRelation::Greater => ConstraintRelation::Less,
            ConstraintRelation::Equal => ConstraintRelation::Equal,
        }
    }

    /// Whether `lhs` and `rhs` satisfy this relation, up to `epsilon`.
    #[must_use]
    pub fn holds(self, lhs: f64, rhs: f64, epsilon: f64) -> bool {
        match self {
            ConstraintRelation::Less => lhs <= rhs + epsilon,
            ConstraintRelation::Greater => lhs >= rhs - epsilon,
            ConstraintRelation::Equal => (lhs - rhs).abs() <= epsilon,
        }
    }
}

impl fmt::Display for ConstraintRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintRelation::Less => "<=",
            ConstraintRelation::Greater => ">=",
            ConstraintRelation::Equal => "=",
        })
    }
}

/// Sign restriction on a single variable.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum SignClass {
    /// `x >= 0`
    #[default]
    NonNegative,
    /// `x <= 0`, substituted by `x = -x'` with `x' >= 0`.
    NonPositive,
    /// No restriction, substituted by `x = x' - x''` with `x', x'' >= 0`.
    Unrestricted,
}

impl SignClass {
    /// Number of non-negative columns this variable occupies after substitution.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            SignClass::NonNegative | SignClass::NonPositive => 1,
            SignClass::Unrestricted => 2,
        }
    }

    /// Whether `value` respects this sign class, up to `epsilon`.
    #[must_use]
    pub fn admits(self, value: f64, epsilon: f64) -> bool {
        match self {
            SignClass::NonNegative => value >= -epsilon,
            SignClass::NonPositive => value <= epsilon,
            SignClass::Unrestricted => true,
        }
    }
}

impl fmt::Display for SignClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignClass::NonNegative => ">= 0",
            SignClass::NonPositive => "<= 0",
            SignClass::Unrestricted => "free",
        })
    }
}

/// State of a solve.
///
/// Every variant except `InProgress` is terminal. `Infeasible` and `Unbounded` are regular
/// outcomes, not errors.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum SolutionState {
    #[default]
    InProgress,
    Optimal,
    Unbounded,
    Infeasible,
}

impl SolutionState {
    /// Whether the solve that produced this state has finished.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, SolutionState::InProgress)
    }
}

impl fmt::Display for SolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolutionState::InProgress => "in progress",
            SolutionState::Optimal => "optimal",
            SolutionState::Unbounded => "unbounded",
            SolutionState::Infeasible => "infeasible",
        })
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{ConstraintRelation, Objective, SignClass, SolutionState};

    #[test]
    fn negate_relation() {
        assert_eq!(ConstraintRelation::Less.negated(), ConstraintRelation::Greater);
        assert_eq!(ConstraintRelation::Greater.negated(), ConstraintRelation::Less);
        assert_eq!(ConstraintRelation::Equal.negated(), ConstraintRelation::Equal);
    }

    #[test]
    fn flip_objective() {
        assert_eq!(!Objective::Maximize, Objective::Minimize);
        assert_eq!(!!Objective::Minimize, Objective::Minimize);
        assert_eq!(Objective::Maximize.minimization_sign(), -1_f64);
    }

    #[test]
    fn relation_holds() {
        let epsilon = 1e-10;
        assert!(ConstraintRelation::Less.holds(1_f64, 1_f64 - 1e-12, epsilon));
        assert!(!ConstraintRelation::Less.holds(1_f64, 0.5_f64, epsilon));
        assert!(ConstraintRelation::Greater.holds(2_f64, 1_f64, epsilon));
        assert!(!ConstraintRelation::Equal.holds(2_f64, 1_f64, epsilon));
    }

    #[test]
    fn sign_class() {
        assert_eq!(SignClass::default(), SignClass::NonNegative);
        assert_eq!(SignClass::Unrestricted.arity(), 2);
        assert!(SignClass::NonPositive.admits(-3_f64, 1e-10));
        assert!(!SignClass::NonNegative.admits(-3_f64, 1e-10));
    }

    #[test]
    fn terminal_states() {
        assert!(!SolutionState::InProgress.is_terminal());
        assert!(SolutionState::Infeasible.is_terminal());
    }
}
