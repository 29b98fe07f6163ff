//! # Linear programs as given by the caller
//!
//! A `LinearProgram` is validated once, on construction, and read-only afterwards. Every solver in
//! this crate takes it by reference.
use std::fmt;

use itertools::Itertools;

use crate::algorithm::SolverOptions;
use crate::data::linear_program::elements::{ConstraintRelation, Objective, SignClass};
use crate::data::linear_program::solution::Solution;
use crate::data::linear_program::standard_form::StandardForm;
use crate::error::{LinearProgramError, Result};

pub mod elements;
pub mod solution;
pub mod standard_form;

/// A linear program: optimize `<c, x>` subject to `<a_i, x> (<=|>=|=) b_i` and sign restrictions
/// on every `x_j`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    /// Direction of optimization.
    objective: Objective,
    /// Objective coefficients, one per variable.
    cost: Vec<f64>,
    /// Constraint rows, each with one coefficient per variable.
    constraints: Vec<Vec<f64>>,
    /// Right-hand side, one per constraint.
    b: Vec<f64>,
    /// Relation of each constraint row to its right-hand side.
    relations: Vec<ConstraintRelation>,
    /// Sign class of each variable.
    sign_classes: Vec<SignClass>,
}

impl LinearProgram {
    /// Create a new linear program in which all variables are non-negative.
    ///
    /// # Arguments
    ///
    /// * `objective`: Direction of optimization.
    /// * `cost`: Objective coefficients. Its length is the number of variables.
    /// * `constraints`: One row per constraint, each of the same length as `cost`.
    /// * `b`: Right-hand side, one value per row of `constraints`.
    /// * `relations`: Relation per row of `constraints`.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if any length disagrees, `NonFinite` if a value is NaN or infinite.
    pub fn new(
        objective: Objective,
        cost: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        b: Vec<f64>,
        relations: Vec<ConstraintRelation>,
    ) -> Result<Self> {
        let sign_classes = vec![SignClass::default(); cost.len()];
        Self::with_sign_classes(objective, cost, constraints, b, relations, sign_classes)
    }

    /// Create a new linear program with an explicit sign class per variable.
    ///
    /// See `new` for the other arguments and the errors.
    pub fn with_sign_classes(
        objective: Objective,
        cost: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        b: Vec<f64>,
        relations: Vec<ConstraintRelation>,
        sign_classes: Vec<SignClass>,
    ) -> Result<Self> {
        let program = Self { objective, cost, constraints, b, relations, sign_classes };
        program.validate()?;

        Ok(program)
    }

    /// Assemble a program from parts that are consistent by construction.
    pub(crate) fn from_parts(
        objective: Objective,
        cost: Vec<f64>,
        constraints: Vec<Vec<f64>>,
        b: Vec<f64>,
        relations: Vec<ConstraintRelation>,
        sign_classes: Vec<SignClass>,
    ) -> Self {
        let program = Self { objective, cost, constraints, b, relations, sign_classes };
        debug_assert_eq!(program.validate(), Ok(()));

        program
    }

    fn validate(&self) -> Result<()> {
        let nr_variables = self.cost.len();
        let nr_constraints = self.constraints.len();

        if self.b.len() != nr_constraints {
            return Err(LinearProgramError::dimension("right-hand side", nr_constraints, self.b.len()));
        }
        if self.relations.len() != nr_constraints {
            return Err(LinearProgramError::dimension("constraint relations", nr_constraints, self.relations.len()));
        }
        if self.sign_classes.len() != nr_variables {
            return Err(LinearProgramError::dimension("variable sign classes", nr_variables, self.sign_classes.len()));
        }
        if let Some((i, row)) = self.constraints.iter().enumerate().find(|(_, row)| row.len() != nr_variables) {
            return Err(LinearProgramError::dimension(format!("constraint row {}", i + 1), nr_variables, row.len()));
        }

        if !self.cost.iter().all(|v| v.is_finite()) {
            return Err(LinearProgramError::NonFinite { what: "objective coefficients".to_string() });
        }
        if let Some(i) = self.constraints.iter().position(|row| !row.iter().all(|v| v.is_finite())) {
            return Err(LinearProgramError::NonFinite { what: format!("constraint row {}", i + 1) });
        }
        if !self.b.iter().all(|v| v.is_finite()) {
            return Err(LinearProgramError::NonFinite { what: "right-hand side".to_string() });
        }

        Ok(())
    }

    /// Direction of optimization.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Objective coefficients.
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    /// Constraint rows.
    pub fn constraints(&self) -> &[Vec<f64>] {
        &self.constraints
    }

    /// Right-hand side.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Constraint relations.
    pub fn relations(&self) -> &[ConstraintRelation] {
        &self.relations
    }

    /// Variable sign classes.
    pub fn sign_classes(&self) -> &[SignClass] {
        &self.sign_classes
    }

    /// Number of variables.
    pub fn nr_variables(&self) -> usize {
        self.cost.len()
    }

    /// Number of constraints.
    pub fn nr_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value `<c, x>`.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        debug_assert_eq!(x.len(), self.nr_variables());

        inner_product(&self.cost, x)
    }

    /// Whether `x` satisfies every constraint and every sign class, up to `epsilon`.
    pub fn is_feasible(&self, x: &[f64], epsilon: f64) -> bool {
        debug_assert_eq!(x.len(), self.nr_variables());

        let constraints_hold = self.constraints.iter()
            .zip_eq(&self.relations)
            .zip_eq(&self.b)
            .all(|((row, relation), &rhs)| relation.holds(inner_product(row, x), rhs, epsilon));
        let signs_hold = self.sign_classes.iter()
            .zip_eq(x)
            .all(|(class, &value)| class.admits(value, epsilon));

        constraints_hold && signs_hold
    }

    /// Rewrite into an equivalent program over non-negative variables with a non-negative
    /// right-hand side.
    pub fn standard_form(&self, epsilon: f64) -> StandardForm {
        StandardForm::from_linear_program(self, epsilon)
    }

    /// Solve with the two-phase simplex method and default options.
    ///
    /// # Errors
    ///
    /// Only when the tableau runs into a numerically degenerate pivot.
    pub fn solve(&self) -> Result<Solution> {
        crate::algorithm::two_phase::solve(self, &SolverOptions::default())
    }

    /// Derive the dual linear program.
    #[must_use]
    pub fn dual(&self) -> LinearProgram {
        crate::algorithm::duality::dual(self)
    }
}

pub(crate) fn inner_product(left: &[f64], right: &[f64]) -> f64 {
    left.iter().zip_eq(right).map(|(l, r)| l * r).sum()
}

/// Name of the original variable with index `j`, as used in all renderings.
pub(crate) fn variable_name(j: usize) -> String {
    format!("x{}", j + 1)
}

/// Write `c_1 name_1 + c_2 name_2 + ...`, skipping zero coefficients.
pub(crate) fn write_linear_combination(
    f: &mut fmt::Formatter<'_>,
    coefficients: &[f64],
    names: impl Fn(usize) -> String,
) -> fmt::Result {
    let mut first = true;
    for (j, &coefficient) in coefficients.iter().enumerate() {
        if coefficient == 0_f64 {
            continue;
        }
        match (first, coefficient < 0_f64) {
            (true, false) => write!(f, "{} {}", coefficient, names(j))?,
            (true, true) => write!(f, "-{} {}", -coefficient, names(j))?,
            (false, false) => write!(f, " + {} {}", coefficient, names(j))?,
            (false, true) => write!(f, " - {} {}", -coefficient, names(j))?,
        }
        first = false;
    }
    if first {
        write!(f, "0")?;
    }

    Ok(())
}

impl fmt::Display for LinearProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.objective {
            Objective::Maximize => "maximize",
            Objective::Minimize => "minimize",
        };
        write!(f, "{direction} Z = ")?;
        write_linear_combination(f, &self.cost, variable_name)?;
        writeln!(f)?;

        writeln!(f, "subject to")?;
        for ((row, relation), rhs) in self.constraints.iter().zip_eq(&self.relations).zip_eq(&self.b) {
            write!(f, "  ")?;
            write_linear_combination(f, row, variable_name)?;
            writeln!(f, " {relation} {rhs}")?;
        }

        let signs = self.sign_classes.iter()
            .enumerate()
            .map(|(j, class)| format!("{} {}", variable_name(j), class))
            .join(", ");
        writeln!(f, "  {signs}")
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{ConstraintRelation, Objective, SignClass};
    use crate::data::linear_program::LinearProgram;
    use crate::error::LinearProgramError;

    #[test]
    fn rejects_mismatched_rhs() {
        let result = LinearProgram::new(
            Objective::Maximize,
            vec![1_f64, 1_f64],
            vec![vec![1_f64, 1_f64]],
            vec![1_f64, 2_f64],
            vec![ConstraintRelation::Less],
        );
        assert_eq!(result, Err(LinearProgramError::InvalidDimension {
            what: "right-hand side".to_string(),
            expected: 1,
            actual: 2,
        }));
    }

    #[test]
    fn rejects_short_row() {
        let result = LinearProgram::new(
            Objective::Minimize,
            vec![1_f64, 1_f64],
            vec![vec![1_f64, 1_f64], vec![1_f64]],
            vec![1_f64, 2_f64],
            vec![ConstraintRelation::Less, ConstraintRelation::Equal],
        );
        assert!(matches!(result, Err(LinearProgramError::InvalidDimension { expected: 2, actual: 1, .. })));
    }

    #[test]
    fn rejects_sign_classes() {
        let result = LinearProgram::with_sign_classes(
            Objective::Minimize,
            vec![1_f64],
            vec![],
            vec![],
            vec![],
            vec![SignClass::NonNegative, SignClass::Unrestricted],
        );
        assert!(matches!(result, Err(LinearProgramError::InvalidDimension { .. })));
    }

    #[test]
    fn rejects_nan() {
        let result = LinearProgram::new(
            Objective::Minimize,
            vec![f64::NAN],
            vec![vec![1_f64]],
            vec![1_f64],
            vec![ConstraintRelation::Greater],
        );
        assert!(matches!(result, Err(LinearProgramError::NonFinite { .. })));
    }

    #[test]
    fn feasibility() {
        let program = LinearProgram::with_sign_classes(
            Objective::Maximize,
            vec![1_f64, 1_f64],
            vec![vec![1_f64, 1_f64], vec![1_f64, -1_f64]],
            vec![2_f64, 0_f64],
            vec![ConstraintRelation::Less, ConstraintRelation::Equal],
            vec![SignClass::NonNegative, SignClass::Unrestricted],
        ).unwrap();

        assert!(program.is_feasible(&[1_f64, 1_f64], 1e-10));
        assert!(!program.is_feasible(&[2_f64, 1_f64], 1e-10));
        assert!(!program.is_feasible(&[-1_f64, -1_f64], 1e-10));
        assert_eq!(program.evaluate(&[1_f64, 1_f64]), 2_f64);
    }

    #[test]
    fn display() {
        let program = LinearProgram::new(
            Objective::Maximize,
            vec![3_f64, 5_f64],
            vec![vec![1_f64, 0_f64], vec![3_f64, -2_f64]],
            vec![4_f64, 18_f64],
            vec![ConstraintRelation::Less, ConstraintRelation::Greater],
        ).unwrap();

        let rendered = program.to_string();
        assert!(rendered.starts_with("maximize Z = 3 x1 + 5 x2\n"));
        assert!(rendered.contains("  1 x1 <= 4\n"));
        assert!(rendered.contains("  3 x1 - 2 x2 >= 18\n"));
        assert!(rendered.contains("x1 >= 0, x2 >= 0"));
    }
}
