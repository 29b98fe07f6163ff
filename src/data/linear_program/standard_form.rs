//! # Linear programs over non-negative variables
//!
//! Before a tableau can be built, two things have to hold: every right-hand side is non-negative
//! and every variable is implicitly non-negative. This module rewrites a `LinearProgram` into that
//! shape and remembers how to fold a solution back.
use std::ops::Range;

use itertools::Itertools;

use crate::data::linear_program::elements::{ConstraintRelation, Objective, SignClass};
use crate::data::linear_program::{variable_name, LinearProgram};

/// A linear program in which all variables are non-negative and `b >= 0`.
///
/// The objective direction is unchanged; turning it into a minimization is left to the tableau.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm {
    objective: Objective,
    /// Cost per transformed column.
    cost: Vec<f64>,
    /// Rows over the transformed columns, possibly negated w.r.t. the original.
    constraints: Vec<Vec<f64>>,
    /// Non-negative right-hand side.
    b: Vec<f64>,
    /// Relations after normalization of `b`.
    relations: Vec<ConstraintRelation>,
    /// `-1` for the rows that were negated to make `b` non-negative, `1` otherwise.
    row_signs: Vec<f64>,
    /// One entry per original variable.
    substitutions: Vec<Substitution>,
}

/// How one original variable is represented by transformed columns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// First transformed column.
    pub column: usize,
    /// Sign class of the original variable, which determines the arity.
    pub sign_class: SignClass,
}

impl Substitution {
    /// Number of transformed columns.
    pub fn arity(&self) -> usize {
        self.sign_class.arity()
    }

    /// Transformed columns used by this variable.
    pub fn columns(&self) -> Range<usize> {
        self.column..self.column + self.arity()
    }

    /// Coefficients of the transformed columns for an original coefficient `value`.
    fn extend_coefficients(&self, value: f64, target: &mut Vec<f64>) {
        match self.sign_class {
            SignClass::NonNegative => target.push(value),
            SignClass::NonPositive => target.push(-value),
            SignClass::Unrestricted => target.extend([value, -value]),
        }
    }

    /// Compute the original variable's value from the transformed column values.
    ///
    /// # Arguments
    ///
    /// * `transformed`: Values of all transformed columns (at least up to this variable's last).
    pub fn fold(&self, transformed: &[f64]) -> f64 {
        match self.sign_class {
            SignClass::NonNegative => transformed[self.column],
            SignClass::NonPositive => -transformed[self.column],
            SignClass::Unrestricted => transformed[self.column] - transformed[self.column + 1],
        }
    }

    /// Non-negative column values that fold back to `value`.
    ///
    /// The value should respect the sign class; an unrestricted value is split in its positive and
    /// negative part.
    pub fn unfold(&self, value: f64) -> Vec<f64> {
        match self.sign_class {
            SignClass::NonNegative => vec![value],
            SignClass::NonPositive => vec![-value],
            SignClass::Unrestricted => vec![value.max(0_f64), (-value).max(0_f64)],
        }
    }

    /// Names of the transformed columns, given the original variable index.
    fn names(&self, j: usize) -> Vec<String> {
        let name = variable_name(j);
        match self.sign_class {
            SignClass::NonNegative => vec![name],
            SignClass::NonPositive => vec![format!("{name}'")],
            SignClass::Unrestricted => vec![format!("{name}+"), format!("{name}-")],
        }
    }
}

impl StandardForm {
    /// Normalize the right-hand side and substitute all sign classes.
    ///
    /// # Arguments
    ///
    /// * `program`: Validated linear program.
    /// * `epsilon`: Right-hand side values below `-epsilon` are considered negative.
    pub fn from_linear_program(program: &LinearProgram, epsilon: f64) -> Self {
        let mut substitutions = Vec::with_capacity(program.nr_variables());
        let mut column = 0;
        for &sign_class in program.sign_classes() {
            substitutions.push(Substitution { column, sign_class });
            column += sign_class.arity();
        }
        let nr_columns = column;

        let substitute = |coefficients: &[f64]| {
            let mut row = Vec::with_capacity(nr_columns);
            for (substitution, &value) in substitutions.iter().zip_eq(coefficients) {
                substitution.extend_coefficients(value, &mut row);
            }
            debug_assert_eq!(row.len(), nr_columns);
            row
        };

        let cost = substitute(program.cost());

        let mut constraints = Vec::with_capacity(program.nr_constraints());
        let mut b = Vec::with_capacity(program.nr_constraints());
        let mut relations = Vec::with_capacity(program.nr_constraints());
        let mut row_signs = Vec::with_capacity(program.nr_constraints());
        for ((row, &relation), &rhs) in program.constraints().iter()
            .zip_eq(program.relations())
            .zip_eq(program.b()) {
            let mut row = substitute(row);
            if rhs < -epsilon {
                for value in &mut row {
                    *value = -*value;
                }
                constraints.push(row);
                b.push(-rhs);
                relations.push(relation.negated());
                row_signs.push(-1_f64);
            } else {
                constraints.push(row);
                b.push(rhs);
                relations.push(relation);
                row_signs.push(1_f64);
            }
        }

        let standard_form = Self {
            objective: program.objective(),
            cost,
            constraints,
            b,
            relations,
            row_signs,
            substitutions,
        };
        debug_assert!(standard_form.is_consistent(epsilon));

        standard_form
    }

    fn is_consistent(&self, epsilon: f64) -> bool {
        let nr_columns = self.nr_columns();

        self.cost.len() == nr_columns
            && self.constraints.iter().all(|row| row.len() == nr_columns)
            && self.b.iter().all(|&value| value >= -epsilon)
            && self.b.len() == self.constraints.len()
            && self.relations.len() == self.constraints.len()
            && self.row_signs.len() == self.constraints.len()
    }

    /// Direction of optimization.
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Cost per transformed column.
    pub fn cost(&self) -> &[f64] {
        &self.cost
    }

    /// Rows over the transformed columns.
    pub fn constraints(&self) -> &[Vec<f64>] {
        &self.constraints
    }

    /// Non-negative right-hand side.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Relations after normalization.
    pub fn relations(&self) -> &[ConstraintRelation] {
        &self.relations
    }

    /// `-1` for each row that was negated, `1` otherwise.
    pub fn row_signs(&self) -> &[f64] {
        &self.row_signs
    }

    /// Back-substitution map, indexed by original variable.
    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    /// Number of transformed columns.
    pub fn nr_columns(&self) -> usize {
        self.substitutions.last().map_or(0, |last| last.column + last.arity())
    }

    /// Number of rows.
    pub fn nr_rows(&self) -> usize {
        self.constraints.len()
    }

    /// Display names of the transformed columns.
    pub fn column_names(&self) -> Vec<String> {
        self.substitutions.iter()
            .enumerate()
            .flat_map(|(j, substitution)| substitution.names(j))
            .collect()
    }

    /// Fold transformed column values back into the original variable space.
    ///
    /// # Arguments
    ///
    /// * `transformed`: Value per transformed column, of length `self.nr_columns()`.
    ///
    /// # Return value
    ///
    /// Value per original variable.
    pub fn reconstruct(&self, transformed: &[f64]) -> Vec<f64> {
        debug_assert_eq!(transformed.len(), self.nr_columns());

        self.substitutions.iter().map(|substitution| substitution.fold(transformed)).collect()
    }

    /// Inverse of `reconstruct` for values that respect the sign classes.
    pub fn deconstruct(&self, original: &[f64]) -> Vec<f64> {
        debug_assert_eq!(original.len(), self.substitutions.len());

        self.substitutions.iter()
            .zip_eq(original)
            .flat_map(|(substitution, &value)| substitution.unfold(value))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_program::elements::{ConstraintRelation, Objective, SignClass};
    use crate::data::linear_program::standard_form::{StandardForm, Substitution};
    use crate::data::linear_program::LinearProgram;

    fn program() -> LinearProgram {
        LinearProgram::with_sign_classes(
            Objective::Minimize,
            vec![1_f64, 2_f64, 3_f64],
            vec![
                vec![1_f64, 1_f64, 1_f64],
                vec![2_f64, -1_f64, 4_f64],
            ],
            vec![5_f64, -6_f64],
            vec![ConstraintRelation::Less, ConstraintRelation::Less],
            vec![SignClass::NonNegative, SignClass::NonPositive, SignClass::Unrestricted],
        ).unwrap()
    }

    #[test]
    fn substitute_sign_classes() {
        let standard_form = StandardForm::from_linear_program(&program(), 1e-10);

        assert_eq!(standard_form.nr_columns(), 4);
        assert_eq!(standard_form.cost(), &[1_f64, -2_f64, 3_f64, -3_f64]);
        assert_eq!(standard_form.constraints()[0], vec![1_f64, -1_f64, 1_f64, -1_f64]);
        assert_eq!(standard_form.substitutions(), &[
            Substitution { column: 0, sign_class: SignClass::NonNegative },
            Substitution { column: 1, sign_class: SignClass::NonPositive },
            Substitution { column: 2, sign_class: SignClass::Unrestricted },
        ]);
        assert_eq!(standard_form.column_names(), vec!["x1", "x2'", "x3+", "x3-"]);
    }

    #[test]
    fn make_b_non_negative() {
        let standard_form = StandardForm::from_linear_program(&program(), 1e-10);

        assert_eq!(standard_form.b(), &[5_f64, 6_f64]);
        assert_eq!(standard_form.relations(), &[ConstraintRelation::Less, ConstraintRelation::Greater]);
        assert_eq!(standard_form.row_signs(), &[1_f64, -1_f64]);
        // 2 x1 - x2 + 4 x3 with x2 = -x2', x3 = x3+ - x3-, negated
        assert_eq!(standard_form.constraints()[1], vec![-2_f64, -1_f64, -4_f64, 4_f64]);
    }

    #[test]
    fn tiny_negative_rhs_is_kept() {
        let program = LinearProgram::new(
            Objective::Maximize,
            vec![1_f64],
            vec![vec![1_f64]],
            vec![-1e-12],
            vec![ConstraintRelation::Less],
        ).unwrap();
        let standard_form = StandardForm::from_linear_program(&program, 1e-10);

        assert_eq!(standard_form.relations(), &[ConstraintRelation::Less]);
        assert_eq!(standard_form.row_signs(), &[1_f64]);
    }

    #[test]
    fn reconstruct() {
        let standard_form = StandardForm::from_linear_program(&program(), 1e-10);

        let original = standard_form.reconstruct(&[1_f64, 2_f64, 3_f64, 5_f64]);
        assert_eq!(original, vec![1_f64, -2_f64, -2_f64]);
        assert_eq!(standard_form.deconstruct(&original), vec![1_f64, 2_f64, 0_f64, 2_f64]);
        assert_eq!(standard_form.reconstruct(&standard_form.deconstruct(&original)), original);
    }
}
