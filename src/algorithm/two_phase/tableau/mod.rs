//! # Data structures for Simplex
//!
//! Contains the simplex tableau and logic for elementary operations which can be performed upon it.
//! The tableau is dense: one row per constraint with a trailing right-hand side, and a separate
//! objective row of relative costs whose last entry is minus the current objective value.
use std::fmt;

use index_utils::remove_indices;
use itertools::Itertools;

use crate::algorithm::two_phase::tableau::registry::{Registry, VariableKind};
use crate::algorithm::utilities::{is_negative, is_positive, is_zero};
use crate::data::linear_program::standard_form::StandardForm;
use crate::error::{LinearProgramError, Result};

pub mod registry;

/// The most high-level data structure that is used by the Simplex algorithm: the Simplex tableau.
///
/// The objective is always minimized. Callers that maximize negate their costs before setting
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    /// Constraint rows of length `nr_columns() + 1`, the last entry being the right-hand side.
    rows: Vec<Vec<f64>>,
    /// Relative costs of length `nr_columns() + 1`, the last entry being minus the objective value.
    objective: Vec<f64>,
    /// Basic column per row.
    basis: Vec<usize>,
    /// Standard form row index per row, which differs from the position once rows are removed.
    row_origins: Vec<usize>,
    /// Kind and name per column.
    registry: Registry,
}

impl Tableau {
    /// Create the phase one tableau.
    ///
    /// Each `<=` row gets a slack that starts in the basis, each `>=` row a surplus and an
    /// artificial, and each `=` row an artificial. The objective row is zero; set it with
    /// `set_objective`.
    pub fn new(standard_form: &StandardForm) -> Self {
        let registry = Registry::for_standard_form(standard_form);
        let nr_columns = registry.len();

        let mut rows = standard_form.constraints().iter()
            .zip_eq(standard_form.b())
            .map(|(constraint, &rhs)| {
                let mut row = Vec::with_capacity(nr_columns + 1);
                row.extend_from_slice(constraint);
                row.resize(nr_columns, 0_f64);
                row.push(rhs);
                row
            })
            .collect::<Vec<_>>();

        let mut basis = vec![usize::MAX; rows.len()];
        for variable in registry.iter() {
            let row = variable.origin;
            match variable.kind {
                VariableKind::Decision => {},
                VariableKind::Slack => {
                    rows[row][variable.column] = 1_f64;
                    basis[row] = variable.column;
                },
                VariableKind::Surplus => rows[row][variable.column] = -1_f64,
                VariableKind::Artificial => {
                    rows[row][variable.column] = 1_f64;
                    basis[row] = variable.column;
                },
            }
        }
        debug_assert!(basis.iter().all(|&column| column < nr_columns));

        Self {
            row_origins: (0..rows.len()).collect(),
            rows,
            objective: vec![0_f64; nr_columns + 1],
            basis,
            registry,
        }
    }

    /// Create the phase two tableau from the final phase one tableau.
    ///
    /// Artificial columns are projected away and the listed rows are dropped. The objective row is
    /// reset to zero.
    ///
    /// # Arguments
    ///
    /// * `rows_to_remove`: Sorted, deduplicated row positions. The basic variable of each of these
    /// rows should be artificial, all other basic variables should not be.
    ///
    /// # Errors
    ///
    /// `ArtificialBasis` if a row that is kept still has an artificial basic variable.
    pub fn into_phase_two(self, rows_to_remove: &[usize]) -> Result<Self> {
        debug_assert!(rows_to_remove.windows(2).all(|pair| pair[0] < pair[1]));

        let artificial_columns = self.registry.artificial_columns();
        let (registry, new_index) = self.registry.without_artificial();

        let mut rows = self.rows;
        let mut basis = self.basis;
        let mut row_origins = self.row_origins;
        remove_indices(&mut rows, rows_to_remove);
        remove_indices(&mut basis, rows_to_remove);
        remove_indices(&mut row_origins, rows_to_remove);

        let basis = basis.into_iter()
            .zip_eq(&row_origins)
            .map(|(column, &origin)| new_index[column].ok_or(LinearProgramError::ArtificialBasis { row: origin }))
            .collect::<Result<Vec<_>>>()?;
        for row in &mut rows {
            remove_indices(row, &artificial_columns);
        }

        Ok(Self {
            objective: vec![0_f64; registry.len() + 1],
            basis,
            rows,
            row_origins,
            registry,
        })
    }

    /// Set the objective row to the given costs and make it consistent with the current basis.
    ///
    /// # Arguments
    ///
    /// * `cost`: Cost per column, of length `self.nr_columns()`.
    pub fn set_objective(&mut self, cost: &[f64]) {
        debug_assert_eq!(cost.len(), self.nr_columns());

        self.objective.clear();
        self.objective.extend_from_slice(cost);
        self.objective.push(0_f64);

        for (row, &column) in self.rows.iter().zip_eq(&self.basis) {
            let factor = self.objective[column];
            if factor != 0_f64 {
                for (target, source) in self.objective.iter_mut().zip_eq(row) {
                    *target -= factor * source;
                }
                self.objective[column] = 0_f64;
            }
        }
    }

    /// Determine the row to pivot on.
    ///
    /// Among the rows with an entry larger than `epsilon` in the pivot column, this is the row with
    /// the smallest ratio between its right-hand side and that entry. Ties go to the row found
    /// first.
    ///
    /// # Return value
    ///
    /// `None` if no entry in the column is positive, meaning that the column is a direction of
    /// unboundedness.
    pub fn select_primal_pivot_row(&self, column: usize, epsilon: f64) -> Option<usize> {
        debug_assert!(column < self.nr_columns());

        let rhs_index = self.nr_columns();
        let mut best: Option<(usize, f64)> = None;
        for (i, row) in self.rows.iter().enumerate() {
            if is_positive(row[column], epsilon) {
                let ratio = row[rhs_index] / row[column];
                if best.is_none_or(|(_, best_ratio)| ratio < best_ratio) {
                    best = Some((i, ratio));
                }
            }
        }

        best.map(|(i, _)| i)
    }

    /// Bring a column into the basis.
    ///
    /// The pivot row is scaled to make the pivot one, after which the column is eliminated from all
    /// other rows including the objective row.
    ///
    /// # Arguments
    ///
    /// * `row`: Row index of the pivot, in range `0` until `self.nr_rows()`.
    /// * `column`: Column index of the pivot, in range `0` until `self.nr_columns()`.
    ///
    /// # Return value
    ///
    /// The column that left the basis.
    ///
    /// # Errors
    ///
    /// `DegeneratePivot` if the pivot element is within `epsilon` of zero. The tableau is not
    /// modified in that case.
    pub fn pivot(&mut self, row: usize, column: usize, epsilon: f64) -> Result<usize> {
        debug_assert!(row < self.nr_rows());
        debug_assert!(column < self.nr_columns());

        let value = self.rows[row][column];
        if is_zero(value, epsilon) {
            return Err(LinearProgramError::DegeneratePivot { row, column, value });
        }

        for entry in &mut self.rows[row] {
            *entry /= value;
        }
        self.rows[row][column] = 1_f64;

        let pivot_row = self.rows[row].clone();
        let others = self.rows.iter_mut()
            .enumerate()
            .filter(|&(i, _)| i != row)
            .map(|(_, other)| other)
            .chain(std::iter::once(&mut self.objective));
        for other in others {
            let factor = other[column];
            if factor != 0_f64 {
                for (target, source) in other.iter_mut().zip_eq(&pivot_row) {
                    *target -= factor * source;
                }
                other[column] = 0_f64;
            }
        }

        Ok(std::mem::replace(&mut self.basis[row], column))
    }

    /// Whether no relative cost is below `-epsilon`.
    pub fn is_optimal(&self, epsilon: f64) -> bool {
        self.objective[..self.nr_columns()].iter().all(|&cost| !is_negative(cost, epsilon))
    }

    /// Relative cost of a column.
    ///
    /// # Arguments
    ///
    /// * `j`: Index of column to calculate the relative cost for, in range `0` until
    /// `self.nr_columns()`.
    pub fn relative_cost(&self, j: usize) -> f64 {
        debug_assert!(j < self.nr_columns());

        self.objective[j]
    }

    /// Single element of a constraint row.
    pub fn entry(&self, row: usize, column: usize) -> f64 {
        self.rows[row][column]
    }

    /// Right-hand side of a constraint row.
    pub fn rhs(&self, row: usize) -> f64 {
        self.rows[row][self.nr_columns()]
    }

    /// Get the current basic feasible solution.
    ///
    /// # Return value
    ///
    /// Value per column: the right-hand side of its row if basic, zero otherwise.
    pub fn current_bfs(&self) -> Vec<f64> {
        let mut values = vec![0_f64; self.nr_columns()];
        for (row, &column) in self.basis.iter().enumerate() {
            values[column] = self.rhs(row);
        }

        values
    }

    /// Get the cost of the current solution.
    ///
    /// # Note
    ///
    /// This is the value of the minimized objective, so the negation of the last entry of the
    /// objective row.
    pub fn objective_function_value(&self) -> f64 {
        -self.objective[self.nr_columns()]
    }

    /// Whether a column is in the basis.
    pub fn is_in_basis(&self, column: usize) -> bool {
        self.basis.contains(&column)
    }

    /// Basic column per row.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Rows whose basic variable is artificial.
    pub fn artificial_basis_rows(&self) -> Vec<usize> {
        self.basis.iter()
            .enumerate()
            .filter(|&(_, &column)| self.registry.kind(column) == VariableKind::Artificial)
            .map(|(i, _)| i)
            .collect()
    }

    /// Standard form row index per row.
    pub fn row_origins(&self) -> &[usize] {
        &self.row_origins
    }

    /// Kind and name per column.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Constraint rows, each with the right-hand side as last entry.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Objective row, with minus the objective value as last entry.
    pub fn objective_row(&self) -> &[f64] {
        &self.objective
    }

    /// Number of constraint rows.
    pub fn nr_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of variable columns, not counting the right-hand side.
    pub fn nr_columns(&self) -> usize {
        self.registry.len()
    }
}

/// Check whether the tableau currently has a valid basic feasible solution.
///
/// Only used for debug purposes.
pub fn is_in_basic_feasible_solution_state(tableau: &Tableau, epsilon: f64) -> bool {
    let tolerance = epsilon.sqrt();

    let rhs_non_negative = (0..tableau.nr_rows()).all(|i| tableau.rhs(i) >= -tolerance);
    let unit_columns = tableau.basis.iter().enumerate().all(|(i, &column)| {
        (0..tableau.nr_rows()).all(|k| {
            let expected = if k == i { 1_f64 } else { 0_f64 };
            (tableau.entry(k, column) - expected).abs() < tolerance
        }) && tableau.relative_cost(column).abs() < tolerance
    });

    rhs_non_negative && unit_columns
}

/// Write a tableau as a table with a column per variable, a row per basic variable and a final
/// objective row.
pub(crate) fn write_table<'a>(
    f: &mut fmt::Formatter<'_>,
    column_names: impl Iterator<Item = &'a str> + Clone,
    basis_names: impl Iterator<Item = &'a str>,
    rows: &[Vec<f64>],
    objective: &[f64],
) -> fmt::Result {
    const WIDTH: usize = 10;

    let nr_columns = column_names.clone().count();
    let separator = "-".repeat((WIDTH + 1) * (nr_columns + 2) + 1);

    write!(f, "{:>WIDTH$} |", "basis")?;
    for name in column_names {
        write!(f, "{name:>WIDTH$}")?;
    }
    writeln!(f, " {:>WIDTH$}", "rhs")?;
    writeln!(f, "{separator}")?;

    for (name, row) in basis_names.zip_eq(rows) {
        write!(f, "{name:>WIDTH$} |")?;
        for value in row {
            write!(f, "{value:>WIDTH$.3}")?;
        }
        writeln!(f)?;
    }
    writeln!(f, "{separator}")?;

    write!(f, "{:>WIDTH$} |", "z")?;
    for value in objective {
        write!(f, "{value:>WIDTH$.3}")?;
    }
    writeln!(f)
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(
            f,
            self.registry.iter().map(|variable| variable.name.as_str()),
            self.basis.iter().map(|&column| self.registry.name(column)),
            &self.rows,
            &self.objective,
        )
    }
}
