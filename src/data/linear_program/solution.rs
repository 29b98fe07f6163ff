//! # Representation of solve results
//!
//! Once a linear program is solved, a `Solution` is reported in terms of the caller's original
//! variables and constraints, regardless of how the problem was transformed along the way.
use std::fmt;

use enum_map::EnumMap;

use crate::algorithm::two_phase::Phase;
use crate::data::linear_program::elements::{Objective, SolutionState};
use crate::data::linear_program::variable_name;

/// Terminal state of a solve, with the optimum when there is one.
///
/// Only read `values` and `shadow_prices` after checking that `state` is `Optimal`; in the other
/// states they are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    state: SolutionState,
    /// Objective value in the caller's direction of optimization.
    ///
    /// Infinite with the sign of the objective direction when unbounded, zero when infeasible.
    objective_value: f64,
    /// Value per original variable.
    values: Vec<f64>,
    /// Per original constraint, the rate of change of the optimal objective value when its
    /// right-hand side increases.
    shadow_prices: Vec<f64>,
    /// Original constraints found to be linearly dependent on others during phase one.
    redundant_rows: Vec<usize>,
    /// Number of pivots per phase.
    iterations: EnumMap<Phase, usize>,
}

impl Solution {
    /// A finite optimum.
    pub(crate) fn optimal(objective_value: f64, values: Vec<f64>, shadow_prices: Vec<f64>) -> Self {
        Self {
            state: SolutionState::Optimal,
            objective_value,
            values,
            shadow_prices,
            redundant_rows: Vec::new(),
            iterations: EnumMap::default(),
        }
    }

    /// The objective can be improved without limit.
    pub(crate) fn unbounded(objective: Objective, nr_variables: usize, nr_constraints: usize) -> Self {
        let objective_value = match objective {
            Objective::Maximize => f64::INFINITY,
            Objective::Minimize => f64::NEG_INFINITY,
        };

        Self {
            state: SolutionState::Unbounded,
            objective_value,
            ..Self::infeasible(nr_variables, nr_constraints)
        }
    }

    /// No point satisfies all constraints.
    pub(crate) fn infeasible(nr_variables: usize, nr_constraints: usize) -> Self {
        Self {
            state: SolutionState::Infeasible,
            objective_value: 0_f64,
            values: vec![0_f64; nr_variables],
            shadow_prices: vec![0_f64; nr_constraints],
            redundant_rows: Vec::new(),
            iterations: EnumMap::default(),
        }
    }

    pub(crate) fn with_iterations(mut self, iterations: EnumMap<Phase, usize>) -> Self {
        self.iterations = iterations;
        self
    }

    pub(crate) fn with_redundant_rows(mut self, redundant_rows: Vec<usize>) -> Self {
        self.redundant_rows = redundant_rows;
        self
    }

    /// Terminal state.
    pub fn state(&self) -> SolutionState {
        self.state
    }

    /// Whether a finite optimum was found.
    pub fn is_optimal(&self) -> bool {
        self.state == SolutionState::Optimal
    }

    /// Objective value in the caller's direction of optimization.
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// Value per original variable.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Shadow price per original constraint.
    pub fn shadow_prices(&self) -> &[f64] {
        &self.shadow_prices
    }

    /// Indices of original constraints that were dropped as redundant.
    pub fn redundant_rows(&self) -> &[usize] {
        &self.redundant_rows
    }

    /// Pivot count of a phase.
    pub fn iterations(&self, phase: Phase) -> usize {
        self.iterations[phase]
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            SolutionState::Optimal => {
                writeln!(f, "optimal solution, Z = {:.4}", self.objective_value)?;
                for (j, value) in self.values.iter().enumerate() {
                    writeln!(f, "  {} = {:.4}", variable_name(j), value)?;
                }
                if !self.shadow_prices.is_empty() {
                    writeln!(f, "shadow prices")?;
                    for (i, price) in self.shadow_prices.iter().enumerate() {
                        writeln!(f, "  y{} = {:.4}", i + 1, price)?;
                    }
                }
                Ok(())
            },
            SolutionState::Unbounded => writeln!(f, "problem is unbounded"),
            SolutionState::Infeasible => writeln!(f, "problem is infeasible"),
            SolutionState::InProgress => writeln!(f, "solve in progress"),
        }
    }
}
