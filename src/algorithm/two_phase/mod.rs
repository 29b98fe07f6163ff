//! # The Simplex algorithm
//!
//! This module contains all data structures and logic specific to the two-phase simplex method.
//! The algorithm is implemented as described in chapters 2 and 4 of Combinatorial Optimization, a
//! book by Christos H. Papadimitriou and Kenneth Steiglitz.
//!
//! A linear program is first rewritten into standard form. Phase one then looks for a basic
//! feasible solution by minimizing the sum of artificial variables. Phase two continues from that
//! basis, without the artificial columns, to minimize the real objective. The final tableau is
//! mapped back to the caller's variables and constraints.
use std::fmt;

use enum_map::{Enum, EnumMap};
use itertools::Itertools;
use log::{debug, info, warn};

use crate::algorithm::SolverOptions;
use crate::algorithm::two_phase::phase_one::{Rank, RankedFeasibilityResult};
use crate::algorithm::two_phase::strategy::pivot_rule::{Dantzig, PivotRule};
use crate::algorithm::two_phase::tableau::registry::VariableKind;
use crate::algorithm::two_phase::tableau::Tableau;
use crate::algorithm::two_phase::trace::{PivotEvent, TraceSink};
use crate::data::linear_algebra;
use crate::data::linear_program::solution::Solution;
use crate::data::linear_program::standard_form::StandardForm;
use crate::data::linear_program::LinearProgram;
use crate::error::{LinearProgramError, Result};

pub mod phase_one;
pub mod phase_two;
pub mod strategy;
pub mod tableau;
pub mod trace;

/// The two phases of the method.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Phase {
    /// Finding a basic feasible solution.
    One,
    /// Optimizing the objective.
    Two,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::One => f.write_str("phase 1"),
            Phase::Two => f.write_str("phase 2"),
        }
    }
}

/// Outcome of running the simplex iterations on a feasible tableau.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum OptimizationResult {
    /// No column has a negative relative cost.
    FiniteOptimum,
    /// A column with negative relative cost has no positive entry.
    Unbounded,
}

/// Pivot counts per phase, with an optional limit on their total.
#[derive(Debug, Clone)]
pub(crate) struct Iterations {
    counts: EnumMap<Phase, usize>,
    limit: Option<usize>,
}

impl Iterations {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self { counts: EnumMap::default(), limit }
    }

    /// Register a pivot.
    ///
    /// # Return value
    ///
    /// The one-based count of the pivot within its phase.
    ///
    /// # Errors
    ///
    /// `IterationLimit` if the limit was already reached.
    pub(crate) fn tick(&mut self, phase: Phase) -> Result<usize> {
        if let Some(limit) = self.limit {
            if self.counts.values().sum::<usize>() >= limit {
                return Err(LinearProgramError::IterationLimit(limit));
            }
        }

        self.counts[phase] += 1;
        Ok(self.counts[phase])
    }

    pub(crate) fn counts(&self) -> EnumMap<Phase, usize> {
        self.counts
    }
}

/// Solve a linear program with the two-phase simplex method using Dantzig's rule.
///
/// # Return value
///
/// A solution in terms of the original variables and constraints. Infeasibility and unboundedness
/// are reported through its state.
///
/// # Errors
///
/// When a pivot element is numerically zero, or when the iteration limit is reached.
pub fn solve(program: &LinearProgram, options: &SolverOptions) -> Result<Solution> {
    solve_with::<Dantzig, _>(program, options, &mut ())
}

/// Solve a linear program with the two-phase simplex method.
///
/// # Arguments
///
/// * `program`: Problem to solve.
/// * `options`: Tolerance and iteration limit.
/// * `sink`: Receives every tableau and every pivot; pass `&mut ()` to ignore them.
///
/// # Errors
///
/// When a pivot element is numerically zero, or when the iteration limit is reached.
pub fn solve_with<PR, S>(
    program: &LinearProgram,
    options: &SolverOptions,
    sink: &mut S,
) -> Result<Solution>
where
    PR: PivotRule,
    S: TraceSink + ?Sized,
{
    let (nr_variables, nr_constraints) = (program.nr_variables(), program.nr_constraints());
    let standard_form = program.standard_form(options.epsilon);
    let mut tableau = Tableau::new(&standard_form);
    debug!(
        "standard form with {} rows, {} decision and {} artificial columns",
        tableau.nr_rows(),
        tableau.registry().count(VariableKind::Decision),
        tableau.registry().count(VariableKind::Artificial),
    );

    let mut iterations = Iterations::new(options.max_iterations);
    let rows_to_remove = match phase_one::primal::<PR, _>(&mut tableau, options, &mut iterations, sink)? {
        RankedFeasibilityResult::Feasible { rank: Rank::Full } => Vec::new(),
        RankedFeasibilityResult::Feasible { rank: Rank::Deficient(rows) } => {
            warn!(
                "constraints {} are redundant and were removed",
                rows.iter().map(|&row| tableau.row_origins()[row] + 1).join(", "),
            );
            rows
        },
        RankedFeasibilityResult::Infeasible => {
            info!("problem is infeasible");
            return Ok(Solution::infeasible(nr_variables, nr_constraints).with_iterations(iterations.counts()));
        },
    };
    let redundant_rows = rows_to_remove.iter()
        .map(|&row| tableau.row_origins()[row])
        .collect::<Vec<_>>();

    let mut tableau = tableau.into_phase_two(&rows_to_remove)?;
    let solution = match phase_two::primal::<PR, _>(&mut tableau, &standard_form, options, &mut iterations, sink)? {
        OptimizationResult::FiniteOptimum => {
            let solution = extract(&tableau, &standard_form, options.epsilon);
            info!("optimal, objective value {}", solution.objective_value());
            solution
        },
        OptimizationResult::Unbounded => {
            info!("problem is unbounded");
            Solution::unbounded(program.objective(), nr_variables, nr_constraints)
        },
    };

    Ok(solution.with_redundant_rows(redundant_rows).with_iterations(iterations.counts()))
}

/// Pivot until the tableau is optimal or shown to be unbounded.
pub(crate) fn iterate<PR, S>(
    tableau: &mut Tableau,
    phase: Phase,
    options: &SolverOptions,
    iterations: &mut Iterations,
    sink: &mut S,
) -> Result<OptimizationResult>
where
    PR: PivotRule,
    S: TraceSink + ?Sized,
{
    let epsilon = options.epsilon;

    let mut rule = PR::new();
    loop {
        debug_assert!(tableau::is_in_basic_feasible_solution_state(tableau, epsilon));

        match rule.select_primal_pivot_column(tableau, epsilon) {
            Some(column) => match tableau.select_primal_pivot_row(column, epsilon) {
                Some(row) => {
                    let iteration = iterations.tick(phase)?;
                    let leaving = tableau.pivot(row, column, epsilon)?;
                    sink.pivot(&PivotEvent { phase, iteration, entering: column, leaving, row, tableau: &*tableau });
                },
                None => break Ok(OptimizationResult::Unbounded),
            },
            None => break Ok(OptimizationResult::FiniteOptimum),
        }
    }
}

/// Read the optimum off an optimal phase two tableau.
fn extract(tableau: &Tableau, standard_form: &StandardForm, epsilon: f64) -> Solution {
    let bfs = tableau.current_bfs();
    let mut transformed = vec![0_f64; standard_form.nr_columns()];
    for variable in tableau.registry().iter().filter(|variable| variable.kind == VariableKind::Decision) {
        transformed[variable.origin] = bfs[variable.column];
    }
    let values = standard_form.reconstruct(&transformed);

    // Adding zero turns a negative zero into a positive one
    let objective_value = standard_form.objective().minimization_sign() * tableau.objective_function_value() + 0_f64;

    Solution::optimal(objective_value, values, shadow_prices(tableau, standard_form, epsilon))
}

/// Rate of change of the optimal objective value per unit increase of each constraint's
/// right-hand side.
///
/// The simplex multipliers `y` solve `B^T y = c_B`, where `B` holds the standard form columns of
/// the basic variables. They are mapped back to the caller's direction of optimization and to the
/// caller's orientation of each row. Removed rows get a price of zero.
fn shadow_prices(tableau: &Tableau, standard_form: &StandardForm, epsilon: f64) -> Vec<f64> {
    let registry = tableau.registry();
    let row_origins = tableau.row_origins();

    let original_column = |column: usize| -> Vec<f64> {
        let variable = registry.get(column);
        row_origins.iter()
            .map(|&i| match variable.kind {
                VariableKind::Decision => standard_form.constraints()[i][variable.origin],
                VariableKind::Slack | VariableKind::Artificial if variable.origin == i => 1_f64,
                VariableKind::Surplus if variable.origin == i => -1_f64,
                _ => 0_f64,
            })
            .collect()
    };

    let cost = phase_two::cost(registry, standard_form);
    let transposed_basis = tableau.basis().iter().map(|&column| original_column(column)).collect();
    let basic_cost = tableau.basis().iter().map(|&column| cost[column]).collect();

    let mut prices = vec![0_f64; standard_form.nr_rows()];
    match linear_algebra::solve(transposed_basis, basic_cost, epsilon) {
        Some(multipliers) => {
            let sign = standard_form.objective().minimization_sign();
            for (&i, multiplier) in row_origins.iter().zip_eq(multipliers) {
                prices[i] = sign * standard_form.row_signs()[i] * multiplier + 0_f64;
            }
        },
        None => warn!("basis matrix is numerically singular, shadow prices are not available"),
    }

    prices
}
