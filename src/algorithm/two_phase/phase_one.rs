//! # Phase one
//!
//! Minimize the sum of the artificial variables to find a basic feasible solution of the standard
//! form, or to prove that there is none.
use log::{debug, warn};

use crate::algorithm::SolverOptions;
use crate::algorithm::two_phase::{iterate, Iterations, OptimizationResult, Phase};
use crate::algorithm::two_phase::strategy::pivot_rule::PivotRule;
use crate::algorithm::two_phase::tableau::registry::VariableKind;
use crate::algorithm::two_phase::tableau::Tableau;
use crate::algorithm::two_phase::trace::{PivotEvent, TraceSink};
use crate::algorithm::utilities::{is_positive, is_zero};
use crate::error::Result;

/// LP's can be either feasible (allowing at least one solution) or infeasible (allowing no
/// solutions).
///
/// If the problem is feasible, it can either have full rank, or be rank deficient.
#[derive(Debug, Eq, PartialEq)]
pub enum RankedFeasibilityResult {
    /// The tableau holds a basic feasible solution without artificial variables, except possibly
    /// in the rows listed by `rank`.
    Feasible {
        /// Whether the problem needs rows to be removed.
        rank: Rank,
    },
    /// The problem is not feasible.
    Infeasible,
}

/// A matrix or linear program either has full rank, or be rank deficient.
///
/// In case it is rank deficient, a sorted, deduplicated list of (row)indices should be provided,
/// that when removed, makes the matrix or linear program full rank.
#[derive(Debug, Eq, PartialEq)]
pub enum Rank {
    /// The matrix is full rank, no rows need to be removed.
    Full,
    /// The `Vec<usize>` is sorted and contains no duplicate values.
    Deficient(Vec<usize>),
}

/// Reduces the artificial cost of the basic feasible solution to zero, if possible. In doing so, a
/// basic feasible solution to the standard form linear program is found.
///
/// # Arguments
///
/// * `tableau`: Freshly built tableau, of which the basis consists of slack and artificial
/// variables.
///
/// # Return value
///
/// Whether the tableau allows a basic feasible solution without artificial variables.
pub(crate) fn primal<PR, S>(
    tableau: &mut Tableau,
    options: &SolverOptions,
    iterations: &mut Iterations,
    sink: &mut S,
) -> Result<RankedFeasibilityResult>
where
    PR: PivotRule,
    S: TraceSink + ?Sized,
{
    if tableau.registry().count(VariableKind::Artificial) == 0 {
        debug!("slack basis is feasible, skipping phase 1");
        return Ok(RankedFeasibilityResult::Feasible { rank: Rank::Full });
    }

    let cost = tableau.registry().iter()
        .map(|variable| match variable.kind {
            VariableKind::Artificial => 1_f64,
            _ => 0_f64,
        })
        .collect::<Vec<_>>();
    tableau.set_objective(&cost);
    sink.tableau_built(Phase::One, tableau);

    match iterate::<PR, _>(tableau, Phase::One, options, iterations, sink)? {
        OptimizationResult::FiniteOptimum => {},
        OptimizationResult::Unbounded => {
            warn!("Artificial cost can not be unbounded, treating the problem as infeasible");
            return Ok(RankedFeasibilityResult::Infeasible);
        },
    }

    let epsilon = options.epsilon;
    let infeasibility = tableau.objective_function_value();
    if is_positive(infeasibility, epsilon) {
        debug!("phase 1 ended with artificial cost {infeasibility}");
        return Ok(RankedFeasibilityResult::Infeasible);
    }
    if let Some(row) = tableau.artificial_basis_rows().into_iter().find(|&row| is_positive(tableau.rhs(row), epsilon)) {
        debug!("artificial {} is basic at value {}", tableau.registry().name(tableau.basis()[row]), tableau.rhs(row));
        return Ok(RankedFeasibilityResult::Infeasible);
    }

    let rows_to_remove = remove_artificial_basis_variables::<S>(tableau, options, iterations, sink)?;
    let rank = if rows_to_remove.is_empty() {
        Rank::Full
    } else {
        Rank::Deficient(rows_to_remove)
    };

    Ok(RankedFeasibilityResult::Feasible { rank })
}

/// Removes all artificial variables from the basis by making a basis change "at zero level", or
/// without change of cost of the current solution.
///
/// # Return value
///
/// Rows in which no such change was possible. These rows are linear combinations of the other
/// rows, and can be removed.
fn remove_artificial_basis_variables<S>(
    tableau: &mut Tableau,
    options: &SolverOptions,
    iterations: &mut Iterations,
    sink: &mut S,
) -> Result<Vec<usize>>
where
    S: TraceSink + ?Sized,
{
    let epsilon = options.epsilon;

    let mut rows_to_remove = Vec::new();
    for row in tableau.artificial_basis_rows() {
        debug_assert!(!is_positive(tableau.rhs(row), epsilon));

        let replacement = (0..tableau.nr_columns())
            .filter(|&column| tableau.registry().kind(column) != VariableKind::Artificial)
            .filter(|&column| !tableau.is_in_basis(column))
            .find(|&column| !is_zero(tableau.entry(row, column), epsilon));

        match replacement {
            Some(column) => {
                let iteration = iterations.tick(Phase::One)?;
                let leaving = tableau.pivot(row, column, epsilon)?;
                sink.pivot(&PivotEvent { phase: Phase::One, iteration, entering: column, leaving, row, tableau: &*tableau });
            },
            None => rows_to_remove.push(row),
        }
    }

    Ok(rows_to_remove)
}

#[cfg(test)]
mod test {
    use crate::algorithm::SolverOptions;
    use crate::algorithm::two_phase::{Iterations, Phase};
    use crate::algorithm::two_phase::phase_one::{primal, Rank, RankedFeasibilityResult};
    use crate::algorithm::two_phase::strategy::pivot_rule::Dantzig;
    use crate::algorithm::two_phase::tableau::{is_in_basic_feasible_solution_state, Tableau};
    use crate::algorithm::two_phase::trace::Recorder;
    use crate::data::linear_program::elements::{ConstraintRelation, Objective};
    use crate::data::linear_program::LinearProgram;

    fn run(program: &LinearProgram) -> (Tableau, RankedFeasibilityResult, Iterations) {
        let options = SolverOptions::default();
        let mut tableau = Tableau::new(&program.standard_form(options.epsilon));
        let mut iterations = Iterations::new(None);
        let result = primal::<Dantzig, _>(&mut tableau, &options, &mut iterations, &mut ()).unwrap();
        (tableau, result, iterations)
    }

    #[test]
    fn slack_basis_needs_no_pivots() {
        let program = LinearProgram::new(
            Objective::Maximize,
            vec![1_f64, 1_f64],
            vec![vec![1_f64, 2_f64]],
            vec![4_f64],
            vec![ConstraintRelation::Less],
        ).unwrap();
        let options = SolverOptions::default();
        let mut tableau = Tableau::new(&program.standard_form(options.epsilon));
        let mut iterations = Iterations::new(None);
        let mut recorder = Recorder::new();
        let result = primal::<Dantzig, _>(&mut tableau, &options, &mut iterations, &mut recorder);

        assert_eq!(result, Ok(RankedFeasibilityResult::Feasible { rank: Rank::Full }));
        assert_eq!(iterations.counts()[Phase::One], 0);
        assert!(recorder.steps().is_empty());
    }

    #[test]
    fn artificial_basis_is_recorded() {
        let program = LinearProgram::new(
            Objective::Maximize,
            vec![1_f64, 1_f64],
            vec![vec![1_f64, 2_f64]],
            vec![4_f64],
            vec![ConstraintRelation::Equal],
        ).unwrap();
        let options = SolverOptions::default();
        let mut tableau = Tableau::new(&program.standard_form(options.epsilon));
        let mut iterations = Iterations::new(None);
        let mut recorder = Recorder::new();
        let result = primal::<Dantzig, _>(&mut tableau, &options, &mut iterations, &mut recorder);

        assert_eq!(result, Ok(RankedFeasibilityResult::Feasible { rank: Rank::Full }));
        assert_eq!(iterations.counts()[Phase::One], 1);
        assert_eq!(recorder.steps().len(), 2);
        assert_eq!(recorder.steps()[1].pivot, Some(("x2".to_string(), "a1".to_string())));
    }

    #[test]
    fn feasible() {
        let program = LinearProgram::new(
            Objective::Minimize,
            vec![2_f64, 3_f64],
            vec![vec![1_f64, 1_f64], vec![1_f64, -1_f64]],
            vec![4_f64, 1_f64],
            vec![ConstraintRelation::Greater, ConstraintRelation::Equal],
        ).unwrap();
        let (tableau, result, _) = run(&program);

        assert_eq!(result, RankedFeasibilityResult::Feasible { rank: Rank::Full });
        assert!(tableau.artificial_basis_rows().is_empty());
        assert!(tableau.objective_function_value().abs() < 1e-10);
        assert!(is_in_basic_feasible_solution_state(&tableau, 1e-10));
    }

    #[test]
    fn infeasible() {
        let program = LinearProgram::new(
            Objective::Maximize,
            vec![1_f64],
            vec![vec![1_f64], vec![1_f64]],
            vec![1_f64, 2_f64],
            vec![ConstraintRelation::Less, ConstraintRelation::Greater],
        ).unwrap();
        let (_, result, _) = run(&program);

        assert_eq!(result, RankedFeasibilityResult::Infeasible);
    }

    #[test]
    fn duplicate_row_is_removed() {
        let program = LinearProgram::new(
            Objective::Minimize,
            vec![1_f64, 1_f64],
            vec![vec![1_f64, 1_f64], vec![2_f64, 2_f64]],
            vec![2_f64, 4_f64],
            vec![ConstraintRelation::Equal, ConstraintRelation::Equal],
        ).unwrap();
        let (tableau, result, _) = run(&program);

        assert_eq!(result, RankedFeasibilityResult::Feasible { rank: Rank::Deficient(vec![1]) });
        assert_eq!(tableau.artificial_basis_rows(), vec![1]);
    }
}
