//! # Phase two
//!
//! Starting from the basic feasible solution found in phase one, minimize the actual objective.
use crate::algorithm::SolverOptions;
use crate::algorithm::two_phase::{iterate, Iterations, OptimizationResult, Phase};
use crate::algorithm::two_phase::strategy::pivot_rule::PivotRule;
use crate::algorithm::two_phase::tableau::registry::{Registry, VariableKind};
use crate::algorithm::two_phase::tableau::Tableau;
use crate::algorithm::two_phase::trace::TraceSink;
use crate::data::linear_program::standard_form::StandardForm;
use crate::error::Result;

/// Reduces the cost of the basic feasible solution to the minimum.
///
/// While calling this method, a number of requirements should be satisfied:
/// - There should be a valid basis without artificial variables
/// - All constraint values need to be non-negative (primal feasibility)
///
/// # Return value
///
/// An `OptimizationResult` indicating whether or not the problem has a finite optimum. It cannot be
/// infeasible, as a feasible solution is needed to start using this method.
pub(crate) fn primal<PR, S>(
    tableau: &mut Tableau,
    standard_form: &StandardForm,
    options: &SolverOptions,
    iterations: &mut Iterations,
    sink: &mut S,
) -> Result<OptimizationResult>
where
    PR: PivotRule,
    S: TraceSink + ?Sized,
{
    debug_assert_eq!(tableau.registry().count(VariableKind::Artificial), 0);

    let cost = cost(tableau.registry(), standard_form);
    tableau.set_objective(&cost);
    sink.tableau_built(Phase::Two, tableau);

    iterate::<PR, _>(tableau, Phase::Two, options, iterations, sink)
}

/// Cost per column of the minimized objective.
///
/// Decision columns get the standard form cost, negated when maximizing. All other columns cost
/// nothing.
pub(crate) fn cost(registry: &Registry, standard_form: &StandardForm) -> Vec<f64> {
    let sign = standard_form.objective().minimization_sign();

    registry.iter()
        .map(|variable| match variable.kind {
            VariableKind::Decision => sign * standard_form.cost()[variable.origin],
            VariableKind::Slack | VariableKind::Surplus | VariableKind::Artificial => 0_f64,
        })
        .collect()
}
