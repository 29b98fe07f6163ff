//! # Duality
//!
//! Derive the dual of a linear program, and recover the solution of a primal problem by solving its
//! dual with the same simplex engine.
use log::{debug, warn};

use crate::algorithm::SolverOptions;
use crate::algorithm::two_phase;
use crate::data::linear_algebra::transpose;
use crate::data::linear_program::elements::{ConstraintRelation, Objective, SignClass, SolutionState};
use crate::data::linear_program::solution::Solution;
use crate::data::linear_program::LinearProgram;
use crate::error::Result;

/// Derive the dual linear program.
///
/// The direction flips, the right-hand side becomes the cost and vice versa, and the constraint
/// matrix is transposed. Each primal variable yields a dual constraint whose relation follows from
/// the variable's sign class, and each primal constraint yields a dual variable whose sign class
/// follows from the constraint's relation.
pub fn dual(program: &LinearProgram) -> LinearProgram {
    let maximize = program.objective() == Objective::Maximize;

    let relations = program.sign_classes().iter()
        .map(|sign_class| match (sign_class, maximize) {
            (SignClass::NonNegative, true) | (SignClass::NonPositive, false) => ConstraintRelation::Greater,
            (SignClass::NonNegative, false) | (SignClass::NonPositive, true) => ConstraintRelation::Less,
            (SignClass::Unrestricted, _) => ConstraintRelation::Equal,
        })
        .collect();
    let sign_classes = program.relations().iter()
        .map(|relation| match (relation, maximize) {
            (ConstraintRelation::Less, true) | (ConstraintRelation::Greater, false) => SignClass::NonNegative,
            (ConstraintRelation::Less, false) | (ConstraintRelation::Greater, true) => SignClass::NonPositive,
            (ConstraintRelation::Equal, _) => SignClass::Unrestricted,
        })
        .collect();

    LinearProgram::from_parts(
        !program.objective(),
        program.b().to_vec(),
        transpose(program.constraints(), program.nr_variables()),
        program.cost().to_vec(),
        relations,
        sign_classes,
    )
}

/// A primal solution recovered from its dual, together with the dual solve itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DualSolution {
    /// The derived dual problem.
    pub dual_program: LinearProgram,
    /// Solution of the dual problem.
    pub dual: Solution,
    /// Solution of the original problem.
    pub primal: Solution,
}

/// Solve a linear program through its dual.
///
/// At an optimum, the primal variables are the shadow prices of the dual constraints, the primal
/// shadow prices are the dual variables, and both objective values agree. An unbounded dual means
/// an infeasible primal. An infeasible dual leaves the primal either infeasible or unbounded, so
/// the primal is then solved directly to tell which.
///
/// # Errors
///
/// Those of the underlying solves.
pub fn solve_via_dual(program: &LinearProgram, options: &SolverOptions) -> Result<DualSolution> {
    let dual_program = dual(program);
    let dual = two_phase::solve(&dual_program, options)?;
    debug!("dual solve ended in state {}", dual.state());

    let primal = match dual.state() {
        SolutionState::Optimal => {
            let values = dual.shadow_prices().to_vec();
            if dual.redundant_rows().is_empty() && program.is_feasible(&values, options.epsilon.sqrt()) {
                Solution::optimal(dual.objective_value(), values, dual.values().to_vec())
            } else {
                warn!("primal values can't be read from the dual basis, solving the primal directly");
                two_phase::solve(program, options)?
            }
        },
        SolutionState::Unbounded => Solution::infeasible(program.nr_variables(), program.nr_constraints()),
        SolutionState::Infeasible | SolutionState::InProgress => two_phase::solve(program, options)?,
    };

    Ok(DualSolution { dual_program, dual, primal })
}
