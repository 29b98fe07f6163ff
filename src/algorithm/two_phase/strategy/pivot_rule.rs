//! # Pivot rules
//!
//! Strategies for moving from basis to basis.
use crate::algorithm::two_phase::tableau::Tableau;
use crate::algorithm::utilities::is_negative;

/// Deciding how to pivot.
///
/// During the Simplex method, one needs to decide how to move from basic solution to basic
/// solution. The pivot rule describes that behavior.
///
/// Once the column has been selected, a row needs to be found. This decision is currently made
/// independent of the strategy, by the minimum ratio test.
pub trait PivotRule {
    /// Create a new instance.
    fn new() -> Self;

    /// Column selection rule for the primal Simplex method.
    ///
    /// # Return value
    ///
    /// A column with a relative cost below `-epsilon`, or `None` if there is no such column and the
    /// tableau is optimal.
    fn select_primal_pivot_column(&mut self, tableau: &Tableau, epsilon: f64) -> Option<usize>;
}

/// Pivot on the column with the most negative relative cost.
///
/// When several columns share the most negative cost, the one with the lowest index is chosen.
pub struct Dantzig;
impl PivotRule for Dantzig {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(&mut self, tableau: &Tableau, epsilon: f64) -> Option<usize> {
        (0..tableau.nr_columns())
            .map(|column| (column, tableau.relative_cost(column)))
            .filter(|&(_, cost)| is_negative(cost, epsilon))
            .min_by(|(_, left), (_, right)| left.total_cmp(right))
            .map(|(column, _)| column)
    }
}

/// Simply pivot on the first column, which has a negative relative cost.
pub struct FirstProfitable;
impl PivotRule for FirstProfitable {
    fn new() -> Self {
        Self
    }

    fn select_primal_pivot_column(&mut self, tableau: &Tableau, epsilon: f64) -> Option<usize> {
        (0..tableau.nr_columns())
            .filter(|&column| !tableau.is_in_basis(column))
            .find(|&column| is_negative(tableau.relative_cost(column), epsilon))
    }
}

#[cfg(test)]
mod test {
    use crate::algorithm::two_phase::strategy::pivot_rule::{Dantzig, FirstProfitable, PivotRule};
    use crate::algorithm::two_phase::tableau::Tableau;
    use crate::data::linear_program::elements::{ConstraintRelation, Objective};
    use crate::data::linear_program::LinearProgram;

    const EPSILON: f64 = 1e-10;

    fn tableau(cost: &[f64]) -> Tableau {
        let program = LinearProgram::new(
            Objective::Minimize,
            vec![0_f64; 3],
            vec![vec![1_f64, 1_f64, 1_f64]],
            vec![1_f64],
            vec![ConstraintRelation::Less],
        ).unwrap();
        let mut tableau = Tableau::new(&program.standard_form(EPSILON));
        tableau.set_objective(cost);
        tableau
    }

    #[test]
    fn most_negative() {
        let tableau = tableau(&[-1_f64, -3_f64, -2_f64, 0_f64]);

        assert_eq!(Dantzig::new().select_primal_pivot_column(&tableau, EPSILON), Some(1));
        assert_eq!(FirstProfitable::new().select_primal_pivot_column(&tableau, EPSILON), Some(0));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let tableau = tableau(&[0_f64, -2_f64, -2_f64, 0_f64]);

        assert_eq!(Dantzig::new().select_primal_pivot_column(&tableau, EPSILON), Some(1));
    }

    #[test]
    fn optimal() {
        let tableau = tableau(&[1_f64, -1e-12, 0_f64, 0_f64]);

        assert_eq!(Dantzig::new().select_primal_pivot_column(&tableau, EPSILON), None);
        assert_eq!(FirstProfitable::new().select_primal_pivot_column(&tableau, EPSILON), None);
        assert!(tableau.is_optimal(EPSILON));
    }
}
