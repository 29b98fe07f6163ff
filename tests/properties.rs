//! Property-based tests on randomly generated problems.
//!
//! Bounded problems maximize a positive objective over `A x <= b` with positive `A` and `b`, so
//! the origin is feasible and the region is bounded. Mixed problems have any direction, relation,
//! sign class and sign of the right-hand side, and may be infeasible or unbounded.
use proptest::collection::vec;
use proptest::prelude::*;

use twophase::algorithm::duality::solve_via_dual;
use twophase::algorithm::geometry::Polyhedron;
use twophase::algorithm::SolverOptions;
use twophase::algorithm::two_phase::{solve, solve_with, Phase};
use twophase::algorithm::two_phase::strategy::pivot_rule::Dantzig;
use twophase::algorithm::two_phase::trace::Recorder;
use twophase::data::linear_program::elements::{ConstraintRelation, Objective, SignClass, SolutionState};
use twophase::data::linear_program::LinearProgram;

const TOLERANCE: f64 = 1e-6;

fn program_with(nr_variables: usize, nr_constraints: usize) -> impl Strategy<Value = LinearProgram> {
    (
        prop::collection::vec(1..=10_i32, nr_variables),
        prop::collection::vec(prop::collection::vec(1..=10_i32, nr_variables), nr_constraints),
        prop::collection::vec(1..=20_i32, nr_constraints),
    ).prop_map(|(cost, rows, b)| {
        let nr_constraints = b.len();
        LinearProgram::new(
            Objective::Maximize,
            cost.into_iter().map(f64::from).collect(),
            rows.into_iter().map(|row| row.into_iter().map(f64::from).collect()).collect(),
            b.into_iter().map(f64::from).collect(),
            vec![ConstraintRelation::Less; nr_constraints],
        ).unwrap()
    })
}

fn program() -> impl Strategy<Value = LinearProgram> {
    (1..=4_usize, 1..=4_usize)
        .prop_flat_map(|(nr_variables, nr_constraints)| program_with(nr_variables, nr_constraints))
}

fn objective() -> impl Strategy<Value = Objective> {
    prop_oneof![Just(Objective::Maximize), Just(Objective::Minimize)]
}

fn relation() -> impl Strategy<Value = ConstraintRelation> {
    prop_oneof![
        Just(ConstraintRelation::Less),
        Just(ConstraintRelation::Greater),
        Just(ConstraintRelation::Equal),
    ]
}

fn sign_class() -> impl Strategy<Value = SignClass> {
    prop_oneof![
        Just(SignClass::NonNegative),
        Just(SignClass::NonPositive),
        Just(SignClass::Unrestricted),
    ]
}

fn mixed_program() -> impl Strategy<Value = LinearProgram> {
    (1..=3_usize, 1..=3_usize)
        .prop_flat_map(|(nr_variables, nr_constraints)| (
            objective(),
            vec(-5..=5_i32, nr_variables),
            vec(vec(-5..=5_i32, nr_variables), nr_constraints),
            vec(-10..=10_i32, nr_constraints),
            vec(relation(), nr_constraints),
            vec(sign_class(), nr_variables),
        ))
        .prop_map(|(objective, cost, rows, b, relations, sign_classes)| {
            LinearProgram::with_sign_classes(
                objective,
                cost.into_iter().map(f64::from).collect(),
                rows.into_iter().map(|row| row.into_iter().map(f64::from).collect()).collect(),
                b.into_iter().map(f64::from).collect(),
                relations,
                sign_classes,
            ).unwrap()
        })
}

/// A mixed program together with a point that respects its sign classes.
fn mixed_program_and_point() -> impl Strategy<Value = (LinearProgram, Vec<f64>)> {
    mixed_program().prop_flat_map(|program| {
        let nr_variables = program.nr_variables();
        (Just(program), vec(-10..=10_i32, nr_variables))
    }).prop_map(|(program, raw)| {
        let point = program.sign_classes().iter()
            .zip(raw)
            .map(|(class, value)| match class {
                SignClass::NonNegative => f64::from(value.abs()),
                SignClass::NonPositive => -f64::from(value.abs()),
                SignClass::Unrestricted => f64::from(value),
            })
            .collect();
        (program, point)
    })
}

fn dot(left: &[f64], right: &[f64]) -> f64 {
    left.iter().zip(right).map(|(l, r)| l * r).sum()
}

fn is_close(left: f64, right: f64) -> bool {
    (left - right).abs() <= TOLERANCE * (1_f64 + left.abs().max(right.abs()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn optimum_is_feasible(program in program()) {
        let solution = solve(&program, &SolverOptions::default()).unwrap();

        prop_assert_eq!(solution.state(), SolutionState::Optimal);
        prop_assert!(program.is_feasible(solution.values(), TOLERANCE));
        prop_assert!(is_close(program.evaluate(solution.values()), solution.objective_value()));
    }

    #[test]
    fn strong_duality(program in program()) {
        let options = SolverOptions::default();
        let primal = solve(&program, &options).unwrap();
        let via_dual = solve_via_dual(&program, &options).unwrap();

        prop_assert_eq!(via_dual.dual.state(), SolutionState::Optimal);
        prop_assert!(is_close(via_dual.dual.objective_value(), primal.objective_value()));
        prop_assert!(is_close(via_dual.primal.objective_value(), primal.objective_value()));

        // Shadow prices price out the objective: b' y equals c' x
        let priced = program.b().iter()
            .zip(primal.shadow_prices())
            .map(|(b, y)| b * y)
            .sum::<f64>();
        prop_assert!(is_close(priced, primal.objective_value()));
    }

    #[test]
    fn vertex_enumeration_agrees(program in program_with(2, 3)) {
        let options = SolverOptions::default();
        let solution = solve(&program, &options).unwrap();
        let polyhedron = Polyhedron::from_linear_program(&program, options.epsilon).unwrap();

        prop_assert!(!polyhedron.vertices().is_empty());
        prop_assert!(is_close(polyhedron.optimal_value(), solution.objective_value()));
    }

    #[test]
    fn phase_two_stays_feasible(program in program()) {
        let mut recorder = Recorder::new();
        solve_with::<Dantzig, _>(&program, &SolverOptions::default(), &mut recorder).unwrap();

        prop_assert!(recorder.phase(Phase::Two).count() > 0);
        for step in recorder.phase(Phase::Two) {
            prop_assert!(step.snapshot.rhs().all(|value| value >= -TOLERANCE));
        }
    }

    #[test]
    fn mixed_optimum_is_feasible(program in mixed_program()) {
        let mut recorder = Recorder::new();
        let solution = solve_with::<Dantzig, _>(&program, &SolverOptions::default(), &mut recorder).unwrap();

        if solution.state() == SolutionState::Optimal {
            prop_assert!(program.is_feasible(solution.values(), TOLERANCE));
            prop_assert!(is_close(program.evaluate(solution.values()), solution.objective_value()));
        }
        if solution.state() == SolutionState::Infeasible {
            prop_assert_eq!(recorder.phase(Phase::Two).count(), 0);
        }
        // Every tableau of both phases holds a basic feasible solution
        for step in recorder.steps() {
            prop_assert!(step.snapshot.rhs().all(|value| value >= -TOLERANCE));
        }
    }

    #[test]
    fn mixed_dual_agrees(program in mixed_program()) {
        let options = SolverOptions::default();
        let primal = solve(&program, &options).unwrap();
        let via_dual = solve_via_dual(&program, &options).unwrap();

        prop_assert_eq!(via_dual.primal.state(), primal.state());
        if primal.state() == SolutionState::Optimal {
            prop_assert_eq!(via_dual.dual.state(), SolutionState::Optimal);
            prop_assert!(is_close(via_dual.dual.objective_value(), primal.objective_value()));
            prop_assert!(is_close(via_dual.primal.objective_value(), primal.objective_value()));
            prop_assert!(program.is_feasible(via_dual.primal.values(), 1e-4));
        }
    }

    #[test]
    fn standard_form_round_trip((program, point) in mixed_program_and_point()) {
        let standard_form = program.standard_form(SolverOptions::default().epsilon);
        let transformed = standard_form.deconstruct(&point);

        prop_assert!(transformed.iter().all(|&value| value >= 0_f64));
        prop_assert_eq!(standard_form.reconstruct(&transformed), point.clone());
        prop_assert!(standard_form.b().iter().all(|&value| value >= 0_f64));
        prop_assert!(is_close(dot(standard_form.cost(), &transformed), program.evaluate(&point)));

        for i in 0..program.nr_constraints() {
            let sign = standard_form.row_signs()[i];
            prop_assert!(is_close(
                sign * dot(&standard_form.constraints()[i], &transformed),
                dot(&program.constraints()[i], &point),
            ));
            prop_assert_eq!(sign * standard_form.b()[i], program.b()[i]);
            let relation = if sign < 0_f64 { program.relations()[i].negated() } else { program.relations()[i] };
            prop_assert_eq!(standard_form.relations()[i], relation);
        }
    }
}
