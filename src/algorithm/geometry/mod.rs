//! # Vertex enumeration in the plane
//!
//! An independent solver for linear programs in two non-negative variables. Every vertex of a
//! convex polygon lies on two of its bounding lines, so intersecting all pairs of constraint lines
//! and keeping the feasible intersections yields the vertex set. The best vertex is found by
//! evaluating the objective at each of them.
//!
//! Only the vertices are inspected: when the feasible region is unbounded in the direction of
//! optimization, the reported optimum is merely the best vertex.
use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

use crate::algorithm::utilities::{is_zero, rounding_key};
use crate::data::linear_program::elements::{ConstraintRelation, Objective, SignClass};
use crate::data::linear_program::LinearProgram;
use crate::error::{LinearProgramError, Result};

pub mod outline;

/// Points whose coordinates agree after rounding to this many parts per unit are the same vertex.
const DEDUPLICATION_SCALE: f64 = 1000_f64;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    /// First coordinate.
    pub x: f64,
    /// Second coordinate.
    pub y: f64,
}

impl Point2D {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0_f64, y: 0_f64 };

    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn key(self) -> (i64, i64) {
        (rounding_key(self.x, DEDUPLICATION_SCALE), rounding_key(self.y, DEDUPLICATION_SCALE))
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Half-plane `a x + b y <= c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint2D {
    /// Name of the bounding line, shared by both half-planes of an equality.
    pub label: String,
    /// Coefficient of `x`.
    pub a: f64,
    /// Coefficient of `y`.
    pub b: f64,
    /// Right-hand side.
    pub c: f64,
}

impl Constraint2D {
    /// Create a new half-plane `a x + b y <= c`.
    pub fn new(label: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        Self { label: label.into(), a, b, c }
    }

    /// Express `a x + b y (<=|>=|=) c` as half-planes.
    ///
    /// A `>=` row is negated. An `=` row becomes both half-planes, with the same label.
    pub fn from_relation(
        label: impl Into<String>,
        a: f64,
        b: f64,
        relation: ConstraintRelation,
        c: f64,
    ) -> Vec<Self> {
        let less = Self::new(label, a, b, c);
        match relation {
            ConstraintRelation::Less => vec![less],
            ConstraintRelation::Greater => vec![less.negated()],
            ConstraintRelation::Equal => vec![less.clone(), less.negated()],
        }
    }

    fn negated(self) -> Self {
        Self { label: self.label, a: -self.a, b: -self.b, c: -self.c }
    }

    /// Left-hand side `a x + b y` at a point.
    pub fn value(&self, point: Point2D) -> f64 {
        self.a * point.x + self.b * point.y
    }

    /// Whether a point lies in the half-plane, up to `epsilon`.
    pub fn is_satisfied(&self, point: Point2D, epsilon: f64) -> bool {
        self.value(point) <= self.c + epsilon
    }

    /// Intersection of the two boundary lines, by Cramer's rule.
    ///
    /// # Return value
    ///
    /// `None` if the lines are parallel or coincide.
    pub fn intersection(&self, other: &Self, epsilon: f64) -> Option<Point2D> {
        let determinant = self.a * other.b - other.a * self.b;
        if is_zero(determinant, epsilon) {
            return None;
        }

        Some(Point2D::new(
            (self.c * other.b - other.c * self.b) / determinant,
            (self.a * other.c - other.a * self.c) / determinant,
        ))
    }

    /// Intersections of the boundary line with the `y` axis and with the `x` axis.
    fn axis_intersections(&self, epsilon: f64) -> [Option<Point2D>; 2] {
        [
            (!is_zero(self.b, epsilon)).then(|| Point2D::new(0_f64, self.c / self.b)),
            (!is_zero(self.a, epsilon)).then(|| Point2D::new(self.c / self.a, 0_f64)),
        ]
    }
}

impl fmt::Display for Constraint2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} x + {} y <= {}", self.label, self.a, self.b, self.c)
    }
}

/// A feasible vertex with the objective value attained there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Location.
    pub point: Point2D,
    /// Objective value at the location.
    pub value: f64,
}

/// Feasible region of a two-variable linear program, described by its vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    direction: Objective,
    objective: [f64; 2],
    /// All half-planes, the two non-negativity constraints last.
    constraints: Vec<Constraint2D>,
    /// Feasible vertices in order of discovery.
    vertices: Vec<Vertex>,
}

impl Polyhedron {
    /// Enumerate the vertices of `{x >= 0, y >= 0}` intersected with the given half-planes.
    ///
    /// # Arguments
    ///
    /// * `objective`: Coefficients of `x` and `y` in the objective, which is maximized.
    /// * `constraints`: Half-planes, without the non-negativity constraints.
    /// * `epsilon`: Tolerance for parallel lines and feasibility.
    pub fn new(objective: [f64; 2], constraints: Vec<Constraint2D>, epsilon: f64) -> Self {
        Self::with_direction(Objective::Maximize, objective, constraints, epsilon)
    }

    /// Build the polyhedron of a linear program.
    ///
    /// # Errors
    ///
    /// `Unsupported` if the program doesn't have exactly two variables, or if a variable is not
    /// non-negative.
    pub fn from_linear_program(program: &LinearProgram, epsilon: f64) -> Result<Self> {
        if program.nr_variables() != 2 {
            return Err(LinearProgramError::Unsupported(format!(
                "vertex enumeration needs exactly 2 variables, got {}", program.nr_variables(),
            )));
        }
        if let Some(j) = program.sign_classes().iter().position(|&class| class != SignClass::NonNegative) {
            return Err(LinearProgramError::Unsupported(format!(
                "vertex enumeration needs non-negative variables, x{} is {}", j + 1, program.sign_classes()[j],
            )));
        }

        let constraints = program.constraints().iter()
            .zip_eq(program.relations())
            .zip_eq(program.b())
            .enumerate()
            .flat_map(|(i, ((row, &relation), &rhs))| {
                Constraint2D::from_relation(format!("C{}", i + 1), row[0], row[1], relation, rhs)
            })
            .collect();
        let objective = [program.cost()[0], program.cost()[1]];

        Ok(Self::with_direction(program.objective(), objective, constraints, epsilon))
    }

    fn with_direction(
        direction: Objective,
        objective: [f64; 2],
        mut constraints: Vec<Constraint2D>,
        epsilon: f64,
    ) -> Self {
        constraints.push(Constraint2D::new("x >= 0", -1_f64, 0_f64, 0_f64));
        constraints.push(Constraint2D::new("y >= 0", 0_f64, -1_f64, 0_f64));

        let points = enumerate_vertices(&constraints, epsilon);
        let vertices = points.into_iter()
            .map(|point| Vertex { point, value: objective[0] * point.x + objective[1] * point.y })
            .collect();

        Self { direction, objective, constraints, vertices }
    }

    /// Whether the objective is maximized or minimized.
    pub fn direction(&self) -> Objective {
        self.direction
    }

    /// Objective coefficients of `x` and `y`.
    pub fn objective(&self) -> [f64; 2] {
        self.objective
    }

    /// All half-planes, including the two non-negativity constraints.
    pub fn constraints(&self) -> &[Constraint2D] {
        &self.constraints
    }

    /// Feasible vertices with their objective values.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The best vertex, the first one found in case of ties.
    ///
    /// Minimization is done by maximizing the negated objective.
    pub fn optimum(&self) -> Option<Vertex> {
        let sign = -self.direction.minimization_sign();

        let mut best: Option<Vertex> = None;
        for &vertex in &self.vertices {
            if best.is_none_or(|best| sign * vertex.value > sign * best.value) {
                best = Some(vertex);
            }
        }

        best
    }

    /// Value of the best vertex.
    ///
    /// Without any feasible vertex, this is the worst value possible: minus infinity when
    /// maximizing, infinity when minimizing.
    pub fn optimal_value(&self) -> f64 {
        self.optimum().map_or(self.direction.minimization_sign() * f64::INFINITY, |vertex| vertex.value)
    }

    /// Location of the best vertex, or the origin if there are no feasible vertices.
    pub fn optimal_point(&self) -> Point2D {
        self.optimum().map_or(Point2D::ORIGIN, |vertex| vertex.point)
    }

    /// Vertices ordered counter-clockwise around their centroid.
    pub fn outline(&self) -> Vec<Point2D> {
        outline::counter_clockwise(self.vertices.iter().map(|vertex| vertex.point))
    }
}

/// Feasible pairwise intersections of the boundary lines, followed by the feasible intersections
/// of each boundary line with the axes, without duplicates.
fn enumerate_vertices(constraints: &[Constraint2D], epsilon: f64) -> Vec<Point2D> {
    let is_feasible = |point: Point2D| {
        constraints.iter().all(|constraint| constraint.is_satisfied(point, epsilon))
    };

    let pairwise = constraints.iter()
        .tuple_combinations()
        .filter_map(|(first, second)| first.intersection(second, epsilon));
    let axes = constraints.iter()
        .flat_map(|constraint| constraint.axis_intersections(epsilon))
        .flatten();

    let mut seen = HashSet::new();
    pairwise.chain(axes)
        .filter(|&point| is_feasible(point))
        .filter(|point| seen.insert(point.key()))
        .collect()
}

impl fmt::Display for Polyhedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "constraints")?;
        for constraint in &self.constraints {
            writeln!(f, "  {constraint}")?;
        }
        writeln!(f, "vertices")?;
        for vertex in &self.vertices {
            writeln!(f, "  {}: {:.4}", vertex.point, vertex.value)?;
        }
        match self.optimum() {
            Some(vertex) => writeln!(f, "optimum at {} with value {:.4}", vertex.point, vertex.value),
            None => writeln!(f, "no feasible vertex"),
        }
    }
}
