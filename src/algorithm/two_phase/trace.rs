//! # Observing a solve
//!
//! The solver reports every tableau it builds and every pivot it performs to a `TraceSink`. The
//! sink decides what, if anything, to keep.
use std::fmt;

use log::{debug, trace};

use crate::algorithm::two_phase::Phase;
use crate::algorithm::two_phase::tableau::{write_table, Tableau};

/// A basis change that was just performed.
#[derive(Debug, Clone, Copy)]
pub struct PivotEvent<'a> {
    /// Phase in which the pivot happened.
    pub phase: Phase,
    /// One-based pivot count within the phase.
    pub iteration: usize,
    /// Column that entered the basis.
    pub entering: usize,
    /// Column that left the basis.
    pub leaving: usize,
    /// Row that was pivoted on.
    pub row: usize,
    /// Tableau after the pivot.
    pub tableau: &'a Tableau,
}

impl PivotEvent<'_> {
    /// Display name of the entering variable.
    pub fn entering_name(&self) -> &str {
        self.tableau.registry().name(self.entering)
    }

    /// Display name of the leaving variable.
    pub fn leaving_name(&self) -> &str {
        self.tableau.registry().name(self.leaving)
    }
}

/// Receives the intermediate states of a solve.
///
/// All methods default to doing nothing.
pub trait TraceSink {
    /// A tableau was built and its objective row set, before any pivot of the phase.
    fn tableau_built(&mut self, _phase: Phase, _tableau: &Tableau) {
    }

    /// A pivot was performed.
    fn pivot(&mut self, _event: &PivotEvent<'_>) {
    }
}

/// Ignore everything.
impl TraceSink for () {}

/// Write every step to the `log` facade: pivots at debug level, full tableaus at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn tableau_built(&mut self, phase: Phase, tableau: &Tableau) {
        debug!("{phase}: initial tableau with {} rows and {} columns", tableau.nr_rows(), tableau.nr_columns());
        trace!("\n{tableau}");
    }

    fn pivot(&mut self, event: &PivotEvent<'_>) {
        debug!(
            "{} iteration {}: {} enters, {} leaves, objective {}",
            event.phase,
            event.iteration,
            event.entering_name(),
            event.leaving_name(),
            event.tableau.objective_function_value(),
        );
        trace!("\n{}", event.tableau);
    }
}

/// Owned copy of a tableau, detached from the solve.
#[derive(Debug, Clone, PartialEq)]
pub struct TableauSnapshot {
    /// Display name per column.
    pub column_names: Vec<String>,
    /// Display name of the basic variable per row.
    pub basis_names: Vec<String>,
    /// Constraint rows, each with the right-hand side as last entry.
    pub rows: Vec<Vec<f64>>,
    /// Objective row, with minus the objective value as last entry.
    pub objective: Vec<f64>,
}

impl TableauSnapshot {
    /// Copy the current state of a tableau.
    pub fn of(tableau: &Tableau) -> Self {
        let registry = tableau.registry();

        Self {
            column_names: registry.iter().map(|variable| variable.name.clone()).collect(),
            basis_names: tableau.basis().iter().map(|&column| registry.name(column).to_string()).collect(),
            rows: tableau.rows().to_vec(),
            objective: tableau.objective_row().to_vec(),
        }
    }

    /// Right-hand side per row.
    pub fn rhs(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(|row| row.last().copied())
    }
}

impl fmt::Display for TableauSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(
            f,
            self.column_names.iter().map(String::as_str),
            self.basis_names.iter().map(String::as_str),
            &self.rows,
            &self.objective,
        )
    }
}

/// One recorded step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Phase the step belongs to.
    pub phase: Phase,
    /// Zero for the initial tableau of a phase, the pivot count otherwise.
    pub iteration: usize,
    /// Entering and leaving variable names, absent for the initial tableau.
    pub pivot: Option<(String, String)>,
    /// State after the step.
    pub snapshot: TableauSnapshot,
}

/// Keep a snapshot of every tableau.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps of one phase, in order.
    pub fn phase(&self, phase: Phase) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |step| step.phase == phase)
    }
}

impl TraceSink for Recorder {
    fn tableau_built(&mut self, phase: Phase, tableau: &Tableau) {
        self.steps.push(Step {
            phase,
            iteration: 0,
            pivot: None,
            snapshot: TableauSnapshot::of(tableau),
        });
    }

    fn pivot(&mut self, event: &PivotEvent<'_>) {
        self.steps.push(Step {
            phase: event.phase,
            iteration: event.iteration,
            pivot: Some((event.entering_name().to_string(), event.leaving_name().to_string())),
            snapshot: TableauSnapshot::of(event.tableau),
        });
    }
}

impl fmt::Display for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match &step.pivot {
                None => writeln!(f, "{}, initial tableau", step.phase)?,
                Some((entering, leaving)) => writeln!(
                    f, "{}, iteration {}: {entering} enters, {leaving} leaves", step.phase, step.iteration,
                )?,
            }
            writeln!(f, "{}", step.snapshot)?;
        }

        Ok(())
    }
}
