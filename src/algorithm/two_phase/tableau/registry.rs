//! # Variable registry
//!
//! Every tableau column belongs to exactly one variable of one kind. The registry is the single
//! place that knows which, so that removing all artificial columns is a filter over one list.
use enum_map::{Enum, EnumMap};

use crate::data::linear_program::elements::ConstraintRelation;
use crate::data::linear_program::standard_form::StandardForm;

/// Role of a tableau column.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VariableKind {
    /// Column of the standard form, representing (part of) an original variable.
    Decision,
    /// `+1` in a `<=` row, initially basic.
    Slack,
    /// `-1` in a `>=` row.
    Surplus,
    /// `+1` in a `>=` or `=` row, initially basic, only present in phase one.
    Artificial,
}

/// A single tableau column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// What role the column plays.
    pub kind: VariableKind,
    /// Index of the column in the tableau that owns this registry.
    pub column: usize,
    /// For decision variables, the standard form column. For the others, the standard form row
    /// they were introduced for.
    pub origin: usize,
    /// Display name.
    pub name: String,
}

/// Ordered list of all tableau columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    variables: Vec<Variable>,
    counts: EnumMap<VariableKind, usize>,
}

impl Registry {
    /// Decision columns first, then per row its slack, or surplus and artificial, or artificial.
    pub fn for_standard_form(standard_form: &StandardForm) -> Self {
        let mut registry = Self { variables: Vec::new(), counts: EnumMap::default() };

        for (j, name) in standard_form.column_names().into_iter().enumerate() {
            registry.push(VariableKind::Decision, j, name);
        }

        let (mut nr_slack, mut nr_artificial) = (0, 0);
        for (i, relation) in standard_form.relations().iter().enumerate() {
            match relation {
                ConstraintRelation::Less => {
                    nr_slack += 1;
                    registry.push(VariableKind::Slack, i, format!("s{nr_slack}"));
                },
                ConstraintRelation::Greater => {
                    nr_slack += 1;
                    registry.push(VariableKind::Surplus, i, format!("s{nr_slack}"));
                    nr_artificial += 1;
                    registry.push(VariableKind::Artificial, i, format!("a{nr_artificial}"));
                },
                ConstraintRelation::Equal => {
                    nr_artificial += 1;
                    registry.push(VariableKind::Artificial, i, format!("a{nr_artificial}"));
                },
            }
        }

        registry
    }

    fn push(&mut self, kind: VariableKind, origin: usize, name: String) {
        let column = self.variables.len();
        self.variables.push(Variable { kind, column, origin, name });
        self.counts[kind] += 1;
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether there are no columns at all.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The variable of a column.
    pub fn get(&self, column: usize) -> &Variable {
        &self.variables[column]
    }

    /// Display name of a column.
    pub fn name(&self, column: usize) -> &str {
        &self.variables[column].name
    }

    /// Kind of a column.
    pub fn kind(&self, column: usize) -> VariableKind {
        self.variables[column].kind
    }

    /// All variables, ordered by column.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> + Clone {
        self.variables.iter()
    }

    /// Number of columns of a kind.
    pub fn count(&self, kind: VariableKind) -> usize {
        self.counts[kind]
    }

    /// Sorted column indices of all artificial variables.
    pub fn artificial_columns(&self) -> Vec<usize> {
        self.variables.iter()
            .filter(|variable| variable.kind == VariableKind::Artificial)
            .map(|variable| variable.column)
            .collect()
    }

    /// Drop the artificial variables and renumber the remaining columns.
    ///
    /// # Return value
    ///
    /// The new registry, and for each old column its new index, if it was kept.
    pub fn without_artificial(&self) -> (Self, Vec<Option<usize>>) {
        let mut registry = Self { variables: Vec::new(), counts: EnumMap::default() };
        let mut new_index = Vec::with_capacity(self.len());

        for variable in &self.variables {
            if variable.kind == VariableKind::Artificial {
                new_index.push(None);
            } else {
                new_index.push(Some(registry.len()));
                registry.push(variable.kind, variable.origin, variable.name.clone());
            }
        }
        debug_assert_eq!(registry.count(VariableKind::Artificial), 0);

        (registry, new_index)
    }
}
