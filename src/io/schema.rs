//! # Problem description
//!
//! The plain data shape in which problems are stored and exchanged. Objective direction, relations
//! and sign classes are small integer codes.
use serde::{Deserialize, Serialize};

use crate::data::linear_program::elements::{ConstraintRelation, Objective, SignClass};
use crate::data::linear_program::LinearProgram;
use crate::error::LinearProgramError;
use crate::io::error::ImportError;

/// A linear program as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDescription {
    /// Declared number of variables.
    #[serde(rename = "nbVariables")]
    pub nr_variables: usize,
    /// Declared number of constraints.
    #[serde(rename = "nbContraintes")]
    pub nr_constraints: usize,
    /// `0` to maximize, `1` to minimize.
    #[serde(rename = "typeObjectif", default)]
    pub objective: u8,
    /// Objective coefficients.
    #[serde(rename = "fonctionObjectif")]
    pub cost: Vec<f64>,
    /// Per variable `0` for non-negative, `1` for non-positive, `2` for free. All variables are
    /// non-negative when absent.
    #[serde(rename = "typesVariables", default, skip_serializing_if = "Option::is_none")]
    pub sign_classes: Option<Vec<u8>>,
    /// Constraint rows.
    #[serde(rename = "contraintes")]
    pub constraints: Vec<ConstraintDescription>,
}

/// A single constraint row as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDescription {
    /// Coefficient per variable.
    pub coefficients: Vec<f64>,
    /// `0` for `>=`, `1` for `<=`, `2` for `=`.
    #[serde(rename = "type")]
    pub relation: u8,
    /// Right-hand side.
    pub rhs: f64,
}

fn objective(code: u8) -> Result<Objective, ImportError> {
    match code {
        0 => Ok(Objective::Maximize),
        1 => Ok(Objective::Minimize),
        code => Err(ImportError::UnknownCode { field: "typeObjectif", code }),
    }
}

fn objective_code(objective: Objective) -> u8 {
    match objective {
        Objective::Maximize => 0,
        Objective::Minimize => 1,
    }
}

fn relation(code: u8) -> Result<ConstraintRelation, ImportError> {
    match code {
        0 => Ok(ConstraintRelation::Greater),
        1 => Ok(ConstraintRelation::Less),
        2 => Ok(ConstraintRelation::Equal),
        code => Err(ImportError::UnknownCode { field: "type", code }),
    }
}

fn relation_code(relation: ConstraintRelation) -> u8 {
    match relation {
        ConstraintRelation::Greater => 0,
        ConstraintRelation::Less => 1,
        ConstraintRelation::Equal => 2,
    }
}

fn sign_class(code: u8) -> Result<SignClass, ImportError> {
    match code {
        0 => Ok(SignClass::NonNegative),
        1 => Ok(SignClass::NonPositive),
        2 => Ok(SignClass::Unrestricted),
        code => Err(ImportError::UnknownCode { field: "typesVariables", code }),
    }
}

fn sign_class_code(sign_class: SignClass) -> u8 {
    match sign_class {
        SignClass::NonNegative => 0,
        SignClass::NonPositive => 1,
        SignClass::Unrestricted => 2,
    }
}

impl TryFrom<&ProblemDescription> for LinearProgram {
    type Error = ImportError;

    fn try_from(description: &ProblemDescription) -> Result<Self, Self::Error> {
        let nr_variables = description.nr_variables;
        if description.cost.len() != nr_variables {
            return Err(LinearProgramError::dimension("fonctionObjectif", nr_variables, description.cost.len()).into());
        }
        if description.constraints.len() != description.nr_constraints {
            return Err(LinearProgramError::dimension(
                "contraintes", description.nr_constraints, description.constraints.len(),
            ).into());
        }

        let sign_classes = match &description.sign_classes {
            Some(codes) => codes.iter().map(|&code| sign_class(code)).collect::<Result<Vec<_>, _>>()?,
            None => vec![SignClass::default(); nr_variables],
        };
        let relations = description.constraints.iter()
            .map(|constraint| relation(constraint.relation))
            .collect::<Result<Vec<_>, _>>()?;

        let program = LinearProgram::with_sign_classes(
            objective(description.objective)?,
            description.cost.clone(),
            description.constraints.iter().map(|constraint| constraint.coefficients.clone()).collect(),
            description.constraints.iter().map(|constraint| constraint.rhs).collect(),
            relations,
            sign_classes,
        )?;

        Ok(program)
    }
}

impl From<&LinearProgram> for ProblemDescription {
    fn from(program: &LinearProgram) -> Self {
        let constraints = program.constraints().iter()
            .zip(program.relations())
            .zip(program.b())
            .map(|((coefficients, &relation), &rhs)| ConstraintDescription {
                coefficients: coefficients.clone(),
                relation: relation_code(relation),
                rhs,
            })
            .collect();

        Self {
            nr_variables: program.nr_variables(),
            nr_constraints: program.nr_constraints(),
            objective: objective_code(program.objective()),
            cost: program.cost().to_vec(),
            sign_classes: Some(program.sign_classes().iter().map(|&class| sign_class_code(class)).collect()),
            constraints,
        }
    }
}
