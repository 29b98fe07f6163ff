//! # Reading and writing of linear programs
//!
//! Problems are exchanged as JSON problem descriptions, see `schema`.
use std::fs;
use std::path::Path;

use crate::data::linear_program::LinearProgram;
use crate::io::error::ImportError;
use crate::io::schema::ProblemDescription;

pub mod error;
pub mod schema;

/// Import a problem from a file.
///
/// Only supports JSON problem descriptions, with the `json` extension.
///
/// # Errors
///
/// When the file extension is unknown, the file cannot be found or read, its contents are not a
/// problem description or describe an inconsistent problem.
pub fn import(file_path: &Path) -> Result<LinearProgram, ImportError> {
    match file_path.extension().and_then(|extension| extension.to_str()) {
        Some("json" | "JSON") => {},
        Some(extension) => return Err(ImportError::FileExtension(format!(
            "Could not recognise file extension \"{extension}\" of file: {file_path:?}",
        ))),
        None => return Err(ImportError::FileExtension(format!(
            "Could not read extension from file path: {file_path:?}",
        ))),
    }

    let contents = fs::read_to_string(file_path)?;
    parse(&contents)
}

/// Parse a JSON problem description.
///
/// # Errors
///
/// When the text is not a problem description, or describes an inconsistent problem.
pub fn parse(text: &str) -> Result<LinearProgram, ImportError> {
    let description = serde_json::from_str::<ProblemDescription>(text)?;
    LinearProgram::try_from(&description)
}

/// Write a problem as a pretty-printed JSON problem description.
pub fn export(program: &LinearProgram) -> String {
    let description = ProblemDescription::from(program);
    // Only finite numbers, vectors and structs, so this can't fail
    serde_json::to_string_pretty(&description).unwrap_or_default()
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use crate::data::linear_program::elements::{ConstraintRelation, Objective};
    use crate::data::linear_program::LinearProgram;
    use crate::io::error::ImportError;
    use crate::io::{export, import, parse};

    const SCENARIO: &str = r#"{
        "nbVariables": 2,
        "nbContraintes": 3,
        "typeObjectif": 0,
        "fonctionObjectif": [3, 5],
        "contraintes": [
            {"coefficients": [1, 0], "type": 1, "rhs": 4},
            {"coefficients": [0, 2], "type": 1, "rhs": 12},
            {"coefficients": [3, 2], "type": 1, "rhs": 18}
        ]
    }"#;

    #[test]
    fn parse_scenario() {
        let program = parse(SCENARIO).unwrap();

        assert_eq!(program.objective(), Objective::Maximize);
        assert_eq!(program.cost(), &[3_f64, 5_f64]);
        assert_eq!(program.b(), &[4_f64, 12_f64, 18_f64]);
        assert_eq!(program.relations(), &[ConstraintRelation::Less; 3]);
    }

    #[test]
    fn export_then_parse() {
        let program = LinearProgram::new(
            Objective::Minimize,
            vec![1.5_f64, -2_f64],
            vec![vec![1_f64, 1_f64]],
            vec![-3_f64],
            vec![ConstraintRelation::Greater],
        ).unwrap();
        let text = export(&program);

        assert!(text.contains("\"nbContraintes\": 1"));
        assert!(text.contains("\"typesVariables\""));
        assert_eq!(parse(&text).unwrap(), program);
    }

    #[test]
    fn malformed() {
        assert!(matches!(parse("{\"nbVariables\": 2}"), Err(ImportError::Json(_))));
    }

    #[test]
    fn extension() {
        assert!(matches!(import(Path::new("problem.mps")), Err(ImportError::FileExtension(_))));
        assert!(matches!(import(Path::new("does/not/exist.json")), Err(ImportError::Io(_))));
    }
}
