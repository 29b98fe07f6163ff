//! # Error reporting for reading of linear program files
//!
//! Everything that can go wrong between a path on disk and a validated `LinearProgram`.
use std::io;

use thiserror::Error;

use crate::error::LinearProgramError;

/// An `ImportError` is created when an error was encountered during IO or parsing.
///
/// It is the highest error in the io error hierarchy.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file extension of the provided file path is not known or supported.
    ///
    /// The contained `String` is a message for the end user.
    #[error("{0}")]
    FileExtension(String),
    /// The file to read isn't found, or the reading of file couldn't start or was interrupted.
    #[error("could not read problem file: {0}")]
    Io(#[from] io::Error),
    /// Contents of the file are not a problem description.
    #[error("could not parse problem description: {0}")]
    Json(#[from] serde_json::Error),
    /// A numeric code of the description doesn't correspond to any known value.
    #[error("unknown code {code} for {field}")]
    UnknownCode {
        /// Name of the field in the description.
        field: &'static str,
        /// The offending code.
        code: u8,
    },
    /// The description is well formed, but doesn't describe a valid linear program.
    #[error("inconsistent problem description: {0}")]
    LinearProgram(#[from] LinearProgramError),
}
