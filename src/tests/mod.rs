//! # Integration tests that require a look inside the crate.
//!
//! Each problem module follows a problem through every intermediate form. Convention for function
//! names:
//!
//! * `const JSON_LITERAL_STRING`
//! * `fn linear_program()`
//! * `fn standard_form()`
//! * `fn phase_one_tableau()`
