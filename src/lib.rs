//! # A two-phase simplex solver
//!
//! Linear programs are solved using the Simplex Method as described in the book Combinatorial
//! Optimization by Christos H. Papadimitriou and Kenneth Steiglitz. Problems in two variables can
//! also be solved by enumerating the vertices of their feasible region, and every problem can be
//! solved through its dual.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;
pub mod error;
pub mod io;

#[cfg(test)]
mod tests;
