//! # Dense linear algebra
//!
//! The tableau is small and dense, so plain `Vec<Vec<f64>>` rows are used throughout. These are
//! the few operations on them that are needed outside of pivoting.
use std::mem;

/// Transpose a row-major matrix.
///
/// # Arguments
///
/// * `rows`: The matrix, all rows of length `nr_columns`.
/// * `nr_columns`: Needed to produce the right shape when there are no rows.
pub fn transpose(rows: &[Vec<f64>], nr_columns: usize) -> Vec<Vec<f64>> {
    debug_assert!(rows.iter().all(|row| row.len() == nr_columns));

    (0..nr_columns)
        .map(|j| rows.iter().map(|row| row[j]).collect())
        .collect()
}

/// Solve the square system `matrix * x = rhs` by Gaussian elimination with partial pivoting.
///
/// # Return value
///
/// `None` if the largest available pivot in some column is not larger than `epsilon` in absolute
/// value, that is, if the matrix is (numerically) singular.
pub fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>, epsilon: f64) -> Option<Vec<f64>> {
    let n = rhs.len();
    debug_assert_eq!(matrix.len(), n);
    debug_assert!(matrix.iter().all(|row| row.len() == n));

    for k in 0..n {
        let pivot_row = (k..n).max_by(|&i, &j| matrix[i][k].abs().total_cmp(&matrix[j][k].abs()))?;
        if matrix[pivot_row][k].abs() <= epsilon {
            return None;
        }
        matrix.swap(k, pivot_row);
        rhs.swap(k, pivot_row);

        for i in (k + 1)..n {
            let factor = matrix[i][k] / matrix[k][k];
            if factor == 0_f64 {
                continue;
            }
            let (upper, lower) = matrix.split_at_mut(i);
            for (target, source) in lower[0][k..].iter_mut().zip(&upper[k][k..]) {
                *target -= factor * source;
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    let mut x = vec![0_f64; n];
    for k in (0..n).rev() {
        let tail = ((k + 1)..n).map(|j| matrix[k][j] * x[j]).sum::<f64>();
        x[k] = (mem::take(&mut rhs[k]) - tail) / matrix[k][k];
    }

    Some(x)
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use crate::data::linear_algebra::{solve, transpose};

    #[test]
    fn transpose_rectangular() {
        let rows = vec![vec![1_f64, 2_f64, 3_f64], vec![4_f64, 5_f64, 6_f64]];
        assert_eq!(transpose(&rows, 3), vec![
            vec![1_f64, 4_f64],
            vec![2_f64, 5_f64],
            vec![3_f64, 6_f64],
        ]);
        assert_eq!(transpose(&[], 2), vec![Vec::<f64>::new(), Vec::new()]);
    }

    #[test]
    fn solve_needs_row_swap() {
        let matrix = vec![vec![0_f64, 2_f64], vec![3_f64, 2_f64]];
        let x = solve(matrix, vec![12_f64, 18_f64], 1e-10).unwrap();
        assert_abs_diff_eq!(x[0], 2_f64, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 6_f64, epsilon = 1e-12);
    }

    #[test]
    fn solve_singular() {
        let matrix = vec![vec![1_f64, 2_f64], vec![2_f64, 4_f64]];
        assert_eq!(solve(matrix, vec![1_f64, 2_f64], 1e-10), None);
    }

    #[test]
    fn solve_empty() {
        assert_eq!(solve(Vec::new(), Vec::new(), 1e-10), Some(Vec::new()));
    }
}
