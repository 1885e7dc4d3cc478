//! Linear algebra kernel shared by regression and kriging.
//!
//! ## Purpose
//!
//! This module exposes the small set of dense matrix operations the engines
//! need (transpose, multiply, invert, solve), standardizing on the nalgebra
//! backend.
//!
//! ## Design notes
//!
//! * One general inverse for every size: LU decomposition with partial
//!   pivoting, falling back to the SVD pseudo-inverse for singular input.
//! * Every operation returns `None` instead of panicking on shape mismatch
//!   or a non-finite result.
//!
//! ## Invariants
//!
//! * A returned matrix or vector contains only finite values.
//!
//! ## Non-goals
//!
//! * Sparse matrices and iterative solvers.

use nalgebra::{DMatrix, DVector};

/// Dense row/column matrix used across the crate.
pub type Matrix = DMatrix<f64>;

/// Dense column vector used across the crate.
pub type Vector = DVector<f64>;

/// Singular-value cutoff for the pseudo-inverse fallback.
const PINV_EPSILON: f64 = f64::EPSILON * 100.0;

// ============================================================================
// Inverse Report
// ============================================================================

/// How an inverse or solution was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverseMethod {
    /// Exact LU decomposition with partial pivoting.
    Lu,
    /// SVD pseudo-inverse (the input was singular).
    PseudoInverse,
}

/// An inverse together with the method that produced it.
#[derive(Debug, Clone)]
pub struct Inverse {
    /// The inverse (or pseudo-inverse).
    pub matrix: Matrix,
    /// The method used.
    pub method: InverseMethod,
}

// ============================================================================
// Kernel Operations
// ============================================================================

/// Transpose of `a`.
#[inline]
pub fn transpose(a: &Matrix) -> Matrix {
    a.transpose()
}

/// Product `a · b`, or `None` when the inner dimensions differ.
pub fn multiply(a: &Matrix, b: &Matrix) -> Option<Matrix> {
    if a.ncols() != b.nrows() {
        return None;
    }
    Some(a * b)
}

/// Inverse of a square matrix.
///
/// Returns `None` for non-square or empty input, or when neither the LU
/// inverse nor the pseudo-inverse is finite.
pub fn invert(a: &Matrix) -> Option<Matrix> {
    invert_detailed(a).map(|inv| inv.matrix)
}

/// Inverse of a square matrix, reporting whether the pseudo-inverse was used.
pub fn invert_detailed(a: &Matrix) -> Option<Inverse> {
    if !a.is_square() || a.nrows() == 0 {
        return None;
    }

    if let Some(inv) = a.clone().lu().try_inverse() {
        if all_finite(inv.as_slice()) {
            return Some(Inverse {
                matrix: inv,
                method: InverseMethod::Lu,
            });
        }
    }

    log::debug!(
        "LU inverse failed for {}x{} matrix, using pseudo-inverse",
        a.nrows(),
        a.ncols()
    );

    a.clone()
        .pseudo_inverse(PINV_EPSILON)
        .ok()
        .filter(|inv| all_finite(inv.as_slice()))
        .map(|inv| Inverse {
            matrix: inv,
            method: InverseMethod::PseudoInverse,
        })
}

/// Solve `a · x = b` for square `a`.
///
/// Uses LU first and falls back to an SVD least-squares solution.
pub fn solve(a: &Matrix, b: &Vector) -> Option<(Vector, InverseMethod)> {
    if !a.is_square() || a.nrows() != b.len() || a.nrows() == 0 {
        return None;
    }

    if let Some(x) = a.clone().lu().solve(b) {
        if all_finite(x.as_slice()) {
            return Some((x, InverseMethod::Lu));
        }
    }

    a.clone()
        .svd(true, true)
        .solve(b, PINV_EPSILON)
        .ok()
        .filter(|x| all_finite(x.as_slice()))
        .map(|x| (x, InverseMethod::PseudoInverse))
}

#[inline]
fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}
