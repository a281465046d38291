//! Discrete Laplacian stencil for the diffusion term.

use super::Cell;

/// 3x3 diffusion weights in row-major order, center at index 4.
///
/// This is the standard discretized Laplacian with corner weight 0.05 and
/// edge weight 0.2. The weights sum to zero, so a uniform field has no
/// diffusion term.
pub const LAPLACIAN: [f64; 9] = [
    0.05, 0.20, 0.05, //
    0.20, -1.0, 0.20, //
    0.05, 0.20, 0.05,
];

/// Apply the Laplacian weights to a 3x3 neighborhood, independently for the
/// `a` and `b` channels. Expects the row-major order produced by
/// [`super::Grid::neighborhood`].
#[inline]
pub fn diffusion(neighborhood: &[Cell; 9]) -> (f64, f64) {
    let mut a = 0.0;
    let mut b = 0.0;
    for (cell, weight) in neighborhood.iter().zip(LAPLACIAN) {
        a += cell.a * weight;
        b += cell.b * weight;
    }
    (a, b)
}
