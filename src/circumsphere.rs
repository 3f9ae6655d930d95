//! Circumsphere of `N <= K + 1` points in `R^K`.
//!
//! The circumcenter `c = P^T * l` of the rows of `P` is found in barycentric form by solving the
//! bordered system
//!
//! ```text
//! | 2 P P^T  1 | | l  |   | |p_i|^2 |
//! | 1^T      0 | | mu | = | 1       |
//! ```
//!
//! with an LU decomposition. The points are centered on their mean first, which leaves the
//! barycentric coordinates untouched but keeps the system well scaled for large coordinates.

use nalgebra::{DMatrix, DVector};

use crate::error::{AlphaShapeError, Result};

/// Squared-volume ratio (Hadamard ratio of the edge Gram matrix) below which a simplex counts as flat.
const FLATNESS_THRESHOLD: f64 = 1e3 * f64::EPSILON * f64::EPSILON;

/// Barycentric circumcenter and circumradius of the rows of `points`.
#[derive(Clone, Debug, PartialEq)]
pub struct Circumsphere {
    /// Barycentric coordinates, one per point, summing to one.
    pub barycentric: DVector<f64>,
    pub radius: f64,
}

impl Circumsphere {
    /// Solves for the circumsphere, `None` if the points are affinely dependent.
    pub fn solve(points: &DMatrix<f64>) -> Option<Self> {
        let n = points.nrows();
        if n == 0 {
            return None;
        }

        let centroid = points.row_mean();
        let mut centered = points.clone();
        for mut row in centered.row_iter_mut() {
            row -= &centroid;
        }

        if is_flat(&centered) {
            return None;
        }

        let mut a = DMatrix::from_element(n + 1, n + 1, 1.0);
        a.view_mut((0, 0), (n, n))
            .copy_from(&(&centered * centered.transpose() * 2.0));
        a[(n, n)] = 0.0;

        let mut b = DVector::from_element(n + 1, 1.0);
        for (i, row) in centered.row_iter().enumerate() {
            b[i] = row.norm_squared();
        }

        let solution = a.lu().solve(&b)?;
        let barycentric = solution.rows(0, n).into_owned();
        if barycentric.iter().any(|l| !l.is_finite()) {
            return None;
        }

        let center = centered.transpose() * &barycentric;
        let radius = (centered.row(0).transpose() - center).norm();
        if !radius.is_finite() {
            return None;
        }

        Some(Self {
            barycentric,
            radius,
        })
    }

    /// Cartesian circumcenter of the (uncentered) `points` the sphere was solved for.
    pub fn center(&self, points: &DMatrix<f64>) -> DVector<f64> {
        points.transpose() * &self.barycentric
    }
}

/// Checks for duplicate or affinely dependent rows via the edge vectors from the first point.
fn is_flat(points: &DMatrix<f64>) -> bool {
    let n = points.nrows();
    if n < 2 {
        return false;
    }

    let mut edges = DMatrix::zeros(n - 1, points.ncols());
    for i in 1..n {
        edges.set_row(i - 1, &(points.row(i) - points.row(0)));
    }

    let gram = &edges * edges.transpose();
    let norms: f64 = gram.diagonal().iter().product();
    if norms == 0.0 {
        return true;
    }

    gram.determinant() / norms <= FLATNESS_THRESHOLD
}

fn check_arity(points: &DMatrix<f64>) -> Result<()> {
    let (n, k) = points.shape();
    if n == 0 || n > k + 1 {
        return Err(AlphaShapeError::InvalidParameter(format!(
            "a circumsphere in R^{k} needs between 1 and {} points, got {n}",
            k + 1
        )));
    }
    Ok(())
}

fn degenerate(points: &DMatrix<f64>) -> AlphaShapeError {
    AlphaShapeError::DegenerateSimplex {
        points: points.nrows(),
    }
}

/// Barycentric coordinates of the circumcenter of the rows of `points` (`N x K`, `N <= K + 1`).
pub fn circumcenter(points: &DMatrix<f64>) -> Result<DVector<f64>> {
    check_arity(points)?;
    Circumsphere::solve(points)
        .map(|sphere| sphere.barycentric)
        .ok_or_else(|| degenerate(points))
}

/// Circumradius of the rows of `points` (`N x K`, `N <= K + 1`).
pub fn circumradius(points: &DMatrix<f64>) -> Result<f64> {
    check_arity(points)?;
    Circumsphere::solve(points)
        .map(|sphere| sphere.radius)
        .ok_or_else(|| degenerate(points))
}
