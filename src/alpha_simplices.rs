use crate::{
    circumsphere::Circumsphere,
    diagnostics::Diagnostic,
    error::{AlphaShapeError, Result},
    point_set::PointSet,
    triangulator::Triangulator,
    utils::types::Simplex,
};

/// A triangulation cell together with its circumradius.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaSimplex {
    pub simplex: Simplex,
    pub circumradius: f64,
}

/// Lazy stream of the non-degenerate simplices of a triangulation and their circumradii.
///
/// Simplices without a unique circumsphere are skipped and remembered, see [`Self::degenerate`].
///
/// ```
/// use alpha_shape::{AlphaSimplices, PointSet};
///
/// let points = PointSet::new(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0], [1.0, 1.0]]).unwrap();
/// let mut stream = AlphaSimplices::new(&points, vec![vec![0, 1, 2], vec![1, 2, 3]]).unwrap();
///
/// let radii: Vec<f64> = stream.by_ref().map(|s| s.circumradius).collect();
/// assert_eq!(radii.len(), 1);
/// assert_eq!(stream.degenerate(), &[vec![1, 2, 3]]);
/// ```
pub struct AlphaSimplices<'a> {
    points: &'a PointSet,
    simplices: std::vec::IntoIter<Simplex>,
    degenerate: Vec<Simplex>,
}

impl<'a> AlphaSimplices<'a> {
    /// Wraps the simplices of a triangulation of `points`.
    ///
    /// Every simplex must list `K + 1` valid indices, otherwise the triangulation is rejected.
    pub fn new(points: &'a PointSet, simplices: Vec<Simplex>) -> Result<Self> {
        let arity = points.dim() + 1;

        for simplex in &simplices {
            if simplex.len() != arity {
                return Err(AlphaShapeError::Triangulation(anyhow::Error::msg(format!(
                    "simplex {simplex:?} has {} vertices, expected {arity}",
                    simplex.len()
                ))));
            }
            if let Some(idx) = simplex.iter().find(|&&idx| idx >= points.len()) {
                return Err(AlphaShapeError::Triangulation(anyhow::Error::msg(format!(
                    "simplex {simplex:?} references vertex {idx}, but there are only {} points",
                    points.len()
                ))));
            }
        }

        Ok(Self {
            points,
            simplices: simplices.into_iter(),
            degenerate: Vec::new(),
        })
    }

    /// Triangulates `points` with `triangulator` and streams the result.
    pub fn from_triangulator(points: &'a PointSet, triangulator: &dyn Triangulator) -> Result<Self> {
        let simplices = triangulator
            .triangulate(points)
            .map_err(AlphaShapeError::Triangulation)?;

        Self::new(points, simplices)
    }

    /// Simplices skipped so far.
    pub fn degenerate(&self) -> &[Simplex] {
        &self.degenerate
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.degenerate
            .iter()
            .map(|simplex| Diagnostic::DegenerateSimplex {
                simplex: simplex.clone(),
            })
            .collect()
    }
}

impl Iterator for AlphaSimplices<'_> {
    type Item = AlphaSimplex;

    fn next(&mut self) -> Option<Self::Item> {
        for simplex in self.simplices.by_ref() {
            match Circumsphere::solve(&self.points.select(&simplex)) {
                Some(sphere) => {
                    return Some(AlphaSimplex {
                        simplex,
                        circumradius: sphere.radius,
                    })
                }
                None => {
                    log::debug!("Skipping degenerate simplex {:?}", simplex);
                    self.degenerate.push(simplex);
                }
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.simplices.size_hint().1)
    }
}
