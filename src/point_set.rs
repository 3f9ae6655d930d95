use std::collections::HashSet;

use nalgebra::DMatrix;

use crate::{
    error::{AlphaShapeError, Result},
    utils::types::{Coords, Vertex2, Vertex3, VertexIdx},
};

/// Relative tolerance used for on-surface checks, scaled by the bounding box diagonal.
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// An ordered, validated set of points in `R^K`, stored as an `N x K` matrix.
///
/// Points are referenced by their row index ([`VertexIdx`]) everywhere else in the crate.
///
/// ```
/// use alpha_shape::PointSet;
///
/// let points = PointSet::new(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
///
/// assert_eq!(points.len(), 3);
/// assert_eq!(points.dim(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    coords: DMatrix<f64>,
}

impl PointSet {
    /// Builds a point set from anything that yields coordinate slices, e.g. `&[[f64; 2]]` or `&[Vec<f64>]`.
    pub fn new<P: AsRef<[f64]>>(points: &[P]) -> Result<Self> {
        let first = points.first().ok_or(AlphaShapeError::EmptyPointSet)?;
        let dim = first.as_ref().len();
        if dim == 0 {
            return Err(AlphaShapeError::ZeroDimension);
        }

        for (index, p) in points.iter().enumerate() {
            let actual = p.as_ref().len();
            if actual != dim {
                return Err(AlphaShapeError::DimensionMismatch {
                    index,
                    expected: dim,
                    actual,
                });
            }
        }

        let coords = DMatrix::from_row_iterator(
            points.len(),
            dim,
            points.iter().flat_map(|p| p.as_ref().iter().copied()),
        );

        Self::from_matrix(coords)
    }

    /// Wraps an `N x K` matrix, one point per row.
    pub fn from_matrix(coords: DMatrix<f64>) -> Result<Self> {
        if coords.nrows() == 0 {
            return Err(AlphaShapeError::EmptyPointSet);
        }
        if coords.ncols() == 0 {
            return Err(AlphaShapeError::ZeroDimension);
        }
        if let Some(index) = (0..coords.nrows()).find(|&i| coords.row(i).iter().any(|c| !c.is_finite())) {
            return Err(AlphaShapeError::NonFiniteCoordinate { index });
        }

        Ok(Self { coords })
    }

    /// Number of points `N`.
    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    /// Always `false`, construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.coords.nrows() == 0
    }

    /// Dimension `K` of the ambient space.
    pub fn dim(&self) -> usize {
        self.coords.ncols()
    }

    pub const fn matrix(&self) -> &DMatrix<f64> {
        &self.coords
    }

    /// Coordinates of a single point.
    pub fn coords(&self, idx: VertexIdx) -> Coords {
        self.coords.row(idx).iter().copied().collect()
    }

    /// First two coordinates of a point, for planar predicates.
    pub fn vertex2(&self, idx: VertexIdx) -> Vertex2 {
        [self.coords[(idx, 0)], self.coords[(idx, 1)]]
    }

    /// First three coordinates of a point, for spatial predicates.
    pub fn vertex3(&self, idx: VertexIdx) -> Vertex3 {
        [
            self.coords[(idx, 0)],
            self.coords[(idx, 1)],
            self.coords[(idx, 2)],
        ]
    }

    /// All points as fixed size triples, requires `dim() == 3`.
    pub fn vertices3(&self) -> Vec<Vertex3> {
        (0..self.len()).map(|idx| self.vertex3(idx)).collect()
    }

    /// The rows of the given indices as a new `len(indices) x K` matrix.
    pub fn select(&self, indices: &[VertexIdx]) -> DMatrix<f64> {
        self.coords.select_rows(indices.iter())
    }

    /// Length of the diagonal of the axis aligned bounding box.
    pub fn bbox_diagonal(&self) -> f64 {
        self.coords
            .column_iter()
            .map(|col| {
                let extent = col.max() - col.min();
                extent * extent
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Absolute tolerance for on-surface checks, relative to the extent of the point set.
    pub fn tolerance(&self) -> f64 {
        let diagonal = self.bbox_diagonal();
        if diagonal > 0.0 {
            diagonal * RELATIVE_TOLERANCE
        } else {
            RELATIVE_TOLERANCE
        }
    }

    /// Indices of the first occurrence of every distinct point, in input order.
    pub fn unique_indices(&self) -> Vec<VertexIdx> {
        let mut seen = HashSet::with_capacity(self.len());

        (0..self.len())
            .filter(|&idx| {
                // -0.0 and 0.0 describe the same location
                let key: Vec<u64> = self.coords.row(idx).iter().map(|c| (c + 0.0).to_bits()).collect();
                seen.insert(key)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_input() {
        let empty: [[f64; 2]; 0] = [];
        assert!(matches!(PointSet::new(&empty), Err(AlphaShapeError::EmptyPointSet)));

        let zero_dim: [[f64; 0]; 2] = [[], []];
        assert!(matches!(PointSet::new(&zero_dim), Err(AlphaShapeError::ZeroDimension)));

        let ragged = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            PointSet::new(&ragged),
            Err(AlphaShapeError::DimensionMismatch {
                index: 1,
                expected: 2,
                actual: 1
            })
        ));

        let nan = [[0.0, 0.0], [f64::NAN, 1.0]];
        assert!(matches!(
            PointSet::new(&nan),
            Err(AlphaShapeError::NonFiniteCoordinate { index: 1 })
        ));
    }

    #[test]
    fn test_row_layout() {
        let points = PointSet::new(&[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points.dim(), 3);
        assert_eq!(points.coords(1), vec![3.0, 4.0, 5.0]);
        assert_eq!(points.vertex3(0), [0.0, 1.0, 2.0]);
        assert_eq!(points.select(&[1]).row(0)[2], 5.0);
    }

    #[test]
    fn test_unique_indices_keeps_first_occurrence() {
        let points = PointSet::new(&[[1.0, 0.0], [0.0, 1.0], [0.0, 1.0], [-0.0, 1.0], [1.0, 0.0]]).unwrap();

        assert_eq!(points.unique_indices(), vec![0, 1]);
    }

    #[test]
    fn test_tolerance_scales_with_extent() {
        let unit = PointSet::new(&[[0.0, 0.0], [3.0, 4.0]]).unwrap();
        let single = PointSet::new(&[[2.0, 2.0]]).unwrap();

        assert_eq!(unit.bbox_diagonal(), 5.0);
        assert!(unit.tolerance() > single.tolerance());
        assert!(single.tolerance() > 0.0);
    }
}
