//! Delaunay triangulation providers.
//!
//! The crate never triangulates on its own: it consumes the simplices of a [`Triangulator`].
//! [`SpadeTriangulator`] covers the plane, higher dimensions take any provider implementing the
//! trait, a fixed [`PrecomputedTriangulation`] or a plain closure.

use anyhow::Result;
use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};

use crate::{
    point_set::PointSet,
    utils::types::{Simplex, VertexIdx},
};

/// Source of the Delaunay simplices of a point set.
///
/// Every returned simplex lists `K + 1` indices into the point set.
pub trait Triangulator: Send + Sync {
    fn triangulate(&self, points: &PointSet) -> Result<Vec<Simplex>>;
}

impl<F> Triangulator for F
where
    F: Fn(&PointSet) -> Result<Vec<Simplex>> + Send + Sync,
{
    fn triangulate(&self, points: &PointSet) -> Result<Vec<Simplex>> {
        self(points)
    }
}

/// A planar vertex that remembers its position in the input point set.
#[derive(Clone, Copy, Debug)]
struct IndexedVertex {
    position: Point2<f64>,
    index: VertexIdx,
}

impl HasPosition for IndexedVertex {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// 2D Delaunay triangulation backed by [spade].
///
/// Duplicate points are merged by the triangulation, the first index of a location is the one
/// referenced by the resulting triangles.
///
/// ```
/// use alpha_shape::{PointSet, SpadeTriangulator, Triangulator};
///
/// let points = PointSet::new(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap();
/// let triangles = SpadeTriangulator.triangulate(&points).unwrap();
///
/// assert_eq!(triangles.len(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SpadeTriangulator;

impl Triangulator for SpadeTriangulator {
    fn triangulate(&self, points: &PointSet) -> Result<Vec<Simplex>> {
        if points.dim() != 2 {
            return Err(anyhow::Error::msg(format!(
                "spade triangulates planar points, got dimension {}",
                points.dim()
            )));
        }

        let now = std::time::Instant::now();

        // keep the first occurrence of duplicates, spade leaves it undefined which one survives
        let vertices = points
            .unique_indices()
            .into_iter()
            .map(|index| {
                let [x, y] = points.vertex2(index);
                IndexedVertex {
                    position: Point2::new(x, y),
                    index,
                }
            })
            .collect();

        let triangulation = DelaunayTriangulation::<IndexedVertex>::bulk_load_stable(vertices)?;

        let simplices: Vec<Simplex> = triangulation
            .inner_faces()
            .map(|face| face.vertices().iter().map(|v| v.data().index).collect())
            .collect();

        log::trace!(
            "Triangulated {} vertices into {} triangles in {:.4} µs",
            points.len(),
            simplices.len(),
            now.elapsed().as_micros()
        );

        Ok(simplices)
    }
}

/// A triangulation computed elsewhere, handed out as is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrecomputedTriangulation {
    simplices: Vec<Simplex>,
}

impl PrecomputedTriangulation {
    pub const fn new(simplices: Vec<Simplex>) -> Self {
        Self { simplices }
    }

    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }
}

impl Triangulator for PrecomputedTriangulation {
    fn triangulate(&self, _points: &PointSet) -> Result<Vec<Simplex>> {
        Ok(self.simplices.clone())
    }
}
