//! # Alpha Shape
//!
//! Alpha shapes, the concave hulls of point sets, in any dimension.
//!
//! A simplex of a Delaunay triangulation belongs to the shape if its circumradius is smaller than
//! `1 / alpha`. The boundary of the accepted simplices is assembled into polygons in 2D, into a
//! triangle mesh in 3D and handed back as raw facets beyond. Without an alpha, the largest one
//! whose shape is still a single polygon (or mesh) holding every point is searched by bisection.
//!
//! Planar points are triangulated with [`spade`]; higher dimensions need a [`Triangulator`].
//!
//! ```
//! use alpha_shape::{alpha_shape, optimize_alpha, Alpha, OptimizeOptions};
//!
//! let points = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.5, 0.5]];
//!
//! let alpha = optimize_alpha(&points, OptimizeOptions::default()).unwrap();
//! let shape = alpha_shape(&points, Some(Alpha::from(alpha))).unwrap();
//!
//! assert_eq!(shape.as_polygon().unwrap().0.len(), 1);
//! ```
#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::missing_const_for_fn)]

pub use alpha::{Alpha, AlphaFn};
pub use alpha_simplices::{AlphaSimplex, AlphaSimplices};
pub use assembly::{assemble_polygons, ShapeAssembler};
pub use boundary::{BoundaryExtractor, BoundaryFacetSet, Extraction};
pub use circumsphere::{circumcenter, circumradius, Circumsphere};
pub use config::{AlphaShapeConfig, ExhaustionPolicy, OptimizeOptions};
pub use diagnostics::Diagnostic;
pub use error::{AlphaShapeError, Result};
pub use geometry::Geometry;
pub use mesh::Mesh;
pub use optimizer::{AlphaOptimizer, Optimization, OptimizationStatus};
pub use point_set::PointSet;
pub use shape::{AlphaShape, Shape};
pub use triangulator::{PrecomputedTriangulation, SpadeTriangulator, Triangulator};
pub use utils::types::{Facet, Simplex, VertexIdx};

pub mod alpha;
pub mod alpha_simplices;
pub mod assembly;
pub mod boundary;
pub mod circumsphere;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
mod hull;
pub mod mesh;
pub mod optimizer;
pub mod point_set;
pub mod shape;
pub mod triangulator;
mod utils;

/// The alpha shape of `points`, with the optimal alpha if none is given.
///
/// Uses the default [`AlphaShapeConfig`], see [`AlphaShape`] for anything else.
///
/// ```
/// use alpha_shape::{alpha_shape, Alpha, Geometry};
///
/// let points = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];
///
/// let square = alpha_shape(&points, Some(Alpha::from(1e-9))).unwrap();
/// assert_eq!(square.as_polygon().unwrap().0.len(), 1);
///
/// let line = alpha_shape(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]], None).unwrap();
/// assert_eq!(line, Geometry::LineSegment(vec![0.0, 0.0], vec![3.0, 3.0]));
/// ```
pub fn alpha_shape<P: AsRef<[f64]>>(points: &[P], alpha: Option<Alpha>) -> Result<Geometry> {
    let shape = AlphaShape::new(points)?;
    Ok(shape.compute(alpha.as_ref())?.geometry)
}

/// The largest alpha for which the shape of `points` is a single polygon or mesh holding every point.
pub fn optimize_alpha<P: AsRef<[f64]>>(points: &[P], options: OptimizeOptions) -> Result<f64> {
    let shape = AlphaShape::new(points)?;
    Ok(shape.optimize(options)?.alpha)
}

/// The non-degenerate simplices of the default triangulation of `points` and their circumradii.
pub fn alpha_simplices<P: AsRef<[f64]>>(points: &[P]) -> Result<Vec<AlphaSimplex>> {
    let points = PointSet::new(points)?;
    let triangulator = AlphaShapeConfig::default().require_triangulator(points.dim())?;

    Ok(AlphaSimplices::from_triangulator(&points, triangulator.as_ref())?.collect())
}
