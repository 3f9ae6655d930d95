use thiserror::Error;

use crate::utils::types::VertexIdx;

/// Errors raised while building or querying alpha shapes.
///
/// Caller mistakes (`EmptyPointSet` .. `MissingTriangulator`) are fatal and returned immediately.
/// `DegenerateSimplex` is raised by the circumsphere solver and is recoverable: the pipeline skips
/// the simplex and records a [`crate::Diagnostic`] instead.
#[derive(Debug, Error)]
pub enum AlphaShapeError {
    #[error("the point set is empty")]
    EmptyPointSet,

    #[error("points must have at least one coordinate")]
    ZeroDimension,

    #[error("point {index} has {actual} coordinates, expected {expected}")]
    DimensionMismatch {
        index: VertexIdx,
        expected: usize,
        actual: usize,
    },

    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: VertexIdx },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("no triangulator available for {dim}-dimensional points, supply one via AlphaShapeConfig")]
    MissingTriangulator { dim: usize },

    #[error("triangulation failed")]
    Triangulation(#[source] anyhow::Error),

    /// `points` is the number of rows handed to the solver, which are affinely dependent.
    #[error("the {points} points are affinely dependent and have no unique circumsphere")]
    DegenerateSimplex { points: usize },
}

pub type Result<T> = std::result::Result<T, AlphaShapeError>;
