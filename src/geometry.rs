use geo::{Intersects, MultiPolygon, Point};

use crate::{
    boundary::BoundaryFacetSet,
    mesh::Mesh,
    utils::{
        distance::{distance, distance_to_segment, distance_to_triangle},
        types::Coords,
    },
};

/// The shape of a point set.
///
/// The variant depends on the dimension and on how degenerate the points are: single points and
/// collinear sets collapse to [`Geometry::Point`] and [`Geometry::LineSegment`], planar shapes are
/// [`Geometry::Polygon`]s, spatial shapes [`Geometry::Mesh`]es and anything of higher dimension
/// is returned as its raw [`Geometry::FacetSet`].
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Coords),
    LineSegment(Coords, Coords),
    /// Three affinely independent points in three or more dimensions.
    Triangle([Coords; 3]),
    /// Possibly empty, possibly several polygons, possibly with holes.
    Polygon(MultiPolygon<f64>),
    Mesh(Mesh),
    FacetSet(BoundaryFacetSet),
}

impl Geometry {
    pub const fn as_polygon(&self) -> Option<&MultiPolygon<f64>> {
        match self {
            Self::Polygon(polygons) => Some(polygons),
            _ => None,
        }
    }

    pub const fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Self::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub const fn as_facet_set(&self) -> Option<&BoundaryFacetSet> {
        match self {
            Self::FacetSet(facets) => Some(facets),
            _ => None,
        }
    }

    /// Checks whether `p` lies on or inside the geometry.
    ///
    /// `tolerance` is the distance within which points count as on the boundary. Polygons are
    /// tested exactly. Facet sets carry no geometry and contain nothing, and neither does any
    /// geometry contain a point of another dimension.
    pub fn contains_point(&self, p: &[f64], tolerance: f64) -> bool {
        match self {
            Self::Point(q) => p.len() == q.len() && distance(p, q) <= tolerance,
            Self::LineSegment(a, b) => {
                p.len() == a.len() && distance_to_segment(p, a, b) <= tolerance
            }
            Self::Triangle([a, b, c]) => {
                p.len() == a.len() && distance_to_triangle(p, a, b, c) <= tolerance
            }
            Self::Polygon(polygons) => {
                p.len() == 2 && polygons.intersects(&Point::new(p[0], p[1]))
            }
            Self::Mesh(mesh) => p.len() == 3 && mesh.contains_point(&[p[0], p[1], p[2]], tolerance),
            Self::FacetSet(_) => false,
        }
    }
}
