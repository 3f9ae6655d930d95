//! Convex hulls that need no triangulation.

use geo::{ConvexHull, MultiPoint, MultiPolygon, Point};

use crate::{
    geometry::Geometry,
    point_set::PointSet,
    utils::{distance::distance, predicates::orient_2d, types::VertexIdx},
};

/// Projection of `p - origin` onto `direction`.
fn project(p: &[f64], origin: &[f64], direction: &[f64]) -> f64 {
    p.iter()
        .zip(origin)
        .zip(direction)
        .map(|((p, o), d)| (p - o) * d)
        .sum()
}

/// Ends of the segment spanned by `unique` if all of them lie on one line.
///
/// The line runs from the first point towards the first point farthest from it, so two points
/// keep their input order.
fn collinear_extremes(points: &PointSet, unique: &[VertexIdx]) -> Option<(VertexIdx, VertexIdx)> {
    let coords: Vec<Vec<f64>> = unique.iter().map(|&idx| points.coords(idx)).collect();
    let origin = &coords[0];

    let mut far = 0;
    let mut far_distance = 0.0;
    for (i, p) in coords.iter().enumerate() {
        let d = distance(origin, p);
        if d > far_distance {
            far = i;
            far_distance = d;
        }
    }
    if far == 0 {
        return None;
    }
    let direction: Vec<f64> = coords[far].iter().zip(origin).map(|(f, o)| f - o).collect();

    let collinear = if points.dim() == 2 {
        let (a, b) = (points.vertex2(unique[0]), points.vertex2(unique[far]));
        unique
            .iter()
            .all(|&idx| orient_2d(&a, &b, &points.vertex2(idx)) == 0)
    } else {
        let length_squared = far_distance * far_distance;
        let tolerance = points.tolerance();
        coords.iter().all(|p| {
            let t = project(p, origin, &direction) / length_squared;
            let on_line: Vec<f64> = origin.iter().zip(&direction).map(|(o, d)| o + t * d).collect();
            distance(p, &on_line) <= tolerance
        })
    };
    if !collinear {
        return None;
    }

    let projections: Vec<f64> = coords.iter().map(|p| project(p, origin, &direction)).collect();
    let by_projection = |i: &usize, j: &usize| projections[*i].total_cmp(&projections[*j]);
    let min = (0..coords.len()).min_by(by_projection)?;
    let max = (0..coords.len()).max_by(by_projection)?;

    Some((unique[min], unique[max]))
}

/// The points collapse to a point, a segment or, in three or more dimensions, a triangle.
///
/// Such sets have no full-dimensional simplices, their shape is the convex hull for every alpha.
pub fn is_degenerate(points: &PointSet) -> bool {
    let unique = points.unique_indices();

    unique.len() == 1
        || points.dim() == 1
        || (points.dim() >= 3 && unique.len() <= 3)
        || collinear_extremes(points, &unique).is_some()
}

/// The convex hull of `points` when it can be had without a triangulation.
///
/// * one distinct point: [`Geometry::Point`]
/// * one dimension: [`Geometry::LineSegment`] from the minimum to the maximum
/// * collinear points: [`Geometry::LineSegment`] between the extremes
/// * planar points: [`Geometry::Polygon`]
/// * three points in higher dimensions: [`Geometry::Triangle`]
///
/// Returns `None` for four or more affinely spanning points in three or more dimensions.
pub fn degenerate_hull(points: &PointSet) -> Option<Geometry> {
    let unique = points.unique_indices();

    if unique.len() == 1 {
        return Some(Geometry::Point(points.coords(unique[0])));
    }

    if points.dim() == 1 {
        let by_value = |i: &&VertexIdx, j: &&VertexIdx| points.matrix()[(**i, 0)].total_cmp(&points.matrix()[(**j, 0)]);
        let min = unique.iter().min_by(by_value)?;
        let max = unique.iter().max_by(by_value)?;
        return Some(Geometry::LineSegment(points.coords(*min), points.coords(*max)));
    }

    if let Some((a, b)) = collinear_extremes(points, &unique) {
        return Some(Geometry::LineSegment(points.coords(a), points.coords(b)));
    }

    if points.dim() == 2 {
        let multi_point: MultiPoint<f64> = unique
            .iter()
            .map(|&idx| {
                let [x, y] = points.vertex2(idx);
                Point::new(x, y)
            })
            .collect();
        return Some(Geometry::Polygon(MultiPolygon::new(vec![multi_point.convex_hull()])));
    }

    if let [a, b, c] = unique[..] {
        return Some(Geometry::Triangle([
            points.coords(a),
            points.coords(b),
            points.coords(c),
        ]));
    }

    None
}
