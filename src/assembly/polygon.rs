//! Planar boundary edges to polygons.

use std::collections::{BTreeMap, HashMap};

use geo::{Area, Contains, Coord, LineString, MultiPolygon, Point, Polygon};

use crate::{
    boundary::BoundaryFacetSet,
    point_set::PointSet,
    utils::{helper::DisplayCoords, predicates::orient_2d, types::VertexIdx},
};

/// Directed boundary edges, keyed by their start vertex.
type Outgoing = BTreeMap<VertexIdx, Vec<VertexIdx>>;

/// Orients every boundary edge so that the accepted region lies to its left.
fn directed_edges(points: &PointSet, facets: &BoundaryFacetSet) -> Outgoing {
    let mut outgoing = Outgoing::new();

    for (facet, apex) in facets.iter() {
        let (a, b) = (facet[0], facet[1]);
        let (from, to) = if orient_2d(&points.vertex2(a), &points.vertex2(b), &points.vertex2(apex)) >= 0 {
            (a, b)
        } else {
            (b, a)
        };
        outgoing.entry(from).or_default().push(to);
    }

    outgoing
}

/// Chains directed edges into simple closed rings.
///
/// A walk that comes back to a vertex already on its path closes a ring right there, so rings
/// touching at a vertex come out separated. Chains that end without closing are dropped.
fn trace_rings(mut outgoing: Outgoing) -> Vec<Vec<VertexIdx>> {
    let starts: Vec<VertexIdx> = outgoing.keys().copied().collect();
    let mut rings = Vec::new();

    for start in starts {
        while outgoing.get(&start).is_some_and(|edges| !edges.is_empty()) {
            let mut path = vec![start];
            let mut position = HashMap::from([(start, 0)]);

            loop {
                let last = path[path.len() - 1];
                let Some(next) = outgoing.get_mut(&last).and_then(Vec::pop) else {
                    if path.len() > 1 {
                        log::warn!("Dropping open boundary chain {:?}", path);
                    }
                    break;
                };

                if let Some(&pos) = position.get(&next) {
                    let ring = path.split_off(pos);
                    for v in &ring {
                        position.remove(v);
                    }
                    position.insert(next, path.len());
                    path.push(next);
                    rings.push(ring);
                } else {
                    position.insert(next, path.len());
                    path.push(next);
                }
            }
        }
    }

    rings
}

/// Polygons bounded by the given planar facets.
///
/// Counter-clockwise rings become shells, clockwise rings become holes of the smallest shell
/// around them.
pub fn assemble_polygons(points: &PointSet, facets: &BoundaryFacetSet) -> MultiPolygon<f64> {
    let now = std::time::Instant::now();

    let mut shells: Vec<(Polygon<f64>, Vec<LineString<f64>>)> = Vec::new();
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in trace_rings(directed_edges(points, facets)) {
        if ring.len() < 3 {
            log::debug!("Skipping boundary ring {:?} with less than three vertices", ring);
            continue;
        }

        let coords: Vec<Coord<f64>> = ring
            .iter()
            .map(|&v| {
                let [x, y] = points.vertex2(v);
                Coord { x, y }
            })
            .collect();
        let line = LineString::from(coords);
        let area = Polygon::new(line.clone(), vec![]).signed_area();

        if area > 0.0 {
            shells.push((Polygon::new(line, vec![]), Vec::new()));
        } else if area < 0.0 {
            holes.push(line);
        } else {
            log::debug!("Skipping boundary ring {:?} without area", ring);
        }
    }

    for hole in holes {
        // any point strictly inside a hole edge lies in the interior of its shell
        let mid = match (hole.0.first(), hole.0.get(1)) {
            (Some(a), Some(b)) => Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
            _ => continue,
        };

        let shell = shells
            .iter_mut()
            .filter(|(shell, _)| shell.contains(&mid))
            .min_by(|(a, _), (b, _)| a.unsigned_area().total_cmp(&b.unsigned_area()));

        match shell {
            Some((_, interiors)) => interiors.push(hole),
            None => log::warn!(
                "Dropping hole without enclosing shell near {}",
                DisplayCoords(&[mid.x(), mid.y()])
            ),
        }
    }

    let polygons: Vec<Polygon<f64>> = shells
        .into_iter()
        .map(|(shell, interiors)| Polygon::new(shell.exterior().clone(), interiors))
        .collect();

    log::trace!(
        "Assembled {} polygons from {} boundary edges in {:.4} µs",
        polygons.len(),
        facets.len(),
        now.elapsed().as_micros()
    );

    MultiPolygon::new(polygons)
}
