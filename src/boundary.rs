//! Boundary facets of a filtered simplicial complex.
//!
//! Every accepted simplex toggles its `K + 1` facets in and out of the boundary set. Facets shared
//! by two accepted simplices cancel out, the facets left over are exactly those with odd
//! incidence: the boundary of the union of the accepted simplices.

use std::{
    borrow::Borrow,
    collections::{BTreeMap, BTreeSet, HashSet},
};

use crate::{
    alpha::Alpha,
    alpha_simplices::AlphaSimplex,
    diagnostics::Diagnostic,
    utils::{
        helper::canonical,
        types::{Facet, VertexIdx},
    },
};

/// Facets with odd accepted incidence, each with the apex of the simplex that contributed it.
///
/// The apex is the vertex opposite to the facet, so the facet's outside is the side facing away
/// from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryFacetSet {
    dim: usize,
    facets: BTreeMap<Facet, VertexIdx>,
}

impl BoundaryFacetSet {
    pub const fn new(dim: usize) -> Self {
        Self {
            dim,
            facets: BTreeMap::new(),
        }
    }

    /// Dimension of the ambient space, facets have `dim` vertices.
    pub const fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Checks for a facet given in any vertex order.
    pub fn contains(&self, facet: &[VertexIdx]) -> bool {
        self.facets.contains_key(&canonical(facet))
    }

    pub fn apex(&self, facet: &[VertexIdx]) -> Option<VertexIdx> {
        self.facets.get(&canonical(facet)).copied()
    }

    /// Facets in canonical (sorted) form, in ascending order, with their apex.
    pub fn iter(&self) -> impl Iterator<Item = (&Facet, VertexIdx)> + '_ {
        self.facets.iter().map(|(facet, &apex)| (facet, apex))
    }

    /// All vertices referenced by a boundary facet.
    pub fn vertices(&self) -> BTreeSet<VertexIdx> {
        self.facets.keys().flatten().copied().collect()
    }
}

/// Output of a boundary extraction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub facets: BoundaryFacetSet,
    /// Number of simplices that passed the filter.
    pub accepted: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Toggle-set boundary extraction over a stream of [`AlphaSimplex`]es.
///
/// ```
/// use alpha_shape::{Alpha, AlphaSimplices, BoundaryExtractor, PointSet};
///
/// let points = PointSet::new(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).unwrap();
/// let stream = AlphaSimplices::new(&points, vec![vec![0, 1, 2], vec![0, 2, 3]]).unwrap();
///
/// let extraction = BoundaryExtractor::new(2).extract(stream, &Alpha::from(1.0));
///
/// assert_eq!(extraction.facets.len(), 4);
/// assert!(!extraction.facets.contains(&[2, 0]));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BoundaryExtractor {
    dim: usize,
}

impl BoundaryExtractor {
    pub const fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// Keeps the simplices accepted by `alpha`.
    pub fn extract<I>(&self, simplices: I, alpha: &Alpha) -> Extraction
    where
        I: IntoIterator,
        I::Item: Borrow<AlphaSimplex>,
    {
        self.extract_with(simplices, |s| alpha.accepts(&s.simplex, s.circumradius))
    }

    /// Keeps every simplex, the boundary of the whole triangulation.
    pub fn extract_all<I>(&self, simplices: I) -> Extraction
    where
        I: IntoIterator,
        I::Item: Borrow<AlphaSimplex>,
    {
        self.extract_with(simplices, |_| true)
    }

    /// Keeps the simplices for which `accept` holds.
    pub fn extract_with<I, F>(&self, simplices: I, accept: F) -> Extraction
    where
        I: IntoIterator,
        I::Item: Borrow<AlphaSimplex>,
        F: Fn(&AlphaSimplex) -> bool,
    {
        let now = std::time::Instant::now();

        let mut seen: HashSet<Facet> = HashSet::new();
        let mut boundary: BTreeMap<Facet, VertexIdx> = BTreeMap::new();
        let mut accepted = 0;
        let mut diagnostics = Vec::new();

        for item in simplices {
            let alpha_simplex = item.borrow();
            if !accept(alpha_simplex) {
                continue;
            }
            accepted += 1;

            let simplex = &alpha_simplex.simplex;
            for (drop, &apex) in simplex.iter().enumerate() {
                let facet: Facet = canonical(
                    &simplex
                        .iter()
                        .enumerate()
                        .filter_map(|(i, &v)| (i != drop).then_some(v))
                        .collect::<Vec<_>>(),
                );

                if seen.insert(facet.clone()) {
                    boundary.insert(facet, apex);
                } else if boundary.remove(&facet).is_none() {
                    // third incidence, keep odd multiplicity semantics
                    log::warn!("Facet {:?} is shared by more than two simplices", facet);
                    diagnostics.push(Diagnostic::DataQualityViolation {
                        facet: facet.clone(),
                    });
                    boundary.insert(facet, apex);
                }
            }
        }

        log::trace!(
            "Extracted {} boundary facets from {} accepted simplices in {:.4} µs",
            boundary.len(),
            accepted,
            now.elapsed().as_micros()
        );

        Extraction {
            facets: BoundaryFacetSet {
                dim: self.dim,
                facets: boundary,
            },
            accepted,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alpha_simplices::AlphaSimplices,
        point_set::PointSet,
        test_utils::{cube_with_inner_points, tesseract_kuhn, tesseract_with_inner_points},
    };

    fn alpha_simplex(simplex: Vec<VertexIdx>, circumradius: f64) -> AlphaSimplex {
        AlphaSimplex {
            simplex,
            circumradius,
        }
    }

    #[test]
    fn test_shared_facet_cancels() {
        let simplices = vec![
            alpha_simplex(vec![0, 1, 2], 1.0),
            alpha_simplex(vec![2, 1, 3], 1.0),
        ];
        let extraction = BoundaryExtractor::new(2).extract_all(&simplices);

        assert_eq!(extraction.accepted, 2);
        assert_eq!(extraction.facets.len(), 4);
        assert!(!extraction.facets.contains(&[1, 2]));
        assert_eq!(extraction.facets.apex(&[2, 0]), Some(1));
        assert_eq!(extraction.facets.apex(&[3, 1]), Some(2));
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_radius_filter() {
        let simplices = vec![
            alpha_simplex(vec![0, 1, 2], 0.4),
            alpha_simplex(vec![1, 2, 3], 0.6),
        ];
        let extraction = BoundaryExtractor::new(2).extract(&simplices, &Alpha::from(2.0));

        assert_eq!(extraction.accepted, 1);
        assert_eq!(extraction.facets.len(), 3);
        assert!(extraction.facets.contains(&[1, 2]));
    }

    #[test]
    fn test_non_positive_per_simplex_alpha_rejects() {
        let simplices = vec![
            alpha_simplex(vec![0, 1, 2], 0.0),
            alpha_simplex(vec![1, 2, 3], 0.1),
        ];
        let alpha = Alpha::per_simplex(|simplex, _| if simplex.contains(&0) { 0.0 } else { 1.0 });
        let extraction = BoundaryExtractor::new(2).extract(&simplices, &alpha);

        assert_eq!(extraction.accepted, 1);
        assert!(extraction.facets.contains(&[2, 3]));
        assert!(!extraction.facets.contains(&[0, 1]));
    }

    #[test]
    fn test_third_incidence_is_flagged_and_toggled_back() {
        let simplices = vec![
            alpha_simplex(vec![0, 1, 2], 1.0),
            alpha_simplex(vec![0, 1, 3], 1.0),
            alpha_simplex(vec![1, 0, 4], 1.0),
        ];
        let extraction = BoundaryExtractor::new(2).extract_all(&simplices);

        assert_eq!(
            extraction.diagnostics,
            vec![Diagnostic::DataQualityViolation { facet: vec![0, 1] }]
        );
        assert!(extraction.facets.contains(&[0, 1]));
        assert_eq!(extraction.facets.apex(&[0, 1]), Some(4));
        assert_eq!(extraction.facets.len(), 7);
    }

    #[test]
    fn test_cube_hull_facets() {
        let (vertices, simplices) = cube_with_inner_points();
        let points = PointSet::new(&vertices).unwrap();
        let stream = AlphaSimplices::new(&points, simplices).unwrap();

        let extraction = BoundaryExtractor::new(3).extract_all(stream);

        // two triangles per cube face, only corners on the hull
        assert_eq!(extraction.facets.len(), 12);
        assert_eq!(extraction.facets.vertices(), (0..8).collect::<BTreeSet<_>>());
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_cube_with_inner_points_at_alpha() {
        let (vertices, simplices) = cube_with_inner_points();
        let points = PointSet::new(&vertices).unwrap();
        let stream = AlphaSimplices::new(&points, simplices).unwrap();

        let extraction = BoundaryExtractor::new(3).extract(stream, &Alpha::from(2.1));

        // inner octahedron plus one tetrahedron per cube corner
        assert_eq!(extraction.accepted, 12);
        assert_eq!(extraction.facets.len(), 24);
        for (facet, _) in extraction.facets.iter() {
            assert_eq!(facet.iter().filter(|&&v| v < 8).count(), 1);
        }
    }

    #[test]
    fn test_tesseract_boundary() {
        let (vertices, simplices) = tesseract_kuhn();
        let points = PointSet::new(&vertices).unwrap();

        let extractor = BoundaryExtractor::new(4);

        // every Kuhn simplex shares the circumsphere of the tesseract, radius 1
        let stream = AlphaSimplices::new(&points, simplices.clone()).unwrap();
        let all = extractor.extract(stream, &Alpha::from(0.5));
        assert_eq!(all.accepted, 24);
        assert_eq!(all.facets.len(), 48);
        assert_eq!(all.facets.dim(), 4);

        let stream = AlphaSimplices::new(&points, simplices).unwrap();
        let none = extractor.extract(stream, &Alpha::from(1.5));
        assert_eq!(none.accepted, 0);
        assert!(none.facets.is_empty());
    }

    #[test]
    fn test_tesseract_with_inner_points_boundary() {
        let (vertices, simplices) = tesseract_with_inner_points();
        let points = PointSet::new(&vertices).unwrap();
        let extractor = BoundaryExtractor::new(4);

        // the inner 16-cell, the corner, edge and square simplices pass, the cube pyramids do not
        let stream = AlphaSimplices::new(&points, simplices.clone()).unwrap();
        let extraction = extractor.extract(stream, &Alpha::from(1.0));
        let expected: BTreeSet<Facet> = [
            [0, 1, 2, 16], [0, 1, 2, 17], [0, 1, 3, 16], [0, 1, 3, 18], [0, 1, 8, 17], [0, 1, 8, 18],
            [0, 2, 3, 16], [0, 2, 3, 19], [0, 2, 8, 17], [0, 2, 8, 19], [0, 3, 8, 18], [0, 3, 8, 19],
            [1, 2, 6, 16], [1, 2, 6, 17], [1, 3, 5, 16], [1, 3, 5, 18], [1, 5, 7, 16], [1, 5, 7, 23],
            [1, 5, 13, 18], [1, 5, 13, 23], [1, 6, 7, 16], [1, 6, 7, 23], [1, 6, 14, 17], [1, 6, 14, 23],
            [1, 8, 9, 17], [1, 8, 9, 18], [1, 9, 13, 18], [1, 9, 13, 23], [1, 9, 14, 17], [1, 9, 14, 23],
            [2, 3, 4, 16], [2, 3, 4, 19], [2, 4, 7, 16], [2, 4, 7, 22], [2, 4, 12, 19], [2, 4, 12, 22],
            [2, 6, 7, 16], [2, 6, 7, 22], [2, 6, 14, 17], [2, 6, 14, 22], [2, 8, 10, 17], [2, 8, 10, 19],
            [2, 10, 12, 19], [2, 10, 12, 22], [2, 10, 14, 17], [2, 10, 14, 22], [3, 4, 7, 16], [3, 4, 7, 21],
            [3, 4, 12, 19], [3, 4, 12, 21], [3, 5, 7, 16], [3, 5, 7, 21], [3, 5, 13, 18], [3, 5, 13, 21],
            [3, 8, 11, 18], [3, 8, 11, 19], [3, 11, 12, 19], [3, 11, 12, 21], [3, 11, 13, 18], [3, 11, 13, 21],
            [4, 7, 12, 21], [4, 7, 12, 22], [5, 7, 13, 21], [5, 7, 13, 23], [6, 7, 14, 22], [6, 7, 14, 23],
            [7, 12, 15, 21], [7, 12, 15, 22], [7, 13, 15, 21], [7, 13, 15, 23], [7, 14, 15, 22], [7, 14, 15, 23],
            [8, 9, 13, 18], [8, 9, 13, 20], [8, 9, 14, 17], [8, 9, 14, 20], [8, 10, 12, 19], [8, 10, 12, 20],
            [8, 10, 14, 17], [8, 10, 14, 20], [8, 11, 12, 19], [8, 11, 12, 20], [8, 11, 13, 18], [8, 11, 13, 20],
            [9, 13, 14, 20], [9, 13, 14, 23], [10, 12, 14, 20], [10, 12, 14, 22], [11, 12, 13, 20], [11, 12, 13, 21],
            [12, 13, 15, 20], [12, 13, 15, 21], [12, 14, 15, 20], [12, 14, 15, 22], [13, 14, 15, 20], [13, 14, 15, 23],
        ]
        .iter()
        .map(|facet| facet.to_vec())
        .collect();

        assert_eq!(extraction.accepted, 104);
        assert_eq!(extraction.facets.iter().map(|(facet, _)| facet.clone()).collect::<BTreeSet<_>>(), expected);
        assert!(extraction.diagnostics.is_empty());

        // five tetrahedra on each of the eight cubes bounding the tesseract
        let stream = AlphaSimplices::new(&points, simplices).unwrap();
        let hull = extractor.extract_all(stream);
        assert_eq!(hull.facets.len(), 40);
        assert_eq!(hull.facets.vertices(), (0..16).collect::<BTreeSet<_>>());
    }
}
