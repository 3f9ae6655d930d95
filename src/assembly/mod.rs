//! Boundary facets to output geometry, per ambient dimension.

use crate::{
    boundary::BoundaryFacetSet,
    geometry::Geometry,
    mesh::Mesh,
    point_set::PointSet,
    utils::{predicates::orient_3d, types::VertexIdx},
};

pub use self::polygon::assemble_polygons;

mod polygon;

/// Turns a [`BoundaryFacetSet`] into the [`Geometry`] matching the dimension of the point set.
///
/// * 2D: a [`Geometry::Polygon`], possibly empty, possibly with holes
/// * 3D: a [`Geometry::Mesh`] over all input points
/// * otherwise: the facets themselves as [`Geometry::FacetSet`]
#[derive(Clone, Copy, Debug)]
pub struct ShapeAssembler<'a> {
    points: &'a PointSet,
    repair_normals: bool,
}

impl<'a> ShapeAssembler<'a> {
    pub const fn new(points: &'a PointSet, repair_normals: bool) -> Self {
        Self {
            points,
            repair_normals,
        }
    }

    pub fn assemble(&self, facets: BoundaryFacetSet) -> Geometry {
        match self.points.dim() {
            2 => Geometry::Polygon(assemble_polygons(self.points, &facets)),
            3 => Geometry::Mesh(self.assemble_mesh(&facets)),
            _ => Geometry::FacetSet(facets),
        }
    }

    /// One triangle per facet, wound so that its normal faces away from the facet's apex.
    pub fn assemble_mesh(&self, facets: &BoundaryFacetSet) -> Mesh {
        let vertices = self.points.vertices3();

        let faces: Vec<[VertexIdx; 3]> = facets
            .iter()
            .map(|(facet, apex)| {
                let [a, b, c] = [facet[0], facet[1], facet[2]];
                if orient_3d(&vertices[a], &vertices[b], &vertices[c], &vertices[apex]) < 0 {
                    [a, c, b]
                } else {
                    [a, b, c]
                }
            })
            .collect();

        let mut mesh = Mesh::new(vertices, faces);
        if self.repair_normals {
            mesh.fix_normals();
        }
        mesh
    }
}
