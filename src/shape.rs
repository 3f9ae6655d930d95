use std::sync::{Arc, OnceLock};

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    alpha::Alpha,
    alpha_simplices::{AlphaSimplex, AlphaSimplices},
    assembly::ShapeAssembler,
    boundary::{BoundaryExtractor, Extraction},
    config::{AlphaShapeConfig, OptimizeOptions},
    diagnostics::Diagnostic,
    error::{AlphaShapeError, Result},
    geometry::Geometry,
    hull::{degenerate_hull, is_degenerate},
    optimizer::{AlphaOptimizer, Optimization},
    point_set::PointSet,
    triangulator::Triangulator,
};

/// A computed shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    /// The constant alpha the shape was computed with, `None` for a per-simplex alpha.
    pub alpha: Option<f64>,
    /// Recoverable conditions met on the way.
    pub diagnostics: Vec<Diagnostic>,
}

/// Non-degenerate simplices of the triangulation with their circumradii.
#[derive(Debug)]
struct Triangulated {
    simplices: Vec<AlphaSimplex>,
    diagnostics: Vec<Diagnostic>,
}

/// Alpha shapes of one point set.
///
/// The triangulation and the circumradii do not depend on alpha. They are computed on first use
/// and shared by every following computation, so trying many alphas (as the optimizer does) only
/// repeats the boundary extraction and assembly.
///
/// ```
/// use alpha_shape::{Alpha, AlphaShape, Geometry};
///
/// let shape = AlphaShape::new(&[
///     [0.0, 0.0],
///     [0.0, 1.0],
///     [1.0, 1.0],
///     [1.0, 0.0],
///     [0.5, 0.25],
///     [0.5, 0.75],
///     [0.25, 0.5],
///     [0.75, 0.5],
/// ])
/// .unwrap();
///
/// let optimized = shape.compute(None).unwrap();
/// assert!(optimized.alpha.unwrap() > 3.0);
///
/// let Geometry::Polygon(polygons) = shape.with_alpha(&Alpha::from(2.0)).unwrap().geometry else {
///     panic!("expected polygons");
/// };
/// assert_eq!(polygons.0.len(), 1);
/// ```
pub struct AlphaShape {
    points: PointSet,
    triangulator: Option<Arc<dyn Triangulator>>,
    repair_normals: bool,
    parallel: bool,
    degenerate: bool,
    triangulated: OnceLock<Triangulated>,
}

impl AlphaShape {
    /// Alpha shapes of `points` with the default configuration.
    pub fn new<P: AsRef<[f64]>>(points: &[P]) -> Result<Self> {
        Self::with_config(points, AlphaShapeConfig::default())
    }

    pub fn with_config<P: AsRef<[f64]>>(points: &[P], config: AlphaShapeConfig) -> Result<Self> {
        Ok(Self::from_point_set(PointSet::new(points)?, config))
    }

    pub fn from_point_set(points: PointSet, config: AlphaShapeConfig) -> Self {
        let triangulator = config.triangulator_for(points.dim());
        let degenerate = is_degenerate(&points);
        Self {
            points,
            triangulator,
            repair_normals: config.repair_normals,
            parallel: config.parallel,
            degenerate,
            triangulated: OnceLock::new(),
        }
    }

    pub const fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn dim(&self) -> usize {
        self.points.dim()
    }

    /// The shape is the convex hull for every alpha.
    ///
    /// That is the case for fewer than four points, for one dimension, and for points that
    /// collapse to a point, a segment or a triangle in space, duplicates included.
    pub fn is_trivial(&self) -> bool {
        self.points.len() < 4 || self.points.dim() == 1 || self.degenerate
    }

    /// The shape for the given alpha, or for the optimal one if `alpha` is `None`.
    pub fn compute(&self, alpha: Option<&Alpha>) -> Result<Shape> {
        match alpha {
            Some(alpha) => self.with_alpha(alpha),
            None => {
                let optimization = self.optimize(OptimizeOptions::default())?;
                self.with_alpha(&Alpha::Constant(optimization.alpha))
            }
        }
    }

    /// The shape for `alpha`. A constant alpha of zero or less yields the convex hull.
    pub fn with_alpha(&self, alpha: &Alpha) -> Result<Shape> {
        if self.is_trivial() || alpha.is_convex_hull() {
            let mut shape = self.convex_hull()?;
            shape.alpha = alpha.as_constant();
            return Ok(shape);
        }

        let now = std::time::Instant::now();

        let triangulated = self.triangulated()?;
        let extraction = BoundaryExtractor::new(self.dim()).extract(&triangulated.simplices, alpha);
        let shape = self.assemble(triangulated, extraction, alpha.as_constant());

        log::trace!("Computed alpha shape in {:.4} µs", now.elapsed().as_micros());

        Ok(shape)
    }

    /// The convex hull, the limit of the shape for alpha towards zero.
    pub fn convex_hull(&self) -> Result<Shape> {
        if let Some(geometry) = degenerate_hull(&self.points) {
            return Ok(Shape {
                geometry,
                alpha: Some(0.0),
                diagnostics: Vec::new(),
            });
        }

        let triangulated = self.triangulated()?;
        let extraction = BoundaryExtractor::new(self.dim()).extract_all(&triangulated.simplices);
        Ok(self.assemble(triangulated, extraction, Some(0.0)))
    }

    /// Searches the largest alpha whose shape is still valid, see [`AlphaOptimizer`].
    pub fn optimize(&self, options: OptimizeOptions) -> Result<Optimization> {
        AlphaOptimizer::new(self, options).run()
    }

    /// Whether the shape at `alpha` is a single polygon or a single closed mesh holding every input point.
    pub fn is_valid_at(&self, alpha: f64) -> Result<bool> {
        let shape = self.with_alpha(&Alpha::Constant(alpha))?;
        Ok(self.is_valid(&shape.geometry))
    }

    /// Validity of a geometry for this point set, see [`Self::is_valid_at`].
    pub fn is_valid(&self, geometry: &Geometry) -> bool {
        match geometry {
            Geometry::Polygon(polygons) => polygons.0.len() == 1 && self.contains_all(geometry),
            Geometry::Mesh(mesh) => {
                !mesh.is_empty()
                    && mesh.num_components() == 1
                    && mesh.is_closed()
                    && self.contains_all(geometry)
            }
            _ => false,
        }
    }

    fn contains_all(&self, geometry: &Geometry) -> bool {
        let tolerance = self.points.tolerance();
        let contains = |idx| geometry.contains_point(&self.points.coords(idx), tolerance);

        if self.parallel {
            (0..self.points.len()).into_par_iter().all(contains)
        } else {
            (0..self.points.len()).all(contains)
        }
    }

    fn assemble(&self, triangulated: &Triangulated, extraction: Extraction, alpha: Option<f64>) -> Shape {
        let mut diagnostics = triangulated.diagnostics.clone();
        diagnostics.extend(extraction.diagnostics);

        Shape {
            geometry: ShapeAssembler::new(&self.points, self.repair_normals).assemble(extraction.facets),
            alpha,
            diagnostics,
        }
    }

    fn triangulated(&self) -> Result<&Triangulated> {
        if let Some(triangulated) = self.triangulated.get() {
            return Ok(triangulated);
        }

        let triangulator = self
            .triangulator
            .as_deref()
            .ok_or(AlphaShapeError::MissingTriangulator { dim: self.dim() })?;

        let now = std::time::Instant::now();

        let mut stream = AlphaSimplices::from_triangulator(&self.points, triangulator)?;
        let simplices: Vec<AlphaSimplex> = stream.by_ref().collect();
        let diagnostics = stream.diagnostics();

        if !diagnostics.is_empty() {
            log::warn!(
                "Skipped {} degenerate simplices of {}",
                diagnostics.len(),
                diagnostics.len() + simplices.len()
            );
        }
        log::trace!(
            "Computed {} circumradii in {:.4} µs",
            simplices.len(),
            now.elapsed().as_micros()
        );

        Ok(self.triangulated.get_or_init(|| Triangulated {
            simplices,
            diagnostics,
        }))
    }
}
