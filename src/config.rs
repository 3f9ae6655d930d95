use std::{fmt, sync::Arc};

use crate::{
    error::{AlphaShapeError, Result},
    triangulator::{SpadeTriangulator, Triangulator},
};

/// Optional collaborators and capabilities of an [`crate::AlphaShape`].
///
/// Resolved once when the shape is built, the pipeline never looks them up again.
///
/// ```
/// use alpha_shape::{AlphaShapeConfig, PrecomputedTriangulation};
///
/// let config = AlphaShapeConfig::default()
///     .with_triangulator(PrecomputedTriangulation::new(vec![vec![0, 1, 2, 3]]))
///     .repair_normals(false)
///     .parallel(true);
///
/// assert!(config.triangulator.is_some());
/// ```
#[derive(Clone)]
pub struct AlphaShapeConfig {
    /// Delaunay provider, defaults to [`SpadeTriangulator`] for planar points.
    pub triangulator: Option<Arc<dyn Triangulator>>,
    /// Make 3D mesh normals consistent and outward facing.
    pub repair_normals: bool,
    /// Check point containment with rayon.
    pub parallel: bool,
}

impl Default for AlphaShapeConfig {
    fn default() -> Self {
        Self {
            triangulator: None,
            repair_normals: true,
            parallel: false,
        }
    }
}

impl fmt::Debug for AlphaShapeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaShapeConfig")
            .field("triangulator", &self.triangulator.as_ref().map(|_| ".."))
            .field("repair_normals", &self.repair_normals)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl AlphaShapeConfig {
    #[must_use]
    pub fn with_triangulator(mut self, triangulator: impl Triangulator + 'static) -> Self {
        self.triangulator = Some(Arc::new(triangulator));
        self
    }

    #[must_use]
    pub const fn repair_normals(mut self, repair_normals: bool) -> Self {
        self.repair_normals = repair_normals;
        self
    }

    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The triangulator for points of dimension `dim`, if any.
    pub fn triangulator_for(&self, dim: usize) -> Option<Arc<dyn Triangulator>> {
        match (&self.triangulator, dim) {
            (Some(triangulator), _) => Some(Arc::clone(triangulator)),
            (None, 2) => Some(Arc::new(SpadeTriangulator)),
            (None, _) => None,
        }
    }

    /// Like [`Self::triangulator_for`], failing with [`AlphaShapeError::MissingTriangulator`].
    pub fn require_triangulator(&self, dim: usize) -> Result<Arc<dyn Triangulator>> {
        self.triangulator_for(dim)
            .ok_or(AlphaShapeError::MissingTriangulator { dim })
    }
}

/// What the optimizer returns once its iteration budget is spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// The largest alpha known to be valid so far.
    #[default]
    BestLowerBound,
    /// Zero, i.e. the convex hull.
    ConvexHull,
}

/// Parameters of the alpha bisection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptimizeOptions {
    pub max_iterations: usize,
    /// Initial lower bound, must be non-negative.
    pub lower: f64,
    /// Initial upper bound, must be finite. The shape must be invalid here.
    pub upper: f64,
    /// Suppress warnings.
    pub silent: bool,
    pub on_exhausted: ExhaustionPolicy,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            lower: 0.0,
            upper: f64::MAX,
            silent: false,
            on_exhausted: ExhaustionPolicy::default(),
        }
    }
}

impl OptimizeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.lower.is_nan() || self.lower < 0.0 {
            return Err(AlphaShapeError::InvalidParameter(format!(
                "lower bound must be non-negative, got {}",
                self.lower
            )));
        }
        if !self.upper.is_finite() {
            return Err(AlphaShapeError::InvalidParameter(format!(
                "upper bound must be finite, got {}",
                self.upper
            )));
        }
        if self.lower > self.upper {
            return Err(AlphaShapeError::InvalidParameter(format!(
                "lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            )));
        }
        Ok(())
    }
}
