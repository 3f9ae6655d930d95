use std::{fmt, sync::Arc};

use crate::utils::types::VertexIdx;

/// Signature of a per-simplex alpha: `(simplex indices, circumradius) -> alpha`.
pub type AlphaFn = dyn Fn(&[VertexIdx], f64) -> f64 + Send + Sync;

/// The alpha parameter of a shape.
///
/// A simplex is kept iff its effective alpha is positive and its circumradius is below
/// `1 / alpha`. Larger alphas keep fewer simplices and carve tighter shapes.
///
/// ```
/// use alpha_shape::Alpha;
///
/// let constant = Alpha::from(2.0);
/// let dynamic = Alpha::per_simplex(|_simplex, radius| if radius < 1.0 { 2.0 } else { 0.0 });
///
/// assert!(constant.accepts(&[0, 1, 2], 0.4));
/// assert!(!constant.accepts(&[0, 1, 2], 0.6));
/// assert!(!dynamic.accepts(&[0, 1, 2], 1.5));
/// ```
#[derive(Clone)]
pub enum Alpha {
    Constant(f64),
    PerSimplex(Arc<AlphaFn>),
}

impl Alpha {
    pub fn per_simplex<F>(f: F) -> Self
    where
        F: Fn(&[VertexIdx], f64) -> f64 + Send + Sync + 'static,
    {
        Self::PerSimplex(Arc::new(f))
    }

    /// The alpha in effect for one simplex.
    pub fn resolve(&self, simplex: &[VertexIdx], circumradius: f64) -> f64 {
        match self {
            Self::Constant(alpha) => *alpha,
            Self::PerSimplex(f) => f(simplex, circumradius),
        }
    }

    /// Radius filter. Non-positive and NaN alphas reject the simplex.
    pub fn accepts(&self, simplex: &[VertexIdx], circumradius: f64) -> bool {
        let alpha = self.resolve(simplex, circumradius);
        alpha > 0.0 && circumradius < 1.0 / alpha
    }

    pub const fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(alpha) => Some(*alpha),
            Self::PerSimplex(_) => None,
        }
    }

    /// A constant alpha of zero or less (or NaN) denotes the convex hull.
    pub fn is_convex_hull(&self) -> bool {
        matches!(self, Self::Constant(alpha) if alpha.is_nan() || *alpha <= 0.0)
    }
}

impl From<f64> for Alpha {
    fn from(alpha: f64) -> Self {
        Self::Constant(alpha)
    }
}

impl fmt::Debug for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(alpha) => f.debug_tuple("Constant").field(alpha).finish(),
            Self::PerSimplex(_) => f.write_str("PerSimplex(..)"),
        }
    }
}
