use std::fmt;

use crate::utils::types::{Facet, Simplex};

/// A recoverable condition met while computing a shape.
///
/// Diagnostics never abort a computation, they are handed back next to the geometry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// The simplex has no unique circumsphere and was skipped.
    DegenerateSimplex { simplex: Simplex },
    /// The facet was shared by more than two accepted simplices, which a valid triangulation never produces.
    DataQualityViolation { facet: Facet },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateSimplex { simplex } => {
                write!(f, "skipped degenerate simplex {simplex:?}")
            }
            Self::DataQualityViolation { facet } => {
                write!(f, "facet {facet:?} is shared by more than two accepted simplices")
            }
        }
    }
}
