use crate::{
    config::{ExhaustionPolicy, OptimizeOptions},
    error::Result,
    shape::AlphaShape,
};

/// How an optimization ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizationStatus {
    /// The search interval collapsed.
    Converged,
    /// The shape is already valid at the upper bound.
    BoundsError,
    /// The iteration budget ran out, the alpha follows the [`ExhaustionPolicy`].
    MaxIterationsExceeded,
    /// Every alpha yields the convex hull, see [`AlphaShape::is_trivial`].
    Trivial,
    /// No validity check exists beyond three dimensions.
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Optimization {
    pub alpha: f64,
    /// Number of bisection trials.
    pub iterations: usize,
    pub status: OptimizationStatus,
}

impl Optimization {
    const fn hull(iterations: usize, status: OptimizationStatus) -> Self {
        Self {
            alpha: 0.0,
            iterations,
            status,
        }
    }
}

/// Bisection for the largest alpha whose shape is still valid.
///
/// A shape is valid when it is a single polygon, or a single closed mesh, holding every input
/// point. Small alphas give the convex hull, which is always valid, large alphas drop simplices
/// until the shape breaks apart. The search keeps a valid `lower` and an invalid `upper` bound and
/// halves the interval between them until it cannot shrink anymore.
pub struct AlphaOptimizer<'a> {
    shape: &'a AlphaShape,
    options: OptimizeOptions,
}

impl<'a> AlphaOptimizer<'a> {
    pub const fn new(shape: &'a AlphaShape, options: OptimizeOptions) -> Self {
        Self { shape, options }
    }

    pub fn run(&self) -> Result<Optimization> {
        self.options.validate()?;

        if self.shape.is_trivial() {
            return Ok(Optimization::hull(0, OptimizationStatus::Trivial));
        }
        if self.shape.dim() > 3 {
            self.warn(format_args!(
                "Cannot optimize alpha in {} dimensions, falling back to the convex hull",
                self.shape.dim()
            ));
            return Ok(Optimization::hull(0, OptimizationStatus::Unsupported));
        }

        let now = std::time::Instant::now();

        let OptimizeOptions {
            mut lower,
            mut upper,
            max_iterations,
            ..
        } = self.options;

        if self.shape.is_valid_at(upper)? {
            self.warn(format_args!(
                "Upper bound {upper} does not bound the solution, falling back to the convex hull"
            ));
            return Ok(Optimization::hull(0, OptimizationStatus::BoundsError));
        }

        let mut iterations = 0;
        while upper - lower > 2.0 * f64::EPSILON {
            let mid = lower + (upper - lower) / 2.0;
            if mid <= lower || mid >= upper {
                break;
            }

            if self.shape.is_valid_at(mid)? {
                lower = mid;
            } else {
                upper = mid;
            }
            iterations += 1;
            log::debug!("Iteration {iterations}: alpha in [{lower}, {upper}]");

            if iterations > max_iterations {
                let alpha = match self.options.on_exhausted {
                    ExhaustionPolicy::BestLowerBound => lower,
                    ExhaustionPolicy::ConvexHull => 0.0,
                };
                self.warn(format_args!(
                    "Maximum of {max_iterations} iterations exceeded, returning alpha {alpha}"
                ));
                return Ok(Optimization {
                    alpha,
                    iterations,
                    status: OptimizationStatus::MaxIterationsExceeded,
                });
            }
        }

        log::trace!(
            "Optimized alpha {lower} in {iterations} iterations and {:.4} µs",
            now.elapsed().as_micros()
        );

        Ok(Optimization {
            alpha: lower,
            iterations,
            status: OptimizationStatus::Converged,
        })
    }

    fn warn(&self, message: std::fmt::Arguments<'_>) {
        if !self.options.silent {
            log::warn!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alpha::Alpha,
        config::AlphaShapeConfig,
        error::AlphaShapeError,
        geometry::Geometry,
        test_utils::{cube_with_inner_points, diamond_in_square, init_logger, sample_normal_vertices_2d, tesseract_kuhn},
        triangulator::PrecomputedTriangulation,
    };
    use approx::assert_relative_eq;

    const NUM_VERTICES_LIST: [usize; 4] = [10, 50, 100, 200];

    fn optimize(shape: &AlphaShape, options: OptimizeOptions) -> Optimization {
        AlphaOptimizer::new(shape, options).run().unwrap()
    }

    #[test]
    fn test_diamond_in_square() {
        init_logger();
        let shape = AlphaShape::new(&diamond_in_square()).unwrap();
        let optimization = optimize(&shape, OptimizeOptions::default());

        assert_eq!(optimization.status, OptimizationStatus::Converged);
        assert!(3.0 < optimization.alpha && optimization.alpha < 3.5);
        assert!(optimization.iterations > 1000);
    }

    #[test]
    fn test_scale_invariance() {
        let scaled: Vec<[f64; 2]> = diamond_in_square()
            .iter()
            .map(|[x, y]| [2.0 * x, 2.0 * y])
            .collect();

        let alpha = optimize(&AlphaShape::new(&diamond_in_square()).unwrap(), OptimizeOptions::default()).alpha;
        let scaled_alpha = optimize(&AlphaShape::new(&scaled).unwrap(), OptimizeOptions::default()).alpha;

        assert_relative_eq!(scaled_alpha, alpha / 2.0, max_relative = 1e-9);
    }

    #[test]
    fn test_max_iterations_exceeded() {
        init_logger();
        let shape = AlphaShape::new(&diamond_in_square()).unwrap();

        for on_exhausted in [ExhaustionPolicy::BestLowerBound, ExhaustionPolicy::ConvexHull] {
            // every trial on the wide interval fails, lower never moves
            let wide = optimize(
                &shape,
                OptimizeOptions {
                    max_iterations: 2,
                    on_exhausted,
                    ..Default::default()
                },
            );
            assert_eq!(wide.alpha, 0.0);
            assert_eq!(wide.iterations, 3);
            assert_eq!(wide.status, OptimizationStatus::MaxIterationsExceeded);

            // trials at 5, 2.5 and 3.75
            let narrow = optimize(
                &shape,
                OptimizeOptions {
                    max_iterations: 2,
                    upper: 10.0,
                    on_exhausted,
                    silent: true,
                    ..Default::default()
                },
            );
            let expected = match on_exhausted {
                ExhaustionPolicy::BestLowerBound => 2.5,
                ExhaustionPolicy::ConvexHull => 0.0,
            };
            assert_eq!(narrow.alpha, expected);
            assert_eq!(narrow.status, OptimizationStatus::MaxIterationsExceeded);
        }
    }

    #[test]
    fn test_bounds_error() {
        let shape = AlphaShape::new(&diamond_in_square()).unwrap();
        let optimization = optimize(
            &shape,
            OptimizeOptions {
                upper: 1.0,
                ..Default::default()
            },
        );

        assert_eq!(optimization, Optimization::hull(0, OptimizationStatus::BoundsError));
    }

    #[test]
    fn test_invalid_parameters() {
        let shape = AlphaShape::new(&diamond_in_square()).unwrap();

        for options in [
            OptimizeOptions {
                lower: -1.0,
                ..Default::default()
            },
            OptimizeOptions {
                upper: f64::INFINITY,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                AlphaOptimizer::new(&shape, options).run(),
                Err(AlphaShapeError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_trivial_and_unsupported() {
        let trivial = AlphaShape::new(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert_eq!(
            optimize(&trivial, OptimizeOptions::default()),
            Optimization::hull(0, OptimizationStatus::Trivial)
        );

        let doubled = AlphaShape::new(&[[0.0, 0.0], [0.0, 0.0], [1.0, 1.0], [1.0, 1.0]]).unwrap();
        assert_eq!(
            optimize(&doubled, OptimizeOptions::default()),
            Optimization::hull(0, OptimizationStatus::Trivial)
        );

        let (vertices, simplices) = tesseract_kuhn();
        let config = AlphaShapeConfig::default().with_triangulator(PrecomputedTriangulation::new(simplices));
        let tesseract = AlphaShape::with_config(&vertices, config).unwrap();
        assert_eq!(
            optimize(&tesseract, OptimizeOptions::default()),
            Optimization::hull(0, OptimizationStatus::Unsupported)
        );
    }

    #[test]
    fn test_cube_with_inner_points() {
        init_logger();
        let (vertices, simplices) = cube_with_inner_points();
        let config = AlphaShapeConfig::default().with_triangulator(PrecomputedTriangulation::new(simplices));
        let shape = AlphaShape::with_config(&vertices, config).unwrap();

        let optimization = optimize(&shape, OptimizeOptions::default());

        assert_eq!(optimization.status, OptimizationStatus::Converged);
        // the corner tetrahedra are the largest simplices the shape can afford to lose
        assert_relative_eq!(optimization.alpha, 1.0 / (0.225 * 3f64.sqrt()), max_relative = 1e-9);
    }

    #[test]
    fn test_round_trip() {
        for (n, parallel) in NUM_VERTICES_LIST.iter().zip([false, true, false, true]) {
            let vertices = sample_normal_vertices_2d(*n);
            let shape = AlphaShape::with_config(&vertices, AlphaShapeConfig::default().parallel(parallel)).unwrap();

            let optimization = optimize(&shape, OptimizeOptions::default());
            assert_eq!(optimization.status, OptimizationStatus::Converged);

            let result = shape.with_alpha(&Alpha::from(optimization.alpha)).unwrap();
            let Geometry::Polygon(polygons) = &result.geometry else {
                panic!("expected a polygon");
            };
            assert_eq!(polygons.0.len(), 1);
            for idx in 0..shape.points().len() {
                assert!(result.geometry.contains_point(&shape.points().coords(idx), 0.0));
            }
        }
    }
}
