//! Exact orientation predicates on top of [robust].

use robust::{orient2d, orient3d, Coord, Coord3D};

use super::types::{Vertex2, Vertex3};

#[inline]
const fn coord2(p: &Vertex2) -> Coord<f64> {
    Coord { x: p[0], y: p[1] }
}

#[inline]
const fn coord3(p: &Vertex3) -> Coord3D<f64> {
    Coord3D {
        x: p[0],
        y: p[1],
        z: p[2],
    }
}

/// Normalize predicate result to sign: -1, 0 or 1.
#[inline]
fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Positive if `c` lies to the left of the directed line `a -> b`, i.e. `a, b, c` wind counter-clockwise.
#[inline]
pub fn orient_2d(a: &Vertex2, b: &Vertex2, c: &Vertex2) -> i8 {
    sign(orient2d(coord2(a), coord2(b), coord2(c)))
}

/// Positive if `d` lies below the plane through `a, b, c`, where "above" is the side from which
/// `a, b, c` appear counter-clockwise.
#[inline]
pub fn orient_3d(a: &Vertex3, b: &Vertex3, c: &Vertex3, d: &Vertex3) -> i8 {
    sign(orient3d(coord3(a), coord3(b), coord3(c), coord3(d)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orient_2d() {
        assert_eq!(orient_2d(&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]), 1);
        assert_eq!(orient_2d(&[0.0, 0.0], &[0.0, 1.0], &[1.0, 0.0]), -1);
        assert_eq!(orient_2d(&[0.0, 0.0], &[1.0, 1.0], &[2.0, 2.0]), 0);
    }

    #[test]
    fn test_orient_3d() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let c = [0.0, 1.0, 0.0];

        assert_eq!(orient_3d(&a, &b, &c, &[0.0, 0.0, -1.0]), 1);
        assert_eq!(orient_3d(&a, &b, &c, &[0.0, 0.0, 1.0]), -1);
        assert_eq!(orient_3d(&a, &b, &c, &[0.3, 0.3, 0.0]), 0);
    }
}
