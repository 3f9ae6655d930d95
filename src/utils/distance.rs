//! Euclidean distances to points, segments and triangles in any dimension.

/// `(b - a) . (d - c)`
fn dot_diff(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> f64 {
    (0..a.len())
        .map(|i| (b[i] - a[i]) * (d[i] - c[i]))
        .sum()
}

pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    dot_diff(a, b, a, b).sqrt()
}

/// Distance from `p` to `a + v * (b - a) + w * (c - a)`.
fn distance_to_param(p: &[f64], a: &[f64], b: &[f64], c: &[f64], v: f64, w: f64) -> f64 {
    (0..p.len())
        .map(|i| {
            let q = a[i] + v * (b[i] - a[i]) + w * (c[i] - a[i]);
            (p[i] - q) * (p[i] - q)
        })
        .sum::<f64>()
        .sqrt()
}

pub fn distance_to_segment(p: &[f64], a: &[f64], b: &[f64]) -> f64 {
    let length_squared = dot_diff(a, b, a, b);
    if length_squared == 0.0 {
        return distance(p, a);
    }
    let t = (dot_diff(a, b, a, p) / length_squared).clamp(0.0, 1.0);
    distance_to_param(p, a, b, b, t, 0.0)
}

/// Distance from `p` to the triangle `a, b, c`, by Voronoi region of the triangle's features
/// (Ericson, Real-Time Collision Detection, 5.1.5).
pub fn distance_to_triangle(p: &[f64], a: &[f64], b: &[f64], c: &[f64]) -> f64 {
    let d1 = dot_diff(a, b, a, p);
    let d2 = dot_diff(a, c, a, p);
    if d1 <= 0.0 && d2 <= 0.0 {
        return distance(p, a);
    }

    let d3 = dot_diff(a, b, b, p);
    let d4 = dot_diff(a, c, b, p);
    if d3 >= 0.0 && d4 <= d3 {
        return distance(p, b);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return distance_to_param(p, a, b, c, d1 / (d1 - d3), 0.0);
    }

    let d5 = dot_diff(a, b, c, p);
    let d6 = dot_diff(a, c, c, p);
    if d6 >= 0.0 && d5 <= d6 {
        return distance(p, c);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return distance_to_param(p, a, b, c, 0.0, d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let t = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return distance_to_param(p, a, b, c, 1.0 - t, t);
    }

    let denominator = va + vb + vc;
    if denominator == 0.0 {
        // collapsed triangle
        return distance_to_segment(p, a, b)
            .min(distance_to_segment(p, b, c))
            .min(distance_to_segment(p, a, c));
    }
    distance_to_param(p, a, b, c, vb / denominator, vc / denominator)
}
