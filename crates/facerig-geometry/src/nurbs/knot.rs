//! Knot vector utilities for B-spline evaluation.

/// Find the knot span index for parameter `t` in the knot vector.
///
/// Returns the index `i` such that `knots[i] <= t < knots[i+1]`, clamped to
/// `[degree, n]` so parameters outside the domain land in the first or last
/// span.
///
/// # Arguments
/// * `degree` - Degree of the B-spline
/// * `knots` - The knot vector
/// * `n` - Number of control points minus 1
/// * `t` - Parameter value
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }

    // First knot strictly greater than t, within the active spans
    let active = &knots[degree..=n + 1];
    let upper = active.partition_point(|&k| k <= t);
    degree + upper - 1
}

/// Compute the `degree + 1` non-vanishing basis functions
/// `N_{span-degree,degree}(t) ..= N_{span,degree}(t)`.
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }

        n[j] = saved;
    }

    n
}

/// Compute basis functions and their first derivatives at parameter `t`.
///
/// The derivatives come from the degree-lowering identity
/// `N'_{i,p} = p / (u_{i+p} - u_i) N_{i,p-1} - p / (u_{i+p+1} - u_{i+1}) N_{i+1,p-1}`,
/// with zero-length knot intervals contributing nothing.
pub fn basis_functions_derivs(
    degree: usize,
    knots: &[f64],
    span: usize,
    t: f64,
) -> (Vec<f64>, Vec<f64>) {
    let values = basis_functions(degree, knots, span, t);
    if degree == 0 {
        return (values, vec![0.0]);
    }

    // N_{span-degree+1, degree-1} ..= N_{span, degree-1}
    let lower = basis_functions(degree - 1, knots, span, t);
    let p = degree as f64;

    let derivs = (0..=degree)
        .map(|j| {
            let i = span - degree + j;
            let mut d = 0.0;
            if j >= 1 {
                let denom = knots[i + degree] - knots[i];
                if denom != 0.0 {
                    d += p / denom * lower[j - 1];
                }
            }
            if j < degree {
                let denom = knots[i + degree + 1] - knots[i + 1];
                if denom != 0.0 {
                    d -= p / denom * lower[j];
                }
            }
            d
        })
        .collect();

    (values, derivs)
}

/// Build a clamped (open) knot vector with uniformly spaced interior knots
/// over `[0, 1]` for `count` control points.
///
/// Returns `None` when `count <= degree`, since no clamped curve of that
/// degree exists.
pub fn clamped_uniform_knots(degree: usize, count: usize) -> Option<Vec<f64>> {
    if count <= degree {
        return None;
    }
    let spans = count - degree;
    let mut knots = Vec::with_capacity(count + degree + 1);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    knots.extend((1..spans).map(|i| i as f64 / spans as f64));
    knots.extend(std::iter::repeat(1.0).take(degree + 1));
    Some(knots)
}

/// Whether the knot vector is finite and non-decreasing.
pub fn is_valid_knot_vector(knots: &[f64]) -> bool {
    knots.iter().all(|k| k.is_finite()) && knots.windows(2).all(|w| w[0] <= w[1])
}
