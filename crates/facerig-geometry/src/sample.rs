//! Normalized-parameter access to surfaces and uniform sampling.

use facerig_math::Point3;

use crate::surface::Surface;

/// Map a normalized parameter in `[0, 1]` onto the domain `(min, max)`.
pub fn remap(domain: (f64, f64), t: f64) -> f64 {
    domain.0 + (domain.1 - domain.0) * t
}

/// Evaluate `surface` at normalized parameters, `0` and `1` being the
/// ends of its knot domain in each direction.
pub fn point_at_normalized<S: Surface + ?Sized>(surface: &S, u: f64, v: f64) -> Point3 {
    surface.point_at(remap(surface.domain_u(), u), remap(surface.domain_v(), v))
}

/// One sample of a surface grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSample {
    /// Normalized u in `[0, 1]`
    pub u: f64,
    /// Normalized v in `[0, 1]`
    pub v: f64,
    pub point: Point3,
}

/// Sample a surface on a uniform `(u_divs + 1) x (v_divs + 1)` grid of
/// normalized parameters, row-major in u.
///
/// Zero divisions in a direction sample only its start.
pub fn sample_grid(surface: &dyn Surface, u_divs: usize, v_divs: usize) -> Vec<GridSample> {
    let fraction = |i: usize, divs: usize| if divs == 0 { 0.0 } else { i as f64 / divs as f64 };

    let mut samples = Vec::with_capacity((u_divs + 1) * (v_divs + 1));
    for i in 0..=u_divs {
        let u = fraction(i, u_divs);
        for j in 0..=v_divs {
            let v = fraction(j, v_divs);
            samples.push(GridSample {
                u,
                v,
                point: point_at_normalized(surface, u, v),
            });
        }
    }
    samples
}
