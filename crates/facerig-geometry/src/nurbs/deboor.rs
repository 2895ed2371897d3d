//! De Boor evaluation of non-rational B-spline surfaces.

use facerig_math::{DVec3, Point3, Vector3};

use super::knot::{basis_functions_derivs, find_span};

/// Sum of control points scaled by their basis values.
fn weighted_sum(basis: &[f64], control_points: &[Point3]) -> DVec3 {
    basis
        .iter()
        .zip(control_points)
        .fold(DVec3::ZERO, |acc, (&b, &p)| acc + b * p)
}

/// Degree and knots for one parametric direction of a surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceAxis<'a> {
    pub degree: usize,
    pub knots: &'a [f64],
}

impl SurfaceAxis<'_> {
    /// Span index plus basis values and first derivatives at `t`,
    /// for a direction with `count` control points.
    fn eval(&self, count: usize, t: f64) -> (usize, Vec<f64>, Vec<f64>) {
        let span = find_span(self.degree, self.knots, count - 1, t);
        let (basis, dbasis) = basis_functions_derivs(self.degree, self.knots, span, t);
        (span - self.degree, basis, dbasis)
    }
}

/// Evaluate a B-spline surface point and its partial derivatives at `(u, v)`.
///
/// `control_points[i][j]` is row `i` along u and column `j` along v. Returns
/// `(point, d/du, d/dv)`.
pub fn surface_point_derivs(
    u_axis: SurfaceAxis<'_>,
    v_axis: SurfaceAxis<'_>,
    control_points: &[Vec<Point3>],
    u: f64,
    v: f64,
) -> (Point3, Vector3, Vector3) {
    let (u_first, bu, dbu) = u_axis.eval(control_points.len(), u);
    let (v_first, bv, dbv) = v_axis.eval(control_points[0].len(), v);

    let mut point = DVec3::ZERO;
    let mut du = DVec3::ZERO;
    let mut dv = DVec3::ZERO;

    for (i, row) in control_points[u_first..=u_first + u_axis.degree].iter().enumerate() {
        let cols = &row[v_first..=v_first + v_axis.degree];
        point += bu[i] * weighted_sum(&bv, cols);
        du += dbu[i] * weighted_sum(&bv, cols);
        dv += bu[i] * weighted_sum(&dbv, cols);
    }

    (point, du, dv)
}

/// Evaluate a B-spline surface point at `(u, v)`.
pub fn surface_point(
    u_axis: SurfaceAxis<'_>,
    v_axis: SurfaceAxis<'_>,
    control_points: &[Vec<Point3>],
    u: f64,
    v: f64,
) -> Point3 {
    let (u_first, bu, _) = u_axis.eval(control_points.len(), u);
    let (v_first, bv, _) = v_axis.eval(control_points[0].len(), v);

    control_points[u_first..=u_first + u_axis.degree]
        .iter()
        .zip(&bu)
        .fold(DVec3::ZERO, |acc, (row, &b)| {
            acc + b * weighted_sum(&bv, &row[v_first..=v_first + v_axis.degree])
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn bilinear_grid() -> Vec<Vec<Point3>> {
        vec![
            vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)],
            vec![DVec3::new(0.0, 1.0, 0.0), DVec3::new(1.0, 1.0, 0.0)],
        ]
    }

    const LINEAR: SurfaceAxis<'static> = SurfaceAxis {
        degree: 1,
        knots: &[0.0, 0.0, 1.0, 1.0],
    };

    #[test]
    fn test_surface_point_bilinear() {
        let p = surface_point(LINEAR, LINEAR, &bilinear_grid(), 0.5, 0.5);
        assert_abs_diff_eq!(p.x, 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(p.y, 0.5, epsilon = 1e-10);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_surface_derivs_bilinear() {
        let (p, du, dv) = surface_point_derivs(LINEAR, LINEAR, &bilinear_grid(), 0.3, 0.7);
        // Rows run along y, columns along x
        assert_abs_diff_eq!(p.x, 0.7, epsilon = 1e-10);
        assert_abs_diff_eq!(p.y, 0.3, epsilon = 1e-10);
        assert_abs_diff_eq!((du - DVec3::Y).length(), 0.0, epsilon = 1e-10);
        assert_abs_diff_eq!((dv - DVec3::X).length(), 0.0, epsilon = 1e-10);
    }
}
