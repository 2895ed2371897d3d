//! Flattened curves back onto surfaces, and closest-point projection.

use facerig_core::traits::Validate;
use facerig_core::{Result, Tolerance};
use facerig_geometry::sample::{self, remap};
use facerig_geometry::{BSplineCurve, Surface};
use facerig_math::{DVec3, Point3};

/// Grid resolution, per direction, for seeding closest-point refinement.
pub const SAMPLE_DIVISIONS: usize = 16;

/// Refinement steps before giving up on convergence.
const MAX_ITERATIONS: usize = 32;

/// Anything that maps normalized `(u, v)` in `[0, 1]` to a position.
pub trait SurfaceEvaluator {
    fn evaluate_at(&self, u: f64, v: f64) -> Point3;

    /// Fail if the evaluator cannot be evaluated. Called once before any
    /// point is mapped.
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

/// Every parametric surface evaluates with `[0, 1]` stretched over its
/// knot domain.
impl<S: Surface + ?Sized> SurfaceEvaluator for S {
    fn evaluate_at(&self, u: f64, v: f64) -> Point3 {
        sample::point_at_normalized(self, u, v)
    }

    fn check(&self) -> Result<()> {
        self.validate()
    }
}

/// Map a flattened curve onto `surface`: each control point's `x` and `y`
/// are read as `(u, v)` and replaced by the surface position there.
///
/// Z of the input points is ignored; degree and knots are kept.
pub fn project_to_surface<E>(curve: &BSplineCurve, surface: &E) -> Result<BSplineCurve>
where
    E: SurfaceEvaluator + ?Sized,
{
    curve.validate()?;
    surface.check()?;
    let points = curve
        .control_points
        .iter()
        .map(|p| surface.evaluate_at(p.x, p.y))
        .collect();
    Ok(curve.with_control_points(points))
}

/// Result of a closest-point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Normalized u in `[0, 1]`
    pub u: f64,
    /// Normalized v in `[0, 1]`
    pub v: f64,
    pub point: Point3,
    pub distance: f64,
}

fn normalize_in(domain: (f64, f64), t: f64) -> f64 {
    let width = domain.1 - domain.0;
    if width == 0.0 {
        0.0
    } else {
        (t - domain.0) / width
    }
}

/// Find the point of `surface` nearest to `point`.
///
/// The nearest sample of a uniform grid seeds a Gauss-Newton refinement of
/// the squared distance, clamped to the surface domain. Refinement stops
/// once the point lies within `tolerance.linear` of the surface or a step
/// moves less than `tolerance.parametric`; otherwise the better of the
/// refined and seed positions is returned.
///
/// Fails with the surface's validation error before any evaluation.
pub fn closest_parameter(
    surface: &dyn Surface,
    point: Point3,
    tolerance: Tolerance,
) -> Result<SurfaceHit> {
    surface.validate()?;
    Ok(closest_on(surface, point, tolerance))
}

/// Closest-point search on a surface that has already been validated.
fn closest_on(surface: &dyn Surface, point: Point3, tolerance: Tolerance) -> SurfaceHit {
    let (u_dom, v_dom) = (surface.domain_u(), surface.domain_v());

    let seed = sample::sample_grid(surface, SAMPLE_DIVISIONS, SAMPLE_DIVISIONS)
        .into_iter()
        .min_by(|a, b| {
            a.point
                .distance_squared(point)
                .total_cmp(&b.point.distance_squared(point))
        })
        .map(|s| (s.u, s.v))
        .unwrap_or((0.0, 0.0));

    let mut u = remap(u_dom, seed.0);
    let mut v = remap(v_dom, seed.1);
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let (p, su, sv) = surface.derivs_at(u, v);
        let r = p - point;
        if tolerance.is_zero(r.length()) {
            converged = true;
            break;
        }

        // Normal equations of the linearized residual
        let a = su.dot(su);
        let b = su.dot(sv);
        let c = sv.dot(sv);
        let det = a * c - b * b;
        if det.abs() < 1e-15 {
            break;
        }
        let gu = r.dot(su);
        let gv = r.dot(sv);
        let du = (-c * gu + b * gv) / det;
        let dv = (b * gu - a * gv) / det;

        let next_u = (u + du).clamp(u_dom.0.min(u_dom.1), u_dom.0.max(u_dom.1));
        let next_v = (v + dv).clamp(v_dom.0.min(v_dom.1), v_dom.0.max(v_dom.1));
        let step_u = normalize_in(u_dom, next_u) - normalize_in(u_dom, u);
        let step_v = normalize_in(v_dom, next_v) - normalize_in(v_dom, v);
        u = next_u;
        v = next_v;

        if tolerance.param_converged(step_u, step_v) {
            converged = true;
            break;
        }
    }

    let refined = surface.point_at(u, v);
    let seed_point = surface.point_at(remap(u_dom, seed.0), remap(v_dom, seed.1));

    if !converged {
        log::warn!(
            "closest point refinement did not converge for {:?}; comparing against grid seed",
            point
        );
        if seed_point.distance_squared(point) < refined.distance_squared(point) {
            return SurfaceHit {
                u: seed.0,
                v: seed.1,
                point: seed_point,
                distance: seed_point.distance(point),
            };
        }
    }

    SurfaceHit {
        u: normalize_in(u_dom, u),
        v: normalize_in(v_dom, v),
        point: refined,
        distance: refined.distance(point),
    }
}

/// Replace each control point with the nearest point on `surface`.
pub fn project_onto_surface(curve: &BSplineCurve, surface: &dyn Surface) -> Result<BSplineCurve> {
    map_closest(curve, surface, |hit| hit.point)
}

/// Replace each control point with the normalized `(u, v, 0)` of the
/// nearest point on `surface`.
pub fn project_to_uv(curve: &BSplineCurve, surface: &dyn Surface) -> Result<BSplineCurve> {
    map_closest(curve, surface, |hit| DVec3::new(hit.u, hit.v, 0.0))
}

fn map_closest(
    curve: &BSplineCurve,
    surface: &dyn Surface,
    emit: impl Fn(SurfaceHit) -> Point3,
) -> Result<BSplineCurve> {
    curve.validate()?;
    surface.validate()?;
    let tolerance = Tolerance::default();
    let points = curve
        .control_points
        .iter()
        .map(|&p| emit(closest_on(surface, p, tolerance)))
        .collect();
    Ok(curve.with_control_points(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use facerig_core::RigError;
    use facerig_geometry::{BSplineSurface, PlanarSurface};

    fn dome() -> BSplineSurface {
        let grid = (0..3)
            .map(|i| {
                (0..3)
                    .map(|j| {
                        let z = if i == 1 && j == 1 { 2.0 } else { 0.0 };
                        DVec3::new(j as f64, i as f64, z)
                    })
                    .collect()
            })
            .collect();
        BSplineSurface::clamped(2, 2, grid).unwrap()
    }

    #[test]
    fn test_evaluate_at_remaps_domain() {
        let plane = PlanarSurface::from_xy_bounds((-8.0, -3.0), (8.0, 3.0));
        let p = plane.evaluate_at(0.0625, 0.5);
        assert_abs_diff_eq!(p.x, -7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_project_to_surface_keeps_structure() {
        let curve = BSplineCurve::clamped(
            2,
            vec![
                DVec3::new(0.0, 0.5, 9.0),
                DVec3::new(0.5, 0.5, 9.0),
                DVec3::new(1.0, 0.5, 9.0),
            ],
        )
        .unwrap();
        let wrapped = project_to_surface(&curve, &dome()).unwrap();
        assert_eq!(wrapped.degree, curve.degree);
        assert_eq!(wrapped.knots, curve.knots);
        // Middle of the dome; Z comes from the surface, not the input
        let mid = wrapped.control_points[1];
        assert_abs_diff_eq!(mid.x, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(mid.y, 1.0, epsilon = 1e-10);
        assert_abs_diff_eq!(mid.z, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_project_to_surface_with_custom_evaluator() {
        struct Cylinder;
        impl SurfaceEvaluator for Cylinder {
            fn evaluate_at(&self, u: f64, v: f64) -> Point3 {
                let angle = u * std::f64::consts::TAU;
                DVec3::new(angle.cos(), v, angle.sin())
            }
        }

        let curve = BSplineCurve::clamped(
            1,
            vec![DVec3::new(0.0, 0.2, 0.0), DVec3::new(0.25, 0.4, 0.0)],
        )
        .unwrap();
        let wrapped = project_to_surface(&curve, &Cylinder).unwrap();
        let expected = [DVec3::new(1.0, 0.2, 0.0), DVec3::new(0.0, 0.4, 1.0)];
        for (p, e) in wrapped.control_points.iter().zip(expected) {
            assert_abs_diff_eq!((*p - e).length(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_project_to_surface_rejects_invalid_curve() {
        let curve = BSplineCurve::new(1, vec![0.0, 1.0], vec![]);
        let err = project_to_surface(&curve, &PlanarSurface::xy()).unwrap_err();
        assert!(matches!(err, RigError::InvalidCurve(_)));
    }

    #[test]
    fn test_rejects_empty_surface_grid() {
        let json = r#"{"degree_u":1,"degree_v":1,"knots_u":[],"knots_v":[],"control_points":[]}"#;
        let empty: BSplineSurface = serde_json::from_str(json).unwrap();
        let curve = BSplineCurve::clamped(1, vec![DVec3::ZERO, DVec3::ONE]).unwrap();

        for result in [
            project_to_surface(&curve, &empty),
            project_onto_surface(&curve, &empty),
            project_to_uv(&curve, &empty),
        ] {
            assert!(matches!(result, Err(RigError::Geometry(_))));
        }
        assert!(matches!(
            closest_parameter(&empty, DVec3::ZERO, Tolerance::default()),
            Err(RigError::Geometry(_))
        ));
    }

    #[test]
    fn test_closest_on_plane() {
        let plane = PlanarSurface::from_xy_bounds((0.0, 0.0), (4.0, 2.0));
        let tol = Tolerance::default();
        let hit = closest_parameter(&plane, DVec3::new(1.0, 0.5, 3.0), tol).unwrap();
        assert_abs_diff_eq!(hit.u, 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.v, 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.distance, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_closest_clamps_to_boundary() {
        let plane = PlanarSurface::xy();
        let tol = Tolerance::default();
        let hit = closest_parameter(&plane, DVec3::new(5.0, 0.5, 0.0), tol).unwrap();
        assert_abs_diff_eq!(hit.u, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.v, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.distance, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_closest_on_dome_recovers_surface_point() {
        let surf = dome();
        let target = surf.point_at(0.3, 0.6);
        let hit = closest_parameter(&surf, target, Tolerance::default()).unwrap();
        assert_abs_diff_eq!(hit.distance, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(hit.u, 0.3, epsilon = 1e-5);
        assert_abs_diff_eq!(hit.v, 0.6, epsilon = 1e-5);
    }

    #[test]
    fn test_project_to_uv_and_back() {
        let plane = PlanarSurface::from_xy_bounds((-8.0, -3.0), (8.0, 3.0));
        let curve = BSplineCurve::clamped(
            1,
            vec![DVec3::new(-7.0, -1.0, 2.0), DVec3::new(4.0, 1.5, -1.0)],
        )
        .unwrap();

        let uv = project_to_uv(&curve, &plane).unwrap();
        assert_abs_diff_eq!(uv.control_points[0].x, 0.0625, epsilon = 1e-9);
        assert_abs_diff_eq!(uv.control_points[0].y, 1.0 / 3.0, epsilon = 1e-9);
        assert_eq!(uv.control_points[1].z, 0.0);

        let back = project_to_surface(&uv, &plane).unwrap();
        let onto = project_onto_surface(&curve, &plane).unwrap();
        for (a, b) in back.control_points.iter().zip(&onto.control_points) {
            assert_abs_diff_eq!((*a - *b).length(), 0.0, epsilon = 1e-8);
        }
        assert_abs_diff_eq!(onto.control_points[0].z, 0.0, epsilon = 1e-12);
    }
}
