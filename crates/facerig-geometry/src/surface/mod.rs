//! Surface traits and implementations.

mod bspline;
mod planar;

use facerig_core::traits::Validate;
use facerig_math::{Point3, Vector3};

pub use bspline::BSplineSurface;
pub use planar::PlanarSurface;

/// Trait for parametric surfaces in 3D space.
///
/// Evaluation assumes `validate` has passed.
pub trait Surface: Validate + Send + Sync {
    /// Evaluate the surface at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Evaluate the point and first partial derivatives `(point, d/du, d/dv)`
    /// at parameters `(u, v)`.
    fn derivs_at(&self, u: f64, v: f64) -> (Point3, Vector3, Vector3);

    /// Return the u-parameter domain `(u_min, u_max)`.
    fn domain_u(&self) -> (f64, f64);

    /// Return the v-parameter domain `(v_min, v_max)`.
    fn domain_v(&self) -> (f64, f64);
}
