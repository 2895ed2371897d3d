//! Finite rectangular plane.

use facerig_core::traits::Validate;
use facerig_core::{Result, RigError};
use facerig_math::{DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Surface;

/// A rectangular patch `origin + u * u_axis + v * v_axis` over `[0, 1] x [0, 1]`.
///
/// `u_axis` and `v_axis` are the full edge vectors, so their lengths are the
/// patch's width and height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarSurface {
    pub origin: Point3,
    pub u_axis: Vector3,
    pub v_axis: Vector3,
}

impl PlanarSurface {
    pub fn new(origin: Point3, u_axis: Vector3, v_axis: Vector3) -> Self {
        Self {
            origin,
            u_axis,
            v_axis,
        }
    }

    /// Unit square on the XY plane with its corner at the origin.
    pub fn xy() -> Self {
        Self::new(DVec3::ZERO, DVec3::X, DVec3::Y)
    }

    /// Axis-aligned patch on the XY plane spanning `min..max`.
    pub fn from_xy_bounds(min: (f64, f64), max: (f64, f64)) -> Self {
        Self::new(
            DVec3::new(min.0, min.1, 0.0),
            DVec3::new(max.0 - min.0, 0.0, 0.0),
            DVec3::new(0.0, max.1 - min.1, 0.0),
        )
    }
}

impl Validate for PlanarSurface {
    fn validate(&self) -> Result<()> {
        if !(self.origin.is_finite() && self.u_axis.is_finite() && self.v_axis.is_finite()) {
            return Err(RigError::Geometry(format!(
                "plane has non-finite placement: origin {}, axes {} and {}",
                self.origin, self.u_axis, self.v_axis
            )));
        }
        Ok(())
    }
}

impl Surface for PlanarSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin + u * self.u_axis + v * self.v_axis
    }

    fn derivs_at(&self, u: f64, v: f64) -> (Point3, Vector3, Vector3) {
        (self.point_at(u, v), self.u_axis, self.v_axis)
    }

    fn domain_u(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn domain_v(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}
