//! Control points to boundary-normalized `(u, v, 0)` space.

use facerig_core::traits::Validate;
use facerig_core::Result;
use facerig_geometry::BSplineCurve;
use facerig_math::{DVec2, DVec3, Point3};
use rayon::prelude::*;

use crate::config::ProjectionConfig;

/// Project every control point of `curve` onto the flattened UV plane
/// described by `config`.
///
/// Point `i` of the result depends only on point `i` of the input. Degree
/// and knots are copied unchanged and Z is always zero. Fails with
/// `RigError::DegenerateRange` when either range has zero length and with
/// `RigError::InvalidCurve` when the curve is malformed; nothing is
/// projected in either case.
pub fn project_to_plane(curve: &BSplineCurve, config: &ProjectionConfig) -> Result<BSplineCurve> {
    CurveProjector::new(*config)?.project(curve)
}

/// A projection whose configuration has already been validated.
///
/// Build one per configuration and reuse it across curves so the ranges are
/// checked once.
#[derive(Debug, Clone, Copy)]
pub struct CurveProjector {
    config: ProjectionConfig,
}

impl CurveProjector {
    pub fn new(config: ProjectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project a single point to `(u, v, 0)`.
    pub fn project_point(&self, point: Point3) -> DVec3 {
        let raw = self.config.plane_axes.uv_source(point);
        self.config.normalize(raw).extend(0.0)
    }

    /// Recover the raw `(u, v)` source coordinates a projected `(u, v)` came from.
    pub fn unproject_point(&self, uv: DVec2) -> DVec2 {
        self.config.denormalize(uv)
    }

    pub fn project(&self, curve: &BSplineCurve) -> Result<BSplineCurve> {
        curve.validate()?;
        log::trace!(
            "projecting {} control points on {:?}",
            curve.point_count(),
            self.config.plane_axes
        );
        let points = curve
            .control_points
            .iter()
            .map(|&p| self.project_point(p))
            .collect();
        Ok(curve.with_control_points(points))
    }

    /// Project a batch of curves in parallel, preserving their order.
    ///
    /// An invalid curve fails the whole batch.
    pub fn project_all(&self, curves: &[BSplineCurve]) -> Result<Vec<BSplineCurve>> {
        log::debug!(
            "projecting {} curves, u {:?}, v {:?}",
            curves.len(),
            self.config.u_range,
            self.config.v_range
        );
        curves.par_iter().map(|curve| self.project(curve)).collect()
    }
}
