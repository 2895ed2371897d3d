//! Non-rational B-spline surfaces.

use facerig_core::traits::Validate;
use facerig_core::{Result, RigError};
use facerig_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Surface;
use crate::nurbs::deboor::{self, SurfaceAxis};
use crate::nurbs::knot;

/// A B-spline surface defined by degrees, knot vectors, and a 2D grid of
/// control points.
///
/// `control_points[i][j]` is the control point at row `i` (u-direction) and
/// column `j` (v-direction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BSplineSurface {
    pub degree_u: usize,
    pub degree_v: usize,
    pub knots_u: Vec<f64>,
    pub knots_v: Vec<f64>,
    pub control_points: Vec<Vec<Point3>>,
}

impl BSplineSurface {
    pub fn try_new(
        degree_u: usize,
        degree_v: usize,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        control_points: Vec<Vec<Point3>>,
    ) -> Result<Self> {
        let surface = Self {
            degree_u,
            degree_v,
            knots_u,
            knots_v,
            control_points,
        };
        surface.validate()?;
        Ok(surface)
    }

    /// A clamped surface over `[0, 1] x [0, 1]` with uniform interior knots.
    pub fn clamped(
        degree_u: usize,
        degree_v: usize,
        control_points: Vec<Vec<Point3>>,
    ) -> Result<Self> {
        let rows = control_points.len();
        let cols = control_points.first().map_or(0, Vec::len);
        let knots_u = knot::clamped_uniform_knots(degree_u, rows).ok_or_else(|| {
            RigError::Geometry(format!("{} rows too few for degree {}", rows, degree_u))
        })?;
        let knots_v = knot::clamped_uniform_knots(degree_v, cols).ok_or_else(|| {
            RigError::Geometry(format!("{} columns too few for degree {}", cols, degree_v))
        })?;
        Self::try_new(degree_u, degree_v, knots_u, knots_v, control_points)
    }

    fn u_axis(&self) -> SurfaceAxis<'_> {
        SurfaceAxis {
            degree: self.degree_u,
            knots: &self.knots_u,
        }
    }

    fn v_axis(&self) -> SurfaceAxis<'_> {
        SurfaceAxis {
            degree: self.degree_v,
            knots: &self.knots_v,
        }
    }
}

impl Validate for BSplineSurface {
    fn validate(&self) -> Result<()> {
        let rows = self.control_points.len();
        let cols = self.control_points.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(RigError::Geometry("surface has no control points".into()));
        }
        if self.control_points.iter().any(|row| row.len() != cols) {
            return Err(RigError::Geometry("control point rows differ in length".into()));
        }
        let too_few_u = self.degree_u == 0 || rows <= self.degree_u;
        let too_few_v = self.degree_v == 0 || cols <= self.degree_v;
        if too_few_u || too_few_v {
            return Err(RigError::Geometry(format!(
                "{}x{} control grid cannot carry degrees ({}, {})",
                rows, cols, self.degree_u, self.degree_v
            )));
        }
        if self.knots_u.len() != rows + self.degree_u + 1 {
            return Err(RigError::Geometry(format!(
                "knots_u length mismatch: {} != {} + {} + 1",
                self.knots_u.len(),
                rows,
                self.degree_u
            )));
        }
        if self.knots_v.len() != cols + self.degree_v + 1 {
            return Err(RigError::Geometry(format!(
                "knots_v length mismatch: {} != {} + {} + 1",
                self.knots_v.len(),
                cols,
                self.degree_v
            )));
        }
        let knots_ok =
            knot::is_valid_knot_vector(&self.knots_u) && knot::is_valid_knot_vector(&self.knots_v);
        if !knots_ok {
            return Err(RigError::Geometry("knots must be finite and non-decreasing".into()));
        }
        Ok(())
    }
}

impl Surface for BSplineSurface {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        deboor::surface_point(self.u_axis(), self.v_axis(), &self.control_points, u, v)
    }

    fn derivs_at(&self, u: f64, v: f64) -> (Point3, Vector3, Vector3) {
        deboor::surface_point_derivs(self.u_axis(), self.v_axis(), &self.control_points, u, v)
    }

    fn domain_u(&self) -> (f64, f64) {
        let p = self.degree_u;
        (self.knots_u[p], self.knots_u[self.knots_u.len() - p - 1])
    }

    fn domain_v(&self) -> (f64, f64) {
        let p = self.degree_v;
        (self.knots_v[p], self.knots_v[self.knots_v.len() - p - 1])
    }
}
