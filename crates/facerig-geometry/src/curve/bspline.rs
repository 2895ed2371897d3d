//! Open, non-rational B-spline curves.

use facerig_core::traits::Validate;
use facerig_core::{Result, RigError};
use facerig_math::Point3;
use serde::{Deserialize, Serialize};

use crate::nurbs::knot;

/// A B-spline curve defined by degree, knot vector, and control points.
///
/// This is the curve model the projectors consume and produce: an open,
/// non-rational curve whose knot vector has `control_points.len() + degree + 1`
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BSplineCurve {
    pub degree: usize,
    pub knots: Vec<f64>,
    pub control_points: Vec<Point3>,
}

impl BSplineCurve {
    /// Construct without checking invariants. See [`BSplineCurve::try_new`].
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<Point3>) -> Self {
        Self {
            degree,
            knots,
            control_points,
        }
    }

    /// Construct and validate.
    pub fn try_new(degree: usize, knots: Vec<f64>, control_points: Vec<Point3>) -> Result<Self> {
        let curve = Self::new(degree, knots, control_points);
        curve.validate()?;
        Ok(curve)
    }

    /// A clamped curve over `[0, 1]` with uniformly spaced interior knots.
    pub fn clamped(degree: usize, control_points: Vec<Point3>) -> Result<Self> {
        let knots = knot::clamped_uniform_knots(degree, control_points.len()).ok_or_else(|| {
            RigError::InvalidCurve(format!(
                "degree {} needs at least {} control points, got {}",
                degree,
                degree + 1,
                control_points.len()
            ))
        })?;
        Self::try_new(degree, knots, control_points)
    }

    /// A new curve sharing this curve's degree and knots with different
    /// control points.
    ///
    /// The point count must match; callers that map points one-to-one
    /// always satisfy this.
    pub fn with_control_points(&self, control_points: Vec<Point3>) -> Self {
        debug_assert_eq!(control_points.len(), self.control_points.len());
        Self {
            degree: self.degree,
            knots: self.knots.clone(),
            control_points,
        }
    }

    pub fn point_count(&self) -> usize {
        self.control_points.len()
    }
}

impl Validate for BSplineCurve {
    fn validate(&self) -> Result<()> {
        let count = self.control_points.len();
        if count == 0 {
            return Err(RigError::InvalidCurve("curve has no control points".into()));
        }
        if self.degree == 0 {
            return Err(RigError::InvalidCurve("degree must be at least 1".into()));
        }
        if count <= self.degree {
            return Err(RigError::InvalidCurve(format!(
                "degree {} needs at least {} control points, got {}",
                self.degree,
                self.degree + 1,
                count
            )));
        }
        if self.knots.len() != count + self.degree + 1 {
            return Err(RigError::InvalidCurve(format!(
                "expected {} knots for {} control points of degree {}, got {}",
                count + self.degree + 1,
                count,
                self.degree,
                self.knots.len()
            )));
        }
        if !knot::is_valid_knot_vector(&self.knots) {
            return Err(RigError::InvalidCurve(
                "knots must be finite and non-decreasing".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facerig_math::DVec3;

    fn quadratic() -> BSplineCurve {
        BSplineCurve::try_new(
            2,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(0.5, 1.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_validate_accepts_uneven_knots() {
        let curve = BSplineCurve::new(
            2,
            vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0],
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::ONE],
        );
        assert!(curve.validate().is_ok());
    }

    #[test]
    fn test_clamped_constructor() {
        let curve =
            BSplineCurve::clamped(3, vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::ONE])
                .unwrap();
        assert_eq!(curve.knots, vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(curve.point_count(), 5);
    }

    #[test]
    fn test_clamped_needs_enough_points() {
        let err = BSplineCurve::clamped(3, vec![DVec3::ZERO, DVec3::X]).unwrap_err();
        assert!(matches!(err, RigError::InvalidCurve(_)));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let curve = BSplineCurve::new(1, vec![0.0, 1.0], vec![]);
        assert!(matches!(curve.validate(), Err(RigError::InvalidCurve(_))));
    }

    #[test]
    fn test_validate_rejects_zero_degree() {
        let curve = BSplineCurve::new(0, vec![0.0, 1.0], vec![DVec3::ZERO]);
        assert!(matches!(curve.validate(), Err(RigError::InvalidCurve(_))));
    }

    #[test]
    fn test_validate_rejects_knot_count() {
        let curve = BSplineCurve::new(1, vec![0.0, 0.0, 1.0], vec![DVec3::ZERO, DVec3::X]);
        assert!(matches!(curve.validate(), Err(RigError::InvalidCurve(_))));
    }

    #[test]
    fn test_validate_rejects_decreasing_knots() {
        let curve =
            BSplineCurve::new(1, vec![0.0, 0.0, 1.0, 0.5], vec![DVec3::ZERO, DVec3::X]);
        assert!(matches!(curve.validate(), Err(RigError::InvalidCurve(_))));
    }

    #[test]
    fn test_with_control_points_keeps_structure() {
        let curve = quadratic();
        let moved = curve.with_control_points(vec![DVec3::ONE; 3]);
        assert_eq!(moved.degree, curve.degree);
        assert_eq!(moved.knots, curve.knots);
        assert_eq!(moved.control_points, vec![DVec3::ONE; 3]);
        // Source untouched
        assert_eq!(curve.control_points[1], DVec3::new(0.5, 1.0, 0.0));
    }
}
