//! Curve types.

mod bspline;

pub use bspline::BSplineCurve;
