//! facerig geometry: B-spline curves, parametric surfaces, and their evaluation.

pub mod curve;
pub mod nurbs;
pub mod sample;
pub mod surface;

pub use curve::BSplineCurve;
pub use surface::{BSplineSurface, PlanarSurface, Surface};
