//! facerig curve projection.
//!
//! Flattens the control points of a B-spline curve into a boundary-normalized
//! `(u, v, 0)` space, and maps flattened curves back onto parametric surfaces.
//! Every operation is a pure function of its inputs and returns a new curve
//! with the source curve's degree and knots.

pub mod config;
pub mod plane;
pub mod surface;

pub use config::{PlaneAxes, ProjectionConfig};
pub use plane::{project_to_plane, CurveProjector};
pub use surface::{
    closest_parameter, project_onto_surface, project_to_surface, project_to_uv, SurfaceEvaluator,
    SurfaceHit,
};
