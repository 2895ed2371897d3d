//! Projection configuration.

use facerig_core::traits::Validate;
use facerig_core::{Result, RigError};
use facerig_math::{Aabb3, DVec2, ParamRange, Point3};
use serde::{Deserialize, Serialize};

/// Which coordinates of a control point feed the raw U and V values.
///
/// V always reads the point's Y coordinate; only the U source changes
/// between the two working planes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneAxes {
    /// `u = x`, `v = y`
    #[default]
    XY,
    /// `u = z`, `v = y`
    YZ,
}

impl PlaneAxes {
    /// Raw `(u, v)` source values of `point` before normalization.
    pub fn uv_source(self, point: Point3) -> DVec2 {
        match self {
            PlaneAxes::XY => DVec2::new(point.x, point.y),
            PlaneAxes::YZ => DVec2::new(point.z, point.y),
        }
    }
}

/// Boundary ranges, source plane and reversal flags for a projection.
///
/// Loaded from JSON with camelCase keys, ranges as `[start, end]` pairs:
///
/// ```json
/// { "uRange": [-8.0, 8.0], "vRange": [-3.0, 3.0], "planeAxes": "YZ", "reverseU": true }
/// ```
///
/// `planeAxes` defaults to `XY` and the reversal flags to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    pub u_range: ParamRange,
    pub v_range: ParamRange,
    #[serde(default)]
    pub plane_axes: PlaneAxes,
    #[serde(default)]
    pub reverse_u: bool,
    #[serde(default)]
    pub reverse_v: bool,
}

impl ProjectionConfig {
    pub fn new(u_range: impl Into<ParamRange>, v_range: impl Into<ParamRange>) -> Self {
        Self {
            u_range: u_range.into(),
            v_range: v_range.into(),
            plane_axes: PlaneAxes::XY,
            reverse_u: false,
            reverse_v: false,
        }
    }

    pub fn with_plane_axes(mut self, plane_axes: PlaneAxes) -> Self {
        self.plane_axes = plane_axes;
        self
    }

    pub fn with_reverse(mut self, reverse_u: bool, reverse_v: bool) -> Self {
        self.reverse_u = reverse_u;
        self.reverse_v = reverse_v;
        self
    }

    /// Parse a configuration from JSON. The ranges are not checked here;
    /// projection rejects degenerate ranges.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RigError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RigError::Config(e.to_string()))
    }

    /// Ranges spanning the bounding box of `points` on the chosen plane.
    ///
    /// The U range covers the U source axis of `plane_axes`, the V range
    /// covers Y. Points flat along either axis give a degenerate range.
    pub fn fit_to_points(points: &[Point3], plane_axes: PlaneAxes) -> Result<Self> {
        let bounds = Aabb3::from_points(points)
            .ok_or_else(|| RigError::InvalidCurve("no points to fit ranges to".into()))?;
        let min = plane_axes.uv_source(bounds.min);
        let max = plane_axes.uv_source(bounds.max);
        let config = Self::new((min.x, max.x), (min.y, max.y)).with_plane_axes(plane_axes);
        config.validate()?;
        Ok(config)
    }

    /// Map raw `(u, v)` source values to parameters: normalize against the
    /// ranges, then apply the reversal flags.
    ///
    /// Assumes validated ranges.
    pub(crate) fn normalize(&self, raw: DVec2) -> DVec2 {
        let mut u = self.u_range.normalize(raw.x);
        let mut v = self.v_range.normalize(raw.y);
        if self.reverse_u {
            u = -u;
        }
        if self.reverse_v {
            v = -v;
        }
        DVec2::new(u, v)
    }

    /// Inverse of `normalize`.
    pub(crate) fn denormalize(&self, param: DVec2) -> DVec2 {
        let u = if self.reverse_u { -param.x } else { param.x };
        let v = if self.reverse_v { -param.y } else { param.y };
        DVec2::new(self.u_range.denormalize(u), self.v_range.denormalize(v))
    }
}

impl Validate for ProjectionConfig {
    fn validate(&self) -> Result<()> {
        self.u_range.check("u")?;
        self.v_range.check("v")
    }
}
