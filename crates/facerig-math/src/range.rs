use facerig_core::{Result, RigError};
use serde::{Deserialize, Serialize};

/// A real boundary interval `[start, end]` that raw coordinates are
/// normalized against.
///
/// `start` may be greater than `end`; the mapping simply runs backwards.
/// Serialized as a two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ParamRange {
    pub start: f64,
    pub end: f64,
}

impl ParamRange {
    pub const UNIT: Self = Self::new(0.0, 1.0);

    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Signed length `end - start`.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_degenerate(&self) -> bool {
        self.end == self.start
    }

    /// Both bounds and the length are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.length().is_finite()
    }

    /// Fail with `RigError::NonFiniteRange` when a bound is NaN or infinite or
    /// the length overflows, and with `RigError::DegenerateRange` when the
    /// range has zero length.
    pub fn check(&self, axis: &'static str) -> Result<()> {
        if !self.is_finite() {
            return Err(RigError::NonFiniteRange {
                axis,
                start: self.start,
                end: self.end,
            });
        }
        if self.is_degenerate() {
            return Err(RigError::DegenerateRange {
                axis,
                start: self.start,
            });
        }
        Ok(())
    }

    /// Map `value` linearly so that `start -> 0` and `end -> 1`.
    ///
    /// Values outside the range are not clamped. Callers must have checked
    /// the range is not degenerate.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.start) / self.length()
    }

    /// Inverse of [`ParamRange::normalize`].
    pub fn denormalize(&self, t: f64) -> f64 {
        self.start + t * self.length()
    }
}

impl Default for ParamRange {
    fn default() -> Self {
        Self::UNIT
    }
}

impl From<[f64; 2]> for ParamRange {
    fn from([start, end]: [f64; 2]) -> Self {
        Self::new(start, end)
    }
}

impl From<(f64, f64)> for ParamRange {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

impl From<ParamRange> for [f64; 2] {
    fn from(range: ParamRange) -> Self {
        [range.start, range.end]
    }
}
