/// Tolerances for iterative geometric queries.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
    /// Tolerance on normalized surface parameters
    pub parametric: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_PARAMETRIC: f64 = 1e-9;

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            parametric: Self::DEFAULT_PARAMETRIC,
        }
    }

    /// Check if a value is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }

    /// Check if a parameter step is small enough to stop iterating
    pub fn param_converged(self, du: f64, dv: f64) -> bool {
        du.abs() < self.parametric && dv.abs() < self.parametric
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
