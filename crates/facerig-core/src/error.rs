use thiserror::Error;

#[derive(Debug, Error)]
pub enum RigError {
    /// A boundary range with `start == end`; normalizing against it would divide by zero.
    #[error("Degenerate {axis} range: start and end are both {start}")]
    DegenerateRange { axis: &'static str, start: f64 },

    /// A boundary range with a NaN or infinite bound, or whose length overflows.
    #[error("Non-finite {axis} range [{start}, {end}]")]
    NonFiniteRange {
        axis: &'static str,
        start: f64,
        end: f64,
    },

    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RigError>;
