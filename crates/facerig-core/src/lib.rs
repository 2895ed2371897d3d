pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{Result, RigError};
pub use tolerance::Tolerance;
