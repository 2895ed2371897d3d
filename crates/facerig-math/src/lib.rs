pub mod aabb;
pub mod range;

pub use glam::{DVec2, DVec3};
pub use aabb::Aabb3;
pub use range::ParamRange;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
