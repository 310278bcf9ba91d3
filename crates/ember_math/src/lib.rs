//! Math foundation for the ember path tracer.
//!
//! Re-exports glam for vector/matrix types and adds the ray tracing
//! primitives built on top of them: `Ray`, `Interval` and `Aabb`.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
