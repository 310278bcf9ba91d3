use glam::Vec3;

/// A ray with origin and unit-length direction.
///
/// The direction invariant is checked in debug builds only; release builds
/// carry no cost for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. `direction` must already be unit length.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(direction.is_normalized());
        Self { origin, direction }
    }

    /// Create a ray from `origin` toward `target`, normalizing the
    /// direction.
    #[inline]
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, (target - origin).normalize())
    }

    /// Compute the point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(ray.at(0.0), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(ray.at(1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(2.5), Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_towards() {
        let ray = Ray::towards(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));

        assert!(ray.direction.is_normalized());
        assert_eq!(ray.direction, Vec3::Y);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_non_unit_direction_asserts() {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
    }
}
