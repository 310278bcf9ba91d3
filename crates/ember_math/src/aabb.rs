use glam::Vec3;

use crate::{Interval, Ray};

/// Axis-aligned bounding box, defined by one interval per axis.
///
/// Used as the node bound in the BVH and as the cached bound of triangles
/// and objects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(
            Interval::new(a.x.min(b.x), a.x.max(b.x)),
            Interval::new(a.y.min(b.y), a.y.max(b.y)),
            Interval::new(a.z.min(b.z), a.z.max(b.z)),
        )
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::new(box0.x.min.min(box1.x.min), box0.x.max.max(box1.x.max)),
            y: Interval::new(box0.y.min.min(box1.y.min), box0.y.max.max(box1.y.max)),
            z: Interval::new(box0.z.min.min(box1.z.min), box0.z.max.max(box1.z.max)),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Test if a ray intersects this AABB within the given interval.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        self.clip(r, ray_t).is_some()
    }

    /// Slab test returning the parametric range over which the ray is
    /// inside the box, clipped to `ray_t`, or None on a miss.
    ///
    /// The range's `min` is the box entry distance, which BVH traversal
    /// uses to visit the nearer child first and to prune children that
    /// start beyond the best known hit.
    pub fn clip(&self, r: &Ray, mut ray_t: Interval) -> Option<Interval> {
        for axis in 0..3 {
            let interval = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];

            let mut t0 = (interval.min - r.origin[axis]) * adinv;
            let mut t1 = (interval.max - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return None;
            }
        }
        Some(ray_t)
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.x.min <= other.x.min
            && self.x.max >= other.x.max
            && self.y.min <= other.y.min
            && self.y.max >= other.y.max
            && self.z.min <= other.z.min
            && self.z.max >= other.z.max
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest
    /// extent.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size > y_size && x_size > z_size {
            0
        } else if y_size > z_size {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 10.0, 10.0));

        assert_eq!(aabb.x.min, 0.0);
        assert_eq!(aabb.x.max, 10.0);
        assert_eq!(aabb.z.min, 0.0);
        assert_eq!(aabb.z.max, 10.0);
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.x.min, 0.0);
        assert_eq!(surrounding.x.max, 10.0);
        assert!(surrounding.contains(&box1));
        assert!(surrounding.contains(&box2));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_clip_entry_exit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        let clipped = aabb.clip(&ray, Interval::new(0.0, 100.0)).unwrap();
        assert!((clipped.min - 4.0).abs() < 0.001);
        assert!((clipped.max - 6.0).abs() < 0.001);

        // Clipping respects the query interval
        let clipped = aabb.clip(&ray, Interval::new(0.0, 5.0)).unwrap();
        assert!((clipped.max - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_aabb_clip_from_inside() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let clipped = aabb.clip(&ray, Interval::new(0.0, 100.0)).unwrap();
        assert_eq!(clipped.min, 0.0);
        assert!((clipped.max - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_aabb_longest_axis() {
        assert_eq!(
            Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0)).longest_axis(),
            0
        );
        assert_eq!(
            Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0)).longest_axis(),
            1
        );
        assert_eq!(
            Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0)).longest_axis(),
            2
        );
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(aabb.centroid(), Vec3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn test_aabb_flat_box_is_padded() {
        // A flat (zero thickness) box must still be hittable head-on.
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }
}
