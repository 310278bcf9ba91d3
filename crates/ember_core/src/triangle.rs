//! Triangle primitive with precomputed derived quantities.

use ember_math::{Aabb, Vec3};

/// A single triangle.
///
/// The geometric normal (from the vertex winding), the surface area and
/// the bounding box are computed once at construction; the triangle is
/// immutable afterward.
#[derive(Clone, Debug)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Unit geometric normal
    normal: Vec3,
    /// Surface area
    area: f32,
    /// Bounding box, padded against degenerate extents
    bounds: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Near-degenerate triangles are constructible; they get a fallback
    /// normal and (almost) zero area, and never register ray hits.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let cross = edge1.cross(edge2);
        let double_area = cross.length();
        let normal = if double_area > 0.0 {
            cross / double_area
        } else {
            Vec3::Y // Default up normal for degenerate cases
        };

        let bounds = Aabb::from_points(v0.min(v1).min(v2), v0.max(v1).max(v2));

        Self {
            v0,
            v1,
            v2,
            normal,
            area: 0.5 * double_area,
            bounds,
        }
    }

    #[inline]
    pub fn v0(&self) -> Vec3 {
        self.v0
    }

    #[inline]
    pub fn v1(&self) -> Vec3 {
        self.v1
    }

    #[inline]
    pub fn v2(&self) -> Vec3 {
        self.v2
    }

    /// Unit geometric normal of the triangle plane.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Surface area.
    #[inline]
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Padded bounding box.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Centroid of the three vertices.
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Point for barycentric weights (b0, b1); the third weight is implied.
    pub fn point_at(&self, b0: f32, b1: f32) -> Vec3 {
        self.v0 * b0 + self.v1 * b1 + self.v2 * (1.0 - b0 - b1)
    }
}
