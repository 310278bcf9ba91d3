//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over the scene's objects. Using an enum keeps traversal a
//! single recursive function over the variant, without dynamic dispatch.

use ember_core::Object;
use ember_math::{Aabb, Interval, Ray};

use crate::intersection::{ray_triangle, Intersection};

/// Maximum objects per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 2;

/// BVH node - either a branch with two children or a leaf referencing a
/// small subset of objects by index.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        bbox: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
    /// Leaf node with a small number of object indices.
    Leaf { bbox: Aabb, objects: Vec<usize> },
}

impl BvhNode {
    /// Build a BVH over the full object list.
    ///
    /// Leaves partition the input indices: no object omitted, none
    /// duplicated. Callers guarantee `objects` is non-empty (the world
    /// rejects empty scenes before building).
    pub fn build(objects: &[Object]) -> Self {
        debug_assert!(!objects.is_empty());
        Self::build_recursive(objects, (0..objects.len()).collect())
    }

    /// Recursive construction.
    ///
    /// Median split: sort indices by bounds centroid on the axis with the
    /// largest centroid spread, split in half, recurse.
    fn build_recursive(objects: &[Object], mut ids: Vec<usize>) -> Self {
        let bounds = ids
            .iter()
            .fold(Aabb::EMPTY, |acc, &i| Aabb::surrounding(&acc, objects[i].bounds()));

        if ids.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                bbox: bounds,
                objects: ids,
            };
        }

        // Choose the split axis from the centroid spread
        let centroid_bounds = ids.iter().fold(Aabb::EMPTY, |acc, &i| {
            let c = objects[i].bounds().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        ids.sort_unstable_by(|&a, &b| {
            let a_val = objects[a].bounds().centroid()[axis];
            let b_val = objects[b].bounds().centroid()[axis];
            a_val
                .partial_cmp(&b_val)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let right_ids = ids.split_off(ids.len() / 2);
        let left = Self::build_recursive(objects, ids);
        let right = Self::build_recursive(objects, right_ids);

        BvhNode::Branch {
            bbox: bounds,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Bounds enclosing everything below this node.
    pub fn bounding_box(&self) -> &Aabb {
        match self {
            BvhNode::Branch { bbox, .. } => bbox,
            BvhNode::Leaf { bbox, .. } => bbox,
        }
    }

    /// Closest intersection of `ray` within `ray_t`, or None.
    ///
    /// Branches are traversed nearest-entry-first; a child whose box is
    /// missed, or whose entry distance lies beyond the best known hit, is
    /// skipped entirely.
    pub fn intersect(
        &self,
        objects: &[Object],
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<Intersection> {
        match self {
            BvhNode::Leaf {
                bbox,
                objects: ids,
            } => {
                bbox.clip(ray, ray_t)?;

                let mut limit = ray_t;
                let mut closest = None;
                for &id in ids {
                    let object = &objects[id];
                    if !object.bounds().hit(ray, limit) {
                        continue;
                    }
                    for triangle in object.triangles() {
                        if let Some(t) = ray_triangle(ray, triangle, limit) {
                            limit.max = t;
                            closest = Some(Intersection {
                                t,
                                point: ray.at(t),
                                normal: triangle.normal(),
                                object: id,
                            });
                        }
                    }
                }
                closest
            }

            BvhNode::Branch { bbox, left, right } => {
                bbox.clip(ray, ray_t)?;

                let left_clip = left.bounding_box().clip(ray, ray_t);
                let right_clip = right.bounding_box().clip(ray, ray_t);

                let (near, far, far_entry) = match (left_clip, right_clip) {
                    (None, None) => return None,
                    (Some(_), None) => return left.intersect(objects, ray, ray_t),
                    (None, Some(_)) => return right.intersect(objects, ray, ray_t),
                    (Some(lc), Some(rc)) => {
                        if lc.min <= rc.min {
                            (left, right, rc.min)
                        } else {
                            (right, left, lc.min)
                        }
                    }
                };

                let mut limit = ray_t;
                let near_hit = near.intersect(objects, ray, limit);
                if let Some(hit) = &near_hit {
                    limit.max = hit.t;
                }

                // The far child only matters if its box starts before the
                // best hit found so far.
                if far_entry <= limit.max {
                    if let Some(hit) = far.intersect(objects, ray, limit) {
                        return Some(hit);
                    }
                }

                near_hit
            }
        }
    }
}
