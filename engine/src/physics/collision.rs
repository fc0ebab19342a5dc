//! Collision detection module
//!
//! Pure overlap tests used by the per-frame combat resolver.  Everything
//! here is stateless: callers own the decision of what a hit *means*.
//!
//! # Example
//!
//! ```ignore
//! use skyfall_engine::physics::collision::{Aabb, check_box_sphere};
//! use glam::Vec3;
//!
//! let hit_box = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
//! if check_box_sphere(&hit_box, Vec3::new(0.5, 1.0, 0.0), 0.3) {
//!     // bullet struck the enemy
//! }
//! ```

use glam::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with the given half-extents per axis.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Closest point inside (or on) the box to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }
}

/// Sphere-vs-sphere overlap test.
///
/// Compares squared distances so no square root is taken.
pub fn check_sphere_sphere(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> bool {
    let combined = radius_a + radius_b;
    center_a.distance_squared(center_b) <= combined * combined
}

/// AABB-vs-sphere overlap test.
///
/// Clamps the sphere center to the box and compares the squared distance to
/// the squared radius (the standard closest-point formulation).
pub fn check_box_sphere(aabb: &Aabb, sphere_center: Vec3, sphere_radius: f32) -> bool {
    let closest = aabb.closest_point(sphere_center);
    closest.distance_squared(sphere_center) <= sphere_radius * sphere_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_sphere_overlap() {
        let a = Vec3::ZERO;
        let b = Vec3::new(1.5, 0.0, 0.0);

        assert!(check_sphere_sphere(a, 1.0, b, 1.0));
        assert!(!check_sphere_sphere(a, 0.5, b, 0.5));
    }

    #[test]
    fn test_sphere_sphere_touching_counts_as_hit() {
        let a = Vec3::ZERO;
        let b = Vec3::new(2.0, 0.0, 0.0);

        assert!(check_sphere_sphere(a, 1.0, b, 1.0));
    }

    #[test]
    fn test_box_sphere_inside() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));

        assert!(check_box_sphere(&aabb, Vec3::ZERO, 0.3));
    }

    #[test]
    fn test_box_sphere_face_overlap() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));

        assert!(check_box_sphere(&aabb, Vec3::new(1.2, 0.0, 0.0), 0.3));
        assert!(!check_box_sphere(&aabb, Vec3::new(1.4, 0.0, 0.0), 0.3));
    }

    #[test]
    fn test_box_sphere_corner() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        // Corner distance is sqrt(3 * 0.2^2) ≈ 0.346 > 0.3
        assert!(!check_box_sphere(&aabb, Vec3::new(1.2, 1.2, 1.2), 0.3));
    }

    #[test]
    fn test_from_center() {
        let aabb = Aabb::from_center(Vec3::new(5.0, 1.0, -3.0), Vec3::new(1.0, 1.0, 1.0));

        assert_eq!(aabb.min, Vec3::new(4.0, 0.0, -4.0));
        assert_eq!(aabb.max, Vec3::new(6.0, 2.0, -2.0));
        assert_eq!(aabb.center(), Vec3::new(5.0, 1.0, -3.0));
    }
}
