/// Data-Oriented Axis-Aligned Bounding Box
///
/// Pure functions over plain AABB data. Used to measure loaded models and to
/// derive the playable map bounds; nothing here is a physics body.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    /// Inverted box that any expansion replaces
    pub const EMPTY: AABB = AABB {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// True until at least one point has been added
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to include `point`
    pub fn expand_to_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }
}

/// Smallest box containing every point
/// Pure function - returns `AABB::EMPTY` for an empty iterator
pub fn aabb_from_points<I>(points: I) -> AABB
where
    I: IntoIterator<Item = Vec3>,
{
    let mut aabb = AABB::EMPTY;
    for point in points {
        aabb.expand_to_point(point);
    }
    aabb
}

/// Get center point of AABB
/// Pure function - calculates center from min/max bounds
pub fn aabb_center(aabb: &AABB) -> Vec3 {
    (aabb.min + aabb.max) * 0.5
}

/// Get full extents of AABB
/// Pure function
pub fn aabb_size(aabb: &AABB) -> Vec3 {
    aabb.max - aabb.min
}

/// Largest of the three extents
/// Pure function
pub fn aabb_max_dimension(aabb: &AABB) -> f32 {
    let size = aabb_size(aabb);
    size.x.max(size.y).max(size.z)
}

/// The eight corners of the box
/// Pure function
pub fn aabb_corners(aabb: &AABB) -> [Vec3; 8] {
    let (a, b) = (aabb.min, aabb.max);
    [
        Vec3::new(a.x, a.y, a.z),
        Vec3::new(b.x, a.y, a.z),
        Vec3::new(a.x, b.y, a.z),
        Vec3::new(b.x, b.y, a.z),
        Vec3::new(a.x, a.y, b.z),
        Vec3::new(b.x, a.y, b.z),
        Vec3::new(a.x, b.y, b.z),
        Vec3::new(b.x, b.y, b.z),
    ]
}

/// Axis-aligned box around the transformed corners
/// Pure function - conservative bounds of a box under an affine transform
pub fn aabb_transformed(aabb: &AABB, transform: &Mat4) -> AABB {
    if aabb.is_empty() {
        return *aabb;
    }
    aabb_from_points(
        aabb_corners(aabb)
            .iter()
            .map(|corner| transform.transform_point3(*corner)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_tracks_extremes() {
        let aabb = aabb_from_points([
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.5, 0.0, 5.0),
        ]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 5.0));
        assert_eq!(aabb_center(&aabb), Vec3::new(0.0, 1.0, 2.5));
        assert_eq!(aabb_max_dimension(&aabb), 6.0);
    }

    #[test]
    fn empty_stays_empty() {
        let aabb = aabb_from_points(std::iter::empty());
        assert!(aabb.is_empty());
        assert!(aabb_transformed(&aabb, &Mat4::from_scale(Vec3::splat(2.0))).is_empty());
    }

    #[test]
    fn rotation_about_x_swaps_y_and_z() {
        let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));
        let rotated = aabb_transformed(&aabb, &Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2));

        // -90 degrees about X maps (y, z) to (z, -y)
        assert_relative_eq!(rotated.min.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.max.y, 3.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.min.z, -2.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.max.z, 0.0, epsilon = 1e-5);
    }
}
