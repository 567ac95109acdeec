/// Sphere overlap test between the robot and the target ball.

use glam::Vec3;

/// Euclidean distance between two points
/// Pure function
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

/// True when two spheres overlap.
/// Touching exactly at the sum of the radii does not count.
pub fn spheres_overlap(a: Vec3, b: Vec3, radius_a: f32, radius_b: f32) -> bool {
    distance(a, b) < radius_a + radius_b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let robot = Vec3::ZERO;
        assert!(spheres_overlap(robot, Vec3::new(2.4, 0.0, 0.0), 1.5, 1.0));
        assert!(!spheres_overlap(robot, Vec3::new(2.5, 0.0, 0.0), 1.5, 1.0));
        assert!(!spheres_overlap(robot, Vec3::new(0.0, 3.0, 0.0), 1.5, 1.0));
    }

    #[test]
    fn distance_is_three_dimensional() {
        assert_eq!(distance(Vec3::ZERO, Vec3::new(3.0, 4.0, 12.0)), 13.0);
    }
}
