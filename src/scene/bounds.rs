use glam::Vec3;

use crate::constants::world;
use crate::physics::AABB;

/// Region where target balls may spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            min_x: world::DEFAULT_MIN_X,
            max_x: world::DEFAULT_MAX_X,
            min_y: world::DEFAULT_MIN_Y,
            max_y: world::DEFAULT_MAX_Y,
            min_z: world::DEFAULT_MIN_Z,
            max_z: world::DEFAULT_MAX_Z,
        }
    }
}

impl MapBounds {
    /// Derive spawn bounds from the placed map box: x, z and the bottom are
    /// pulled in by `margin`, the top is raised by `headroom`.
    pub fn from_world_box(world_box: &AABB, margin: f32, headroom: f32) -> Self {
        let bounds = Self {
            min_x: world_box.min.x + margin,
            max_x: world_box.max.x - margin,
            min_y: world_box.min.y + margin,
            max_y: world_box.max.y + headroom,
            min_z: world_box.min.z + margin,
            max_z: world_box.max.z - margin,
        };
        bounds.normalized()
    }

    /// Collapse inverted axes (a map thinner than twice the margin) onto
    /// their midpoint so sampling stays well defined
    fn normalized(mut self) -> Self {
        fn fix(min: &mut f32, max: &mut f32) {
            if *min > *max {
                let mid = (*min + *max) * 0.5;
                *min = mid;
                *max = mid;
            }
        }
        fix(&mut self.min_x, &mut self.max_x);
        fix(&mut self.min_y, &mut self.max_y);
        fix(&mut self.min_z, &mut self.max_z);
        self
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.min_x, self.min_y, self.min_z)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.max_x, self.max_y, self.max_z)
    }

    pub fn clamp(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min(), self.max())
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_box_is_inset_and_raised() {
        let world_box = AABB::new(Vec3::new(-15.0, -2.0, -10.0), Vec3::new(15.0, 5.0, 10.0));
        let bounds = MapBounds::from_world_box(&world_box, 2.0, 3.0);

        assert_eq!(bounds.min_x, -13.0);
        assert_eq!(bounds.max_x, 13.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 8.0);
        assert_eq!(bounds.min_z, -8.0);
        assert_eq!(bounds.max_z, 8.0);
    }

    #[test]
    fn thin_maps_collapse_instead_of_inverting() {
        let world_box = AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.5, 1.0));
        let bounds = MapBounds::from_world_box(&world_box, 2.0, 3.0);

        assert_eq!(bounds.min_x, 0.0);
        assert_eq!(bounds.max_x, 0.0);
        assert!(bounds.min_y <= bounds.max_y);
        assert!(bounds.contains(Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn clamp_pulls_points_inside() {
        let bounds = MapBounds::default();
        let clamped = bounds.clamp(Vec3::new(40.0, -9.0, 0.0));
        assert_eq!(clamped, Vec3::new(15.0, -2.0, 0.0));
        assert!(bounds.contains(clamped));
    }
}
