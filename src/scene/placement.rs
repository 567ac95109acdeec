use glam::{Mat4, Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::config::Tuning;
use crate::constants::robot;
use crate::physics::{aabb_center, aabb_max_dimension, aabb_size, aabb_transformed, AABB};

/// How the map model sits in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPlacement {
    pub scale: f32,
    pub translation: Vec3,
    /// Rotation about X (radians); scans are authored Z-up
    pub rotation_x: f32,
    /// Model bounds after the full transform
    pub world_box: AABB,
}

impl MapPlacement {
    /// Translation * rotation * scale
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_x(self.rotation_x),
            self.translation,
        )
    }
}

/// How the robot model sits in the world at spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotPlacement {
    pub scale: f32,
    pub position: Vec3,
}

/// Uniform scale bringing `extent` to `target`; degenerate models keep scale 1
fn fit_scale(target: f32, extent: f32) -> f32 {
    if extent > f32::EPSILON {
        target / extent
    } else {
        log::warn!("[scene::fit_scale] Degenerate model extent {}, keeping scale 1", extent);
        1.0
    }
}

/// Normalise the map: largest dimension becomes `map_target_size`, the
/// translation cancels the scaled model-space centre, the model is rotated
/// -90 degrees about X, then lifted so its lowest point rests on the floor.
///
/// The centre is cancelled before the rotation, so only world X ends up
/// centred; world Z is offset by -(cy + cz) * scale. Spawn point and camera
/// pose are set up for that layout.
pub fn place_map(model_box: &AABB, tuning: &Tuning) -> MapPlacement {
    let scale = fit_scale(tuning.map_target_size, aabb_max_dimension(model_box));
    let rotation_x = -FRAC_PI_2;
    let translation = -(aabb_center(model_box) * scale);

    let mut placement = MapPlacement {
        scale,
        translation,
        rotation_x,
        world_box: AABB::EMPTY,
    };

    let rotated = aabb_transformed(model_box, &placement.model_matrix());
    placement.translation.y += tuning.floor_y - rotated.min.y;
    placement.world_box = aabb_transformed(model_box, &placement.model_matrix());

    log::info!(
        "[scene::place_map] scale {:.4}, translation {:?}, world box {:?} .. {:?}",
        placement.scale,
        placement.translation,
        placement.world_box.min,
        placement.world_box.max
    );
    placement
}

/// Scale the robot to `robot_target_height` and spawn it hovering
/// `robot_float_height` above the floor.
pub fn place_robot(model_box: &AABB, tuning: &Tuning) -> RobotPlacement {
    let scale = fit_scale(tuning.robot_target_height, aabb_size(model_box).y);
    let scaled_min_y = model_box.min.y * scale;

    let position = Vec3::new(
        robot::SPAWN_X,
        tuning.floor_y - scaled_min_y + tuning.robot_float_height,
        robot::SPAWN_Z,
    );

    log::info!(
        "[scene::place_robot] scale {:.4}, spawn position {:?}",
        scale,
        position
    );
    RobotPlacement { scale, position }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn map_is_normalised_and_floored() {
        let tuning = Tuning::default();
        // Z-up scan: 60 wide, 40 deep, 6 tall, offset from the origin
        let model_box = AABB::new(Vec3::new(100.0, 50.0, 0.0), Vec3::new(160.0, 90.0, 6.0));
        let placement = place_map(&model_box, &tuning);

        assert_relative_eq!(placement.scale, 0.5);
        let size = aabb_size(&placement.world_box);
        assert_relative_eq!(size.x, 30.0, epsilon = 1e-3);
        // Depth (model Y) becomes world Z, height (model Z) becomes world Y
        assert_relative_eq!(size.z, 20.0, epsilon = 1e-3);
        assert_relative_eq!(size.y, 3.0, epsilon = 1e-3);

        assert_relative_eq!(placement.world_box.min.y, tuning.floor_y, epsilon = 1e-4);
        assert_relative_eq!(placement.world_box.min.x, -15.0, epsilon = 1e-3);
    }

    #[test]
    fn map_centre_is_cancelled_before_rotation() {
        let tuning = Tuning::default();
        let model_box = AABB::new(Vec3::new(100.0, 50.0, 0.0), Vec3::new(160.0, 90.0, 6.0));
        let placement = place_map(&model_box, &tuning);

        assert_eq!(placement.translation.x, -65.0);
        assert_eq!(placement.translation.z, -1.5);

        let center = aabb_center(&placement.world_box);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-3);
        // -(cy + cz) * scale = -(70 + 3) * 0.5
        assert_relative_eq!(center.z, -36.5, epsilon = 1e-3);
        assert_relative_eq!(placement.world_box.min.z, -46.5, epsilon = 1e-3);
        assert_relative_eq!(placement.world_box.max.z, -26.5, epsilon = 1e-3);
    }

    #[test]
    fn model_centred_on_its_origin_stays_centred() {
        let tuning = Tuning::default();
        let model_box = AABB::new(Vec3::new(-30.0, -20.0, -3.0), Vec3::new(30.0, 20.0, 3.0));
        let placement = place_map(&model_box, &tuning);
        let center = aabb_center(&placement.world_box);
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(center.z, 0.0, epsilon = 1e-3);
        assert_relative_eq!(placement.world_box.min.y, tuning.floor_y, epsilon = 1e-4);
    }

    #[test]
    fn robot_is_two_metres_tall_and_floating() {
        let tuning = Tuning::default();
        let model_box = AABB::new(Vec3::new(-1.0, 1.0, -1.0), Vec3::new(1.0, 5.0, 1.0));
        let placement = place_robot(&model_box, &tuning);

        assert_relative_eq!(placement.scale, 0.5);
        // Scaled feet sit at y = 0.5, so the origin goes 0.5 below floor + float height
        assert_relative_eq!(placement.position.y, -2.0 - 0.5 + 3.0);
        assert_eq!(placement.position.x, robot::SPAWN_X);
        assert_eq!(placement.position.z, robot::SPAWN_Z);
    }

    #[test]
    fn flat_model_keeps_unit_scale() {
        let tuning = Tuning::default();
        let model_box = AABB::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(place_robot(&model_box, &tuning).scale, 1.0);
    }
}
