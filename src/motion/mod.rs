/// Data-Oriented Robot Motion
///
/// Key state becomes a per-frame velocity, the velocity accumulates into a
/// persistent target, and the visible transform chases the target with a
/// fixed lerp factor. All speeds are per frame; the integrator runs exactly
/// once per rendered frame.

pub mod hover;

pub use hover::{apply_hover, HoverState};

use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::config::Tuning;
use crate::input::MovementKeys;

/// Visible robot transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation about +Y (radians)
    pub yaw: f32,
}

impl Transform {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }
}

/// Where the robot is heading and how fast it moved this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub target_position: Vec3,
    pub target_yaw: f32,
    /// Velocity applied during the last integration step
    pub velocity: Vec3,
}

impl MotionState {
    /// Start at rest with the target on the current transform
    pub fn at_rest(transform: &Transform) -> Self {
        Self {
            target_position: transform.position,
            target_yaw: transform.yaw,
            velocity: Vec3::ZERO,
        }
    }
}

/// Vertical component from the ascend/descend keys
/// Pure function - non-zero only when exactly one of the two keys is held
pub fn vertical_velocity(keys: &MovementKeys, speed: f32) -> f32 {
    match (keys.ascend, keys.descend) {
        (true, false) => speed,
        (false, true) => -speed,
        _ => 0.0,
    }
}

/// Velocity for one frame
/// Pure function - opposite arrow keys cancel out
pub fn compute_velocity(keys: &MovementKeys, speed: f32) -> Vec3 {
    let mut velocity = Vec3::ZERO;

    if keys.up {
        velocity.z -= speed;
    }
    if keys.down {
        velocity.z += speed;
    }
    if keys.left {
        velocity.x -= speed;
    }
    if keys.right {
        velocity.x += speed;
    }

    velocity.y = vertical_velocity(keys, speed);
    velocity
}

/// Facing for a velocity, if it has a horizontal component
/// Pure function - yaw 0 faces +Z
pub fn target_yaw_for(velocity: Vec3) -> Option<f32> {
    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    if horizontal.length() > 0.0 {
        Some(velocity.x.atan2(velocity.z))
    } else {
        None
    }
}

/// Clamp a target height into [floor + min, floor + max]
/// Pure function
pub fn clamp_target_height(y: f32, floor_y: f32, min_height: f32, max_height: f32) -> f32 {
    y.clamp(floor_y + min_height, floor_y + max_height)
}

/// Signed yaw difference folded into [-PI, PI]
/// Pure function - turning by the result takes the short way round
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    let diff = to - from;
    if diff > PI {
        diff - TAU
    } else if diff < -PI {
        diff + TAU
    } else {
        diff
    }
}

/// Run one integration step for the robot
/// Function - updates target and visible transform from the sampled keys
pub fn integrate_motion(
    transform: &mut Transform,
    motion: &mut MotionState,
    keys: &MovementKeys,
    tuning: &Tuning,
) {
    let velocity = compute_velocity(keys, tuning.robot_speed);
    motion.velocity = velocity;

    if let Some(yaw) = target_yaw_for(velocity) {
        motion.target_yaw = yaw;
    }

    if velocity.length() > 0.0 {
        motion.target_position += velocity;
    }

    motion.target_position.y = clamp_target_height(
        motion.target_position.y,
        tuning.floor_y,
        tuning.min_robot_height,
        tuning.max_robot_height,
    );

    transform.position = transform
        .position
        .lerp(motion.target_position, tuning.position_lerp);

    let delta = shortest_angle_delta(transform.yaw, motion.target_yaw);
    transform.yaw += delta * tuning.rotation_lerp;
}
