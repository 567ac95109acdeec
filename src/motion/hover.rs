//! Idle hover bob for the robot.
//!
//! While the robot is not moving vertically its height oscillates around a
//! base height. The base is re-anchored to the current height on the frame
//! vertical motion stops, so the bob never snaps back to an old altitude.

use glam::Vec3;

use super::Transform;
use crate::config::Tuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverState {
    pub base_y: f32,
    pub was_moving_y: bool,
}

impl HoverState {
    pub fn new(base_y: f32) -> Self {
        Self {
            base_y,
            was_moving_y: false,
        }
    }
}

/// Apply the hover bob after the motion step.
/// `velocity` is the velocity integrated this frame, `now` is in seconds.
pub fn apply_hover(
    transform: &mut Transform,
    hover: &mut HoverState,
    velocity: Vec3,
    now: f64,
    tuning: &Tuning,
) {
    let moving_y = velocity.y.abs() > 0.0;

    if hover.was_moving_y && !moving_y {
        hover.base_y = transform.position.y;
    }

    if !moving_y {
        let amplitude = if velocity.length() > 0.0 {
            tuning.hover_amplitude_moving
        } else {
            tuning.hover_amplitude_idle
        };
        let offset = (now * tuning.hover_speed as f64).sin() as f32 * amplitude;
        transform.position.y = hover.base_y + offset;
    }

    hover.was_moving_y = moving_y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bob_uses_idle_amplitude_at_rest() {
        let tuning = Tuning::default();
        let mut transform = Transform::new(Vec3::new(0.0, 4.0, 0.0), 0.0);
        let mut hover = HoverState::new(4.0);

        let quarter_period = std::f64::consts::FRAC_PI_2 / tuning.hover_speed as f64;
        apply_hover(&mut transform, &mut hover, Vec3::ZERO, quarter_period, &tuning);
        assert_relative_eq!(transform.position.y, 4.0 + tuning.hover_amplitude_idle, epsilon = 1e-5);

        apply_hover(
            &mut transform,
            &mut hover,
            Vec3::new(0.15, 0.0, 0.0),
            quarter_period,
            &tuning,
        );
        assert_relative_eq!(transform.position.y, 4.0 + tuning.hover_amplitude_moving, epsilon = 1e-5);
    }

    #[test]
    fn vertical_motion_suspends_bob() {
        let tuning = Tuning::default();
        let mut transform = Transform::new(Vec3::new(0.0, 7.25, 0.0), 0.0);
        let mut hover = HoverState::new(4.0);

        apply_hover(&mut transform, &mut hover, Vec3::new(0.0, 0.15, 0.0), 1.0, &tuning);
        assert_eq!(transform.position.y, 7.25);
        assert!(hover.was_moving_y);
    }

    #[test]
    fn base_reanchors_when_vertical_motion_stops() {
        let tuning = Tuning::default();
        let mut transform = Transform::new(Vec3::new(0.0, 9.0, 0.0), 0.0);
        let mut hover = HoverState {
            base_y: 4.0,
            was_moving_y: true,
        };

        apply_hover(&mut transform, &mut hover, Vec3::ZERO, 0.0, &tuning);
        assert_eq!(hover.base_y, 9.0);
        // sin(0) = 0, so the robot sits exactly on the new base
        assert_eq!(transform.position.y, 9.0);
        assert!(!hover.was_moving_y);
    }
}
