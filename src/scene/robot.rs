use crate::motion::{HoverState, MotionState, Transform};
use crate::scene::RobotPlacement;

/// The controllable robot: visible transform, motion target and hover state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Robot {
    pub transform: Transform,
    pub motion: MotionState,
    pub hover: HoverState,
    /// Model scale from placement, kept for the renderer
    pub scale: f32,
}

impl Robot {
    /// Spawn at rest at the placement position, facing +Z
    pub fn spawn(placement: &RobotPlacement) -> Self {
        let transform = Transform::new(placement.position, 0.0);
        Self {
            transform,
            motion: MotionState::at_rest(&transform),
            hover: HoverState::new(placement.position.y),
            scale: placement.scale,
        }
    }
}
