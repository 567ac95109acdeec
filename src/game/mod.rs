//! Timed "find the ball" minigame
//!
//! `GameSession` is the whole state machine:
//!
//! ```text
//! Idle --start--> Playing --ball touched--> Clear  --3s--> Idle
//!                         --time up-------> Failed --3s--> Idle
//! ```
//!
//! Every transition returns a [`GameEvent`] that the HUD consumes; the
//! session never talks to the UI directly.

pub mod ball;
pub mod countdown;
pub mod session;

pub use ball::{animate_ball, sample_spawn_position, spawn_ball, Ball, Sparkle};
pub use countdown::Countdown;
pub use session::GameSession;

use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Idle,
    Playing,
    Clear,
    Failed,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Clear,
    Failed,
}

impl From<GameResult> for GameState {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Clear => GameState::Clear,
            GameResult::Failed => GameState::Failed,
        }
    }
}

/// Emitted on every state change and countdown refresh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Started { ball_position: Vec3, duration: f32 },
    Countdown { remaining: f32 },
    Ended(GameResult),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a round cannot start while the game is {0:?}")]
    AlreadyActive(GameState),

    #[error("the robot model has not been loaded")]
    RobotMissing,
}
