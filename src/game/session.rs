use glam::Vec3;
use rand::Rng;

use super::ball::{spawn_ball, Ball};
use super::countdown::Countdown;
use super::{GameError, GameEvent, GameResult, GameState};
use crate::config::Tuning;
use crate::physics::spheres_overlap;
use crate::scene::MapBounds;

/// One process-wide minigame state machine
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    countdown: Option<Countdown>,
    ball: Option<Ball>,
    /// When the result banner expires and the session returns to idle
    reset_at: Option<f64>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            state: GameState::Idle,
            countdown: None,
            ball: None,
            reset_at: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.ball.as_mut()
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    /// Seconds left in the current round, if one is running
    pub fn remaining(&self, now: f64) -> Option<f32> {
        self.countdown.map(|c| c.remaining(now))
    }

    /// Idle -> Playing. Spawns the ball and starts the round timer.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        robot_position: Vec3,
        bounds: &MapBounds,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Result<GameEvent, GameError> {
        if self.state != GameState::Idle {
            return Err(GameError::AlreadyActive(self.state));
        }

        let ball = spawn_ball(rng, bounds, robot_position, tuning, now);
        let ball_position = ball.position;

        self.ball = Some(ball);
        self.countdown = Some(Countdown::new(now, tuning.round_duration));
        self.reset_at = None;
        self.state = GameState::Playing;

        log::info!("[game::start] Round started, {}s on the clock", tuning.round_duration);
        Ok(GameEvent::Started {
            ball_position,
            duration: tuning.round_duration,
        })
    }

    /// Playing -> Clear/Failed. Removes the ball, stops the timer and
    /// schedules the return to idle. Ignored outside of Playing.
    pub fn end(&mut self, result: GameResult, now: f64, tuning: &Tuning) -> Option<GameEvent> {
        if self.state != GameState::Playing {
            return None;
        }

        self.state = result.into();
        self.countdown = None;
        self.ball = None;
        self.reset_at = Some(now + tuning.result_display_duration as f64);

        log::info!("[game::end] Round over: {:?}", result);
        Some(GameEvent::Ended(result))
    }

    /// Periodic countdown refresh. Ends the round as failed once time is up.
    pub fn tick_countdown(&mut self, now: f64, tuning: &Tuning) -> Option<GameEvent> {
        if self.state != GameState::Playing {
            return None;
        }

        let countdown = self.countdown?;
        if countdown.expired(now) {
            self.end(GameResult::Failed, now, tuning)
        } else {
            Some(GameEvent::Countdown {
                remaining: countdown.remaining(now),
            })
        }
    }

    /// Ends the round as clear when the robot touches the ball
    pub fn check_collision(
        &mut self,
        robot_position: Vec3,
        now: f64,
        tuning: &Tuning,
    ) -> Option<GameEvent> {
        if self.state != GameState::Playing {
            return None;
        }

        let ball = self.ball.as_ref()?;
        if spheres_overlap(robot_position, ball.position, tuning.robot_radius, tuning.ball_radius) {
            self.end(GameResult::Clear, now, tuning)
        } else {
            None
        }
    }

    /// Clear/Failed -> Idle once the result has been shown long enough
    pub fn poll_reset(&mut self, now: f64) -> Option<GameEvent> {
        match (self.state, self.reset_at) {
            (GameState::Clear | GameState::Failed, Some(at)) if now >= at => {
                self.state = GameState::Idle;
                self.reset_at = None;
                log::debug!("[game::poll_reset] Back to idle");
                Some(GameEvent::Reset)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn started(now: f64) -> (GameSession, Tuning) {
        let tuning = Tuning::default();
        let mut session = GameSession::new();
        let mut rng = StdRng::seed_from_u64(9);
        session
            .start(now, Vec3::new(-0.3, 1.0, 7.5), &MapBounds::default(), &mut rng, &tuning)
            .expect("idle session starts");
        (session, tuning)
    }

    #[test]
    fn start_only_from_idle() {
        let (mut session, tuning) = started(0.0);
        assert_eq!(session.state(), GameState::Playing);
        assert!(session.ball().is_some());

        let mut rng = StdRng::seed_from_u64(1);
        let again = session.start(1.0, Vec3::ZERO, &MapBounds::default(), &mut rng, &tuning);
        assert_eq!(again, Err(GameError::AlreadyActive(GameState::Playing)));

        session.end(GameResult::Failed, 2.0, &tuning);
        let during_result = session.start(3.0, Vec3::ZERO, &MapBounds::default(), &mut rng, &tuning);
        assert_eq!(during_result, Err(GameError::AlreadyActive(GameState::Failed)));
    }

    #[test]
    fn countdown_ticks_then_fails() {
        let (mut session, tuning) = started(0.0);

        match session.tick_countdown(2.5, &tuning) {
            Some(GameEvent::Countdown { remaining }) => assert_eq!(remaining, 7.5),
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(
            session.tick_countdown(10.0, &tuning),
            Some(GameEvent::Ended(GameResult::Failed))
        );
        assert_eq!(session.state(), GameState::Failed);
        assert!(session.ball().is_none());
        assert!(session.countdown().is_none());

        // Timer is gone: further ticks do nothing
        assert_eq!(session.tick_countdown(10.05, &tuning), None);
    }

    #[test]
    fn touching_ball_clears() {
        let (mut session, tuning) = started(0.0);
        let ball_position = session.ball().unwrap().position;

        let far = ball_position + Vec3::new(tuning.collision_distance() + 0.1, 0.0, 0.0);
        assert_eq!(session.check_collision(far, 1.0, &tuning), None);

        let near = ball_position + Vec3::new(0.0, 2.0, 0.0);
        assert_eq!(
            session.check_collision(near, 1.0, &tuning),
            Some(GameEvent::Ended(GameResult::Clear))
        );
        assert_eq!(session.state(), GameState::Clear);
    }

    #[test]
    fn result_returns_to_idle_after_display_time() {
        let (mut session, tuning) = started(0.0);
        session.end(GameResult::Clear, 4.0, &tuning);

        assert_eq!(session.poll_reset(6.9), None);
        assert_eq!(session.poll_reset(7.0), Some(GameEvent::Reset));
        assert_eq!(session.state(), GameState::Idle);
        assert_eq!(session.poll_reset(8.0), None);
    }

    #[test]
    fn end_is_ignored_outside_playing() {
        let tuning = Tuning::default();
        let mut session = GameSession::new();
        assert_eq!(session.end(GameResult::Clear, 0.0, &tuning), None);
        assert_eq!(session.state(), GameState::Idle);
        assert_eq!(session.poll_reset(100.0), None);
    }
}
