//! Per-frame application state.
//!
//! `AppContext` owns everything the frame loop mutates. The renderer and the
//! web shell drive it through a handful of entry points and read the result
//! back for drawing; it never touches the window or the GPU itself.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::ModelData;
use crate::camera::{clamp_camera_height, init_camera, update_aspect_ratio, OrbitCamera};
use crate::config::{EngineConfig, Tuning};
use crate::constants::render;
use crate::game::{animate_ball, GameError, GameEvent, GameSession, GameState};
use crate::input::{sample_movement_keys, InputState};
use crate::motion::{apply_hover, integrate_motion};
use crate::scene::{place_map, place_robot, MapBounds, MapPlacement, Robot};
use crate::time::Ticker;
use crate::ui::{apply_event, HudState};

pub struct AppContext {
    pub tuning: Tuning,
    pub input: InputState,
    pub camera: OrbitCamera,
    pub map: Option<MapPlacement>,
    pub map_bounds: MapBounds,
    pub robot: Option<Robot>,
    pub session: GameSession,
    pub hud: HudState,
    rng: StdRng,
    ticker: Ticker,
    events: Vec<GameEvent>,
    frame_count: u64,
}

impl AppContext {
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::info!("[app::new] Using fixed RNG seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Self {
            tuning: config.tuning.clone(),
            input: InputState::new(),
            camera: init_camera(config.window_width, config.window_height),
            map: None,
            map_bounds: MapBounds::default(),
            robot: None,
            session: GameSession::new(),
            hud: HudState::default(),
            rng,
            ticker: Ticker::new(config.tuning.tick_interval),
            events: Vec::new(),
            frame_count: 0,
        }
    }

    /// Place the map and derive the playable bounds from it
    pub fn install_map(&mut self, model: &ModelData) {
        let placement = place_map(&model.bounds, &self.tuning);
        self.map_bounds = MapBounds::from_world_box(
            &placement.world_box,
            self.tuning.map_margin,
            self.tuning.map_ceiling_headroom,
        );
        log::info!("[app::install_map] {} -> bounds {:?}", model.name, self.map_bounds);
        self.map = Some(placement);
    }

    /// Place the robot and make it controllable
    pub fn install_robot(&mut self, model: &ModelData) {
        let placement = place_robot(&model.bounds, &self.tuning);
        log::info!("[app::install_robot] {} spawned at {:?}", model.name, placement.position);
        self.robot = Some(Robot::spawn(&placement));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera = update_aspect_ratio(&self.camera, width, height);
    }

    /// Start a round. Refused while a round or its result is showing, and
    /// when there is no robot to play with.
    pub fn request_start(&mut self, now: f64) -> Result<(), GameError> {
        let robot_position = self
            .robot
            .as_ref()
            .map(|robot| robot.transform.position)
            .ok_or(GameError::RobotMissing)?;

        let event = self.session.start(
            now,
            robot_position,
            &self.map_bounds,
            &mut self.rng,
            &self.tuning,
        )?;
        self.ticker.start(now);
        self.push_event(event);
        Ok(())
    }

    /// One rendered frame
    pub fn update_frame(&mut self, now: f64) {
        self.frame_count += 1;
        clamp_camera_height(&mut self.camera, self.tuning.min_camera_height);

        if let Some(robot) = self.robot.as_mut() {
            let keys = sample_movement_keys(&self.input);
            integrate_motion(&mut robot.transform, &mut robot.motion, &keys, &self.tuning);
            apply_hover(
                &mut robot.transform,
                &mut robot.hover,
                robot.motion.velocity,
                now,
                &self.tuning,
            );

            if self.frame_count % render::POSITION_LOG_INTERVAL == 0 {
                log::debug!(
                    "[app::update_frame] robot {:?} yaw {:.3}, camera {:?}",
                    robot.transform.position,
                    robot.transform.yaw,
                    self.camera.position
                );
            }
        }

        if let Some(ball) = self.session.ball_mut() {
            animate_ball(ball, now);
        }

        // Collision uses the displayed position, not the motion target
        if let Some(position) = self.robot.as_ref().map(|robot| robot.transform.position) {
            if let Some(event) = self.session.check_collision(position, now, &self.tuning) {
                self.push_event(event);
            }
        }

        if let Some(event) = self.session.poll_reset(now) {
            self.push_event(event);
        }
    }

    /// Countdown refresh; call as often as you like, it fires every
    /// `tick_interval` seconds while a round is running
    pub fn tick(&mut self, now: f64) {
        if !self.ticker.poll(now) {
            return;
        }
        if let Some(event) = self.session.tick_countdown(now, &self.tuning) {
            self.push_event(event);
        }
    }

    pub fn state(&self) -> GameState {
        self.session.state()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: GameEvent) {
        if let GameEvent::Ended(_) = event {
            self.ticker.stop();
        }
        apply_event(&mut self.hud, &event);
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameResult;
    use crate::input::KeyCode;
    use crate::physics::AABB;
    use glam::Vec3;
    use winit::event::ElementState;

    fn model(name: &str, min: Vec3, max: Vec3) -> ModelData {
        ModelData {
            name: name.to_string(),
            vertex_count: 8,
            bounds: AABB::new(min, max),
        }
    }

    fn context() -> AppContext {
        let config = EngineConfig {
            seed: Some(11),
            ..EngineConfig::default()
        };
        let mut ctx = AppContext::new(&config);
        ctx.install_robot(&model("robot", Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 1.0, 0.5)));
        ctx
    }

    #[test]
    fn start_requires_robot() {
        let mut ctx = AppContext::new(&EngineConfig::default());
        assert_eq!(ctx.request_start(0.0), Err(GameError::RobotMissing));
        assert_eq!(ctx.state(), GameState::Idle);
        assert!(ctx.drain_events().is_empty());
    }

    #[test]
    fn start_emits_event_and_shows_countdown() {
        let mut ctx = context();
        ctx.request_start(0.0).expect("start");

        let events = ctx.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::Started { .. }]));
        assert!(ctx.hud.countdown_visible);
        assert_eq!(ctx.hud.seconds, 10);
        assert!(ctx.drain_events().is_empty());
    }

    #[test]
    fn ticks_run_out_the_clock() {
        let mut ctx = context();
        ctx.request_start(0.0).expect("start");
        ctx.drain_events();

        let mut now = 0.0;
        while ctx.state() == GameState::Playing && now < 11.0 {
            now += 0.05;
            ctx.tick(now);
        }

        assert_eq!(ctx.state(), GameState::Failed);
        let events = ctx.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::Ended(GameResult::Failed)));
        assert_eq!(ctx.hud.result_text(), Some("FAILED..."));

        // Ticker stopped with the round
        ctx.tick(now + 1.0);
        assert!(ctx.drain_events().is_empty());

        ctx.update_frame(now + 3.0);
        assert_eq!(ctx.state(), GameState::Idle);
        assert_eq!(ctx.drain_events(), vec![GameEvent::Reset]);
    }

    #[test]
    fn frames_move_robot_with_keys() {
        let mut ctx = context();
        let start = ctx.robot.as_ref().map(|r| r.transform.position).unwrap_or_default();

        ctx.input.process_key(KeyCode::ArrowRight, ElementState::Pressed);
        for frame in 0..30 {
            ctx.update_frame(frame as f64 / 60.0);
        }

        let robot = ctx.robot.as_ref().expect("robot");
        assert!(robot.transform.position.x > start.x);
        assert!(robot.transform.yaw > 0.0);
        assert_eq!(ctx.frame_count(), 30);
    }

    #[test]
    fn map_install_replaces_default_bounds() {
        let mut ctx = context();
        ctx.install_map(&model("map", Vec3::new(-50.0, -50.0, 0.0), Vec3::new(50.0, 50.0, 10.0)));

        assert!(ctx.map.is_some());
        assert_ne!(ctx.map_bounds, MapBounds::default());
        assert!(ctx.map_bounds.min_x < ctx.map_bounds.max_x);
    }
}
