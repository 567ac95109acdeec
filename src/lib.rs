pub mod app;
pub mod assets;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod input;
pub mod motion;
pub mod physics;
pub mod renderer;
pub mod scene;
pub mod time;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

use anyhow::Result;
use winit::event_loop::EventLoop;
#[cfg(target_os = "linux")]
use winit::event_loop::EventLoopBuilder;

pub use app::AppContext;
pub use assets::{load_model, load_scene_models, AssetSource, FileSource, ModelData};
pub use config::{EngineConfig, Tuning};
pub use error::{EngineError, EngineResult};
pub use game::{GameError, GameEvent, GameResult, GameSession, GameState};
pub use input::{InputState, KeyCode, MovementKeys};
pub use motion::{integrate_motion, MotionState, Transform};
pub use physics::{spheres_overlap, AABB};
pub use scene::{MapBounds, Robot};

/// Main engine struct that owns the event loop and the frame state
pub struct Engine {
    config: EngineConfig,
    event_loop: Option<EventLoop<()>>,
    ctx: AppContext,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        // Force X11 backend for WSL compatibility
        #[cfg(target_os = "linux")]
        let event_loop = {
            use winit::platform::x11::EventLoopBuilderExtX11;
            EventLoopBuilder::new().with_x11().build()?
        };

        #[cfg(not(target_os = "linux"))]
        let event_loop = EventLoop::new()?;

        let ctx = AppContext::new(&config);
        Ok(Self {
            config,
            event_loop: Some(event_loop),
            ctx,
        })
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Load the map and the robot from `asset_root`. A model that fails to
    /// load is logged and left out of the scene; the game keeps running.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_assets(&mut self) {
        let source = FileSource::new(&self.config.asset_root);
        let (map, robot) = pollster::block_on(load_scene_models(
            &source,
            &self.config.map_model,
            &self.config.robot_model,
        ));

        match map {
            Ok(model) => self.ctx.install_map(&model),
            Err(e) => log::error!("[Engine::load_assets] Map failed to load: {}", e),
        }
        match robot {
            Ok(model) => self.ctx.install_robot(&model),
            Err(e) => log::error!("[Engine::load_assets] Robot failed to load: {}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(mut self) -> Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already taken"))?;
        renderer::run(event_loop, self.config, self.ctx)
    }
}
