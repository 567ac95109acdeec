mod box_renderer;
pub mod error;
mod gpu_state;

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use winit::event_loop::EventLoop;

use crate::app::AppContext;
use crate::config::EngineConfig;
use crate::ui::LogHud;

pub use box_renderer::{collect_instances, hsl_to_rgb, BoxInstance, BoxRenderer};
pub use gpu_state::{build_window, run_app, GpuState, StartRequest};

#[cfg(not(target_arch = "wasm32"))]
/// Native entry point: open the window and run until it is closed.
/// HUD updates go to the log; Enter starts a round.
pub fn run(event_loop: EventLoop<()>, config: EngineConfig, ctx: AppContext) -> Result<()> {
    log::info!("[renderer::run] Starting renderer initialization");
    log::debug!("[renderer::run] Config: {:?}", config);

    let window = build_window(&event_loop, &config)?;
    let start_request: StartRequest = Rc::new(Cell::new(false));

    let result = pollster::block_on(run_app(
        event_loop,
        window,
        ctx,
        LogHud::new(),
        start_request,
    ));

    match &result {
        Ok(_) => log::info!("[renderer::run] Event loop finished"),
        Err(e) => log::error!("[renderer::run] Renderer failed: {}", e),
    }
    result
}
