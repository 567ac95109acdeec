//! Browser shell.
//!
//! Everything here only exists on wasm32: the page supplies the canvas
//! container, the start button and the HUD elements, and models are fetched
//! over HTTP relative to the page.

mod dom;
mod fetch;

pub use dom::{attach_canvas, bind_start_button, DomHud};
pub use fetch::FetchSource;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use winit::event_loop::EventLoop;

use crate::app::AppContext;
use crate::assets::load_scene_models;
use crate::config::EngineConfig;
use crate::renderer::{build_window, run_app, StartRequest};

/// Web-specific error type
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("missing DOM element: {0}")]
    MissingElement(String),

    #[error("fetch of {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("JavaScript error: {0}")]
    JsError(String),
}

impl From<WebError> for crate::error::EngineError {
    fn from(err: WebError) -> Self {
        crate::error::EngineError::SystemError {
            component: "web".to_string(),
            error: err.to_string(),
        }
    }
}

/// wasm entry point, run when the module is instantiated
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console_log already set: {}", e).into());
    }

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run_web().await {
            log::error!("[web::start] {}", e);
        }
    });
}

/// Load the scene, hook up the page and hand control to the event loop
pub async fn run_web() -> anyhow::Result<()> {
    log::info!("[web::run_web] Ball Hunt starting");
    let config = EngineConfig::default();

    let event_loop = EventLoop::new()?;
    let window = build_window(&event_loop, &config)?;

    let mut ctx = AppContext::new(&config);
    let source = FetchSource::new(config.asset_root.to_string_lossy());
    let (map, robot) = load_scene_models(&source, &config.map_model, &config.robot_model).await;
    match map {
        Ok(model) => ctx.install_map(&model),
        Err(e) => log::error!("[web::run_web] Map failed to load: {}", e),
    }
    match robot {
        Ok(model) => ctx.install_robot(&model),
        Err(e) => log::error!("[web::run_web] Robot failed to load: {}", e),
    }

    let start_request: StartRequest = Rc::new(Cell::new(false));
    bind_start_button(start_request.clone())?;
    let hud = DomHud::from_document()?;

    run_app(event_loop, window, ctx, hud, start_request).await
}
