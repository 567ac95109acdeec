/// Ball Hunt desktop executable
/// Arrow keys move the robot, W/Space and S change height, Enter starts a round

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_hunt::{Engine, EngineConfig};

    #[cfg(feature = "native")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = EngineConfig::resolve_path();
    let config = match EngineConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let mut engine = match Engine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Failed to create engine: {}", e);
            std::process::exit(1);
        }
    };
    engine.load_assets();

    if let Err(e) = engine.run() {
        log::error!("Engine error: {}", e);
        std::process::exit(1);
    }
}

// The browser build starts from `ball_hunt::web::start`
#[cfg(target_arch = "wasm32")]
fn main() {}
