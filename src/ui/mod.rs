pub mod hud;

pub use hud::{apply_event, CountdownBand, HudSink, HudState, LogHud};
