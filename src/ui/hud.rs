//! Countdown panel and result banner.
//!
//! `HudState` is what the player should see; it is rebuilt from
//! `GameEvent`s and pushed to a `HudSink`. Sinks are dumb: the log sink on
//! native builds, the DOM sink in the browser.

use crate::constants::game;
use crate::game::{GameEvent, GameResult};

/// Colour band of the countdown bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownBand {
    Safe,
    Warning,
    Danger,
}

impl CountdownBand {
    pub fn for_remaining(remaining: f32) -> Self {
        if remaining <= game::DANGER_THRESHOLD {
            CountdownBand::Danger
        } else if remaining <= game::WARNING_THRESHOLD {
            CountdownBand::Warning
        } else {
            CountdownBand::Safe
        }
    }

    /// CSS background for the progress bar
    pub fn css_gradient(&self) -> &'static str {
        match self {
            CountdownBand::Safe => "linear-gradient(90deg, #4ade80, #22c55e)",
            CountdownBand::Warning => "linear-gradient(90deg, #f59e0b, #d97706)",
            CountdownBand::Danger => "linear-gradient(90deg, #ef4444, #dc2626)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    pub countdown_visible: bool,
    /// Whole seconds shown to the player (rounded up)
    pub seconds: u32,
    pub progress_percent: f32,
    pub band: CountdownBand,
    pub result: Option<GameResult>,
    /// Round length the progress bar is measured against
    pub round_duration: f32,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            countdown_visible: false,
            seconds: 0,
            progress_percent: 0.0,
            band: CountdownBand::Safe,
            result: None,
            round_duration: game::ROUND_DURATION,
        }
    }
}

impl HudState {
    fn show_remaining(&mut self, remaining: f32) {
        let remaining = remaining.max(0.0);
        self.seconds = remaining.ceil() as u32;
        self.progress_percent = (remaining / self.round_duration * 100.0).clamp(0.0, 100.0);
        self.band = CountdownBand::for_remaining(remaining);
    }

    /// Banner text for the current result
    pub fn result_text(&self) -> Option<&'static str> {
        self.result.map(|result| match result {
            GameResult::Clear => "CLEAR!",
            GameResult::Failed => "FAILED...",
        })
    }

    /// CSS class used by the result banner
    pub fn result_class(&self) -> Option<&'static str> {
        self.result.map(|result| match result {
            GameResult::Clear => "clear",
            GameResult::Failed => "failed",
        })
    }
}

/// Fold a game event into the HUD
pub fn apply_event(hud: &mut HudState, event: &GameEvent) {
    match *event {
        GameEvent::Started { duration, .. } => {
            hud.round_duration = duration;
            hud.countdown_visible = true;
            hud.result = None;
            hud.show_remaining(duration);
        }
        GameEvent::Countdown { remaining } => hud.show_remaining(remaining),
        GameEvent::Ended(result) => {
            // The panel stays up next to the banner until the reset
            hud.result = Some(result);
        }
        GameEvent::Reset => {
            hud.countdown_visible = false;
            hud.result = None;
        }
    }
}

/// Opaque destination for HUD updates
pub trait HudSink {
    fn present(&mut self, hud: &HudState);
}

/// Sink that reports HUD changes through the logger
#[derive(Debug, Default)]
pub struct LogHud {
    last: Option<HudState>,
}

impl LogHud {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HudSink for LogHud {
    fn present(&mut self, hud: &HudState) {
        let changed = match &self.last {
            Some(last) => {
                last.seconds != hud.seconds
                    || last.result != hud.result
                    || last.countdown_visible != hud.countdown_visible
            }
            None => true,
        };
        if !changed {
            return;
        }

        if let Some(text) = hud.result_text() {
            log::info!("[hud] {}", text);
        } else if hud.countdown_visible {
            log::info!("[hud] {}s left ({:?})", hud.seconds, hud.band);
        } else {
            log::info!("[hud] Press Enter to start");
        }
        self.last = Some(hud.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(CountdownBand::for_remaining(10.0), CountdownBand::Safe);
        assert_eq!(CountdownBand::for_remaining(6.01), CountdownBand::Safe);
        assert_eq!(CountdownBand::for_remaining(6.0), CountdownBand::Warning);
        assert_eq!(CountdownBand::for_remaining(3.01), CountdownBand::Warning);
        assert_eq!(CountdownBand::for_remaining(3.0), CountdownBand::Danger);
        assert_eq!(CountdownBand::for_remaining(0.0), CountdownBand::Danger);
    }

    #[test]
    fn countdown_rounds_seconds_up() {
        let mut hud = HudState::default();
        apply_event(&mut hud, &GameEvent::Started { ball_position: Vec3::ZERO, duration: 10.0 });
        assert!(hud.countdown_visible);
        assert_eq!(hud.seconds, 10);
        assert_eq!(hud.progress_percent, 100.0);

        apply_event(&mut hud, &GameEvent::Countdown { remaining: 7.2 });
        assert_eq!(hud.seconds, 8);
        assert!((hud.progress_percent - 72.0).abs() < 1e-4);
        assert_eq!(hud.band, CountdownBand::Safe);

        apply_event(&mut hud, &GameEvent::Countdown { remaining: 5.2 });
        assert_eq!(hud.seconds, 6);
        assert_eq!(hud.band, CountdownBand::Warning);
    }

    #[test]
    fn result_banner_lifecycle() {
        let mut hud = HudState::default();
        apply_event(&mut hud, &GameEvent::Started { ball_position: Vec3::ZERO, duration: 10.0 });
        apply_event(&mut hud, &GameEvent::Ended(GameResult::Failed));
        assert_eq!(hud.result_text(), Some("FAILED..."));
        assert_eq!(hud.result_class(), Some("failed"));
        assert!(hud.countdown_visible);

        apply_event(&mut hud, &GameEvent::Reset);
        assert_eq!(hud.result_text(), None);
        assert!(!hud.countdown_visible);
    }
}
