//! Frame clock and fixed-interval ticker
//!
//! Game code never reads the wall clock itself; the loop samples a `Clock`
//! once and passes `now` (seconds) down, which keeps every update function
//! deterministic under test.

/// Monotonic seconds since construction
#[derive(Debug, Clone)]
pub struct Clock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    origin_ms: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
            #[cfg(target_arch = "wasm32")]
            origin_ms: performance_now_ms(),
        }
    }

    /// Seconds elapsed since the clock was created
    #[cfg(not(target_arch = "wasm32"))]
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// Seconds elapsed since the clock was created
    #[cfg(target_arch = "wasm32")]
    pub fn now(&self) -> f64 {
        (performance_now_ms() - self.origin_ms) / 1000.0
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn performance_now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Periodic timer polled from the event loop.
///
/// Stands in for an interval callback: `poll` returns true at most once per
/// interval while running. Missed intervals are not replayed.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: f64,
    next_fire: Option<f64>,
}

impl Ticker {
    pub fn new(interval_seconds: f32) -> Self {
        Self {
            interval: interval_seconds as f64,
            next_fire: None,
        }
    }

    pub fn start(&mut self, now: f64) {
        self.next_fire = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_fire.is_some()
    }

    /// True when an interval boundary has been crossed since the last fire
    pub fn poll(&mut self, now: f64) -> bool {
        match self.next_fire {
            Some(due) if now >= due => {
                // Skip any intervals the loop slept through
                let missed = ((now - due) / self.interval).floor();
                self.next_fire = Some(due + (missed + 1.0) * self.interval);
                true
            }
            _ => false,
        }
    }
}
