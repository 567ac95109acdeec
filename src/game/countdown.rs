/// Round timer measured against the frame clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    pub started_at: f64,
    /// Round length in seconds
    pub duration: f32,
}

impl Countdown {
    pub fn new(started_at: f64, duration: f32) -> Self {
        Self {
            started_at,
            duration,
        }
    }

    /// Seconds left, never negative
    pub fn remaining(&self, now: f64) -> f32 {
        let elapsed = (now - self.started_at).max(0.0);
        (self.duration as f64 - elapsed).max(0.0) as f32
    }

    pub fn expired(&self, now: f64) -> bool {
        self.remaining(now) <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_counts_down_to_zero() {
        let countdown = Countdown::new(100.0, 10.0);
        assert_eq!(countdown.remaining(100.0), 10.0);
        assert_eq!(countdown.remaining(104.0), 6.0);
        assert_eq!(countdown.remaining(125.0), 0.0);
    }

    #[test]
    fn expires_exactly_at_duration() {
        let countdown = Countdown::new(0.0, 10.0);
        assert!(!countdown.expired(9.99));
        assert!(countdown.expired(10.0));
    }

    #[test]
    fn clock_before_start_reads_full_duration() {
        let countdown = Countdown::new(5.0, 10.0);
        assert_eq!(countdown.remaining(4.0), 10.0);
    }
}
