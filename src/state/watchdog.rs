/// Inactivity countdown that only runs while a round is in play.
#[derive(Clone, Debug, PartialEq)]
pub struct IdleWatchdog {
    timeout_ms: f64,
    deadline: Option<f64>,
}

impl IdleWatchdog {
    pub fn new(timeout_ms: f64) -> Self {
        Self { timeout_ms, deadline: None }
    }

    pub fn arm(&mut self, now: f64) {
        self.deadline = Some(now + self.timeout_ms);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Any interaction pushes the deadline out. Ignored while disarmed.
    pub fn touch(&mut self, now: f64) {
        if self.deadline.is_some() {
            self.deadline = Some(now + self.timeout_ms);
        }
    }

    /// True exactly once when the deadline has passed; the watchdog disarms
    /// itself when it fires.
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_silence() {
        let mut w = IdleWatchdog::new(10_000.0);
        w.arm(0.0);
        assert!(!w.poll(9_999.0));
        assert!(w.poll(10_000.0));
        assert!(!w.poll(20_000.0));
        assert_eq!(w.deadline(), None);
    }

    #[test]
    fn touch_resets_the_countdown() {
        let mut w = IdleWatchdog::new(10_000.0);
        w.arm(0.0);
        w.touch(8_000.0);
        assert!(!w.poll(12_000.0));
        assert!(w.poll(18_000.0));
    }

    #[test]
    fn disarmed_watchdog_stays_quiet() {
        let mut w = IdleWatchdog::new(10_000.0);
        w.touch(0.0);
        assert!(!w.poll(1e9));
        w.arm(0.0);
        w.disarm();
        assert!(!w.poll(1e9));
    }
}
