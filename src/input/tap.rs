//! Air-tap detection: a quick downward flick of the fingertip stands in for a
//! click, since the hand has no button.

use crate::config::TapConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct TapDetector {
    threshold_px: f64,
    cooldown_ms: f64,
    last_y: Option<f64>,
    /// Activations are suppressed until this time.
    quiet_until: f64,
}

impl TapDetector {
    pub fn new(threshold_px: f64, cooldown_ms: f64) -> Self {
        Self { threshold_px, cooldown_ms, last_y: None, quiet_until: f64::NEG_INFINITY }
    }

    pub fn from_config(cfg: &TapConfig) -> Self {
        Self::new(cfg.threshold_px, cfg.cooldown_ms)
    }

    /// Feed the raw (unsmoothed) mapped `y` of this tick. Returns true when
    /// this tick is an activation.
    pub fn update(&mut self, y: f64, now_ms: f64) -> bool {
        let fired = match self.last_y {
            Some(prev) => now_ms >= self.quiet_until && y - prev > self.threshold_px,
            None => false,
        };
        if fired {
            self.quiet_until = now_ms + self.cooldown_ms;
        }
        self.last_y = Some(y);
        fired
    }
}
