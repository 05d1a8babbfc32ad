//! Session bookkeeping: the pausable clock and the pool of rounds still to play.

use crate::catalog::RoundImage;

use super::dice::Dice;

/// Elapsed play time that only advances while running.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionClock {
    accumulated_ms: f64,
    started_at: Option<f64>,
}

impl SessionClock {
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start or continue timing from `now`. No-op while already running.
    pub fn resume(&mut self, now: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Fold the live interval into the total. No-op while paused.
    pub fn pause(&mut self, now: f64) {
        if let Some(start) = self.started_at.take() {
            self.accumulated_ms += (now - start).max(0.0);
        }
    }

    pub fn elapsed_ms(&self, now: f64) -> f64 {
        self.accumulated_ms + self.started_at.map_or(0.0, |start| (now - start).max(0.0))
    }

    pub fn elapsed_secs(&self, now: f64) -> u64 {
        (self.elapsed_ms(now) / 1000.0).floor() as u64
    }
}

/// Round images not yet played. Each draw removes one at a uniformly random
/// index, so no image repeats within a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoundPool {
    remaining: Vec<RoundImage>,
}

impl RoundPool {
    pub fn new(images: Vec<RoundImage>) -> Self {
        Self { remaining: images }
    }

    pub fn draw(&mut self, dice: &mut Dice) -> Option<RoundImage> {
        if self.remaining.is_empty() {
            return None;
        }
        let i = dice.index(self.remaining.len());
        Some(self.remaining.remove(i))
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
