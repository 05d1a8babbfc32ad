//! Cascaded exponential moving average for the rendered pointer.
//!
//! Each stage applies `s += alpha * (v - s)`. A second stage over the first
//! one's output trades more lag for a steadier pointer. Stages start at the
//! origin and converge within the first second of tracking.

use crate::model::{Point, Rect, Size};

#[derive(Clone, Debug, PartialEq)]
pub struct PointerSmoother {
    alpha: f64,
    passes: u8,
    stages: [Point; 2],
}

impl PointerSmoother {
    pub fn new(alpha: f64, passes: u8) -> Self {
        Self { alpha: alpha.clamp(f64::EPSILON, 1.0), passes: passes.clamp(1, 2), stages: [Point::default(); 2] }
    }

    /// Feed one mapped point and return the smoothed one, re-clipped to
    /// `bounds` because the lagging value can trail outside them.
    pub fn update(&mut self, v: Point, bounds: &Rect, elem: Size) -> Point {
        let mut input = v;
        for stage in self.stages.iter_mut().take(self.passes as usize) {
            stage.x += self.alpha * (input.x - stage.x);
            stage.y += self.alpha * (input.y - stage.y);
            input = *stage;
        }
        let out = bounds.clamp_point(input, elem);
        self.stages[self.passes as usize - 1] = out;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    const DOT: Size = Size::new(0.0, 0.0);

    fn within_pct(a: Point, b: Point, pct: f64) -> bool {
        (a.x - b.x).abs() <= b.x.abs() * pct && (a.y - b.y).abs() <= b.y.abs() * pct
    }

    #[test]
    fn single_pass_is_one_ema_step() {
        let mut s = PointerSmoother::new(0.5, 1);
        let p = s.update(Point::new(100.0, 40.0), &BOUNDS, DOT);
        assert_eq!(p, Point::new(50.0, 20.0));
        let p = s.update(Point::new(100.0, 40.0), &BOUNDS, DOT);
        assert_eq!(p, Point::new(75.0, 30.0));
    }

    #[test]
    fn cascaded_output_lags_single_pass() {
        let target = Point::new(800.0, 600.0);
        let mut one = PointerSmoother::new(0.08, 1);
        let mut two = PointerSmoother::new(0.08, 2);
        let (mut a, mut b) = (Point::default(), Point::default());
        for _ in 0..10 {
            a = one.update(target, &BOUNDS, DOT);
            b = two.update(target, &BOUNDS, DOT);
        }
        assert!(b.x < a.x);
        assert!(b.y < a.y);
    }

    #[test]
    fn converges_to_held_position() {
        let target = Point::new(800.0, 600.0);
        let mut one = PointerSmoother::new(0.08, 1);
        let mut p = Point::default();
        for _ in 0..60 {
            p = one.update(target, &BOUNDS, DOT);
        }
        assert!(within_pct(p, target, 0.01));

        let mut two = PointerSmoother::new(0.08, 2);
        for _ in 0..100 {
            p = two.update(target, &BOUNDS, DOT);
        }
        assert!(within_pct(p, target, 0.01), "{:?}", p);
    }

    #[test]
    fn output_is_reclipped() {
        let mut s = PointerSmoother::new(1.0, 2);
        let p = s.update(Point::new(1910.0, 1075.0), &BOUNDS, Size::new(32.0, 32.0));
        assert_eq!(p, Point::new(1888.0, 1048.0));
    }
}
