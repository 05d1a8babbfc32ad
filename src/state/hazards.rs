//! Moving obstacles and the hit counter that can end a session.

use std::f64::consts::PI;

use crate::model::{Point, Rect, Size};

use super::dice::Dice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Lives for the whole session, drifting back and forth forever.
    Persistent,
    /// Crosses once and is removed when its animation ends.
    Transient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Looping {
    Once,
    PingPong,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub from: Point,
    pub to: Point,
    pub started_at: f64,
    pub duration_ms: f64,
    pub looping: Looping,
}

impl Motion {
    /// Eased progress along the path at `now`, in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        let t = if self.duration_ms <= 0.0 { 1.0 } else { ((now - self.started_at) / self.duration_ms).max(0.0) };
        let t = match self.looping {
            Looping::Once => t.min(1.0),
            Looping::PingPong => {
                let phase = t % 2.0;
                if phase <= 1.0 { phase } else { 2.0 - phase }
            }
        };
        0.5 - 0.5 * (PI * t).cos()
    }

    pub fn position_at(&self, now: f64) -> Point {
        let k = self.progress(now);
        Point::new(self.from.x + (self.to.x - self.from.x) * k, self.from.y + (self.to.y - self.from.y) * k)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub motion: Motion,
    pub size: Size,
}

impl Obstacle {
    pub fn rect_at(&self, now: f64) -> Rect {
        Rect::at(self.motion.position_at(now), self.size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    Clear,
    /// A hit was registered; `hits` is the new count.
    Hit { hits: u32 },
    /// The hit that reached the limit. The field halts afterwards.
    Fatal { hits: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HazardField {
    pub obstacles: Vec<Obstacle>,
    pub hits: u32,
    pub last_hit_at: Option<f64>,
    pub warning: bool,
    hit_limit: u32,
    cooldown_ms: f64,
    halted: bool,
    next_id: u32,
}

impl HazardField {
    pub fn new(hit_limit: u32, cooldown_ms: f64) -> Self {
        Self {
            obstacles: Vec::new(),
            hits: 0,
            last_hit_at: None,
            warning: false,
            hit_limit: hit_limit.max(1),
            cooldown_ms,
            halted: false,
            next_id: 0,
        }
    }

    pub fn hit_limit(&self) -> u32 {
        self.hit_limit
    }

    fn push(&mut self, kind: ObstacleKind, motion: Motion, size: Size) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle { id, kind, motion, size });
        id
    }

    fn point_in(area: &Rect, size: Size, dice: &mut Dice) -> Point {
        Point::new(
            dice.range(area.x, (area.right() - size.width).max(area.x)),
            dice.range(area.y, (area.bottom() - size.height).max(area.y)),
        )
    }

    /// Spawn `count` looping obstacles wandering between two random points
    /// of `cluster`.
    pub fn spawn_persistent(&mut self, count: usize, cluster: &Rect, size: Size, duration_ms: f64, now: f64, dice: &mut Dice) {
        for _ in 0..count {
            let from = Self::point_in(cluster, size, dice);
            let to = Self::point_in(cluster, size, dice);
            let motion = Motion { from, to, started_at: now, duration_ms, looping: Looping::PingPong };
            self.push(ObstacleKind::Persistent, motion, size);
        }
    }

    /// Spawn one obstacle somewhere in `area` drifting sideways once.
    pub fn spawn_transient(&mut self, area: &Rect, size: Size, max_dx: f64, duration_ms: f64, now: f64, dice: &mut Dice) -> u32 {
        let from = Self::point_in(area, size, dice);
        let dx = dice.range(-max_dx, max_dx);
        let to = Point::new(from.x + dx, from.y);
        let motion = Motion { from, to, started_at: now, duration_ms, looping: Looping::Once };
        self.push(ObstacleKind::Transient, motion, size)
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.id != id);
        self.obstacles.len() != before
    }

    pub fn clear_transients(&mut self) {
        self.obstacles.retain(|o| o.kind == ObstacleKind::Persistent);
    }

    /// Test the dragged piece against the persistent obstacles.
    pub fn check_hit(&mut self, piece: &Rect, now: f64) -> HitOutcome {
        if self.halted {
            return HitOutcome::Clear;
        }
        let touching = self
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Persistent)
            .any(|o| o.rect_at(now).intersects(piece));
        if !touching {
            return HitOutcome::Clear;
        }
        if let Some(last) = self.last_hit_at {
            if now - last <= self.cooldown_ms {
                return HitOutcome::Clear;
            }
        }
        self.hits += 1;
        self.last_hit_at = Some(now);
        self.warning = true;
        if self.hits >= self.hit_limit {
            self.halted = true;
            HitOutcome::Fatal { hits: self.hits }
        } else {
            HitOutcome::Hit { hits: self.hits }
        }
    }

    /// Stop registering hits, e.g. once the session is over.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Whether the dragged piece should show hit feedback at `now`.
    pub fn flashing(&self, now: f64, flash_ms: f64) -> bool {
        self.last_hit_at.is_some_and(|t| now - t < flash_ms)
    }
}
