//! The interaction engine.
//!
//! [`GameState`] is the single owner of everything that changes while
//! playing: pointer, board, hazards, session clock, round pool, idle watchdog
//! and the queue of delayed tasks. The yew shell feeds it [`GameAction`]s
//! through `use_reducer` and renders what it observes; one-shot side effects
//! (sounds, confetti, DOM clicks, session signals) leave through a sequenced
//! outbox of [`GameEvent`]s. Nothing in here touches the DOM, so every path
//! runs under plain `cargo test`.
//!
//! Within one frame the order is fixed: pointer and tap first, then tracking,
//! then the hazard check, then the placement check. Round completion happens
//! on the delayed selection that follows the last placement.

use std::collections::VecDeque;
use std::rc::Rc;

use yew::Reducible;

use crate::catalog::{self, RoundImage};
use crate::config::{DragSource, GameConfig, PickupMode};
use crate::error::GameError;
use crate::input::{CoordinateMapper, HandSample, PointerSmoother, TapDetector};
use crate::model::{CellId, GridDims, Layout, LossReason, Outcome, Point, Rect, Size};
use crate::state::{
    Board, Dice, HazardField, HitOutcome, IdleWatchdog, ObstacleKind, PlacementCheck, RoundPool, Scheduler, Selection,
    SessionClock, Task,
};

const EVENT_BACKLOG: usize = 64;
/// How long the dragged piece shows hit feedback.
pub const HIT_FLASH_MS: f64 = 400.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    /// Start menu; nothing is timed.
    Menu,
    /// The recognizer could not be created. Only a reload retries.
    Unavailable(String),
    Playing,
    /// Informational overlay between rounds; the clock is paused.
    Interlude { round: RoundImage, fact: String },
    /// Inactivity notice shown before the forced restart.
    IdleStopped,
    Over(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Place,
    WrongCell,
    Hit,
    Win,
    Fail,
    Confetti,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    GameStarted,
    GameEnded(Outcome),
    /// Air tap or Space at the pointer position.
    Activation(Point),
    RoundStarted(RoundImage),
    RoundCompleted(RoundImage),
    HazardHit { hits: u32 },
    IdleStopped,
    Cue(Cue),
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameAction {
    Resize { width: f64, height: f64 },
    Start { now: f64 },
    RecognizerFailed { reason: String },
    /// One recognizer result for a new video frame.
    Frame { sample: HandSample, now: f64 },
    /// Clock tick without a new frame; runs due tasks.
    Advance { now: f64 },
    /// Space bar: an activation and an interaction.
    Key { now: f64 },
    Touch { now: f64 },
    /// Any other external "someone is here" signal.
    Interaction { now: f64 },
    AssetFailed { slug: String, now: f64 },
    Restart { now: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Bumped on every reduce; components key effects on it.
    pub version: u64,
    pub session_id: u32,
    pub config: GameConfig,
    pub layout: Layout,
    pub phase: Phase,
    /// Latest time seen by the engine (ms).
    pub now: f64,
    /// Smoothed pointer, always inside the viewport.
    pub pointer: Point,
    pub hand_visible: bool,
    pub board: Option<Board>,
    pub round: Option<RoundImage>,
    pub hazards: HazardField,
    pub clock: SessionClock,
    pub score: i64,
    pub rounds_completed: u32,
    /// Whole seconds shown by the HUD; refreshed by the 1 Hz display tick.
    pub display_secs: u64,
    /// In activation pickup mode: the next piece waits for a tap.
    pub pickup_armed: bool,
    rounds: Vec<RoundImage>,
    pool: RoundPool,
    mapper: CoordinateMapper,
    smoother: PointerSmoother,
    tap: TapDetector,
    watchdog: IdleWatchdog,
    scheduler: Scheduler,
    dice: Dice,
    events: VecDeque<(u64, GameEvent)>,
    last_event: u64,
}

impl GameState {
    pub fn new(config: GameConfig, rounds: Vec<RoundImage>, seed: u64, viewport: Size) -> Self {
        let dims = GridDims::new(config.placement.rows, config.placement.cols);
        let layout = Layout::compute(viewport, dims);
        Self {
            version: 0,
            session_id: 0,
            layout,
            phase: Phase::Menu,
            now: 0.0,
            pointer: layout.viewport.center(),
            hand_visible: false,
            board: None,
            round: None,
            hazards: HazardField::new(config.hazards.hit_limit, config.hazards.hit_cooldown_ms),
            clock: SessionClock::default(),
            score: 0,
            rounds_completed: 0,
            display_secs: 0,
            pickup_armed: false,
            pool: RoundPool::new(rounds.clone()),
            rounds,
            mapper: CoordinateMapper::from_config(&config.pointer),
            smoother: PointerSmoother::new(config.pointer.smoothing_alpha, config.pointer.smoothing_passes),
            tap: TapDetector::from_config(&config.tap),
            watchdog: IdleWatchdog::new(config.idle.timeout_ms),
            scheduler: Scheduler::default(),
            dice: Dice::new(seed),
            events: VecDeque::new(),
            last_event: 0,
            config,
        }
    }

    pub fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::Resize { width, height } => self.resize(Size::new(width, height)),
            GameAction::Start { now } => {
                self.advance(now);
                self.start(now);
            }
            GameAction::RecognizerFailed { reason } => {
                log::error!("session unavailable: {reason}");
                self.make_unavailable(reason);
            }
            GameAction::Frame { sample, now } => {
                self.advance(now);
                self.on_frame(&sample, now);
            }
            GameAction::Advance { now } => self.advance(now),
            GameAction::Key { now } => {
                self.advance(now);
                self.touch(now);
                self.activate();
            }
            GameAction::Touch { now } | GameAction::Interaction { now } => {
                self.advance(now);
                self.touch(now);
            }
            GameAction::AssetFailed { slug, now } => {
                self.advance(now);
                self.asset_failed(&slug, now);
            }
            GameAction::Restart { now } => {
                self.now = self.now.max(now);
                log::info!("session {} restarted", self.session_id);
                self.reset_session();
            }
        }
    }

    // ---------------- Observers -----------------

    pub fn dims(&self) -> GridDims {
        GridDims::new(self.config.placement.rows, self.config.placement.cols)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn progress(&self) -> f64 {
        self.board.as_ref().map_or(0.0, Board::progress)
    }

    pub fn cursor_size(&self) -> Size {
        Size::new(self.config.pointer.cursor_width, self.config.pointer.cursor_height)
    }

    pub fn obstacle_rects(&self) -> Vec<(u32, ObstacleKind, Rect)> {
        self.hazards.obstacles.iter().map(|o| (o.id, o.kind, o.rect_at(self.now))).collect()
    }

    pub fn hit_flash(&self) -> bool {
        self.hazards.flashing(self.now, HIT_FLASH_MS)
    }

    #[cfg(test)]
    fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Events with a sequence number above `seq`, oldest first.
    pub fn events_after(&self, seq: u64) -> impl Iterator<Item = &(u64, GameEvent)> {
        self.events.iter().filter(move |(n, _)| *n > seq)
    }

    // ---------------- Clock & tasks -----------------

    /// Run everything due at or before `now`, idle expiry included, in
    /// deadline order.
    pub fn advance(&mut self, now: f64) {
        loop {
            let task_due = self.scheduler.next_due().filter(|&d| d <= now);
            let idle_due = if self.is_running() { self.watchdog.deadline().filter(|&d| d <= now) } else { None };
            if let Some(idle) = idle_due {
                if task_due.is_none_or(|t| idle < t) {
                    self.now = self.now.max(idle);
                    self.idle_expired(idle);
                    continue;
                }
            }
            let Some((due, task)) = self.scheduler.pop_due(now) else {
                break;
            };
            self.now = self.now.max(due);
            self.run_task(task, due);
        }
        self.now = self.now.max(now);
    }

    fn run_task(&mut self, task: Task, at: f64) {
        match task {
            Task::SelectNextPiece => self.select_next(at),
            Task::ClearWrongCellGuard => {
                if let Some(board) = self.board.as_mut() {
                    board.clear_wrong_guard();
                }
            }
            Task::DismissWarning => self.hazards.warning = false,
            Task::SpawnTransient => {
                self.spawn_transient(at);
                self.scheduler.schedule(at + self.config.hazards.transient_interval_ms, Task::SpawnTransient);
            }
            Task::ExpireObstacle(id) => {
                self.hazards.remove(id);
            }
            Task::DisplayTick => {
                self.display_secs = self.clock.elapsed_secs(at);
                self.scheduler.schedule(at + self.config.session.display_tick_ms, Task::DisplayTick);
            }
            Task::EndInterlude => self.end_interlude(at),
            Task::ForcedRestart => {
                log::info!("forced restart after inactivity");
                self.reset_session();
            }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.last_event += 1;
        self.events.push_back((self.last_event, event));
        while self.events.len() > EVENT_BACKLOG {
            self.events.pop_front();
        }
    }

    fn touch(&mut self, now: f64) {
        if self.is_running() {
            self.watchdog.touch(now);
        }
    }

    // ---------------- Pointer pipeline -----------------

    fn on_frame(&mut self, sample: &HandSample, now: f64) {
        if matches!(self.phase, Phase::Unavailable(_)) {
            return;
        }
        let Some(mapped) = sample.fingertip_point().and_then(|tip| self.mapper.map(tip, &self.layout)) else {
            self.hand_visible = false;
            return;
        };
        let cursor = self.cursor_size();
        let raw = self.mapper.clip(mapped, cursor, &self.layout);
        self.hand_visible = true;
        self.pointer = self.smoother.update(raw, &self.layout.viewport, cursor);
        self.touch(now);
        if self.tap.update(raw.y, now) {
            self.activate();
        }
        let drag = match self.config.pointer.drag_source {
            DragSource::Raw => raw,
            DragSource::Smoothed => self.pointer,
        };
        if self.is_running() {
            self.drag_tick(drag, now);
        }
    }

    fn activate(&mut self) {
        self.emit(GameEvent::Activation(self.pointer));
        if self.is_running() && self.pickup_armed {
            self.pickup_armed = false;
            self.activate_next();
        }
    }

    fn drag_tick(&mut self, drag: Point, now: f64) {
        let piece_rect = match self.board.as_mut() {
            Some(board) if board.active.is_some() => {
                board.track(drag);
                board.active_piece().map(|p| p.rect())
            }
            _ => None,
        };
        let Some(piece_rect) = piece_rect else {
            return;
        };

        if self.config.hazards.enabled {
            match self.hazards.check_hit(&piece_rect, now) {
                HitOutcome::Clear => {}
                HitOutcome::Hit { hits } => {
                    log::info!("hazard hit {}/{}", hits, self.hazards.hit_limit());
                    self.emit(GameEvent::HazardHit { hits });
                    self.emit(GameEvent::Cue(Cue::Hit));
                    self.scheduler.cancel_task(&Task::DismissWarning);
                    self.scheduler.schedule(now + self.config.hazards.warning_ms, Task::DismissWarning);
                }
                HitOutcome::Fatal { hits } => {
                    self.emit(GameEvent::HazardHit { hits });
                    self.lose(LossReason::Hazards, now);
                    return;
                }
            }
        }

        let placement = &self.config.placement;
        let (containment, feedback) = (placement.containment, placement.wrong_cell_penalty > 0);
        let check = self.board.as_mut().map_or(PlacementCheck::Nothing, |b| b.check(containment, feedback));
        match check {
            PlacementCheck::Placed { piece, cell } => self.on_placed(piece, cell, now),
            PlacementCheck::WrongCell { cell } => self.on_wrong_cell(cell, now),
            PlacementCheck::Nothing => {}
        }
    }

    // ---------------- Placement -----------------

    fn staging(&self) -> Point {
        let p = &self.config.placement;
        self.layout.viewport.clamp_point(Point::new(p.staging_x, p.staging_y), self.layout.cell_size)
    }

    fn activate_next(&mut self) {
        if let Some(board) = self.board.as_mut() {
            if let Selection::Activated(i) = board.select_next() {
                log::debug!("piece {} active, target {}", i, board.pieces[i].target);
            }
        }
    }

    fn select_next(&mut self, at: f64) {
        if !self.is_running() {
            return;
        }
        let Some(board) = self.board.as_ref() else {
            return;
        };
        if board.active.is_some() {
            return;
        }
        if board.is_complete() {
            self.complete_round(at);
            return;
        }
        match self.config.placement.pickup {
            PickupMode::Auto => self.activate_next(),
            PickupMode::Activation => self.pickup_armed = true,
        }
    }

    fn on_placed(&mut self, piece: usize, cell: CellId, now: f64) {
        self.score += self.config.placement.score_increment;
        log::info!("piece {} placed in {}, score {}", piece, cell, self.score);
        self.emit(GameEvent::Cue(Cue::Place));
        if self.config.hazards.enabled && self.config.hazards.transient_on_place {
            self.spawn_transient(now);
        }
        self.scheduler.schedule(now + self.config.placement.snap_delay_ms, Task::SelectNextPiece);
    }

    fn on_wrong_cell(&mut self, cell: CellId, now: f64) {
        self.score = (self.score - self.config.placement.wrong_cell_penalty).max(0);
        log::debug!("wrong cell {}, score {}", cell, self.score);
        self.emit(GameEvent::Cue(Cue::WrongCell));
        self.scheduler.cancel_task(&Task::ClearWrongCellGuard);
        self.scheduler.schedule(now + self.config.placement.wrong_cell_guard_ms, Task::ClearWrongCellGuard);
    }

    // ---------------- Hazards -----------------

    fn spawn_transient(&mut self, now: f64) {
        let h = &self.config.hazards;
        let size = Size::new(h.obstacle_size, h.obstacle_size);
        let (max_dx, duration) = (h.transient_max_dx, h.transient_duration_ms);
        let area = self.layout.play_area;
        let id = self.hazards.spawn_transient(&area, size, max_dx, duration, now, &mut self.dice);
        self.scheduler.schedule(now + duration, Task::ExpireObstacle(id));
    }

    // ---------------- Session -----------------

    fn start(&mut self, now: f64) {
        if self.phase != Phase::Menu {
            return;
        }
        log::info!("session {} started with {} rounds", self.session_id, self.pool.len());
        self.emit(GameEvent::GameStarted);
        let h = &self.config.hazards;
        if h.enabled && h.persistent_count > 0 {
            let size = Size::new(h.obstacle_size, h.obstacle_size);
            let (count, duration) = (h.persistent_count, h.persistent_duration_ms);
            let cluster = self.layout.cluster;
            self.hazards.spawn_persistent(count, &cluster, size, duration, now, &mut self.dice);
        }
        self.next_round(now);
    }

    fn next_round(&mut self, now: f64) {
        let capped = self.config.session.max_rounds.is_some_and(|max| self.rounds_completed as usize >= max);
        let image = if capped { None } else { self.pool.draw(&mut self.dice) };
        match image {
            Some(image) => self.start_round(image, now),
            None if self.rounds_completed == 0 => {
                log::error!("{}", GameError::EmptyPool);
                self.lose(LossReason::Assets, now);
            }
            None => self.win(now),
        }
    }

    fn start_round(&mut self, image: RoundImage, now: f64) {
        let dims = self.dims();
        let targets = Board::assign_targets(dims, self.config.placement.target_policy, &mut self.dice);
        let board = match Board::new(dims, targets, &self.layout, self.staging()) {
            Ok(board) => board,
            Err(e) => {
                log::error!("cannot build round {}: {}", image.slug, e);
                self.next_round(now);
                return;
            }
        };
        log::info!("round {} started: {}", self.rounds_completed + 1, image.label);
        self.board = Some(board);
        self.round = Some(image.clone());
        self.phase = Phase::Playing;
        self.pickup_armed = false;
        self.clock.resume(now);
        self.display_secs = self.clock.elapsed_secs(now);
        self.scheduler.schedule(now + self.config.session.display_tick_ms, Task::DisplayTick);
        if self.config.hazards.enabled {
            self.scheduler.schedule(now + self.config.hazards.transient_interval_ms, Task::SpawnTransient);
        }
        self.watchdog.arm(now);
        self.emit(GameEvent::RoundStarted(image));
        match self.config.placement.pickup {
            PickupMode::Auto => self.activate_next(),
            PickupMode::Activation => self.pickup_armed = true,
        }
    }

    /// Stop the round's clock and every pending task.
    fn suspend_round(&mut self, now: f64) {
        log::debug!("suspending round, {} pending tasks dropped", self.scheduler.len());
        self.clock.pause(now);
        self.display_secs = self.clock.elapsed_secs(now);
        self.scheduler.clear();
        self.watchdog.disarm();
        self.hazards.clear_transients();
        self.hazards.warning = false;
        self.pickup_armed = false;
    }

    fn complete_round(&mut self, now: f64) {
        let Some(round) = self.round.clone() else {
            return;
        };
        self.suspend_round(now);
        self.rounds_completed += 1;
        log::info!("round {} complete: {} ({} left)", self.rounds_completed, round.label, self.pool.len());
        self.emit(GameEvent::RoundCompleted(round.clone()));
        self.emit(GameEvent::Cue(Cue::Confetti));
        let fact = catalog::fact_for(&round.slug).to_string();
        self.phase = Phase::Interlude { round, fact };
        self.scheduler.schedule(now + self.config.session.round_overlay_ms, Task::EndInterlude);
    }

    fn end_interlude(&mut self, at: f64) {
        if !matches!(self.phase, Phase::Interlude { .. }) {
            return;
        }
        self.board = None;
        self.round = None;
        self.next_round(at);
    }

    fn asset_failed(&mut self, slug: &str, now: f64) {
        let current = self.round.as_ref().is_some_and(|r| r.slug == slug);
        if !self.is_running() || !current {
            log::debug!("ignoring asset failure for {slug}");
            return;
        }
        log::warn!("{}, skipping round", GameError::AssetLoad { slug: slug.to_string() });
        self.suspend_round(now);
        self.board = None;
        self.round = None;
        self.next_round(now);
    }

    fn halt_session(&mut self, now: f64) {
        self.suspend_round(now);
        self.hazards.halt();
    }

    fn win(&mut self, now: f64) {
        self.halt_session(now);
        log::info!("session won in {} s with score {}", self.display_secs, self.score);
        self.phase = Phase::Over(Outcome::Won);
        self.emit(GameEvent::Cue(Cue::Win));
        self.emit(GameEvent::Cue(Cue::Confetti));
        self.emit(GameEvent::GameEnded(Outcome::Won));
    }

    fn lose(&mut self, reason: LossReason, now: f64) {
        self.halt_session(now);
        log::warn!("session lost ({:?}) after {} s", reason, self.display_secs);
        self.phase = Phase::Over(Outcome::Lost(reason));
        self.emit(GameEvent::Cue(Cue::Fail));
        self.emit(GameEvent::GameEnded(Outcome::Lost(reason)));
    }

    /// Terminal: whatever was running is torn down and nothing restarts it.
    fn make_unavailable(&mut self, reason: String) {
        if !matches!(self.phase, Phase::Menu | Phase::Unavailable(_)) {
            self.halt_session(self.now);
        }
        self.scheduler.clear();
        self.watchdog.disarm();
        self.board = None;
        self.round = None;
        self.hand_visible = false;
        self.phase = Phase::Unavailable(reason);
    }

    fn idle_expired(&mut self, at: f64) {
        if !self.watchdog.poll(at) || !self.is_running() {
            return;
        }
        log::warn!("no interaction for {} ms, stopping session", self.config.idle.timeout_ms);
        self.halt_session(at);
        self.phase = Phase::IdleStopped;
        self.emit(GameEvent::IdleStopped);
        self.emit(GameEvent::GameEnded(Outcome::Lost(LossReason::Idle)));
        self.scheduler.schedule(at + self.config.idle.restart_delay_ms, Task::ForcedRestart);
    }

    /// Throw the session away and go back to the start menu. Config, layout
    /// and the event outbox survive so observers keep their place.
    fn reset_session(&mut self) {
        let seed = self.dice.fork_seed();
        let mut fresh = GameState::new(self.config.clone(), self.rounds.clone(), seed, self.layout.viewport.size());
        fresh.version = self.version;
        fresh.session_id = self.session_id.wrapping_add(1);
        fresh.now = self.now;
        fresh.events = std::mem::take(&mut self.events);
        fresh.last_event = self.last_event;
        if let Phase::Unavailable(reason) = &self.phase {
            fresh.phase = Phase::Unavailable(reason.clone());
        }
        *self = fresh;
    }

    fn resize(&mut self, viewport: Size) {
        self.layout = Layout::compute(viewport, self.dims());
        let staging = self.staging();
        if let Some(board) = self.board.as_mut() {
            board.relayout(&self.layout, staging);
        }
        self.pointer = self.layout.viewport.clamp_point(self.pointer, self.cursor_size());
    }
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        new.apply(action);
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PieceState;

    const VIEW: Size = Size::new(1000.0, 1000.0);

    fn quiet_config() -> GameConfig {
        let mut cfg = GameConfig::default();
        cfg.pointer.mirror_x = false;
        cfg.hazards.enabled = false;
        cfg
    }

    fn rounds(slugs: &[&str]) -> Vec<RoundImage> {
        slugs
            .iter()
            .map(|s| RoundImage { label: s.to_string(), slug: s.to_string(), src: format!("img/{s}.jpg"), width: 600, height: 600 })
            .collect()
    }

    fn tip_at(p: Point) -> HandSample {
        HandSample::fingertip(p.x / VIEW.width, p.y / VIEW.height)
    }

    fn frame(state: &mut GameState, p: Point, now: f64) {
        state.apply(GameAction::Frame { sample: tip_at(p), now });
    }

    fn active_count(state: &GameState) -> usize {
        state.board.as_ref().map_or(0, |b| b.pieces.iter().filter(|p| p.state == PieceState::Active).count())
    }

    fn count_events(state: &GameState, pred: impl Fn(&GameEvent) -> bool) -> usize {
        state.events_after(0).filter(|(_, e)| pred(e)).count()
    }

    /// Drag every piece into its own cell. Returns the time the round completed.
    fn solve_round(state: &mut GameState, t: &mut f64) -> f64 {
        while state.is_running() {
            let board = state.board.as_ref().expect("board while playing");
            let piece = board.active_piece().expect("a piece is active");
            let target = board.cells[piece.target.0 as usize].rect.center();
            *t += 100.0;
            frame(state, target, *t);
            assert!(active_count(state) <= 1);
            *t += state.config.placement.snap_delay_ms;
            state.apply(GameAction::Advance { now: *t });
            assert!(active_count(state) <= 1);
        }
        *t
    }

    #[test]
    fn scenario_a_four_placements_complete_the_round() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 1, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let dims = state.dims();
        let targets = vec![CellId(2), CellId(0), CellId(3), CellId(1)];
        let mut board = Board::new(dims, targets, &state.layout, Point::new(150.0, 250.0)).unwrap();
        board.select_next();
        state.board = Some(board);

        let mut t = 0.0;
        let completed_at = solve_round(&mut state, &mut t);
        let board = state.board.as_ref().unwrap();
        assert_eq!(board.placed, 4);
        assert!(board.cells.iter().all(|c| c.occupied));
        assert_eq!(state.score, 4 * state.config.placement.score_increment);
        assert_eq!(state.rounds_completed, 1);
        assert!(matches!(state.phase, Phase::Interlude { .. }));
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::RoundCompleted(_))), 1);
        assert_eq!(count_events(&state, |e| *e == GameEvent::Cue(Cue::Place)), 4);
        assert!(!state.clock.is_running());
        assert_eq!(completed_at, 4.0 * 600.0);
    }

    #[test]
    fn scenario_b_three_rounds_without_repetition_win() {
        let mut state = GameState::new(quiet_config(), rounds(&["a", "b", "c"]), 9, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let mut t = 0.0;
        let mut expected_ms = 0.0;
        let mut seen = Vec::new();
        for round in 0..3 {
            let start = t;
            seen.push(state.round.clone().unwrap().slug);
            let end = solve_round(&mut state, &mut t);
            expected_ms += end - start;
            assert_eq!(state.board.as_ref().unwrap().placed, 4);
            // Overlay time does not count.
            t += state.config.session.round_overlay_ms;
            state.apply(GameAction::Advance { now: t });
            if round < 2 {
                let board = state.board.as_ref().unwrap();
                assert_eq!(board.placed, 0, "fresh board after the interlude");
                assert!(board.cells.iter().all(|c| !c.occupied));
            }
        }
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(state.phase, Phase::Over(Outcome::Won));
        assert_eq!(state.rounds_completed, 3);
        assert_eq!(state.clock.elapsed_ms(t + 50_000.0), expected_ms);
        assert_eq!(state.score, 12 * 10);
        assert_eq!(state.pending_tasks(), 0);
        assert_eq!(count_events(&state, |e| *e == GameEvent::GameEnded(Outcome::Won)), 1);
    }

    #[test]
    fn scenario_c_idle_fires_once_after_window() {
        let mut state = GameState::new(GameConfig::default(), rounds(&["a"]), 3, VIEW);
        state.apply(GameAction::Advance { now: 50_000.0 });
        assert_eq!(state.phase, Phase::Menu, "watchdog is quiet in the menu");

        state.apply(GameAction::Start { now: 50_000.0 });
        state.apply(GameAction::Advance { now: 59_999.0 });
        assert!(state.is_running());
        assert_eq!(count_events(&state, |e| *e == GameEvent::IdleStopped), 0);

        state.apply(GameAction::Advance { now: 60_000.0 });
        assert_eq!(state.phase, Phase::IdleStopped);
        state.apply(GameAction::Advance { now: 61_000.0 });
        assert_eq!(count_events(&state, |e| *e == GameEvent::IdleStopped), 1);

        state.apply(GameAction::Advance { now: 63_000.0 });
        assert_eq!(state.phase, Phase::Menu);
        assert_eq!(state.session_id, 1);
        state.apply(GameAction::Advance { now: 200_000.0 });
        assert_eq!(count_events(&state, |e| *e == GameEvent::IdleStopped), 1);
    }

    #[test]
    fn interaction_keeps_the_watchdog_away() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 3, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        state.apply(GameAction::Touch { now: 8_000.0 });
        state.apply(GameAction::Key { now: 16_000.0 });
        frame(&mut state, Point::new(100.0, 900.0), 24_000.0);
        state.apply(GameAction::Advance { now: 33_999.0 });
        assert!(state.is_running());
        state.apply(GameAction::Advance { now: 34_000.0 });
        assert_eq!(state.phase, Phase::IdleStopped);
    }

    #[test]
    fn hazard_limit_loses_and_ignores_further_hits() {
        let mut cfg = GameConfig::default();
        cfg.pointer.mirror_x = false;
        cfg.hazards.persistent_count = 0;
        cfg.hazards.transient_on_place = false;
        let mut state = GameState::new(cfg, rounds(&["a"]), 5, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let block = Rect::new(60.0, 60.0, 56.0, 56.0);
        state.hazards.spawn_persistent(1, &block, block.size(), 15_000.0, 0.0, &mut Dice::new(0));

        let over = block.center();
        let away = Point::new(60.0, 900.0);
        let mut t = 0.0;
        for expected in 1..=2 {
            t += 2_500.0;
            frame(&mut state, over, t);
            assert_eq!(state.hazards.hits, expected);
            assert!(state.is_running());
            frame(&mut state, away, t + 10.0);
        }
        assert!(state.hazards.warning);
        t += 2_500.0;
        frame(&mut state, over, t);
        assert_eq!(state.phase, Phase::Over(Outcome::Lost(LossReason::Hazards)));
        assert_eq!(state.pending_tasks(), 0, "every timer is cancelled");

        t += 2_500.0;
        frame(&mut state, over, t);
        assert_eq!(state.hazards.hits, 3);
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::HazardHit { .. })), 3);
        let secs = state.display_secs;
        state.apply(GameAction::Advance { now: t + 60_000.0 });
        assert_eq!(state.display_secs, secs);
        assert_eq!(state.phase, Phase::Over(Outcome::Lost(LossReason::Hazards)));
    }

    #[test]
    fn hit_warning_dismisses_itself() {
        let mut cfg = GameConfig::default();
        cfg.pointer.mirror_x = false;
        cfg.hazards.persistent_count = 0;
        let mut state = GameState::new(cfg, rounds(&["a"]), 5, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let block = Rect::new(60.0, 60.0, 56.0, 56.0);
        state.hazards.spawn_persistent(1, &block, block.size(), 15_000.0, 0.0, &mut Dice::new(0));
        frame(&mut state, block.center(), 100.0);
        assert!(state.hazards.warning);
        assert!(state.hit_flash());
        state.apply(GameAction::Advance { now: 2_099.0 });
        assert!(state.hazards.warning);
        state.apply(GameAction::Advance { now: 2_100.0 });
        assert!(!state.hazards.warning);
    }

    #[test]
    fn missing_or_degenerate_fingertip_is_a_no_op() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 2, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let before = state.board.clone();
        let pointer = state.pointer;
        state.apply(GameAction::Frame { sample: HandSample::default(), now: 16.0 });
        state.apply(GameAction::Frame { sample: HandSample::fingertip(0.0, 0.0), now: 33.0 });
        assert_eq!(state.board, before);
        assert_eq!(state.pointer, pointer);
        assert!(!state.hand_visible);
    }

    #[test]
    fn air_tap_emits_one_activation_per_cooldown() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 2, VIEW);
        let ys = [300.0, 360.0, 300.0, 360.0];
        for (i, y) in ys.iter().enumerate() {
            frame(&mut state, Point::new(500.0, *y), i as f64 * 50.0);
        }
        assert_eq!(count_events(&state, |e| matches!(e, GameEvent::Activation(_))), 1);
        assert_eq!(state.phase, Phase::Menu);
    }

    #[test]
    fn activation_pickup_waits_for_a_tap() {
        let mut cfg = quiet_config();
        cfg.placement.pickup = PickupMode::Activation;
        let mut state = GameState::new(cfg, rounds(&["a"]), 4, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        assert!(state.pickup_armed);
        assert_eq!(active_count(&state), 0);

        state.apply(GameAction::Key { now: 100.0 });
        assert_eq!(active_count(&state), 1);
        let board = state.board.as_ref().unwrap();
        let target = board.cells[board.active_piece().unwrap().target.0 as usize].rect.center();
        frame(&mut state, target, 200.0);
        state.apply(GameAction::Advance { now: 700.0 });
        assert!(state.pickup_armed);
        assert_eq!(active_count(&state), 0);
    }

    #[test]
    fn wrong_cell_penalty_never_goes_below_zero() {
        let mut cfg = quiet_config();
        cfg.placement.wrong_cell_penalty = 3;
        cfg.placement.target_policy = crate::config::TargetPolicy::IndexMatched;
        let mut state = GameState::new(cfg, rounds(&["a"]), 4, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let cells: Vec<Point> = state.board.as_ref().unwrap().cells.iter().map(|c| c.rect.center()).collect();

        frame(&mut state, cells[1], 100.0);
        assert_eq!(state.score, 0);
        frame(&mut state, cells[0], 200.0);
        assert_eq!(state.score, 10);
        state.apply(GameAction::Advance { now: 700.0 });
        frame(&mut state, cells[3], 800.0);
        assert_eq!(state.score, 7);
        frame(&mut state, cells[3], 900.0);
        assert_eq!(state.score, 7, "guarded while in the same cell");
        assert_eq!(count_events(&state, |e| *e == GameEvent::Cue(Cue::WrongCell)), 2);
    }

    #[test]
    fn wrong_cell_guard_is_not_cleared_by_an_older_penalty() {
        let mut cfg = quiet_config();
        cfg.placement.wrong_cell_penalty = 3;
        cfg.placement.wrong_cell_guard_ms = 1000.0;
        cfg.placement.target_policy = crate::config::TargetPolicy::IndexMatched;
        let mut state = GameState::new(cfg, rounds(&["a"]), 4, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let cells: Vec<Point> = state.board.as_ref().unwrap().cells.iter().map(|c| c.rect.center()).collect();

        frame(&mut state, cells[0], 100.0);
        state.apply(GameAction::Advance { now: 600.0 });
        assert_eq!(state.score, 10);

        frame(&mut state, cells[2], 800.0);
        assert_eq!(state.score, 7);
        frame(&mut state, cells[3], 1_600.0);
        assert_eq!(state.score, 4);
        // The clear queued for cell 2 would have fired at 1800.
        frame(&mut state, cells[3], 1_850.0);
        assert_eq!(state.score, 4);
        frame(&mut state, cells[3], 2_700.0);
        assert_eq!(state.score, 1, "guard lapses a full window after entering cell 3");
    }

    #[test]
    fn failed_assets_skip_rounds() {
        let mut state = GameState::new(quiet_config(), rounds(&["a", "b"]), 6, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let first = state.round.clone().unwrap().slug;
        state.apply(GameAction::AssetFailed { slug: "nope".into(), now: 10.0 });
        assert_eq!(state.round.as_ref().unwrap().slug, first, "stale failure is ignored");

        state.apply(GameAction::AssetFailed { slug: first.clone(), now: 20.0 });
        let second = state.round.clone().unwrap().slug;
        assert_ne!(first, second);
        assert!(state.is_running());

        state.apply(GameAction::AssetFailed { slug: second, now: 30.0 });
        assert_eq!(state.phase, Phase::Over(Outcome::Lost(LossReason::Assets)));
    }

    #[test]
    fn unavailable_recognizer_blocks_the_session() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 2, VIEW);
        state.apply(GameAction::RecognizerFailed { reason: "camera denied".into() });
        state.apply(GameAction::Start { now: 0.0 });
        frame(&mut state, Point::new(400.0, 400.0), 10.0);
        assert_eq!(state.phase, Phase::Unavailable("camera denied".into()));
        assert!(state.board.is_none());
        assert!(!state.hand_visible);
    }

    #[test]
    fn recognizer_failure_mid_session_stops_for_good() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 2, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        assert!(state.is_running());
        state.apply(GameAction::RecognizerFailed { reason: "camera denied".into() });
        assert_eq!(state.phase, Phase::Unavailable("camera denied".into()));
        assert!(state.board.is_none());
        assert_eq!(state.pending_tasks(), 0);

        state.apply(GameAction::Advance { now: 20_000.0 });
        assert_eq!(state.phase, Phase::Unavailable("camera denied".into()));
        state.apply(GameAction::Restart { now: 21_000.0 });
        state.apply(GameAction::Start { now: 21_000.0 });
        assert_eq!(state.phase, Phase::Unavailable("camera denied".into()));
        assert_eq!(count_events(&state, |e| *e == GameEvent::GameStarted), 1);
    }

    #[test]
    fn restart_rebuilds_the_session() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 2, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        let mut t = 0.0;
        solve_round(&mut state, &mut t);
        let seq = state.events_after(0).last().map_or(0, |(n, _)| *n);
        state.apply(GameAction::Restart { now: t + 10.0 });
        assert_eq!(state.phase, Phase::Menu);
        assert_eq!(state.score, 0);
        assert_eq!(state.rounds_completed, 0);
        assert_eq!(state.pending_tasks(), 0);
        assert_eq!(state.events_after(seq).count(), 0, "outbox survives");
        assert!(state.events_after(0).count() > 0);
        state.apply(GameAction::Start { now: t + 20.0 });
        assert!(state.is_running());
        assert!(state.events_after(seq).any(|(_, e)| *e == GameEvent::GameStarted));
    }

    #[test]
    fn transient_obstacles_spawn_and_expire_on_schedule() {
        let mut cfg = GameConfig::default();
        cfg.hazards.persistent_count = 0;
        let mut state = GameState::new(cfg, rounds(&["a"]), 8, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        state.apply(GameAction::Interaction { now: 4_999.0 });
        assert!(state.hazards.obstacles.is_empty());
        state.apply(GameAction::Interaction { now: 5_000.0 });
        assert_eq!(state.hazards.obstacles.len(), 1);
        state.apply(GameAction::Interaction { now: 8_000.0 });
        assert!(state.hazards.obstacles.is_empty());
    }

    #[test]
    fn display_tick_follows_the_clock() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 8, VIEW);
        state.apply(GameAction::Start { now: 1_000.0 });
        state.apply(GameAction::Interaction { now: 3_500.0 });
        assert_eq!(state.display_secs, 2);
        assert_eq!(state.clock.elapsed_ms(state.now), 2_500.0);
    }

    #[test]
    fn resize_keeps_pointer_inside_and_pieces_snapped() {
        let mut state = GameState::new(quiet_config(), rounds(&["a"]), 8, VIEW);
        state.apply(GameAction::Start { now: 0.0 });
        for i in 0..120 {
            frame(&mut state, Point::new(960.0, 960.0), i as f64 * 16.0);
        }
        state.apply(GameAction::Resize { width: 640.0, height: 480.0 });
        let cursor = state.cursor_size();
        assert!(state.pointer.x <= 640.0 - cursor.width);
        assert!(state.pointer.y <= 480.0 - cursor.height);
        let board = state.board.as_ref().unwrap();
        for piece in board.pieces.iter().filter(|p| p.state == PieceState::Placed) {
            assert_eq!(piece.position, board.cells[piece.target.0 as usize].rect.origin());
        }
    }
}
