//! Tunables for the interaction engine.
//!
//! Every field has a default matching the exhibit's design values, so a page
//! can ship a partial JSON block (or none at all) and only override what it needs.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapRegion {
    /// Scale landmarks to the full viewport.
    Viewport,
    /// Scale landmarks to the play container.
    Container,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragSource {
    Raw,
    Smoothed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    /// The piece's center must lie inside the cell.
    Center,
    /// The piece's whole bounding box must lie inside the cell.
    Strict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    Shuffled,
    IndexMatched,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupMode {
    /// Next piece becomes active right after the snap delay.
    Auto,
    /// Next piece waits for an activation (air tap or Space).
    Activation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub region: MapRegion,
    pub mirror_x: bool,
    /// Both scaled coordinates under this many pixels means tracking was lost.
    pub degenerate_px: f64,
    pub smoothing_alpha: f64,
    /// 1 = single EMA, 2 = cascaded.
    pub smoothing_passes: u8,
    pub drag_source: DragSource,
    pub cursor_width: f64,
    pub cursor_height: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            region: MapRegion::Viewport,
            mirror_x: true,
            degenerate_px: 5.0,
            smoothing_alpha: 0.08,
            smoothing_passes: 2,
            drag_source: DragSource::Raw,
            cursor_width: 32.0,
            cursor_height: 32.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Downward pixels between consecutive ticks that count as a flick.
    pub threshold_px: f64,
    pub cooldown_ms: f64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self { threshold_px: 30.0, cooldown_ms: 500.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub rows: u32,
    pub cols: u32,
    pub staging_x: f64,
    pub staging_y: f64,
    pub snap_delay_ms: f64,
    pub containment: Containment,
    pub target_policy: TargetPolicy,
    pub pickup: PickupMode,
    pub score_increment: i64,
    /// Zero disables wrong-cell feedback entirely.
    pub wrong_cell_penalty: i64,
    pub wrong_cell_guard_ms: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 2,
            staging_x: 150.0,
            staging_y: 250.0,
            snap_delay_ms: 500.0,
            containment: Containment::Center,
            target_policy: TargetPolicy::Shuffled,
            pickup: PickupMode::Auto,
            score_increment: 10,
            wrong_cell_penalty: 0,
            wrong_cell_guard_ms: 1000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub enabled: bool,
    pub persistent_count: usize,
    pub persistent_duration_ms: f64,
    pub transient_interval_ms: f64,
    pub transient_duration_ms: f64,
    pub transient_on_place: bool,
    /// Largest horizontal travel of a transient obstacle, either direction.
    pub transient_max_dx: f64,
    pub obstacle_size: f64,
    pub hit_cooldown_ms: f64,
    pub hit_limit: u32,
    pub warning_ms: f64,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            persistent_count: 3,
            persistent_duration_ms: 15_000.0,
            transient_interval_ms: 5_000.0,
            transient_duration_ms: 3_000.0,
            transient_on_place: true,
            transient_max_dx: 240.0,
            obstacle_size: 56.0,
            hit_cooldown_ms: 2_000.0,
            hit_limit: 3,
            warning_ms: 2_000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub round_overlay_ms: f64,
    pub display_tick_ms: f64,
    /// Cap on rounds drawn from the catalog; `None` plays them all.
    pub max_rounds: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { round_overlay_ms: 3_000.0, display_tick_ms: 1_000.0, max_rounds: None }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    pub timeout_ms: f64,
    pub restart_delay_ms: f64,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000.0, restart_delay_ms: 3_000.0 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pointer: PointerConfig,
    pub tap: TapConfig,
    pub placement: PlacementConfig,
    pub hazards: HazardConfig,
    pub session: SessionConfig,
    pub idle: IdleConfig,
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg: GameConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.placement;
        if p.rows == 0 || p.cols == 0 {
            return Err(GameError::InvalidConfig(format!("grid must be non-empty, got {}x{}", p.rows, p.cols)));
        }
        let alpha = self.pointer.smoothing_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(GameError::InvalidConfig(format!("smoothing_alpha {alpha} outside (0, 1]")));
        }
        if !(1..=2).contains(&self.pointer.smoothing_passes) {
            return Err(GameError::InvalidConfig(format!(
                "smoothing_passes must be 1 or 2, got {}",
                self.pointer.smoothing_passes
            )));
        }
        if self.hazards.hit_limit == 0 {
            return Err(GameError::InvalidConfig("hit_limit must be at least 1".into()));
        }
        if self.session.display_tick_ms <= 0.0 || (self.hazards.enabled && self.hazards.transient_interval_ms <= 0.0) {
            return Err(GameError::InvalidConfig("repeating intervals must be positive".into()));
        }
        if p.wrong_cell_penalty < 0 || p.score_increment < 0 {
            return Err(GameError::InvalidConfig("score increments are magnitudes and must be >= 0".into()));
        }
        Ok(())
    }
}
