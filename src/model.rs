//! Core data models for the hand puzzle.
//! Geometry is in CSS pixels with the origin at the viewport's top-left.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open on the far edges so adjacent cells never both claim a point.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x && other.right() <= self.right() && other.y >= self.y && other.bottom() <= self.bottom()
    }

    /// Axis-aligned overlap: false only when one box is entirely left, right,
    /// above or below the other.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.x || other.right() < self.x || self.bottom() < other.y || other.bottom() < self.y)
    }

    /// Clamp `p` so an element of `elem` size placed at `p` stays inside.
    /// An element larger than the region pins to the region's origin.
    pub fn clamp_point(&self, p: Point, elem: Size) -> Point {
        let max_x = (self.right() - elem.width).max(self.x);
        let max_y = (self.bottom() - elem.height).max(self.y);
        Point::new(p.x.clamp(self.x, max_x), p.y.clamp(self.y, max_y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub rows: u32,
    pub cols: u32,
}

impl GridDims {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn len(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    /// Row-major cell ids.
    pub fn cell_ids(&self) -> Vec<CellId> {
        (0..self.rows * self.cols).map(CellId).collect()
    }

    pub fn row_col(&self, index: usize) -> (u32, u32) {
        let i = index as u32;
        (i / self.cols, i % self.cols)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceState {
    Unplaced,
    Active,
    Placed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzlePiece {
    /// Row-major index of the image fragment this piece shows.
    pub id: usize,
    pub target: CellId,
    pub state: PieceState,
    /// Top-left of the piece element.
    pub position: Point,
    pub size: Size,
}

impl PuzzlePiece {
    pub fn rect(&self) -> Rect {
        Rect::at(self.position, self.size)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub id: CellId,
    pub rect: Rect,
    pub occupied: bool,
    pub highlight: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    Hazards,
    Idle,
    Assets,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost(LossReason),
}

/// Screen regions derived from the viewport; recomputed on resize.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub viewport: Rect,
    /// Container that bounds transient obstacles and container-relative mapping.
    pub play_area: Rect,
    /// The target grid.
    pub board: Rect,
    /// Central region persistent obstacles wander within.
    pub cluster: Rect,
    pub cell_size: Size,
}

impl Layout {
    pub fn compute(viewport: Size, dims: GridDims) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        let side = (w * 0.42).min(h * 0.62).max(40.0);
        let cell = side / dims.rows.max(dims.cols) as f64;
        let board_w = cell * dims.cols as f64;
        let board_h = cell * dims.rows as f64;
        let board = Rect::new(w * 0.5 + (w * 0.5 - board_w) * 0.5, (h - board_h) * 0.5, board_w, board_h);
        let cluster = Rect::new(w * 0.35, h * 0.35, w * 0.3, h * 0.3);
        Self {
            viewport: Rect::new(0.0, 0.0, w, h),
            play_area: Rect::new(0.0, 0.0, w, h),
            board,
            cluster,
            cell_size: Size::new(cell, cell),
        }
    }

    pub fn cell_rect(&self, dims: GridDims, id: CellId) -> Rect {
        let (row, col) = dims.row_col(id.0 as usize);
        Rect::new(
            self.board.x + col as f64 * self.cell_size.width,
            self.board.y + row as f64 * self.cell_size.height,
            self.cell_size.width,
            self.cell_size.height,
        )
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::compute(Size::new(1280.0, 720.0), GridDims::new(2, 2))
    }
}
