//! Piece placement state machine for one round.
//!
//! Pieces move `Unplaced → Active → Placed`; at most one is active and a
//! placed piece never moves again. Each piece carries a target cell and the
//! targets of a round are always a permutation of the grid's cell ids.

use crate::config::{Containment, TargetPolicy};
use crate::error::{GameError, Result};
use crate::model::{CellId, GridCell, GridDims, Layout, PieceState, Point, PuzzlePiece};

use super::dice::Dice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Activated(usize),
    /// A piece is already being dragged.
    Busy,
    /// Nothing left to place.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementCheck {
    Nothing,
    Placed { piece: usize, cell: CellId },
    WrongCell { cell: CellId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub dims: GridDims,
    pub pieces: Vec<PuzzlePiece>,
    pub cells: Vec<GridCell>,
    pub active: Option<usize>,
    pub placed: usize,
    pub staging: Point,
    wrong_guard: Option<CellId>,
}

impl Board {
    pub fn assign_targets(dims: GridDims, policy: TargetPolicy, dice: &mut Dice) -> Vec<CellId> {
        let mut ids = dims.cell_ids();
        if policy == TargetPolicy::Shuffled {
            dice.shuffle(&mut ids);
        }
        ids
    }

    pub fn is_permutation(dims: GridDims, targets: &[CellId]) -> bool {
        let mut sorted = targets.to_vec();
        sorted.sort();
        sorted == dims.cell_ids()
    }

    /// `targets[i]` is the cell piece `i` (fragment `i`, row-major) belongs in.
    pub fn new(dims: GridDims, targets: Vec<CellId>, layout: &Layout, staging: Point) -> Result<Self> {
        if !Self::is_permutation(dims, &targets) {
            return Err(GameError::InvalidConfig(format!(
                "targets {targets:?} are not a permutation of the {}x{} grid",
                dims.rows, dims.cols
            )));
        }
        let cells = dims
            .cell_ids()
            .into_iter()
            .map(|id| GridCell { id, rect: layout.cell_rect(dims, id), occupied: false, highlight: false })
            .collect();
        let pieces = targets
            .into_iter()
            .enumerate()
            .map(|(id, target)| PuzzlePiece {
                id,
                target,
                state: PieceState::Unplaced,
                position: staging,
                size: layout.cell_size,
            })
            .collect();
        Ok(Self { dims, pieces, cells, active: None, placed: 0, staging, wrong_guard: None })
    }

    /// Activate the first unplaced piece in stable order, park it at the
    /// staging point and highlight only its target cell.
    pub fn select_next(&mut self) -> Selection {
        if self.active.is_some() {
            return Selection::Busy;
        }
        let Some(i) = self.pieces.iter().position(|p| p.state == PieceState::Unplaced) else {
            return Selection::Exhausted;
        };
        let piece = &mut self.pieces[i];
        piece.state = PieceState::Active;
        piece.position = self.staging;
        let target = piece.target;
        for cell in &mut self.cells {
            cell.highlight = cell.id == target;
        }
        self.active = Some(i);
        Selection::Activated(i)
    }

    /// Center the active piece under the drag point.
    pub fn track(&mut self, drag: Point) {
        if let Some(i) = self.active {
            let piece = &mut self.pieces[i];
            piece.position = Point::new(drag.x - piece.size.width * 0.5, drag.y - piece.size.height * 0.5);
        }
    }

    pub fn check(&mut self, containment: Containment, wrong_cell_feedback: bool) -> PlacementCheck {
        let Some(i) = self.active else {
            return PlacementCheck::Nothing;
        };
        let rect = self.pieces[i].rect();
        let center = rect.center();
        let target = self.pieces[i].target;
        let inside = |cell: &GridCell| match containment {
            Containment::Center => cell.rect.contains(center),
            Containment::Strict => cell.rect.contains_rect(&rect),
        };

        if let Some(ci) = self.cells.iter().position(|c| c.id == target && !c.occupied && inside(c)) {
            let cell = &mut self.cells[ci];
            cell.occupied = true;
            cell.highlight = false;
            let piece = &mut self.pieces[i];
            piece.position = cell.rect.origin();
            piece.state = PieceState::Placed;
            self.placed += 1;
            self.active = None;
            self.wrong_guard = None;
            return PlacementCheck::Placed { piece: i, cell: target };
        }

        if wrong_cell_feedback {
            if let Some(cell) = self.cells.iter().find(|c| c.id != target && !c.occupied && inside(c)) {
                if self.wrong_guard != Some(cell.id) {
                    self.wrong_guard = Some(cell.id);
                    return PlacementCheck::WrongCell { cell: cell.id };
                }
            }
        }
        PlacementCheck::Nothing
    }

    pub fn clear_wrong_guard(&mut self) {
        self.wrong_guard = None;
    }

    pub fn active_piece(&self) -> Option<&PuzzlePiece> {
        self.active.map(|i| &self.pieces[i])
    }

    pub fn total(&self) -> usize {
        self.cells.len()
    }

    pub fn progress(&self) -> f64 {
        if self.cells.is_empty() { 0.0 } else { self.placed as f64 / self.cells.len() as f64 }
    }

    pub fn is_complete(&self) -> bool {
        self.placed == self.cells.len()
    }

    /// Follow a new layout: cells move, placed pieces stay snapped, waiting
    /// pieces go back to the staging point.
    pub fn relayout(&mut self, layout: &Layout, staging: Point) {
        self.staging = staging;
        for cell in &mut self.cells {
            cell.rect = layout.cell_rect(self.dims, cell.id);
        }
        for piece in &mut self.pieces {
            piece.size = layout.cell_size;
            match piece.state {
                PieceState::Placed => piece.position = layout.cell_rect(self.dims, piece.target).origin(),
                PieceState::Unplaced => piece.position = staging,
                PieceState::Active => {}
            }
        }
    }
}
