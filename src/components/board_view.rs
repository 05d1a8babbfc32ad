use crate::catalog::{Fragment, RoundImage};
use crate::input::CoordinateMapper;
use crate::model::{PieceState, Rect};
use crate::state::Board;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub board: Option<Board>,
    pub round: Option<RoundImage>,
    /// Container the board is drawn in; engine rects are viewport based.
    pub area: Rect,
    /// The dragged piece just touched an obstacle.
    pub flash: bool,
}

#[function_component]
pub fn BoardView(props: &BoardViewProps) -> Html {
    let (Some(board), Some(round)) = (&props.board, &props.round) else {
        return html! {};
    };
    let area = props.area;
    let box_style = |r: Rect| {
        let p = CoordinateMapper::to_local(r.origin(), &area);
        format!("position:absolute; left:{:.1}px; top:{:.1}px; width:{:.1}px; height:{:.1}px;", p.x, p.y, r.width, r.height)
    };

    let cells = board.cells.iter().map(|cell| {
        let border = if cell.highlight {
            "border:3px solid #58a6ff; box-shadow:0 0 18px rgba(88,166,255,0.7);"
        } else {
            "border:1px dashed #30363d;"
        };
        html! {
            <div key={format!("cell-{}", cell.id)} style={format!("{} {} box-sizing:border-box; background:rgba(22,27,34,0.6);", box_style(cell.rect), border)} />
        }
    });

    let pieces = board.pieces.iter().filter(|p| p.state != PieceState::Unplaced).map(|piece| {
        let sprite = Fragment::of(piece.id, board.dims, piece.size).css(&round.src);
        let extra = match piece.state {
            PieceState::Active if props.flash => "z-index:5; outline:4px solid #f85149; box-shadow:0 0 24px #f85149;",
            PieceState::Active => "z-index:5; box-shadow:0 8px 24px rgba(0,0,0,0.6);",
            _ => "z-index:2;",
        };
        html! {
            <div key={format!("piece-{}", piece.id)} style={format!("{} {} {} pointer-events:none;", box_style(piece.rect()), sprite, extra)} />
        }
    });

    html! {
        <div style={format!("position:absolute; left:{:.1}px; top:{:.1}px; width:{:.1}px; height:{:.1}px;", area.x, area.y, area.width, area.height)}>
            { for cells }
            { for pieces }
        </div>
    }
}
