use crate::castling::CastlingRights;
use crate::piece::CellCode;
use crate::r#move::Move;
use crate::square::Square;

/// Everything needed to reverse exactly one applied move.
/// The captured square differs from the move target for en passant, and
/// `rook_move` records the rook relocation performed while castling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub move_played: Move,
    pub moved_piece: CellCode,
    pub captured_piece: CellCode,
    pub captured_square: Square,
    pub castling_rights: CastlingRights,
    pub ep_target: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub rook_move: Option<(Square, Square)>,
}
