use crate::board::Board;
use crate::piece::Color;
use crate::square::square_at;

pub type Score = i32;

/// Material value per piece type (pawn .. king); the king carries no
/// material since it never leaves the board
pub const PIECE_TYPE_VALUE: [Score; 6] = [100, 320, 330, 500, 900, 0];
pub const MATE_SCORE: Score = 100_000;
pub const DRAW_SCORE: Score = 0;

/// Static material count, signed from the perspective of the side to move
pub fn evaluate(board: &Board) -> Score {
    let mut white = 0;
    let mut black = 0;
    for rank in 0..8 {
        for file in 0..8 {
            let piece = board.piece_on(square_at(rank, file));
            if piece > 0 {
                white += PIECE_TYPE_VALUE[piece as usize - 1];
            } else if piece < 0 {
                black += PIECE_TYPE_VALUE[(-piece) as usize - 1];
            }
        }
    }

    let score = white - black;
    if board.side_to_move() == Color::White {
        score
    } else {
        -score
    }
}
