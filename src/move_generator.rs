use crate::board::Board;
use crate::movelist::MoveList;
use crate::piece::{CellCode, Color, PieceType};
use crate::r#move::Move;
use crate::square::{rank_of, square_at, Square};

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub enum GenType {
    PseudoLegal,
    Legal,
}

// Classic 0x88 offset tables. Sliders re-apply their offsets until they run
// off the board or into an occupant.
const KNIGHT_OFFSETS: [i32; 8] = [-33, -31, -18, -14, 14, 18, 31, 33];
const KING_OFFSETS: [i32; 8] = [-17, -16, -15, -1, 1, 15, 16, 17];
const BISHOP_OFFSETS: [i32; 4] = [-17, -15, 15, 17];
const ROOK_OFFSETS: [i32; 4] = [-16, -1, 1, 16];

fn shifted(sq: Square, offset: i32) -> Option<Square> {
    let target = sq as i32 + offset;
    if target & 0x88 == 0 {
        Some(target as Square)
    } else {
        None
    }
}

/// Generates moves for the side to move. `GenType::PseudoLegal` skips the
/// own-king-safety filter; `GenType::Legal` applies each candidate, tests the
/// mover's king for check and undoes it, keeping only the safe ones
pub fn generate(board: &mut Board, gen_type: GenType) -> MoveList {
    let pseudo = pseudo_legal(board);
    if gen_type == GenType::PseudoLegal {
        return pseudo;
    }

    let side = board.side_to_move();
    let mut legal = MoveList::default();
    for mv in &pseudo {
        board.make(*mv);
        if !board.in_check(side) {
            legal.push(*mv);
        }
        board.unmake();
    }
    legal
}

fn pseudo_legal(board: &Board) -> MoveList {
    let mut list = MoveList::default();
    let side = board.side_to_move();

    for rank in 0..8 {
        for file in 0..8 {
            let sq = square_at(rank, file);
            let piece = board.piece_on(sq);
            if piece == 0 || Color::of_cell(piece) != Some(side) {
                continue;
            }
            match PieceType::from_code(piece) {
                Some(PieceType::Pawn) => pawn_moves(board, sq, &mut list),
                Some(PieceType::Knight) => leaper_moves(board, sq, &KNIGHT_OFFSETS, &mut list),
                Some(PieceType::Bishop) => slider_moves(board, sq, &BISHOP_OFFSETS, &mut list),
                Some(PieceType::Rook) => slider_moves(board, sq, &ROOK_OFFSETS, &mut list),
                Some(PieceType::Queen) => slider_moves(board, sq, &KING_OFFSETS, &mut list),
                Some(PieceType::King) => {
                    leaper_moves(board, sq, &KING_OFFSETS, &mut list);
                    castling_moves(board, sq, &mut list);
                }
                None => (),
            }
        }
    }
    list
}

fn pawn_moves(board: &Board, sq: Square, list: &mut MoveList) {
    let side = board.side_to_move();
    let (push, start_rank, promotion_rank) = match side {
        Color::White => (16, 1, 7),
        Color::Black => (-16, 6, 0),
    };

    if let Some(one) = shifted(sq, push) {
        if board.piece_on(one) == 0 {
            if rank_of(one) == promotion_rank {
                for promotion in Move::all_promotions(sq, one) {
                    list.push(promotion);
                }
            } else {
                list.push(Move::new_quiet(sq, one));
                if rank_of(sq) == start_rank {
                    // The skipped-over square is already known empty
                    if let Some(two) = shifted(one, push) {
                        if board.piece_on(two) == 0 {
                            list.push(Move::new_double_push(sq, two));
                        }
                    }
                }
            }
        }
    }

    for offset in [push - 1, push + 1] {
        let target = match shifted(sq, offset) {
            Some(t) => t,
            None => continue,
        };
        if board.color_on(target) == Some(side.opposite()) {
            if rank_of(target) == promotion_rank {
                for promotion in Move::all_promotion_captures(sq, target) {
                    list.push(promotion);
                }
            } else {
                list.push(Move::new_capture(sq, target));
            }
        } else if board.en_passant_target() == Some(target) {
            list.push(Move::new_en_passant(sq, target));
        }
    }
}

fn leaper_moves(board: &Board, sq: Square, offsets: &[i32], list: &mut MoveList) {
    let side = board.side_to_move();
    for &offset in offsets {
        let target = match shifted(sq, offset) {
            Some(t) => t,
            None => continue,
        };
        match board.color_on(target) {
            None => list.push(Move::new_quiet(sq, target)),
            Some(color) if color != side => list.push(Move::new_capture(sq, target)),
            _ => (),
        }
    }
}

fn slider_moves(board: &Board, sq: Square, offsets: &[i32], list: &mut MoveList) {
    let side = board.side_to_move();
    for &offset in offsets {
        let mut current = sq;
        while let Some(target) = shifted(current, offset) {
            match board.color_on(target) {
                None => list.push(Move::new_quiet(sq, target)),
                Some(color) => {
                    if color != side {
                        list.push(Move::new_capture(sq, target));
                    }
                    break;
                }
            }
            current = target;
        }
    }
}

fn castling_moves(board: &Board, king_sq: Square, list: &mut MoveList) {
    let side = board.side_to_move();
    let home_square = match side {
        Color::White => 0x04,
        Color::Black => 0x74,
    };
    // Rights without a king on its home square can only come from a
    // hand-written FEN; there is nothing to castle with then
    if king_sq != home_square {
        return;
    }
    let opponent = side.opposite();
    let (kingside, queenside) = board.castling_rights().get(side);

    if kingside
        && board.piece_on(king_sq + 1) == 0
        && board.piece_on(king_sq + 2) == 0
        && !is_square_attacked(board, king_sq, opponent)
        && !is_square_attacked(board, king_sq + 1, opponent)
        && !is_square_attacked(board, king_sq + 2, opponent)
    {
        list.push(Move::new_kingside_castle(side));
    }
    if queenside
        && board.piece_on(king_sq - 1) == 0
        && board.piece_on(king_sq - 2) == 0
        && board.piece_on(king_sq - 3) == 0
        && !is_square_attacked(board, king_sq, opponent)
        && !is_square_attacked(board, king_sq - 1, opponent)
        && !is_square_attacked(board, king_sq - 2, opponent)
    {
        list.push(Move::new_queenside_castle(side));
    }
}

/// Tests whether `attacker` attacks a given square, probing every piece
/// pattern: pawns via reversed diagonals, leapers via their offset tables,
/// sliders via ray-casts stopped by the first occupant
pub fn is_square_attacked(board: &Board, sq: Square, attacker: Color) -> bool {
    let pawn = PieceType::Pawn.code() * attacker.sign();
    // A white pawn attacks from below the target square, a black one from above
    let pawn_origins = match attacker {
        Color::White => [-15, -17],
        Color::Black => [15, 17],
    };
    for offset in pawn_origins {
        if let Some(origin) = shifted(sq, offset) {
            if board.piece_on(origin) == pawn {
                return true;
            }
        }
    }

    if leaper_attack(board, sq, &KNIGHT_OFFSETS, PieceType::Knight.code() * attacker.sign()) {
        return true;
    }
    if leaper_attack(board, sq, &KING_OFFSETS, PieceType::King.code() * attacker.sign()) {
        return true;
    }

    let bishop = PieceType::Bishop.code() * attacker.sign();
    let rook = PieceType::Rook.code() * attacker.sign();
    let queen = PieceType::Queen.code() * attacker.sign();
    slider_attack(board, sq, &BISHOP_OFFSETS, bishop, queen)
        || slider_attack(board, sq, &ROOK_OFFSETS, rook, queen)
}

fn leaper_attack(board: &Board, sq: Square, offsets: &[i32], piece: CellCode) -> bool {
    offsets
        .iter()
        .filter_map(|&offset| shifted(sq, offset))
        .any(|origin| board.piece_on(origin) == piece)
}

fn slider_attack(board: &Board, sq: Square, offsets: &[i32], piece: CellCode, queen: CellCode) -> bool {
    for &offset in offsets {
        let mut current = sq;
        while let Some(origin) = shifted(current, offset) {
            let occupant = board.piece_on(origin);
            if occupant != 0 {
                if occupant == piece || occupant == queen {
                    return true;
                }
                break;
            }
            current = origin;
        }
    }
    false
}

/// Returns the origin squares of every `attacker` piece attacking a square.
/// Only used for reporting (the `d` command); the check tests above stay on
/// the boolean early-out path
pub fn attackers_of(board: &Board, sq: Square, attacker: Color) -> Vec<Square> {
    let mut attackers = vec![];
    for rank in 0..8 {
        for file in 0..8 {
            let origin = square_at(rank, file);
            if board.color_on(origin) != Some(attacker) {
                continue;
            }
            if piece_attacks(board, origin, sq) {
                attackers.push(origin);
            }
        }
    }
    attackers
}

fn piece_attacks(board: &Board, origin: Square, target: Square) -> bool {
    let piece = board.piece_on(origin);
    let sign = if piece > 0 { 1 } else { -1 };
    match PieceType::from_code(piece) {
        Some(PieceType::Pawn) => {
            [15 * sign, 17 * sign].iter().any(|&o| shifted(origin, o) == Some(target))
        }
        Some(PieceType::Knight) => KNIGHT_OFFSETS
            .iter()
            .any(|&o| shifted(origin, o) == Some(target)),
        Some(PieceType::King) => KING_OFFSETS
            .iter()
            .any(|&o| shifted(origin, o) == Some(target)),
        Some(PieceType::Bishop) => slider_reaches(board, origin, target, &BISHOP_OFFSETS),
        Some(PieceType::Rook) => slider_reaches(board, origin, target, &ROOK_OFFSETS),
        Some(PieceType::Queen) => slider_reaches(board, origin, target, &KING_OFFSETS),
        None => false,
    }
}

fn slider_reaches(board: &Board, origin: Square, target: Square, offsets: &[i32]) -> bool {
    for &offset in offsets {
        let mut current = origin;
        while let Some(next) = shifted(current, offset) {
            if next == target {
                return true;
            }
            if board.piece_on(next) != 0 {
                break;
            }
            current = next;
        }
    }
    false
}


#[cfg(test)]
mod perft_tests {
    use super::{generate, GenType};
    use crate::board::Board;

    // Verification goes up to depth 3: the mailbox generator re-derives
    // legality at every node, and the positions are varied enough to cover
    // all kinds of moves by then anyway
    const TEST_POSITIONS: [(&str, [u128; 3]); 7] = [
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            [20, 400, 8902],
        ),
        (
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            [48, 2039, 97862],
        ),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", [14, 191, 2812]),
        (
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            [6, 264, 9467],
        ),
        (
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            [6, 264, 9467],
        ),
        (
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            [44, 1486, 62379],
        ),
        (
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
            [46, 2079, 89890],
        ),
    ];

    #[test]
    fn perft_verification() {
        for (fen, results) in TEST_POSITIONS {
            let mut board = Board::from_fen(fen).unwrap();
            for d in 1..=3 {
                assert_eq!(results[d - 1], perft(&mut board, d), "position {}", fen);
            }
        }
    }

    // perft with counting at horizon nodes
    fn perft(board: &mut Board, depth: usize) -> u128 {
        if depth == 0 {
            return 1;
        }
        let moves = generate(board, GenType::Legal);
        if depth == 1 {
            return moves.len() as u128;
        }

        let mut nodes = 0;
        for m in &moves {
            board.make(*m);
            nodes += perft(board, depth - 1);
            board.unmake();
        }
        nodes
    }
}
