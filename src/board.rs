use crate::castling::CastlingRights;
use crate::error::EngineError;
use crate::history::UndoEntry;
use crate::move_generator::{generate, is_square_attacked, GenType};
use crate::piece::Color::{Black, White};
use crate::piece::{CellCode, Color, Piece, PieceType};
use crate::r#move::Move;
use crate::square::{parse_square, square_at, square_representation, Square};
use std::fmt::{Display, Formatter};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Home squares that carry castling rights
const WHITE_KINGSIDE_ROOK: Square = 0x07;
const WHITE_QUEENSIDE_ROOK: Square = 0x00;
const BLACK_KINGSIDE_ROOK: Square = 0x77;
const BLACK_QUEENSIDE_ROOK: Square = 0x70;

/// The position state: a 16x8 mailbox of signed cell codes plus the metadata
/// FEN carries, and the undo stack accumulated since the last FEN load.
#[derive(Clone)]
pub struct Board {
    cells: [CellCode; 128],
    side_to_move: Color,
    castling_rights: CastlingRights,
    ep_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,

    history: Vec<UndoEntry>,
}

impl Board {
    /// Creates a board set up for a new game
    pub fn new() -> Board {
        Self::from_fen(START_FEN).expect("the start position FEN parses")
    }

    /// Creates a board from its FEN representation. The halfmove clock and
    /// fullmove number fields may be omitted and default to 0 and 1
    pub fn from_fen(fen: &str) -> Result<Board, EngineError> {
        let bad = || EngineError::BadFen(fen.to_string());
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(bad());
        }

        let mut board = Board {
            cells: [0; 128],
            side_to_move: White,
            castling_rights: CastlingRights::none(),
            ep_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::with_capacity(64),
        };

        let (mut rank, mut file) = (7usize, 0usize);
        for c in fields[0].chars() {
            match c {
                '/' => {
                    if rank == 0 {
                        return Err(bad());
                    }
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => file += c as usize - '0' as usize,
                _ => {
                    let piece = Piece::from_char(c).ok_or_else(bad)?;
                    if file > 7 {
                        return Err(bad());
                    }
                    board.cells[square_at(rank, file)] = piece.cell();
                    file += 1;
                }
            }
        }

        board.side_to_move = match fields[1] {
            "w" => White,
            "b" => Black,
            _ => return Err(bad()),
        };
        board.castling_rights = CastlingRights::from_str(fields[2]);
        board.ep_target = match fields[3] {
            "-" => None,
            s => Some(parse_square(s).ok_or_else(bad)?),
        };
        if let Some(halfmove) = fields.get(4) {
            board.halfmove_clock = halfmove.parse().map_err(|_| bad())?;
        }
        if let Some(fullmove) = fields.get(5) {
            board.fullmove_number = fullmove.parse().map_err(|_| bad())?;
        }

        Ok(board)
    }

    /// Serializes the current state back to FEN
    pub fn fen(&self) -> String {
        let mut fen = String::new();
        for rank in (0..8).rev() {
            let mut empty_counter = 0;
            for file in 0..8 {
                match Piece::from_cell(self.cells[square_at(rank, file)]) {
                    Some(p) => {
                        if empty_counter != 0 {
                            fen.push_str(&empty_counter.to_string());
                            empty_counter = 0;
                        }
                        fen.push_str(&p.to_string())
                    }
                    None => empty_counter += 1,
                }
            }
            if empty_counter != 0 {
                fen.push_str(&empty_counter.to_string())
            }
            if rank != 0 {
                fen.push('/')
            }
        }

        fen.push(' ');
        fen.push_str(&self.side_to_move.to_string());
        fen.push(' ');
        fen.push_str(&self.castling_rights.to_string());
        match self.ep_target {
            Some(sq) => {
                fen.push(' ');
                fen.push_str(&square_representation(sq).unwrap_or_else(|| String::from("-")))
            }
            None => fen.push_str(" -"),
        }
        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }

    /// Makes a move on the board.
    /// The move is expected to be pseudo-legal for the current position;
    /// applying an arbitrary move will break the position
    pub fn make(&mut self, mv: Move) {
        let origin = mv.origin();
        let target = mv.target();
        let moved_piece = self.cells[origin];

        let (captured_piece, captured_square) = if mv.is_en_passant() {
            // The captured pawn sits behind the target square
            let sq = if self.side_to_move == White {
                target - 16
            } else {
                target + 16
            };
            (self.cells[sq], sq)
        } else {
            (self.cells[target], target)
        };

        let rook_move = if mv.is_kingside_castle() {
            Some((origin + 3, origin + 1))
        } else if mv.is_queenside_castle() {
            Some((origin - 4, origin - 1))
        } else {
            None
        };

        self.history.push(UndoEntry {
            move_played: mv,
            moved_piece,
            captured_piece,
            captured_square,
            castling_rights: self.castling_rights,
            ep_target: self.ep_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            rook_move,
        });

        self.cells[captured_square] = 0;
        self.cells[origin] = 0;
        self.cells[target] = match mv.promotion_target() {
            Some(promoted) => promoted.code() * self.side_to_move.sign(),
            None => moved_piece,
        };
        if let Some((rook_origin, rook_target)) = rook_move {
            self.cells[rook_target] = self.cells[rook_origin];
            self.cells[rook_origin] = 0;
        }

        if moved_piece.abs() == PieceType::King.code() {
            self.castling_rights.uncastle(self.side_to_move);
        }
        if origin == WHITE_KINGSIDE_ROOK || target == WHITE_KINGSIDE_ROOK {
            self.castling_rights.uncastle_kingside(White);
        }
        if origin == WHITE_QUEENSIDE_ROOK || target == WHITE_QUEENSIDE_ROOK {
            self.castling_rights.uncastle_queenside(White);
        }
        if origin == BLACK_KINGSIDE_ROOK || target == BLACK_KINGSIDE_ROOK {
            self.castling_rights.uncastle_kingside(Black);
        }
        if origin == BLACK_QUEENSIDE_ROOK || target == BLACK_QUEENSIDE_ROOK {
            self.castling_rights.uncastle_queenside(Black);
        }

        self.ep_target = if mv.is_double_push() {
            Some((origin + target) / 2)
        } else {
            None
        };

        if moved_piece.abs() == PieceType::Pawn.code() || captured_piece != 0 {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Unmakes the move on top of the undo stack, restoring the exact state
    /// that preceded the corresponding `make`. Returns false when there is
    /// nothing to undo
    pub fn unmake(&mut self) -> bool {
        let entry = match self.history.pop() {
            Some(entry) => entry,
            None => return false,
        };
        let mv = entry.move_played;

        self.cells[mv.target()] = 0;
        self.cells[mv.origin()] = entry.moved_piece;
        if entry.captured_piece != 0 {
            self.cells[entry.captured_square] = entry.captured_piece;
        }
        if let Some((rook_origin, rook_target)) = entry.rook_move {
            self.cells[rook_origin] = self.cells[rook_target];
            self.cells[rook_target] = 0;
        }

        self.castling_rights = entry.castling_rights;
        self.ep_target = entry.ep_target;
        self.halfmove_clock = entry.halfmove_clock;
        self.fullmove_number = entry.fullmove_number;
        self.side_to_move = self.side_to_move.opposite();
        true
    }

    /// Given a move in long algebraic notation, makes it if it is legal
    pub fn make_from_str(&mut self, move_str: &str) -> Result<(), EngineError> {
        let (origin, target, promotion_target) = Move::parse(move_str)
            .ok_or_else(|| EngineError::BadMoveString(move_str.to_string()))?;

        let legal_moves = generate(self, GenType::Legal);
        match legal_moves.iter().find(|m| {
            m.origin() == origin && m.target() == target && m.promotion_target() == promotion_target
        }) {
            Some(mv) => {
                let mv = *mv;
                self.make(mv);
                Ok(())
            }
            None => Err(EngineError::IllegalMove(move_str.to_string())),
        }
    }

    pub fn piece_on(&self, sq: Square) -> CellCode {
        self.cells[sq]
    }

    pub fn color_on(&self, sq: Square) -> Option<Color> {
        Color::of_cell(self.cells[sq])
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = PieceType::King.code() * color.sign();
        for rank in 0..8 {
            for file in 0..8 {
                let sq = square_at(rank, file);
                if self.cells[sq] == king {
                    return Some(sq);
                }
            }
        }
        None
    }

    pub fn in_check(&self, side: Color) -> bool {
        match self.king_square(side) {
            Some(sq) => is_square_attacked(self, sq, side.opposite()),
            None => true,
        }
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn en_passant_target(&self) -> Option<Square> {
        self.ep_target
    }
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
    /// Number of moves applied since the last FEN load
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                match Piece::from_cell(self.cells[square_at(rank, file)]) {
                    Some(p) => write!(f, "{} ", p)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        writeln!(f, "  side to move: {}", self.side_to_move)?;
        writeln!(f, "  castling rights: {}", self.castling_rights)?;
        writeln!(
            f,
            "  en passant: {}",
            match self.ep_target {
                Some(sq) => square_representation(sq).unwrap_or_else(|| String::from("-")),
                None => String::from("-"),
            }
        )?;
        write!(f, "  fen: {}", self.fen())
    }
}
