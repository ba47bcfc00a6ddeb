use crate::piece::Color::{Black, White};
use crate::piece::PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};
use std::fmt::{Display, Formatter};

/// Board cells hold a signed code: 0 for an empty square, a positive piece
/// type code for White, the negated code for Black.
pub type CellCode = i8;

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceType {
    /// The unsigned magnitude stored in a mailbox cell (1=pawn .. 6=king)
    pub fn code(&self) -> CellCode {
        match self {
            Pawn => 1,
            Knight => 2,
            Bishop => 3,
            Rook => 4,
            Queen => 5,
            King => 6,
        }
    }
    pub fn from_code(code: CellCode) -> Option<PieceType> {
        match code.abs() {
            1 => Some(Pawn),
            2 => Some(Knight),
            3 => Some(Bishop),
            4 => Some(Rook),
            5 => Some(Queen),
            6 => Some(King),
            _ => None,
        }
    }
}
impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Pawn => "p",
                Knight => "n",
                Bishop => "b",
                Rook => "r",
                Queen => "q",
                King => "k",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}
impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            White => Black,
            Black => White,
        }
    }
    /// Sign of this side's cell codes (and of its pawns' push direction)
    pub fn sign(&self) -> CellCode {
        match self {
            White => 1,
            Black => -1,
        }
    }
    pub fn of_cell(code: CellCode) -> Option<Color> {
        if code > 0 {
            Some(White)
        } else if code < 0 {
            Some(Black)
        } else {
            None
        }
    }
}
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self == &Black { "b" } else { "w" })
    }
}

impl Piece {
    pub fn from_char(c: char) -> Option<Piece> {
        let piece_type = match c.to_lowercase().next().unwrap_or('_') {
            'p' => Pawn,
            'n' => Knight,
            'b' => Bishop,
            'r' => Rook,
            'q' => Queen,
            'k' => King,
            _ => return None,
        };
        let color = if c.is_lowercase() { Black } else { White };
        Some(Piece { piece_type, color })
    }

    pub fn from_cell(code: CellCode) -> Option<Piece> {
        Some(Piece {
            piece_type: PieceType::from_code(code)?,
            color: Color::of_cell(code)?,
        })
    }

    pub fn cell(&self) -> CellCode {
        self.piece_type.code() * self.color.sign()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.piece_type.to_string();
        write!(
            f,
            "{}",
            if self.color == White { s.to_uppercase() } else { s }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_codes_round_trip() {
        for c in "PNBRQKpnbrqk".chars() {
            let piece = Piece::from_char(c).unwrap();
            assert_eq!(Piece::from_cell(piece.cell()), Some(piece));
            assert_eq!(piece.to_string(), c.to_string());
        }
        assert_eq!(Piece::from_cell(0), None);
        assert_eq!(Piece::from_cell(7), None);
    }

    #[test]
    fn color_signs() {
        assert_eq!(Color::White.sign(), 1);
        assert_eq!(Color::Black.sign(), -1);
        assert_eq!(Color::of_cell(-6), Some(Color::Black));
        assert_eq!(Color::of_cell(1), Some(Color::White));
    }
}
