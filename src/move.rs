use crate::piece::PieceType::{Bishop, Knight, Queen, Rook};
use crate::piece::{Color, PieceType};
use crate::square::{self, square_representation, Square};
use std::fmt::{Display, Formatter};

/// An immutable move record: origin and target squares, an optional
/// promotion piece type, and a bitset of special-move flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    origin: Square,
    target: Square,
    promotion: Option<PieceType>,
    flags: u8,
}

pub const FLAG_CAPTURE: u8 = 0b1;
pub const FLAG_PROMOTION: u8 = 0b10;
pub const FLAG_EN_PASSANT: u8 = 0b100;
pub const FLAG_KINGSIDE_CASTLE: u8 = 0b1000;
pub const FLAG_QUEENSIDE_CASTLE: u8 = 0b10000;
pub const FLAG_DOUBLE_PUSH: u8 = 0b100000;

impl Move {
    fn new(origin: Square, target: Square, promotion: Option<PieceType>, flags: u8) -> Move {
        Move {
            origin,
            target,
            promotion,
            flags,
        }
    }
    pub fn new_quiet(origin: Square, target: Square) -> Move {
        Self::new(origin, target, None, 0)
    }
    pub fn new_double_push(origin: Square, target: Square) -> Move {
        Self::new(origin, target, None, FLAG_DOUBLE_PUSH)
    }
    pub fn new_capture(origin: Square, target: Square) -> Move {
        Self::new(origin, target, None, FLAG_CAPTURE)
    }
    pub fn new_en_passant(origin: Square, target: Square) -> Move {
        Self::new(origin, target, None, FLAG_CAPTURE | FLAG_EN_PASSANT)
    }
    pub fn new_kingside_castle(color: Color) -> Move {
        match color {
            Color::White => Self::new(0x04, 0x06, None, FLAG_KINGSIDE_CASTLE),
            Color::Black => Self::new(0x74, 0x76, None, FLAG_KINGSIDE_CASTLE),
        }
    }
    pub fn new_queenside_castle(color: Color) -> Move {
        match color {
            Color::White => Self::new(0x04, 0x02, None, FLAG_QUEENSIDE_CASTLE),
            Color::Black => Self::new(0x74, 0x72, None, FLAG_QUEENSIDE_CASTLE),
        }
    }
    pub fn new_promotion(origin: Square, target: Square, promote_to: PieceType) -> Move {
        Self::new(origin, target, Some(promote_to), FLAG_PROMOTION)
    }
    pub fn new_promotion_capture(origin: Square, target: Square, promote_to: PieceType) -> Move {
        Self::new(
            origin,
            target,
            Some(promote_to),
            FLAG_PROMOTION | FLAG_CAPTURE,
        )
    }
    pub fn all_promotions(origin: Square, target: Square) -> [Move; 4] {
        [
            Self::new_promotion(origin, target, Queen),
            Self::new_promotion(origin, target, Rook),
            Self::new_promotion(origin, target, Bishop),
            Self::new_promotion(origin, target, Knight),
        ]
    }
    pub fn all_promotion_captures(origin: Square, target: Square) -> [Move; 4] {
        [
            Self::new_promotion_capture(origin, target, Queen),
            Self::new_promotion_capture(origin, target, Rook),
            Self::new_promotion_capture(origin, target, Bishop),
            Self::new_promotion_capture(origin, target, Knight),
        ]
    }

    pub fn origin(&self) -> Square {
        self.origin
    }
    pub fn target(&self) -> Square {
        self.target
    }
    pub fn promotion_target(&self) -> Option<PieceType> {
        self.promotion
    }
    pub fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }
    pub fn is_promotion(&self) -> bool {
        self.flags & FLAG_PROMOTION != 0
    }
    pub fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }
    pub fn is_kingside_castle(&self) -> bool {
        self.flags & FLAG_KINGSIDE_CASTLE != 0
    }
    pub fn is_queenside_castle(&self) -> bool {
        self.flags & FLAG_QUEENSIDE_CASTLE != 0
    }
    pub fn is_double_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PUSH != 0
    }

    /// Parses a move formatted in long algebraic notation.
    /// Since no information can be given on flags, it simply returns origin,
    /// target and potential piece type to promote to
    pub fn parse(mv: &str) -> Option<(Square, Square, Option<PieceType>)> {
        if mv.len() < 4 || !mv.is_ascii() {
            return None;
        }
        let origin = square::parse_square(&mv[0..2])?;
        let target = square::parse_square(&mv[2..4])?;
        let promotion_target = if mv.len() == 5 {
            match &mv[4..] {
                "b" => Some(Bishop),
                "n" => Some(Knight),
                "r" => Some(Rook),
                "q" => Some(Queen),
                _ => return None,
            }
        } else if mv.len() == 4 {
            None
        } else {
            return None;
        };
        Some((origin, target, promotion_target))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let o = square_representation(self.origin).unwrap_or_else(|| String::from("**"));
        let t = square_representation(self.target).unwrap_or_else(|| String::from("**"));
        if let Some(p) = self.promotion {
            write!(f, "{}{}{}", o, t, p)
        } else {
            write!(f, "{}{}", o, t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_long_algebraic() {
        assert_eq!(Move::parse("e2e4"), Some((0x14, 0x34, None)));
        assert_eq!(Move::parse("a7a8q"), Some((0x60, 0x70, Some(Queen))));
        assert_eq!(Move::parse("a7a8x"), None);
        assert_eq!(Move::parse("e2"), None);
        assert_eq!(Move::parse("e2e4e5"), None);
    }

    #[test]
    fn uci_rendering() {
        assert_eq!(Move::new_quiet(0x14, 0x34).to_string(), "e2e4");
        assert_eq!(
            Move::new_promotion_capture(0x61, 0x70, Queen).to_string(),
            "b7a8q"
        );
        assert_eq!(Move::new_kingside_castle(Color::White).to_string(), "e1g1");
        assert_eq!(Move::new_queenside_castle(Color::Black).to_string(), "e8c8");
    }

    #[test]
    fn flag_accessors() {
        let ep = Move::new_en_passant(0x44, 0x53);
        assert!(ep.is_capture() && ep.is_en_passant());
        assert!(!ep.is_promotion());
        let push = Move::new_double_push(0x14, 0x34);
        assert!(push.is_double_push() && !push.is_capture());
    }
}
