use crate::piece::Color;
use crate::piece::Color::{Black, White};
use std::fmt::{Display, Formatter};

/// Four independent rights packed in a nibble: `KQkq` from high to low bit.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub fn new() -> CastlingRights {
        CastlingRights(0b1111)
    }
    pub fn none() -> CastlingRights {
        CastlingRights(0)
    }
    pub fn from_str(s: &str) -> CastlingRights {
        let mut res = CastlingRights(0);
        if s.contains('K') {
            res.0 |= 0b1000
        }
        if s.contains('Q') {
            res.0 |= 0b0100
        }
        if s.contains('k') {
            res.0 |= 0b0010
        }
        if s.contains('q') {
            res.0 |= 0b0001
        }
        res
    }

    /// Returns the (kingside, queenside) rights of a given color
    pub fn get(&self, side: Color) -> (bool, bool) {
        match side {
            White => (self.0 & 0b1000 != 0, self.0 & 0b0100 != 0),
            _ => (self.0 & 0b10 != 0, self.0 & 0b01 != 0),
        }
    }
    /// Marks the given side as unable to castle
    pub fn uncastle(&mut self, side: Color) {
        self.0 &= match side {
            White => 0b0011,
            _ => 0b1100,
        }
    }
    /// Marks the given side as unable to castle kingside
    pub fn uncastle_kingside(&mut self, side: Color) {
        self.0 &= match side {
            White => 0b0111,
            _ => 0b1101,
        }
    }
    /// Marks the given side as unable to castle queenside
    pub fn uncastle_queenside(&mut self, side: Color) {
        self.0 &= match side {
            White => 0b1011,
            _ => 0b1110,
        }
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        let (wking, wqueen) = self.get(White);
        let (bking, bqueen) = self.get(Black);
        write!(
            f,
            "{}{}{}{}",
            if wking { "K" } else { "" },
            if wqueen { "Q" } else { "" },
            if bking { "k" } else { "" },
            if bqueen { "q" } else { "" }
        )
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_render() {
        assert_eq!(CastlingRights::from_str("KQkq").to_string(), "KQkq");
        assert_eq!(CastlingRights::from_str("Kq").to_string(), "Kq");
        assert_eq!(CastlingRights::from_str("-").to_string(), "-");
    }

    #[test]
    fn clearing_rights() {
        let mut rights = CastlingRights::new();
        rights.uncastle_kingside(White);
        assert_eq!(rights.get(White), (false, true));
        rights.uncastle(Black);
        assert_eq!(rights.get(Black), (false, false));
        rights.uncastle_queenside(White);
        assert_eq!(rights.to_string(), "-");
    }
}
