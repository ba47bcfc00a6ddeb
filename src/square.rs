pub type Square = usize;

// A square index is valid when its 0x88 mask is clear, which rejects both
// the padding files and out-of-range indices in a single test.
pub const OFF_BOARD_MASK: usize = 0x88;

pub fn rank_of(sq: Square) -> usize {
    sq >> 4
}
pub fn file_of(sq: Square) -> usize {
    sq & 7
}
pub fn square_at(rank: usize, file: usize) -> Square {
    (rank << 4) | file
}

/// Checks whether a given index addresses a real square of the padded board
/// ```
/// use minnow::square::is_valid;
/// assert!(is_valid(0x34));
/// assert!(!is_valid(0x38));
/// assert!(!is_valid(0x80));
/// ```
pub fn is_valid(sq: Square) -> bool {
    sq & OFF_BOARD_MASK == 0
}

/// Parses a square from a given string slice,
/// only caring that the first two characters form a valid square representation
/// ```
/// use minnow::square::parse_square;
/// assert_eq!(parse_square("e4"), Some(0x34));
/// assert_eq!(parse_square("d2someotherstuff"), Some(0x13));
/// assert_eq!(parse_square("randoma1stuff"), None);
/// assert_eq!(parse_square("k9"), None);
/// ```
pub fn parse_square(s: &str) -> Option<Square> {
    let mut chars_iter = s.chars();
    let file = match chars_iter.next() {
        Some(c @ 'a'..='h') => c as usize - 'a' as usize,
        _ => return None,
    };
    let rank = match chars_iter.next() {
        Some(c) => match c.to_digit(10) {
            Some(i) if (1..=8).contains(&i) => i as usize - 1,
            _ => return None,
        },
        _ => return None,
    };
    Some(square_at(rank, file))
}

/// Returns the string representation of a square
/// ```
/// use minnow::square::square_representation;
/// assert_eq!(square_representation(0x34), Some(String::from("e4")));
/// assert_eq!(square_representation(0x13), Some(String::from("d2")));
/// assert_eq!(square_representation(0x88), None);
/// ```
pub fn square_representation(sq: Square) -> Option<String> {
    if !is_valid(sq) {
        return None;
    }
    let rank = ('1'..='8').nth(rank_of(sq))?;
    let file = ('a'..='h').nth(file_of(sq))?;
    let mut repr = file.to_string();
    repr.push(rank);
    Some(repr)
}
