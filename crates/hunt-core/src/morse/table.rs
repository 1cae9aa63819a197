//! Static Morse lookup table
//!
//! Letters are keyed by a fixed-length tuple of four [`Element`]s; letters
//! shorter than four symbols are padded with [`Element::Empty`]. The table is
//! a `const` array scanned linearly — 26 entries, no hashing, no allocation.

/// One slot of a letter code. `Empty` is padding, never produced by the
/// timing decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Empty,
    Dot,
    Dash,
}

use Element::{Dash, Dot, Empty};

/// Maximum number of dot/dash elements in one letter (A-Z never need more).
pub const MAX_LETTER_ELEMENTS: usize = 4;

/// International Morse code, A-Z.
const MORSE_TABLE: [([Element; MAX_LETTER_ELEMENTS], char); 26] = [
    ([Dot, Dash, Empty, Empty], 'A'),
    ([Dash, Dot, Dot, Dot], 'B'),
    ([Dash, Dot, Dash, Dot], 'C'),
    ([Dash, Dot, Dot, Empty], 'D'),
    ([Dot, Empty, Empty, Empty], 'E'),
    ([Dot, Dot, Dash, Dot], 'F'),
    ([Dash, Dash, Dot, Empty], 'G'),
    ([Dot, Dot, Dot, Dot], 'H'),
    ([Dot, Dot, Empty, Empty], 'I'),
    ([Dot, Dash, Dash, Dash], 'J'),
    ([Dash, Dot, Dash, Empty], 'K'),
    ([Dot, Dash, Dot, Dot], 'L'),
    ([Dash, Dash, Empty, Empty], 'M'),
    ([Dash, Dot, Empty, Empty], 'N'),
    ([Dash, Dash, Dash, Empty], 'O'),
    ([Dot, Dash, Dash, Dot], 'P'),
    ([Dash, Dash, Dot, Dash], 'Q'),
    ([Dot, Dash, Dot, Empty], 'R'),
    ([Dot, Dot, Dot, Empty], 'S'),
    ([Dash, Empty, Empty, Empty], 'T'),
    ([Dot, Dot, Dash, Empty], 'U'),
    ([Dot, Dot, Dot, Dash], 'V'),
    ([Dot, Dash, Dash, Empty], 'W'),
    ([Dash, Dot, Dot, Dash], 'X'),
    ([Dash, Dot, Dash, Dash], 'Y'),
    ([Dash, Dash, Dot, Dot], 'Z'),
];

/// Look up a padded letter code. An unmatched code is not an error: the
/// caller appends nothing and moves on.
pub fn decode_letter(code: &[Element; MAX_LETTER_ELEMENTS]) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(key, _)| key == code)
        .map(|&(_, letter)| letter)
}
