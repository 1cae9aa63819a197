//! Morse letter assembler
//!
//! Accumulates decoded symbols into an in-progress letter code, maps
//! completed codes through the static table, and maintains the transcript
//! the rest of the game reads (the player name, the riddle answer).

use heapless::{String, Vec};
use log::debug;
use thiserror_no_std::Error;

use crate::morse::decoder::Symbol;
use crate::morse::table::{self, Element, MAX_LETTER_ELEMENTS};

/// Capacity of the transcript buffer. Letters landing on a full transcript
/// are dropped silently, like an unmatched code.
pub const TRANSCRIPT_CAPACITY: usize = 32;

/// The one recoverable error of the input pipeline. The letter buffer is
/// already cleared when this is returned; the caller logs and carries on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorseError {
    #[error("a letter holds at most 4 Morse symbols")]
    LetterOverflow,
}

/// In-progress letter plus the accumulated transcript.
pub struct LetterAssembler {
    code: Vec<Element, MAX_LETTER_ELEMENTS>,
    transcript: String<TRANSCRIPT_CAPACITY>,
}

impl LetterAssembler {
    pub fn new() -> Self {
        Self {
            code: Vec::new(),
            transcript: String::new(),
        }
    }

    /// Consume one committed symbol.
    ///
    /// * `Dot`/`Dash` extend the current letter; a fifth element clears the
    ///   letter and reports [`MorseError::LetterOverflow`].
    /// * `LetterEnd` looks the letter up and appends the match, if any — a
    ///   typo costs the player that letter, nothing more.
    /// * `Reset` removes the last transcribed character; on an empty
    ///   transcript it is a no-op.
    pub fn consume(&mut self, symbol: Symbol) -> Result<(), MorseError> {
        match symbol {
            Symbol::Dot | Symbol::Dash => {
                if self.code.is_full() {
                    self.code.clear();
                    return Err(MorseError::LetterOverflow);
                }
                let element = match symbol {
                    Symbol::Dot => Element::Dot,
                    _ => Element::Dash,
                };
                self.code.push(element).ok();
            }
            Symbol::LetterEnd => {
                if let Some(letter) = table::decode_letter(&self.padded_code()) {
                    self.transcript.push(letter).ok();
                }
                debug!("transcript: {}", self.transcript);
                self.code.clear();
            }
            Symbol::Reset => {
                self.transcript.pop();
                self.code.clear();
            }
        }
        Ok(())
    }

    /// The transcribed text so far.
    pub fn transcript(&self) -> &str {
        self.transcript.as_str()
    }

    /// Display glyphs of the already-committed elements of the current
    /// letter (`'o'` and `'-'`).
    pub fn committed_glyphs(&self) -> String<MAX_LETTER_ELEMENTS> {
        let mut glyphs = String::new();
        for element in self.code.iter() {
            let glyph = match element {
                Element::Dot => 'o',
                Element::Dash => '-',
                Element::Empty => continue,
            };
            glyphs.push(glyph).ok();
        }
        glyphs
    }

    /// Drop the transcript, keeping the in-progress letter.
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    /// Drop both the transcript and the in-progress letter.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.code.clear();
    }

    fn padded_code(&self) -> [Element; MAX_LETTER_ELEMENTS] {
        let mut padded = [Element::Empty; MAX_LETTER_ELEMENTS];
        for (slot, element) in padded.iter_mut().zip(self.code.iter()) {
            *slot = *element;
        }
        padded
    }
}

impl Default for LetterAssembler {
    fn default() -> Self {
        Self::new()
    }
}
