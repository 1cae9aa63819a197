//! Morse-code text entry over a single touch sensor
//!
//! The pipeline has two halves: [`TimingDecoder`] turns raw hold/release
//! durations into committed [`Symbol`]s, and [`LetterAssembler`] folds those
//! symbols into letters and a transcript. [`MorseInput`] pairs them behind
//! one `poll` per tick and builds the live preview line for the display.

mod assembler;
mod decoder;
mod table;

pub use assembler::{LetterAssembler, MorseError, TRANSCRIPT_CAPACITY};
pub use decoder::{DASH_BOUNDARY_MS, LETTER_END_MS, RESET_BOUNDARY_MS, Symbol, TimingDecoder};
pub use table::{Element, MAX_LETTER_ELEMENTS, decode_letter};

use heapless::String;

/// Glyph capacity of the preview line: four committed elements plus the
/// in-progress one.
const PREVIEW_CAPACITY: usize = MAX_LETTER_ELEMENTS + 1;

/// Complete Morse text-entry unit for one touch pin.
pub struct MorseInput {
    decoder: TimingDecoder,
    assembler: LetterAssembler,
}

impl MorseInput {
    pub fn new() -> Self {
        Self {
            decoder: TimingDecoder::new(),
            assembler: LetterAssembler::new(),
        }
    }

    /// Drive the pipeline with one tick of the raw touch level.
    ///
    /// Returns [`MorseError::LetterOverflow`] when a fifth element lands in
    /// one letter; the letter buffer is already cleared and the next tick
    /// proceeds normally.
    pub fn poll(&mut self, touch_held: bool, now_ms: u32) -> Result<(), MorseError> {
        match self.decoder.sample(touch_held, now_ms) {
            Some(symbol) => self.assembler.consume(symbol),
            None => Ok(()),
        }
    }

    /// The transcribed text so far.
    pub fn transcript(&self) -> &str {
        self.assembler.transcript()
    }

    /// Committed glyphs of the in-progress letter plus the live preview of
    /// the symbol currently forming under the player's finger.
    pub fn preview(&self, now_ms: u32) -> String<PREVIEW_CAPACITY> {
        let mut line: String<PREVIEW_CAPACITY> = String::new();
        line.push_str(self.assembler.committed_glyphs().as_str()).ok();
        if let Some(glyph) = self.decoder.preview_glyph(now_ms) {
            line.push(glyph).ok();
        }
        line
    }

    /// Drop the transcript, keeping any in-progress letter.
    pub fn clear_transcript(&mut self) {
        self.assembler.clear_transcript();
    }

    /// Drop the transcript and the in-progress letter.
    pub fn reset(&mut self) {
        self.assembler.reset();
    }
}

impl Default for MorseInput {
    fn default() -> Self {
        Self::new()
    }
}
