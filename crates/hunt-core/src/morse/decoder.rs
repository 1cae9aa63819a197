//! Morse timing decoder
//!
//! Classifies raw hold/release durations on the touch input into committed
//! [`Symbol`]s. Duration of the press encodes the symbol; letter separation
//! is signaled by a short tap rather than a pause, which suits a single
//! touch-sensor interface:
//!
//! | held for              | on release    |
//! |-----------------------|---------------|
//! | under 200 ms          | letter end    |
//! | 200 ms - 1.5 s        | dot           |
//! | 1.5 s - 3.5 s         | dash          |
//! | 3.5 s and up          | reset         |
//!
//! While the input is held the decoder also offers a live preview glyph so
//! the player can watch the symbol change under their finger.

use log::debug;

use crate::hal::elapsed_ms;

/// Release duration below this commits no symbol but ends the letter.
pub const LETTER_END_MS: u32 = 200;
/// Hold durations at or above this (and below reset) classify as dash.
pub const DASH_BOUNDARY_MS: u32 = 1500;
/// Hold durations at or above this classify as reset (backspace).
pub const RESET_BOUNDARY_MS: u32 = 3500;

/// One classified unit of Morse timing, committed on release. A tick with
/// no release event yields `None` from [`TimingDecoder::sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Dot,
    Dash,
    LetterEnd,
    Reset,
}

/// Hold-timer state for the touch input. One instance per touch pin.
pub struct TimingDecoder {
    armed: bool,
    press_start: u32,
    last_held: u32,
}

impl TimingDecoder {
    pub const fn new() -> Self {
        Self {
            armed: false,
            press_start: 0,
            last_held: 0,
        }
    }

    /// Feed one tick of the raw touch level. Emits the classified symbol
    /// exactly once, on the tick where the input transitions to released.
    pub fn sample(&mut self, held: bool, now_ms: u32) -> Option<Symbol> {
        if held {
            if !self.armed {
                self.armed = true;
                self.press_start = now_ms;
            }
            self.last_held = now_ms;
            return None;
        }

        if !self.armed {
            return None;
        }

        // Classify from the timestamp captured on the last held tick.
        let held_for = elapsed_ms(self.last_held, self.press_start);
        self.armed = false;

        let symbol = if held_for < LETTER_END_MS {
            debug!("Space");
            Symbol::LetterEnd
        } else if held_for < DASH_BOUNDARY_MS {
            debug!("Dot");
            Symbol::Dot
        } else if held_for < RESET_BOUNDARY_MS {
            debug!("Dash");
            Symbol::Dash
        } else {
            debug!("Reset");
            Symbol::Reset
        };

        Some(symbol)
    }

    /// Display glyph for the symbol currently forming under the held input:
    /// `'o'` dot, `'-'` dash, `'R'` reset. `None` below the dot threshold or
    /// while the input is idle.
    pub fn preview_glyph(&self, now_ms: u32) -> Option<char> {
        if !self.armed {
            return None;
        }

        match elapsed_ms(now_ms, self.press_start) {
            t if t >= RESET_BOUNDARY_MS => Some('R'),
            t if t >= DASH_BOUNDARY_MS => Some('-'),
            t if t >= LETTER_END_MS => Some('o'),
            _ => None,
        }
    }
}

impl Default for TimingDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hold for exactly `ms`, ticking every millisecond, then release.
    fn hold_and_release(decoder: &mut TimingDecoder, start: u32, ms: u32) -> Option<Symbol> {
        for t in 0..=ms {
            assert_eq!(decoder.sample(true, start + t), None);
        }
        decoder.sample(false, start + ms + 1)
    }

    #[test]
    fn test_boundary_classification() {
        let mut decoder = TimingDecoder::new();
        let cases = [
            (199, Symbol::LetterEnd),
            (200, Symbol::Dot),
            (1499, Symbol::Dot),
            (1500, Symbol::Dash),
            (3499, Symbol::Dash),
            (3500, Symbol::Reset),
        ];

        let mut t = 0;
        for (ms, expected) in cases {
            assert_eq!(
                hold_and_release(&mut decoder, t, ms),
                Some(expected),
                "{ms} ms hold"
            );
            t += ms + 500;
        }
    }

    #[test]
    fn test_symbol_emitted_exactly_once_per_release() {
        let mut decoder = TimingDecoder::new();
        assert_eq!(hold_and_release(&mut decoder, 0, 300), Some(Symbol::Dot));
        // Further idle ticks stay silent until the next press.
        for t in 400..600 {
            assert_eq!(decoder.sample(false, t), None);
        }
    }

    #[test]
    fn test_preview_follows_hold_duration() {
        let mut decoder = TimingDecoder::new();
        decoder.sample(true, 0);

        assert_eq!(decoder.preview_glyph(100), None);
        assert_eq!(decoder.preview_glyph(200), Some('o'));
        assert_eq!(decoder.preview_glyph(1499), Some('o'));
        assert_eq!(decoder.preview_glyph(1500), Some('-'));
        assert_eq!(decoder.preview_glyph(3500), Some('R'));

        decoder.sample(false, 3600);
        assert_eq!(decoder.preview_glyph(3700), None, "idle input has no preview");
    }

    #[test]
    fn test_classification_survives_clock_wraparound() {
        let mut decoder = TimingDecoder::new();
        let start = u32::MAX - 100;
        decoder.sample(true, start);
        decoder.sample(true, start.wrapping_add(300));
        assert_eq!(decoder.sample(false, start.wrapping_add(310)), Some(Symbol::Dot));
    }
}
