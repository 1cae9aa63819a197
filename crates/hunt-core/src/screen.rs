//! Display throttler for the 16x2 character LCD
//!
//! Character LCDs are slow and flicker on rewrites, so every write path is
//! latched: a string identical to the last one shown is not sent to the
//! panel again. Long strings scroll horizontally, one character every
//! [`SCROLL_INTERVAL_MS`].

use heapless::String;

use crate::hal::{Lcd, elapsed_ms};

/// Characters per LCD row.
pub const LINE_WIDTH: usize = 16;
/// Scroll step interval for strings longer than two rows.
pub const SCROLL_INTERVAL_MS: u32 = 700;

/// Longest story line the game displays.
const TEXT_CAPACITY: usize = 96;

/// Throttled view of one [`Lcd`] panel.
///
/// Two write paths exist, matching how the game uses the screen:
/// [`show`](Self::show) renders a whole string across both rows (splitting
/// and scrolling as needed), while [`show_line`](Self::show_line) drives one
/// row independently (Morse entry, live heading readout).
pub struct Screen<D> {
    lcd: D,
    last_text: String<TEXT_CAPACITY>,
    last_lines: [String<TEXT_CAPACITY>; 2],
    scroll_idx: usize,
    scroll_armed: bool,
    scroll_since: u32,
}

impl<D: Lcd> Screen<D> {
    pub fn new(lcd: D) -> Self {
        Self {
            lcd,
            last_text: String::new(),
            last_lines: [String::new(), String::new()],
            scroll_idx: 0,
            scroll_armed: false,
            scroll_since: 0,
        }
    }

    /// Display a whole string. Fits on one row up to 16 characters, on two
    /// rows up to 32, and scrolls beyond that.
    pub fn show(&mut self, text: &str, now_ms: u32) {
        let changed = self.last_text.as_str() != text;
        if changed {
            self.last_text.clear();
            self.last_text.push_str(text).ok();
            self.scroll_idx = 0;
            self.scroll_armed = false;
        }

        let char_count = text.chars().count();
        if char_count <= 2 * LINE_WIDTH {
            if changed {
                let (first, second) = split_rows(text);
                self.write_rows(first, second);
            }
            return;
        }

        // Scrolling text: redraw the 32-character window on each step.
        if !self.scroll_armed {
            self.scroll_armed = true;
            self.scroll_since = now_ms;
            let (first, second) = window_rows(text, self.scroll_idx);
            self.write_rows(first, second);
            return;
        }

        if elapsed_ms(now_ms, self.scroll_since) > SCROLL_INTERVAL_MS {
            self.scroll_since = now_ms;
            if self.scroll_idx + 2 * LINE_WIDTH < char_count {
                self.scroll_idx += 1;
            } else {
                self.scroll_idx = 0;
            }
            let (first, second) = window_rows(text, self.scroll_idx);
            self.write_rows(first, second);
        }
    }

    /// Display one row, untouched by the full-screen path's latch.
    ///
    /// The whole string is latched even when only its first 16 characters
    /// fit the row, so repeating a long line stays silent.
    pub fn show_line(&mut self, row: u8, text: &str) {
        let latch = &mut self.last_lines[usize::from(row) & 1];
        if latch.as_str() == text {
            return;
        }
        latch.clear();
        latch.push_str(text).ok();
        self.lcd.write_line(row, &text[..char_offset(text, LINE_WIDTH)]);
    }

    /// Blank the panel and forget every latch, forcing the next write out.
    pub fn clear(&mut self) {
        self.last_text.clear();
        self.last_lines[0].clear();
        self.last_lines[1].clear();
        self.scroll_armed = false;
        self.scroll_idx = 0;
        self.lcd.clear();
    }

    fn write_rows(&mut self, first: &str, second: &str) {
        self.lcd.write_line(0, first);
        self.lcd.write_line(1, second);
        self.last_lines[0].clear();
        self.last_lines[0].push_str(first).ok();
        self.last_lines[1].clear();
        self.last_lines[1].push_str(second).ok();
    }
}

/// Byte offset of the `n`th character, or the string's length when it is
/// shorter than that. Keeps every slice below on a char boundary.
fn char_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(at, _)| at)
}

/// Split a short string (at most 32 chars) across the two rows.
fn split_rows(text: &str) -> (&str, &str) {
    text.split_at(char_offset(text, LINE_WIDTH))
}

/// The 32-character window of a scrolling string starting at char `idx`.
fn window_rows(text: &str, idx: usize) -> (&str, &str) {
    let start = char_offset(text, idx);
    let mid = char_offset(text, idx + LINE_WIDTH);
    let end = char_offset(text, idx + 2 * LINE_WIDTH);
    (&text[start..mid], &text[mid..end])
}
