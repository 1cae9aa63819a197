//! Edge-detected push-button reader with a fixed settle interval
//!
//! Mechanical buttons bounce; this reader requires the input level to hold
//! for [`SETTLE_MS`] before an edge counts. One physical press/release pair
//! yields at most one `true` from [`DebouncedButton::was_pushed`], no matter
//! how fast the host ticks.

use crate::hal::{DigitalInput, elapsed_ms};

/// Minimum interval the reference level must stand before comparison.
pub const SETTLE_MS: u32 = 100;

/// Debounced button over one digital input.
///
/// On each call the reader latches a reference level and timestamp whenever
/// no reference is held (or the held reference is "released"). Once at least
/// [`SETTLE_MS`] has passed since the latch, the reference is compared with a
/// fresh sample; a difference is reported as exactly one push event, then
/// the latch restarts.
pub struct DebouncedButton<P> {
    pin: P,
    latched: bool,
    ref_level: bool,
    ref_time: u32,
}

impl<P: DigitalInput> DebouncedButton<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            latched: false,
            ref_level: false,
            ref_time: 0,
        }
    }

    /// Poll the button once per tick. Returns `true` on a detected push.
    pub fn was_pushed(&mut self, now_ms: u32) -> bool {
        if !self.latched || !self.ref_level {
            self.ref_time = now_ms;
            self.ref_level = self.pin.is_high();
            self.latched = true;
        }

        if elapsed_ms(now_ms, self.ref_time) > SETTLE_MS {
            self.ref_time = now_ms;
            self.latched = false;
            return self.ref_level != self.pin.is_high();
        }

        false
    }
}
