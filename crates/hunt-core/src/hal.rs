//! Peripheral abstraction for the game core
//!
//! The game logic never talks to registers or buses directly. The host (real
//! firmware or the desktop simulator) implements these small polling traits
//! and hands the implementations to [`Peripherals`](crate::Peripherals).
//! Every read is a non-blocking poll; every value is re-sampled each tick.
//!
//! Adapters are provided for `embedded-hal` 1.0 pin drivers so GPIO
//! implementations from HAL crates plug in directly.

/// Debounce/decoder logic is polarity-sensitive: a digital input reads
/// `true` while the physical line is at its active (pressed) level.
pub trait DigitalInput {
    fn is_high(&mut self) -> bool;
}

/// Raw analog sample. On-chip ADCs report 0..=1023; external converter
/// channels (the light sensor path) report signed 16-bit counts.
pub trait AnalogInput {
    fn read_raw(&mut self) -> i32;
}

/// Boolean actuator output (the LED).
pub trait DigitalOutput {
    fn set_high(&mut self);
    fn set_low(&mut self);
}

/// Two-line, 16-characters-per-line character display.
///
/// `write_line` replaces the full row: implementations must blank the
/// remainder of the row when `text` is shorter than 16 characters.
pub trait Lcd {
    fn write_line(&mut self, row: u8, text: &str);
    fn clear(&mut self);
}

/// Monotonic millisecond clock. Wraps at `u32::MAX`; all interval math in
/// this crate goes through [`elapsed_ms`] so wraparound is harmless.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Milliseconds elapsed between a latched timestamp and now.
///
/// Unsigned wrapping subtraction keeps intervals correct across clock
/// wraparound as long as the interval itself is below `u32::MAX` ms.
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Bridges an `embedded-hal` [`InputPin`](embedded_hal::digital::InputPin)
/// into [`DigitalInput`]. A pin read failure is treated as "not pressed";
/// the state machine tolerates stale or garbage samples by design.
pub struct InputPinAdapter<P>(pub P);

impl<P: embedded_hal::digital::InputPin> DigitalInput for InputPinAdapter<P> {
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or(false)
    }
}

/// Bridges an `embedded-hal` [`OutputPin`](embedded_hal::digital::OutputPin)
/// into [`DigitalOutput`].
pub struct OutputPinAdapter<P>(pub P);

impl<P: embedded_hal::digital::OutputPin> DigitalOutput for OutputPinAdapter<P> {
    fn set_high(&mut self) {
        self.0.set_high().ok();
    }

    fn set_low(&mut self) {
        self.0.set_low().ok();
    }
}
