//! Hardware-independent core library for the treasure-hunt game device
//!
//! This crate contains all platform-agnostic logic for the single-board
//! "treasure hunt" game: the Morse-code touch input pipeline, the debounced
//! push button, the rotary-angle and light sensor conversions, the 16x2
//! display throttler, and the turn-based adventure state machine that ties
//! them together.
//!
//! It is `#![no_std]` so it compiles on both embedded targets and desktop
//! hosts (for the simulator and tests). Peripherals are abstracted behind the
//! polling traits in [`hal`]; the whole crate is driven by one non-blocking
//! `tick` per loop iteration of the host.

#![no_std]

pub mod adventure;
pub mod button;
pub mod hal;
pub mod morse;
pub mod screen;
pub mod sensors;

pub use adventure::{Adventure, EndPolicy, Peripherals};
pub use button::DebouncedButton;
pub use morse::{MorseError, MorseInput, Symbol};
pub use screen::Screen;
pub use sensors::{LightSensor, RotaryAngleSensor};
