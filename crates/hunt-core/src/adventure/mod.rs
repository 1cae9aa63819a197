//! The adventure state machine
//!
//! A strictly linear sequence of narrative steps driven by one non-blocking
//! [`tick`](Adventure::tick) per host loop iteration. Each tick the active
//! step re-displays its content through the throttled [`Screen`], evaluates
//! its advance predicate against freshly sampled peripherals, and on success
//! performs a one-shot transition action before moving to the next step.
//!
//! The machine owns the step index and the latched player name; the Morse
//! pipeline owns its letter buffer and transcript; peripherals are stateless
//! sampling collaborators handed in via [`Peripherals`].

pub mod script;

use core::fmt::Write as _;

use heapless::String;
use log::{debug, info, warn};

use crate::button::DebouncedButton;
use crate::hal::{AnalogInput, Clock, DigitalInput, DigitalOutput, Lcd};
use crate::morse::MorseInput;
use crate::screen::Screen;
use crate::sensors::{LightSensor, RotaryAngleSensor};
use script::{SCRIPT, StepKind};

/// Capacity of the latched player name.
pub const NAME_CAPACITY: usize = 16;

/// Longest rendered story line, name included.
const LINE_CAPACITY: usize = 96;

/// What happens after the finale step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndPolicy {
    /// Stay on the finale screen forever.
    #[default]
    Halt,
    /// A button press on the finale restarts the story from step 0 with a
    /// fresh name and transcript.
    Restart,
}

/// The game's peripheral set, constructed once by the host and passed into
/// every tick. Single-instance semantics per physical pin without hidden
/// globals: each field is an explicit owned handle.
pub struct Peripherals<T, B, A, L, O, D, C> {
    pub touch: T,
    pub button: DebouncedButton<B>,
    pub helm: RotaryAngleSensor<A>,
    pub light: LightSensor<L>,
    pub led: O,
    pub screen: Screen<D>,
    pub clock: C,
}

/// The turn-based story machine.
pub struct Adventure {
    step: usize,
    entered: bool,
    policy: EndPolicy,
    player_name: String<NAME_CAPACITY>,
    morse: MorseInput,
    last_angle: Option<i32>,
}

impl Adventure {
    pub fn new(policy: EndPolicy) -> Self {
        Self {
            step: 0,
            entered: false,
            policy,
            player_name: String::new(),
            morse: MorseInput::new(),
            last_angle: None,
        }
    }

    /// Current step index (0..=20).
    pub fn step(&self) -> usize {
        self.step
    }

    /// The name latched at the name-entry step; empty before that.
    pub fn player_name(&self) -> &str {
        self.player_name.as_str()
    }

    /// Whether the finale step is active.
    pub fn is_finished(&self) -> bool {
        self.step == SCRIPT.len() - 1
    }

    /// Advance the game by one tick. Non-blocking; call at a roughly
    /// constant cadence.
    pub fn tick<T, B, A, L, O, D, C>(&mut self, io: &mut Peripherals<T, B, A, L, O, D, C>)
    where
        T: DigitalInput,
        B: DigitalInput,
        A: AnalogInput,
        L: AnalogInput,
        O: DigitalOutput,
        D: Lcd,
        C: Clock,
    {
        let now = io.clock.now_ms();

        if !self.entered {
            self.entered = true;
            self.enter_step(&mut io.screen);
        }

        match SCRIPT[self.step].kind {
            StepKind::Dialogue => {
                let line = self.render(SCRIPT[self.step].text);
                io.screen.show(line.as_str(), now);
                if io.button.was_pushed(now) {
                    self.advance();
                }
            }

            StepKind::NameEntry => {
                self.poll_morse(io, now);
                if io.button.was_pushed(now) {
                    self.latch_player_name();
                    self.advance();
                }
            }

            StepKind::RiddleAnswer { answer } => {
                self.poll_morse(io, now);
                if self.morse.transcript() == answer {
                    self.advance();
                }
            }

            StepKind::Heading { min_deg, max_deg } => {
                io.screen.show_line(0, SCRIPT[self.step].text);

                let angle = io.helm.read_angle() as i32;
                let moved = match self.last_angle {
                    None => true,
                    Some(last) => (angle - last).abs() > 1,
                };
                if moved {
                    self.last_angle = Some(angle);
                    let mut readout: String<16> = String::new();
                    write!(readout, "{angle} degrees").ok();
                    io.screen.show_line(1, readout.as_str());
                }

                let pushed = io.button.was_pushed(now);
                if (min_deg..=max_deg).contains(&angle) && pushed {
                    self.advance();
                }
            }

            StepKind::Torch { min_level } => {
                let line = self.render(SCRIPT[self.step].text);
                io.screen.show(line.as_str(), now);

                let level = io.light.read_level();
                debug!("light level: {level}");
                if level >= min_level {
                    io.led.set_high();
                    self.advance();
                }
            }

            StepKind::Finale => {
                let line = self.render(SCRIPT[self.step].text);
                io.screen.show(line.as_str(), now);

                if io.button.was_pushed(now) && self.policy == EndPolicy::Restart {
                    info!("restarting the adventure");
                    self.restart(io);
                }
            }
        }
    }

    /// One-shot entry work for the step that just became active.
    fn enter_step<D: Lcd>(&mut self, screen: &mut Screen<D>) {
        let step = &SCRIPT[self.step];

        match step.kind {
            StepKind::NameEntry | StepKind::RiddleAnswer { .. } => {
                // Morse steps start with a clean transcript and panel.
                self.morse.reset();
                screen.clear();
            }
            StepKind::Heading { .. } => {
                self.last_angle = None;
                screen.clear();
            }
            _ => {}
        }

        if !step.text.is_empty() && !matches!(step.kind, StepKind::Heading { .. }) {
            info!("{}", self.render(step.text));
        }
    }

    /// Morse entry UI: transcript on the first row, committed glyphs plus
    /// the live preview on the second.
    fn poll_morse<T, B, A, L, O, D, C>(
        &mut self,
        io: &mut Peripherals<T, B, A, L, O, D, C>,
        now_ms: u32,
    ) where
        T: DigitalInput,
        D: Lcd,
    {
        let held = io.touch.is_high();
        if let Err(error) = self.morse.poll(held, now_ms) {
            warn!("{error}");
        }
        io.screen.show_line(0, self.morse.transcript());
        let preview = self.morse.preview(now_ms);
        io.screen.show_line(1, preview.as_str());
    }

    fn latch_player_name(&mut self) {
        let transcript = self.morse.transcript();
        self.player_name.clear();
        self.player_name
            .push_str(&transcript[..transcript.len().min(NAME_CAPACITY)])
            .ok();
    }

    fn advance(&mut self) {
        if self.step < SCRIPT.len() - 1 {
            self.step += 1;
            self.entered = false;
        }
    }

    fn restart<T, B, A, L, O, D, C>(&mut self, io: &mut Peripherals<T, B, A, L, O, D, C>)
    where
        O: DigitalOutput,
        D: Lcd,
    {
        self.step = 0;
        self.entered = false;
        self.player_name.clear();
        self.morse.reset();
        self.last_angle = None;
        io.led.set_low();
        io.screen.clear();
    }

    /// Render a story line, substituting `{name}` with the player name.
    fn render(&self, template: &'static str) -> String<LINE_CAPACITY> {
        let mut line: String<LINE_CAPACITY> = String::new();
        let mut rest = template;
        while let Some(at) = rest.find("{name}") {
            line.push_str(&rest[..at]).ok();
            line.push_str(self.player_name.as_str()).ok();
            rest = &rest[at + "{name}".len()..];
        }
        line.push_str(rest).ok();
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct SharedPin<'a>(&'a Cell<bool>);

    impl DigitalInput for SharedPin<'_> {
        fn is_high(&mut self) -> bool {
            self.0.get()
        }
    }

    struct SharedChannel<'a>(&'a Cell<i32>);

    impl AnalogInput for SharedChannel<'_> {
        fn read_raw(&mut self) -> i32 {
            self.0.get()
        }
    }

    struct SharedLed<'a>(&'a Cell<bool>);

    impl DigitalOutput for SharedLed<'_> {
        fn set_high(&mut self) {
            self.0.set(true);
        }

        fn set_low(&mut self) {
            self.0.set(false);
        }
    }

    struct NullLcd;

    impl Lcd for NullLcd {
        fn write_line(&mut self, _row: u8, _text: &str) {}

        fn clear(&mut self) {}
    }

    struct SharedClock<'a>(&'a Cell<u32>);

    impl Clock for SharedClock<'_> {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    /// The shared signal levels behind a [`Peripherals`] set.
    struct Bench {
        touch: Cell<bool>,
        button: Cell<bool>,
        helm: Cell<i32>,
        light: Cell<i32>,
        led: Cell<bool>,
        clock: Cell<u32>,
    }

    type BenchIo<'a> = Peripherals<
        SharedPin<'a>,
        SharedPin<'a>,
        SharedChannel<'a>,
        SharedChannel<'a>,
        SharedLed<'a>,
        NullLcd,
        SharedClock<'a>,
    >;

    impl Bench {
        fn new() -> Self {
            Self {
                touch: Cell::new(false),
                button: Cell::new(false),
                helm: Cell::new(0),
                light: Cell::new(0),
                led: Cell::new(false),
                clock: Cell::new(0),
            }
        }

        fn io(&self) -> BenchIo<'_> {
            Peripherals {
                touch: SharedPin(&self.touch),
                button: DebouncedButton::new(SharedPin(&self.button)),
                helm: RotaryAngleSensor::new(SharedChannel(&self.helm), 3.3, 3.3, 300),
                light: LightSensor::new(SharedChannel(&self.light)),
                led: SharedLed(&self.led),
                screen: Screen::new(NullLcd),
                clock: SharedClock(&self.clock),
            }
        }
    }

    /// Tick every 10 ms for `ms` milliseconds.
    fn run(bench: &Bench, game: &mut Adventure, io: &mut BenchIo<'_>, ms: u32) {
        for _ in 0..ms / 10 {
            bench.clock.set(bench.clock.get() + 10);
            game.tick(io);
        }
    }

    /// One clean button press: short high pulse, then settle.
    fn press(bench: &Bench, game: &mut Adventure, io: &mut BenchIo<'_>) {
        bench.button.set(true);
        run(bench, game, io, 60);
        bench.button.set(false);
        run(bench, game, io, 400);
    }

    /// One touch hold of `ms`, then release and settle.
    fn touch_hold(bench: &Bench, game: &mut Adventure, io: &mut BenchIo<'_>, ms: u32) {
        bench.touch.set(true);
        run(bench, game, io, ms);
        bench.touch.set(false);
        run(bench, game, io, 200);
    }

    /// Key one letter in Morse: dots/dashes, then a letter-end tap.
    fn key_letter(bench: &Bench, game: &mut Adventure, io: &mut BenchIo<'_>, code: &str) {
        for glyph in code.chars() {
            let ms = if glyph == '-' { 1800 } else { 400 };
            touch_hold(bench, game, io, ms);
        }
        touch_hold(bench, game, io, 50);
    }

    /// Play from step 0 to the heading step (13).
    fn sail_to_heading(bench: &Bench, game: &mut Adventure, io: &mut BenchIo<'_>) {
        for _ in 0..4 {
            press(bench, game, io);
        }
        assert_eq!(game.step(), 4);

        key_letter(bench, game, io, "."); // name: "E"
        press(bench, game, io);
        assert_eq!(game.step(), 5);
        assert_eq!(game.player_name(), "E");

        for _ in 0..3 {
            press(bench, game, io);
        }
        assert_eq!(game.step(), 8);

        for code in ["--.", "---", ".-..", "-.."] {
            key_letter(bench, game, io, code); // GOLD
        }
        run(bench, game, io, 50);
        assert_eq!(game.step(), 9);

        for _ in 0..4 {
            press(bench, game, io);
        }
        assert_eq!(game.step(), 13);
    }

    #[test]
    fn test_first_press_advances_exactly_one_step() {
        let bench = Bench::new();
        let mut io = bench.io();
        let mut game = Adventure::new(EndPolicy::Halt);

        run(&bench, &mut game, &mut io, 500);
        assert_eq!(game.step(), 0, "no press, no progress");

        press(&bench, &mut game, &mut io);
        assert_eq!(game.step(), 1, "one press moves one step, never more");
    }

    #[test]
    fn test_name_entry_latches_transcript() {
        let bench = Bench::new();
        let mut io = bench.io();
        let mut game = Adventure::new(EndPolicy::Halt);

        for _ in 0..4 {
            press(&bench, &mut game, &mut io);
        }
        assert_eq!(game.step(), 4);

        // "N" is dash dot.
        key_letter(&bench, &mut game, &mut io, "-.");
        press(&bench, &mut game, &mut io);

        assert_eq!(game.step(), 5);
        assert_eq!(game.player_name(), "N");
    }

    #[test]
    fn test_heading_needs_angle_and_press_same_tick() {
        let bench = Bench::new();
        let mut io = bench.io();
        let mut game = Adventure::new(EndPolicy::Halt);
        sail_to_heading(&bench, &mut game, &mut io);

        // 427 counts is about 125 degrees: outside the 130..=140 window.
        bench.helm.set(427);
        press(&bench, &mut game, &mut io);
        assert_eq!(game.step(), 13, "press at 125 degrees must not advance");

        // Window reached but no press: still waiting.
        bench.helm.set(460); // about 134 degrees
        run(&bench, &mut game, &mut io, 500);
        assert_eq!(game.step(), 13);

        press(&bench, &mut game, &mut io);
        assert_eq!(game.step(), 14);
    }

    #[test]
    fn test_torch_threshold_lights_led() {
        let bench = Bench::new();
        let mut io = bench.io();
        let mut game = Adventure::new(EndPolicy::Halt);
        sail_to_heading(&bench, &mut game, &mut io);

        bench.helm.set(460);
        press(&bench, &mut game, &mut io);
        press(&bench, &mut game, &mut io);
        press(&bench, &mut game, &mut io);
        assert_eq!(game.step(), 16);

        bench.light.set(26_000);
        run(&bench, &mut game, &mut io, 500);
        assert_eq!(game.step(), 16, "below threshold the cave stays dark");
        assert!(!bench.led.get());

        bench.light.set(27_000);
        run(&bench, &mut game, &mut io, 50);
        assert_eq!(game.step(), 17);
        assert!(bench.led.get(), "torch milestone latches the LED on");
    }

    #[test]
    fn test_morse_overflow_does_not_derail_the_game() {
        let bench = Bench::new();
        let mut io = bench.io();
        let mut game = Adventure::new(EndPolicy::Halt);

        for _ in 0..4 {
            press(&bench, &mut game, &mut io);
        }
        assert_eq!(game.step(), 4);

        // Five dots: the fifth overflows; the buffer resets and entry
        // continues with a clean "E".
        for _ in 0..5 {
            touch_hold(&bench, &mut game, &mut io, 400);
        }
        key_letter(&bench, &mut game, &mut io, ".");
        press(&bench, &mut game, &mut io);

        assert_eq!(game.step(), 5);
        assert_eq!(game.player_name(), "E");
    }
}
