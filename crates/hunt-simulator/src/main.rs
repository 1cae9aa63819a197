//! Desktop simulator for the treasure-hunt game.
//!
//! Runs hunt-core through a complete scripted playthrough without hardware:
//! a timed input script stands in for the player (button taps, Morse touch
//! holds, the helm sweep, the lighter), and the 16x2 LCD renders to stdout
//! as a framed panel whenever its content changes.
//!
//! Time is virtual — the whole adventure plays out in milliseconds of wall
//! time. Narrative lines and decoder chatter go through `env_logger`; run
//! with `RUST_LOG=info` (or `debug` for the Morse symbol stream).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hunt_core::hal::{AnalogInput, Clock, DigitalInput, DigitalOutput, Lcd};
use hunt_core::{
    Adventure, DebouncedButton, EndPolicy, LightSensor, Peripherals, RotaryAngleSensor, Screen,
};
use log::info;

/// Virtual tick interval — the cadence a firmware main loop would have.
const TICK_MS: u32 = 10;

// ---------------------------------------------------------------------------
// Simulated peripherals
// ---------------------------------------------------------------------------

/// One shared signal level, driven by the input script and sampled by the
/// game as a digital input.
#[derive(Clone)]
struct Signal(Rc<Cell<bool>>);

impl Signal {
    fn new() -> Self {
        Self(Rc::new(Cell::new(false)))
    }

    fn set(&self, level: bool) {
        self.0.set(level);
    }
}

impl DigitalInput for Signal {
    fn is_high(&mut self) -> bool {
        self.0.get()
    }
}

/// Shared analog level for the helm and light channels.
#[derive(Clone)]
struct Analog(Rc<Cell<i32>>);

impl Analog {
    fn new() -> Self {
        Self(Rc::new(Cell::new(0)))
    }

    fn set(&self, raw: i32) {
        self.0.set(raw);
    }
}

impl AnalogInput for Analog {
    fn read_raw(&mut self) -> i32 {
        self.0.get()
    }
}

/// The torch LED, reported on state changes.
struct ConsoleLed {
    lit: bool,
}

impl DigitalOutput for ConsoleLed {
    fn set_high(&mut self) {
        if !self.lit {
            self.lit = true;
            info!("LED on");
        }
    }

    fn set_low(&mut self) {
        if self.lit {
            self.lit = false;
            info!("LED off");
        }
    }
}

/// 16x2 panel backed by rows shared with the driver loop, which prints a
/// frame after any tick that touched the panel. The core's throttler only
/// calls in when content changes, so every frame printed is a real update.
struct ConsoleLcd {
    rows: Rc<RefCell<[String; 2]>>,
    dirty: Rc<Cell<bool>>,
}

impl Lcd for ConsoleLcd {
    fn write_line(&mut self, row: u8, text: &str) {
        self.rows.borrow_mut()[usize::from(row) & 1] = format!("{text:<16}");
        self.dirty.set(true);
    }

    fn clear(&mut self) {
        *self.rows.borrow_mut() = [" ".repeat(16), " ".repeat(16)];
        self.dirty.set(true);
    }
}

/// Virtual millisecond clock advanced by the driver loop.
#[derive(Clone)]
struct VirtualClock(Rc<Cell<u32>>);

impl Clock for VirtualClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

// ---------------------------------------------------------------------------
// Input script
// ---------------------------------------------------------------------------

/// One scripted stimulus, applied when the virtual clock reaches `at_ms`.
enum Stimulus {
    Button(bool),
    Touch(bool),
    Helm(i32),
    Light(i32),
}

/// Timed playthrough script, built once and consumed in order.
struct InputScript {
    events: Vec<(u32, Stimulus)>,
    cursor: Cell<usize>,
}

impl InputScript {
    fn apply(&self, now_ms: u32, button: &Signal, touch: &Signal, helm: &Analog, light: &Analog) {
        while let Some((at, stimulus)) = self.events.get(self.cursor.get()) {
            if *at > now_ms {
                break;
            }
            match stimulus {
                Stimulus::Button(level) => button.set(*level),
                Stimulus::Touch(level) => touch.set(*level),
                Stimulus::Helm(raw) => helm.set(*raw),
                Stimulus::Light(raw) => light.set(*raw),
            }
            self.cursor.set(self.cursor.get() + 1);
        }
    }

    fn exhausted(&self) -> bool {
        self.cursor.get() >= self.events.len()
    }
}

/// Builds the timed event list for one full playthrough.
struct ScriptBuilder {
    events: Vec<(u32, Stimulus)>,
    at_ms: u32,
}

impl ScriptBuilder {
    fn new() -> Self {
        Self {
            events: Vec::new(),
            at_ms: 500,
        }
    }

    fn wait(&mut self, ms: u32) -> &mut Self {
        self.at_ms += ms;
        self
    }

    /// One clean button press.
    fn press(&mut self) -> &mut Self {
        self.events.push((self.at_ms, Stimulus::Button(true)));
        self.events.push((self.at_ms + 60, Stimulus::Button(false)));
        self.wait(500)
    }

    /// Hold the Morse touch for `ms`.
    fn touch_hold(&mut self, ms: u32) -> &mut Self {
        self.events.push((self.at_ms, Stimulus::Touch(true)));
        self.events.push((self.at_ms + ms, Stimulus::Touch(false)));
        self.wait(ms + 300)
    }

    /// Key a word in Morse: timed holds per element, short taps between
    /// letters.
    fn morse_word(&mut self, codes: &[&str]) -> &mut Self {
        for code in codes {
            for glyph in code.chars() {
                self.touch_hold(if glyph == '-' { 1800 } else { 400 });
            }
            self.touch_hold(50);
        }
        self
    }

    fn helm(&mut self, raw: i32) -> &mut Self {
        self.events.push((self.at_ms, Stimulus::Helm(raw)));
        self.wait(300)
    }

    fn light(&mut self, raw: i32) -> &mut Self {
        self.events.push((self.at_ms, Stimulus::Light(raw)));
        self.wait(300)
    }

    fn build(mut self) -> InputScript {
        self.events.sort_by_key(|(at, _)| *at);
        InputScript {
            events: self.events,
            cursor: Cell::new(0),
        }
    }
}

/// The reference playthrough: greeting dialogue, name "JO", the riddle
/// answer "GOLD", a helm sweep that settles on course, the lighter, and the
/// closing dialogue.
fn playthrough_script() -> InputScript {
    let mut script = ScriptBuilder::new();

    // Greeting dialogue into name entry.
    script.press().press().press().press();

    // Name: "JO" (.--- / ---), then confirm with the button.
    script.morse_word(&[".---", "---"]).press();

    // Chest dialogue up to the riddle.
    script.press().press().press();

    // The riddle answer: advances on the text match alone.
    script.morse_word(&["--.", "---", ".-..", "-.."]).wait(500);

    // Sail dialogue into the heading step.
    script.press().press().press().press();

    // Sweep the helm: off-course press first, then settle on course. 460
    // counts is about 134 degrees on a 300-degree, 10-bit helm.
    script.helm(410).press().helm(435).helm(460).wait(500).press();

    // The island, the cave, then the lighter raises the light level.
    script.press().press();
    script.light(12_000).wait(700).light(28_000).wait(700);

    // Closing dialogue into the finale.
    script.press().press().press();

    script.build()
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let button = Signal::new();
    let touch = Signal::new();
    let helm_level = Analog::new();
    let light_level = Analog::new();
    let clock_cell = Rc::new(Cell::new(0u32));
    let lcd_rows = Rc::new(RefCell::new([String::new(), String::new()]));
    let lcd_dirty = Rc::new(Cell::new(false));

    let mut io = Peripherals {
        touch: touch.clone(),
        button: DebouncedButton::new(button.clone()),
        helm: RotaryAngleSensor::new(helm_level.clone(), 3.3, 3.3, 300),
        light: LightSensor::new(light_level.clone()),
        led: ConsoleLed { lit: false },
        screen: Screen::new(ConsoleLcd {
            rows: lcd_rows.clone(),
            dirty: lcd_dirty.clone(),
        }),
        clock: VirtualClock(clock_cell.clone()),
    };

    let mut game = Adventure::new(EndPolicy::Halt);
    let script = playthrough_script();

    info!("starting scripted playthrough ({TICK_MS} ms per tick)");

    // Drive the game until the scripted inputs run out and the story is
    // done, with a hard cap in case the script stalls.
    while !(script.exhausted() && game.is_finished()) {
        let now = clock_cell.get() + TICK_MS;
        clock_cell.set(now);
        if now > 180_000 {
            log::error!("script stalled on step {}", game.step());
            break;
        }

        script.apply(now, &button, &touch, &helm_level, &light_level);
        game.tick(&mut io);

        if lcd_dirty.replace(false) {
            let rows = lcd_rows.borrow();
            println!("+----------------+");
            println!("|{:<16}|", rows[0]);
            println!("|{:<16}|", rows[1]);
            println!("+----------------+");
        }
    }

    info!(
        "playthrough finished at step {} as {}",
        game.step(),
        game.player_name()
    );
}
