//! The story script
//!
//! The adventure is a closed, linearly ordered sequence of steps. Each step
//! pairs a display text with the kind of predicate that advances past it.
//! `{name}` in a text is replaced with the latched player name.

/// How a step is displayed and what advances past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Show the step text; advance on a button press.
    Dialogue,
    /// Morse entry on the LCD; a button press latches the transcript as the
    /// player name.
    NameEntry,
    /// Morse entry on the LCD; advance when the transcript equals `answer`.
    RiddleAnswer { answer: &'static str },
    /// Live helm readout; advance when the angle is inside the window and
    /// the button is pressed on the same tick.
    Heading { min_deg: i32, max_deg: i32 },
    /// Show the step text; advance when the light level reaches
    /// `min_level`, latching the LED on.
    Torch { min_level: i32 },
    /// Terminal step; behavior is decided by the end policy.
    Finale,
}

/// One node of the script.
pub struct StepDef {
    pub kind: StepKind,
    pub text: &'static str,
}

const fn dialogue(text: &'static str) -> StepDef {
    StepDef {
        kind: StepKind::Dialogue,
        text,
    }
}

/// The reference story: 21 steps, indices 0..=20.
pub const SCRIPT: [StepDef; 21] = [
    dialogue("Hello, press the button!"),
    dialogue("Pressing the button skips the dialogue"),
    dialogue("You find yourself in an interactive adventure"),
    dialogue("Skip ahead and enter your name with the morse bone"),
    StepDef {
        kind: StepKind::NameEntry,
        text: "",
    },
    dialogue("{name} you just discovered a chest!"),
    dialogue("It is locked, but a scribbled note comes with it..."),
    dialogue("I shine without burning, never rust, and from riverbeds I am sometimes drawn"),
    StepDef {
        kind: StepKind::RiddleAnswer { answer: "GOLD" },
        text: "",
    },
    dialogue("The chest opens! Inside lies a map to a treasure!"),
    dialogue("You set sail aboard the {name}'s Revenge"),
    dialogue("The map puts the island to the SOUTH-EAST"),
    dialogue("Skip ahead and set the right course with the helm"),
    StepDef {
        kind: StepKind::Heading {
            min_deg: 130,
            max_deg: 140,
        },
        text: "Course:",
    },
    dialogue("After a week at sea you reach the island"),
    dialogue("You find a hidden cave"),
    StepDef {
        kind: StepKind::Torch { min_level: 27000 },
        text: "Light your torch with the lighter to explore the cave",
    },
    dialogue("Wow, what a magnificent groovy torch!"),
    dialogue("You press on and at the back of the cave you find..."),
    dialogue("A golden egg!"),
    StepDef {
        kind: StepKind::Finale,
        text: "Congratulations! The adventure is over.",
    },
];
