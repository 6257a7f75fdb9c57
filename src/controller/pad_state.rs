//! Snapshot types for a single controller report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Digital buttons, in bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ButtonType {
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Start,
    Select,
    LeftStick,
    RightStick,
    LeftBumper,
    RightBumper,
    Guide,
    A,
    B,
    X,
    Y,
}

impl ButtonType {
    pub const ALL: [ButtonType; 15] = [
        ButtonType::DPadUp,
        ButtonType::DPadDown,
        ButtonType::DPadLeft,
        ButtonType::DPadRight,
        ButtonType::Start,
        ButtonType::Select,
        ButtonType::LeftStick,
        ButtonType::RightStick,
        ButtonType::LeftBumper,
        ButtonType::RightBumper,
        ButtonType::Guide,
        ButtonType::A,
        ButtonType::B,
        ButtonType::X,
        ButtonType::Y,
    ];

    pub const fn mask(self) -> u16 {
        1 << self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            ButtonType::DPadUp => "DPadUp",
            ButtonType::DPadDown => "DPadDown",
            ButtonType::DPadLeft => "DPadLeft",
            ButtonType::DPadRight => "DPadRight",
            ButtonType::Start => "Start",
            ButtonType::Select => "Select",
            ButtonType::LeftStick => "LeftStick",
            ButtonType::RightStick => "RightStick",
            ButtonType::LeftBumper => "LeftBumper",
            ButtonType::RightBumper => "RightBumper",
            ButtonType::Guide => "Guide",
            ButtonType::A => "A",
            ButtonType::B => "B",
            ButtonType::X => "X",
            ButtonType::Y => "Y",
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown button name: {0}")]
pub struct UnknownButton(pub String);

impl FromStr for ButtonType {
    type Err = UnknownButton;

    /// Case-insensitive; `Back` is accepted for `Select`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("back") {
            return Ok(ButtonType::Select);
        }
        ButtonType::ALL
            .into_iter()
            .find(|button| button.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownButton(s.to_string()))
    }
}

/// Bitmask of held buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonSet(u16);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, button: ButtonType) -> bool {
        self.0 & button.mask() != 0
    }

    pub fn insert(&mut self, button: ButtonType) {
        self.0 |= button.mask();
    }

    pub fn remove(&mut self, button: ButtonType) {
        self.0 &= !button.mask();
    }

    pub const fn with(mut self, button: ButtonType) -> Self {
        self.0 |= button.mask();
        self
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Buttons set here but not in `other`.
    pub const fn difference(self, other: ButtonSet) -> ButtonSet {
        ButtonSet(self.0 & !other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = ButtonType> {
        ButtonType::ALL
            .into_iter()
            .filter(move |button| self.contains(*button))
    }
}

impl FromIterator<ButtonType> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = ButtonType>>(iter: I) -> Self {
        let mut set = ButtonSet::EMPTY;
        for button in iter {
            set.insert(button);
        }
        set
    }
}

/// Stick position, both axes in `[-1, 1]`, y positive up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StickPosition {
    pub x: f32,
    pub y: f32,
}

impl StickPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Everything one hardware report carries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PadState {
    pub buttons: ButtonSet,
    pub left_stick: StickPosition,
    pub right_stick: StickPosition,
    pub left_trigger: f32,
    pub right_trigger: f32,
}
