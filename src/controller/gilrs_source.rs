//! `gilrs`-backed pad source
//!
//! gilrs delivers events rather than numbered reports, so every drained event
//! is fed to a [`SlotMap`] that pins pads to slots and synthesizes their
//! packet ids.

use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use tracing::{error, info, warn};

use super::pad_state::{ButtonSet, ButtonType, PadState, StickPosition};
use super::slot_map::{DeviceActivity, SlotMap};
use super::source::{PadQueryError, PadReading, PadSource};

#[derive(Debug, thiserror::Error)]
pub enum GilrsSourceError {
    #[error("Failed to initialize gilrs: {0}")]
    InitializationError(String),
}

pub struct GilrsSource {
    gilrs: Gilrs,
    slots: SlotMap<GamepadId>,
}

impl GilrsSource {
    pub fn new() -> Result<Self, GilrsSourceError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => g,
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(GilrsSourceError::InitializationError(e.to_string()));
            }
        };

        let mut slots = SlotMap::new();
        for (id, gamepad) in gilrs.gamepads() {
            match slots.assign(id) {
                Some(slot) => info!("Found gamepad {} ({}) in slot {}", gamepad.name(), id, slot),
                None => warn!("No free slot for gamepad {} ({})", gamepad.name(), id),
            }
        }

        Ok(Self { gilrs, slots })
    }
}

fn activity(event: &EventType) -> DeviceActivity {
    match event {
        EventType::Connected => DeviceActivity::Connected,
        EventType::Disconnected => DeviceActivity::Disconnected,
        _ => DeviceActivity::Input,
    }
}

impl PadSource for GilrsSource {
    fn device_class(&self) -> &str {
        "Gilrs"
    }

    fn refresh(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            self.slots.record(id, activity(&event));
        }
    }

    fn query(&mut self, slot: usize) -> Result<PadReading, PadQueryError> {
        let id = self.slots.device_in(slot).ok_or(PadQueryError::NotConnected)?;
        let packet_id = self.slots.packet_id(slot).ok_or(PadQueryError::NotConnected)?;
        let gamepad = self
            .gilrs
            .connected_gamepad(id)
            .ok_or(PadQueryError::NotConnected)?;

        Ok(PadReading {
            packet_id,
            state: snapshot(&gamepad),
        })
    }
}

fn snapshot(gamepad: &Gamepad<'_>) -> PadState {
    let buttons: ButtonSet = ButtonType::ALL
        .into_iter()
        .filter(|button| gamepad.is_pressed(gilrs_button(*button)))
        .collect();

    PadState {
        buttons,
        left_stick: StickPosition::new(
            gamepad.value(Axis::LeftStickX),
            gamepad.value(Axis::LeftStickY),
        ),
        right_stick: StickPosition::new(
            gamepad.value(Axis::RightStickX),
            gamepad.value(Axis::RightStickY),
        ),
        left_trigger: trigger_value(gamepad, Button::LeftTrigger2),
        right_trigger: trigger_value(gamepad, Button::RightTrigger2),
    }
}

fn trigger_value(gamepad: &Gamepad<'_>, button: Button) -> f32 {
    gamepad
        .button_data(button)
        .map(|data| data.value())
        .unwrap_or(0.0)
}

fn gilrs_button(button: ButtonType) -> Button {
    match button {
        ButtonType::A => Button::South,
        ButtonType::B => Button::East,
        ButtonType::X => Button::West,
        ButtonType::Y => Button::North,
        ButtonType::Start => Button::Start,
        ButtonType::Select => Button::Select,
        ButtonType::LeftBumper => Button::LeftTrigger,
        ButtonType::RightBumper => Button::RightTrigger,
        ButtonType::LeftStick => Button::LeftThumb,
        ButtonType::RightStick => Button::RightThumb,
        ButtonType::DPadUp => Button::DPadUp,
        ButtonType::DPadDown => Button::DPadDown,
        ButtonType::DPadLeft => Button::DPadLeft,
        ButtonType::DPadRight => Button::DPadRight,
        ButtonType::Guide => Button::Mode,
    }
}
