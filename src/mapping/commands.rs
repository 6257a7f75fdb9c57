//! Edge-triggered button commands
//!
//! Each button may be bound to a console command. A command starting with `+`
//! is a hold: pressing sends it, releasing sends the `-` twin. Anything else
//! fires once on press.

use std::collections::BTreeMap;
use tracing::debug;

use crate::console::CommandSink;
use crate::controller::{ButtonSet, ButtonType, ControllerSlot, MAX_CONTROLLERS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub press: String,
    pub release: Option<String>,
}

impl Binding {
    pub fn new(command: impl Into<String>) -> Self {
        let press = command.into();
        let release = press.strip_prefix('+').map(|action| format!("-{}", action));
        Self { press, release }
    }
}

/// Button-to-command table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandBindings {
    bindings: BTreeMap<ButtonType, Binding>,
}

impl CommandBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, button: ButtonType, command: impl Into<String>) -> &mut Self {
        self.bindings.insert(button, Binding::new(command));
        self
    }

    pub fn get(&self, button: ButtonType) -> Option<&Binding> {
        self.bindings.get(&button)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Remembers the buttons each slot held on the previous tick.
///
/// This shadow is separate from the poller's packet tracking; it exists only
/// to find press and release edges. The release command is captured when the
/// press fires, so a table swapped mid-hold still releases what was pressed.
#[derive(Clone, Debug, Default)]
pub struct CommandMapper {
    previous: [ButtonSet; MAX_CONTROLLERS],
    pending_releases: [BTreeMap<ButtonType, String>; MAX_CONTROLLERS],
}

impl CommandMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one command per press or release edge since the last call.
    ///
    /// A disconnected slot counts as holding nothing, so buttons held at
    /// unplug time are released exactly once.
    pub fn map_commands(
        &mut self,
        slots: &[ControllerSlot; MAX_CONTROLLERS],
        bindings: &CommandBindings,
        sink: &mut dyn CommandSink,
    ) {
        let shadows = self.previous.iter_mut().zip(self.pending_releases.iter_mut());
        for (index, (slot, (previous, pending))) in slots.iter().zip(shadows).enumerate() {
            let current = if slot.connected {
                slot.latest_state.buttons
            } else {
                ButtonSet::EMPTY
            };
            if current == *previous {
                continue;
            }

            for button in previous.difference(current).iter() {
                if let Some(release) = pending.remove(&button) {
                    debug!("Slot {} released {}: {}", index, button, release);
                    sink.add_text(&release);
                }
            }
            for button in current.difference(*previous).iter() {
                if let Some(binding) = bindings.get(button) {
                    debug!("Slot {} pressed {}: {}", index, button, binding.press);
                    sink.add_text(&binding.press);
                    if let Some(release) = &binding.release {
                        pending.insert(button, release.clone());
                    }
                }
            }

            *previous = current;
        }
    }

    pub fn previous_buttons(&self, slot: usize) -> Option<ButtonSet> {
        self.previous.get(slot).copied()
    }

    pub fn reset(&mut self) {
        self.previous = [ButtonSet::EMPTY; MAX_CONTROLLERS];
        for pending in &mut self.pending_releases {
            pending.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::PadState;

    fn slots_with(connected: bool, buttons: ButtonSet) -> [ControllerSlot; MAX_CONTROLLERS] {
        let mut slots = [ControllerSlot::default(); MAX_CONTROLLERS];
        slots[0] = ControllerSlot {
            connected,
            last_packet_id: 1,
            latest_state: PadState {
                buttons,
                ..PadState::default()
            },
        };
        slots
    }

    #[test]
    fn plus_commands_get_release_twin() {
        assert_eq!(Binding::new("+attack").release.as_deref(), Some("-attack"));
        assert_eq!(Binding::new("impulse 10").release, None);
    }

    #[test]
    fn held_button_fires_once_each_way() {
        let mut bindings = CommandBindings::new();
        bindings.bind(ButtonType::RightBumper, "+attack");
        let mut mapper = CommandMapper::new();
        let mut sink: Vec<String> = Vec::new();

        let held = slots_with(true, ButtonSet::EMPTY.with(ButtonType::RightBumper));
        for _ in 0..5 {
            mapper.map_commands(&held, &bindings, &mut sink);
        }
        mapper.map_commands(&slots_with(true, ButtonSet::EMPTY), &bindings, &mut sink);
        mapper.map_commands(&slots_with(true, ButtonSet::EMPTY), &bindings, &mut sink);

        assert_eq!(sink, vec!["+attack", "-attack"]);
    }

    #[test]
    fn one_shot_commands_fire_on_press_only() {
        let mut bindings = CommandBindings::new();
        bindings.bind(ButtonType::Start, "togglemenu");
        let mut mapper = CommandMapper::new();
        let mut sink: Vec<String> = Vec::new();

        mapper.map_commands(
            &slots_with(true, ButtonSet::EMPTY.with(ButtonType::Start)),
            &bindings,
            &mut sink,
        );
        mapper.map_commands(&slots_with(true, ButtonSet::EMPTY), &bindings, &mut sink);

        assert_eq!(sink, vec!["togglemenu"]);
    }

    #[test]
    fn unbound_buttons_are_silent_but_tracked() {
        let bindings = CommandBindings::new();
        let mut mapper = CommandMapper::new();
        let mut sink: Vec<String> = Vec::new();

        let held = ButtonSet::EMPTY.with(ButtonType::Guide);
        mapper.map_commands(&slots_with(true, held), &bindings, &mut sink);

        assert!(sink.is_empty());
        assert_eq!(mapper.previous_buttons(0), Some(held));
    }

    #[test]
    fn disconnect_releases_held_buttons() {
        let mut bindings = CommandBindings::new();
        bindings.bind(ButtonType::A, "+jump");
        let mut mapper = CommandMapper::new();
        let mut sink: Vec<String> = Vec::new();

        let held = ButtonSet::EMPTY.with(ButtonType::A);
        mapper.map_commands(&slots_with(true, held), &bindings, &mut sink);
        mapper.map_commands(&slots_with(false, held), &bindings, &mut sink);
        mapper.map_commands(&slots_with(false, held), &bindings, &mut sink);

        assert_eq!(sink, vec!["+jump", "-jump"]);
    }

    #[test]
    fn releases_come_before_presses() {
        let mut bindings = CommandBindings::new();
        bindings.bind(ButtonType::A, "+jump").bind(ButtonType::B, "+movedown");
        let mut mapper = CommandMapper::new();
        let mut sink: Vec<String> = Vec::new();

        mapper.map_commands(
            &slots_with(true, ButtonSet::EMPTY.with(ButtonType::A)),
            &bindings,
            &mut sink,
        );
        mapper.map_commands(
            &slots_with(true, ButtonSet::EMPTY.with(ButtonType::B)),
            &bindings,
            &mut sink,
        );

        assert_eq!(sink, vec!["+jump", "-jump", "+movedown"]);
    }

    #[test]
    fn rebinding_a_held_button_releases_the_original_command() {
        let mut bindings = CommandBindings::new();
        bindings.bind(ButtonType::A, "+jump");
        let mut mapper = CommandMapper::new();
        let mut sink: Vec<String> = Vec::new();

        let held = slots_with(true, ButtonSet::EMPTY.with(ButtonType::A));
        mapper.map_commands(&held, &bindings, &mut sink);
        bindings.bind(ButtonType::A, "+attack");
        mapper.map_commands(&held, &bindings, &mut sink);
        mapper.map_commands(&slots_with(true, ButtonSet::EMPTY), &bindings, &mut sink);

        assert_eq!(sink, vec!["+jump", "-jump"]);

        mapper.map_commands(&held, &bindings, &mut sink);
        mapper.map_commands(&slots_with(true, ButtonSet::EMPTY), &bindings, &mut sink);
        assert_eq!(sink, vec!["+jump", "-jump", "+attack", "-attack"]);
    }

    #[test]
    fn binding_added_mid_hold_stays_silent_until_next_press() {
        let mut bindings = CommandBindings::new();
        let mut mapper = CommandMapper::new();
        let mut sink: Vec<String> = Vec::new();

        let held = slots_with(true, ButtonSet::EMPTY.with(ButtonType::X));
        mapper.map_commands(&held, &bindings, &mut sink);
        bindings.bind(ButtonType::X, "+use");
        mapper.map_commands(&held, &bindings, &mut sink);
        mapper.map_commands(&slots_with(true, ButtonSet::EMPTY), &bindings, &mut sink);

        assert!(sink.is_empty());
    }
}
