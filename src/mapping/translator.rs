//! Per-tick translation of controller slots into engine input
//!
//! Runs command mapping first so press and release commands reach the sink
//! before the frame consumes the movement vector.

use crate::console::CommandSink;
use crate::controller::{ControllerSlot, MAX_CONTROLLERS};
use crate::mapping::commands::{CommandBindings, CommandMapper};
use crate::mapping::movement::{map_movement, MovementInput, MovementSettings};

/// Turns the poller's slots into movement and commands for one tick.
///
/// The translator only reads slots. Movement is level-triggered and derived
/// anew each call; commands are edge-triggered against the translator's own
/// per-slot button shadow.
#[derive(Clone, Debug)]
pub struct InputTranslator {
    settings: MovementSettings,
    bindings: CommandBindings,
    commands: CommandMapper,
}

impl InputTranslator {
    pub fn new(settings: MovementSettings, bindings: CommandBindings) -> Self {
        Self {
            settings,
            bindings,
            commands: CommandMapper::new(),
        }
    }

    pub fn translate(
        &mut self,
        slots: &[ControllerSlot; MAX_CONTROLLERS],
        sink: &mut dyn CommandSink,
    ) -> MovementInput {
        self.commands.map_commands(slots, &self.bindings, sink);
        map_movement(slots, &self.settings)
    }

    /// Swap the command table. Buttons held across the swap neither press
    /// through the new table nor lose the release armed by the old one.
    pub fn update_bindings(&mut self, bindings: CommandBindings) {
        self.bindings = bindings;
    }

    /// Forget every held button without emitting releases.
    pub fn reset(&mut self) {
        self.commands.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ButtonSet, ButtonType, PadState, StickPosition};

    fn slots_holding(buttons: ButtonSet, stick_y: f32) -> [ControllerSlot; MAX_CONTROLLERS] {
        let mut slots = [ControllerSlot::default(); MAX_CONTROLLERS];
        slots[2] = ControllerSlot {
            connected: true,
            last_packet_id: 7,
            latest_state: PadState {
                buttons,
                left_stick: StickPosition::new(0.0, stick_y),
                ..PadState::default()
            },
        };
        slots
    }

    #[test]
    fn rebind_during_hold_keeps_commands_paired() {
        let mut bindings = CommandBindings::new();
        bindings.bind(ButtonType::A, "+jump");
        let mut translator = InputTranslator::new(MovementSettings::default(), bindings);
        let mut sink: Vec<String> = Vec::new();

        let held = slots_holding(ButtonSet::EMPTY.with(ButtonType::A), 1.0);
        translator.translate(&held, &mut sink);

        let mut rebound = CommandBindings::new();
        rebound.bind(ButtonType::A, "+attack");
        translator.update_bindings(rebound);
        let movement = translator.translate(&held, &mut sink);
        translator.translate(&slots_holding(ButtonSet::EMPTY, 0.0), &mut sink);

        assert_eq!(sink, vec!["+jump", "-jump"]);
        assert!((movement.forward - 1.0).abs() < 1e-5);
    }

    #[test]
    fn reset_drops_pending_releases() {
        let mut bindings = CommandBindings::new();
        bindings.bind(ButtonType::RightBumper, "+attack");
        let mut translator = InputTranslator::new(MovementSettings::default(), bindings);
        let mut sink: Vec<String> = Vec::new();

        translator.translate(
            &slots_holding(ButtonSet::EMPTY.with(ButtonType::RightBumper), 0.0),
            &mut sink,
        );
        translator.reset();
        translator.translate(&slots_holding(ButtonSet::EMPTY, 0.0), &mut sink);

        assert_eq!(sink, vec!["+attack"]);
    }
}
