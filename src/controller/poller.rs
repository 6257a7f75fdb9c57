//! Fixed-slot gamepad poller
//!
//! Queries every slot once per pump, reports connect and disconnect
//! transitions to the console and keeps the newest report of each pad.

use tracing::{debug, info, trace};

use super::pad_state::PadState;
use super::source::{PadQueryError, PadSource};
use super::MAX_CONTROLLERS;
use crate::console::Console;

/// One fixed controller connection point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerSlot {
    pub connected: bool,
    pub last_packet_id: u32,
    // Only meaningful while connected
    pub latest_state: PadState,
}

/// Entry returned by [`GamepadPoller::enumerate_devices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub kind: String,
    pub name: String,
    pub id: usize,
}

/// Polls every slot once per tick and keeps the newest report of each pad.
///
/// Reports are accepted only when their packet id differs from the last
/// accepted one, so a report that has not changed since the previous tick is
/// never reprocessed.
pub struct GamepadPoller<P: PadSource> {
    source: P,
    slots: [ControllerSlot; MAX_CONTROLLERS],
}

impl<P: PadSource> GamepadPoller<P> {
    pub fn new(source: P, console: &mut dyn Console) -> Self {
        console.print(&format!("{} initialized", source.device_class()));
        Self {
            source,
            slots: [ControllerSlot::default(); MAX_CONTROLLERS],
        }
    }

    /// Query every slot once. Never blocks, never fails.
    pub fn pump(&mut self, console: &mut dyn Console) {
        self.source.refresh();

        for index in 0..MAX_CONTROLLERS {
            match self.source.query(index) {
                Ok(reading) => {
                    let slot = &mut self.slots[index];
                    if !slot.connected {
                        slot.connected = true;
                        console.print(&format!(
                            "{} controller {} connected",
                            self.source.device_class(),
                            index
                        ));
                    }

                    if reading.packet_id != slot.last_packet_id {
                        trace!(
                            "Slot {} packet {} -> {}",
                            index,
                            slot.last_packet_id,
                            reading.packet_id
                        );
                        slot.last_packet_id = reading.packet_id;
                        slot.latest_state = reading.state;
                    }
                }
                Err(err) => {
                    if let PadQueryError::DeviceError(reason) = &err {
                        debug!("Slot {} query failed, treating as absent: {}", index, reason);
                    }
                    let slot = &mut self.slots[index];
                    if slot.connected {
                        slot.connected = false;
                        console.print(&format!(
                            "{} controller {} disconnected",
                            self.source.device_class(),
                            index
                        ));
                    }
                }
            }
        }
    }

    pub fn slots(&self) -> &[ControllerSlot; MAX_CONTROLLERS] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ControllerSlot> {
        self.slots.get(index)
    }

    pub fn connected_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.connected).count()
    }

    pub fn device_class(&self) -> &str {
        self.source.device_class()
    }

    pub fn enumerate_devices(&self) -> Vec<DeviceInfo> {
        let class = self.source.device_class();
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.connected)
            .map(|(id, _)| DeviceInfo {
                kind: class.to_lowercase(),
                name: format!("{} Controller {}", class, id),
                id,
            })
            .collect()
    }

    /// Mark every slot disconnected without notifying.
    pub fn shutdown(&mut self) {
        info!("Shutting down {} input", self.source.device_class());
        for slot in &mut self.slots {
            slot.connected = false;
        }
    }

    pub fn reinit(&mut self, console: &mut dyn Console) {
        self.shutdown();
        self.slots = [ControllerSlot::default(); MAX_CONTROLLERS];
        console.print(&format!("{} initialized", self.source.device_class()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ConsoleLog;
    use crate::controller::pad_state::{ButtonSet, ButtonType, StickPosition};
    use crate::controller::source::ScriptedSource;

    fn state(x: f32) -> PadState {
        PadState {
            left_stick: StickPosition::new(x, 0.0),
            ..PadState::default()
        }
    }

    fn poller(source: ScriptedSource) -> (GamepadPoller<ScriptedSource>, ConsoleLog) {
        let mut console = ConsoleLog::new();
        let poller = GamepadPoller::new(source, &mut console);
        console.drain();
        (poller, console)
    }

    #[test]
    fn unchanged_packet_keeps_state() {
        let mut source = ScriptedSource::new("Test");
        source.push_present(0, 7, state(0.5)).push_present(0, 7, state(-0.9));
        let (mut poller, mut console) = poller(source);

        poller.pump(&mut console);
        let after_first = poller.slots()[0];
        poller.pump(&mut console);

        assert_eq!(poller.slots()[0], after_first);
        assert_eq!(poller.slots()[0].latest_state, state(0.5));
    }

    #[test]
    fn changed_packet_takes_new_state() {
        let mut source = ScriptedSource::new("Test");
        source.push_present(1, 3, state(0.1)).push_present(1, 4, state(0.8));
        let (mut poller, mut console) = poller(source);

        poller.pump(&mut console);
        poller.pump(&mut console);

        assert_eq!(poller.slots()[1].last_packet_id, 4);
        assert_eq!(poller.slots()[1].latest_state, state(0.8));
    }

    #[test]
    fn one_notification_per_transition() {
        let mut source = ScriptedSource::new("XInput");
        for packet in 1..=6 {
            source.push_present(2, packet, state(0.0));
        }
        for _ in 0..4 {
            source.push_absent(2);
        }
        let (mut poller, mut console) = poller(source);

        for _ in 0..10 {
            poller.pump(&mut console);
        }

        assert_eq!(
            console.texts(),
            vec![
                "XInput controller 2 connected",
                "XInput controller 2 disconnected"
            ]
        );
    }

    #[test]
    fn device_errors_count_as_absent() {
        let mut source = ScriptedSource::new("Test");
        source
            .push_present(0, 1, state(0.2))
            .push(0, Err(PadQueryError::DeviceError("bus reset".into())));
        let (mut poller, mut console) = poller(source);

        poller.pump(&mut console);
        poller.pump(&mut console);

        assert!(!poller.slots()[0].connected);
        assert_eq!(console.texts().last(), Some(&"Test controller 0 disconnected"));
        // disconnect touches only the flag
        assert_eq!(poller.slots()[0].latest_state, state(0.2));
        assert_eq!(poller.slots()[0].last_packet_id, 1);
    }

    #[test]
    fn enumerates_connected_slots() {
        let mut source = ScriptedSource::new("XInput");
        source.push_present(0, 1, PadState::default());
        source.push_present(3, 1, PadState::default());
        let (mut poller, mut console) = poller(source);
        poller.pump(&mut console);

        let devices = poller.enumerate_devices();
        assert_eq!(
            devices,
            vec![
                DeviceInfo {
                    kind: "xinput".into(),
                    name: "XInput Controller 0".into(),
                    id: 0
                },
                DeviceInfo {
                    kind: "xinput".into(),
                    name: "XInput Controller 3".into(),
                    id: 3
                },
            ]
        );
        assert_eq!(poller.connected_count(), 2);
    }

    #[test]
    fn reinit_clears_slots_and_reconnects() {
        let held = PadState {
            buttons: ButtonSet::EMPTY.with(ButtonType::A),
            ..PadState::default()
        };
        let mut source = ScriptedSource::new("Test");
        source.push_present(0, 9, held).push_present(0, 9, held);
        let (mut poller, mut console) = poller(source);
        poller.pump(&mut console);

        poller.reinit(&mut console);
        assert_eq!(poller.slots()[0], ControllerSlot::default());

        poller.pump(&mut console);
        assert_eq!(
            console.texts(),
            vec![
                "Test controller 0 connected",
                "Test initialized",
                "Test controller 0 connected"
            ]
        );
        assert_eq!(poller.slots()[0].latest_state, held);
    }
}
