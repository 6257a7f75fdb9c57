//! Slot assignment and synthesized packet ids for event-driven backends
//!
//! Backends that deliver events instead of numbered reports pin each device to
//! a slot here and bump that slot's packet counter whenever something happens
//! to the device, so the poller's "id changes when the report changes" check
//! holds for them too.

use std::fmt::Display;
use tracing::{debug, warn};

use super::MAX_CONTROLLERS;

/// What an event did to its device, as far as slots are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceActivity {
    Connected,
    Disconnected,
    /// Any input change: buttons, axes, triggers.
    Input,
}

#[derive(Debug, Clone)]
pub struct SlotMap<Id> {
    slots: [Option<Id>; MAX_CONTROLLERS],
    packets: [u32; MAX_CONTROLLERS],
}

impl<Id: Copy + Eq + Display> Default for SlotMap<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Copy + Eq + Display> SlotMap<Id> {
    pub fn new() -> Self {
        Self {
            slots: [None; MAX_CONTROLLERS],
            packets: [0; MAX_CONTROLLERS],
        }
    }

    pub fn slot_of(&self, id: Id) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == Some(id))
    }

    pub fn device_in(&self, slot: usize) -> Option<Id> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn packet_id(&self, slot: usize) -> Option<u32> {
        self.packets.get(slot).copied()
    }

    /// Put `id` in the lowest free slot, or return the slot it already has.
    /// A fresh assignment bumps the slot's counter so the first report after
    /// a reconnect never matches the last one accepted before it.
    pub fn assign(&mut self, id: Id) -> Option<usize> {
        if let Some(slot) = self.slot_of(id) {
            return Some(slot);
        }
        let free = self.slots.iter().position(Option::is_none)?;
        self.slots[free] = Some(id);
        self.packets[free] = self.packets[free].wrapping_add(1);
        Some(free)
    }

    pub fn record(&mut self, id: Id, activity: DeviceActivity) {
        match activity {
            DeviceActivity::Connected => match self.assign(id) {
                Some(slot) => debug!("Gamepad {} assigned to slot {}", id, slot),
                None => warn!("Gamepad {} connected but all slots are taken", id),
            },
            DeviceActivity::Disconnected => {
                if let Some(slot) = self.slot_of(id) {
                    debug!("Gamepad {} released slot {}", id, slot);
                    self.slots[slot] = None;
                }
            }
            DeviceActivity::Input => {
                if let Some(slot) = self.slot_of(id) {
                    self.packets[slot] = self.packets[slot].wrapping_add(1);
                }
            }
        }
    }
}
