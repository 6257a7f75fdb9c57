//! Hardware seam for the gamepad poller
//!
//! A [`PadSource`] answers one question per slot: is a pad present, and if so,
//! what is its current report and packet id. Sources never block; a device that
//! would stall must answer [`PadQueryError::NotConnected`] instead.

use std::collections::VecDeque;
use tracing::warn;

use super::pad_state::PadState;
use super::MAX_CONTROLLERS;

/// One report from a present pad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadReading {
    /// Hardware sequence number, changes whenever the report changes
    pub packet_id: u32,
    pub state: PadState,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PadQueryError {
    #[error("Device not connected")]
    NotConnected,

    #[error("Device query failed: {0}")]
    DeviceError(String),
}

pub trait PadSource {
    /// Label used in notifications, e.g. `Gilrs` in "Gilrs controller 0 connected".
    fn device_class(&self) -> &str;

    /// Called once at the start of every pump, before any slot is queried.
    fn refresh(&mut self) {}

    fn query(&mut self, slot: usize) -> Result<PadReading, PadQueryError>;
}

impl<T: PadSource + ?Sized> PadSource for Box<T> {
    fn device_class(&self) -> &str {
        (**self).device_class()
    }

    fn refresh(&mut self) {
        (**self).refresh()
    }

    fn query(&mut self, slot: usize) -> Result<PadReading, PadQueryError> {
        (**self).query(slot)
    }
}

/// A platform without controller support. Every slot is empty.
#[derive(Debug, Default, Clone)]
pub struct NullSource;

impl PadSource for NullSource {
    fn device_class(&self) -> &str {
        "Null"
    }

    fn query(&mut self, _slot: usize) -> Result<PadReading, PadQueryError> {
        Err(PadQueryError::NotConnected)
    }
}

/// Answer for one slot during one scripted pump.
pub type ScriptedAnswer = Result<PadReading, PadQueryError>;

/// Replays per-pump answers for each slot.
///
/// Each `refresh` advances to the next scripted frame. Slots without a frame
/// queued answer "not connected".
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    device_class: String,
    frames: [VecDeque<ScriptedAnswer>; MAX_CONTROLLERS],
    current: [ScriptedAnswer; MAX_CONTROLLERS],
}

impl ScriptedSource {
    pub fn new(device_class: impl Into<String>) -> Self {
        Self {
            device_class: device_class.into(),
            frames: std::array::from_fn(|_| VecDeque::new()),
            current: std::array::from_fn(|_| Err(PadQueryError::NotConnected)),
        }
    }

    /// Queue the answer `slot` gives on a future pump.
    pub fn push(&mut self, slot: usize, answer: ScriptedAnswer) -> &mut Self {
        match self.frames.get_mut(slot) {
            Some(frames) => frames.push_back(answer),
            None => warn!(
                "Ignoring scripted answer for slot {} (only {} slots)",
                slot, MAX_CONTROLLERS
            ),
        }
        self
    }

    pub fn push_present(&mut self, slot: usize, packet_id: u32, state: PadState) -> &mut Self {
        self.push(slot, Ok(PadReading { packet_id, state }))
    }

    pub fn push_absent(&mut self, slot: usize) -> &mut Self {
        self.push(slot, Err(PadQueryError::NotConnected))
    }
}

impl PadSource for ScriptedSource {
    fn device_class(&self) -> &str {
        &self.device_class
    }

    fn refresh(&mut self) {
        for (frames, current) in self.frames.iter_mut().zip(self.current.iter_mut()) {
            *current = frames
                .pop_front()
                .unwrap_or(Err(PadQueryError::NotConnected));
        }
    }

    fn query(&mut self, slot: usize) -> Result<PadReading, PadQueryError> {
        self.current
            .get(slot)
            .cloned()
            .unwrap_or(Err(PadQueryError::NotConnected))
    }
}
