//! Controller subsystem for gamepad input acquisition
//!
//! 1. [`source`] - hardware seam answering per-slot queries
//! 2. [`poller`] - fixed slot table, connect tracking and packet de-duplication
//! 3. [`pad_state`] - the snapshot a report carries
//! 4. [`slot_map`] - slot pinning and packet ids for event-driven backends
//!
//! ```text
//! PadSource ──query(slot)──► GamepadPoller ──slots()──► mapping::InputTranslator
//! ```

#[cfg(feature = "gilrs")]
pub mod gilrs_source;
pub mod pad_state;
pub mod poller;
pub mod slot_map;
pub mod source;

/// Number of controller slots polled every tick.
pub const MAX_CONTROLLERS: usize = 4;

pub use pad_state::{ButtonSet, ButtonType, PadState, StickPosition};
pub use poller::{ControllerSlot, DeviceInfo, GamepadPoller};
pub use source::{NullSource, PadQueryError, PadReading, PadSource, ScriptedSource};
