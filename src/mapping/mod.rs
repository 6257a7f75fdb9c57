//! Translation of controller snapshots into engine input.
//!
//! Two jobs that never share state:
//!
//! - [`movement`]: analog sticks and triggers, re-read every tick (level)
//! - [`commands`]: button press/release edges into console commands (edge)
//!
//! [`translator::InputTranslator`] runs both for one tick.

pub mod commands;
pub mod movement;
pub mod translator;

pub use commands::{Binding, CommandBindings, CommandMapper};
pub use movement::{MovementInput, MovementSettings};
pub use translator::InputTranslator;
