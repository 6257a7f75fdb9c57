//! Platform shim that runs a portable engine core on a sandboxed console target.
//!
//! The shim gives the engine a monotonic [`clock`], a [`main_loop`] driver and
//! polled gamepad input ([`controller`] + [`mapping`], glued by [`input`]).
//! Capabilities the platform refuses live in [`platform`] as fixed answers.

pub mod clock;
pub mod config;
pub mod console;
pub mod controller;
pub mod input;
pub mod main_loop;
pub mod mapping;
pub mod platform;

pub use clock::{Clock, ClockError, InstantTicks, ScriptedTicks, TickSource};
pub use config::{ConfigError, ShimConfig};
pub use console::{CommandQueue, CommandSink, Console, ConsoleLog, TracingConsole};
pub use input::InputSystem;
pub use main_loop::{Frame, MainLoop};
