//! Output sinks the input core writes to
//!
//! - [`Console`] receives human-readable notification lines (pad connected,
//!   pad disconnected, subsystem initialized).
//! - [`CommandSink`] receives textual engine commands such as `+jump`.
//!
//! The command queue is the only place where the single-threaded frame hands
//! data to another task, so [`CommandQueue`] never blocks: a full or closed
//! channel drops the command with a warning.

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

pub trait Console {
    fn print(&mut self, line: &str);
}

/// Forwards console lines to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn print(&mut self, line: &str) {
        info!("{}", line);
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleLine {
    pub text: String,
    pub timestamp: DateTime<Local>,
}

/// Keeps every printed line in memory, stamped with local time.
#[derive(Debug, Default, Clone)]
pub struct ConsoleLog {
    lines: Vec<ConsoleLine>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// Remove and return everything printed so far.
    pub fn drain(&mut self) -> Vec<ConsoleLine> {
        std::mem::take(&mut self.lines)
    }
}

impl Console for ConsoleLog {
    fn print(&mut self, line: &str) {
        let timestamp = Local::now();
        debug!("console [{}] {}", timestamp.format("%H:%M:%S.%3f"), line);
        self.lines.push(ConsoleLine {
            text: line.to_string(),
            timestamp,
        });
    }
}

pub trait CommandSink {
    /// Append one command to the engine's command buffer.
    fn add_text(&mut self, command: &str);
}

impl CommandSink for Vec<String> {
    fn add_text(&mut self, command: &str) {
        self.push(command.to_string());
    }
}

/// Bounded channel into the engine's command interpreter.
#[derive(Debug, Clone)]
pub struct CommandQueue {
    sender: mpsc::Sender<String>,
}

impl CommandQueue {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(capacity);
        debug!("Created command channel with buffer capacity {}", capacity);
        (Self { sender }, receiver)
    }
}

impl CommandSink for CommandQueue {
    fn add_text(&mut self, command: &str) {
        match self.sender.try_send(command.to_string()) {
            Ok(()) => debug!("Queued command: {}", command),
            Err(TrySendError::Full(command)) => {
                warn!("Command queue full, dropping: {}", command)
            }
            Err(TrySendError::Closed(command)) => {
                warn!("Command interpreter gone, dropping: {}", command)
            }
        }
    }
}
