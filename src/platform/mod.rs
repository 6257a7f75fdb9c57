//! Platform services the engine expects from its host
//!
//! Most of them are refused by the sandboxed target and answer with a fixed
//! fallback. The ones with real behavior are the clipboard buffer, `sleep`
//! and the [`fatal`] halt.

pub mod clipboard;
pub mod filesystem;
pub mod library;

use std::time::Duration;
use tracing::{debug, error};

pub use clipboard::{Clipboard, ClipboardKind, CLIPBOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("Not supported on this platform: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopParameters {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub refresh_rate: u32,
}

/// The view is sized by the system; report a 1080p60 desktop.
pub fn desktop_parameters() -> Option<DesktopParameters> {
    Some(DesktopParameters {
        width: 1920,
        height: 1080,
        bits_per_pixel: 32,
        refresh_rate: 60,
    })
}

/// No terminal for a dedicated server. Always false.
pub fn init_terminal() -> bool {
    false
}

pub fn close_terminal() {}

/// Text typed on stdin; there is no stdin.
pub fn console_input() -> Option<String> {
    None
}

/// No secure generator is wired up. Returns false so the caller uses its
/// fallback generator; `buf` is left untouched.
pub fn random_bytes(buf: &mut [u8]) -> bool {
    debug!("random_bytes({}) unavailable, caller falls back", buf.len());
    false
}

/// Yield the thread for `seconds`. Negative or NaN durations do not sleep.
pub fn sleep(seconds: f64) {
    if let Ok(duration) = Duration::try_from_secs_f64(seconds) {
        std::thread::sleep(duration);
    }
}

/// A player joined or spoke.
pub fn server_activity() {}

pub fn recent_server(_command: &str, _target: &str, _title: &str, _description: &str) {}

/// Log `message` on the debug-output sink and halt.
///
/// There is no coordinated shutdown on this platform, so the thread parks
/// forever instead of exiting.
pub fn fatal(message: &str) -> ! {
    error!("Fatal error: {}", message);
    loop {
        std::thread::park();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_answers() {
        assert!(!init_terminal());
        assert_eq!(console_input(), None);
        let mut buf = [7u8; 16];
        assert!(!random_bytes(&mut buf));
        assert_eq!(buf, [7u8; 16]);
        assert_eq!(desktop_parameters().map(|d| (d.width, d.height)), Some((1920, 1080)));
    }

    #[test]
    fn sleep_ignores_bad_durations() {
        sleep(-1.0);
        sleep(f64::NAN);
        sleep(0.0);
    }
}
