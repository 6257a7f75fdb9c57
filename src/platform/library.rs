//! Dynamic library loading. The platform forbids loading arbitrary code, so
//! nothing here ever succeeds.

use tracing::warn;

use super::PlatformError;

/// A loaded library. Uninhabited: no library can be loaded on this platform.
#[derive(Debug)]
pub enum LibraryHandle {}

pub fn load_library(name: &str) -> Result<LibraryHandle, PlatformError> {
    warn!("load_library: {} (not supported on this platform)", name);
    Err(PlatformError::Unsupported(format!("loading library {}", name)))
}

pub fn close_library(handle: LibraryHandle) {
    match handle {}
}

pub fn address_for_name(handle: &LibraryHandle, _export_name: &str) -> Option<usize> {
    match *handle {}
}

pub fn name_for_address(handle: &LibraryHandle, _address: usize) -> Option<String> {
    match *handle {}
}
