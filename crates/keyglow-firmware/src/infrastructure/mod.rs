//! Infrastructure layer - ESP32 implementations of the core ports
//!
//! Concrete bus, LED and task plumbing around `keyglow_core`.

pub(crate) mod drivers;
pub(crate) mod tasks;
pub(crate) mod types;
