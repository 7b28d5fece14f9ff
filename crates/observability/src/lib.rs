//! Process-wide tracing setup shared by the binaries.

pub mod subscriber;

pub use subscriber::{LogFormat, LogSettings};

/// Initialize tracing from the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init(LogSettings::from_env());
}
