pub mod color;
pub mod commands;
pub mod frame;

/// Default TCP port the goal controller listens on
pub const DEFAULT_PORT: u16 = 3132;

/// Reconnect defaults
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1000;

/// Heartbeat cadence expected by the controller
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 1000;
