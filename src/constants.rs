// Engine sentinels and sampling defaults

/// Reported by an engine for a video dimension it does not know yet.
pub const NO_VALUE: i32 = -1;

/// Reported by an engine for a time it does not know yet (e.g. live duration).
pub const TIME_UNSET: i64 = i64::MIN + 1;

pub const MILLIS_PER_SECOND: f64 = 1000.0;

// === Meta ===
pub const UNKNOWN_PLAYER_NAME: &str = "unknown";

// === Retry context ===
pub const DEFAULT_RETRY_THREAD_NAME: &str = "telemetry-main";

// === Display ===
// Used when no display subsystem is attached (headless sessions, replays)
pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;
