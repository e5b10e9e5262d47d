//! Application-wide constants.
//!
//! Centralizes magic numbers and configuration values for maintainability.

use std::time::Duration;

/// Event polling timeout. Also paces frames (~60 per second when idle).
pub const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// How long a toast notice stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Environment variable naming the log file (logging is off without it).
pub const LOG_ENV_VAR: &str = "FOLIOTUI_LOG";

/// Contact delivery defaults.
pub mod contact {
    /// Request timeout for the contact endpoint, in seconds.
    pub const TIMEOUT_SECONDS: u64 = 10;
}

/// Frame-rate monitoring defaults.
pub mod performance {
    /// Sampled FPS below this lowers the quality tier.
    pub const MIN_FPS: u32 = 30;
    /// Length of one sampling window in milliseconds.
    pub const SAMPLE_WINDOW_MS: u64 = 1000;
    /// Particle count that fills the whole particle band.
    pub const FULL_PARTICLE_BUDGET: u32 = 8000;
}

/// Layout dimensions for the main UI structure.
pub mod layout {
    /// Header height including logo, particle band and glow rules.
    pub const HEADER_HEIGHT: u16 = 9;
    /// Commands bar height.
    pub const COMMANDS_BAR_HEIGHT: u16 = 3;
    /// Status bar height.
    pub const STATUS_BAR_HEIGHT: u16 = 1;
    /// Height of a single-line form field (label + input + error).
    pub const FIELD_HEIGHT: u16 = 3;
    /// Minimum height of the message field.
    pub const MESSAGE_MIN_HEIGHT: u16 = 5;
}

/// Dialog dimensions (percentages of screen size).
pub mod dialog {
    /// Help overlay width percentage.
    pub const HELP_WIDTH: u16 = 65;
    /// Help overlay height percentage.
    pub const HELP_HEIGHT: u16 = 75;
    /// Submitted confirmation width percentage.
    pub const CONFIRM_WIDTH: u16 = 55;
    /// Submitted confirmation height percentage.
    pub const CONFIRM_HEIGHT: u16 = 35;
}
