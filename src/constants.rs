//! Configuration constants for the carcio client
//!
//! This module contains the limits, default budgets and timings used
//! throughout the client so that every game variant shares the same
//! boundaries.

/// API connection defaults
pub mod api {
    /// Base URL used when no `CARCIO_API_URL` is configured
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Minimum accepted request timeout in seconds
    pub const MIN_TIMEOUT_SECS: u64 = 1;
    /// Maximum accepted request timeout in seconds
    pub const MAX_TIMEOUT_SECS: u64 = 120;
}

/// Guess input limits
pub mod guess {
    /// Maximum length of a guess in characters
    pub const MAX_LENGTH: usize = 100;
}

/// Team (national and international) game defaults
pub mod team {
    /// Hints granted when the payload omits `pistas_disponibles`
    pub const DEFAULT_HINTS: u32 = 3;
    /// Scheme shown when the payload omits `formacion`
    pub const DEFAULT_SCHEME: &str = "3-4-3";
    /// Outfield line sizes of [`DEFAULT_SCHEME`], used when `formacion` does not parse
    pub const DEFAULT_LINES: [u8; 3] = [3, 4, 3];
    /// Nationality shown in a hint when the player has none recorded
    pub const DEFAULT_NATIONALITY: &str = "Argentino";
}

/// Orbit game defaults
pub mod orbit {
    /// Time limit in seconds when the payload omits `tiempo_limite`
    pub const DEFAULT_TIME_LIMIT: u32 = 120;
    /// Remaining seconds under which the clock is rendered as urgent
    pub const DANGER_THRESHOLD: u32 = 30;
}

/// Trajectory game defaults
pub mod trajectory {
    /// Lives granted when the payload omits `max_vidas`
    pub const DEFAULT_LIVES: u32 = 5;
}

/// Timings of scheduled alarms
pub mod timing {
    use web_time::Duration;

    /// Interval between two countdown ticks
    pub const TICK: Duration = Duration::from_secs(1);
    /// Lifetime of a success or failure notice
    pub const NOTICE_CLEAR: Duration = Duration::from_secs(3);
    /// Lifetime of a hint notice
    pub const HINT_CLEAR: Duration = Duration::from_secs(5);
}
