//! Messages shown to the player

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::constants::timing::{HINT_CLEAR, NOTICE_CLEAR};

/// Identifies one notice so that its clearing alarm cannot hit a newer one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NoticeId(pub u64);

/// Tone of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeKind {
    /// A guess was right
    Success,
    /// A guess was wrong or could not be checked
    Failure,
    /// A hint was disclosed
    Hint,
    /// Anything else
    Info,
}

impl NoticeKind {
    /// How long a transient notice of this kind stays up
    pub fn lifetime(self) -> Duration {
        match self {
            Self::Hint => HINT_CLEAR,
            Self::Success | Self::Failure | Self::Info => NOTICE_CLEAR,
        }
    }
}

/// A message shown under the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Identity of this notice
    pub id: NoticeId,
    /// Tone
    pub kind: NoticeKind,
    /// Text shown
    pub text: String,
    /// Sticky notices have no clearing alarm
    pub sticky: bool,
}
