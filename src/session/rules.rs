//! Per-variant game rules and the counters they drive
//!
//! Every variant plays the same state machine; what differs is captured
//! here as plain configuration.

use serde::Serialize;

/// What wins a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Victory {
    /// Every item on the board is revealed
    AllRevealed,
    /// The server confirms the hidden target was guessed
    TargetGuessed,
}

/// Configuration of one variant's session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rules {
    /// Victory predicate
    pub victory: Victory,
    /// Hints available, `None` if the variant has no hints
    pub hints: Option<u32>,
    /// Lives available, `None` if the variant has no lives
    pub lives: Option<u32>,
    /// Seconds available, `None` if the variant is untimed
    pub time_limit: Option<u32>,
    /// Whether a wrong guess uncovers the next hidden item
    pub consolation_reveal: bool,
    /// Whether the player may spend a life to uncover the next item
    pub paid_reveal: bool,
}

impl Rules {
    /// Untimed rules won by revealing everything, with nothing else enabled
    pub const fn reveal_all() -> Self {
        Self {
            victory: Victory::AllRevealed,
            hints: None,
            lives: None,
            time_limit: None,
            consolation_reveal: false,
            paid_reveal: false,
        }
    }
}

/// Hints used out of those available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HintBudget {
    used: u32,
    max: u32,
}

impl HintBudget {
    /// A fresh budget of `max` hints
    pub fn new(max: u32) -> Self {
        Self { used: 0, max }
    }

    /// Hints used so far
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Hints available in total
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether another hint may be used
    pub fn can_use(&self) -> bool {
        self.used < self.max
    }

    /// Consumes one hint if any is left
    pub fn consume(&mut self) -> bool {
        let ok = self.can_use();
        if ok {
            self.used += 1;
        }
        ok
    }
}

/// Remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LivesCounter {
    remaining: u32,
    max: u32,
}

impl LivesCounter {
    /// A full counter of `max` lives
    pub fn new(max: u32) -> Self {
        Self {
            remaining: max,
            max,
        }
    }

    /// Lives left
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Lives at the start
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether no life is left
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Takes one life, never going below zero
    pub fn lose(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

/// Seconds left on the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownClock {
    remaining: u32,
    limit: u32,
}

impl CountdownClock {
    /// A clock starting at `limit` seconds
    pub fn new(limit: u32) -> Self {
        Self {
            remaining: limit,
            limit,
        }
    }

    /// Seconds left
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Seconds at the start
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Seconds played so far
    pub fn elapsed(&self) -> u32 {
        self.limit - self.remaining
    }

    /// Whether time is up
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Advances the clock one second
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

/// Formats seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_hint_budget_caps_at_max() {
        let mut budget = HintBudget::new(2);
        assert!(budget.consume());
        assert!(budget.consume());
        assert!(!budget.consume());
        assert_eq!(budget.used(), 2);
        assert!(!budget.can_use());
    }

    #[test]
    fn test_lives_never_go_negative() {
        let mut lives = LivesCounter::new(1);
        assert_eq!(lives.lose(), 0);
        assert_eq!(lives.lose(), 0);
        assert!(lives.is_exhausted());
        assert_eq!(lives.max(), 1);
    }

    #[test]
    fn test_clock_counts_down_to_zero() {
        let mut clock = CountdownClock::new(3);
        clock.tick();
        assert_eq!(clock.elapsed(), 1);
        clock.tick();
        clock.tick();
        clock.tick();
        assert!(clock.is_expired());
        assert_eq!(clock.elapsed(), 3);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(120), "2:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(9), "0:09");
    }
}
